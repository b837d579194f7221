//! Strided layout model shared by every tensor storage kind.
//!
//! A [`Layout`] maps n-dimensional coordinates onto a 1-dimensional storage
//! space through per-axis strides. Forward layout means the **last** axis
//! varies fastest (row-major); reversed layout means the **first** axis
//! varies fastest (column-major-like). A layout may also carry an offset
//! when it describes a sub-range view of a larger buffer.
//!
//! # Examples
//!
//! ```
//! use tensr_core::Layout;
//!
//! let layout = Layout::new(&[2, 3, 4]).unwrap();
//! assert_eq!(layout.strides(), &[12, 4, 1]);
//! assert_eq!(layout.len(), 24);
//!
//! // Coordinates and linear positions are mutual inverses
//! let linear = layout.linear_index(&[1, 2, 3]).unwrap();
//! assert_eq!(linear, 23);
//! assert_eq!(layout.indices_of(linear).as_slice(), &[1, 2, 3]);
//! ```

use smallvec::SmallVec;

use crate::error::{IndexError, ShapeError};

/// Dimension/stride vector with inline storage for the common low-rank case.
///
/// Tensors of rank up to 6 avoid heap allocation; higher ranks spill
/// automatically.
pub type Dims = SmallVec<[usize; 6]>;

/// Computes contiguous strides for the given dimensions.
///
/// Forward layout gives `strides[i] = product(dims[i+1..])`; reversed
/// layout flips the multiplication order so the first axis varies fastest.
pub fn strides_for(dims: &[usize], reversed: bool) -> Dims {
    let mut strides: Dims = SmallVec::from_elem(0, dims.len());
    let mut stride = 1;
    if reversed {
        for (i, &dim) in dims.iter().enumerate() {
            strides[i] = stride;
            stride *= dim;
        }
    } else {
        for (i, &dim) in dims.iter().enumerate().rev() {
            strides[i] = stride;
            stride *= dim;
        }
    }
    strides
}

/// Decomposes a linear position into coordinates under the given strides,
/// dividing by the largest stride first.
///
/// Writes into `out[start..]`; axes before `start` are left untouched,
/// which lets callers pin leading coordinates (diagonal and triangle
/// extraction rely on this).
pub fn decompose_index(
    strides: &[usize],
    reversed: bool,
    index: usize,
    out: &mut [usize],
    start: usize,
) {
    debug_assert_eq!(strides.len(), out.len());

    let mut remainder = index;
    for i in start..strides.len() {
        // visit strides largest-first so each division is exact
        let axis = if reversed { strides.len() - 1 - i } else { i };
        let stride = strides[axis];
        out[axis] = remainder / stride;
        remainder %= stride;
    }
}

/// Takes a linear position under `source_strides` and recomputes it for the
/// same coordinates under `target_strides`.
///
/// This is the coordinate round-trip used when a row-major source is
/// deposited into a reversed-stride destination, and by the contraction
/// engine's stride re-projection.
pub fn transform_index(
    index: usize,
    source_strides: &[usize],
    source_reversed: bool,
    target_strides: &[usize],
) -> usize {
    debug_assert_eq!(source_strides.len(), target_strides.len());

    let mut transformed = 0;
    let mut remainder = index;
    for i in 0..source_strides.len() {
        let axis = if source_reversed {
            source_strides.len() - 1 - i
        } else {
            i
        };
        let stride = source_strides[axis];
        transformed += target_strides[axis] * (remainder / stride);
        remainder %= stride;
    }
    transformed
}

/// Partitions `strides` into the entries selected by `axes` and the rest,
/// preserving axis order on both sides.
///
/// The selected strides land in `split[split_offset..]`, ordered by their
/// position in `axes`; the rest land in `rest[rest_offset..]` in original
/// axis order. Slots outside the written ranges are left untouched, so
/// callers can zero-pad by pre-filling.
pub fn split_strides(
    strides: &[usize],
    axes: &[usize],
    rest: &mut [usize],
    rest_offset: usize,
    split: &mut [usize],
    split_offset: usize,
) {
    let mut rest_index = rest_offset;
    for (i, &stride) in strides.iter().enumerate() {
        match axes.iter().position(|&axis| axis == i) {
            Some(j) => split[split_offset + j] = stride,
            None => {
                rest[rest_index] = stride;
                rest_index += 1;
            }
        }
    }
}

fn is_ascending(values: &[usize]) -> bool {
    values.windows(2).all(|w| w[1] >= w[0])
}

fn is_descending(values: &[usize]) -> bool {
    values.windows(2).all(|w| w[1] <= w[0])
}

/// Immutable strided layout: dimensions, strides, stride direction, and a
/// buffer offset for sub-range views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    dims: Dims,
    strides: Dims,
    reversed: bool,
    offset: usize,
    len: usize,
}

impl Layout {
    /// Creates a forward (row-major) layout for the given dimensions.
    ///
    /// # Errors
    ///
    /// [`ShapeError::ZeroRank`] when `dims` is empty;
    /// [`ShapeError::NonPositiveDimension`] when any axis length is zero.
    pub fn new(dims: &[usize]) -> Result<Self, ShapeError> {
        Self::contiguous(dims, false)
    }

    /// Creates a reversed layout where the first axis varies fastest.
    pub fn new_reversed(dims: &[usize]) -> Result<Self, ShapeError> {
        Self::contiguous(dims, true)
    }

    /// Creates a contiguous layout in either stride direction.
    pub fn contiguous(dims: &[usize], reversed: bool) -> Result<Self, ShapeError> {
        if dims.is_empty() {
            return Err(ShapeError::ZeroRank);
        }

        let mut len = 1usize;
        for (axis, &dim) in dims.iter().enumerate() {
            if dim < 1 {
                return Err(ShapeError::NonPositiveDimension { axis });
            }
            len *= dim;
        }

        Ok(Self {
            dims: Dims::from_slice(dims),
            strides: strides_for(dims, reversed),
            reversed,
            offset: 0,
            len,
        })
    }

    /// Creates a layout over caller-supplied strides and offset.
    ///
    /// Strides must be monotonic; the stride direction is inferred from the
    /// monotonic direction (descending means forward layout, ascending
    /// means reversed).
    ///
    /// # Errors
    ///
    /// [`ShapeError::NonMonotonicStrides`] when strides are neither all
    /// ascending nor all descending; [`ShapeError::NonPositiveStride`]
    /// when any stride is zero; [`ShapeError::RankMismatch`] when
    /// `strides` and `dims` differ in length.
    pub fn with_strides(dims: &[usize], strides: &[usize], offset: usize) -> Result<Self, ShapeError> {
        if dims.is_empty() {
            return Err(ShapeError::ZeroRank);
        }
        if strides.len() != dims.len() {
            return Err(ShapeError::RankMismatch {
                expected: dims.len(),
                got: strides.len(),
            });
        }

        let mut len = 1usize;
        for (axis, &dim) in dims.iter().enumerate() {
            if dim < 1 {
                return Err(ShapeError::NonPositiveDimension { axis });
            }
            len *= dim;
        }

        // index decomposition divides by every stride
        for (axis, &stride) in strides.iter().enumerate() {
            if stride < 1 {
                return Err(ShapeError::NonPositiveStride { axis });
            }
        }

        let reversed = if is_descending(strides) {
            false
        } else if is_ascending(strides) {
            true
        } else {
            return Err(ShapeError::NonMonotonicStrides);
        };

        Ok(Self {
            dims: Dims::from_slice(dims),
            strides: Dims::from_slice(strides),
            reversed,
            offset,
            len,
        })
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Axis lengths.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Per-axis strides.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// True when the first axis varies fastest.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Buffer offset of coordinate `[0, 0, ..]`.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total number of addressable elements: the product of all dimensions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// A layout always addresses at least one element.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Backing-buffer length this layout requires: the offset plus the
    /// maximum addressable position plus one.
    ///
    /// Equal to [`Layout::len`] for contiguous zero-offset layouts; larger
    /// when the layout is a sub-range view of a bigger buffer.
    pub fn memory_len(&self) -> usize {
        let last: usize = self
            .dims
            .iter()
            .zip(self.strides.iter())
            .map(|(&dim, &stride)| (dim - 1) * stride)
            .sum();
        self.offset + last + 1
    }

    /// Computes the buffer position of an n-ary coordinate.
    ///
    /// # Errors
    ///
    /// [`IndexError::RankMismatch`] when `coords` has the wrong length;
    /// [`IndexError::OutOfRange`] when any coordinate exceeds its axis.
    pub fn linear_index(&self, coords: &[usize]) -> Result<usize, IndexError> {
        if coords.len() != self.dims.len() {
            return Err(IndexError::RankMismatch {
                expected: self.dims.len(),
                got: coords.len(),
            });
        }

        let mut index = self.offset;
        for (axis, (&coord, &dim)) in coords.iter().zip(self.dims.iter()).enumerate() {
            if coord >= dim {
                return Err(IndexError::OutOfRange {
                    axis,
                    index: coord,
                    len: dim,
                });
            }
            index += coord * self.strides[axis];
        }
        Ok(index)
    }

    /// Recovers the coordinates of a position produced by
    /// [`Layout::linear_index`].
    pub fn indices_of(&self, linear: usize) -> Dims {
        let mut coords: Dims = SmallVec::from_elem(0, self.dims.len());
        decompose_index(
            &self.strides,
            self.reversed,
            linear - self.offset,
            &mut coords,
            0,
        );
        coords
    }

    /// Re-expresses a linear position of this layout under different
    /// strides, keeping the same coordinates.
    pub fn transform_index(&self, linear: usize, target_strides: &[usize]) -> usize {
        transform_index(
            linear - self.offset,
            &self.strides,
            self.reversed,
            target_strides,
        )
    }

    /// Restricts the layout to an inclusive `(lower, upper)` range per axis.
    ///
    /// The result keeps this layout's strides (it aliases the same backing
    /// buffer) with dimensions shrunk to `upper - lower + 1` and the offset
    /// advanced by `sum(lower[i] * strides[i])`. A range with
    /// `lower == upper` yields a length-1 axis, not axis elimination.
    ///
    /// # Errors
    ///
    /// [`IndexError::RankMismatch`] when the range count differs from the
    /// rank; [`IndexError::InvalidRange`] when a range is inverted or runs
    /// past its axis.
    pub fn slice(&self, ranges: &[(usize, usize)]) -> Result<Self, IndexError> {
        if ranges.len() != self.dims.len() {
            return Err(IndexError::RankMismatch {
                expected: self.dims.len(),
                got: ranges.len(),
            });
        }

        let mut dims: Dims = SmallVec::with_capacity(self.dims.len());
        let mut offset = self.offset;
        let mut len = 1usize;
        for (axis, &(lower, upper)) in ranges.iter().enumerate() {
            if lower > upper || upper >= self.dims[axis] {
                return Err(IndexError::InvalidRange {
                    axis,
                    lower,
                    upper,
                    len: self.dims[axis],
                });
            }
            let dim = upper - lower + 1;
            dims.push(dim);
            len *= dim;
            offset += lower * self.strides[axis];
        }

        Ok(Self {
            dims,
            strides: self.strides.clone(),
            reversed: self.reversed,
            offset,
            len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_strides() {
        let layout = Layout::new(&[2, 3, 4]).unwrap();
        assert_eq!(layout.strides(), &[12, 4, 1]);
        assert!(!layout.is_reversed());
        assert_eq!(layout.len(), 24);
        assert_eq!(layout.memory_len(), 24);
    }

    #[test]
    fn test_reversed_strides() {
        let layout = Layout::new_reversed(&[2, 3, 4]).unwrap();
        assert_eq!(layout.strides(), &[1, 2, 6]);
        assert!(layout.is_reversed());
        assert_eq!(layout.len(), 24);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = Layout::new(&[2, 0]).unwrap_err();
        assert_eq!(err, ShapeError::NonPositiveDimension { axis: 1 });
    }

    #[test]
    fn test_empty_dims_rejected() {
        assert_eq!(Layout::new(&[]).unwrap_err(), ShapeError::ZeroRank);
    }

    #[test]
    fn test_linear_index_roundtrip() {
        let layout = Layout::new(&[3, 4, 5]).unwrap();
        for i in 0..3 {
            for j in 0..4 {
                for k in 0..5 {
                    let linear = layout.linear_index(&[i, j, k]).unwrap();
                    assert_eq!(layout.indices_of(linear).as_slice(), &[i, j, k]);
                }
            }
        }
    }

    #[test]
    fn test_linear_index_roundtrip_reversed() {
        let layout = Layout::new_reversed(&[3, 4]).unwrap();
        for i in 0..3 {
            for j in 0..4 {
                let linear = layout.linear_index(&[i, j]).unwrap();
                assert_eq!(layout.indices_of(linear).as_slice(), &[i, j]);
            }
        }
    }

    #[test]
    fn test_linear_index_bounds() {
        let layout = Layout::new(&[2, 3]).unwrap();
        assert!(matches!(
            layout.linear_index(&[0, 3]),
            Err(IndexError::OutOfRange { axis: 1, .. })
        ));
        assert!(matches!(
            layout.linear_index(&[0]),
            Err(IndexError::RankMismatch { .. })
        ));
    }

    #[test]
    fn test_with_strides_infers_direction() {
        let forward = Layout::with_strides(&[2, 3], &[3, 1], 0).unwrap();
        assert!(!forward.is_reversed());

        let reversed = Layout::with_strides(&[2, 3], &[1, 2], 0).unwrap();
        assert!(reversed.is_reversed());

        let err = Layout::with_strides(&[2, 3, 4], &[1, 4, 2], 0).unwrap_err();
        assert_eq!(err, ShapeError::NonMonotonicStrides);
    }

    #[test]
    fn test_with_strides_rejects_zero_strides() {
        // an all-zero stride vector is monotonic both ways but cannot be
        // decomposed
        let err = Layout::with_strides(&[2, 3], &[0, 0], 0).unwrap_err();
        assert_eq!(err, ShapeError::NonPositiveStride { axis: 0 });

        let err = Layout::with_strides(&[2, 3], &[3, 0], 0).unwrap_err();
        assert_eq!(err, ShapeError::NonPositiveStride { axis: 1 });
    }

    #[test]
    fn test_slice_advances_offset() {
        let layout = Layout::new(&[4, 5]).unwrap();
        let sliced = layout.slice(&[(1, 2), (1, 2)]).unwrap();
        assert_eq!(sliced.dims(), &[2, 2]);
        assert_eq!(sliced.strides(), layout.strides());
        assert_eq!(sliced.offset(), 5 + 1);
        assert_eq!(sliced.len(), 4);
        // a view addresses into the original buffer
        assert!(sliced.memory_len() <= layout.memory_len());
    }

    #[test]
    fn test_slice_single_element_axis() {
        let layout = Layout::new(&[5]).unwrap();
        let sliced = layout.slice(&[(2, 2)]).unwrap();
        assert_eq!(sliced.dims(), &[1]);
        assert_eq!(sliced.offset(), 2);
    }

    #[test]
    fn test_slice_rejects_inverted_and_overflowing_ranges() {
        let layout = Layout::new(&[5]).unwrap();
        assert!(layout.slice(&[(3, 2)]).is_err());
        assert!(layout.slice(&[(0, 5)]).is_err());
    }

    #[test]
    fn test_sliced_roundtrip() {
        let layout = Layout::new(&[4, 5]).unwrap();
        let sliced = layout.slice(&[(1, 3), (2, 4)]).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let linear = sliced.linear_index(&[i, j]).unwrap();
                assert_eq!(sliced.indices_of(linear).as_slice(), &[i, j]);
            }
        }
    }

    #[test]
    fn test_transform_index() {
        // same coordinates, row-major source onto reversed target
        let source = strides_for(&[2, 3], false);
        let target = strides_for(&[2, 3], true);
        // coordinate (1, 2): source 1*3+2 = 5, target 1*1+2*2 = 5
        assert_eq!(transform_index(5, &source, false, &target), 5);
        // coordinate (1, 0): source 3, target 1
        assert_eq!(transform_index(3, &source, false, &target), 1);
    }

    #[test]
    fn test_split_strides() {
        let strides = [24, 12, 4, 1];
        let mut rest = [0usize; 2];
        let mut split = [0usize; 2];
        split_strides(&strides, &[1, 3], &mut rest, 0, &mut split, 0);
        assert_eq!(rest, [24, 4]);
        assert_eq!(split, [12, 1]);
    }

    #[test]
    fn test_memory_len_for_view() {
        let layout = Layout::with_strides(&[2, 2], &[5, 1], 6).unwrap();
        // max position = 6 + 1*5 + 1*1 = 12
        assert_eq!(layout.memory_len(), 13);
    }
}
