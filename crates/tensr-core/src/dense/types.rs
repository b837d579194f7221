//! Dense tensor type definition and constructors.

use crate::error::ShapeError;
use crate::layout::{strides_for, transform_index, Layout};
use crate::scalar::{Element, Scalar};

/// Dense N-dimensional tensor: a [`Layout`] plus exactly one contiguous
/// buffer of `layout.len()` elements.
///
/// Every coordinate maps to exactly one buffer slot via
/// `sum(coords[i] * strides[i])`.
///
/// # Examples
///
/// ```
/// use tensr_core::{DenseTensor, Tensor, TensorMut};
///
/// let mut tensor = DenseTensor::<f64>::zeros(&[2, 3]).unwrap();
/// tensor.set(&[1, 2], 7.0).unwrap();
/// assert_eq!(tensor.get(&[1, 2]).unwrap(), 7.0);
/// assert_eq!(tensor.rank(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseTensor<T> {
    pub(crate) layout: Layout,
    pub(crate) buffer: Vec<T>,
}

impl<T: Element> DenseTensor<T> {
    /// Creates a forward-layout tensor of default values.
    pub fn zeros(dims: &[usize]) -> Result<Self, ShapeError> {
        Self::with_layout_flag(dims, false)
    }

    /// Creates a reversed-layout tensor of default values.
    pub fn zeros_reversed(dims: &[usize]) -> Result<Self, ShapeError> {
        Self::with_layout_flag(dims, true)
    }

    /// Creates a tensor of default values in either stride direction.
    pub fn with_layout_flag(dims: &[usize], reversed: bool) -> Result<Self, ShapeError> {
        let layout = Layout::contiguous(dims, reversed)?;
        let buffer = vec![T::default(); layout.len()];
        Ok(Self { layout, buffer })
    }

    /// Creates a tensor with every element set to `value`.
    pub fn from_elem(dims: &[usize], value: T) -> Result<Self, ShapeError> {
        let layout = Layout::new(dims)?;
        let buffer = vec![value; layout.len()];
        Ok(Self { layout, buffer })
    }

    /// Adopts an existing buffer without copying.
    ///
    /// # Errors
    ///
    /// [`ShapeError::LengthMismatch`] when the buffer length does not equal
    /// the product of the dimensions.
    pub fn from_buffer(buffer: Vec<T>, dims: &[usize], reversed: bool) -> Result<Self, ShapeError> {
        let layout = Layout::contiguous(dims, reversed)?;
        if buffer.len() != layout.len() {
            return Err(ShapeError::LengthMismatch {
                expected: layout.len(),
                got: buffer.len(),
            });
        }
        Ok(Self { layout, buffer })
    }

    /// Builds a tensor from row-major source data.
    ///
    /// For a forward destination this adopts the data directly. For a
    /// reversed destination every source element is re-projected through
    /// the destination strides via a coordinate round-trip, not a raw
    /// copy, so `tensor.get(coords)` observes the same values either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use tensr_core::{DenseTensor, Tensor};
    ///
    /// let forward = DenseTensor::from_flat(vec![1, 2, 3, 4], &[2, 2], false).unwrap();
    /// let reversed = DenseTensor::from_flat(vec![1, 2, 3, 4], &[2, 2], true).unwrap();
    /// for i in 0..2 {
    ///     for j in 0..2 {
    ///         assert_eq!(forward.get(&[i, j]).unwrap(), reversed.get(&[i, j]).unwrap());
    ///     }
    /// }
    /// ```
    pub fn from_flat(data: Vec<T>, dims: &[usize], reversed: bool) -> Result<Self, ShapeError> {
        if !reversed {
            return Self::from_buffer(data, dims, false);
        }

        let layout = Layout::contiguous(dims, true)?;
        if data.len() != layout.len() {
            return Err(ShapeError::LengthMismatch {
                expected: layout.len(),
                got: data.len(),
            });
        }

        let source_strides = strides_for(dims, false);
        let mut buffer = vec![T::default(); layout.len()];
        for (index, value) in data.into_iter().enumerate() {
            let dest = transform_index(index, &source_strides, false, layout.strides());
            buffer[dest] = value;
        }
        Ok(Self { layout, buffer })
    }

    /// Builds a rank-2 tensor from rows.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Ragged`] when the rows differ in length;
    /// [`ShapeError::ZeroRank`] when there are no rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ShapeError> {
        if rows.is_empty() {
            return Err(ShapeError::ZeroRank);
        }
        let ncols = rows[0].len();
        for (row, entries) in rows.iter().enumerate().skip(1) {
            if entries.len() != ncols {
                return Err(ShapeError::Ragged {
                    row,
                    expected: ncols,
                    got: entries.len(),
                });
            }
        }

        let nrows = rows.len();
        let buffer: Vec<T> = rows.into_iter().flatten().collect();
        Self::from_buffer(buffer, &[nrows, ncols], false)
    }

    /// The raw backing buffer.
    pub fn buffer(&self) -> &[T] {
        &self.buffer
    }

    /// Mutable access to the raw backing buffer.
    pub fn buffer_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }

    /// Consumes the tensor and returns its backing buffer.
    pub fn into_buffer(self) -> Vec<T> {
        self.buffer
    }
}

impl<T: Scalar> DenseTensor<T> {
    /// Creates an `n`×`n` identity matrix.
    ///
    /// The main diagonal is layout-symmetric, so both stride directions
    /// place ones at the same buffer slots.
    pub fn identity(n: usize) -> Result<Self, ShapeError> {
        let mut result = Self::zeros(&[n, n])?;
        for i in 0..n {
            result.buffer[i * n + i] = T::one();
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::Tensor;

    #[test]
    fn test_zeros() {
        let tensor = DenseTensor::<f64>::zeros(&[2, 3, 4]).unwrap();
        assert_eq!(tensor.dims(), &[2, 3, 4]);
        assert_eq!(tensor.len(), 24);
        assert!(tensor.buffer().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_buffer_length_check() {
        let err = DenseTensor::from_buffer(vec![1.0, 2.0, 3.0], &[2, 2], false).unwrap_err();
        assert_eq!(
            err,
            ShapeError::LengthMismatch {
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn test_from_flat_reversed_reprojects() {
        // row-major [[1, 2, 3], [4, 5, 6]] into a column-major buffer
        let tensor = DenseTensor::from_flat(vec![1, 2, 3, 4, 5, 6], &[2, 3], true).unwrap();
        assert_eq!(tensor.buffer(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(tensor.get(&[0, 1]).unwrap(), 2);
        assert_eq!(tensor.get(&[1, 2]).unwrap(), 6);
    }

    #[test]
    fn test_from_rows() {
        let tensor = DenseTensor::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(tensor.dims(), &[2, 2]);
        assert_eq!(tensor.buffer(), &[1, 2, 3, 4]);

        let err = DenseTensor::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, ShapeError::Ragged { row: 1, .. }));
    }

    #[test]
    fn test_identity() {
        let eye = DenseTensor::<i32>::identity(3).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1 } else { 0 };
                assert_eq!(eye.get(&[i, j]).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = DenseTensor::from_flat(vec![1, 2, 3, 4], &[2, 2], false).unwrap();
        let clone = original.clone();
        original.buffer_mut()[0] = 99;
        assert_eq!(clone.buffer()[0], 1);
    }
}
