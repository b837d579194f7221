//! Compressed-sparse tensor storage (CSR/CSC generalized to any rank).
//!
//! A forward-layout tensor compresses its first axis (CSR-like); a
//! reversed-layout tensor compresses its last axis (CSC-like). Either
//! way the compressed axis is the one with the largest stride, so a
//! linear position splits as
//!
//! ```text
//! compressed index     = position / compressed_stride
//! non-compressed index = position % compressed_stride
//! ```
//!
//! Storage is three parallel arrays: `counts` holds one boundary per
//! compressed slice plus a leading zero, and `values`/`indices` hold the
//! stored elements partition by partition, sorted by non-compressed
//! index within each partition. Reads are a binary search inside one
//! partition; writes shift the tail and touch every later boundary, so
//! they are linear in the stored-entry count.
//!
//! # Examples
//!
//! ```
//! use tensr_core::{Tensor, TensorMut};
//! use tensr_sparse::CompressedTensor;
//!
//! let mut tensor = CompressedTensor::<f64>::zeros(&[4, 5]).unwrap();
//! tensor.set(&[2, 3], 1.5).unwrap();
//! tensor.set(&[0, 1], 2.5).unwrap();
//! assert_eq!(tensor.nonzero_count(), 2);
//! assert_eq!(tensor.get(&[2, 3]).unwrap(), 1.5);
//!
//! // writing the default value removes the entry
//! tensor.set(&[2, 3], 0.0).unwrap();
//! assert_eq!(tensor.nonzero_count(), 1);
//! ```

use tensr_core::error::{IndexError, ShapeError};
use tensr_core::layout::{strides_for, transform_index, Dims, Layout};
use tensr_core::scalar::Element;
use tensr_core::tensor::{Tensor, TensorMut};
use tensr_core::DenseTensor;

use crate::error::{CompressedError, SparseError};
use crate::sparse::SparseTensor;

const DEFAULT_CAPACITY: usize = 64;

/// Compressed-sparse tensor of any rank.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedTensor<T> {
    layout: Layout,
    compressed_dim: usize,
    /// The layout strides with the compressed axis zeroed, so a dot
    /// product with full coordinates yields the non-compressed index.
    non_compressed_strides: Dims,
    /// Partition boundaries: entries of partition `c` live at value
    /// slots `counts[c]..counts[c + 1]`.
    counts: Vec<usize>,
    values: Vec<T>,
    indices: Vec<usize>,
    value_count: usize,
}

fn compressed_dim_for(rank: usize, reversed: bool) -> usize {
    if reversed {
        rank - 1
    } else {
        0
    }
}

impl<T: Element> CompressedTensor<T> {
    /// Creates an empty forward-layout (first-axis-compressed) tensor
    /// with the default backing capacity.
    pub fn zeros(dims: &[usize]) -> Result<Self, ShapeError> {
        Self::with_capacity(dims, DEFAULT_CAPACITY, false)
    }

    /// Creates an empty reversed-layout (last-axis-compressed) tensor
    /// with the default backing capacity.
    pub fn zeros_reversed(dims: &[usize]) -> Result<Self, ShapeError> {
        Self::with_capacity(dims, DEFAULT_CAPACITY, true)
    }

    /// Creates an empty tensor with room for `capacity` stored entries.
    /// The backing never exceeds the dense element count, matching the
    /// growth cap.
    pub fn with_capacity(
        dims: &[usize],
        capacity: usize,
        reversed: bool,
    ) -> Result<Self, ShapeError> {
        let layout = Layout::contiguous(dims, reversed)?;
        let capacity = capacity.min(layout.len());
        let compressed_dim = compressed_dim_for(layout.rank(), reversed);

        let mut non_compressed_strides = Dims::from_slice(layout.strides());
        non_compressed_strides[compressed_dim] = 0;

        Ok(Self {
            counts: vec![0; dims[compressed_dim] + 1],
            values: vec![T::default(); capacity],
            indices: vec![0; capacity],
            value_count: 0,
            layout,
            compressed_dim,
            non_compressed_strides,
        })
    }

    /// Adopts existing backing storage after validating the format
    /// invariants: counts start at zero and never decrease, the last
    /// count equals `value_count`, and every partition's indices are
    /// strictly increasing and inside the non-compressed range.
    pub fn from_parts(
        values: Vec<T>,
        counts: Vec<usize>,
        indices: Vec<usize>,
        value_count: usize,
        dims: &[usize],
        reversed: bool,
    ) -> Result<Self, SparseError> {
        let layout = Layout::contiguous(dims, reversed)?;
        let compressed_dim = compressed_dim_for(layout.rank(), reversed);
        let compressed_stride = layout.strides()[compressed_dim];

        if counts.len() != dims[compressed_dim] + 1 {
            return Err(CompressedError::CountsLength {
                expected: dims[compressed_dim] + 1,
                got: counts.len(),
            }
            .into());
        }
        if counts[0] != 0 {
            return Err(CompressedError::CountsStart { got: counts[0] }.into());
        }
        for (position, pair) in counts.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(CompressedError::CountsNotMonotonic { position: position + 1 }.into());
            }
        }
        let last = counts[counts.len() - 1];
        if last != value_count {
            return Err(CompressedError::CountsTotalMismatch { last, value_count }.into());
        }
        if values.len() != indices.len() {
            return Err(CompressedError::StorageLengthMismatch {
                values: values.len(),
                indices: indices.len(),
            }
            .into());
        }
        if value_count > values.len() {
            return Err(CompressedError::ValueCountExceedsCapacity {
                value_count,
                capacity: values.len(),
            }
            .into());
        }
        for pair in counts.windows(2) {
            for slot in pair[0]..pair[1] {
                if indices[slot] >= compressed_stride {
                    return Err(CompressedError::IndexOutOfPartition {
                        slot,
                        index: indices[slot],
                        limit: compressed_stride,
                    }
                    .into());
                }
                if slot > pair[0] && indices[slot] <= indices[slot - 1] {
                    return Err(CompressedError::UnsortedIndices { slot }.into());
                }
            }
        }

        let mut non_compressed_strides = Dims::from_slice(layout.strides());
        non_compressed_strides[compressed_dim] = 0;

        Ok(Self {
            layout,
            compressed_dim,
            non_compressed_strides,
            counts,
            values,
            indices,
            value_count,
        })
    }

    /// Builds a compressed tensor from row-major source data, storing
    /// only the non-default elements.
    pub fn from_flat(data: Vec<T>, dims: &[usize], reversed: bool) -> Result<Self, ShapeError> {
        let mut tensor = Self::with_capacity(dims, DEFAULT_CAPACITY, reversed)?;
        if data.len() != tensor.layout.len() {
            return Err(ShapeError::LengthMismatch {
                expected: tensor.layout.len(),
                got: data.len(),
            });
        }

        let source_strides = strides_for(dims, false);
        for (index, value) in data.into_iter().enumerate() {
            if value == T::default() {
                continue;
            }
            let position = if reversed {
                transform_index(index, &source_strides, false, tensor.layout.strides())
            } else {
                index
            };
            tensor.set_linear(position, value);
        }
        Ok(tensor)
    }

    /// Extracts the non-default elements of a dense tensor.
    pub fn from_dense(dense: &DenseTensor<T>) -> Self {
        let mut tensor =
            Self::with_capacity(dense.dims(), DEFAULT_CAPACITY, dense.layout().is_reversed())
                .expect("dimensions of an existing tensor are valid");
        for position in 0..dense.len() {
            let value = dense.get_linear(position);
            if value != T::default() {
                tensor.set_linear(position, value);
            }
        }
        tensor
    }

    /// The axis whose slices are compressed: the first axis for forward
    /// layout, the last for reversed.
    pub fn compressed_dim(&self) -> usize {
        self.compressed_dim
    }

    /// Number of stored (non-default) entries.
    pub fn nonzero_count(&self) -> usize {
        self.value_count
    }

    /// Stored entries the backing arrays can hold before regrowing.
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Partition boundaries, one entry per compressed slice plus a
    /// leading zero.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Stored values, in partition order. Only the first
    /// [`CompressedTensor::nonzero_count`] slots are meaningful.
    pub fn values(&self) -> &[T] {
        &self.values[..self.value_count]
    }

    /// Stored non-compressed indices, parallel to
    /// [`CompressedTensor::values`].
    pub fn indices(&self) -> &[usize] {
        &self.indices[..self.value_count]
    }

    fn compressed_stride(&self) -> usize {
        self.layout.strides()[self.compressed_dim]
    }

    /// Locates the value slot for a coordinate split into compressed and
    /// non-compressed parts: `Ok` with the slot when stored, `Err` with
    /// the insertion point when not.
    fn find_slot(&self, compressed: usize, non_compressed: usize) -> Result<usize, usize> {
        let lower = self.counts[compressed];
        let upper = self.counts[compressed + 1];
        self.indices[lower..upper]
            .binary_search(&non_compressed)
            .map(|found| lower + found)
            .map_err(|insert| lower + insert)
    }

    /// Grows the backing arrays to hold at least `min` entries, doubling
    /// but never past the dense element count. `gap_at` leaves one
    /// unwritten slot at that position while copying, for an insert that
    /// triggered the growth.
    fn ensure_capacity(&mut self, min: usize, gap_at: Option<usize>) {
        if self.values.len() >= min {
            return;
        }

        let mut new_capacity = if self.values.is_empty() {
            DEFAULT_CAPACITY
        } else {
            self.values.len() * 2
        };
        if new_capacity > self.layout.len() {
            new_capacity = self.layout.len();
        }
        if new_capacity < min {
            new_capacity = min;
        }

        let mut new_values = vec![T::default(); new_capacity];
        let mut new_indices = vec![0; new_capacity];

        if self.value_count > 0 {
            match gap_at {
                None => {
                    new_values[..self.value_count].copy_from_slice(&self.values[..self.value_count]);
                    new_indices[..self.value_count]
                        .copy_from_slice(&self.indices[..self.value_count]);
                }
                Some(gap) => {
                    debug_assert!(gap <= self.value_count);
                    new_values[..gap].copy_from_slice(&self.values[..gap]);
                    new_indices[..gap].copy_from_slice(&self.indices[..gap]);
                    if gap < self.value_count {
                        new_values[gap + 1..self.value_count + 1]
                            .copy_from_slice(&self.values[gap..self.value_count]);
                        new_indices[gap + 1..self.value_count + 1]
                            .copy_from_slice(&self.indices[gap..self.value_count]);
                    }
                }
            }
        }

        self.values = new_values;
        self.indices = new_indices;
    }

    fn insert_at(&mut self, slot: usize, value: T, compressed: usize, non_compressed: usize) {
        debug_assert!(slot <= self.value_count);

        if self.values.len() < self.value_count + 1 {
            // regrow, leaving the slot open
            self.ensure_capacity(self.value_count + 1, Some(slot));
        } else if self.value_count != slot {
            // shift the tail right to open the slot
            self.values.copy_within(slot..self.value_count, slot + 1);
            self.indices.copy_within(slot..self.value_count, slot + 1);
        }

        self.values[slot] = value;
        self.indices[slot] = non_compressed;

        for count in &mut self.counts[compressed + 1..] {
            *count += 1;
        }
        self.value_count += 1;
    }

    fn remove_at(&mut self, slot: usize, compressed: usize) {
        debug_assert!(slot < self.value_count);

        self.values.copy_within(slot + 1..self.value_count, slot);
        self.indices.copy_within(slot + 1..self.value_count, slot);

        for count in &mut self.counts[compressed + 1..] {
            *count -= 1;
        }
        self.value_count -= 1;
    }

    /// The write contract: stored + default removes, stored + value
    /// overwrites, absent + default is a no-op, absent + value inserts.
    fn set_at(&mut self, value: T, compressed: usize, non_compressed: usize) {
        let is_default = value == T::default();
        match self.find_slot(compressed, non_compressed) {
            Ok(slot) => {
                if is_default {
                    self.remove_at(slot, compressed);
                } else {
                    self.values[slot] = value;
                }
            }
            Err(slot) => {
                if !is_default {
                    self.insert_at(slot, value, compressed, non_compressed);
                }
            }
        }
    }

    /// Reinterprets the stored entries under new dimensions with the
    /// same stride direction, rebuilding the partition structure.
    ///
    /// Unlike the dense view reshape this copies: the counts and indices
    /// bake in the compressed axis, so they cannot be shared.
    ///
    /// # Errors
    ///
    /// [`ShapeError::LengthMismatch`] when the element counts differ.
    pub fn reshape(&self, dims: &[usize]) -> Result<Self, SparseError> {
        let layout = Layout::contiguous(dims, self.layout.is_reversed())?;
        if layout.len() != self.layout.len() {
            return Err(ShapeError::LengthMismatch {
                expected: self.layout.len(),
                got: layout.len(),
            }
            .into());
        }

        let compressed_dim = compressed_dim_for(layout.rank(), layout.is_reversed());
        let new_stride = layout.strides()[compressed_dim];
        let old_stride = self.compressed_stride();

        let mut counts = vec![0; dims[compressed_dim] + 1];
        let mut indices = vec![0; self.indices.len()];
        let values = self.values.clone();

        // stored positions ascend globally, so entries keep their slot
        // order under the new partitioning; count then prefix-sum
        let mut compressed = 0;
        for slot in 0..self.value_count {
            while slot >= self.counts[compressed + 1] {
                compressed += 1;
            }
            let position = self.indices[slot] + compressed * old_stride;
            indices[slot] = position % new_stride;
            counts[position / new_stride + 1] += 1;
        }
        for boundary in 1..counts.len() {
            counts[boundary] += counts[boundary - 1];
        }

        let mut non_compressed_strides = Dims::from_slice(layout.strides());
        non_compressed_strides[compressed_dim] = 0;

        Ok(Self {
            layout,
            compressed_dim,
            non_compressed_strides,
            counts,
            values,
            indices,
            value_count: self.value_count,
        })
    }

    /// Copies into storage sized exactly for the stored entries,
    /// releasing any slack capacity.
    pub fn compact(&self) -> Self {
        Self {
            layout: self.layout.clone(),
            compressed_dim: self.compressed_dim,
            non_compressed_strides: self.non_compressed_strides.clone(),
            counts: self.counts.clone(),
            values: self.values[..self.value_count].to_vec(),
            indices: self.indices[..self.value_count].to_vec(),
            value_count: self.value_count,
        }
    }

    /// Materializes every element into dense storage with the same
    /// dimensions and stride direction.
    pub fn to_dense(&self) -> DenseTensor<T> {
        let mut dense =
            DenseTensor::with_layout_flag(self.layout.dims(), self.layout.is_reversed())
                .expect("dimensions of an existing tensor are valid");
        self.walk_stored(|position, value| dense.set_linear(position, value));
        dense
    }

    /// Converts to map-backed sparse storage.
    pub fn to_sparse(&self) -> SparseTensor<T> {
        let mut sparse =
            SparseTensor::with_layout_flag(self.layout.dims(), self.layout.is_reversed())
                .expect("dimensions of an existing tensor are valid");
        self.walk_stored(|position, value| sparse.set_linear(position, value));
        sparse
    }

    fn walk_stored(&self, mut visit: impl FnMut(usize, T)) {
        let stride = self.compressed_stride();
        let mut compressed = 0;
        for slot in 0..self.value_count {
            while slot >= self.counts[compressed + 1] {
                compressed += 1;
            }
            visit(self.indices[slot] + compressed * stride, self.values[slot]);
        }
    }
}

impl<T: Element> Tensor<T> for CompressedTensor<T> {
    type Owned<U: Element> = CompressedTensor<U>;

    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn get(&self, coords: &[usize]) -> Result<T, IndexError> {
        let position = self.layout.linear_index(coords)?;
        Ok(self.get_linear(position))
    }

    fn get_linear(&self, index: usize) -> T {
        let stride = self.compressed_stride();
        match self.find_slot(index / stride, index % stride) {
            Ok(slot) => self.values[slot],
            Err(_) => T::default(),
        }
    }

    fn empty_like<U: Element>(&self, dims: &[usize]) -> CompressedTensor<U> {
        CompressedTensor::with_capacity(dims, DEFAULT_CAPACITY, self.layout.is_reversed())
            .expect("dimensions of an existing tensor are valid")
    }
}

impl<T: Element> TensorMut<T> for CompressedTensor<T> {
    fn set(&mut self, coords: &[usize], value: T) -> Result<(), IndexError> {
        let position = self.layout.linear_index(coords)?;
        self.set_linear(position, value);
        Ok(())
    }

    fn set_linear(&mut self, index: usize, value: T) {
        let stride = self.compressed_stride();
        self.set_at(value, index / stride, index % stride);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_roundtrip() {
        let mut tensor = CompressedTensor::<i32>::zeros(&[3, 4]).unwrap();
        tensor.set(&[1, 2], 5).unwrap();
        tensor.set(&[0, 3], 7).unwrap();
        tensor.set(&[2, 0], 9).unwrap();

        assert_eq!(tensor.get(&[1, 2]).unwrap(), 5);
        assert_eq!(tensor.get(&[0, 3]).unwrap(), 7);
        assert_eq!(tensor.get(&[2, 0]).unwrap(), 9);
        assert_eq!(tensor.get(&[1, 1]).unwrap(), 0);
        assert_eq!(tensor.nonzero_count(), 3);
        assert_eq!(tensor.counts(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_zero_write_contract() {
        let mut tensor = CompressedTensor::<i32>::zeros(&[2, 3]).unwrap();

        // absent + default is a no-op
        tensor.set(&[0, 0], 0).unwrap();
        assert_eq!(tensor.nonzero_count(), 0);

        tensor.set(&[1, 1], 4).unwrap();
        // stored + value overwrites
        tensor.set(&[1, 1], 6).unwrap();
        assert_eq!(tensor.nonzero_count(), 1);
        assert_eq!(tensor.get(&[1, 1]).unwrap(), 6);

        // stored + default removes
        tensor.set(&[1, 1], 0).unwrap();
        assert_eq!(tensor.nonzero_count(), 0);
        assert_eq!(tensor.get(&[1, 1]).unwrap(), 0);
    }

    #[test]
    fn test_partitions_stay_sorted_under_random_writes() {
        let mut tensor = CompressedTensor::<i64>::with_capacity(&[5, 7], 2, false).unwrap();

        // deterministic pseudo-random write pattern with overwrites and removals
        let mut state = 11u64;
        for _ in 0..200 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let i = (state >> 33) as usize % 5;
            let j = (state >> 21) as usize % 7;
            let value = (state % 5) as i64 - 1;
            tensor.set(&[i, j], value).unwrap();
        }

        for pair in tensor.counts().windows(2) {
            assert!(pair[0] <= pair[1]);
            let partition = &tensor.indices()[pair[0]..pair[1]];
            assert!(partition.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_capacity_growth_caps_at_dense_length() {
        let mut tensor = CompressedTensor::<i32>::with_capacity(&[2, 3], 1, false).unwrap();
        for position in 0..6 {
            tensor.set_linear(position, position as i32 + 1);
        }
        assert_eq!(tensor.nonzero_count(), 6);
        assert!(tensor.capacity() <= 6);
        for position in 0..6 {
            assert_eq!(tensor.get_linear(position), position as i32 + 1);
        }
    }

    #[test]
    fn test_reversed_compresses_last_axis() {
        let mut tensor = CompressedTensor::<i32>::zeros_reversed(&[3, 4]).unwrap();
        assert_eq!(tensor.compressed_dim(), 1);

        tensor.set(&[2, 1], 8).unwrap();
        tensor.set(&[0, 1], 3).unwrap();
        tensor.set(&[1, 3], 5).unwrap();

        // partitions follow the last axis
        assert_eq!(tensor.counts(), &[0, 0, 2, 2, 3]);
        assert_eq!(tensor.get(&[2, 1]).unwrap(), 8);
        assert_eq!(tensor.get(&[0, 1]).unwrap(), 3);
        assert_eq!(tensor.get(&[1, 3]).unwrap(), 5);
    }

    #[test]
    fn test_from_parts_validation() {
        // valid CSR-style storage for a [2, 3]
        let ok = CompressedTensor::from_parts(
            vec![1, 2, 3],
            vec![0, 2, 3],
            vec![0, 2, 1],
            3,
            &[2, 3],
            false,
        );
        assert!(ok.is_ok());

        let bad_counts_len = CompressedTensor::from_parts(
            vec![1],
            vec![0, 1],
            vec![0],
            1,
            &[2, 3],
            false,
        );
        assert!(matches!(
            bad_counts_len.unwrap_err(),
            SparseError::Compressed(CompressedError::CountsLength { .. })
        ));

        let unsorted = CompressedTensor::from_parts(
            vec![1, 2],
            vec![0, 2, 2],
            vec![2, 0],
            2,
            &[2, 3],
            false,
        );
        assert!(matches!(
            unsorted.unwrap_err(),
            SparseError::Compressed(CompressedError::UnsortedIndices { slot: 1 })
        ));

        let decreasing = CompressedTensor::from_parts(
            vec![1, 2],
            vec![0, 2, 1],
            vec![0, 1],
            2,
            &[2, 3],
            false,
        );
        assert!(matches!(
            decreasing.unwrap_err(),
            SparseError::Compressed(CompressedError::CountsNotMonotonic { .. })
        ));
    }

    #[test]
    fn test_reshape_rebuilds_partitions() {
        let mut tensor = CompressedTensor::<i32>::zeros(&[2, 6]).unwrap();
        tensor.set(&[0, 1], 1).unwrap();
        tensor.set(&[0, 4], 2).unwrap();
        tensor.set(&[1, 2], 3).unwrap();

        let reshaped = tensor.reshape(&[4, 3]).unwrap();
        assert_eq!(reshaped.nonzero_count(), 3);
        // same linear positions, new coordinates
        assert_eq!(reshaped.get(&[0, 1]).unwrap(), 1);
        assert_eq!(reshaped.get(&[1, 1]).unwrap(), 2);
        assert_eq!(reshaped.get(&[2, 2]).unwrap(), 3);
        assert_eq!(reshaped.counts(), &[0, 1, 2, 3, 3]);

        assert!(tensor.reshape(&[5, 2]).is_err());
    }

    #[test]
    fn test_reshape_with_empty_middle_partition() {
        let mut tensor = CompressedTensor::<i32>::zeros(&[4, 2]).unwrap();
        tensor.set(&[0, 0], 1).unwrap();
        tensor.set(&[3, 1], 2).unwrap();

        // rows 1 and 2 are empty; boundaries must still be monotonic
        let reshaped = tensor.reshape(&[8, 1]).unwrap();
        assert_eq!(reshaped.counts(), &[0, 1, 1, 1, 1, 1, 1, 1, 2]);
        assert_eq!(reshaped.get(&[0, 0]).unwrap(), 1);
        assert_eq!(reshaped.get(&[7, 0]).unwrap(), 2);
    }

    #[test]
    fn test_dense_sparse_conversions() {
        let dense = DenseTensor::from_flat(
            vec![0, 4, 0, 0, 0, 5, 6, 0, 0, 0, 0, 7],
            &[3, 4],
            false,
        )
        .unwrap();

        let compressed = CompressedTensor::from_dense(&dense);
        assert_eq!(compressed.nonzero_count(), 4);
        assert_eq!(compressed.to_dense(), dense);

        let sparse = compressed.to_sparse();
        assert_eq!(sparse.nonzero_count(), 4);
        assert_eq!(sparse.to_dense(), dense);

        let back = sparse.to_compressed();
        assert_eq!(back.to_dense(), dense);
        assert_eq!(back.capacity(), 4);
    }

    #[test]
    fn test_initial_capacity_clamped_to_dense_length() {
        // the default backing would outsize a small tensor
        let small = CompressedTensor::<i32>::zeros(&[4, 4]).unwrap();
        assert_eq!(small.capacity(), 16);

        let requested = CompressedTensor::<i32>::with_capacity(&[2, 3], 100, false).unwrap();
        assert_eq!(requested.capacity(), 6);

        let large = CompressedTensor::<i32>::zeros(&[100, 100]).unwrap();
        assert_eq!(large.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_compact_releases_slack() {
        let mut tensor = CompressedTensor::<i32>::zeros(&[4, 4]).unwrap();
        tensor.set(&[1, 1], 2).unwrap();
        tensor.set(&[3, 2], 4).unwrap();
        assert_eq!(tensor.capacity(), 16);

        let compact = tensor.compact();
        assert_eq!(compact.capacity(), 2);
        assert_eq!(compact.get(&[1, 1]).unwrap(), 2);
        assert_eq!(compact.get(&[3, 2]).unwrap(), 4);
    }

    #[test]
    fn test_from_flat_reversed_matches_forward() {
        let data = vec![0, 1, 0, 2, 0, 3, 0, 0, 4, 0, 0, 5];
        let forward = CompressedTensor::from_flat(data.clone(), &[3, 4], false).unwrap();
        let reversed = CompressedTensor::from_flat(data, &[3, 4], true).unwrap();
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(
                    forward.get(&[i, j]).unwrap(),
                    reversed.get(&[i, j]).unwrap()
                );
            }
        }
    }
}
