//! Map-backed sparse tensor storage.
//!
//! [`SparseTensor`] keys entries by their linear position under the
//! tensor's own strides and stores only non-default values. Writing the
//! default value removes the entry, so the entry count always equals the
//! number of non-default elements.
//!
//! # Examples
//!
//! ```
//! use tensr_core::{Tensor, TensorMut};
//! use tensr_sparse::SparseTensor;
//!
//! let mut tensor = SparseTensor::<f64>::zeros(&[1000, 1000]).unwrap();
//! tensor.set(&[3, 7], 2.5).unwrap();
//! assert_eq!(tensor.nonzero_count(), 1);
//! assert_eq!(tensor.get(&[3, 7]).unwrap(), 2.5);
//!
//! // writing the default value elides the entry
//! tensor.set(&[3, 7], 0.0).unwrap();
//! assert_eq!(tensor.nonzero_count(), 0);
//! ```

use std::collections::BTreeMap;

use tensr_core::error::{IndexError, ShapeError};
use tensr_core::layout::{strides_for, transform_index, Layout};
use tensr_core::scalar::Element;
use tensr_core::tensor::{Tensor, TensorMut};
use tensr_core::DenseTensor;

use crate::compressed::CompressedTensor;

/// Sparse tensor keyed by linear position.
///
/// The map is ordered by position, so iteration follows the tensor's own
/// stride order without a sort.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseTensor<T> {
    layout: Layout,
    entries: BTreeMap<usize, T>,
}

impl<T: Element> SparseTensor<T> {
    /// Creates an empty forward-layout sparse tensor.
    pub fn zeros(dims: &[usize]) -> Result<Self, ShapeError> {
        Self::with_layout_flag(dims, false)
    }

    /// Creates an empty reversed-layout sparse tensor.
    pub fn zeros_reversed(dims: &[usize]) -> Result<Self, ShapeError> {
        Self::with_layout_flag(dims, true)
    }

    /// Creates an empty sparse tensor in either stride direction.
    pub fn with_layout_flag(dims: &[usize], reversed: bool) -> Result<Self, ShapeError> {
        Ok(Self {
            layout: Layout::contiguous(dims, reversed)?,
            entries: BTreeMap::new(),
        })
    }

    /// Builds a sparse tensor from row-major source data, storing only
    /// the non-default elements.
    pub fn from_flat(data: Vec<T>, dims: &[usize], reversed: bool) -> Result<Self, ShapeError> {
        let layout = Layout::contiguous(dims, reversed)?;
        if data.len() != layout.len() {
            return Err(ShapeError::LengthMismatch {
                expected: layout.len(),
                got: data.len(),
            });
        }

        let source_strides = strides_for(dims, false);
        let mut entries = BTreeMap::new();
        for (index, value) in data.into_iter().enumerate() {
            if value == T::default() {
                continue;
            }
            let position = if reversed {
                transform_index(index, &source_strides, false, layout.strides())
            } else {
                index
            };
            entries.insert(position, value);
        }
        Ok(Self { layout, entries })
    }

    /// Extracts the non-default elements of a dense tensor.
    pub fn from_dense(dense: &DenseTensor<T>) -> Self {
        let layout = dense.layout().clone();
        let mut entries = BTreeMap::new();
        for position in 0..layout.len() {
            let value = dense.get_linear(position);
            if value != T::default() {
                entries.insert(position, value);
            }
        }
        Self { layout, entries }
    }

    /// Number of stored (non-default) entries.
    pub fn nonzero_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterates stored `(position, value)` pairs in position order.
    pub fn stored_entries(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.entries.iter().map(|(&position, &value)| (position, value))
    }

    /// Materializes every element into dense storage with the same
    /// dimensions and stride direction.
    pub fn to_dense(&self) -> DenseTensor<T> {
        let mut dense =
            DenseTensor::with_layout_flag(self.layout.dims(), self.layout.is_reversed())
                .expect("dimensions of an existing tensor are valid");
        for (&position, &value) in &self.entries {
            dense.set_linear(position, value);
        }
        dense
    }

    /// Converts to compressed-sparse storage sized exactly for the
    /// stored entries.
    pub fn to_compressed(&self) -> CompressedTensor<T> {
        let mut compressed = CompressedTensor::with_capacity(
            self.layout.dims(),
            self.nonzero_count(),
            self.layout.is_reversed(),
        )
        .expect("dimensions of an existing tensor are valid");
        // entries iterate in ascending position order, so every write
        // appends at the end of the last partition
        for (&position, &value) in &self.entries {
            compressed.set_linear(position, value);
        }
        compressed
    }
}

impl<T: Element> Tensor<T> for SparseTensor<T> {
    type Owned<U: Element> = SparseTensor<U>;

    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn get(&self, coords: &[usize]) -> Result<T, IndexError> {
        let position = self.layout.linear_index(coords)?;
        Ok(self.get_linear(position))
    }

    fn get_linear(&self, index: usize) -> T {
        self.entries.get(&index).copied().unwrap_or_default()
    }

    fn empty_like<U: Element>(&self, dims: &[usize]) -> SparseTensor<U> {
        SparseTensor::with_layout_flag(dims, self.layout.is_reversed())
            .expect("dimensions of an existing tensor are valid")
    }
}

impl<T: Element> TensorMut<T> for SparseTensor<T> {
    fn set(&mut self, coords: &[usize], value: T) -> Result<(), IndexError> {
        let position = self.layout.linear_index(coords)?;
        self.set_linear(position, value);
        Ok(())
    }

    fn set_linear(&mut self, index: usize, value: T) {
        if value == T::default() {
            self.entries.remove(&index);
        } else {
            self.entries.insert(index, value);
        }
    }
}
