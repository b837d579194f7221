//! Reshape and slicing for dense tensors.
//!
//! Reshape comes in two forms with different semantics:
//!
//! - **view**: shares the backing buffer, requires an equal element count,
//!   and makes aliasing explicit through [`DenseView`]/[`DenseViewMut`]
//! - **copy**: allocates a fresh buffer, truncating or zero-padding as
//!   needed, and never fails

use crate::dense::{DenseTensor, DenseView, DenseViewMut};
use crate::error::{CapacityError, IndexError, ShapeError};
use crate::layout::Layout;
use crate::scalar::Element;

impl<T: Element> DenseTensor<T> {
    fn view_layout(&self, dims: &[usize]) -> Result<Layout, CapacityError> {
        let layout = Layout::contiguous(dims, self.layout.is_reversed()).map_err(|_| {
            CapacityError::ViewSizeMismatch {
                available: self.layout.len(),
                requested: 0,
            }
        })?;
        if layout.len() != self.layout.len() {
            return Err(CapacityError::ViewSizeMismatch {
                available: self.layout.len(),
                requested: layout.len(),
            });
        }
        Ok(layout)
    }

    /// Reinterprets the buffer under new dimensions without copying.
    ///
    /// # Errors
    ///
    /// [`CapacityError::ViewSizeMismatch`] when `product(dims)` differs
    /// from this tensor's length.
    pub fn reshape_view(&self, dims: &[usize]) -> Result<DenseView<'_, T>, CapacityError> {
        let layout = self.view_layout(dims)?;
        Ok(DenseView {
            layout,
            buffer: &self.buffer,
        })
    }

    /// Mutable form of [`DenseTensor::reshape_view`]: writes through the
    /// view are visible in this tensor.
    pub fn reshape_view_mut(&mut self, dims: &[usize]) -> Result<DenseViewMut<'_, T>, CapacityError> {
        let layout = self.view_layout(dims)?;
        Ok(DenseViewMut {
            layout,
            buffer: &mut self.buffer,
        })
    }

    /// Copies into a fresh tensor under new dimensions.
    ///
    /// A smaller target truncates the buffer; a larger one pads with the
    /// default value. The result never aliases this tensor.
    pub fn reshape_copy(&self, dims: &[usize]) -> Result<Self, ShapeError> {
        let layout = Layout::contiguous(dims, self.layout.is_reversed())?;
        let mut buffer = vec![T::default(); layout.len()];
        let copied = layout.len().min(self.buffer.len());
        buffer[..copied].copy_from_slice(&self.buffer[..copied]);
        Ok(Self { layout, buffer })
    }

    /// Produces a read-only view restricted to an inclusive range per axis.
    pub fn slice(&self, ranges: &[(usize, usize)]) -> Result<DenseView<'_, T>, IndexError> {
        let layout = self.layout.slice(ranges)?;
        Ok(DenseView {
            layout,
            buffer: &self.buffer,
        })
    }

    /// Produces a mutable view restricted to an inclusive range per axis.
    pub fn slice_mut(
        &mut self,
        ranges: &[(usize, usize)],
    ) -> Result<DenseViewMut<'_, T>, IndexError> {
        let layout = self.layout.slice(ranges)?;
        Ok(DenseViewMut {
            layout,
            buffer: &mut self.buffer,
        })
    }
}
