//! Non-owning dense views.
//!
//! A view pairs a borrowed buffer with an independent [`Layout`], making
//! aliasing explicit in the type system: reshape-as-view and slicing
//! produce views, never silently-aliasing owned tensors. The borrow
//! checker enforces that no two mutable aliases of one buffer coexist.

use crate::dense::DenseTensor;
use crate::error::IndexError;
use crate::layout::Layout;
use crate::scalar::Element;
use crate::tensor::{Tensor, TensorMut};

/// Read-only view over another tensor's buffer.
#[derive(Debug, Clone)]
pub struct DenseView<'a, T> {
    pub(crate) layout: Layout,
    pub(crate) buffer: &'a [T],
}

/// Mutable view over another tensor's buffer. Writes are visible through
/// the original tensor.
#[derive(Debug)]
pub struct DenseViewMut<'a, T> {
    pub(crate) layout: Layout,
    pub(crate) buffer: &'a mut [T],
}

impl<'a, T: Element> DenseView<'a, T> {
    /// Wraps a buffer in a view under the given layout.
    ///
    /// # Errors
    ///
    /// [`IndexError::OutOfRange`] when the layout addresses past the end
    /// of the buffer.
    pub fn new(buffer: &'a [T], layout: Layout) -> Result<Self, IndexError> {
        if layout.memory_len() > buffer.len() {
            return Err(IndexError::OutOfRange {
                axis: 0,
                index: layout.memory_len() - 1,
                len: buffer.len(),
            });
        }
        Ok(Self { layout, buffer })
    }

    /// Copies the viewed elements into an owning dense tensor with a
    /// compact layout.
    pub fn to_owned_tensor(&self) -> DenseTensor<T> {
        let mut result: DenseTensor<T> = self.clone_empty();
        for (coords, value) in self.iter_logical() {
            let _ = result.set(&coords, value);
        }
        result
    }
}

impl<'a, T: Element> DenseViewMut<'a, T> {
    pub fn new(buffer: &'a mut [T], layout: Layout) -> Result<Self, IndexError> {
        if layout.memory_len() > buffer.len() {
            return Err(IndexError::OutOfRange {
                axis: 0,
                index: layout.memory_len() - 1,
                len: buffer.len(),
            });
        }
        Ok(Self { layout, buffer })
    }

    /// Downgrades to a read-only view.
    pub fn as_view(&self) -> DenseView<'_, T> {
        DenseView {
            layout: self.layout.clone(),
            buffer: self.buffer,
        }
    }
}

impl<'a, T: Element> Tensor<T> for DenseView<'a, T> {
    type Owned<U: Element> = DenseTensor<U>;

    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn get(&self, coords: &[usize]) -> Result<T, IndexError> {
        let index = self.layout.linear_index(coords)?;
        Ok(self.buffer[index])
    }

    fn get_linear(&self, index: usize) -> T {
        self.buffer[index]
    }

    fn empty_like<U: Element>(&self, dims: &[usize]) -> DenseTensor<U> {
        DenseTensor::with_layout_flag(dims, self.layout.is_reversed())
            .expect("dimensions of an existing tensor are valid")
    }
}

impl<'a, T: Element> Tensor<T> for DenseViewMut<'a, T> {
    type Owned<U: Element> = DenseTensor<U>;

    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn get(&self, coords: &[usize]) -> Result<T, IndexError> {
        let index = self.layout.linear_index(coords)?;
        Ok(self.buffer[index])
    }

    fn get_linear(&self, index: usize) -> T {
        self.buffer[index]
    }

    fn empty_like<U: Element>(&self, dims: &[usize]) -> DenseTensor<U> {
        DenseTensor::with_layout_flag(dims, self.layout.is_reversed())
            .expect("dimensions of an existing tensor are valid")
    }
}

impl<'a, T: Element> TensorMut<T> for DenseViewMut<'a, T> {
    fn set(&mut self, coords: &[usize], value: T) -> Result<(), IndexError> {
        let index = self.layout.linear_index(coords)?;
        self.buffer[index] = value;
        Ok(())
    }

    fn set_linear(&mut self, index: usize, value: T) {
        self.buffer[index] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    #[test]
    fn test_view_rejects_short_buffer() {
        let buffer = [0i32; 4];
        let layout = Layout::new(&[2, 3]).unwrap();
        assert!(DenseView::new(&buffer, layout).is_err());
    }

    #[test]
    fn test_view_mut_writes_through() {
        let mut buffer = vec![0i32; 6];
        let layout = Layout::new(&[2, 3]).unwrap();
        let mut view = DenseViewMut::new(&mut buffer, layout).unwrap();
        view.set(&[1, 1], 5).unwrap();
        assert_eq!(buffer[4], 5);
    }

    #[test]
    fn test_offset_view() {
        let buffer: Vec<i32> = (0..20).collect();
        let layout = Layout::new(&[4, 5]).unwrap().slice(&[(1, 2), (1, 3)]).unwrap();
        let view = DenseView::new(&buffer, layout).unwrap();
        assert_eq!(view.dims(), &[2, 3]);
        // element (0, 0) of the view is (1, 1) of the original
        assert_eq!(view.get(&[0, 0]).unwrap(), 6);
        assert_eq!(view.get(&[1, 2]).unwrap(), 13);
    }

    #[test]
    fn test_to_owned_tensor_compacts() {
        let buffer: Vec<i32> = (0..20).collect();
        let layout = Layout::new(&[4, 5]).unwrap().slice(&[(1, 2), (1, 2)]).unwrap();
        let view = DenseView::new(&buffer, layout).unwrap();
        let owned = view.to_owned_tensor();
        assert_eq!(owned.buffer(), &[6, 7, 11, 12]);
    }
}
