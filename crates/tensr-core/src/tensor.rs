//! The indexing contract shared by every storage strategy.
//!
//! [`Tensor`] is the read side: layout access, bounds-checked coordinate
//! reads, and raw linear reads under the tensor's own strides. [`TensorMut`]
//! adds the write side. Dense, sparse, and compressed storage all conform,
//! so elementwise kernels, structural operations, and the contraction
//! engine accept any strategy.
//!
//! Result allocation goes through [`Tensor::empty_like`], which always
//! produces the *owning* storage of the same kind; a view's counterpart is
//! the owned dense tensor. The `Owned<U>` associated type carries the
//! storage kind across element types, so comparison kernels can produce a
//! `bool` tensor of the operand's kind.

use crate::error::IndexError;
use crate::layout::{Dims, Layout};
use crate::scalar::Element;

/// Read access to a tensor of any storage kind.
pub trait Tensor<T: Element> {
    /// The owning storage of the same kind, generic over element type.
    type Owned<U: Element>: TensorMut<U>;

    /// The layout mapping coordinates to storage positions.
    fn layout(&self) -> &Layout;

    /// Reads the element at an n-ary coordinate.
    fn get(&self, coords: &[usize]) -> Result<T, IndexError>;

    /// Reads the element at a linear position under this tensor's own
    /// strides. Positions come from [`Layout::linear_index`] or the
    /// contraction engine's stride arithmetic; out-of-range positions
    /// panic.
    fn get_linear(&self, index: usize) -> T;

    /// Creates an owning tensor of this storage kind with the given
    /// dimensions, same stride direction, and all-default values.
    fn empty_like<U: Element>(&self, dims: &[usize]) -> Self::Owned<U>;

    /// Creates an owning tensor of this kind with this tensor's dimensions
    /// and all-default values.
    fn clone_empty(&self) -> Self::Owned<T> {
        self.empty_like(self.layout().dims())
    }

    /// Axis lengths.
    fn dims(&self) -> &[usize] {
        self.layout().dims()
    }

    /// Number of axes.
    fn rank(&self) -> usize {
        self.layout().rank()
    }

    /// Total number of elements.
    fn len(&self) -> usize {
        self.layout().len()
    }

    /// A tensor always holds at least one element.
    fn is_empty(&self) -> bool {
        false
    }

    /// Enumerates `(coordinates, value)` pairs in this tensor's own stride
    /// order.
    fn iter_logical(&self) -> LogicalIter<'_, Self, T>
    where
        Self: Sized,
    {
        LogicalIter {
            tensor: self,
            position: 0,
            _marker: std::marker::PhantomData,
        }
    }
}

/// Write access to a tensor of any storage kind.
pub trait TensorMut<T: Element>: Tensor<T> {
    /// Writes the element at an n-ary coordinate.
    fn set(&mut self, coords: &[usize], value: T) -> Result<(), IndexError>;

    /// Writes the element at a linear position under this tensor's own
    /// strides. Out-of-range positions panic.
    fn set_linear(&mut self, index: usize, value: T);

    /// Sets every element to `value`.
    fn fill(&mut self, value: T)
    where
        Self: Sized,
    {
        // enumerate under contiguous strides; the layout's actual strides
        // may describe a sub-range view
        let layout = self.layout();
        let walk = crate::layout::strides_for(layout.dims(), layout.is_reversed());
        let reversed = layout.is_reversed();
        let (rank, len) = (layout.rank(), layout.len());
        let mut coords: Dims = Dims::from_elem(0, rank);
        for i in 0..len {
            crate::layout::decompose_index(&walk, reversed, i, &mut coords, 0);
            // coordinates derived from the dimensions are always in range
            let _ = self.set(&coords, value);
        }
    }
}

/// Iterator over `(coordinates, value)` pairs of a tensor.
pub struct LogicalIter<'a, S, T> {
    tensor: &'a S,
    position: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, S, T> Iterator for LogicalIter<'a, S, T>
where
    S: Tensor<T>,
    T: Element,
{
    type Item = (Dims, T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.tensor.len() {
            return None;
        }
        let layout = self.tensor.layout();
        let walk = crate::layout::strides_for(layout.dims(), layout.is_reversed());
        let mut coords: Dims = Dims::from_elem(0, layout.rank());
        crate::layout::decompose_index(&walk, layout.is_reversed(), self.position, &mut coords, 0);
        self.position += 1;
        let value = self
            .tensor
            .get(&coords)
            .expect("layout-derived coordinates are in range");
        Some((coords, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tensor.len() - self.position;
        (remaining, Some(remaining))
    }
}
