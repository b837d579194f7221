//! Indexing contract and fast accessors for dense tensors.

use crate::dense::DenseTensor;
use crate::error::IndexError;
use crate::layout::Layout;
use crate::scalar::Element;
use crate::tensor::{Tensor, TensorMut};

impl<T: Element> Tensor<T> for DenseTensor<T> {
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

impl<T: Element> TensorMut<T> for DenseTensor<T> {
    fn set(&mut self, coords: &[usize], value: T) -> Result<(), IndexError> {
        let index = self.layout.linear_index(coords)?;
        self.buffer[index] = value;
        Ok(())
    }

    fn set_linear(&mut self, index: usize, value: T) {
        self.buffer[index] = value;
    }

    fn fill(&mut self, value: T) {
        // contiguous buffer, no need for the coordinate walk
        self.buffer.fill(value);
    }
}

impl<T: Element> DenseTensor<T> {
    /// Reads a rank-1 tensor by single index.
    pub fn at1(&self, i: usize) -> Result<T, IndexError> {
        self.get(&[i])
    }

    /// Reads a rank-2 tensor by index pair.
    pub fn at2(&self, i: usize, j: usize) -> Result<T, IndexError> {
        self.get(&[i, j])
    }

    /// Writes a rank-1 tensor by single index.
    pub fn set1(&mut self, i: usize, value: T) -> Result<(), IndexError> {
        self.set(&[i], value)
    }

    /// Writes a rank-2 tensor by index pair.
    pub fn set2(&mut self, i: usize, j: usize, value: T) -> Result<(), IndexError> {
        self.set(&[i, j], value)
    }
}

impl<T: Element> std::ops::Index<&[usize]> for DenseTensor<T> {
    type Output = T;

    fn index(&self, coords: &[usize]) -> &T {
        let index = self
            .layout
            .linear_index(coords)
            .unwrap_or_else(|e| panic!("{e}"));
        &self.buffer[index]
    }
}

impl<T: Element> std::ops::IndexMut<&[usize]> for DenseTensor<T> {
    fn index_mut(&mut self, coords: &[usize]) -> &mut T {
        let index = self
            .layout
            .linear_index(coords)
            .unwrap_or_else(|e| panic!("{e}"));
        &mut self.buffer[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip() {
        let mut tensor = DenseTensor::<i64>::zeros(&[3, 4]).unwrap();
        tensor.set(&[2, 3], 42).unwrap();
        assert_eq!(tensor.get(&[2, 3]).unwrap(), 42);
        assert_eq!(tensor.get(&[0, 0]).unwrap(), 0);
    }

    #[test]
    fn test_out_of_range() {
        let tensor = DenseTensor::<i64>::zeros(&[3, 4]).unwrap();
        assert!(matches!(
            tensor.get(&[3, 0]),
            Err(IndexError::OutOfRange { axis: 0, .. })
        ));
        assert!(matches!(
            tensor.get(&[0, 1, 2]),
            Err(IndexError::RankMismatch { .. })
        ));
    }

    #[test]
    fn test_reversed_stride_indexing() {
        let mut tensor = DenseTensor::<i32>::zeros_reversed(&[2, 3]).unwrap();
        tensor.set(&[1, 2], 5).unwrap();
        // reversed strides are [1, 2]: buffer slot 1 + 2*2 = 5
        assert_eq!(tensor.buffer()[5], 5);
        assert_eq!(tensor.get(&[1, 2]).unwrap(), 5);
    }

    #[test]
    fn test_index_operator() {
        let mut tensor = DenseTensor::<f64>::zeros(&[2, 2]).unwrap();
        tensor[&[0, 1][..]] = 3.5;
        assert_eq!(tensor[&[0, 1][..]], 3.5);
    }

    #[test]
    fn test_fill() {
        let mut tensor = DenseTensor::<u8>::zeros(&[2, 3]).unwrap();
        tensor.fill(9);
        assert!(tensor.buffer().iter().all(|&x| x == 9));
    }

    #[test]
    fn test_pair_accessors() {
        let mut tensor = DenseTensor::<i32>::zeros(&[2, 2]).unwrap();
        tensor.set2(1, 0, 7).unwrap();
        assert_eq!(tensor.at2(1, 0).unwrap(), 7);

        let mut vector = DenseTensor::<i32>::zeros(&[4]).unwrap();
        vector.set1(3, 2).unwrap();
        assert_eq!(vector.at1(3).unwrap(), 2);
    }

    #[test]
    fn test_iter_logical_order() {
        let tensor = DenseTensor::from_flat(vec![1, 2, 3, 4], &[2, 2], false).unwrap();
        let values: Vec<i32> = tensor.iter_logical().map(|(_, v)| v).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }
}
