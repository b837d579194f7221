//! # tensr-sparse
//!
//! Sparse tensor storage for the tensr stack.
//!
//! This crate provides two storage strategies behind the same
//! [`Tensor`](tensr_core::Tensor)/[`TensorMut`](tensr_core::TensorMut)
//! traits as dense storage:
//!
//! - **[`SparseTensor`]**: map-backed, keyed by linear position. Cheap
//!   point writes, no locality guarantees.
//! - **[`CompressedTensor`]**: CSR/CSC generalized to any rank. Entries
//!   of one compressed slice are contiguous, reads are a binary search,
//!   writes are linear in the stored-entry count.
//!
//! Both elide default values: writing `T::default()` removes the entry.
//!
//! ## Quick Start
//!
//! ```
//! use tensr_core::{contract, Tensor, TensorMut};
//! use tensr_sparse::CompressedTensor;
//!
//! let mut matrix = CompressedTensor::<i64>::zeros(&[100, 100]).unwrap();
//! matrix.set(&[0, 1], 2).unwrap();
//! matrix.set(&[99, 0], 3).unwrap();
//!
//! // sparse operands run through the same contraction engine
//! let dense = tensr_core::DenseTensor::<i64>::identity(100).unwrap();
//! let product = contract::matrix_multiply(&matrix, &dense).unwrap();
//! assert_eq!(product.get(&[0, 1]).unwrap(), 2);
//! assert_eq!(product.get(&[99, 0]).unwrap(), 3);
//! ```

#![deny(warnings)]

pub mod compressed;
pub mod error;
pub mod sparse;

pub use compressed::CompressedTensor;
pub use error::{CompressedError, SparseError, SparseResult};
pub use sparse::SparseTensor;
