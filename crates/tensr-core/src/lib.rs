//! # tensr-core
//!
//! Dense strided tensors, the shared layout model, and the operation
//! kernels for the tensr stack.
//!
//! This crate provides the foundational building blocks:
//!
//! - **Strided layout** ([`Layout`]) with forward and reversed stride
//!   directions, offsets for views, and the index arithmetic every
//!   storage strategy shares
//! - **Dense tensor representation** ([`DenseTensor`]) with explicit
//!   aliasing views ([`DenseView`], [`DenseViewMut`])
//! - **Storage-generic traits** ([`Tensor`], [`TensorMut`]) connecting
//!   dense, sparse, and compressed storage to one set of kernels
//! - **Elementwise operations** ([`elementwise`]) over any storage pair
//! - **Structural extraction** ([`structural`]): diagonals and triangles
//! - **Contraction engine** ([`contract`]): einsum-style axis contraction
//!
//! ## Memory Layout
//!
//! A forward layout varies the last axis fastest (row-major); a reversed
//! layout varies the first axis fastest. Every operation accepts operands
//! of either direction and pairs elements by coordinate, never by buffer
//! position.
//!
//! ## Safety
//!
//! All coordinate indexing is bounds-checked. No unsafe code.
//!
//! ## Quick Start
//!
//! ```
//! use tensr_core::{DenseTensor, Tensor, TensorMut, contract, elementwise};
//!
//! let mut a = DenseTensor::<i64>::zeros(&[2, 2]).unwrap();
//! a.set(&[0, 0], 1).unwrap();
//! a.set(&[0, 1], 2).unwrap();
//! a.set(&[1, 0], 3).unwrap();
//! a.set(&[1, 1], 4).unwrap();
//!
//! let b = DenseTensor::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
//!
//! let product = contract::matrix_multiply(&a, &b).unwrap();
//! assert_eq!(product.buffer(), &[19, 22, 43, 50]);
//!
//! let sum = elementwise::add(&a, &b).unwrap();
//! assert_eq!(sum.get(&[1, 1]).unwrap(), 12);
//! ```
//!
//! ## Views
//!
//! Reshape-as-view and slicing return views that share the backing
//! buffer, keeping aliasing visible in the type system:
//!
//! ```
//! use tensr_core::{DenseTensor, Tensor, TensorMut};
//!
//! let mut tensor = DenseTensor::from_flat(vec![1, 2, 3, 4, 5, 6], &[2, 3], false).unwrap();
//! {
//!     let mut flat = tensor.reshape_view_mut(&[6]).unwrap();
//!     flat.set(&[5], 60).unwrap();
//! }
//! assert_eq!(tensor.get(&[1, 2]).unwrap(), 60);
//!
//! // copy-reshape never aliases and pads or truncates as needed
//! let bigger = tensor.reshape_copy(&[2, 4]).unwrap();
//! assert_eq!(bigger.buffer(), &[1, 2, 3, 4, 5, 60, 0, 0]);
//! ```
//!
//! ## Error Handling
//!
//! Operations validate eagerly and return typed errors from the
//! [`error`] module:
//!
//! ```
//! use tensr_core::{DenseTensor, Tensor};
//!
//! assert!(DenseTensor::<f64>::zeros(&[2, 0]).is_err());
//!
//! let tensor = DenseTensor::<f64>::zeros(&[2, 3]).unwrap();
//! assert!(tensor.get(&[2, 0]).is_err());
//! ```
//!
//! ## Integration with Other Crates
//!
//! - **tensr-sparse:** hash-backed and compressed-sparse storage that
//!   plugs into the same [`Tensor`]/[`TensorMut`] kernels
//! - **tensr:** facade crate re-exporting the whole stack

#![deny(warnings)]

pub mod contract;
pub mod dense;
pub mod elementwise;
pub mod error;
pub mod layout;
pub mod scalar;
pub mod structural;
pub mod tensor;


pub use dense::{DenseTensor, DenseView, DenseViewMut};
pub use error::{
    ArithmeticError, CapacityError, ContractError, IndexError, ShapeError, TensorError,
};
pub use layout::{Dims, Layout};
pub use scalar::{Element, Scalar};
pub use tensor::{LogicalIter, Tensor, TensorMut};
