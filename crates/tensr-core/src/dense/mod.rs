//! Dense tensor storage: one contiguous buffer indexed through strides.
//!
//! This module is organized into focused submodules:
//!
//! - [`types`]: the `DenseTensor<T>` type and its constructors
//! - [`indexing`]: the indexing contract and fast 1-D/2-D accessors
//! - [`shape_ops`]: reshape (view and copy) and slicing
//! - [`views`]: non-owning `DenseView`/`DenseViewMut` types

pub mod indexing;
pub mod shape_ops;
pub mod types;
pub mod views;

pub use types::DenseTensor;
pub use views::{DenseView, DenseViewMut};
