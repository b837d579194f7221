//! # tensr - Multi-Strategy Strided Tensors
//!
//! N-dimensional tensors over three interchangeable storage strategies
//! (dense, map-backed sparse, and compressed sparse) sharing one strided
//! layout model and one set of operation kernels.
//!
//! This is the **meta crate** that re-exports all tensr components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use tensr::prelude::*;
//!
//! let a = DenseTensor::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
//! let b = DenseTensor::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
//! let product = contract::matrix_multiply(&a, &b).unwrap();
//! assert_eq!(product.buffer(), &[19, 22, 43, 50]);
//! ```
//!
//! ## Components
//!
//! ### Core ([`core`])
//!
//! The strided [`Layout`](core::Layout) model, dense storage with
//! explicit views, elementwise and structural kernels, and the
//! generalized contraction engine.
//!
//! ```
//! use tensr::core::{DenseTensor, Tensor};
//!
//! let tensor = DenseTensor::<f64>::zeros(&[2, 3, 4]).unwrap();
//! assert_eq!(tensor.dims(), &[2, 3, 4]);
//! assert_eq!(tensor.rank(), 3);
//! ```
//!
//! ### Sparse Storage ([`sparse`])
//!
//! Map-backed and compressed-sparse tensors that plug into the same
//! kernels.
//!
//! ```
//! use tensr::prelude::*;
//!
//! let mut matrix = CompressedTensor::<f64>::zeros(&[1000, 1000]).unwrap();
//! matrix.set(&[3, 7], 2.5).unwrap();
//! assert_eq!(matrix.nonzero_count(), 1);
//!
//! // operands of different storage kinds mix freely
//! let dense = matrix.to_dense();
//! let sum = elementwise::add(&matrix, &dense).unwrap();
//! assert_eq!(sum.get(&[3, 7]).unwrap(), 5.0);
//! ```

#![deny(warnings)]

pub use tensr_core as core;
pub use tensr_sparse as sparse;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tensr::prelude::*;
    //!
    //! let tensor = DenseTensor::<f64>::zeros(&[10, 20]).unwrap();
    //! assert_eq!(tensor.rank(), 2);
    //! ```

    // Core types and traits
    pub use crate::core::{
        DenseTensor, DenseView, DenseViewMut, Dims, Element, Layout, Scalar, Tensor, TensorError,
        TensorMut,
    };

    // Operation modules
    pub use crate::core::{contract, elementwise, structural};

    // Sparse types
    pub use crate::sparse::{CompressedTensor, SparseError, SparseTensor};
}
