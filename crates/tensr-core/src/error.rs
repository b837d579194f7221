//! Error types for tensor layout, indexing, and arithmetic.
//!
//! Every public operation validates eagerly, before any allocation or
//! mutation, and surfaces a typed failure. There is no retry or recovery
//! logic anywhere in the stack, and errors are never downgraded silently.
//!
//! # Design
//!
//! - Per-concern enums (`ShapeError`, `IndexError`, `ContractError`,
//!   `ArithmeticError`, `CapacityError`)
//! - **`TensorError`**: top-level enum aggregating all of the above
//!
//! # Examples
//!
//! ```
//! use tensr_core::error::{ShapeError, TensorError};
//! use tensr_core::Layout;
//!
//! let err = Layout::new(&[2, 0, 3]).unwrap_err();
//! assert!(matches!(err, ShapeError::NonPositiveDimension { axis: 1 }));
//!
//! // Per-concern errors convert into the aggregate
//! let top: TensorError = err.into();
//! assert!(matches!(top, TensorError::Shape(_)));
//! ```

use thiserror::Error;

/// Errors in tensor shape construction and shape compatibility checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Dimensions must contain at least one axis")]
    ZeroRank,

    #[error("Dimension at axis {axis} must be positive and non-zero")]
    NonPositiveDimension { axis: usize },

    #[error("Explicit strides must be monotonic (all ascending or all descending)")]
    NonMonotonicStrides,

    #[error("Stride at axis {axis} must be positive and non-zero")]
    NonPositiveStride { axis: usize },

    #[error("Rank mismatch: expected {expected}, got {got}")]
    RankMismatch { expected: usize, got: usize },

    #[error("Dimension mismatch at axis {axis}: expected {expected}, got {got}")]
    DimensionMismatch {
        axis: usize,
        expected: usize,
        got: usize,
    },

    #[error("Backing length {got} does not match shape requiring {expected} elements")]
    LengthMismatch { expected: usize, got: usize },

    #[error("Row {row} has length {got} but the first row has length {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Operation requires rank of at least {required}, but tensor has rank {actual}")]
    RankTooSmall { required: usize, actual: usize },

    #[error("No diagonal exists at offset {offset}")]
    DiagonalOutOfRange { offset: isize },
}

/// Errors in per-coordinate access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Index {index} is out of range for axis {axis} of length {len}")]
    OutOfRange {
        axis: usize,
        index: usize,
        len: usize,
    },

    #[error("Coordinate list has {got} entries but tensor rank is {expected}")]
    RankMismatch { expected: usize, got: usize },

    #[error("Slice bounds ({lower}, {upper}) are invalid for axis {axis} of length {len}")]
    InvalidRange {
        axis: usize,
        lower: usize,
        upper: usize,
        len: usize,
    },
}

/// Errors in generalized tensor contraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Axis lists must have the same length, but were {left} and {right}")]
    AxisCountMismatch { left: usize, right: usize },

    #[error("{side} axis list entry {entry} selects axis {axis}, which exceeds rank {rank}")]
    AxisOutOfRange {
        side: &'static str,
        entry: usize,
        axis: usize,
        rank: usize,
    },

    #[error("{side} axis list entry {entry} repeats axis {axis}")]
    DuplicateAxis {
        side: &'static str,
        entry: usize,
        axis: usize,
    },

    #[error(
        "Tensors may only be contracted on axes of the same length, \
         but pair {pair} was {left} on the left and {right} on the right"
    )]
    AxisLengthMismatch {
        pair: usize,
        left: usize,
        right: usize,
    },

    #[error("Result should have {expected} dimensions but had {got}")]
    ResultRankMismatch { expected: usize, got: usize },

    #[error("Result dimension {axis} should be {expected} but was {got}")]
    ResultShapeMismatch {
        axis: usize,
        expected: usize,
        got: usize,
    },
}

/// An operation invoked for an element type that does not support it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("Operation {operation} is not supported for element type {type_name}")]
    Unsupported {
        operation: &'static str,
        type_name: &'static str,
    },
}

/// Errors in view-producing reshapes.
///
/// Copy-reshape truncates or pads and never errors; only the sharing
/// (view) form can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    #[error("Cannot reshape to {requested} elements as a view of {available} elements")]
    ViewSizeMismatch { available: usize, requested: usize },
}

/// Top-level error type aggregating every failure kind in the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Contraction error: {0}")]
    Contract(#[from] ContractError),

    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    #[error("Capacity error: {0}")]
    Capacity(#[from] CapacityError),
}
