//! Unified error types for sparse tensor storage.
//!
//! # Design
//!
//! - **`CompressedError`**: structural problems in compressed-sparse
//!   backing storage (counts, indices, capacity)
//! - **`SparseError`**: top-level enum aggregating compressed-format
//!   errors with the core shape and index errors
//!
//! # Examples
//!
//! ```
//! use tensr_sparse::error::{CompressedError, SparseError};
//!
//! let err: SparseError = CompressedError::CountsLength { expected: 4, got: 2 }.into();
//! assert!(matches!(err, SparseError::Compressed(_)));
//! ```

use thiserror::Error;

use tensr_core::error::{IndexError, ShapeError};

/// Structural errors in compressed-sparse backing storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompressedError {
    #[error("Counts array must have {expected} entries (compressed axis length + 1), got {got}")]
    CountsLength { expected: usize, got: usize },

    #[error("Counts must start at zero, got {got}")]
    CountsStart { got: usize },

    #[error("Counts must be non-decreasing, but entry {position} decreases")]
    CountsNotMonotonic { position: usize },

    #[error("Final count {last} does not match the stored value count {value_count}")]
    CountsTotalMismatch { last: usize, value_count: usize },

    #[error("Values and indices lengths differ: {values} values vs {indices} indices")]
    StorageLengthMismatch { values: usize, indices: usize },

    #[error("Value count {value_count} exceeds backing capacity {capacity}")]
    ValueCountExceedsCapacity {
        value_count: usize,
        capacity: usize,
    },

    #[error("Stored index {index} at slot {slot} exceeds the partition limit {limit}")]
    IndexOutOfPartition {
        slot: usize,
        index: usize,
        limit: usize,
    },

    #[error("Indices within a partition must be strictly increasing, violated at slot {slot}")]
    UnsortedIndices { slot: usize },
}

/// Top-level error type for sparse tensor operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparseError {
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Compressed storage error: {0}")]
    Compressed(#[from] CompressedError),
}

/// Result type alias for sparse tensor operations.
pub type SparseResult<T> = Result<T, SparseError>;
