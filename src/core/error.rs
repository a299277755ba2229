//! Error type definitions for joinrs
//!
//! All fallible operations in the crate return [`Result`], including join
//! key resolution, which reports rejected column pairings through the
//! [`Error::IncompatibleTypes`] and [`Error::InvalidRepresentation`]
//! variants.

use thiserror::Error;

/// Error type for joinrs operations
#[derive(Error, Debug)]
pub enum Error {
    /// Error when an index is out of bounds
    #[error("Index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    /// Error when two inputs that must be paired have different lengths
    #[error("Length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Error when data violates an internal consistency rule
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// Error when no comparison strategy exists for a pair of key columns
    #[error("{0}")]
    IncompatibleTypes(String),

    /// Error when a calendar-tagged key column has a storage kind it cannot have
    #[error("{0}")]
    InvalidRepresentation(String),
}

/// Result type alias using the joinrs error type
pub type Result<T> = std::result::Result<T, Error>;
