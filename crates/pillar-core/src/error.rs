//! Error types for the instrument model.

use thiserror::Error;

/// A specialized Result type for instrument operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or reading instruments.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Malformed construction input.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the invalid input.
        reason: String,
    },

    /// Indexed access beyond the number of cash flows.
    #[error("Index {index} out of range for {len} cash flows")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of cash flows.
        len: usize,
    },
}

impl CoreError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates an out of range error.
    #[must_use]
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}
