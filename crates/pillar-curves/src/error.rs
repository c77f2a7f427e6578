//! Error types for curve operations.
//!
//! Curve construction and evaluation report [`CurveError::InvalidArgument`];
//! the bootstrap adds two structural kinds, one for an instrument sequence
//! that cannot be solved pillar by pillar and one for a pillar whose
//! root-finder failed.

use pillar_core::CoreError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Malformed input or an evaluation point outside the curve's domain.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the invalid input.
        reason: String,
    },

    /// Pillar index beyond the curve's length.
    #[error("Pillar index {index} out of range for {len} pillars")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of pillars.
        len: usize,
    },

    /// The instrument sequence does not admit single-pass bootstrapping.
    #[error(
        "Bootstrap order violated by instrument {index}: time {time:.6} vs last pillar {last_pillar:.6} ({reason})"
    )]
    BootstrapOrder {
        /// Position of the offending instrument.
        index: usize,
        /// The offending cash-flow time.
        time: f64,
        /// Last pillar time of the curve built so far (0 when empty).
        last_pillar: f64,
        /// What was violated.
        reason: String,
    },

    /// The root-finder could not solve for a pillar's forward rate.
    #[error("No root for instrument {index} (maturity {maturity:.6}): {reason}")]
    BootstrapNoRoot {
        /// Position of the instrument.
        index: usize,
        /// The pillar time being solved.
        maturity: f64,
        /// Solver diagnostic.
        reason: String,
    },

    /// Error raised by the instrument model.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CurveError {
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

    /// Creates a bootstrap order error.
    #[must_use]
    pub fn bootstrap_order(
        index: usize,
        time: f64,
        last_pillar: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::BootstrapOrder {
            index,
            time,
            last_pillar,
            reason: reason.into(),
        }
    }

    /// Creates a no-root error.
    #[must_use]
    pub fn bootstrap_no_root(index: usize, maturity: f64, reason: impl Into<String>) -> Self {
        Self::BootstrapNoRoot {
            index,
            maturity,
            reason: reason.into(),
        }
    }
}
