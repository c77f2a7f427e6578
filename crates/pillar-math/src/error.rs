//! Error types for numerical routines.

use thiserror::Error;

/// A specialized Result type for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Errors raised by the root-finders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The iteration budget ran out before the tolerance was met.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Absolute residual at the last iterate.
        residual: f64,
    },

    /// The function does not change sign over the bracket.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower end of the bracket.
        a: f64,
        /// Upper end of the bracket.
        b: f64,
        /// Function value at `a`.
        fa: f64,
        /// Function value at `b`.
        fb: f64,
    },

    /// A Newton step hit a vanishing derivative.
    #[error("Division by zero or near-zero value: {value:.2e}")]
    DivisionByZero {
        /// The near-zero derivative.
        value: f64,
    },

    /// The function returned NaN or infinity.
    #[error("Non-finite function value {value} at x = {x}")]
    NonFinite {
        /// Abscissa where the evaluation failed.
        x: f64,
        /// The offending value.
        value: f64,
    },

    /// Invalid solver input.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a non-finite evaluation error.
    #[must_use]
    pub fn non_finite(x: f64, value: f64) -> Self {
        Self::NonFinite { x, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::convergence_failed(100, 1e-6);
        assert!(err.to_string().contains("100 iterations"));

        let err = MathError::InvalidBracket {
            a: -1.0,
            b: 10.0,
            fa: 0.5,
            fb: 0.25,
        };
        assert!(err.to_string().contains("same sign"));
    }
}
