//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Keeps a bracket `[lo, hi]` on which `f` changes sign and halves it until
/// either `|f(mid)|` or the half-width drops below the tolerance.
///
/// The bracket may be given in either order.
///
/// # Errors
///
/// - [`MathError::InvalidBracket`] when `f(a)` and `f(b)` share a sign
/// - [`MathError::NonFinite`] when an endpoint evaluates to NaN or infinity
/// - [`MathError::ConvergenceFailed`] when `max_iterations` is exhausted
///
/// # Example
///
/// ```rust
/// use pillar_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if !f_lo.is_finite() {
        return Err(MathError::non_finite(lo, f_lo));
    }
    if !f_hi.is_finite() {
        return Err(MathError::non_finite(hi, f_hi));
    }

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    if f_lo.signum() == f_hi.signum() {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    for iteration in 1..=config.max_iterations {
        let mid = lo + (hi - lo) / 2.0;
        let f_mid = f(mid);

        if f_mid.abs() < config.tolerance || (hi - lo) / 2.0 < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration,
                residual: f_mid,
            });
        }

        // Keep the half on which the sign still changes.
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    let mid = lo + (hi - lo) / 2.0;
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_forward_from_price() {
        // exp(-f * 2) = 0.9
        let g = |f: f64| (-2.0 * f).exp() - 0.9;

        let result = bisection(g, -1.0, 10.0, &SolverConfig::new(1e-12, 200)).unwrap();

        assert_relative_eq!(result.root, -(0.9_f64).ln() / 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 2.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 2.0, 3.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = |x: f64| x - 1.0;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_eq!(result.iterations, 0);
        assert_relative_eq!(result.root, 1.0);
    }

    #[test]
    fn test_iteration_budget() {
        let f = |x: f64| x - 0.123_456_789;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::new(1e-15, 5));

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 5, .. })
        ));
    }

    #[test]
    fn test_non_finite_endpoint() {
        let f = |x: f64| 1.0 / x;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::NonFinite { .. })));
    }
}
