//! Hybrid root-finding algorithm.
//!
//! Combines Newton-Raphson with Brent's method for robust convergence.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::solvers::{brent, SolverConfig, SolverResult};

/// Newton steps allowed before handing over to Brent.
const MAX_NEWTON_ITERATIONS: u32 = 20;

/// Consecutive residual increases tolerated before Newton is abandoned.
const MAX_DIVERGENT_STEPS: u32 = 3;

/// Hybrid root-finding algorithm.
///
/// Runs Newton-Raphson from `initial_guess` while the iterates stay inside
/// `bounds` and the residual keeps shrinking. If Newton leaves the bracket,
/// stalls on a flat derivative, diverges, or runs out of steps, the search
/// restarts with Brent's method over `bounds`.
///
/// # Example
///
/// ```rust
/// use pillar_math::solvers::{hybrid, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, (1.0, 2.0), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    match newton_within(&f, &df, initial_guess, bounds, config) {
        Ok(result) => Ok(result),
        Err(reason) => {
            debug!("Newton abandoned ({reason}); falling back to Brent on {bounds:?}");
            let newton_steps = config.max_iterations.min(MAX_NEWTON_ITERATIONS);
            brent(&f, bounds.0, bounds.1, config).map(|mut result| {
                result.iterations += newton_steps;
                result
            })
        }
    }
}

/// Newton-Raphson confined to a bracket, failing fast on any sign of trouble.
fn newton_within<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let lo = bounds.0.min(bounds.1);
    let hi = bounds.0.max(bounds.1);
    let mut x = initial_guess.clamp(lo, hi);
    let mut prev_residual = f64::INFINITY;
    let mut divergent_steps = 0;
    let max_steps = config.max_iterations.min(MAX_NEWTON_ITERATIONS);

    for iteration in 0..max_steps {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(MathError::non_finite(x, fx));
        }

        let residual = fx.abs();
        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if residual > prev_residual {
            divergent_steps += 1;
            if divergent_steps >= MAX_DIVERGENT_STEPS {
                return Err(MathError::invalid_input("Newton-Raphson diverging"));
            }
        } else {
            divergent_steps = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if dfx.abs() < 1e-15 {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;

        if !x.is_finite() || x < lo || x > hi {
            return Err(MathError::invalid_input("Newton step left the bracket"));
        }

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    Err(MathError::convergence_failed(max_steps, f(x).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = hybrid(f, df, 1.5, (1.0, 2.0), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_coupon_bond_forward() {
        // Annual 5% bond, two years, unknown flat forward, price 1.01.
        let g = |f: f64| 0.05 * (-f).exp() + 1.05 * (-2.0 * f).exp() - 1.01;
        let dg = |f: f64| -0.05 * (-f).exp() - 2.1 * (-2.0 * f).exp();

        let result = hybrid(g, dg, 0.0, (-1.0, 10.0), &SolverConfig::new(1e-13, 100)).unwrap();

        assert!(g(result.root).abs() < 1e-13);
        assert!(result.root > 0.0 && result.root < 0.05);
    }

    #[test]
    fn test_fallback_far_from_root() {
        // The derivative underflows far to the right of the root.
        let g = |f: f64| (-20.0 * f).exp() - 0.5;
        let dg = |f: f64| -20.0 * (-20.0 * f).exp();

        let result = hybrid(g, dg, 9.0, (-1.0, 10.0), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, (2.0_f64).ln() / 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fallback_on_flat_derivative() {
        let f = |x: f64| x.powi(3) - 0.001;
        let df = |x: f64| 3.0 * x * x;

        let result = hybrid(f, df, 0.0, (-1.0, 1.0), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_no_root_in_bracket() {
        let f = |x: f64| x * x + 1.0;
        let df = |x: f64| 2.0 * x;

        let result = hybrid(f, df, 0.5, (-1.0, 1.0), &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }
}
