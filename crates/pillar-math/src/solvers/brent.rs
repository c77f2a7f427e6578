//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Maintains a sign-changing bracket `[b, c]` where `b` is the best iterate.
/// Each step tries inverse quadratic interpolation (or a secant step when only
/// two distinct points are known) and falls back to bisection whenever the
/// interpolated step would leave the bracket or shrinks too slowly.
///
/// Converges when `|f(b)|` is below the tolerance or the bracket half-width is
/// below `tolerance / 2` plus a few ulps of `b`.
///
/// # Errors
///
/// - [`MathError::InvalidBracket`] when `f(a)` and `f(b)` share a sign
/// - [`MathError::NonFinite`] when an evaluation returns NaN or infinity
/// - [`MathError::ConvergenceFailed`] when `max_iterations` is exhausted
///
/// # Example
///
/// ```rust
/// use pillar_math::solvers::{brent, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-9);
/// ```
#[allow(clippy::float_cmp)]
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if !fa.is_finite() {
        return Err(MathError::non_finite(a, fa));
    }
    if !fb.is_finite() {
        return Err(MathError::non_finite(b, fb));
    }

    if fa.abs() < config.tolerance {
        return Ok(SolverResult {
            root: a,
            iterations: 0,
            residual: fa,
        });
    }
    if fb.abs() < config.tolerance {
        return Ok(SolverResult {
            root: b,
            iterations: 0,
            residual: fb,
        });
    }

    if fa.signum() == fb.signum() {
        return Err(MathError::InvalidBracket {
            a: a.min(b),
            b: a.max(b),
            fa: if a <= b { fa } else { fb },
            fb: if a <= b { fb } else { fa },
        });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 1..=config.max_iterations {
        if fb.signum() == fc.signum() {
            // Re-establish the bracket around b.
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tolerance;
        let half = 0.5 * (c - b);

        if half.abs() <= tol || fb.abs() < config.tolerance {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * half * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * half * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let interpolation_bound = 3.0 * half * q - (tol * q).abs();
            let previous_bound = (e * q).abs();
            if 2.0 * p < interpolation_bound.min(previous_bound) {
                e = d;
                d = p / q;
            } else {
                d = half;
                e = d;
            }
        } else {
            d = half;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(half) };
        fb = f(b);

        if !fb.is_finite() {
            return Err(MathError::non_finite(b, fb));
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, fb.abs()))
}
