//! The [`Curve`] trait.
//!
//! A curve is defined by its instantaneous forward rate. Implementations
//! supply the forward lookup and the accumulated forward `∫₀ᵗ f(x) dx`; the
//! discount factor and the continuously compounded spot rate follow from
//! the integral.

use crate::error::{CurveError, CurveResult};

/// A single discounting curve in continuous time.
///
/// # Required Methods
///
/// - [`forward`](Curve::forward): instantaneous forward rate at `t > 0`
/// - [`integral`](Curve::integral): `∫₀ᵗ forward(x) dx` for `t ≥ 0`
///
/// # Derived Methods
///
/// - [`discount`](Curve::discount): `exp(-integral(t))`, exactly 1 at `t = 0`
/// - [`spot`](Curve::spot): `integral(t) / t` for `t > 0`
pub trait Curve: Send + Sync {
    /// Instantaneous forward rate at `t`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidArgument`] when `t ≤ 0`, `t` is not
    /// finite, or the curve has no pillars.
    fn forward(&self, t: f64) -> CurveResult<f64>;

    /// Accumulated forward rate from 0 to `t`, i.e. `-ln D(t)`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidArgument`] when `t < 0`, `t` is not
    /// finite, or `t > 0` on a curve with no pillars.
    fn integral(&self, t: f64) -> CurveResult<f64>;

    /// Discount factor `D(t)`.
    fn discount(&self, t: f64) -> CurveResult<f64> {
        check_time(t)?;
        if t <= 0.0 {
            return Ok(1.0);
        }
        Ok((-self.integral(t)?).exp())
    }

    /// Continuously compounded spot rate `-ln D(t) / t`.
    fn spot(&self, t: f64) -> CurveResult<f64> {
        check_time(t)?;
        if t <= 0.0 {
            return Err(CurveError::invalid_argument(format!(
                "spot rate requires t > 0, got {t}"
            )));
        }
        Ok(self.integral(t)? / t)
    }
}

impl<C: Curve + ?Sized> Curve for &C {
    fn forward(&self, t: f64) -> CurveResult<f64> {
        (**self).forward(t)
    }

    fn integral(&self, t: f64) -> CurveResult<f64> {
        (**self).integral(t)
    }

    fn discount(&self, t: f64) -> CurveResult<f64> {
        (**self).discount(t)
    }

    fn spot(&self, t: f64) -> CurveResult<f64> {
        (**self).spot(t)
    }
}

/// Rejects negative and non-finite evaluation times.
pub(crate) fn check_time(t: f64) -> CurveResult<()> {
    if !t.is_finite() {
        return Err(CurveError::invalid_argument(format!(
            "evaluation time must be finite, got {t}"
        )));
    }
    if t < 0.0 {
        return Err(CurveError::invalid_argument(format!(
            "evaluation time must be non-negative, got {t}"
        )));
    }
    Ok(())
}

/// Rejects evaluation times where the forward rate is undefined.
pub(crate) fn check_forward_time(t: f64) -> CurveResult<()> {
    check_time(t)?;
    if t <= 0.0 {
        return Err(CurveError::invalid_argument(format!(
            "forward rate requires t > 0, got {t}"
        )));
    }
    Ok(())
}
