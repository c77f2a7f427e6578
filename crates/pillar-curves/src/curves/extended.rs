//! A borrowed curve plus one trial pillar.

use crate::curves::pwflat::check_new_pillar;
use crate::curves::PwFlatCurve;
use crate::error::CurveResult;
use crate::traits::{check_forward_time, check_time, Curve};

/// Evaluates `base ∪ {(time, forward)}` without cloning `base`.
///
/// The bootstrap values each candidate forward rate against one of these, so
/// the curve under construction is only extended once the root is known.
#[derive(Debug, Clone, Copy)]
pub struct ExtendedCurve<'a> {
    base: &'a PwFlatCurve,
    start: f64,
    start_integral: f64,
    time: f64,
    forward: f64,
}

impl<'a> ExtendedCurve<'a> {
    /// Wraps `base` with a trial pillar at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidArgument`](crate::CurveError::InvalidArgument)
    /// under the same conditions as [`PwFlatCurve::extend`].
    pub fn new(base: &'a PwFlatCurve, time: f64, forward: f64) -> CurveResult<Self> {
        check_new_pillar(base.last_time(), time, forward)?;
        let start = base.last_time().unwrap_or(0.0);

        Ok(Self {
            base,
            start,
            start_integral: base.integral(start)?,
            time,
            forward,
        })
    }

    /// The curve being extended.
    #[must_use]
    pub fn base(&self) -> &'a PwFlatCurve {
        self.base
    }

    /// Start of the trial segment: the base's last pillar, or 0.
    #[must_use]
    pub fn segment_start(&self) -> f64 {
        self.start
    }

    /// Trial pillar time.
    #[must_use]
    pub fn pillar_time(&self) -> f64 {
        self.time
    }

    /// Trial forward rate.
    #[must_use]
    pub fn pillar_forward(&self) -> f64 {
        self.forward
    }
}

impl Curve for ExtendedCurve<'_> {
    fn forward(&self, t: f64) -> CurveResult<f64> {
        check_forward_time(t)?;
        if t > self.start {
            Ok(self.forward)
        } else {
            self.base.forward(t)
        }
    }

    fn integral(&self, t: f64) -> CurveResult<f64> {
        check_time(t)?;
        if t > self.start {
            // flat beyond the trial pillar too
            Ok(self.start_integral + self.forward * (t - self.start))
        } else {
            self.base.integral(t)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matches_extended_copy() {
        let base = PwFlatCurve::from_pillars(vec![1.0, 2.0], vec![0.03, 0.04]).unwrap();
        let trial = ExtendedCurve::new(&base, 5.0, 0.05).unwrap();

        let mut copy = base.clone();
        copy.extend(5.0, 0.05).unwrap();

        for &t in &[0.0, 0.5, 1.0, 1.7, 2.0, 3.3, 5.0, 8.0] {
            assert_relative_eq!(trial.discount(t).unwrap(), copy.discount(t).unwrap(), epsilon = 1e-14);
        }
        for &t in &[0.5, 1.0, 2.0, 2.1, 5.0, 8.0] {
            assert_eq!(trial.forward(t).unwrap(), copy.forward(t).unwrap());
        }
    }

    #[test]
    fn test_on_empty_base() {
        let base = PwFlatCurve::new();
        let trial = base.with_trial_pillar(1.0, -0.95_f64.ln()).unwrap();

        assert_eq!(trial.segment_start(), 0.0);
        assert_relative_eq!(trial.discount(1.0).unwrap(), 0.95, epsilon = 1e-15);
        assert_relative_eq!(trial.discount(2.0).unwrap(), 0.95 * 0.95, epsilon = 1e-15);
    }

    #[test]
    fn test_trial_pillar_must_follow_base() {
        let base = PwFlatCurve::from_pillars(vec![1.0], vec![0.03]).unwrap();

        assert!(ExtendedCurve::new(&base, 1.0, 0.03).is_err());
        assert!(ExtendedCurve::new(&base, 0.5, 0.03).is_err());
        assert!(ExtendedCurve::new(&base, 2.0, f64::INFINITY).is_err());
    }
}
