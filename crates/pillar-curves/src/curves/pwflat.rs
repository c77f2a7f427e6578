//! Piecewise-flat instantaneous forward curve.

use serde::{Deserialize, Serialize};

use crate::curves::ExtendedCurve;
use crate::error::{CurveError, CurveResult};
use crate::traits::{check_forward_time, check_time, Curve};

/// A forward curve that is constant between pillars.
///
/// With pillar times `t[0] < t[1] < … < t[m-1]` (all positive) and an
/// implicit `t[-1] = 0`, the forward rate equals `f[i]` on `(t[i-1], t[i]]`
/// and stays at `f[m-1]` beyond the last pillar. The discount factor is
///
/// ```text
/// D(s) = exp(-Σ f[i] * (min(s, t[i]) - t[i-1]))
/// ```
///
/// summed over the segments that start before `s`.
///
/// Pillars are only ever appended in increasing time order, through
/// [`extend`](Self::extend) or the bootstrap.
///
/// # Example
///
/// ```rust
/// use pillar_curves::{Curve, PwFlatCurve};
///
/// let curve = PwFlatCurve::from_pillars(vec![1.0, 2.0], vec![0.03, 0.05]).unwrap();
///
/// assert_eq!(curve.forward(0.5).unwrap(), 0.03);
/// assert_eq!(curve.forward(1.0).unwrap(), 0.03);
/// assert_eq!(curve.forward(1.5).unwrap(), 0.05);
/// assert_eq!(curve.forward(9.0).unwrap(), 0.05);
///
/// let expected = (-(0.03 * 1.0 + 0.05 * 1.0_f64)).exp();
/// assert!((curve.discount(2.0).unwrap() - expected).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawCurve")]
pub struct PwFlatCurve {
    times: Vec<f64>,
    forwards: Vec<f64>,
}

impl PwFlatCurve {
    /// Creates a curve with no pillars.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a curve from parallel pillar time and forward rate arrays.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidArgument`] when the lengths differ, a
    /// value is not finite, the first time is not positive, or the times are
    /// not strictly increasing.
    pub fn from_pillars(times: Vec<f64>, forwards: Vec<f64>) -> CurveResult<Self> {
        if times.len() != forwards.len() {
            return Err(CurveError::invalid_argument(format!(
                "times and forwards must have same length: {} vs {}",
                times.len(),
                forwards.len()
            )));
        }

        let mut curve = Self {
            times: Vec::with_capacity(times.len()),
            forwards: Vec::with_capacity(forwards.len()),
        };
        for (t, f) in times.into_iter().zip(forwards) {
            curve.extend(t, f)?;
        }
        Ok(curve)
    }

    /// Appends a pillar.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidArgument`] unless `time` is strictly
    /// greater than the current last pillar (or positive on an empty curve)
    /// and `forward` is finite.
    pub fn extend(&mut self, time: f64, forward: f64) -> CurveResult<()> {
        check_new_pillar(self.last_time(), time, forward)?;
        self.times.push(time);
        self.forwards.push(forward);
        Ok(())
    }

    /// Evaluates this curve with one extra pillar, without copying it.
    ///
    /// # Errors
    ///
    /// Same conditions as [`extend`](Self::extend).
    pub fn with_trial_pillar(&self, time: f64, forward: f64) -> CurveResult<ExtendedCurve<'_>> {
        ExtendedCurve::new(self, time, forward)
    }

    /// Pillar times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Forward rates, parallel to [`times`](Self::times).
    #[must_use]
    pub fn forwards(&self) -> &[f64] {
        &self.forwards
    }

    /// Number of pillars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the curve has no pillars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last pillar.
    #[must_use]
    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// The `i`-th `(time, forward)` pillar.
    pub fn pillar(&self, i: usize) -> CurveResult<(f64, f64)> {
        match (self.times.get(i), self.forwards.get(i)) {
            (Some(&t), Some(&f)) => Ok((t, f)),
            _ => Err(CurveError::out_of_range(i, self.len())),
        }
    }

    /// Iterates over `(time, forward)` pillars.
    pub fn pillars(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.forwards.iter().copied())
    }
}

impl Curve for PwFlatCurve {
    fn forward(&self, t: f64) -> CurveResult<f64> {
        check_forward_time(t)?;
        let last = self.forwards.last().copied().ok_or_else(no_pillars)?;

        let i = self.times.partition_point(|&ti| ti < t);
        Ok(self.forwards.get(i).copied().unwrap_or(last))
    }

    fn integral(&self, t: f64) -> CurveResult<f64> {
        check_time(t)?;
        if t <= 0.0 {
            return Ok(0.0);
        }

        let mut acc = 0.0;
        let mut prev = 0.0;
        for (ti, fi) in self.pillars() {
            if t <= ti {
                return Ok(acc + fi * (t - prev));
            }
            acc += fi * (ti - prev);
            prev = ti;
        }

        let last = self.forwards.last().copied().ok_or_else(no_pillars)?;
        Ok(acc + last * (t - prev))
    }
}

fn no_pillars() -> CurveError {
    CurveError::invalid_argument("curve has no pillars")
}

/// Validates a pillar about to be appended after `last`.
pub(crate) fn check_new_pillar(last: Option<f64>, time: f64, forward: f64) -> CurveResult<()> {
    if !time.is_finite() || !forward.is_finite() {
        return Err(CurveError::invalid_argument(format!(
            "pillar ({time}, {forward}) must be finite"
        )));
    }
    match last {
        Some(last) if time <= last => Err(CurveError::invalid_argument(format!(
            "pillar time {time} must be greater than last pillar {last}"
        ))),
        None if time <= 0.0 => Err(CurveError::invalid_argument(format!(
            "first pillar time must be positive, got {time}"
        ))),
        _ => Ok(()),
    }
}

/// Wire form: the host's two parallel rows.
#[derive(Deserialize)]
struct RawCurve {
    times: Vec<f64>,
    forwards: Vec<f64>,
}

impl TryFrom<RawCurve> for PwFlatCurve {
    type Error = CurveError;

    fn try_from(raw: RawCurve) -> Result<Self, Self::Error> {
        PwFlatCurve::from_pillars(raw.times, raw.forwards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn sample_curve() -> PwFlatCurve {
        PwFlatCurve::from_pillars(vec![0.5, 1.0, 2.0, 5.0], vec![0.02, 0.025, 0.03, 0.04]).unwrap()
    }

    #[test]
    fn test_forward_lookup() {
        let curve = sample_curve();

        assert_eq!(curve.forward(0.1).unwrap(), 0.02);
        assert_eq!(curve.forward(0.5).unwrap(), 0.02);
        assert_eq!(curve.forward(0.75).unwrap(), 0.025);
        assert_eq!(curve.forward(2.0).unwrap(), 0.03);
        assert_eq!(curve.forward(4.0).unwrap(), 0.04);
        assert_eq!(curve.forward(30.0).unwrap(), 0.04);
    }

    #[test]
    fn test_forward_domain() {
        let curve = sample_curve();

        assert!(matches!(curve.forward(0.0), Err(CurveError::InvalidArgument { .. })));
        assert!(curve.forward(-1.0).is_err());
        assert!(curve.forward(f64::NAN).is_err());
    }

    #[test]
    fn test_discount() {
        let curve = sample_curve();

        assert_eq!(curve.discount(0.0).unwrap(), 1.0);
        assert!(curve.discount(-0.5).is_err());

        let expected: f64 = 0.02 * 0.5 + 0.025 * 0.5 + 0.03 * 0.5;
        assert_relative_eq!(curve.discount(1.5).unwrap(), (-expected).exp(), epsilon = 1e-15);

        let expected: f64 = 0.02 * 0.5 + 0.025 * 0.5 + 0.03 * 1.0 + 0.04 * 3.0 + 0.04 * 5.0;
        assert_relative_eq!(curve.discount(10.0).unwrap(), (-expected).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_discount_continuous_at_pillars() {
        let curve = sample_curve();

        for &t in curve.times() {
            let left = curve.discount(t - 1e-12).unwrap();
            let right = curve.discount(t + 1e-12).unwrap();
            assert_relative_eq!(left, right, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_spot() {
        let curve = sample_curve();

        assert_relative_eq!(curve.spot(0.25).unwrap(), 0.02, epsilon = 1e-15);
        assert_relative_eq!(curve.spot(1.0).unwrap(), 0.0225, epsilon = 1e-15);
        assert!(curve.spot(0.0).is_err());
    }

    #[test]
    fn test_extend() {
        let mut curve = PwFlatCurve::new();

        assert!(curve.extend(0.0, 0.01).is_err());
        curve.extend(1.0, 0.01).unwrap();
        assert!(curve.extend(1.0, 0.02).is_err());
        assert!(curve.extend(0.5, 0.02).is_err());
        curve.extend(2.0, -0.005).unwrap();

        assert_eq!(curve.len(), 2);
        assert_eq!(curve.times(), &[1.0, 2.0]);
        assert_eq!(curve.forwards(), &[0.01, -0.005]);
        assert_eq!(curve.last_time(), Some(2.0));
    }

    #[test]
    fn test_from_pillars_validation() {
        assert!(PwFlatCurve::from_pillars(vec![1.0], vec![]).is_err());
        assert!(PwFlatCurve::from_pillars(vec![2.0, 1.0], vec![0.01, 0.01]).is_err());
        assert!(PwFlatCurve::from_pillars(vec![-1.0], vec![0.01]).is_err());
        assert!(PwFlatCurve::from_pillars(vec![1.0], vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_pillar_access() {
        let curve = sample_curve();

        assert_eq!(curve.pillar(1).unwrap(), (1.0, 0.025));
        assert_eq!(curve.pillar(4), Err(CurveError::out_of_range(4, 4)));
    }

    #[test]
    fn test_empty_curve() {
        let curve = PwFlatCurve::new();

        assert!(curve.is_empty());
        assert_eq!(curve.discount(0.0).unwrap(), 1.0);
        assert!(curve.discount(1.0).is_err());
        assert!(curve.forward(1.0).is_err());
    }

    #[test]
    fn test_serde_shape() {
        let curve = PwFlatCurve::from_pillars(vec![1.0, 2.0], vec![0.05, 0.06]).unwrap();
        let json = serde_json::to_string(&curve).unwrap();
        assert_eq!(json, r#"{"times":[1.0,2.0],"forwards":[0.05,0.06]}"#);

        let parsed: PwFlatCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, curve);

        let bad = r#"{"times":[2.0,1.0],"forwards":[0.05,0.06]}"#;
        assert!(serde_json::from_str::<PwFlatCurve>(bad).is_err());
    }

    proptest! {
        #[test]
        fn prop_discount_monotone_for_non_negative_forwards(
            pillars in prop::collection::vec((0.01f64..3.0, 0.0f64..0.2), 1..8),
            s1 in 0.0f64..30.0,
            gap in 0.0f64..10.0,
        ) {
            let mut curve = PwFlatCurve::new();
            let mut t = 0.0;
            for (dt, f) in pillars {
                t += dt;
                curve.extend(t, f).unwrap();
            }

            let s2 = s1 + gap;
            prop_assert!(curve.discount(s1).unwrap() >= curve.discount(s2).unwrap());
        }
    }
}
