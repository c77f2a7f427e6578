//! Present value of cash-flow instruments.

use pillar_core::CashFlowStream;

use crate::curves::ExtendedCurve;
use crate::error::CurveResult;
use crate::traits::Curve;

/// Present value `Σ cash[j] * D(time[j])`.
///
/// An instrument without cash flows has no meaningful value and yields
/// `NaN`, which callers see as data rather than an error.
///
/// # Errors
///
/// Propagates [`Curve::discount`] failures, e.g. for a negative cash-flow
/// time or a positive time on an empty curve.
///
/// # Example
///
/// ```rust
/// use pillar_core::Instrument;
/// use pillar_curves::{present, Curve, PwFlatCurve};
///
/// let curve = PwFlatCurve::from_pillars(vec![5.0], vec![0.04]).unwrap();
/// let zcb = Instrument::zero_coupon_bond(3.0).unwrap();
///
/// assert_eq!(present(&zcb, &curve).unwrap(), curve.discount(3.0).unwrap());
/// ```
pub fn present<I, C>(instrument: &I, curve: &C) -> CurveResult<f64>
where
    I: CashFlowStream + ?Sized,
    C: Curve + ?Sized,
{
    if instrument.is_empty() {
        return Ok(f64::NAN);
    }

    instrument
        .times()
        .iter()
        .zip(instrument.amounts())
        .try_fold(0.0, |pv, (&t, &c)| Ok(pv + c * curve.discount(t)?))
}

/// Sensitivity of [`present`] to the trial pillar's forward rate.
///
/// Only cash flows after the trial segment's start depend on that rate, each
/// through `D(t) = D(start) * exp(-f * (t - start))`, so
///
/// ```text
/// ∂PV/∂f = -Σ_{t_j > start} c_j * (t_j - start) * D(t_j)
/// ```
pub fn present_derivative<I>(instrument: &I, curve: &ExtendedCurve<'_>) -> CurveResult<f64>
where
    I: CashFlowStream + ?Sized,
{
    if instrument.is_empty() {
        return Ok(f64::NAN);
    }

    let start = curve.segment_start();
    instrument
        .times()
        .iter()
        .zip(instrument.amounts())
        .filter(|&(&t, _)| t > start)
        .try_fold(0.0, |acc, (&t, &c)| {
            Ok(acc - c * (t - start) * curve.discount(t)?)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::PwFlatCurve;
    use crate::error::CurveError;
    use approx::assert_relative_eq;
    use pillar_core::{CashFlows, Frequency, Instrument};
    use proptest::prelude::*;

    fn flat(rate: f64) -> PwFlatCurve {
        PwFlatCurve::from_pillars(vec![30.0], vec![rate]).unwrap()
    }

    #[test]
    fn test_zero_coupon_bond() {
        let curve = flat(0.05);
        let zcb = Instrument::zero_coupon_bond(2.0).unwrap();

        assert_relative_eq!(present(&zcb, &curve).unwrap(), (-0.1_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_coupon_bond() {
        let curve = flat(0.04);
        let bond = Instrument::fixed_coupon_bond(2.0, 0.05, Frequency::SemiAnnual).unwrap();

        let expected: f64 = [(0.5_f64, 0.025_f64), (1.0, 0.025), (1.5, 0.025), (2.0, 1.025)]
            .iter()
            .map(|&(t, c)| c * (-0.04 * t).exp())
            .sum();
        assert_relative_eq!(present(&bond, &curve).unwrap(), expected, epsilon = 1e-14);
    }

    #[test]
    fn test_empty_instrument_is_nan() {
        let curve = flat(0.05);
        let empty = CashFlows::default();

        assert!(present(&empty, &curve).unwrap().is_nan());
    }

    #[test]
    fn test_propagates_discount_failure() {
        let curve = flat(0.05);
        let flows = CashFlows::new(vec![-1.0, 1.0], vec![1.0, 1.0]).unwrap();

        assert!(matches!(present(&flows, &curve), Err(CurveError::InvalidArgument { .. })));
        assert!(present(&flows, &PwFlatCurve::new()).is_err());
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let base = PwFlatCurve::from_pillars(vec![1.0], vec![0.03]).unwrap();
        let bond = Instrument::fixed_coupon_bond(3.0, 0.06, Frequency::Annual).unwrap();
        let f = 0.045;
        let h = 1e-6;

        let at = |f: f64| present(&bond, &base.with_trial_pillar(3.0, f).unwrap()).unwrap();
        let numeric = (at(f + h) - at(f - h)) / (2.0 * h);
        let analytic = present_derivative(&bond, &base.with_trial_pillar(3.0, f).unwrap()).unwrap();

        assert_relative_eq!(analytic, numeric, epsilon = 1e-8);
    }

    proptest! {
        #[test]
        fn prop_zero_coupon_identity(
            pillars in prop::collection::vec((0.05f64..2.0, -0.02f64..0.15), 1..6),
            maturity in 0.01f64..15.0,
        ) {
            let mut curve = PwFlatCurve::new();
            let mut t = 0.0;
            for (dt, f) in pillars {
                t += dt;
                curve.extend(t, f).unwrap();
            }

            let zcb = Instrument::zero_coupon_bond(maturity).unwrap();
            prop_assert_eq!(present(&zcb, &curve).unwrap(), curve.discount(maturity).unwrap());
        }
    }
}
