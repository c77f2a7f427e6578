//! Fixed-coupon bond with a regular schedule.
//!
//! The schedule is generated backwards from maturity in steps of `1 / f`
//! years and stops at the smallest positive time, so a maturity that is not
//! a whole number of periods yields a short first period.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{CashFlowStream, Frequency};

/// Slack below which a remaining stub is treated as zero.
const SCHEDULE_TOLERANCE: f64 = 1e-10;

/// Largest schedule a bond may generate (a thousand years of monthly coupons).
pub const MAX_PERIODS: usize = 12_000;

/// A bullet bond paying `coupon / f` every period and unit redemption at
/// maturity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FixedCouponSpec", into = "FixedCouponSpec")]
pub struct FixedCouponBond {
    maturity: f64,
    coupon: f64,
    frequency: Frequency,
    times: Vec<f64>,
    amounts: Vec<f64>,
}

impl FixedCouponBond {
    /// Builds the bond and its cash-flow schedule.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] if `maturity` is not a positive
    /// finite number, `coupon` is not finite, or the schedule would exceed
    /// [`MAX_PERIODS`] payments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pillar_core::{CashFlowStream, FixedCouponBond, Frequency};
    ///
    /// let bond = FixedCouponBond::new(1.25, 0.04, Frequency::Annual).unwrap();
    /// assert_eq!(bond.times(), &[0.25, 1.25]);
    /// ```
    pub fn new(maturity: f64, coupon: f64, frequency: Frequency) -> CoreResult<Self> {
        if !maturity.is_finite() || maturity <= 0.0 {
            return Err(CoreError::invalid_argument(format!(
                "maturity must be positive, got {maturity}"
            )));
        }
        if !coupon.is_finite() {
            return Err(CoreError::invalid_argument("coupon rate must be finite"));
        }

        let f = f64::from(frequency.periods_per_year());
        let n = periods(maturity, frequency)?;
        let payment = coupon / f;

        let times: Vec<f64> = (0..n)
            .map(|i| maturity - (n - 1 - i) as f64 / f)
            .collect();
        let mut amounts = vec![payment; n];
        amounts[n - 1] += 1.0;

        Ok(Self {
            maturity,
            coupon,
            frequency,
            times,
            amounts,
        })
    }

    /// Final payment time in years.
    #[must_use]
    pub fn maturity_time(&self) -> f64 {
        self.maturity
    }

    /// Annual coupon rate.
    #[must_use]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Payment frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }
}

/// Number of coupon periods: how many `1 / f` steps fit before the remaining
/// time drops to zero or below.
fn periods(maturity: f64, frequency: Frequency) -> CoreResult<usize> {
    let f = f64::from(frequency.periods_per_year());
    let n = ((maturity - SCHEDULE_TOLERANCE) * f).ceil();
    if n < 1.0 {
        Ok(1)
    } else if n > MAX_PERIODS as f64 {
        Err(CoreError::invalid_argument(format!(
            "maturity {maturity} at {frequency} exceeds {MAX_PERIODS} coupon periods"
        )))
    } else {
        Ok(n as usize)
    }
}

impl CashFlowStream for FixedCouponBond {
    fn times(&self) -> &[f64] {
        &self.times
    }

    fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    fn description(&self) -> String {
        format!(
            "Bond {:.3}% {:.2}Y {}",
            self.coupon * 100.0,
            self.maturity,
            self.frequency
        )
    }
}

#[derive(Serialize, Deserialize)]
struct FixedCouponSpec {
    maturity: f64,
    coupon: f64,
    #[serde(default)]
    frequency: Frequency,
}

impl TryFrom<FixedCouponSpec> for FixedCouponBond {
    type Error = CoreError;

    fn try_from(spec: FixedCouponSpec) -> Result<Self, Self::Error> {
        FixedCouponBond::new(spec.maturity, spec.coupon, spec.frequency)
    }
}

impl From<FixedCouponBond> for FixedCouponSpec {
    fn from(bond: FixedCouponBond) -> Self {
        Self {
            maturity: bond.maturity,
            coupon: bond.coupon,
            frequency: bond.frequency,
        }
    }
}
