//! Instruments consumed by valuation and bootstrapping.
//!
//! Every instrument is an immutable value exposing [`CashFlowStream`]. The
//! closed [`Instrument`] enum is what collections of mixed instruments hold.

mod fixed_coupon;
mod zero_coupon;

pub use fixed_coupon::{FixedCouponBond, MAX_PERIODS};
pub use zero_coupon::ZeroCouponBond;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::{CashFlowStream, CashFlows, Frequency};

/// A vanilla fixed-cash-flow instrument.
///
/// Serialized with an internal `"type"` tag:
///
/// ```json
/// {"type": "fixed_coupon_bond", "maturity": 2.0, "coupon": 0.05, "frequency": "semi-annual"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instrument {
    /// Single payment at maturity.
    ZeroCouponBond(ZeroCouponBond),
    /// Regular coupons plus unit redemption.
    FixedCouponBond(FixedCouponBond),
    /// Explicit schedule.
    CashFlows(CashFlows),
}

impl Instrument {
    /// Unit-face zero-coupon bond maturing at `maturity`.
    pub fn zero_coupon_bond(maturity: f64) -> CoreResult<Self> {
        ZeroCouponBond::new(maturity).map(Self::ZeroCouponBond)
    }

    /// Fixed-coupon bond; see [`FixedCouponBond::new`].
    pub fn fixed_coupon_bond(maturity: f64, coupon: f64, frequency: Frequency) -> CoreResult<Self> {
        FixedCouponBond::new(maturity, coupon, frequency).map(Self::FixedCouponBond)
    }

    /// Explicit schedule; see [`CashFlows::new`].
    pub fn cash_flows(times: Vec<f64>, amounts: Vec<f64>) -> CoreResult<Self> {
        CashFlows::new(times, amounts).map(Self::CashFlows)
    }

    fn stream(&self) -> &dyn CashFlowStream {
        match self {
            Self::ZeroCouponBond(zcb) => zcb,
            Self::FixedCouponBond(bond) => bond,
            Self::CashFlows(flows) => flows,
        }
    }
}

impl CashFlowStream for Instrument {
    fn times(&self) -> &[f64] {
        self.stream().times()
    }

    fn amounts(&self) -> &[f64] {
        self.stream().amounts()
    }

    fn description(&self) -> String {
        self.stream().description()
    }
}

impl From<ZeroCouponBond> for Instrument {
    fn from(zcb: ZeroCouponBond) -> Self {
        Self::ZeroCouponBond(zcb)
    }
}

impl From<FixedCouponBond> for Instrument {
    fn from(bond: FixedCouponBond) -> Self {
        Self::FixedCouponBond(bond)
    }
}

impl From<CashFlows> for Instrument {
    fn from(flows: CashFlows) -> Self {
        Self::CashFlows(flows)
    }
}
