//! Zero-coupon bond.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::CashFlowStream;

/// A single payment of `face` at `maturity`.
///
/// # Example
///
/// ```rust
/// use pillar_core::{CashFlowStream, ZeroCouponBond};
///
/// let zcb = ZeroCouponBond::new(1.0).unwrap();
/// assert_eq!(zcb.size(), 1);
/// assert_eq!(zcb.last(), Some((1.0, 1.0)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ZeroCouponSpec", into = "ZeroCouponSpec")]
pub struct ZeroCouponBond {
    times: [f64; 1],
    amounts: [f64; 1],
}

impl ZeroCouponBond {
    /// Creates a unit-face zero-coupon bond.
    pub fn new(maturity: f64) -> CoreResult<Self> {
        Self::with_face(maturity, 1.0)
    }

    /// Creates a zero-coupon bond paying `face` at `maturity`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] if `maturity` is not a positive
    /// finite number or `face` is not finite.
    pub fn with_face(maturity: f64, face: f64) -> CoreResult<Self> {
        if !maturity.is_finite() || maturity <= 0.0 {
            return Err(CoreError::invalid_argument(format!(
                "maturity must be positive, got {maturity}"
            )));
        }
        if !face.is_finite() {
            return Err(CoreError::invalid_argument("face amount must be finite"));
        }

        Ok(Self {
            times: [maturity],
            amounts: [face],
        })
    }

    /// Payment time in years.
    #[must_use]
    pub fn maturity_time(&self) -> f64 {
        self.times[0]
    }

    /// Amount paid at maturity.
    #[must_use]
    pub fn face(&self) -> f64 {
        self.amounts[0]
    }
}

impl CashFlowStream for ZeroCouponBond {
    fn times(&self) -> &[f64] {
        &self.times
    }

    fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    fn description(&self) -> String {
        format!("ZCB {:.2}Y", self.maturity_time())
    }
}

#[derive(Serialize, Deserialize)]
struct ZeroCouponSpec {
    maturity: f64,
    #[serde(default = "unit_face")]
    face: f64,
}

fn unit_face() -> f64 {
    1.0
}

impl TryFrom<ZeroCouponSpec> for ZeroCouponBond {
    type Error = CoreError;

    fn try_from(spec: ZeroCouponSpec) -> Result<Self, Self::Error> {
        ZeroCouponBond::with_face(spec.maturity, spec.face)
    }
}

impl From<ZeroCouponBond> for ZeroCouponSpec {
    fn from(bond: ZeroCouponBond) -> Self {
        Self {
            maturity: bond.maturity_time(),
            face: bond.face(),
        }
    }
}
