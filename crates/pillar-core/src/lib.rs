//! # Pillar Core
//!
//! The cash-flow instrument model for the Pillar curve bootstrapping library.
//!
//! An instrument is nothing more than a sequence of `(time, amount)` pairs with
//! strictly increasing times measured in years. The closed [`Instrument`] enum
//! covers the three shapes the bootstrap works with:
//!
//! - [`ZeroCouponBond`]: one payment at maturity
//! - [`FixedCouponBond`]: `coupon / f` every `1 / f` years plus unit redemption at maturity
//! - [`CashFlows`]: an explicit, caller-supplied schedule
//!
//! All of them expose the same [`CashFlowStream`] capability, which is what
//! valuation and bootstrapping consume.
//!
//! ## Example
//!
//! ```rust
//! use pillar_core::prelude::*;
//!
//! let bond = Instrument::fixed_coupon_bond(2.0, 0.05, Frequency::SemiAnnual).unwrap();
//!
//! assert_eq!(bond.size(), 4);
//! assert_eq!(bond.times(), &[0.5, 1.0, 1.5, 2.0]);
//!
//! let (maturity, redemption) = bond.last().unwrap();
//! assert_eq!(maturity, 2.0);
//! assert!((redemption - 1.025).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod error;
pub mod instruments;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::instruments::{FixedCouponBond, Instrument, ZeroCouponBond};
    pub use crate::types::{CashFlowStream, CashFlows, Frequency};
}

pub use error::{CoreError, CoreResult};
pub use instruments::{FixedCouponBond, Instrument, ZeroCouponBond};
pub use types::{CashFlowStream, CashFlows, Frequency};
