//! # Pillar Curves
//!
//! Piecewise-flat forward curves and the sequential bootstrap that builds
//! them from quoted instruments.
//!
//! ## Overview
//!
//! - [`PwFlatCurve`]: instantaneous forward rate constant between pillars,
//!   flat beyond the last one
//! - [`Curve`]: forward, discount and spot evaluation
//! - [`present`]: present value of any [`CashFlowStream`](pillar_core::CashFlowStream)
//! - [`SequentialBootstrapper`]: one 1-D root solve per pillar
//!
//! ## Example
//!
//! ```rust
//! use pillar_core::{Frequency, Instrument};
//! use pillar_curves::prelude::*;
//!
//! let instruments = vec![
//!     Instrument::zero_coupon_bond(1.0).unwrap(),
//!     Instrument::fixed_coupon_bond(2.0, 0.05, Frequency::Annual).unwrap(),
//! ];
//! let prices = [0.96, 1.005];
//!
//! let curve = bootstrap(&instruments, &prices).unwrap();
//!
//! for (instrument, price) in instruments.iter().zip(prices) {
//!     let pv = present(instrument, &curve).unwrap();
//!     assert!((pv - price).abs() < 1e-10);
//! }
//! assert!(curve.discount(1.5).unwrap() < curve.discount(1.0).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod bootstrap;
pub mod curves;
pub mod error;
pub mod repricing;
pub mod traits;
pub mod valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{
        bootstrap, BootstrapConfig, Quote, RootMethod, SequentialBootstrapper,
    };
    pub use crate::curves::{ExtendedCurve, PwFlatCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::repricing::{BootstrapResult, RepricingCheck, RepricingReport};
    pub use crate::traits::Curve;
    pub use crate::valuation::{present, present_derivative};
}

pub use bootstrap::{bootstrap, SequentialBootstrapper};
pub use curves::{ExtendedCurve, PwFlatCurve};
pub use error::{CurveError, CurveResult};
pub use traits::Curve;
pub use valuation::{present, present_derivative};
