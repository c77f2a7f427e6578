//! Curve bootstrapping.
//!
//! Builds a [`PwFlatCurve`](crate::PwFlatCurve) with one pillar per quoted
//! instrument, solving each pillar's forward rate so the instrument reprices
//! to its quote.
//!
//! # Example
//!
//! ```rust
//! use pillar_core::{Frequency, Instrument};
//! use pillar_curves::bootstrap::{BootstrapConfig, Quote, RootMethod, SequentialBootstrapper};
//!
//! let quotes = vec![
//!     Quote::new(Instrument::zero_coupon_bond(0.5).unwrap(), 0.99),
//!     Quote::new(Instrument::fixed_coupon_bond(1.0, 0.04, Frequency::SemiAnnual).unwrap(), 1.005),
//! ];
//!
//! let result = SequentialBootstrapper::new()
//!     .with_config(BootstrapConfig::default().with_method(RootMethod::Hybrid))
//!     .bootstrap_quotes(&quotes)
//!     .unwrap();
//!
//! assert!(result.is_valid());
//! assert_eq!(result.curve.times(), &[0.5, 1.0]);
//! ```

mod config;
mod quote;
mod sequential;

pub use config::{BootstrapConfig, RootMethod};
pub use quote::Quote;
pub use sequential::{bootstrap, SequentialBootstrapper};
