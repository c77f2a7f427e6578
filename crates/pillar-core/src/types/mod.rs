//! Value types shared by every instrument.

mod cashflow;
mod frequency;

pub use cashflow::{CashFlowStream, CashFlows};
pub use frequency::Frequency;
