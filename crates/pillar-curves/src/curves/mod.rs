//! Curve implementations.

mod extended;
mod pwflat;

pub use extended::ExtendedCurve;
pub use pwflat::PwFlatCurve;
