//! Market quotes fed to the bootstrap.

use pillar_core::{CashFlowStream, Instrument};
use serde::{Deserialize, Serialize};

/// An instrument together with its target present value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// The quoted instrument.
    pub instrument: Instrument,
    /// Target present value.
    pub price: f64,
}

impl Quote {
    /// Creates a quote.
    #[must_use]
    pub fn new(instrument: Instrument, price: f64) -> Self {
        Self { instrument, price }
    }

    /// Final cash-flow time of the instrument.
    #[must_use]
    pub fn maturity(&self) -> Option<f64> {
        self.instrument.maturity()
    }
}

/// Splits quotes into parallel instrument and price sequences.
pub(crate) fn unzip_quotes(quotes: &[Quote]) -> (Vec<&Instrument>, Vec<f64>) {
    quotes.iter().map(|q| (&q.instrument, q.price)).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let json = r#"{"instrument": {"type": "zero_coupon_bond", "maturity": 0.5}, "price": 0.99}"#;
        let quote: Quote = serde_json::from_str(json).unwrap();

        assert_eq!(quote.maturity(), Some(0.5));
        assert_eq!(quote.price, 0.99);
    }
}
