//! Coupon payment frequency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Payment frequency for coupon bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year)
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the length of one period in years.
    #[must_use]
    pub fn period_length(&self) -> f64 {
        1.0 / f64::from(self.periods_per_year())
    }
}

impl TryFrom<u32> for Frequency {
    type Error = CoreError;

    fn try_from(periods: u32) -> Result<Self, Self::Error> {
        match periods {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            4 => Ok(Frequency::Quarterly),
            12 => Ok(Frequency::Monthly),
            other => Err(CoreError::invalid_argument(format!(
                "unsupported frequency {other}: use 1, 2, 4 or 12 periods per year"
            ))),
        }
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "annual" | "a" => Ok(Frequency::Annual),
            "semi-annual" | "semiannual" | "s" => Ok(Frequency::SemiAnnual),
            "quarterly" | "q" => Ok(Frequency::Quarterly),
            "monthly" | "m" => Ok(Frequency::Monthly),
            other => other
                .parse::<u32>()
                .map_err(|_| CoreError::invalid_argument(format!("unknown frequency '{s}'")))
                .and_then(Frequency::try_from),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}
