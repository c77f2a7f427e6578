//! Cash-flow sequences.
//!
//! [`CashFlowStream`] is the single capability every instrument offers: a
//! pair of parallel slices, times in years (strictly increasing) and amounts.
//! [`CashFlows`] is the explicit, caller-supplied implementation of it.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Read access to a sequence of `(time, amount)` pairs.
///
/// Implementors guarantee `times().len() == amounts().len()` and that the
/// times are finite and strictly increasing.
pub trait CashFlowStream {
    /// Cash-flow times in years, strictly increasing.
    fn times(&self) -> &[f64];

    /// Cash-flow amounts, parallel to [`times`](Self::times).
    fn amounts(&self) -> &[f64];

    /// Number of cash flows.
    fn size(&self) -> usize {
        self.times().len()
    }

    /// Returns true if there are no cash flows.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Time of the `i`-th cash flow.
    fn time(&self, i: usize) -> CoreResult<f64> {
        self.times()
            .get(i)
            .copied()
            .ok_or_else(|| CoreError::out_of_range(i, self.size()))
    }

    /// Amount of the `i`-th cash flow.
    fn cash(&self, i: usize) -> CoreResult<f64> {
        self.amounts()
            .get(i)
            .copied()
            .ok_or_else(|| CoreError::out_of_range(i, self.size()))
    }

    /// Earliest `(time, amount)` pair.
    fn first(&self) -> Option<(f64, f64)> {
        Some((*self.times().first()?, *self.amounts().first()?))
    }

    /// Latest `(time, amount)` pair.
    fn last(&self) -> Option<(f64, f64)> {
        Some((*self.times().last()?, *self.amounts().last()?))
    }

    /// Time of the final cash flow.
    fn maturity(&self) -> Option<f64> {
        self.times().last().copied()
    }

    /// Short human-readable label.
    fn description(&self) -> String {
        match self.maturity() {
            Some(maturity) => format!("CashFlows x{} to {maturity:.2}Y", self.size()),
            None => "CashFlows (empty)".to_string(),
        }
    }
}

impl<T: CashFlowStream + ?Sized> CashFlowStream for &T {
    fn times(&self) -> &[f64] {
        (**self).times()
    }

    fn amounts(&self) -> &[f64] {
        (**self).amounts()
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

/// An explicit schedule of cash flows.
///
/// An empty schedule is accepted; it values to NaN rather than failing.
///
/// # Example
///
/// ```rust
/// use pillar_core::{CashFlowStream, CashFlows};
///
/// let flows = CashFlows::new(vec![0.5, 1.0], vec![0.02, 1.02]).unwrap();
/// assert_eq!(flows.size(), 2);
/// assert_eq!(flows.time(1).unwrap(), 1.0);
/// assert!(flows.cash(2).is_err());
///
/// assert!(CashFlows::new(vec![1.0, 0.5], vec![1.0, 1.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawCashFlows")]
pub struct CashFlows {
    times: Vec<f64>,
    amounts: Vec<f64>,
}

impl CashFlows {
    /// Creates a schedule from parallel time and amount vectors.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] if the lengths differ, a value
    /// is not finite, or the times are not strictly increasing.
    pub fn new(times: Vec<f64>, amounts: Vec<f64>) -> CoreResult<Self> {
        if times.len() != amounts.len() {
            return Err(CoreError::invalid_argument(format!(
                "times and amounts must have same length: {} vs {}",
                times.len(),
                amounts.len()
            )));
        }
        if let Some(i) = times.iter().position(|t| !t.is_finite()) {
            return Err(CoreError::invalid_argument(format!(
                "cash-flow time at index {i} is not finite"
            )));
        }
        if let Some(i) = amounts.iter().position(|c| !c.is_finite()) {
            return Err(CoreError::invalid_argument(format!(
                "cash-flow amount at index {i} is not finite"
            )));
        }
        if let Some(i) = (1..times.len()).find(|&i| times[i] <= times[i - 1]) {
            return Err(CoreError::invalid_argument(format!(
                "cash-flow times must be strictly increasing: {} at index {} follows {}",
                times[i],
                i,
                times[i - 1]
            )));
        }

        Ok(Self { times, amounts })
    }

    /// Creates a schedule from `(time, amount)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> CoreResult<Self> {
        let (times, amounts) = pairs.into_iter().unzip();
        Self::new(times, amounts)
    }

    /// Iterates over `(time, amount)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.amounts.iter().copied())
    }
}

impl CashFlowStream for CashFlows {
    fn times(&self) -> &[f64] {
        &self.times
    }

    fn amounts(&self) -> &[f64] {
        &self.amounts
    }
}

/// Unvalidated wire form of [`CashFlows`].
#[derive(Deserialize)]
struct RawCashFlows {
    times: Vec<f64>,
    amounts: Vec<f64>,
}

impl TryFrom<RawCashFlows> for CashFlows {
    type Error = CoreError;

    fn try_from(raw: RawCashFlows) -> Result<Self, Self::Error> {
        CashFlows::new(raw.times, raw.amounts)
    }
}
