//! Repricing validation for bootstrapped curves.
//!
//! A bootstrapped curve must value every input instrument at its quoted
//! price. [`RepricingReport`] records, per instrument, the target and model
//! values and whether the difference is within tolerance.

use std::fmt;

use pillar_core::CashFlowStream;
use serde::Serialize;

use crate::curves::PwFlatCurve;
use crate::error::CurveResult;
use crate::traits::Curve;
use crate::valuation::present;

/// Default absolute repricing tolerance per unit of face.
pub const DEFAULT_REPRICING_TOLERANCE: f64 = 1e-8;

/// Result of repricing a single instrument against the curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepricingCheck {
    /// Instrument label, e.g. "ZCB 1.00Y".
    pub instrument: String,
    /// Final cash-flow time.
    pub maturity: f64,
    /// Quoted price.
    pub target: f64,
    /// Model present value.
    pub model: f64,
    /// `|model - target|`.
    pub error: f64,
    /// Tolerance the check was held to.
    pub tolerance: f64,
    /// Whether the error is within tolerance.
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a check from target and model values.
    #[must_use]
    pub fn new(instrument: String, maturity: f64, target: f64, model: f64, tolerance: f64) -> Self {
        let error = (model - target).abs();
        Self {
            instrument,
            maturity,
            target,
            model,
            error,
            tolerance,
            // NaN errors fail
            passed: error <= tolerance,
        }
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "✓" } else { "✗" };
        write!(
            f,
            "{} {} | target: {:.10} | model: {:.10} | error: {:.2e} (tol: {:.2e})",
            status, self.instrument, self.target, self.model, self.error, self.tolerance
        )
    }
}

/// Repricing results for every instrument of a bootstrap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
    max_error: f64,
    rms_error: f64,
}

impl RepricingReport {
    /// Creates a report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        let max_error = checks.iter().map(|c| c.error).fold(0.0_f64, f64::max);
        let rms_error = if checks.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = checks.iter().map(|c| c.error * c.error).sum();
            (sum_sq / checks.len() as f64).sqrt()
        };

        Self {
            checks,
            max_error,
            rms_error,
        }
    }

    /// Values each instrument on `curve` and compares it with its price.
    pub fn compute<I, C>(
        instruments: &[I],
        prices: &[f64],
        curve: &C,
        tolerance: f64,
    ) -> CurveResult<Self>
    where
        I: CashFlowStream,
        C: Curve + ?Sized,
    {
        let checks = instruments
            .iter()
            .zip(prices)
            .map(|(instrument, &target)| {
                let model = present(instrument, curve)?;
                Ok(RepricingCheck::new(
                    instrument.description(),
                    instrument.maturity().unwrap_or(f64::NAN),
                    target,
                    model,
                    tolerance,
                ))
            })
            .collect::<CurveResult<Vec<_>>>()?;

        Ok(Self::new(checks))
    }

    /// Returns whether all instruments passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Individual checks, in bootstrap order.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Largest absolute repricing error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Root mean square repricing error.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        self.rms_error
    }

    /// Checks that exceeded tolerance.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passed = self.checks.iter().filter(|c| c.passed).count();

        writeln!(f, "Repricing Report")?;
        writeln!(f, "================")?;
        writeln!(f, "Status: {}", if self.is_valid() { "PASSED" } else { "FAILED" })?;
        writeln!(f, "Instruments: {}/{} passed", passed, self.checks.len())?;
        writeln!(f, "Max Error: {:.2e}", self.max_error)?;
        writeln!(f, "RMS Error: {:.2e}", self.rms_error)?;
        for check in &self.checks {
            writeln!(f, "  {check}")?;
        }
        Ok(())
    }
}

/// A bootstrapped curve with its repricing report.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult {
    /// The bootstrapped curve.
    pub curve: PwFlatCurve,
    /// Repricing of every input instrument on `curve`.
    pub report: RepricingReport,
    /// Solver iterations summed over all pillars.
    pub iterations: u32,
}

impl BootstrapResult {
    /// Returns whether every instrument reprices within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// Largest absolute repricing error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.report.max_error()
    }

    /// Consumes the result, keeping the curve.
    #[must_use]
    pub fn into_curve(self) -> PwFlatCurve {
        self.curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pillar_core::Instrument;

    #[test]
    fn test_check_pass_fail() {
        let ok = RepricingCheck::new("ZCB 1.00Y".into(), 1.0, 0.95, 0.95 + 1e-10, 1e-8);
        assert!(ok.passed);

        let bad = RepricingCheck::new("ZCB 1.00Y".into(), 1.0, 0.95, 0.96, 1e-8);
        assert!(!bad.passed);

        let nan = RepricingCheck::new("CashFlows (empty)".into(), f64::NAN, 0.95, f64::NAN, 1e-8);
        assert!(!nan.passed);
    }

    #[test]
    fn test_report_statistics() {
        let report = RepricingReport::new(vec![
            RepricingCheck::new("a".into(), 1.0, 1.0, 1.0, 1e-8),
            RepricingCheck::new("b".into(), 2.0, 1.0, 1.3, 1e-8),
        ]);

        assert!(!report.is_valid());
        assert!((report.max_error() - 0.3).abs() < 1e-12);
        assert_eq!(report.failed_checks().len(), 1);
        assert!(report.to_string().contains("1/2 passed"));
    }

    #[test]
    fn test_compute() {
        let curve = PwFlatCurve::from_pillars(vec![2.0], vec![0.05]).unwrap();
        let instruments = vec![Instrument::zero_coupon_bond(1.0).unwrap()];
        let price = curve.discount(1.0).unwrap();

        let report = RepricingReport::compute(&instruments, &[price], &curve, 1e-12).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.checks()[0].instrument, "ZCB 1.00Y");
    }
}
