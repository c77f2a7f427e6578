//! Sequential bootstrap algorithm.
//!
//! Solves one forward rate per instrument, in maturity order. Instrument `k`
//! owns the segment between the previous pillar and its own maturity `u_k`;
//! every other cash flow it pays must already be covered by solved pillars,
//! so its present value depends on the new rate alone and the solve is
//! one-dimensional.

use log::{debug, trace};
use pillar_core::CashFlowStream;
use pillar_math::solvers::{BisectionSolver, BrentSolver, HybridSolver, Solver, SolverResult};
use pillar_math::MathResult;

use crate::bootstrap::config::{BootstrapConfig, RootMethod};
use crate::bootstrap::quote::{unzip_quotes, Quote};
use crate::curves::PwFlatCurve;
use crate::error::{CurveError, CurveResult};
use crate::repricing::{BootstrapResult, RepricingReport, DEFAULT_REPRICING_TOLERANCE};
use crate::valuation::{present, present_derivative};

/// Slack allowed when comparing a cash-flow time with the last pillar, so a
/// coupon date built as `maturity - k / f` still lands on its pillar.
const ORDER_TOLERANCE: f64 = 1e-10;

/// Sequential bootstrapper for piecewise-flat forward curves.
///
/// # Example
///
/// ```rust
/// use pillar_core::Instrument;
/// use pillar_curves::{present, SequentialBootstrapper};
///
/// let instruments = vec![Instrument::zero_coupon_bond(1.0).unwrap()];
/// let curve = SequentialBootstrapper::new()
///     .bootstrap(&instruments, &[0.95])
///     .unwrap();
///
/// assert_eq!(curve.times(), &[1.0]);
/// assert!((curve.forwards()[0] + 0.95_f64.ln()).abs() < 1e-10);
/// assert!((present(&instruments[0], &curve).unwrap() - 0.95).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialBootstrapper {
    config: BootstrapConfig,
}

impl SequentialBootstrapper {
    /// Creates a bootstrapper with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bootstrap configuration.
    #[must_use]
    pub fn with_config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the forward-rate search bracket.
    #[must_use]
    pub fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.config = self.config.with_bracket(lower, upper);
        self
    }

    /// Sets the root-finding method.
    #[must_use]
    pub fn with_method(mut self, method: RootMethod) -> Self {
        self.config = self.config.with_method(method);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Builds a curve with one pillar per instrument.
    ///
    /// `instruments` must be ordered by strictly increasing maturity, and
    /// each instrument's cash flows other than the last must fall at or
    /// before the previous instrument's maturity.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InvalidArgument`] for an invalid configuration, empty
    ///   input, mismatched lengths, non-finite prices, or an instrument
    ///   without cash flows
    /// - [`CurveError::BootstrapOrder`] when the ordering precondition fails
    /// - [`CurveError::BootstrapNoRoot`] when a pillar cannot be solved
    pub fn bootstrap<I: CashFlowStream>(
        &self,
        instruments: &[I],
        prices: &[f64],
    ) -> CurveResult<PwFlatCurve> {
        self.run(instruments, prices).map(|(curve, _)| curve)
    }

    /// Bootstraps and reprices every instrument on the result.
    ///
    /// Does not fail on repricing errors; check
    /// [`BootstrapResult::is_valid`].
    pub fn bootstrap_validated<I: CashFlowStream>(
        &self,
        instruments: &[I],
        prices: &[f64],
    ) -> CurveResult<BootstrapResult> {
        let (curve, iterations) = self.run(instruments, prices)?;
        let tolerance = DEFAULT_REPRICING_TOLERANCE.max(self.config.tolerance);
        let report = RepricingReport::compute(instruments, prices, &curve, tolerance)?;

        Ok(BootstrapResult {
            curve,
            report,
            iterations,
        })
    }

    /// [`bootstrap_validated`](Self::bootstrap_validated) over quotes.
    pub fn bootstrap_quotes(&self, quotes: &[Quote]) -> CurveResult<BootstrapResult> {
        let (instruments, prices) = unzip_quotes(quotes);
        self.bootstrap_validated(&instruments, &prices)
    }

    fn run<I: CashFlowStream>(
        &self,
        instruments: &[I],
        prices: &[f64],
    ) -> CurveResult<(PwFlatCurve, u32)> {
        self.config.validate()?;
        if instruments.is_empty() {
            return Err(CurveError::invalid_argument(
                "no instruments provided for bootstrap",
            ));
        }
        if instruments.len() != prices.len() {
            return Err(CurveError::invalid_argument(format!(
                "instruments and prices must have same length: {} vs {}",
                instruments.len(),
                prices.len()
            )));
        }
        if let Some(i) = prices.iter().position(|p| !p.is_finite()) {
            return Err(CurveError::invalid_argument(format!(
                "price for instrument {i} is not finite"
            )));
        }

        let mut curve = PwFlatCurve::new();
        let mut iterations = 0;

        for (index, (instrument, &price)) in instruments.iter().zip(prices).enumerate() {
            let maturity = check_order(index, instrument, &curve)?;
            let solved = self.solve_pillar(index, instrument, price, maturity, &curve)?;

            debug!(
                "pillar {index}: t={maturity:.6} f={:.10} ({} iterations, residual {:.2e})",
                solved.root, solved.iterations, solved.residual
            );
            curve.extend(maturity, solved.root)?;
            iterations += solved.iterations;
        }

        Ok((curve, iterations))
    }

    fn solve_pillar<I: CashFlowStream>(
        &self,
        index: usize,
        instrument: &I,
        price: f64,
        maturity: f64,
        curve: &PwFlatCurve,
    ) -> CurveResult<SolverResult> {
        // Inputs were validated above, so NaN only marks an unreachable failure
        let g = |f: f64| {
            curve
                .with_trial_pillar(maturity, f)
                .and_then(|trial| present(instrument, &trial))
                .map_or(f64::NAN, |pv| pv - price)
        };
        let dg = |f: f64| {
            curve
                .with_trial_pillar(maturity, f)
                .and_then(|trial| present_derivative(instrument, &trial))
                .unwrap_or(f64::NAN)
        };

        let bounds = (self.config.lower, self.config.upper);
        let guess = curve
            .forwards()
            .last()
            .copied()
            .unwrap_or(0.0)
            .clamp(bounds.0, bounds.1);

        solve(self.config.method, g, dg, guess, bounds, &self.config)
            .map_err(|e| CurveError::bootstrap_no_root(index, maturity, e.to_string()))
    }
}

fn solve<F, D>(
    method: RootMethod,
    f: F,
    df: D,
    guess: f64,
    bounds: (f64, f64),
    config: &BootstrapConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    match method {
        RootMethod::Brent => solve_with(&BrentSolver, f, df, guess, bounds, config),
        RootMethod::Bisection => solve_with(&BisectionSolver, f, df, guess, bounds, config),
        RootMethod::Hybrid => solve_with(&HybridSolver, f, df, guess, bounds, config),
    }
}

fn solve_with<S, F, D>(
    solver: &S,
    f: F,
    df: D,
    guess: f64,
    bounds: (f64, f64),
    config: &BootstrapConfig,
) -> MathResult<SolverResult>
where
    S: Solver,
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    trace!(
        "{} over [{}, {}] from {guess:.6}",
        solver.name(),
        bounds.0,
        bounds.1
    );
    solver.solve(f, Some(df), guess, bounds, &config.solver_config())
}

/// Checks the single-pass precondition for instrument `index` and returns
/// its maturity.
fn check_order<I: CashFlowStream>(
    index: usize,
    instrument: &I,
    curve: &PwFlatCurve,
) -> CurveResult<f64> {
    let times = instrument.times();
    let Some((&maturity, interior)) = times.split_last() else {
        return Err(CurveError::invalid_argument(format!(
            "instrument {index} has no cash flows"
        )));
    };
    if times[0] < 0.0 {
        return Err(CurveError::invalid_argument(format!(
            "instrument {index} pays at negative time {}",
            times[0]
        )));
    }

    let last_pillar = curve.last_time().unwrap_or(0.0);
    trace!(
        "instrument {index}: {} cash flows, maturity {maturity:.6}, last pillar {last_pillar:.6}",
        times.len()
    );

    // an empty curve's "last pillar" is 0, so this also requires maturity > 0
    if maturity <= last_pillar {
        return Err(CurveError::bootstrap_order(
            index,
            maturity,
            last_pillar,
            "maturity must be after the last pillar",
        ));
    }

    // The first pillar's segment starts at 0 and covers all earlier flows.
    if !curve.is_empty() {
        if let Some(&beyond) = interior
            .iter()
            .find(|&&t| t > last_pillar + ORDER_TOLERANCE)
        {
            return Err(CurveError::bootstrap_order(
                index,
                beyond,
                last_pillar,
                "cash flow falls after the last pillar",
            ));
        }
    }

    Ok(maturity)
}

/// Bootstraps with the default configuration.
///
/// See [`SequentialBootstrapper::bootstrap`].
pub fn bootstrap<I: CashFlowStream>(instruments: &[I], prices: &[f64]) -> CurveResult<PwFlatCurve> {
    SequentialBootstrapper::new().bootstrap(instruments, prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Curve;
    use approx::assert_relative_eq;
    use pillar_core::{Frequency, Instrument, ZeroCouponBond};

    #[test]
    fn test_single_zero_coupon() {
        let instruments = vec![Instrument::zero_coupon_bond(1.0).unwrap()];
        let curve = bootstrap(&instruments, &[0.95]).unwrap();

        assert_eq!(curve.len(), 1);
        assert_eq!(curve.times(), &[1.0]);
        assert_relative_eq!(curve.forwards()[0], -(0.95_f64.ln()), epsilon = 1e-10);
        assert_relative_eq!(curve.forwards()[0], 0.0513, epsilon = 1e-4);
        assert_relative_eq!(present(&instruments[0], &curve).unwrap(), 0.95, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_then_coupon() {
        let instruments = vec![
            Instrument::zero_coupon_bond(1.0).unwrap(),
            Instrument::fixed_coupon_bond(2.0, 0.05, Frequency::Annual).unwrap(),
        ];
        let prices = [0.96, 1.01];
        let curve = bootstrap(&instruments, &prices).unwrap();

        assert_eq!(curve.times(), &[1.0, 2.0]);
        for (instrument, &price) in instruments.iter().zip(&prices) {
            assert_relative_eq!(present(instrument, &curve).unwrap(), price, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_coupon_bond_first() {
        let instruments = vec![Instrument::fixed_coupon_bond(1.0, 0.04, Frequency::Quarterly).unwrap()];
        let curve = bootstrap(&instruments, &[1.0]).unwrap();

        assert_relative_eq!(present(&instruments[0], &curve).unwrap(), 1.0, epsilon = 1e-10);
        // a par bond on a flat curve: continuous rate slightly below the coupon
        assert!(curve.forwards()[0] > 0.039 && curve.forwards()[0] < 0.04);
    }

    #[test]
    fn test_negative_rate() {
        let instruments = vec![Instrument::zero_coupon_bond(2.0).unwrap()];
        let curve = bootstrap(&instruments, &[1.02]).unwrap();

        assert!(curve.forwards()[0] < 0.0);
        assert_relative_eq!(curve.discount(2.0).unwrap(), 1.02, epsilon = 1e-10);
    }

    #[test]
    fn test_all_methods_agree() {
        let instruments = vec![
            Instrument::zero_coupon_bond(0.5).unwrap(),
            Instrument::fixed_coupon_bond(1.0, 0.03, Frequency::SemiAnnual).unwrap(),
            Instrument::fixed_coupon_bond(2.0, 0.035, Frequency::SemiAnnual).unwrap(),
        ];
        let prices = [0.985, 0.995, 0.99];

        let reference = bootstrap(&instruments, &prices).unwrap();
        for method in [RootMethod::Bisection, RootMethod::Hybrid] {
            let curve = SequentialBootstrapper::new()
                .with_method(method)
                .bootstrap(&instruments, &prices)
                .unwrap();
            for (a, b) in curve.forwards().iter().zip(reference.forwards()) {
                assert_relative_eq!(*a, *b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_out_of_order_maturity() {
        let instruments = vec![
            Instrument::zero_coupon_bond(2.0).unwrap(),
            Instrument::zero_coupon_bond(1.0).unwrap(),
        ];
        let err = bootstrap(&instruments, &[0.9, 0.95]).unwrap_err();

        assert!(matches!(err, CurveError::BootstrapOrder { index: 1, .. }));
    }

    #[test]
    fn test_duplicate_maturity() {
        let instruments = vec![
            Instrument::zero_coupon_bond(1.0).unwrap(),
            Instrument::zero_coupon_bond(1.0).unwrap(),
        ];
        let err = bootstrap(&instruments, &[0.95, 0.95]).unwrap_err();

        assert!(matches!(err, CurveError::BootstrapOrder { index: 1, .. }));
    }

    #[test]
    fn test_interior_flow_beyond_last_pillar() {
        let instruments = vec![
            Instrument::zero_coupon_bond(0.5).unwrap(),
            Instrument::fixed_coupon_bond(2.0, 0.05, Frequency::SemiAnnual).unwrap(),
        ];
        let err = bootstrap(&instruments, &[0.98, 1.0]).unwrap_err();

        match err {
            CurveError::BootstrapOrder {
                index,
                time,
                last_pillar,
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(time, 1.0);
                assert_eq!(last_pillar, 0.5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_coupon_date_on_pillar_up_to_rounding() {
        let bond = Instrument::fixed_coupon_bond(1.1, 0.05, Frequency::Annual).unwrap();
        // 1.1 - 1.0 is not exactly 0.1
        assert!(bond.times()[0] > 0.1);

        let known = PwFlatCurve::from_pillars(vec![0.1, 1.1], vec![0.02, 0.03]).unwrap();
        let instruments = vec![Instrument::zero_coupon_bond(0.1).unwrap(), bond];
        let prices: Vec<f64> = instruments
            .iter()
            .map(|instrument| present(instrument, &known).unwrap())
            .collect();

        let curve = bootstrap(&instruments, &prices).unwrap();

        assert_eq!(curve.times(), &[0.1, 1.1]);
        assert_relative_eq!(curve.forwards()[0], 0.02, epsilon = 1e-9);
        assert_relative_eq!(curve.forwards()[1], 0.03, epsilon = 1e-9);
    }

    #[test]
    fn test_large_face_stops_on_rate_width() {
        let zcb = ZeroCouponBond::with_face(1.0, 1e6).unwrap();
        let instruments = vec![Instrument::from(zcb)];
        let price = 0.95e6;

        let curve = bootstrap(&instruments, &[price]).unwrap();

        // the rate is pinned to the tolerance; the residual scales with face
        assert_relative_eq!(curve.forwards()[0], -(0.95_f64.ln()), epsilon = 1e-10);
        assert!((present(&instruments[0], &curve).unwrap() - price).abs() < 1e-3);
    }

    #[test]
    fn test_no_root_in_bracket() {
        let instruments = vec![Instrument::zero_coupon_bond(1.0).unwrap()];
        let err = SequentialBootstrapper::new()
            .with_bracket(0.0, 0.01)
            .bootstrap(&instruments, &[0.95])
            .unwrap_err();

        assert!(matches!(err, CurveError::BootstrapNoRoot { index: 0, .. }));
    }

    #[test]
    fn test_input_validation() {
        let instruments = vec![Instrument::zero_coupon_bond(1.0).unwrap()];
        let none: Vec<Instrument> = Vec::new();

        assert!(matches!(bootstrap(&none, &[]), Err(CurveError::InvalidArgument { .. })));
        assert!(matches!(bootstrap(&instruments, &[]), Err(CurveError::InvalidArgument { .. })));
        assert!(matches!(
            bootstrap(&instruments, &[f64::NAN]),
            Err(CurveError::InvalidArgument { .. })
        ));
        assert!(SequentialBootstrapper::new()
            .with_bracket(1.0, -1.0)
            .bootstrap(&instruments, &[0.95])
            .is_err());
    }

    #[test]
    fn test_validated_result() {
        let quotes = vec![
            Quote::new(Instrument::zero_coupon_bond(1.0).unwrap(), 0.97),
            Quote::new(Instrument::zero_coupon_bond(3.0).unwrap(), 0.9),
        ];
        let result = SequentialBootstrapper::new().bootstrap_quotes(&quotes).unwrap();

        assert!(result.is_valid());
        assert!(result.max_error() < 1e-10);
        assert!(result.iterations > 0);
        assert_eq!(result.report.checks().len(), 2);
        assert_eq!(result.curve.len(), 2);
    }
}
