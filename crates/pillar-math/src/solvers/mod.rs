//! Root-finding algorithms.
//!
//! - [`bisection`]: halves the bracket until it is narrower than the tolerance
//! - [`brent`]: bracketing with secant and inverse quadratic acceleration
//! - [`hybrid`]: Newton-Raphson first, Brent over the bracket when Newton misbehaves
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Hybrid | Fastest (quadratic) | Guaranteed with bracket | Derivative, bracket |
//!
//! # Example
//!
//! ```rust
//! use pillar_math::solvers::{brent, SolverConfig};
//!
//! // Forward rate f that discounts 1.0 at t = 2 to a price of 0.9
//! let g = |f: f64| (-2.0 * f).exp() - 0.9;
//!
//! let result = brent(g, -1.0, 10.0, &SolverConfig::default()).unwrap();
//! assert!((result.root - (-0.9_f64.ln() / 2.0)).abs() < 1e-10);
//! ```

mod bisection;
mod brent;
mod hybrid;

pub use bisection::bisection;
pub use brent::brent;
pub use hybrid::hybrid;

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute tolerance on the function value (and on the bracket width).
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that the configuration can drive a solver.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_input(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input("max_iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}

/// Common interface over the bracketing solvers.
///
/// The derivative is optional; solvers that cannot use it ignore it.
pub trait Solver: Send + Sync {
    /// Solves `f(x) = 0` inside `bounds`.
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: (f64, f64),
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Brent's method solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrentSolver;

impl Solver for BrentSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        _initial_guess: f64,
        bounds: (f64, f64),
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        brent(f, bounds.0, bounds.1, config)
    }

    fn name(&self) -> &'static str {
        "Brent"
    }
}

/// Bisection solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl Solver for BisectionSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        _initial_guess: f64,
        bounds: (f64, f64),
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        bisection(f, bounds.0, bounds.1, config)
    }

    fn name(&self) -> &'static str {
        "Bisection"
    }
}

/// Newton-Raphson with Brent fallback.
///
/// Without a derivative this degrades to plain Brent over the bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridSolver;

impl Solver for HybridSolver {
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: (f64, f64),
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match derivative {
            Some(df) => hybrid(f, df, initial_guess, bounds, config),
            None => brent(f, bounds.0, bounds.1, config),
        }
    }

    fn name(&self) -> &'static str {
        "Hybrid (Newton + Brent)"
    }
}
