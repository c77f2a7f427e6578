//! Bootstrap configuration.

use std::fmt;
use std::str::FromStr;

use pillar_math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Root-finding method used for each pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RootMethod {
    /// Brent's method on the configured bracket.
    #[default]
    Brent,
    /// Plain bisection on the configured bracket.
    Bisection,
    /// Newton steps on the analytic derivative, falling back to Brent.
    Hybrid,
}

impl fmt::Display for RootMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RootMethod::Brent => "brent",
            RootMethod::Bisection => "bisection",
            RootMethod::Hybrid => "hybrid",
        };
        write!(f, "{name}")
    }
}

impl FromStr for RootMethod {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brent" => Ok(RootMethod::Brent),
            "bisection" | "bisect" => Ok(RootMethod::Bisection),
            "hybrid" | "newton" => Ok(RootMethod::Hybrid),
            _ => Err(CurveError::invalid_argument(format!(
                "unknown root method '{s}': use brent, bisection or hybrid"
            ))),
        }
    }
}

/// Search bracket and termination settings for the per-pillar solve.
///
/// The bracket is in continuously compounded forward-rate units.
///
/// # Example
///
/// ```rust
/// use pillar_curves::bootstrap::{BootstrapConfig, RootMethod};
///
/// let config = BootstrapConfig::default()
///     .with_bracket(-0.5, 2.0)
///     .with_method(RootMethod::Hybrid);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Lower end of the forward-rate bracket.
    pub lower: f64,
    /// Upper end of the forward-rate bracket.
    pub upper: f64,
    /// Absolute tolerance on the pricing residual.
    ///
    /// A pillar is also accepted once the solver's bracket on the forward
    /// rate narrows below this width, so for large notionals `|PV - price|`
    /// can exceed it. [`RepricingReport`](crate::repricing::RepricingReport)
    /// measures the actual residual.
    pub tolerance: f64,
    /// Iteration budget per pillar.
    pub max_iterations: u32,
    /// Root-finding method.
    pub method: RootMethod,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            lower: -1.0,
            upper: 10.0,
            tolerance: 1e-12,
            max_iterations: 100,
            method: RootMethod::Brent,
        }
    }
}

impl BootstrapConfig {
    /// Sets the forward-rate bracket.
    #[must_use]
    pub fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Sets the residual tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the per-pillar iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the root-finding method.
    #[must_use]
    pub fn with_method(mut self, method: RootMethod) -> Self {
        self.method = method;
        self
    }

    /// Checks that the bracket and termination settings are usable.
    pub fn validate(&self) -> CurveResult<()> {
        if !(self.lower.is_finite() && self.upper.is_finite()) {
            return Err(CurveError::invalid_argument(format!(
                "bracket [{}, {}] must be finite",
                self.lower, self.upper
            )));
        }
        if self.lower >= self.upper {
            return Err(CurveError::invalid_argument(format!(
                "bracket lower {} must be below upper {}",
                self.lower, self.upper
            )));
        }
        self.solver_config()
            .validate()
            .map_err(|e| CurveError::invalid_argument(e.to_string()))
    }

    /// Termination settings in the solver's terms.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BootstrapConfig::default();

        assert_eq!(config.lower, -1.0);
        assert_eq!(config.upper, 10.0);
        assert_eq!(config.tolerance, 1e-12);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.method, RootMethod::Brent);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let base = BootstrapConfig::default();

        assert!(base.with_bracket(1.0, 1.0).validate().is_err());
        assert!(base.with_bracket(2.0, 1.0).validate().is_err());
        assert!(base.with_bracket(f64::NEG_INFINITY, 1.0).validate().is_err());
        assert!(base.with_tolerance(0.0).validate().is_err());
        assert!(base.with_max_iterations(0).validate().is_err());
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("Hybrid".parse::<RootMethod>().unwrap(), RootMethod::Hybrid);
        assert_eq!("bisection".parse::<RootMethod>().unwrap(), RootMethod::Bisection);
        assert!("secant".parse::<RootMethod>().is_err());
        assert_eq!(RootMethod::Brent.to_string(), "brent");
    }

    #[test]
    fn test_partial_serde() {
        let config: BootstrapConfig =
            serde_json::from_str(r#"{"upper": 2.0, "method": "hybrid"}"#).unwrap();

        assert_eq!(config.lower, -1.0);
        assert_eq!(config.upper, 2.0);
        assert_eq!(config.method, RootMethod::Hybrid);
    }
}
