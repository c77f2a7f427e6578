//! # Pillar Math
//!
//! Scalar root-finding for the Pillar curve bootstrapping library.
//!
//! The bootstrap reduces every curve pillar to a one-dimensional equation
//! `g(f) = 0` in the pillar's forward rate. This crate supplies the solvers
//! that drive those equations:
//!
//! - **Bisection**: halves a sign-changing bracket; slow, never fails on a valid bracket
//! - **Brent**: bisection safeguarded by secant and inverse quadratic steps
//! - **Hybrid**: Newton-Raphson with an analytic derivative, falling back to Brent

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, brent, hybrid, BisectionSolver, BrentSolver, HybridSolver, Solver,
        SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
