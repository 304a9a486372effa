//! Numerical goal seek for the time-value-of-money formulas
//!
//! The solver is generic: it inverts any [`Evaluate`] implementation, finding
//! the input whose evaluated value matches a target. [`solve_rate`] binds it to
//! the annuity future value to recover an interest rate.
//!
//! # Example
//!
//! ```rust
//! use tvm_planner::annuity::future_value;
//! use tvm_planner::solver::solve_rate;
//!
//! let fv = future_value(-20000.0, 5.0, 120, 12, -100.0).unwrap();
//! let rate = solve_rate(-20000.0, fv, 120, 12, -100.0).unwrap();
//! assert!((rate - 5.0).abs() < 0.01);
//! ```

mod rate;
mod secant;

pub use rate::{solve_rate, solve_rate_with, FutureValueAtRate};
pub use secant::SecantSolver;

use crate::error::TvmResult;

/// Default absolute tolerance on the residual
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-6;

/// Default tolerance relative to the target's magnitude
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-10;

/// Default tolerance on the distance between successive estimates
pub const DEFAULT_STEP_TOLERANCE: f64 = 1e-9;

/// Default maximum iterations
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Capability the solver inverts: maps a candidate input to a value
pub trait Evaluate {
    fn evaluate(&self, candidate: f64) -> TvmResult<f64>;
}

impl<F> Evaluate for F
where
    F: Fn(f64) -> TvmResult<f64>,
{
    fn evaluate(&self, candidate: f64) -> TvmResult<f64> {
        self(candidate)
    }
}

/// Configuration for the secant solver
///
/// Seeds and bounds are in the evaluator's input units; for the rate solver
/// those are annual effective percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Residual tolerance floor
    pub absolute_tolerance: f64,
    /// Residual tolerance as a fraction of |target|
    pub relative_tolerance: f64,
    /// Converged once successive estimates are closer than this
    pub step_tolerance: f64,
    pub max_iterations: u32,
    /// First seed
    pub initial_guess: f64,
    /// Offset of the second seed from the first
    pub initial_step: f64,
    /// Shift applied to the latest estimate when the secant goes flat
    pub flat_perturbation: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            absolute_tolerance: DEFAULT_ABSOLUTE_TOLERANCE,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            step_tolerance: DEFAULT_STEP_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_guess: 0.0,
            initial_step: 1.0,
            flat_perturbation: 0.5,
            lower_bound: -99.0,
            upper_bound: 1000.0,
        }
    }
}

impl SolverConfig {
    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the two seeds as a first guess and the offset to the second.
    #[must_use]
    pub fn with_seeds(mut self, initial_guess: f64, initial_step: f64) -> Self {
        self.initial_guess = initial_guess;
        self.initial_step = initial_step;
        self
    }

    /// Sets the residual tolerances.
    #[must_use]
    pub fn with_tolerances(mut self, absolute: f64, relative: f64) -> Self {
        self.absolute_tolerance = absolute;
        self.relative_tolerance = relative;
        self
    }

    /// Sets the interval candidates are kept inside.
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Residual tolerance for a given target
    pub fn tolerance_for(&self, target: f64) -> f64 {
        self.absolute_tolerance
            .max(self.relative_tolerance * target.abs())
    }
}

/// Root and iteration statistics from a successful solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    pub root: f64,
    pub iterations: u32,
    /// evaluate(root) - target
    pub residual: f64,
}
