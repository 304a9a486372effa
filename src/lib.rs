//! TVM Planner - time-value-of-money engine for personal savings plans
//!
//! This library provides:
//! - Nominal/effective annual rate conversion
//! - Future value, present value and level payment for an annuity schedule
//! - Interest rate goal seek through a safeguarded secant solver
//! - An interactive menu driver and a parallel CSV scenario runner

pub mod annuity;
pub mod calculation;
pub mod config;
pub mod driver;
pub mod error;
pub mod precision;
pub mod rates;
pub mod scenario;
pub mod solver;

// Re-export commonly used types
pub use annuity::{future_value, payment, present_value, CashFlowParameters};
pub use calculation::{Calculation, Outcome, Quantity};
pub use error::{TvmError, TvmResult};
pub use rates::{to_effective, to_nominal, CompoundingSchedule, RateSpec};
pub use scenario::{Scenario, ScenarioOutcome, ScenarioRunner};
pub use solver::{solve_rate, SecantSolver, SolverConfig};
