//! Batch evaluation of planner scenarios
//!
//! Scenarios are independent, so a batch is spread across the rayon pool.
//! A failing scenario does not stop the batch; its error is reported in its
//! outcome row.

mod loader;

pub use loader::{load_scenarios, load_scenarios_from_reader};

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calculation::{Calculation, Quantity};
use crate::solver::SolverConfig;

/// A named calculation read from a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub calculation: Calculation,
}

/// Result row for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub quantity: Quantity,
    pub value: Option<f64>,
    pub error: Option<String>,
}

impl ScenarioOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Evaluates scenarios with one shared solver configuration
///
/// # Example
/// ```
/// use tvm_planner::calculation::Calculation;
/// use tvm_planner::scenario::{Scenario, ScenarioRunner};
///
/// let runner = ScenarioRunner::default();
/// let outcome = runner.run(&Scenario {
///     name: "ten years".to_string(),
///     calculation: Calculation::FutureValue {
///         present_value: -20000.0,
///         rate: 5.0,
///         periods: 120,
///         compounding_periods: 12,
///         payment: -100.0,
///     },
/// });
/// assert_eq!(outcome.value, Some(48014.2087));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioRunner {
    solver: SolverConfig,
}

impl ScenarioRunner {
    pub fn new(solver: SolverConfig) -> Self {
        Self { solver }
    }

    /// Evaluate a single scenario
    pub fn run(&self, scenario: &Scenario) -> ScenarioOutcome {
        let quantity = scenario.calculation.quantity();
        match scenario.calculation.evaluate(&self.solver) {
            Ok(outcome) => {
                debug!("{}: {:?} = {}", scenario.name, quantity, outcome.value);
                ScenarioOutcome {
                    name: scenario.name.clone(),
                    quantity,
                    value: Some(outcome.value),
                    error: None,
                }
            }
            Err(e) => {
                warn!("{}: {}", scenario.name, e);
                ScenarioOutcome {
                    name: scenario.name.clone(),
                    quantity,
                    value: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Evaluate many scenarios in parallel; output order follows input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        scenarios.par_iter().map(|s| self.run(s)).collect()
    }
}
