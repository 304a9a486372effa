//! A single planner request and its result
//!
//! Shared by the interactive session, the one-shot CLI commands and the
//! scenario runner: each builds a [`Calculation`] and evaluates it against the
//! core formulas.

use serde::{Deserialize, Serialize};

use crate::annuity::{future_value, payment, present_value};
use crate::config::NumberFormat;
use crate::error::TvmResult;
use crate::precision::round_dp;
use crate::rates::{to_effective, to_nominal};
use crate::solver::{solve_rate_with, SolverConfig};

/// Decimal places shown on converted rates (percent)
const CONVERTED_RATE_DECIMALS: i32 = 4;

/// One of the planner's computations with all of its inputs
///
/// Rates are annual percentages (`5.0` for 5%); the annuity rates are effective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Calculation {
    InterestRate {
        present_value: f64,
        future_value: f64,
        periods: u32,
        compounding_periods: u32,
        payment: f64,
    },
    FutureValue {
        present_value: f64,
        rate: f64,
        periods: u32,
        compounding_periods: u32,
        payment: f64,
    },
    Payment {
        present_value: f64,
        future_value: f64,
        rate: f64,
        periods: u32,
        compounding_periods: u32,
    },
    PresentValue {
        future_value: f64,
        rate: f64,
        periods: u32,
        compounding_periods: u32,
        payment: f64,
    },
    EffectiveRate {
        nominal_rate: f64,
        compounding_periods: u32,
    },
    NominalRate {
        effective_rate: f64,
        compounding_periods: u32,
    },
}

impl Calculation {
    pub fn quantity(&self) -> Quantity {
        match self {
            Calculation::InterestRate { .. } => Quantity::InterestRate,
            Calculation::FutureValue { .. } => Quantity::FutureValue,
            Calculation::Payment { .. } => Quantity::Payment,
            Calculation::PresentValue { .. } => Quantity::PresentValue,
            Calculation::EffectiveRate { .. } => Quantity::EffectiveRate,
            Calculation::NominalRate { .. } => Quantity::NominalRate,
        }
    }

    /// Run the calculation through the core formulas
    pub fn evaluate(&self, solver: &SolverConfig) -> TvmResult<Outcome> {
        let value = match *self {
            Calculation::InterestRate {
                present_value,
                future_value,
                periods,
                compounding_periods,
                payment,
            } => solve_rate_with(
                solver,
                present_value,
                future_value,
                periods,
                compounding_periods,
                payment,
            )?,
            Calculation::FutureValue {
                present_value,
                rate,
                periods,
                compounding_periods,
                payment,
            } => future_value(present_value, rate, periods, compounding_periods, payment)?,
            Calculation::Payment {
                present_value,
                future_value,
                rate,
                periods,
                compounding_periods,
            } => payment(present_value, future_value, rate, periods, compounding_periods)?,
            Calculation::PresentValue {
                future_value,
                rate,
                periods,
                compounding_periods,
                payment,
            } => present_value(future_value, rate, periods, compounding_periods, payment)?,
            Calculation::EffectiveRate {
                nominal_rate,
                compounding_periods,
            } => round_dp(
                to_effective(nominal_rate / 100.0, compounding_periods)? * 100.0,
                CONVERTED_RATE_DECIMALS,
            ),
            Calculation::NominalRate {
                effective_rate,
                compounding_periods,
            } => round_dp(
                to_nominal(effective_rate / 100.0, compounding_periods)? * 100.0,
                CONVERTED_RATE_DECIMALS,
            ),
        };

        Ok(Outcome {
            quantity: self.quantity(),
            value,
        })
    }
}

/// What a calculation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    InterestRate,
    FutureValue,
    Payment,
    PresentValue,
    EffectiveRate,
    NominalRate,
}

impl Quantity {
    pub fn is_rate(&self) -> bool {
        matches!(
            self,
            Quantity::InterestRate | Quantity::EffectiveRate | Quantity::NominalRate
        )
    }

    /// Lead-in printed before the result
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::InterestRate => "Required interest rate is",
            Quantity::FutureValue => "Future value will be",
            Quantity::Payment => "Required periodic payments will be",
            Quantity::PresentValue => "Required present value is",
            Quantity::EffectiveRate => "Effective annual interest rate is",
            Quantity::NominalRate => "Nominal annual interest rate is",
        }
    }
}

/// Result of evaluating a [`Calculation`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub quantity: Quantity,
    pub value: f64,
}

impl Outcome {
    /// Value rendered for the user: rates with a `%` suffix
    pub fn formatted_value(&self, format: &NumberFormat) -> String {
        let number = format.format(self.value);
        if self.quantity.is_rate() {
            format!("{}%", number)
        } else {
            number
        }
    }

    /// Full result line, e.g. `Required interest rate is: 5%`
    pub fn describe(&self, format: &NumberFormat) -> String {
        format!("{}: {}", self.quantity.label(), self.formatted_value(format))
    }
}
