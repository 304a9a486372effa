//! Cash flow parameters shared by the annuity formulas and the rate solver

use serde::{Deserialize, Serialize};

/// The amounts and horizon of a fixed-payment investment or loan
///
/// Signs encode cash flow direction by the caller's convention (outflow
/// negative, inflow positive); the formulas do not enforce one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CashFlowParameters {
    /// Value at the start of the horizon
    pub present_value: f64,
    /// Value at the end of the horizon
    pub future_value: f64,
    /// Level payment made every compounding period
    pub payment: f64,
    /// Total number of compounding periods over the horizon
    pub periods: u32,
}

impl CashFlowParameters {
    pub fn new(present_value: f64, future_value: f64, payment: f64, periods: u32) -> Self {
        Self {
            present_value,
            future_value,
            payment,
            periods,
        }
    }
}


