//! Annuity formulas for a level payment schedule
//!
//! Provides:
//! - Future value of an initial amount plus periodic payments
//! - Present value needed to reach a target future value
//! - Periodic payment needed to grow a present value into a future value
//!
//! Rates are annual effective percentages; each formula converts them to the
//! per-compounding-period rate before applying it.

mod engine;
mod params;

pub use engine::{future_value, payment, present_value};
pub use params::CashFlowParameters;

pub(crate) use engine::future_value_exact;
