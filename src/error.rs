//! Error taxonomy shared by every time-value-of-money operation

use thiserror::Error;

/// Typed failure returned by the rate converter, annuity engine and solver.
///
/// Every variant is raised at the point of detection; no operation hands back
/// `NaN` or an infinity in place of one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TvmError {
    #[error("Invalid compounding periods: {periods} (must be greater than zero)")]
    InvalidCompoundingPeriods { periods: i64 },

    #[error("Invalid rate domain: {rate} makes (1 + rate) non-positive")]
    InvalidRateDomain { rate: f64 },

    #[error("Degenerate schedule: {0}")]
    DegenerateSchedule(String),

    #[error("No convergence after {iterations} iterations (last estimate: {estimate}, residual: {residual})")]
    NoConvergence {
        iterations: u32,
        estimate: f64,
        residual: f64,
    },

    #[error("Solver stalled: secant slope is flat at {estimate} (residual: {residual})")]
    StalledSolver { estimate: f64, residual: f64 },

    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("Numeric overflow in {operation}")]
    NumericOverflow { operation: &'static str },
}

impl TvmError {
    /// Shorthand for an `InvalidInput` on a named field
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        TvmError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// True for the two solver failure modes
    pub fn is_solver_failure(&self) -> bool {
        matches!(
            self,
            TvmError::NoConvergence { .. } | TvmError::StalledSolver { .. }
        )
    }
}

/// Standard result type for all TVM operations
pub type TvmResult<T> = Result<T, TvmError>;

/// Reject NaN and infinite inputs before they reach a formula
pub(crate) fn ensure_finite(field: &str, value: f64) -> TvmResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TvmError::invalid_input(field, format!("{} is not a finite number", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_diagnostics() {
        let err = TvmError::NoConvergence {
            iterations: 100,
            estimate: 4.2,
            residual: 0.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("4.2"));
        assert!(err.is_solver_failure());
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("rate", 1.5), Ok(1.5));
        assert!(matches!(
            ensure_finite("rate", f64::NAN),
            Err(TvmError::InvalidInput { .. })
        ));
        assert!(ensure_finite("payment", f64::INFINITY).is_err());
        assert!(!TvmError::invalid_input("periods", "negative").is_solver_failure());
    }
}
