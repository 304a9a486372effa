//! Closed-form future value, present value and payment formulas
//!
//! All three take the annual *effective* rate as a percentage (`5.0` for 5%)
//! and first reduce it to the rate applied at each compounding step.

use crate::error::{ensure_finite, TvmError, TvmResult};
use crate::precision::{as_outflow, round_dp, MONEY_DECIMALS};
use crate::rates::{to_nominal, CompoundingSchedule};

/// Growth terms shared by the three formulas for one (rate, schedule, periods)
#[derive(Debug, Clone, Copy)]
pub(crate) struct Growth {
    /// Rate applied at each compounding step
    pub per_period_rate: f64,
    /// (1 + i)^n
    pub factor: f64,
    /// ((1 + i)^n - 1) / i, or n when i is exactly zero
    pub annuity: f64,
}

impl Growth {
    pub fn new(rate_percent: f64, periods: u32, compounding_periods: u32) -> TvmResult<Self> {
        let schedule = CompoundingSchedule::new(compounding_periods)?;
        let rate_percent = ensure_finite("rate", rate_percent)?;

        let nominal = to_nominal(rate_percent / 100.0, schedule.periods_per_year())?;
        let per_period_rate = nominal / schedule.as_f64();
        let n = f64::from(periods);

        if per_period_rate == 0.0 {
            // Limiting case of ((1 + i)^n - 1) / i as i -> 0
            return Ok(Self {
                per_period_rate,
                factor: 1.0,
                annuity: n,
            });
        }

        // ln(1+i) and e^x - 1 keep tiny rates from cancelling to zero
        let growth = n * per_period_rate.ln_1p();
        let factor = growth.exp();
        let annuity = growth.exp_m1() / per_period_rate;

        Ok(Self {
            per_period_rate,
            factor,
            annuity,
        })
    }
}

fn finite(value: f64, operation: &'static str) -> TvmResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TvmError::NumericOverflow { operation })
    }
}

/// Signed, unrounded future value
///
/// The rate solver evaluates this directly so its residual is smooth in the
/// rate rather than stepped by the 4-decimal output rounding.
pub(crate) fn future_value_exact(
    present_value: f64,
    rate: f64,
    periods: u32,
    compounding_periods: u32,
    payment: f64,
) -> TvmResult<f64> {
    let present_value = ensure_finite("present_value", present_value)?;
    let payment = ensure_finite("payment", payment)?;
    let growth = Growth::new(rate, periods, compounding_periods)?;

    finite(
        present_value * growth.factor + payment * growth.annuity,
        "future_value",
    )
}

/// Future value of an initial amount plus level periodic payments.
///
/// ```text
/// fv = pv·(1+i)^n + pmt·((1+i)^n - 1)/i        (i ≠ 0)
/// fv = pv + pmt·n                               (i = 0)
/// ```
///
/// Returns the unsigned magnitude rounded to 4 decimals; the direction of the
/// resulting cash flow is left to the caller.
///
/// # Example
/// ```rust
/// use tvm_planner::annuity::future_value;
///
/// // Zero rate: no growth, just the sum of contributions
/// assert_eq!(future_value(1000.0, 0.0, 10, 12, 100.0).unwrap(), 2000.0);
/// ```
pub fn future_value(
    present_value: f64,
    rate: f64,
    periods: u32,
    compounding_periods: u32,
    payment: f64,
) -> TvmResult<f64> {
    let fv = future_value_exact(present_value, rate, periods, compounding_periods, payment)?;
    Ok(round_dp(fv.abs(), MONEY_DECIMALS))
}

/// Present value (initial capital) needed to reach `future_value`.
///
/// Inverse of [`future_value`]: the future value and payment are read as
/// magnitudes flowing in the same direction, so
///
/// ```text
/// pv = (|fv| - |pmt|·((1+i)^n - 1)/i) / (1+i)^n
/// ```
///
/// Returned as a negative magnitude rounded to 4 decimals (an outflow).
pub fn present_value(
    future_value: f64,
    rate: f64,
    periods: u32,
    compounding_periods: u32,
    payment: f64,
) -> TvmResult<f64> {
    let future_value = ensure_finite("future_value", future_value)?;
    let payment = ensure_finite("payment", payment)?;
    let growth = Growth::new(rate, periods, compounding_periods)?;

    let pv = finite(
        (future_value.abs() - payment.abs() * growth.annuity) / growth.factor,
        "present_value",
    )?;

    Ok(as_outflow(round_dp(pv, MONEY_DECIMALS)))
}

/// Level periodic payment that grows `present_value` into `future_value`.
///
/// ```text
/// pmt = (|fv| - |pv|·(1+i)^n) / (((1+i)^n - 1)/i)
/// ```
///
/// Returned as a negative magnitude rounded to 4 decimals. A zero-period
/// schedule has no payments to spread the difference over and fails with
/// [`TvmError::DegenerateSchedule`].
pub fn payment(
    present_value: f64,
    future_value: f64,
    rate: f64,
    periods: u32,
    compounding_periods: u32,
) -> TvmResult<f64> {
    let present_value = ensure_finite("present_value", present_value)?;
    let future_value = ensure_finite("future_value", future_value)?;
    let growth = Growth::new(rate, periods, compounding_periods)?;

    if periods == 0 {
        return Err(TvmError::DegenerateSchedule(
            "payment is undefined over zero periods".into(),
        ));
    }

    let pmt = finite(
        (future_value.abs() - present_value.abs() * growth.factor) / growth.annuity,
        "payment",
    )?;

    Ok(as_outflow(round_dp(pmt, MONEY_DECIMALS)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_growth_per_period_rate() {
        // 12.6825% effective is 1% per month
        let growth = Growth::new(12.682503013197, 12, 12).unwrap();
        assert_abs_diff_eq!(growth.per_period_rate, 0.01, epsilon = 1e-12);
        assert_abs_diff_eq!(growth.factor, 1.01f64.powi(12), epsilon = 1e-10);
        assert_abs_diff_eq!(growth.annuity, 12.682503013197, epsilon = 1e-8);
    }

    #[test]
    fn test_future_value_annual() {
        // 1000 at 10% for 2 years plus 100 a year: 1210 + 210
        let fv = future_value(1000.0, 10.0, 2, 1, 100.0).unwrap();
        assert_eq!(fv, 1420.0);
    }

    #[test]
    fn test_future_value_is_magnitude() {
        let outflows = future_value(-20000.0, 5.0, 120, 12, -100.0).unwrap();
        let inflows = future_value(20000.0, 5.0, 120, 12, 100.0).unwrap();
        assert!(outflows > 0.0);
        assert_eq!(outflows, inflows);
        // 20000 * 1.05^10 + 100 * annuity factor
        assert_abs_diff_eq!(outflows, 48014.2087, epsilon = 1e-9);
    }

    #[test]
    fn test_future_value_zero_rate() {
        assert_eq!(future_value(1000.0, 0.0, 10, 12, 100.0).unwrap(), 2000.0);
        assert_eq!(future_value(-500.0, 0.0, 4, 1, -25.0).unwrap(), 600.0);
    }

    #[test]
    fn test_zero_periods() {
        assert_eq!(future_value(1500.0, 7.0, 0, 12, 100.0).unwrap(), 1500.0);
        assert_eq!(present_value(1500.0, 7.0, 0, 12, 100.0).unwrap(), -1500.0);
        assert!(matches!(
            payment(-1000.0, 1500.0, 7.0, 0, 12),
            Err(TvmError::DegenerateSchedule(_))
        ));
        assert!(matches!(
            payment(-1000.0, 1500.0, 0.0, 0, 12),
            Err(TvmError::DegenerateSchedule(_))
        ));
    }

    #[test]
    fn test_present_value_inverts_future_value() {
        let fv = future_value(1000.0, 6.0, 36, 12, 50.0).unwrap();
        let pv = present_value(fv, 6.0, 36, 12, 50.0).unwrap();
        assert_abs_diff_eq!(pv, -1000.0, epsilon = 1e-3);
    }

    #[test]
    fn test_present_value_zero_rate() {
        assert_eq!(present_value(2000.0, 0.0, 10, 12, 100.0).unwrap(), -1000.0);
    }

    #[test]
    fn test_payment_recovers_contribution() {
        let fv = future_value(-20000.0, 5.0, 120, 12, -100.0).unwrap();
        let pmt = payment(-20000.0, fv, 5.0, 120, 12).unwrap();
        assert_abs_diff_eq!(pmt, -100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_payment_zero_rate() {
        // (2000 - 1000) / 10
        assert_eq!(payment(-1000.0, 2000.0, 0.0, 10, 12).unwrap(), -100.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            future_value(1000.0, 5.0, 12, 0, 0.0),
            Err(TvmError::InvalidCompoundingPeriods { periods: 0 })
        );
        assert!(matches!(
            present_value(1000.0, -100.0, 12, 12, 0.0),
            Err(TvmError::InvalidRateDomain { .. })
        ));
        assert!(matches!(
            payment(f64::NAN, 1000.0, 5.0, 12, 12),
            Err(TvmError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_tiny_rates_keep_payments() {
        // 1e-15% effective: indistinguishable from the zero-rate limit
        assert_eq!(future_value(0.0, 1e-15, 10, 1, 100.0).unwrap(), 1000.0);
        assert_eq!(payment(0.0, 1000.0, 1e-15, 10, 1).unwrap(), -100.0);
        assert_eq!(future_value(0.0, 1e-11, 120, 1, 100.0).unwrap(), 12000.0);

        for rate in [1e-9, 1e-12, 1e-14] {
            assert_eq!(
                future_value(-1000.0, rate, 60, 12, -10.0).unwrap(),
                future_value(-1000.0, 0.0, 60, 12, -10.0).unwrap()
            );
            assert_abs_diff_eq!(
                payment(-1000.0, 2000.0, rate, 60, 12).unwrap(),
                payment(-1000.0, 2000.0, 0.0, 60, 12).unwrap(),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn test_huge_finite_results_survive_rounding() {
        assert_eq!(future_value(1e305, 0.0, 1, 1, 0.0).unwrap(), 1e305);
        assert_eq!(present_value(1e305, 0.0, 1, 1, 0.0).unwrap(), -1e305);
        assert_eq!(payment(0.0, 1e305, 0.0, 1, 1).unwrap(), -1e305);
    }

    #[test]
    fn test_overflow_reported() {
        assert_eq!(
            future_value(1e300, 900.0, 100_000, 12, 0.0),
            Err(TvmError::NumericOverflow { operation: "future_value" })
        );
    }
}
