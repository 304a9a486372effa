//! Implied interest rate: inverts the annuity future value

use crate::annuity::{future_value_exact, CashFlowParameters};
use crate::error::{ensure_finite, TvmResult};
use crate::precision::{round_dp, RATE_DECIMALS};
use crate::rates::CompoundingSchedule;
use super::{Evaluate, SecantSolver, SolverConfig};

/// Future value magnitude as a function of the annual effective rate (percent)
///
/// Evaluates the unrounded formula; `future_value` rounds only for display.
#[derive(Debug, Clone, Copy)]
pub struct FutureValueAtRate {
    present_value: f64,
    payment: f64,
    periods: u32,
    schedule: CompoundingSchedule,
}

impl FutureValueAtRate {
    pub fn new(params: &CashFlowParameters, schedule: CompoundingSchedule) -> Self {
        Self {
            present_value: params.present_value,
            payment: params.payment,
            periods: params.periods,
            schedule,
        }
    }
}

impl Evaluate for FutureValueAtRate {
    fn evaluate(&self, rate: f64) -> TvmResult<f64> {
        let fv = future_value_exact(
            self.present_value,
            rate,
            self.periods,
            self.schedule.periods_per_year(),
            self.payment,
        )?;
        Ok(fv.abs())
    }
}

/// Annual effective rate (percent, 2 decimals) at which `present_value` and
/// `payment` grow into `future_value` over `periods` compounding periods.
pub fn solve_rate(
    present_value: f64,
    future_value: f64,
    periods: u32,
    compounding_periods: u32,
    payment: f64,
) -> TvmResult<f64> {
    solve_rate_with(
        &SolverConfig::default(),
        present_value,
        future_value,
        periods,
        compounding_periods,
        payment,
    )
}

/// [`solve_rate`] with explicit solver tuning
pub fn solve_rate_with(
    config: &SolverConfig,
    present_value: f64,
    future_value: f64,
    periods: u32,
    compounding_periods: u32,
    payment: f64,
) -> TvmResult<f64> {
    let schedule = CompoundingSchedule::new(compounding_periods)?;
    let params = CashFlowParameters::new(
        ensure_finite("present_value", present_value)?,
        ensure_finite("future_value", future_value)?,
        ensure_finite("payment", payment)?,
        periods,
    );

    let evaluator = FutureValueAtRate::new(&params, schedule);
    let result = SecantSolver::new(*config).solve(&evaluator, params.future_value.abs())?;

    let rate = round_dp(result.root, RATE_DECIMALS);
    Ok(if rate == 0.0 { 0.0 } else { rate })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annuity::future_value;
    use crate::error::TvmError;

    #[test]
    fn test_recovers_known_rate() {
        let fv = future_value(-20000.0, 5.0, 120, 12, -100.0).unwrap();
        let rate = solve_rate(-20000.0, fv, 120, 12, -100.0).unwrap();
        assert_eq!(rate, 5.0);
    }

    #[test]
    fn test_recovers_rates_across_schedules() {
        let cases = [
            (-1000.0, 8.0, 24, 4, -50.0),
            (-100.0, 0.5, 12, 12, -10.0),
            (-20000.0, 25.0, 120, 12, -100.0),
            (-20000.0, -3.0, 120, 12, -100.0),
            (10000.0, 3.0, 60, 12, -150.0),
            (-1000.0, -50.0, 24, 12, 0.0),
        ];
        for (pv, rate, periods, comp, pmt) in cases {
            let fv = future_value(pv, rate, periods, comp, pmt).unwrap();
            let solved = solve_rate(pv, fv, periods, comp, pmt).unwrap();
            assert!(
                (solved - rate).abs() < 0.01,
                "expected {} for {:?}, got {}",
                rate,
                (pv, periods, comp, pmt),
                solved
            );
        }
    }

    #[test]
    fn test_steep_growth_falls_back_to_bisection() {
        // Plain secant from 0% and 1% overshoots these and collides near 1%
        let cases = [
            (5000.0, 12.0, 36, 1, 0.0),
            (1000.0, 30.0, 360, 12, 0.0),
            (0.0, 10.0, 480, 12, -200.0),
            (-100.0, 200.0, 120, 12, -10.0),
        ];
        for (pv, rate, periods, comp, pmt) in cases {
            let fv = future_value(pv, rate, periods, comp, pmt).unwrap();
            let solved = solve_rate(pv, fv, periods, comp, pmt).unwrap();
            assert!((solved - rate).abs() < 0.01, "expected {}, got {}", rate, solved);
        }
    }

    #[test]
    fn test_zero_rate_target() {
        // 1000 + 100 * 10 with no growth
        let rate = solve_rate(1000.0, 2000.0, 10, 12, 100.0).unwrap();
        assert_eq!(rate, 0.0);
        assert!(rate.is_sign_positive());
    }

    #[test]
    fn test_nothing_invested_stalls() {
        let err = solve_rate(0.0, 1000.0, 120, 12, 0.0).unwrap_err();
        assert!(matches!(err, TvmError::StalledSolver { .. }), "got {:?}", err);
    }

    #[test]
    fn test_zero_periods_stalls() {
        // Future value equals present value at every rate
        let err = solve_rate(-1000.0, 5000.0, 0, 12, -50.0).unwrap_err();
        assert!(err.is_solver_failure());
    }

    #[test]
    fn test_unreachable_target_fails() {
        // Needs a rate below -99% to shrink 1000 to 0.5 in a year
        let err = solve_rate(-1000.0, 0.5, 12, 12, 0.0).unwrap_err();
        assert!(matches!(err, TvmError::NoConvergence { .. }), "got {:?}", err);
    }

    #[test]
    fn test_invalid_schedule() {
        assert_eq!(
            solve_rate(-1000.0, 2000.0, 12, 0, 0.0),
            Err(TvmError::InvalidCompoundingPeriods { periods: 0 })
        );
    }

    #[test]
    fn test_evaluator_is_unrounded_magnitude() {
        let params = CashFlowParameters::new(-1000.0, 0.0, -10.0, 12);
        let evaluator = FutureValueAtRate::new(&params, CompoundingSchedule::MONTHLY);
        let at_zero = evaluator.evaluate(0.0).unwrap();
        assert_eq!(at_zero, 1120.0);
        let at_seven = evaluator.evaluate(7.0).unwrap();
        assert!(at_seven > at_zero);
        assert_eq!(
            (at_seven * 1e4).round() / 1e4,
            future_value(-1000.0, 7.0, 12, 12, -10.0).unwrap()
        );
    }
}
