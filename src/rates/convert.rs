//! Nominal and effective annual interest rate conversion

use crate::error::{ensure_finite, TvmError, TvmResult};
use super::schedule::CompoundingSchedule;

/// Convert a nominal annual rate to the effective annual rate.
///
/// # Formula
/// ```text
/// i = (1 + i⁽ᵐ⁾/m)^m - 1
/// ```
/// where `nominal` is the rate convertible `m = compounding_periods` times a
/// year. Both rates are decimals (0.05 for 5%).
///
/// # Example
/// ```rust
/// use tvm_planner::rates::to_effective;
///
/// let eff = to_effective(0.06, 12).unwrap();
/// assert!((eff - 0.0616778).abs() < 1e-6);
/// ```
pub fn to_effective(nominal: f64, compounding_periods: u32) -> TvmResult<f64> {
    let schedule = CompoundingSchedule::new(compounding_periods)?;
    let nominal = ensure_finite("rate", nominal)?;

    if schedule.is_annual() {
        return Ok(nominal);
    }

    let m = schedule.as_f64();
    let effective = (1.0 + nominal / m).powf(m) - 1.0;

    if !effective.is_finite() {
        return Err(TvmError::NumericOverflow { operation: "to_effective" });
    }
    Ok(effective)
}

/// Convert an effective annual rate to the nominal rate convertible
/// `compounding_periods` times a year.
///
/// # Formula
/// ```text
/// i⁽ᵐ⁾ = m[(1 + i)¹⁄ᵐ - 1]
/// ```
///
/// Fails with [`TvmError::InvalidRateDomain`] when `effective <= -1`, since the
/// fractional root of a non-positive base is undefined.
///
/// # Example
/// ```rust
/// use tvm_planner::rates::to_nominal;
///
/// let nom = to_nominal(0.0616778, 12).unwrap();
/// assert!((nom - 0.06).abs() < 1e-6);
/// ```
pub fn to_nominal(effective: f64, compounding_periods: u32) -> TvmResult<f64> {
    let schedule = CompoundingSchedule::new(compounding_periods)?;
    let effective = ensure_finite("rate", effective)?;

    if effective <= -1.0 {
        return Err(TvmError::InvalidRateDomain { rate: effective });
    }

    if schedule.is_annual() {
        return Ok(effective);
    }

    let m = schedule.as_f64();
    Ok(m * ((1.0 + effective).powf(1.0 / m) - 1.0))
}
