//! Compounding schedule and annual rate representations

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, TvmError, TvmResult};
use super::convert::{to_effective, to_nominal};

/// Number of times interest compounds per year
///
/// Always greater than zero: every formula divides by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct CompoundingSchedule(u32);

impl CompoundingSchedule {
    pub const ANNUAL: Self = Self(1);
    pub const SEMI_ANNUAL: Self = Self(2);
    pub const QUARTERLY: Self = Self(4);
    pub const MONTHLY: Self = Self(12);
    pub const DAILY: Self = Self(365);

    pub fn new(periods_per_year: u32) -> TvmResult<Self> {
        if periods_per_year == 0 {
            return Err(TvmError::InvalidCompoundingPeriods { periods: 0 });
        }
        Ok(Self(periods_per_year))
    }

    pub fn periods_per_year(&self) -> u32 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }

    /// Annual compounding, where nominal and effective rates coincide
    pub fn is_annual(&self) -> bool {
        self.0 == 1
    }
}

impl TryFrom<i64> for CompoundingSchedule {
    type Error = TvmError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u32::try_from(value) {
            Ok(periods) if periods > 0 => Ok(Self(periods)),
            Ok(_) => Err(TvmError::InvalidCompoundingPeriods { periods: value }),
            Err(_) if value <= 0 => Err(TvmError::InvalidCompoundingPeriods { periods: value }),
            Err(_) => Err(TvmError::invalid_input(
                "compounding_periods",
                format!("{} exceeds {}", value, u32::MAX),
            )),
        }
    }
}

impl From<CompoundingSchedule> for u32 {
    fn from(schedule: CompoundingSchedule) -> Self {
        schedule.0
    }
}

impl Default for CompoundingSchedule {
    fn default() -> Self {
        Self::MONTHLY
    }
}

/// An annual rate (as a decimal, 0.05 for 5%) tagged with how it is quoted
///
/// Nominal and effective are two views of the same per-period rate. Only the
/// converter functions translate between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rate", rename_all = "snake_case")]
pub enum RateSpec {
    /// Quoted annual rate before intra-year compounding
    Nominal(f64),
    /// True annualized rate after compounding
    Effective(f64),
}

impl RateSpec {
    /// Effective annual rate under the given schedule
    pub fn to_effective(&self, schedule: CompoundingSchedule) -> TvmResult<f64> {
        match *self {
            RateSpec::Nominal(rate) => to_effective(rate, schedule.periods_per_year()),
            RateSpec::Effective(rate) => ensure_finite("rate", rate),
        }
    }

    /// Nominal annual rate under the given schedule
    pub fn to_nominal(&self, schedule: CompoundingSchedule) -> TvmResult<f64> {
        match *self {
            RateSpec::Nominal(rate) => ensure_finite("rate", rate),
            RateSpec::Effective(rate) => to_nominal(rate, schedule.periods_per_year()),
        }
    }

    /// Rate actually applied at each compounding step
    pub fn per_period_rate(&self, schedule: CompoundingSchedule) -> TvmResult<f64> {
        Ok(self.to_nominal(schedule)? / schedule.as_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_rejects_zero() {
        assert_eq!(
            CompoundingSchedule::new(0),
            Err(TvmError::InvalidCompoundingPeriods { periods: 0 })
        );
        assert_eq!(CompoundingSchedule::new(12), Ok(CompoundingSchedule::MONTHLY));
    }

    #[test]
    fn test_schedule_from_signed() {
        assert_eq!(
            CompoundingSchedule::try_from(-4),
            Err(TvmError::InvalidCompoundingPeriods { periods: -4 })
        );
        assert_eq!(CompoundingSchedule::try_from(4), Ok(CompoundingSchedule::QUARTERLY));
        assert!(matches!(
            CompoundingSchedule::try_from(i64::MAX),
            Err(TvmError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rate_spec_views_agree() {
        let schedule = CompoundingSchedule::MONTHLY;
        let nominal = RateSpec::Nominal(0.06);
        let effective = RateSpec::Effective(nominal.to_effective(schedule).unwrap());

        assert!((effective.to_nominal(schedule).unwrap() - 0.06).abs() < 1e-12);
        assert!((nominal.per_period_rate(schedule).unwrap() - 0.005).abs() < 1e-15);
        assert!(
            (effective.per_period_rate(schedule).unwrap()
                - nominal.per_period_rate(schedule).unwrap())
            .abs()
                < 1e-12
        );
    }

    #[test]
    fn test_schedule_serde_validates() {
        let parsed: Result<CompoundingSchedule, _> = serde_json::from_str("0");
        assert!(parsed.is_err());
        let parsed: CompoundingSchedule = serde_json::from_str("365").unwrap();
        assert_eq!(parsed, CompoundingSchedule::DAILY);
    }
}
