//! Planner configuration: input defaults, number format and solver tuning
//!
//! Values layer as built-in defaults, then `TVM_*` environment variables,
//! then command-line flags (applied by the binaries).
//!   TVM_PRESENT_VALUE, TVM_FUTURE_VALUE, TVM_RATE, TVM_PERIODS,
//!   TVM_COMPOUNDING_PERIODS, TVM_PAYMENT, TVM_DECIMAL_SEPARATOR,
//!   TVM_SOLVER_MAX_ITERATIONS

use std::env;

use serde::{Deserialize, Serialize};

use crate::solver::SolverConfig;

/// Default initial capital (an outflow)
pub const DEFAULT_PRESENT_VALUE: f64 = -20000.0;

/// Default horizon in compounding periods (ten years monthly)
pub const DEFAULT_PERIODS: u32 = 120;

/// Default compounding frequency
pub const DEFAULT_COMPOUNDING_PERIODS: u32 = 12;

/// Default periodic payment (an outflow)
pub const DEFAULT_PAYMENT: f64 = -100.0;

/// Values offered when the user leaves an input empty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannerDefaults {
    pub present_value: f64,
    pub future_value: f64,
    /// Annual effective rate, percent
    pub rate: f64,
    pub periods: u32,
    pub compounding_periods: u32,
    pub payment: f64,
}

impl Default for PlannerDefaults {
    fn default() -> Self {
        Self {
            present_value: DEFAULT_PRESENT_VALUE,
            future_value: 0.0,
            rate: 0.0,
            periods: DEFAULT_PERIODS,
            compounding_periods: DEFAULT_COMPOUNDING_PERIODS,
            payment: DEFAULT_PAYMENT,
        }
    }
}

impl PlannerDefaults {
    /// Defaults overridden by any `TVM_*` variables set in the environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup;
    /// unparseable values keep the built-in default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();
        let get_f64 = |key: &str, default: f64| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };
        let get_u32 = |key: &str, default: u32| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            present_value: get_f64("TVM_PRESENT_VALUE", base.present_value),
            future_value: get_f64("TVM_FUTURE_VALUE", base.future_value),
            rate: get_f64("TVM_RATE", base.rate),
            periods: get_u32("TVM_PERIODS", base.periods),
            compounding_periods: get_u32("TVM_COMPOUNDING_PERIODS", base.compounding_periods),
            payment: get_f64("TVM_PAYMENT", base.payment),
        }
    }
}

/// How numbers are written in the user's locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub decimal_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self { decimal_separator: '.' }
    }
}

impl NumberFormat {
    pub fn new(decimal_separator: char) -> Self {
        Self { decimal_separator }
    }

    pub fn from_env() -> Self {
        env::var("TVM_DECIMAL_SEPARATOR")
            .ok()
            .and_then(|s| s.trim().chars().next())
            .map(Self::new)
            .unwrap_or_default()
    }

    /// The separator that groups thousands under this decimal separator
    pub fn group_separator(&self) -> char {
        if self.decimal_separator == ',' {
            '.'
        } else {
            ','
        }
    }

    /// Parse a number written in this format; thousands separators, spaces,
    /// and a trailing `%` are ignored
    pub fn parse(&self, text: &str) -> Option<f64> {
        let group = self.group_separator();
        let normalized: String = text
            .trim()
            .trim_end_matches('%')
            .chars()
            .filter(|c| *c != group && !c.is_whitespace())
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();

        if normalized.is_empty() {
            return None;
        }
        normalized.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Render a value with this format's decimal separator
    pub fn format(&self, value: f64) -> String {
        let text = value.to_string();
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }
}

/// Solver tuning from `TVM_SOLVER_MAX_ITERATIONS`, on top of the defaults
pub fn solver_config_from_env() -> SolverConfig {
    let config = SolverConfig::default();
    match env::var("TVM_SOLVER_MAX_ITERATIONS")
        .ok()
        .and_then(|s| s.trim().parse().ok())
    {
        Some(max_iterations) => config.with_max_iterations(max_iterations),
        None => config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_planner() {
        let defaults = PlannerDefaults::default();
        assert_eq!(defaults.present_value, -20000.0);
        assert_eq!(defaults.periods, 120);
        assert_eq!(defaults.compounding_periods, 12);
        assert_eq!(defaults.payment, -100.0);
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TVM_PRESENT_VALUE", "-5000"),
            ("TVM_PERIODS", " 60 "),
            ("TVM_PAYMENT", "not a number"),
        ]
        .into_iter()
        .collect();

        let defaults = PlannerDefaults::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(defaults.present_value, -5000.0);
        assert_eq!(defaults.periods, 60);
        // Unparseable keeps the built-in value
        assert_eq!(defaults.payment, -100.0);
        assert_eq!(defaults.compounding_periods, 12);
    }

    #[test]
    fn test_parse_dot_decimal() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.parse("1,234.5"), Some(1234.5));
        assert_eq!(fmt.parse(" -20000 "), Some(-20000.0));
        assert_eq!(fmt.parse("5%"), Some(5.0));
        assert_eq!(fmt.parse(""), None);
        assert_eq!(fmt.parse("abc"), None);
        assert_eq!(fmt.parse("inf"), None);
    }

    #[test]
    fn test_parse_comma_decimal() {
        let fmt = NumberFormat::new(',');
        assert_eq!(fmt.parse("1.234,5"), Some(1234.5));
        assert_eq!(fmt.parse("0,0"), Some(0.0));
        assert_eq!(fmt.format(48014.2087), "48014,2087");
    }
}
