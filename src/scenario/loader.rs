//! Load scenarios from CSV
//!
//! Columns: `name,operation,present_value,future_value,rate,periods,compounding_periods,payment`.
//! Every column but `operation` may be left empty; empty inputs fall back to
//! the planner defaults. For the two conversions `rate` is the rate being
//! converted (nominal for `effective`, effective for `nominal`).

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, Trim};

use super::Scenario;
use crate::calculation::Calculation;
use crate::config::PlannerDefaults;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    operation: String,
    #[serde(default)]
    present_value: Option<f64>,
    #[serde(default)]
    future_value: Option<f64>,
    #[serde(default)]
    rate: Option<f64>,
    #[serde(default)]
    periods: Option<u32>,
    #[serde(default)]
    compounding_periods: Option<u32>,
    #[serde(default)]
    payment: Option<f64>,
}

impl CsvRow {
    fn into_scenario(self, line: usize, defaults: &PlannerDefaults) -> Result<Scenario> {
        let present_value = self.present_value.unwrap_or(defaults.present_value);
        let future_value = self.future_value.unwrap_or(defaults.future_value);
        let rate = self.rate.unwrap_or(defaults.rate);
        let periods = self.periods.unwrap_or(defaults.periods);
        let compounding_periods = self
            .compounding_periods
            .unwrap_or(defaults.compounding_periods);
        let payment = self.payment.unwrap_or(defaults.payment);

        let calculation = match self.operation.to_ascii_lowercase().as_str() {
            "rate" | "interest_rate" => Calculation::InterestRate {
                present_value,
                future_value,
                periods,
                compounding_periods,
                payment,
            },
            "fv" | "future_value" => Calculation::FutureValue {
                present_value,
                rate,
                periods,
                compounding_periods,
                payment,
            },
            "pmt" | "payment" => Calculation::Payment {
                present_value,
                future_value,
                rate,
                periods,
                compounding_periods,
            },
            "pv" | "present_value" => Calculation::PresentValue {
                future_value,
                rate,
                periods,
                compounding_periods,
                payment,
            },
            "effective" | "effective_rate" => Calculation::EffectiveRate {
                nominal_rate: rate,
                compounding_periods,
            },
            "nominal" | "nominal_rate" => Calculation::NominalRate {
                effective_rate: rate,
                compounding_periods,
            },
            other => bail!("line {}: unknown operation \"{}\"", line, other),
        };

        let name = self
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("scenario-{}", line));

        Ok(Scenario { name, calculation })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P, defaults: &PlannerDefaults) -> Result<Vec<Scenario>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("cannot open scenario file {}", path.display()))?;
    load_scenarios_from_reader(file, defaults)
        .with_context(|| format!("cannot load scenarios from {}", path.display()))
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: Read>(reader: R, defaults: &PlannerDefaults) -> Result<Vec<Scenario>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut scenarios = Vec::new();

    for (index, result) in csv_reader.deserialize().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row: CsvRow = result.with_context(|| format!("line {}: malformed row", line))?;
        scenarios.push(row.into_scenario(line, defaults)?);
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
name,operation,present_value,future_value,rate,periods,compounding_periods,payment
retirement,fv,-20000,,5,120,12,-100
,rate,-20000,48014.2087,,,,
quarterly,effective,,,6,,4,
";

    #[test]
    fn test_load_from_reader() {
        let scenarios = load_scenarios_from_reader(SAMPLE.as_bytes(), &PlannerDefaults::default()).unwrap();
        assert_eq!(scenarios.len(), 3);

        assert_eq!(scenarios[0].name, "retirement");
        assert_eq!(
            scenarios[0].calculation,
            Calculation::FutureValue {
                present_value: -20000.0,
                rate: 5.0,
                periods: 120,
                compounding_periods: 12,
                payment: -100.0,
            }
        );

        // Unnamed rows are named by line; empty columns take defaults
        assert_eq!(scenarios[1].name, "scenario-3");
        assert_eq!(
            scenarios[1].calculation,
            Calculation::InterestRate {
                present_value: -20000.0,
                future_value: 48014.2087,
                periods: 120,
                compounding_periods: 12,
                payment: -100.0,
            }
        );

        assert_eq!(
            scenarios[2].calculation,
            Calculation::EffectiveRate {
                nominal_rate: 6.0,
                compounding_periods: 4,
            }
        );
    }

    #[test]
    fn test_unknown_operation_names_line() {
        let csv = "name,operation\nx,npv\n";
        let err = load_scenarios_from_reader(csv.as_bytes(), &PlannerDefaults::default()).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
        assert!(err.to_string().contains("npv"));
    }

    #[test]
    fn test_malformed_number() {
        let csv = "operation,periods\nfv,-3\n";
        assert!(load_scenarios_from_reader(csv.as_bytes(), &PlannerDefaults::default()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_scenarios("does/not/exist.csv", &PlannerDefaults::default()).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
