//! Line-based prompts with optional defaults

use std::io::{BufRead, Write};

use crate::config::NumberFormat;
use crate::error::TvmError;
use crate::rates::CompoundingSchedule;
use super::DriverError;

/// Asks for one value per line; an empty line accepts the offered default
pub struct Prompter<R, W> {
    input: R,
    output: W,
    format: NumberFormat,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, format: NumberFormat) -> Self {
        Self { input, output, format }
    }

    pub fn format(&self) -> &NumberFormat {
        &self.format
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next input line without its terminator, or `None` at end of input
    pub fn read_line(&mut self) -> Result<Option<String>, DriverError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask(&mut self, message: &str, default: Option<String>) -> Result<String, DriverError> {
        match &default {
            Some(d) => write!(self.output, "{} [{}]: ", message, d)?,
            None => write!(self.output, "{}: ", message)?,
        }
        self.output.flush()?;

        let line = self.read_line()?.ok_or(DriverError::EndOfInput)?;
        let answer = line.trim();
        if answer.is_empty() {
            return default.ok_or(DriverError::MissingValue {
                prompt: message.to_string(),
            });
        }
        Ok(answer.to_string())
    }

    /// Ask for a real number in the configured format
    pub fn ask_f64(&mut self, message: &str, default: Option<f64>) -> Result<f64, DriverError> {
        let shown = default.map(|d| self.format.format(d));
        let answer = self.ask(message, shown)?;
        self.format
            .parse(&answer)
            .ok_or(DriverError::InvalidNumber { input: answer })
    }

    fn ask_integer(&mut self, message: &str, default: Option<u32>) -> Result<i64, DriverError> {
        let answer = self.ask(message, default.map(|d| d.to_string()))?;
        answer
            .parse::<i64>()
            .map_err(|_| DriverError::InvalidNumber { input: answer })
    }

    /// Ask for a number of periods (zero allowed, negative rejected)
    pub fn ask_periods(&mut self, message: &str, default: Option<u32>) -> Result<u32, DriverError> {
        let value = self.ask_integer(message, default)?;
        u32::try_from(value).map_err(|_| {
            TvmError::invalid_input("periods", format!("{} is not a valid number of periods", value))
                .into()
        })
    }

    /// Ask for a compounding frequency (must be positive)
    pub fn ask_compounding(
        &mut self,
        message: &str,
        default: Option<u32>,
    ) -> Result<u32, DriverError> {
        let value = self.ask_integer(message, default)?;
        let schedule = CompoundingSchedule::try_from(value)?;
        Ok(schedule.periods_per_year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            NumberFormat::default(),
        )
    }

    #[test]
    fn test_empty_line_takes_default() {
        let mut p = prompter("\n");
        assert_eq!(p.ask_f64("Payment", Some(-100.0)).unwrap(), -100.0);
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(shown, "Payment [-100]: ");
    }

    #[test]
    fn test_typed_value_wins() {
        let mut p = prompter("2,500.75\r\n");
        assert_eq!(p.ask_f64("Present value", Some(-20000.0)).unwrap(), 2500.75);
    }

    #[test]
    fn test_comma_format() {
        let mut p = Prompter::new(
            Cursor::new(b"1.234,5\n".to_vec()),
            Vec::new(),
            NumberFormat::new(','),
        );
        assert_eq!(p.ask_f64("Future value", Some(0.5)).unwrap(), 1234.5);
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(shown, "Future value [0,5]: ");
    }

    #[test]
    fn test_missing_and_invalid() {
        let mut p = prompter("\nabc\n");
        assert!(matches!(
            p.ask_f64("Future value", None),
            Err(DriverError::MissingValue { .. })
        ));
        assert!(matches!(
            p.ask_f64("Future value", None),
            Err(DriverError::InvalidNumber { .. })
        ));
        assert!(matches!(p.ask_f64("Future value", None), Err(DriverError::EndOfInput)));
    }

    #[test]
    fn test_integer_prompts() {
        let mut p = prompter("\n-3\n0\n");
        assert_eq!(p.ask_periods("Periods", Some(120)).unwrap(), 120);
        assert!(matches!(
            p.ask_periods("Periods", Some(120)),
            Err(DriverError::Calculation(TvmError::InvalidInput { .. }))
        ));
        assert!(matches!(
            p.ask_compounding("Compounding", Some(12)),
            Err(DriverError::Calculation(TvmError::InvalidCompoundingPeriods { periods: 0 }))
        ));
    }
}
