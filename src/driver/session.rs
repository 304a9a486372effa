//! The interactive menu loop

use std::io::{BufRead, Write};

use log::{debug, info, warn};

use crate::calculation::Calculation;
use crate::config::{NumberFormat, PlannerDefaults};
use crate::solver::SolverConfig;
use super::{DriverError, MenuChoice, Prompter, EXIT_CODE};

const WELCOME: &str = "Welcome to the Personal Financial Planner!";
const NEXT_OPTION: &str = "Please select one of the options (0-6): ";

const ENTER_PRESENT_VALUE: &str = "Enter the present value of the investment";
const ENTER_FUTURE_VALUE: &str = "Enter the future value of the investment";
const ENTER_PERIODS: &str = "Enter the total number of periods";
const ENTER_COMPOUNDING: &str = "Enter the number of compounding periods per year";
const ENTER_PAYMENT: &str = "Enter the amount of periodic payments";
const ENTER_EFFECTIVE_RATE: &str = "Enter the annual effective interest rate (%)";
const ENTER_NOMINAL_RATE: &str = "Enter the annual nominal interest rate (%)";

/// Menu-driven planner over any line reader and writer
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    defaults: PlannerDefaults,
    solver: SolverConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        input: R,
        output: W,
        defaults: PlannerDefaults,
        format: NumberFormat,
        solver: SolverConfig,
    ) -> Self {
        Self {
            prompter: Prompter::new(input, output, format),
            defaults,
            solver,
        }
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run until the user exits or input ends; only I/O failures escape
    pub fn run(&mut self) -> Result<(), DriverError> {
        writeln!(self.prompter.output(), "{}\n", WELCOME)?;
        write!(self.prompter.output(), "{}", MenuChoice::listing())?;

        loop {
            write!(self.prompter.output(), "{}", NEXT_OPTION)?;
            self.prompter.output().flush()?;

            let line = match self.prompter.read_line()? {
                Some(line) => line,
                None => break,
            };

            if line.trim() == EXIT_CODE {
                break;
            }
            let choice = match MenuChoice::from_code(&line) {
                Some(choice) => choice,
                None => {
                    writeln!(self.prompter.output(), "Unknown option: \"{}\"\n", line.trim())?;
                    continue;
                }
            };

            match self.round(choice) {
                Ok(line) => writeln!(self.prompter.output(), "{}", line)?,
                Err(DriverError::EndOfInput) => break,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("{:?} failed: {}", choice, e);
                    writeln!(self.prompter.output(), "{}", e)?;
                }
            }
            writeln!(self.prompter.output())?;
        }

        info!("session ended");
        Ok(())
    }

    /// Collect inputs for one menu choice, evaluate and describe the result
    pub fn round(&mut self, choice: MenuChoice) -> Result<String, DriverError> {
        let calculation = self.collect(choice)?;
        debug!("evaluating {:?}", calculation);

        let outcome = calculation.evaluate(&self.solver)?;
        Ok(outcome.describe(self.prompter.format()))
    }

    fn collect(&mut self, choice: MenuChoice) -> Result<Calculation, DriverError> {
        let d = self.defaults;
        let p = &mut self.prompter;

        let calculation = match choice {
            MenuChoice::InterestRate => Calculation::InterestRate {
                present_value: p.ask_f64(ENTER_PRESENT_VALUE, Some(d.present_value))?,
                future_value: p.ask_f64(ENTER_FUTURE_VALUE, Some(d.future_value))?,
                periods: p.ask_periods(ENTER_PERIODS, Some(d.periods))?,
                compounding_periods: p.ask_compounding(ENTER_COMPOUNDING, Some(d.compounding_periods))?,
                payment: p.ask_f64(ENTER_PAYMENT, Some(d.payment))?,
            },
            MenuChoice::FutureValue => Calculation::FutureValue {
                present_value: p.ask_f64(ENTER_PRESENT_VALUE, Some(d.present_value))?,
                rate: p.ask_f64(ENTER_EFFECTIVE_RATE, Some(d.rate))?,
                periods: p.ask_periods(ENTER_PERIODS, Some(d.periods))?,
                compounding_periods: p.ask_compounding(ENTER_COMPOUNDING, Some(d.compounding_periods))?,
                payment: p.ask_f64(ENTER_PAYMENT, Some(d.payment))?,
            },
            MenuChoice::Payment => Calculation::Payment {
                present_value: p.ask_f64(ENTER_PRESENT_VALUE, Some(d.present_value))?,
                future_value: p.ask_f64(ENTER_FUTURE_VALUE, Some(d.future_value))?,
                rate: p.ask_f64(ENTER_EFFECTIVE_RATE, Some(d.rate))?,
                periods: p.ask_periods(ENTER_PERIODS, Some(d.periods))?,
                compounding_periods: p.ask_compounding(ENTER_COMPOUNDING, Some(d.compounding_periods))?,
            },
            MenuChoice::PresentValue => Calculation::PresentValue {
                future_value: p.ask_f64(ENTER_FUTURE_VALUE, Some(d.future_value))?,
                rate: p.ask_f64(ENTER_EFFECTIVE_RATE, Some(d.rate))?,
                periods: p.ask_periods(ENTER_PERIODS, Some(d.periods))?,
                compounding_periods: p.ask_compounding(ENTER_COMPOUNDING, Some(d.compounding_periods))?,
                payment: p.ask_f64(ENTER_PAYMENT, Some(d.payment))?,
            },
            MenuChoice::EffectiveRate => Calculation::EffectiveRate {
                nominal_rate: p.ask_f64(ENTER_NOMINAL_RATE, Some(d.rate))?,
                compounding_periods: p.ask_compounding(ENTER_COMPOUNDING, Some(d.compounding_periods))?,
            },
            MenuChoice::NominalRate => Calculation::NominalRate {
                effective_rate: p.ask_f64(ENTER_EFFECTIVE_RATE, Some(d.rate))?,
                compounding_periods: p.ask_compounding(ENTER_COMPOUNDING, Some(d.compounding_periods))?,
            },
        };

        Ok(calculation)
    }
}
