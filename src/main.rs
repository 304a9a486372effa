//! TVM Planner CLI
//!
//! Runs the interactive menu by default, or evaluates one calculation from
//! flags. Omitted flags fall back to the `TVM_*` environment defaults.

use std::io;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use tvm_planner::calculation::{Calculation, Outcome};
use tvm_planner::config::{solver_config_from_env, NumberFormat, PlannerDefaults};
use tvm_planner::driver::Session;
use tvm_planner::solver::SolverConfig;

/// Personal financial planner: future value, present value, payments and rates
#[derive(Parser)]
#[command(name = "tvm", version, about, long_about = None)]
struct Cli {
    /// Decimal separator used to read and print numbers
    #[arg(long, global = true)]
    decimal_separator: Option<char>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Iteration cap for the interest rate solver
    #[arg(long, global = true)]
    max_iterations: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Menu-driven session (the default)
    Interactive,
    /// Future value of an initial amount plus periodic payments
    Fv(CashFlowArgs),
    /// Initial capital required to reach a future value
    Pv(CashFlowArgs),
    /// Constant periodic payment required to reach a future value
    Pmt(CashFlowArgs),
    /// Interest rate that grows the present value into the future value
    Rate(CashFlowArgs),
    /// Convert an annual nominal rate (%) to the effective rate
    Effective(ConversionArgs),
    /// Convert an annual effective rate (%) to the nominal rate
    Nominal(ConversionArgs),
}

#[derive(Args)]
struct CashFlowArgs {
    #[arg(long, allow_hyphen_values = true)]
    present_value: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    future_value: Option<f64>,

    /// Annual effective rate in percent
    #[arg(long, allow_hyphen_values = true)]
    rate: Option<f64>,

    /// Total number of compounding periods
    #[arg(long)]
    periods: Option<u32>,

    /// Compounding periods per year
    #[arg(long)]
    compounding_periods: Option<u32>,

    #[arg(long, allow_hyphen_values = true)]
    payment: Option<f64>,
}

#[derive(Args)]
struct ConversionArgs {
    /// Annual rate in percent
    #[arg(long, allow_hyphen_values = true)]
    rate: f64,

    /// Compounding periods per year
    #[arg(long)]
    compounding_periods: Option<u32>,
}

/// Defaults with the flags given on the command line laid over them
fn merge(args: &CashFlowArgs, defaults: &PlannerDefaults) -> PlannerDefaults {
    PlannerDefaults {
        present_value: args.present_value.unwrap_or(defaults.present_value),
        future_value: args.future_value.unwrap_or(defaults.future_value),
        rate: args.rate.unwrap_or(defaults.rate),
        periods: args.periods.unwrap_or(defaults.periods),
        compounding_periods: args
            .compounding_periods
            .unwrap_or(defaults.compounding_periods),
        payment: args.payment.unwrap_or(defaults.payment),
    }
}

fn build(command: &Commands, defaults: &PlannerDefaults) -> Option<Calculation> {
    let calculation = match command {
        Commands::Interactive => return None,
        Commands::Fv(args) => {
            let v = merge(args, defaults);
            Calculation::FutureValue {
                present_value: v.present_value,
                rate: v.rate,
                periods: v.periods,
                compounding_periods: v.compounding_periods,
                payment: v.payment,
            }
        }
        Commands::Pv(args) => {
            let v = merge(args, defaults);
            Calculation::PresentValue {
                future_value: v.future_value,
                rate: v.rate,
                periods: v.periods,
                compounding_periods: v.compounding_periods,
                payment: v.payment,
            }
        }
        Commands::Pmt(args) => {
            let v = merge(args, defaults);
            Calculation::Payment {
                present_value: v.present_value,
                future_value: v.future_value,
                rate: v.rate,
                periods: v.periods,
                compounding_periods: v.compounding_periods,
            }
        }
        Commands::Rate(args) => {
            let v = merge(args, defaults);
            Calculation::InterestRate {
                present_value: v.present_value,
                future_value: v.future_value,
                periods: v.periods,
                compounding_periods: v.compounding_periods,
                payment: v.payment,
            }
        }
        Commands::Effective(args) => Calculation::EffectiveRate {
            nominal_rate: args.rate,
            compounding_periods: args
                .compounding_periods
                .unwrap_or(defaults.compounding_periods),
        },
        Commands::Nominal(args) => Calculation::NominalRate {
            effective_rate: args.rate,
            compounding_periods: args
                .compounding_periods
                .unwrap_or(defaults.compounding_periods),
        },
    };
    Some(calculation)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    calculation: &'a Calculation,
    outcome: &'a Outcome,
    formatted: String,
}

fn run_interactive(defaults: PlannerDefaults, format: NumberFormat, solver: SolverConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), defaults, format, solver);
    session.run().context("interactive session failed")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let defaults = PlannerDefaults::from_env();
    let format = cli
        .decimal_separator
        .map(NumberFormat::new)
        .unwrap_or_else(NumberFormat::from_env);
    let solver = match cli.max_iterations {
        Some(n) => solver_config_from_env().with_max_iterations(n),
        None => solver_config_from_env(),
    };

    let command = cli.command.unwrap_or(Commands::Interactive);
    let calculation = match build(&command, &defaults) {
        Some(calculation) => calculation,
        None => return run_interactive(defaults, format, solver),
    };

    log::debug!("one-shot {:?}", calculation);
    let outcome = calculation
        .evaluate(&solver)
        .with_context(|| format!("{:?} calculation failed", calculation.quantity()))?;

    if cli.json {
        let report = JsonReport {
            calculation: &calculation,
            outcome: &outcome,
            formatted: outcome.formatted_value(&format),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", outcome.describe(&format));
    }

    Ok(())
}
