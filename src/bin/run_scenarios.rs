//! Evaluate every scenario in a CSV file in parallel
//!
//! Writes one result row per scenario as CSV (default) or JSON (`--json`)

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use tvm_planner::config::{solver_config_from_env, PlannerDefaults};
use tvm_planner::scenario::{load_scenarios, ScenarioOutcome, ScenarioRunner};

#[derive(Parser)]
#[command(name = "run_scenarios", version, about = "Evaluate planner scenarios from a CSV file")]
struct Cli {
    /// Scenario file (name,operation,present_value,future_value,rate,periods,compounding_periods,payment)
    input: PathBuf,

    /// Write results here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit JSON instead of CSV
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    scenarios: usize,
    failures: usize,
    results: &'a [ScenarioOutcome],
}

fn write_csv<W: Write>(out: W, results: &[ScenarioOutcome]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in results {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let start = Instant::now();

    let scenarios = load_scenarios(&cli.input, &PlannerDefaults::from_env())?;
    info!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = ScenarioRunner::new(solver_config_from_env());
    let eval_start = Instant::now();
    let results = runner.run_batch(&scenarios);
    let failures = results.iter().filter(|r| !r.is_ok()).count();
    info!(
        "Evaluated {} scenarios ({} failed) in {:?}",
        results.len(),
        failures,
        eval_start.elapsed()
    );

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    if cli.json {
        let report = JsonOutput {
            scenarios: results.len(),
            failures,
            results: &results,
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        write_csv(out, &results)?;
    }

    Ok(())
}
