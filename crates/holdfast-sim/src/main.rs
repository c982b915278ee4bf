//! Holdfast headless harness.
//!
//! Loads a JSON scenario, runs the first-person controller against the
//! reference scene at a fixed timestep with scripted input, and prints a JSON
//! summary of the final state to stdout. Logs go to stderr.
//!
//! ```text
//! holdfast-sim scenarios/pickup_and_throw.json --ticks 240 --log-filter debug
//! ```

mod runner;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "holdfast-sim")]
#[command(about = "Run a Holdfast first-person scenario headless")]
struct Cli {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Override the scenario's tick count
    #[arg(long)]
    ticks: Option<u64>,

    /// Log filter directive, e.g. `info` or `holdfast_core=debug`
    #[arg(long, default_value = "info")]
    log_filter: String,
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_filter);

    let scenario = Scenario::from_file(&cli.scenario)?;
    let summary = runner::run(&scenario, cli.ticks);

    let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
    println!("{json}");
    Ok(())
}
