//! # Request Latency Simulator - Main Entry Point
//!
//! Runs one simulation with the configuration given on the command line:
//!
//! 1. **Initialize logging**: tracing subscriber on stderr (and optionally a file)
//! 2. **Parse arguments**: request count, arrival rate and output locations
//! 3. **Run the pipeline**: generate → aggregate → report
//! 4. **Print a summary**: three lines naming the artifacts that were written
//!
//! ## Error Handling
//!
//! Any failure (invalid configuration, directory creation, file writes)
//! propagates out of `main` as an `anyhow::Error` and ends the run.

use anyhow::Result;
use clap::Parser;
use latency_sim::{
    cli::Args,
    logging,
    simulation::{SimulationConfig, SimulationRunner},
};
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();

    // The guard flushes the file appender on drop; hold it until exit.
    let _log_guard = logging::init_logging(args.verbose, args.quiet, args.log_file.as_deref())?;

    info!("Starting latency simulator v{}", latency_sim::VERSION);
    info!("Configuration: {:?}", args);

    let config = SimulationConfig::from_args(&args)?;
    let outcome = SimulationRunner::new(config).run()?;

    println!("Simulation complete: {} requests", outcome.events.len());
    println!("CSV: {}", outcome.table_path.display());
    println!("Conclusions: {}", outcome.narrative_path.display());

    if let Some(path) = &outcome.summary_path {
        info!("JSON summary: {}", path.display());
    }
    Ok(())
}
