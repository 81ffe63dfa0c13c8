//! # Simulation Runner Module
//!
//! Orchestrates one complete run of the pipeline:
//!
//! 1. **Generation**: synthesize the request events
//! 2. **Aggregation**: derive the statistics snapshot
//! 3. **Reporting**: write the CSV export, the conclusions document and,
//!    when requested, the JSON summary
//!
//! Each run is independent; nothing is carried over between runs.

use crate::{
    cli::Args,
    generator::{Event, EventGenerator},
    metrics::{aggregate, StatsSnapshot},
    results::{self, RunSummary},
    utils,
};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Validated configuration for one simulation run
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Number of requests to simulate
    pub requests: usize,

    /// Mean arrival rate in requests per second (0 = simultaneous arrivals)
    pub arrival_rate: f64,

    /// Destination of the CSV export
    pub table_path: PathBuf,

    /// Directory receiving the conclusions document
    pub docs_dir: PathBuf,

    /// Seed for a reproducible run; `None` draws from OS entropy
    pub seed: Option<u64>,

    /// Optional destination of the JSON summary
    pub summary_json: Option<PathBuf>,
}

impl SimulationConfig {
    /// Create simulation configuration from CLI arguments
    ///
    /// ## Returns
    /// - `Ok(SimulationConfig)`: valid configuration ready for use
    /// - `Err(anyhow::Error)`: the arrival rate is negative or not finite
    pub fn from_args(args: &Args) -> Result<Self> {
        utils::validate_arrival_rate(args.rate)?;

        Ok(Self {
            requests: args.requests,
            arrival_rate: args.rate,
            table_path: args.out.clone(),
            docs_dir: args.docs.clone(),
            seed: args.seed,
            summary_json: args.summary_json.clone(),
        })
    }
}

/// Everything a run produced
#[derive(Debug)]
pub struct SimulationOutcome {
    pub events: Vec<Event>,
    pub stats: Option<StatsSnapshot>,
    pub table_path: PathBuf,
    pub narrative_path: PathBuf,
    pub summary_path: Option<PathBuf>,
}

/// Runs generate → aggregate → report for one configuration
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Execute the pipeline and write all artifacts
    ///
    /// I/O failures propagate; a partially written artifact may be left behind.
    pub fn run(&self) -> Result<SimulationOutcome> {
        let config = &self.config;
        info!(
            "Simulating {} requests at {} req/s (seed: {:?})",
            config.requests, config.arrival_rate, config.seed
        );

        let mut generator = EventGenerator::new(config.seed)?;
        let events = generator.generate(config.requests, config.arrival_rate)?;

        let stats = aggregate(&events);
        match &stats {
            Some(s) => info!(
                "p50 {:.3} ms, p95 {:.3} ms, p99 {:.3} ms, throughput {}",
                s.median_ms,
                s.p95_ms,
                s.p99_ms,
                utils::format_request_rate(s.throughput_rps)
            ),
            None => info!("No events generated, statistics are empty"),
        }

        let table_path = results::write_table(&config.table_path, &events, stats.as_ref())?;
        let narrative_path =
            results::write_narrative(&config.docs_dir, stats.as_ref(), &table_path)?;

        let summary_path = match &config.summary_json {
            Some(path) => {
                let summary = RunSummary::new(
                    config.requests,
                    config.arrival_rate,
                    config.seed,
                    stats.as_ref(),
                );
                Some(results::write_summary_json(path, &summary)?)
            }
            None => None,
        };

        debug!("Artifacts: {:?}, {:?}", table_path, narrative_path);
        Ok(SimulationOutcome {
            events,
            stats,
            table_path,
            narrative_path,
            summary_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_args_defaults() {
        let args = Args::parse_from(["latency-sim"]);
        let config = SimulationConfig::from_args(&args).unwrap();

        assert_eq!(config.requests, crate::defaults::REQUESTS);
        assert_eq!(config.arrival_rate, crate::defaults::ARRIVAL_RATE);
        assert_eq!(config.table_path, PathBuf::from("results.csv"));
        assert_eq!(config.docs_dir, PathBuf::from("docs"));
        assert!(config.seed.is_none());
        assert!(config.summary_json.is_none());
    }

    #[test]
    fn test_from_args_rejects_bad_rate() {
        let mut args = Args::parse_from(["latency-sim"]);
        args.rate = -3.0;
        assert!(SimulationConfig::from_args(&args).is_err());
    }
}
