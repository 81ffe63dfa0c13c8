//! # Request Latency Simulator Library
//!
//! An offline analysis utility that synthesizes a stream of request events,
//! derives latency and throughput statistics from it, and writes a CSV export
//! together with a Markdown report carrying simple heuristic recommendations.
//!
//! ## Pipeline
//!
//! The library is a strictly linear, single-pass pipeline:
//!
//! 1. **Generate**: draw arrival times and latencies from a stochastic model
//! 2. **Aggregate**: compute count, latency percentiles, mean, stdev and throughput
//! 3. **Report**: write the tabular export and the narrative document
//!
//! ## Architecture Overview
//!
//! - `generator`: event model and the random process that produces events
//! - `metrics`: statistics snapshot and aggregation
//! - `results`: CSV, Markdown and JSON writers plus recommendation heuristics
//! - `simulation`: validated configuration and the pipeline runner
//! - `cli`: command-line interface parsing
//! - `logging`: tracing subscriber setup
//! - `utils`: statistical helpers and input validation
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use latency_sim::{SimulationConfig, SimulationRunner};
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = SimulationConfig {
//!         requests: 1000,
//!         arrival_rate: 50.0,
//!         table_path: PathBuf::from("out/results.csv"),
//!         docs_dir: PathBuf::from("out/docs"),
//!         seed: Some(7),
//!         summary_json: None,
//!     };
//!
//!     let outcome = SimulationRunner::new(config).run()?;
//!     if let Some(stats) = &outcome.stats {
//!         println!("p95 latency: {:.3} ms", stats.p95_ms);
//!     }
//!     Ok(())
//! }
//! ```

/// Synthetic request events
///
/// Holds the `Event` record and the `EventGenerator`, which owns an explicit
/// random source so runs can be made reproducible by passing a seed.
pub mod generator;

/// Command-line interface
///
/// Argument parsing with clap and value parsers for numeric options.
pub mod cli;

pub mod logging;

/// Statistical aggregation
///
/// Turns an event sequence into a `StatsSnapshot`:
/// - Latency min/max/mean/median and sample standard deviation
/// - Interpolated P90, P95 and P99 latencies
/// - Throughput over the observed span of the run
pub mod metrics;

/// Report artifacts
///
/// Writers for the CSV export, the Markdown conclusions document and the
/// optional JSON summary, along with the p95/throughput recommendation rules.
pub mod results;

/// Pipeline orchestration
///
/// `SimulationConfig` validates user input and `SimulationRunner` drives
/// generate → aggregate → report.
pub mod simulation;

pub mod utils;

pub use cli::Args;
pub use generator::{Event, EventGenerator, LatencyModel};
pub use metrics::{aggregate, MetricValue, StatsSnapshot};
pub use results::{write_narrative, write_table, LatencyAssessment, ThroughputAssessment};
pub use simulation::{SimulationConfig, SimulationOutcome, SimulationRunner};

/// The current version of the latency simulator
///
/// Populated from Cargo.toml and embedded in the JSON summary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Default number of simulated requests
    pub const REQUESTS: usize = 500;

    /// Default mean arrival rate in requests per second
    ///
    /// Inter-arrival times are exponential with mean `1 / ARRIVAL_RATE` seconds.
    pub const ARRIVAL_RATE: f64 = 20.0;

    /// Default CSV export path
    pub const TABLE_PATH: &str = "results.csv";

    /// Default directory for the narrative report
    pub const DOCS_DIR: &str = "docs";

    /// File name of the narrative report inside the docs directory
    pub const NARRATIVE_FILE: &str = "conclusions.md";

    /// Processing cost bounds in milliseconds, drawn uniformly
    pub const BASE_LATENCY_MS: (f64, f64) = (20.0, 50.0);

    /// Mean of the exponential queueing/network delay in milliseconds
    pub const NETWORK_MEAN_MS: f64 = 30.0;

    /// Jitter bounds in milliseconds, drawn uniformly
    pub const JITTER_MS: (f64, f64) = (-5.0, 20.0);

    /// Minimum observable latency in milliseconds
    pub const LATENCY_FLOOR_MS: f64 = 1.0;

    /// Lower bound on the observed run span, guards the throughput division
    pub const MIN_DURATION_S: f64 = 1e-6;
}
