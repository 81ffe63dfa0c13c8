use clap::Parser;
use std::path::PathBuf;

/// Request latency simulator - synthesizes request events and reports latency statistics
#[derive(Parser, Debug, Clone)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Number of requests to simulate
    #[clap(short = 'n', long, default_value_t = crate::defaults::REQUESTS, help_heading = "Simulation")]
    pub requests: usize,

    /// Mean arrival rate in requests per second (0 = all requests arrive at once)
    #[clap(short = 'r', long, default_value_t = crate::defaults::ARRIVAL_RATE, value_parser = parse_rate, help_heading = "Simulation")]
    pub rate: f64,

    /// Seed for a reproducible run (random when omitted)
    #[clap(long, help_heading = "Simulation")]
    pub seed: Option<u64>,

    /// Output CSV file with per-request rows and metrics
    #[clap(short = 'o', long, default_value = crate::defaults::TABLE_PATH, help_heading = "Output")]
    pub out: PathBuf,

    /// Directory for the conclusions report
    #[clap(short = 'd', long, default_value = crate::defaults::DOCS_DIR, help_heading = "Output")]
    pub docs: PathBuf,

    /// Also write a JSON summary of the run to this file
    #[clap(long, help_heading = "Output")]
    pub summary_json: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long, action = clap::ArgAction::Count, help_heading = "Logging")]
    pub verbose: u8,

    /// Only log errors
    #[clap(short = 'q', long, default_value_t = false, help_heading = "Logging")]
    pub quiet: bool,

    /// Write logs to this file in addition to stderr
    #[clap(long, help_heading = "Logging")]
    pub log_file: Option<PathBuf>,
}

/// Parse an arrival rate, rejecting negative and non-finite values
fn parse_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number for arrival rate: {}", s))?;

    crate::utils::validate_arrival_rate(rate).map_err(|e| e.to_string())?;
    Ok(rate)
}
