use crate::{defaults, generator::Event, metrics::StatsSnapshot};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// p95 latency above this is considered high (ms)
pub const HIGH_P95_MS: f64 = 500.0;

/// p95 latency above this (and up to `HIGH_P95_MS`) is considered moderate (ms)
pub const MODERATE_P95_MS: f64 = 200.0;

/// Throughput below this is considered low (req/s)
pub const LOW_THROUGHPUT_RPS: f64 = 5.0;

/// Latency verdict derived from p95
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatencyAssessment {
    High,
    Moderate,
    Good,
}

impl LatencyAssessment {
    pub fn from_p95(p95_ms: f64) -> Self {
        if p95_ms > HIGH_P95_MS {
            LatencyAssessment::High
        } else if p95_ms > MODERATE_P95_MS {
            LatencyAssessment::Moderate
        } else {
            LatencyAssessment::Good
        }
    }
}

impl fmt::Display for LatencyAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatencyAssessment::High => write!(
                f,
                "p95 above 500 ms: high latency, investigate bottlenecks in the backend or network."
            ),
            LatencyAssessment::Moderate => write!(
                f,
                "p95 between 200 and 500 ms: moderate latency, optimize critical endpoints."
            ),
            LatencyAssessment::Good => write!(
                f,
                "p95 at or below 200 ms: good latency, monitor under real load."
            ),
        }
    }
}

/// Throughput verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThroughputAssessment {
    Low,
    Reasonable,
}

impl ThroughputAssessment {
    pub fn from_throughput(throughput_rps: f64) -> Self {
        if throughput_rps < LOW_THROUGHPUT_RPS {
            ThroughputAssessment::Low
        } else {
            ThroughputAssessment::Reasonable
        }
    }
}

impl fmt::Display for ThroughputAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThroughputAssessment::Low => {
                write!(f, "low throughput, check arrival rate/scaling.")
            }
            ThroughputAssessment::Reasonable => {
                write!(f, "reasonable throughput for the simulated load.")
            }
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    Ok(())
}

/// Write the CSV export: one row per event, then the metric block
///
/// Any existing file at `path` is replaced. Missing parent directories are created.
pub fn write_table(path: &Path, events: &[Event], stats: Option<&StatsSnapshot>) -> Result<PathBuf> {
    ensure_parent_dir(path)?;

    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "id,timestamp_s,latency_ms")?;
    for event in events {
        writeln!(
            out,
            "{},{:.6},{:.3}",
            event.id, event.timestamp_s, event.latency_ms
        )?;
    }

    writeln!(out)?;
    writeln!(out, "METRIC,VALUE")?;
    if let Some(stats) = stats {
        for (name, value) in stats.entries() {
            writeln!(out, "{},{}", name, value)?;
        }
    }
    out.flush()?;

    debug!("Wrote {} event rows to {:?}", events.len(), path);
    Ok(path.to_path_buf())
}

/// Render the Markdown conclusions document
pub fn render_narrative(
    stats: Option<&StatsSnapshot>,
    table_path: &Path,
    generated_at: DateTime<Utc>,
) -> String {
    let mut lines = vec![
        "# Simulation conclusions".to_string(),
        String::new(),
        format!(
            "Generated (UTC): {}",
            generated_at.to_rfc3339_opts(SecondsFormat::Micros, true)
        ),
        String::new(),
        "## Metrics summary".to_string(),
        String::new(),
    ];

    match stats {
        None => lines.push("No data available.".to_string()),
        Some(s) => {
            lines.extend([
                format!("- Simulated requests: {}", s.count),
                format!("- Approximate duration: {:.3} s", s.total_duration_s),
                format!("- Estimated throughput: {:.2} req/s", s.throughput_rps),
                format!("- Minimum latency: {:.3} ms", s.min_ms),
                format!("- Mean latency: {:.3} ms", s.mean_ms),
                format!("- Median: {:.3} ms", s.median_ms),
                format!("- p90: {:.3} ms", s.p90_ms),
                format!("- p95: {:.3} ms", s.p95_ms),
                format!("- p99: {:.3} ms", s.p99_ms),
                format!("- Maximum latency: {:.3} ms", s.max_ms),
                format!("- Standard deviation: {:.3} ms", s.stdev_ms),
                String::new(),
                "## Recommendations".to_string(),
                String::new(),
                format!("- {}", LatencyAssessment::from_p95(s.p95_ms)),
                format!("- {}", ThroughputAssessment::from_throughput(s.throughput_rps)),
            ]);
        }
    }

    lines.extend([
        String::new(),
        "## Artifacts".to_string(),
        String::new(),
        format!("- CSV with details: {}", table_path.display()),
        String::new(),
        "End of report.".to_string(),
    ]);

    lines.join("\n")
}

/// Write `conclusions.md` into `docs_dir`, creating the directory if needed
pub fn write_narrative(
    docs_dir: &Path,
    stats: Option<&StatsSnapshot>,
    table_path: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(docs_dir)
        .with_context(|| format!("Failed to create directory {:?}", docs_dir))?;

    let path = docs_dir.join(defaults::NARRATIVE_FILE);
    let document = render_narrative(stats, table_path, Utc::now());
    std::fs::write(&path, document).with_context(|| format!("Failed to write {:?}", path))?;

    debug!("Wrote narrative report to {:?}", path);
    Ok(path)
}

/// Run metadata for the JSON summary
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryMetadata {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub requests: usize,
    pub arrival_rate: f64,
    pub seed: Option<u64>,
}

/// Machine-readable summary of one run
#[derive(Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub metadata: SummaryMetadata,
    pub statistics: Option<StatsSnapshot>,
    pub latency_assessment: Option<LatencyAssessment>,
    pub throughput_assessment: Option<ThroughputAssessment>,
}

impl RunSummary {
    pub fn new(
        requests: usize,
        arrival_rate: f64,
        seed: Option<u64>,
        stats: Option<&StatsSnapshot>,
    ) -> Self {
        Self {
            metadata: SummaryMetadata {
                version: crate::VERSION.to_string(),
                timestamp: Utc::now(),
                requests,
                arrival_rate,
                seed,
            },
            statistics: stats.cloned(),
            latency_assessment: stats.map(|s| LatencyAssessment::from_p95(s.p95_ms)),
            throughput_assessment: stats
                .map(|s| ThroughputAssessment::from_throughput(s.throughput_rps)),
        }
    }
}

/// Write the pretty-printed JSON summary
pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<PathBuf> {
    ensure_parent_dir(path)?;

    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;

    info!("JSON summary written to: {:?}", path);
    Ok(path.to_path_buf())
}
