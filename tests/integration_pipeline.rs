use anyhow::Result;
use latency_sim::{SimulationConfig, SimulationRunner};
use tempfile::tempdir;

fn config_in(dir: &std::path::Path, requests: usize, arrival_rate: f64) -> SimulationConfig {
    SimulationConfig {
        requests,
        arrival_rate,
        table_path: dir.join("out/results.csv"),
        docs_dir: dir.join("docs"),
        seed: Some(17),
        summary_json: Some(dir.join("out/summary.json")),
    }
}

/// Full run with default-sized load writes every artifact.
#[test]
fn pipeline_writes_all_artifacts() -> Result<()> {
    let dir = tempdir()?;
    let outcome = SimulationRunner::new(config_in(dir.path(), 500, 20.0)).run()?;

    assert_eq!(outcome.events.len(), 500);
    let stats = outcome.stats.as_ref().expect("stats for non-empty run");
    assert_eq!(stats.count, 500);
    assert!(stats.min_ms <= stats.p90_ms && stats.p99_ms <= stats.max_ms);

    let table = std::fs::read_to_string(&outcome.table_path)?;
    assert!(table.starts_with("id,timestamp_s,latency_ms\n"));
    assert!(table.contains("\n\nMETRIC,VALUE\ncount,500\n"));

    let narrative = std::fs::read_to_string(&outcome.narrative_path)?;
    assert_eq!(outcome.narrative_path, dir.path().join("docs/conclusions.md"));
    assert!(narrative.contains("## Recommendations"));
    assert!(narrative.contains(&format!(
        "- CSV with details: {}",
        outcome.table_path.display()
    )));

    let summary = outcome.summary_path.expect("summary requested");
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(summary)?)?;
    assert_eq!(json["metadata"]["requests"], 500);
    assert_eq!(json["statistics"]["count"], 500);
    Ok(())
}

/// Zero requests flow through as "no data" rather than an error.
#[test]
fn pipeline_with_no_requests_reports_no_data() -> Result<()> {
    let dir = tempdir()?;
    let outcome = SimulationRunner::new(config_in(dir.path(), 0, 20.0)).run()?;

    assert!(outcome.events.is_empty());
    assert!(outcome.stats.is_none());

    let narrative = std::fs::read_to_string(&outcome.narrative_path)?;
    assert!(narrative.contains("No data available."));
    assert!(!narrative.contains("p95"));

    let table = std::fs::read_to_string(&outcome.table_path)?;
    assert_eq!(table, "id,timestamp_s,latency_ms\n\nMETRIC,VALUE\n");
    Ok(())
}

/// The same seed yields byte-identical tables.
#[test]
fn seeded_runs_are_reproducible() -> Result<()> {
    let first = tempdir()?;
    let second = tempdir()?;

    let a = SimulationRunner::new(config_in(first.path(), 200, 5.0)).run()?;
    let b = SimulationRunner::new(config_in(second.path(), 200, 5.0)).run()?;

    assert_eq!(a.events, b.events);
    assert_eq!(
        std::fs::read_to_string(&a.table_path)?,
        std::fs::read_to_string(&b.table_path)?
    );
    Ok(())
}

/// A zero arrival rate puts every request at t = 0; the run still completes.
#[test]
fn zero_arrival_rate_is_degenerate_but_valid() -> Result<()> {
    let dir = tempdir()?;
    let outcome = SimulationRunner::new(config_in(dir.path(), 25, 0.0)).run()?;

    assert!(outcome.events.iter().all(|e| e.timestamp_s == 0.0));
    let stats = outcome.stats.expect("stats");
    let max_latency_s = stats.max_ms / 1000.0;
    let last_latency_s = outcome.events[24].latency_ms / 1000.0;
    assert!((stats.total_duration_s - last_latency_s).abs() < 1e-12);
    assert!(stats.total_duration_s <= max_latency_s);
    Ok(())
}

/// Re-running into the same locations replaces prior artifacts.
#[test]
fn rerun_overwrites_artifacts() -> Result<()> {
    let dir = tempdir()?;
    SimulationRunner::new(config_in(dir.path(), 300, 20.0)).run()?;
    let outcome = SimulationRunner::new(config_in(dir.path(), 3, 20.0)).run()?;

    let table = std::fs::read_to_string(&outcome.table_path)?;
    let event_rows = table
        .lines()
        .skip(1)
        .take_while(|line| !line.is_empty())
        .count();
    assert_eq!(event_rows, 3);
    Ok(())
}
