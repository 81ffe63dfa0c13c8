use crate::defaults;
use crate::generator::Event;
use crate::utils;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single metric value, tagged by numeric kind
///
/// Floats render with 6 decimals; integers render verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Integer(v) => write!(f, "{}", v),
            MetricValue::Float(v) => write!(f, "{:.6}", v),
        }
    }
}

/// Aggregate statistics for one completed event sequence
///
/// Latency fields are in milliseconds. For any snapshot built by [`aggregate`]
/// `min_ms <= median_ms <= p90_ms <= p95_ms <= p99_ms <= max_ms` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub count: usize,
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p90_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub stdev_ms: f64,
    pub throughput_rps: f64,
    pub total_duration_s: f64,
}

impl StatsSnapshot {
    /// Metric name/value pairs in report order
    pub fn entries(&self) -> Vec<(&'static str, MetricValue)> {
        vec![
            ("count", MetricValue::Integer(self.count as i64)),
            ("min_ms", MetricValue::Float(self.min_ms)),
            ("max_ms", MetricValue::Float(self.max_ms)),
            ("mean_ms", MetricValue::Float(self.mean_ms)),
            ("median_ms", MetricValue::Float(self.median_ms)),
            ("p90_ms", MetricValue::Float(self.p90_ms)),
            ("p95_ms", MetricValue::Float(self.p95_ms)),
            ("p99_ms", MetricValue::Float(self.p99_ms)),
            ("stdev_ms", MetricValue::Float(self.stdev_ms)),
            ("throughput_rps", MetricValue::Float(self.throughput_rps)),
            ("total_duration_s", MetricValue::Float(self.total_duration_s)),
        ]
    }
}

/// Observed span of a run in seconds
///
/// From the first arrival to the completion of the last request, floored at
/// [`defaults::MIN_DURATION_S`].
pub fn observed_duration_s(first: &Event, last: &Event) -> f64 {
    let span = (last.timestamp_s + last.latency_ms / 1000.0) - first.timestamp_s;
    span.max(defaults::MIN_DURATION_S)
}

/// Compute the statistics snapshot for an event sequence
///
/// Returns `None` for an empty sequence; that is the "no data" case, not an error.
pub fn aggregate(events: &[Event]) -> Option<StatsSnapshot> {
    let (first, last) = (events.first()?, events.last()?);

    let latencies: Vec<f64> = events.iter().map(|e| e.latency_ms).collect();
    let mut sorted = latencies.clone();
    sorted.sort_by(f64::total_cmp);

    let count = events.len();
    let total_duration_s = observed_duration_s(first, last);

    Some(StatsSnapshot {
        count,
        min_ms: sorted[0],
        max_ms: sorted[count - 1],
        mean_ms: utils::mean(&latencies)?,
        median_ms: utils::median(&sorted)?,
        p90_ms: utils::percentile(&sorted, 90.0)?,
        p95_ms: utils::percentile(&sorted, 95.0)?,
        p99_ms: utils::percentile(&sorted, 99.0)?,
        stdev_ms: utils::sample_std_dev(&latencies),
        throughput_rps: count as f64 / total_duration_s,
        total_duration_s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::EventGenerator;

    fn event(id: u64, timestamp_s: f64, latency_ms: f64) -> Event {
        Event {
            id,
            timestamp_s,
            latency_ms,
        }
    }

    #[test]
    fn test_empty_sequence_has_no_stats() {
        assert!(aggregate(&[]).is_none());
    }

    #[test]
    fn test_single_event() {
        let stats = aggregate(&[event(1, 0.0, 40.0)]).unwrap();

        assert_eq!(stats.count, 1);
        assert_eq!(stats.stdev_ms, 0.0);
        assert_eq!(stats.min_ms, 40.0);
        assert_eq!(stats.max_ms, 40.0);
        assert_eq!(stats.p99_ms, 40.0);
        assert!((stats.total_duration_s - 0.04).abs() < 1e-12);
        assert!(stats.total_duration_s >= defaults::MIN_DURATION_S);
    }

    #[test]
    fn test_known_sequence() {
        let events = vec![
            event(1, 0.0, 25.0),
            event(2, 0.5, 30.0),
            event(3, 1.2, 20.0),
        ];
        let stats = aggregate(&events).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.min_ms, 20.0);
        assert_eq!(stats.max_ms, 30.0);
        assert_eq!(stats.mean_ms, 25.0);
        assert_eq!(stats.median_ms, 25.0);
        // rank k = 2 * 0.9 = 1.8 between 25 and 30
        assert!((stats.p90_ms - 29.0).abs() < 1e-9);
        assert!((stats.p95_ms - 29.5).abs() < 1e-9);
        assert!((stats.p99_ms - 29.9).abs() < 1e-9);
        assert!((stats.stdev_ms - 5.0).abs() < 1e-9);
        // 1.2s arrival + 20ms latency
        assert!((stats.total_duration_s - 1.22).abs() < 1e-9);
        assert!((stats.throughput_rps - 3.0 / 1.22).abs() < 1e-9);
    }

    #[test]
    fn test_coincident_zero_latency_span_is_floored() {
        // Latencies are floored in generation; a hand-built zero span still
        // must not divide by zero.
        let events = vec![event(1, 2.0, 0.0), event(2, 2.0, 0.0)];
        let stats = aggregate(&events).unwrap();
        assert_eq!(stats.total_duration_s, defaults::MIN_DURATION_S);
        assert!((stats.throughput_rps - 2.0e6).abs() < 1e-3);
    }

    #[test]
    fn test_percentile_ladder_holds_for_generated_runs() {
        let mut generator = EventGenerator::new(Some(2024)).unwrap();
        for (count, rate) in [(1, 5.0), (2, 0.0), (17, 3.0), (500, 20.0), (5000, 200.0)] {
            let events = generator.generate(count, rate).unwrap();
            let s = aggregate(&events).unwrap();

            assert_eq!(s.count, count);
            assert!(s.min_ms <= s.median_ms);
            assert!(s.median_ms <= s.p90_ms);
            assert!(s.p90_ms <= s.p95_ms);
            assert!(s.p95_ms <= s.p99_ms);
            assert!(s.p99_ms <= s.max_ms);
            assert!(s.total_duration_s >= defaults::MIN_DURATION_S);
        }
    }

    #[test]
    fn test_entries_order_and_formatting() {
        let stats = aggregate(&[event(1, 0.0, 12.5), event(2, 1.0, 17.5)]).unwrap();
        let entries = stats.entries();

        let names: Vec<&str> = entries.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "count",
                "min_ms",
                "max_ms",
                "mean_ms",
                "median_ms",
                "p90_ms",
                "p95_ms",
                "p99_ms",
                "stdev_ms",
                "throughput_rps",
                "total_duration_s",
            ]
        );
        assert_eq!(entries[0].1.to_string(), "2");
        assert_eq!(entries[1].1.to_string(), "12.500000");
        assert_eq!(entries[3].1, MetricValue::Float(15.0));
        assert_eq!(entries[0].1, MetricValue::Integer(2));
    }
}
