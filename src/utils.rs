//! # Utility Functions and Helper Module
//!
//! Statistical helpers and input validation shared by the aggregation and
//! configuration code.
//!
//! ## Key Functionality Categories
//!
//! - **Statistics**: interpolated percentiles, mean, median, sample standard deviation
//! - **Validation**: input parameter checks with clear error messages
//! - **Formatting**: human-readable request rates for log output
//!
//! ## Usage Examples
//!
//! ```rust
//! use latency_sim::utils::*;
//!
//! let sorted = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! assert!((percentile(&sorted, 95.0).unwrap() - 4.8).abs() < 1e-12);
//! assert_eq!(median(&sorted), Some(3.0));
//!
//! # fn main() -> anyhow::Result<()> {
//! validate_arrival_rate(20.0)?; // OK
//! # Ok(())
//! # }
//! ```

use anyhow::Result;

/// Percentile of an ascending-sorted slice using linear interpolation
///
/// ## Parameters
/// - `sorted_values`: values sorted in ascending order
/// - `p`: percentile level, clamped to `0.0..=100.0`
///
/// ## Algorithm Details
///
/// 1. **Rank**: for percentile P over N values, rank k = (N-1) * P/100
/// 2. **Exact**: if floor(k) == ceil(k), return that order statistic
/// 3. **Interpolation**: otherwise v[f] * (c - k) + v[c] * (k - f), with f and c
///    the floor and ceiling of k, kept within [v[f], v[c]]
///
/// P0 therefore returns the minimum and P100 the maximum.
///
/// ## Returns
/// `None` for an empty slice.
///
/// ## Examples
///
/// ```rust
/// # use latency_sim::utils::percentile;
/// let values = vec![10.0, 20.0, 30.0, 40.0];
/// assert_eq!(percentile(&values, 0.0), Some(10.0));
/// assert_eq!(percentile(&values, 50.0), Some(25.0));
/// assert_eq!(percentile(&values, 100.0), Some(40.0));
/// ```
pub fn percentile(sorted_values: &[f64], p: f64) -> Option<f64> {
    if sorted_values.is_empty() {
        return None;
    }

    let p = p.clamp(0.0, 100.0);
    let index = (sorted_values.len() - 1) as f64 * (p / 100.0);
    let lower_index = index.floor() as usize;
    let upper_index = index.ceil() as usize;

    if lower_index == upper_index {
        Some(sorted_values[lower_index])
    } else {
        let lower_value = sorted_values[lower_index];
        let upper_value = sorted_values[upper_index];
        let interpolated = lower_value * (upper_index as f64 - index)
            + upper_value * (index - lower_index as f64);
        // Rounding in the two-term sum must not escape the bracketing pair.
        Some(interpolated.max(lower_value).min(upper_value))
    }
}

/// Arithmetic mean, `None` when empty
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of an ascending-sorted slice
///
/// Returns the middle element for odd lengths and the average of the two
/// middle elements for even lengths.
pub fn median(sorted_values: &[f64]) -> Option<f64> {
    let n = sorted_values.len();
    if n == 0 {
        return None;
    }

    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted_values[mid])
    } else {
        Some((sorted_values[mid - 1] + sorted_values[mid]) / 2.0)
    }
}

/// Sample standard deviation
///
/// Uses the sample (Bessel-corrected) formula:
/// s = √(Σ(x - x̄)² / (N - 1))
///
/// Defined as 0.0 when fewer than two values are present, where the sample
/// variance is undefined.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1.0);
    variance.sqrt()
}

/// Validate a mean arrival rate in requests per second
///
/// ## Validation Rules
///
/// - **Finite**: NaN and infinities are rejected
/// - **Non-negative**: zero is accepted and means all requests arrive at once
///
/// ## Returns
/// - `Ok(())`: rate is usable
/// - `Err(anyhow::Error)`: rate is invalid with descriptive error
pub fn validate_arrival_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() {
        anyhow::bail!("Arrival rate must be a finite number, got {}", rate);
    }
    if rate < 0.0 {
        anyhow::bail!("Arrival rate {} cannot be negative", rate);
    }
    Ok(())
}

/// Format a request rate for human-readable output
///
/// ```rust
/// # use latency_sim::utils::format_request_rate;
/// assert_eq!(format_request_rate(12.345), "12.35 req/s");
/// assert_eq!(format_request_rate(1500.0), "1.50K req/s");
/// ```
pub fn format_request_rate(requests_per_second: f64) -> String {
    if requests_per_second < 1000.0 {
        format!("{:.2} req/s", requests_per_second)
    } else if requests_per_second < 1_000_000.0 {
        format!("{:.2}K req/s", requests_per_second / 1000.0)
    } else {
        format!("{:.2}M req/s", requests_per_second / 1_000_000.0)
    }
}
