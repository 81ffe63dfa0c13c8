//! # Event Generator Module
//!
//! Produces the synthetic request stream that drives the rest of the pipeline.
//!
//! ## Random Process
//!
//! - **Arrivals**: inter-arrival gaps are exponential with rate `arrival_rate`,
//!   so arrivals form a Poisson process. A rate of zero makes every gap zero
//!   and all requests arrive at `t = 0`.
//! - **Latency**: each request independently sums a uniform processing cost,
//!   an exponential queueing/network delay and a uniform jitter term, floored
//!   at [`defaults::LATENCY_FLOOR_MS`].
//!
//! ## Randomness
//!
//! The generator owns its `StdRng`. Without a seed it is initialised from OS
//! entropy, so each run differs; with a seed the sequence is reproducible.

use crate::defaults;
use anyhow::{Context, Result};
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One simulated request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// 1-based sequence number
    pub id: u64,
    /// Arrival time in seconds since the start of the run
    pub timestamp_s: f64,
    /// Observed latency in milliseconds, never below the floor
    pub latency_ms: f64,
}

/// Latency model: processing cost + network delay + jitter, floored
#[derive(Debug, Clone)]
pub struct LatencyModel {
    base: Uniform<f64>,
    network: Exp<f64>,
    jitter: Uniform<f64>,
    floor_ms: f64,
}

impl LatencyModel {
    /// Build the model from the default constants
    pub fn new() -> Result<Self> {
        let (base_lo, base_hi) = defaults::BASE_LATENCY_MS;
        let (jitter_lo, jitter_hi) = defaults::JITTER_MS;
        let network = Exp::new(1.0 / defaults::NETWORK_MEAN_MS)
            .context("Invalid network delay distribution")?;

        Ok(Self {
            base: Uniform::new(base_lo, base_hi),
            network,
            jitter: Uniform::new(jitter_lo, jitter_hi),
            floor_ms: defaults::LATENCY_FLOOR_MS,
        })
    }

    /// Draw one latency value in milliseconds
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let base = self.base.sample(rng);
        let network = self.network.sample(rng);
        let jitter = self.jitter.sample(rng);
        (base + network + jitter).max(self.floor_ms)
    }

    /// Minimum latency this model can produce
    pub fn floor_ms(&self) -> f64 {
        self.floor_ms
    }
}

/// Event generator with an explicitly owned random source
pub struct EventGenerator {
    rng: StdRng,
    latency: LatencyModel,
}

impl EventGenerator {
    /// Create a generator, seeded when `seed` is given and from entropy otherwise
    pub fn new(seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            rng,
            latency: LatencyModel::new()?,
        })
    }

    /// Generate `count` events arriving at mean rate `arrival_rate` (req/s)
    ///
    /// ## Returns
    /// - `Ok(Vec<Event>)`: exactly `count` events, ids `1..=count`, timestamps
    ///   non-decreasing
    /// - `Err(anyhow::Error)`: `arrival_rate` is negative, NaN or infinite
    pub fn generate(&mut self, count: usize, arrival_rate: f64) -> Result<Vec<Event>> {
        crate::utils::validate_arrival_rate(arrival_rate)?;

        // A zero rate keeps every gap at zero: all arrivals coincide.
        let inter_arrival = if arrival_rate > 0.0 {
            Some(Exp::new(arrival_rate).context("Invalid arrival distribution")?)
        } else {
            None
        };

        let mut events = Vec::with_capacity(count);
        let mut t = 0.0;
        for i in 1..=count {
            if let Some(dist) = &inter_arrival {
                t += dist.sample(&mut self.rng);
            }
            let latency_ms = self.latency.sample(&mut self.rng);

            events.push(Event {
                id: i as u64,
                timestamp_s: t,
                latency_ms,
            });
        }

        debug!(
            "Generated {} events over {:.6}s at rate {}",
            events.len(),
            t,
            arrival_rate
        );
        Ok(events)
    }
}

/// Generate events with a fresh, unseeded generator
pub fn generate(count: usize, arrival_rate: f64) -> Result<Vec<Event>> {
    EventGenerator::new(None)?.generate(count, arrival_rate)
}
