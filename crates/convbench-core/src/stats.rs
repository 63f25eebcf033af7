//! Per-iteration timing statistics for the benchmark harness.

use serde::Serialize;
use std::time::Duration;

/// Mean, population variance and standard deviation of per-iteration
/// wall-clock durations, in microseconds.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TimingStats {
    pub iterations: usize,
    pub mean_us: f64,
    pub variance_us2: f64,
    pub std_dev_us: f64,
}

impl TimingStats {
    /// Summarize a sequence of per-iteration durations in microseconds.
    ///
    /// Variance is the population variance (divide by `n`, not `n - 1`).
    pub fn from_micros(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples
            .iter()
            .map(|&s| {
                let d = s - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        Some(Self {
            iterations: samples.len(),
            mean_us: mean,
            variance_us2: variance,
            std_dev_us: variance.sqrt(),
        })
    }

    /// Summarize a sequence of measured durations.
    pub fn from_durations(samples: &[Duration]) -> Option<Self> {
        let micros: Vec<f64> = samples
            .iter()
            .map(|d| d.as_secs_f64() * 1_000_000.0)
            .collect();
        Self::from_micros(&micros)
    }
}
