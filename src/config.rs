//! Session budget configuration.

/// Measurement budget for a [`BenchmarkSession`](crate::BenchmarkSession).
///
/// The session keeps timing samples until either `max_total_seconds` of
/// measured time has accumulated or `max_samples` samples have been retained,
/// whichever comes first. `target_sample_seconds` is the duration the
/// calibration loop steers each individual sample towards.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Total measured time budget in seconds (default: 1.0).
    pub max_total_seconds: f64,

    /// Maximum number of retained samples (default: 10).
    pub max_samples: usize,

    /// Target duration of one sample in seconds.
    ///
    /// Defaults to `max_total_seconds / max_samples`. Samples shorter than
    /// 0.6x this target are treated as calibration noise and discarded.
    pub target_sample_seconds: f64,
}

impl Config {
    /// Create a budget with the target sample duration derived from it.
    ///
    /// `target_sample_seconds` becomes `max_total_seconds / max_samples`, so
    /// the budget divides evenly across the requested sample count.
    pub fn new(max_total_seconds: f64, max_samples: usize) -> Self {
        Self {
            max_total_seconds,
            max_samples,
            target_sample_seconds: max_total_seconds / max_samples as f64,
        }
    }

    /// Create a budget with an explicit per-sample target duration.
    pub fn with_target_sample(
        max_total_seconds: f64,
        target_sample_seconds: f64,
        max_samples: usize,
    ) -> Self {
        Self {
            max_total_seconds,
            max_samples,
            target_sample_seconds,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(1.0, 10)
    }
}
