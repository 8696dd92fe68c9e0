//! Shared value types.

use serde::{Deserialize, Serialize};

/// One timed batch of repetitions, immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// How many repetitions of the workload this sample timed. Always >= 1.
    pub repetitions: usize,

    /// Wall-clock duration of the whole batch in seconds.
    pub elapsed_seconds: f64,
}

impl Sample {
    /// Cost of a single repetition in seconds.
    pub fn per_repetition(&self) -> f64 {
        self.elapsed_seconds / self.repetitions as f64
    }
}
