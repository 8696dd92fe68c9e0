//! Monotonic time sources.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonically increasing time source.
///
/// Implementations must never go backwards between calls. The calibration
/// loop reads the clock only at sample boundaries, so one call per sample
/// is the entire overhead budget.
pub trait Clock: fmt::Debug {
    /// Current time as an offset from an arbitrary fixed origin.
    fn now(&mut self) -> Duration;
}

/// Wall-clock source backed by [`std::time::Instant`].
///
/// `Instant` is the highest-resolution monotonic clock the standard library
/// offers; its origin is fixed at construction.
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock anchored at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Deterministic clock for testing loop arithmetic.
///
/// Time only moves when [`advance`](ManualClock::advance) is called. Clones
/// share the same underlying time, so a test can hold one handle while the
/// session under test owns another:
///
/// ```
/// use minibench::{BenchmarkSession, Config, ManualClock};
///
/// let clock = ManualClock::new();
/// let mut bench = BenchmarkSession::new()
///     .with_config(Config::new(1.0, 5))
///     .with_clock(Box::new(clock.clone()));
///
/// while bench.running() {
///     clock.advance(0.001); // every repetition costs exactly 1ms
/// }
/// assert!(bench.samples().len() <= 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    seconds: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock starting at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `seconds`.
    pub fn advance(&self, seconds: f64) {
        self.seconds.set(self.seconds.get() + seconds);
    }

    /// Current time in seconds.
    pub fn seconds(&self) -> f64 {
        self.seconds.get()
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> Duration {
        Duration::from_secs_f64(self.seconds.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let mut clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn manual_clock_shares_time_across_clones() {
        let clock = ManualClock::new();
        let mut handle: Box<dyn Clock> = Box::new(clock.clone());

        assert_eq!(handle.now(), Duration::ZERO);
        clock.advance(1.5);
        assert_eq!(handle.now(), Duration::from_secs_f64(1.5));
    }
}
