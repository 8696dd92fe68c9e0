//! The benchmark session: adaptive calibration loop and measurement store.

use std::time::Duration;

use crate::config::Config;
use crate::measurement::{Clock, MonotonicClock};
use crate::output::prefix::metric_prefix;
use crate::result::Summary;
use crate::types::Sample;

/// Never shrink the repetition estimate by more than 10x in one step.
///
/// An extremely fast first guess would otherwise make the estimate oscillate.
const MIN_RATIO: f64 = 0.1;

/// Samples at or below this fraction of the target duration are discarded.
///
/// They are too short to be trustworthy, but still steer the next repetition
/// estimate. Anything much above 0.6 risks never retaining a sample.
const RETAIN_RATIO: f64 = 0.6;

/// Lifecycle of a [`BenchmarkSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// `running()` has not been called yet.
    Unstarted,
    /// Timing has begun but no sample has been retained yet.
    Calibrating,
    /// At least one sample has been retained.
    Measuring,
    /// The budget is exhausted. Terminal: `running()` stays false.
    Stopped,
}

/// A single-workload measurement session.
///
/// Wrap the workload in a loop whose condition is [`running`], analogous to
/// an iterator's "has next" check:
///
/// ```no_run
/// use minibench::BenchmarkSession;
///
/// let mut bench = BenchmarkSession::new();
/// while bench.running() {
///     std::hint::black_box(2u64.pow(17));
/// }
/// ```
///
/// The loop decides, sample by sample, how many repetitions to time next so
/// each sample approaches the configured target duration. Only the countdown
/// decrement sits on the hot path; the clock is read once per sample, not
/// once per repetition, which keeps timer overhead out of the measurement.
///
/// Sessions are single-threaded and block for their whole measurement
/// duration; the only bound on wall-clock time is the configured budget.
#[derive(Debug)]
pub struct BenchmarkSession {
    name: Option<String>,
    config: Config,
    clock: Box<dyn Clock>,
    state: SessionState,
    repetitions_planned: usize,
    repetitions_remaining: usize,
    sample_start: Duration,
    samples: Vec<Sample>,
    total_measured_seconds: f64,
    unit_per_iteration: f64,
    unit_name: String,
}

impl BenchmarkSession {
    /// Create an unnamed session with the default budget (1 s, 10 samples).
    pub fn new() -> Self {
        Self {
            name: None,
            config: Config::default(),
            clock: Box::new(MonotonicClock::new()),
            state: SessionState::Unstarted,
            repetitions_planned: 0,
            repetitions_remaining: 0,
            sample_start: Duration::ZERO,
            samples: Vec::new(),
            total_measured_seconds: 0.0,
            unit_per_iteration: 1.0,
            unit_name: "iteration".to_string(),
        }
    }

    /// Set the display label used in summaries.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the measurement budget.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replace the time source.
    ///
    /// Production code keeps the default [`MonotonicClock`]; tests inject a
    /// [`ManualClock`](crate::ManualClock) to make loop arithmetic
    /// deterministic.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Should the enclosing measurement loop keep going?
    ///
    /// Call exactly once per repetition as the loop condition. Returns
    /// `false` once the session's budget is exhausted; from then on the
    /// session is read-only and further calls are clock-free no-ops.
    #[inline]
    pub fn running(&mut self) -> bool {
        // Hot path: still inside the current sample, no clock call.
        if self.repetitions_remaining > 0 {
            self.repetitions_remaining -= 1;
            return true;
        }

        if self.state == SessionState::Stopped {
            return false;
        }

        let now = self.clock.now();
        self.finish_sample(now);

        // The loop itself consumes one repetition of the new sample.
        self.repetitions_remaining = self.repetitions_planned - 1;

        if self.total_measured_seconds >= self.config.max_total_seconds
            || self.samples.len() >= self.config.max_samples
        {
            self.repetitions_planned = 0;
            self.repetitions_remaining = 0;
            self.state = SessionState::Stopped;
            return false;
        }

        // Fresh read so loop bookkeeping is excluded from the next sample.
        self.sample_start = self.clock.now();
        true
    }

    /// Close out the sample that ended at `now` and replan the next one.
    fn finish_sample(&mut self, now: Duration) {
        if self.state == SessionState::Unstarted {
            // Discard any warm-up noise and start calibrating from a single
            // repetition.
            self.samples.clear();
            self.total_measured_seconds = 0.0;
            self.repetitions_planned = 1;
            self.state = SessionState::Calibrating;
            return;
        }

        let elapsed = (now - self.sample_start).as_secs_f64();
        let mut ratio = elapsed / self.config.target_sample_seconds;

        if ratio < MIN_RATIO {
            ratio = MIN_RATIO;
        } else if ratio > RETAIN_RATIO {
            self.samples.push(Sample {
                repetitions: self.repetitions_planned,
                elapsed_seconds: elapsed,
            });
            self.total_measured_seconds += elapsed;
            self.state = SessionState::Measuring;
        }

        // Round half up; the count must never settle at zero.
        let replanned = (self.repetitions_planned as f64 / ratio + 0.5) as usize;
        self.repetitions_planned = replanned.max(1);
    }

    /// Drive the measurement loop around a closure.
    ///
    /// The closure's result is passed through [`std::hint::black_box`] so the
    /// compiler cannot optimize the workload away.
    pub fn measure<F, T>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut() -> T,
    {
        while self.running() {
            std::hint::black_box(f());
        }
        self
    }

    /// Declare the domain unit one iteration corresponds to.
    ///
    /// With `units_of_measurement("byte", 1024.0)` a summary reports seconds
    /// per byte instead of seconds per iteration. Chainable, and valid after
    /// measurement, so one loop can be reported against several unit scales.
    pub fn units_of_measurement(
        &mut self,
        name: impl Into<String>,
        unit_per_iteration: f64,
    ) -> &mut Self {
        self.unit_name = name.into();
        self.unit_per_iteration = unit_per_iteration;
        self
    }

    /// Display label, if one was set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The session's measurement budget.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Retained samples, in the order they were recorded.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sum of elapsed time over retained samples, in seconds.
    pub fn total_measured_seconds(&self) -> f64 {
        self.total_measured_seconds
    }

    /// Minimum per-repetition cost over all retained samples, in seconds.
    ///
    /// The minimum, not the mean: preemption and cache effects only ever
    /// inflate a sample, never deflate it below the true cost, so the
    /// minimum is the least-biased estimator of the intrinsic cost.
    ///
    /// `None` until at least one sample has been retained.
    pub fn min_per_repetition(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(Sample::per_repetition)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Human-scaled summary of the measurement, or `None` if no sample was
    /// retained.
    pub fn summary(&self) -> Option<Summary> {
        let seconds_per_unit = self.min_per_repetition()? / self.unit_per_iteration;
        let prefix = metric_prefix(seconds_per_unit);

        Some(Summary {
            seconds_per_unit,
            scaled_value: seconds_per_unit * prefix.factor,
            prefix: prefix.symbol.to_string(),
            power: prefix.power,
            unit_name: self.unit_name.clone(),
            name: self.name.clone(),
        })
    }
}

impl Default for BenchmarkSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::ManualClock;

    fn session_with_clock(config: Config) -> (BenchmarkSession, ManualClock) {
        let clock = ManualClock::new();
        let session = BenchmarkSession::new()
            .with_config(config)
            .with_clock(Box::new(clock.clone()));
        (session, clock)
    }

    #[test]
    fn first_call_resets_and_plans_one_repetition() {
        let (mut session, _clock) = session_with_clock(Config::new(1.0, 10));

        assert_eq!(session.state(), SessionState::Unstarted);
        assert!(session.running());
        assert_eq!(session.state(), SessionState::Calibrating);
        assert!(session.samples().is_empty());
        assert_eq!(session.total_measured_seconds(), 0.0);
    }

    #[test]
    fn short_samples_are_discarded_but_inform_replanning() {
        // Target 0.1s per sample; each repetition costs 1ms, so the first
        // single-repetition sample has ratio 0.01, clamped to 0.1, and the
        // plan grows tenfold without retaining anything.
        let (mut session, clock) = session_with_clock(Config::new(1.0, 10));

        assert!(session.running());
        clock.advance(0.001);
        assert!(session.running());

        assert!(session.samples().is_empty());
        assert_eq!(session.state(), SessionState::Calibrating);
        assert_eq!(session.repetitions_planned, 10);
    }

    #[test]
    fn plan_converges_to_target_sample_duration() {
        let cost = 0.001;
        let (mut session, clock) = session_with_clock(Config::new(1.0, 10));

        while session.running() {
            clock.advance(cost);
        }

        // Every retained sample should sit close to the 0.1s target.
        assert!(!session.samples().is_empty());
        for sample in session.samples() {
            let planned_seconds = sample.repetitions as f64 * cost;
            assert!(
                (planned_seconds - 0.1).abs() <= 0.1 * 0.05,
                "sample of {} reps ({}s) far from target",
                sample.repetitions,
                planned_seconds
            );
        }
    }

    #[test]
    fn retained_samples_record_their_repetition_count() {
        let cost = 0.001;
        let (mut session, clock) = session_with_clock(Config::new(1.0, 10));

        while session.running() {
            clock.advance(cost);
        }

        for sample in session.samples() {
            assert!(
                (sample.elapsed_seconds - sample.repetitions as f64 * cost).abs() < 1e-9,
                "elapsed should equal reps * cost under the stub clock"
            );
        }
    }

    #[test]
    fn sample_cap_is_respected() {
        let (mut session, clock) = session_with_clock(Config::new(1000.0, 3));

        let mut guard = 0u64;
        while session.running() {
            clock.advance(0.001);
            guard += 1;
            assert!(guard < 10_000_000, "loop failed to terminate");
        }

        assert_eq!(session.samples().len(), 3);
        assert_eq!(session.state(), SessionState::Stopped);
    }

    #[test]
    fn total_budget_stops_the_session() {
        // Cap far above what the budget allows, so time is the binding limit.
        let (mut session, clock) = session_with_clock(Config::new(0.5, 1000));

        while session.running() {
            clock.advance(0.001);
        }

        assert!(session.total_measured_seconds() >= 0.5);
        assert!(session.samples().len() < 1000);
        assert_eq!(session.state(), SessionState::Stopped);
    }

    #[test]
    fn stopped_is_terminal() {
        let (mut session, clock) = session_with_clock(Config::new(0.2, 2));

        while session.running() {
            clock.advance(0.001);
        }
        let samples_at_stop = session.samples().len();
        let time_at_stop = clock.seconds();

        for _ in 0..100 {
            assert!(!session.running());
        }

        // No clock reads, no new samples, no state change.
        assert_eq!(clock.seconds(), time_at_stop);
        assert_eq!(session.samples().len(), samples_at_stop);
        assert_eq!(session.state(), SessionState::Stopped);
    }

    #[test]
    fn slow_single_repetition_workload_is_retained() {
        // One repetition already exceeds the target; ratio > 0.6 on the very
        // first measured sample, so it is retained with repetitions == 1.
        let (mut session, clock) = session_with_clock(Config::new(1.0, 4));

        while session.running() {
            clock.advance(0.5);
        }

        assert!(!session.samples().is_empty());
        for sample in session.samples() {
            assert_eq!(sample.repetitions, 1);
        }
    }

    #[test]
    fn min_per_repetition_picks_the_fastest_sample() {
        let (mut session, clock) = session_with_clock(Config::new(0.4, 3));

        let mut cost = 0.2;
        while session.running() {
            clock.advance(cost);
            // Later samples get slower; the minimum must stay at 0.2.
            cost += 0.05;
        }

        let min = session.min_per_repetition().unwrap();
        assert!((min - 0.2).abs() < 1e-9, "min = {min}");
    }

    #[test]
    fn min_per_repetition_is_none_without_samples() {
        let session = BenchmarkSession::new();
        assert!(session.min_per_repetition().is_none());
        assert!(session.summary().is_none());
    }

    #[test]
    fn units_of_measurement_rescale_the_summary() {
        let (mut session, clock) = session_with_clock(Config::new(0.4, 2));

        while session.running() {
            clock.advance(0.2);
        }

        let per_iteration = session.summary().unwrap().seconds_per_unit;
        session.units_of_measurement("byte", 1024.0);
        let per_byte = session.summary().unwrap();

        assert!((per_byte.seconds_per_unit - per_iteration / 1024.0).abs() < 1e-15);
        assert_eq!(per_byte.unit_name, "byte");
    }
}
