//! Calibration-loop arithmetic under a deterministic clock.
//!
//! Raw timing output is non-reproducible by nature, so these tests drive the
//! session with a `ManualClock` and check only the loop's arithmetic:
//! convergence towards the target sample duration, budget enforcement, and
//! terminal-state behavior.

use minibench::{BenchmarkSession, Config, ManualClock, SessionState};

/// Build a session whose time only moves when the returned clock is advanced.
fn stubbed(config: Config) -> (BenchmarkSession, ManualClock) {
    let clock = ManualClock::new();
    let session = BenchmarkSession::new()
        .with_config(config)
        .with_clock(Box::new(clock.clone()));
    (session, clock)
}

#[test]
fn repetition_count_converges_on_the_target_duration() {
    // Each repetition costs exactly 50us; the target sample is 100ms, so the
    // calibrated repetition count should settle near 2000.
    let cost = 50e-6;
    let (mut session, clock) = stubbed(Config::new(1.0, 10));

    while session.running() {
        clock.advance(cost);
    }

    assert!(!session.samples().is_empty());
    for sample in session.samples() {
        let sample_seconds = sample.repetitions as f64 * cost;
        let target = session.config().target_sample_seconds;
        assert!(
            (sample_seconds - target).abs() <= target * 0.05,
            "{} reps x {cost}s = {sample_seconds}s, target {target}s",
            sample.repetitions
        );
    }
}

#[test]
fn convergence_is_reached_from_widely_different_costs() {
    for cost in [1e-6, 1e-4, 1e-3] {
        let (mut session, clock) = stubbed(Config::new(0.05, 5));

        let mut iterations = 0u64;
        while session.running() {
            clock.advance(cost);
            iterations += 1;
            assert!(iterations < 10_000_000, "no convergence for cost {cost}");
        }

        let last = session.samples().last().expect("retained samples");
        let target = session.config().target_sample_seconds;
        let sample_seconds = last.repetitions as f64 * cost;
        assert!(
            (sample_seconds - target).abs() <= target * 0.05,
            "cost {cost}: {sample_seconds}s vs target {target}s"
        );
    }
}

#[test]
fn sample_cap_bounds_retained_samples() {
    for cap in [1, 2, 7] {
        let (mut session, clock) = stubbed(Config::with_target_sample(1e9, 0.01, cap));

        while session.running() {
            clock.advance(0.001);
        }

        assert_eq!(session.samples().len(), cap);
    }
}

#[test]
fn time_budget_bounds_total_measured_seconds() {
    let (mut session, clock) = stubbed(Config::with_target_sample(0.3, 0.05, 1000));

    while session.running() {
        clock.advance(0.01);
    }

    assert!(session.total_measured_seconds() >= 0.3);
    // At most one sample past the budget.
    assert!(session.total_measured_seconds() < 0.3 + 2.0 * 0.05 + 1e-9);
}

#[test]
fn stopped_sessions_stay_stopped() {
    let (mut session, clock) = stubbed(Config::new(0.1, 2));

    while session.running() {
        clock.advance(0.01);
    }
    assert_eq!(session.state(), SessionState::Stopped);

    let time_before = clock.seconds();
    let samples_before = session.samples().to_vec();

    for _ in 0..1000 {
        assert!(!session.running());
    }

    assert_eq!(clock.seconds(), time_before, "stopped session read the clock");
    assert_eq!(session.samples(), samples_before.as_slice());
}

#[test]
fn discarded_calibration_samples_do_not_count_towards_the_budget() {
    // 1us repetitions against a 100ms target: the early samples are all far
    // below the 0.6 retention threshold and must not appear in the store.
    let (mut session, clock) = stubbed(Config::new(1.0, 10));

    while session.running() {
        clock.advance(1e-6);
    }

    let total: f64 = session
        .samples()
        .iter()
        .map(|s| s.elapsed_seconds)
        .sum();
    assert!((total - session.total_measured_seconds()).abs() < 1e-9);

    for sample in session.samples() {
        let ratio = sample.elapsed_seconds / session.config().target_sample_seconds;
        assert!(ratio > 0.6, "retained a sample with ratio {ratio}");
    }
}

#[test]
fn per_repetition_cost_is_recovered_exactly_under_the_stub() {
    let cost = 2e-4;
    let (mut session, clock) = stubbed(Config::new(0.6, 3));

    while session.running() {
        clock.advance(cost);
    }

    let min = session.min_per_repetition().expect("samples retained");
    assert!(
        (min - cost).abs() < cost * 1e-6,
        "recovered {min}, expected {cost}"
    );
}
