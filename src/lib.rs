//! # minibench
//!
//! Simple adaptive micro-benchmarks with a statistically sound comparison.
//!
//! This crate measures the wall-clock cost of a repeated operation despite
//! timer-resolution noise and OS jitter, and compares two such measurements
//! with a Mann-Whitney U test to decide whether their performance differs
//! meaningfully rather than by chance.
//!
//! Two pieces do the heavy lifting:
//! - an adaptive calibration loop that picks how many repetitions to time per
//!   sample so each sample lands near a target duration, keeping timer calls
//!   off the hot path;
//! - a nonparametric rank test (Mann-Whitney U) over the per-repetition
//!   costs of two finished sessions, reporting whether their medians differ
//!   at the 5% two-sided significance level.
//!
//! ## Quick Start
//!
//! ```no_run
//! use minibench::BenchmarkSession;
//!
//! let mut bench = BenchmarkSession::new().named("push");
//! let mut v = Vec::new();
//! while bench.running() {
//!     v.push(123u64);
//!     v.clear();
//! }
//!
//! if let Some(summary) = bench.summary() {
//!     println!("{summary}");
//! }
//! ```
//!
//! ## Comparing two workloads
//!
//! ```no_run
//! use minibench::{compare, BenchmarkSession};
//!
//! let mut a = BenchmarkSession::new().named("Vec<u64>");
//! a.measure(|| {
//!     let mut v: Vec<u64> = Vec::new();
//!     v.push(123);
//!     v
//! });
//!
//! let mut b = BenchmarkSession::new().named("Vec<bool>");
//! b.measure(|| {
//!     let mut v: Vec<bool> = Vec::new();
//!     v.push(false);
//!     v
//! });
//!
//! println!("{}", compare(&a, &b).unwrap());
//! ```
//!
//! Timing output is inherently noisy and non-reproducible; the comparison
//! exists precisely because raw numbers cannot be trusted on their own. Tests
//! of the loop and rank arithmetic should drive the session with a
//! [`ManualClock`] instead of the real clock.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod result;
mod session;
mod types;

pub mod measurement;
pub mod output;
pub mod statistics;

pub use config::Config;
pub use measurement::{Clock, ManualClock, MonotonicClock};
pub use result::{CompareError, Comparison, Summary};
pub use session::{BenchmarkSession, SessionState};
pub use statistics::MannWhitney;
pub use types::Sample;

/// Compare two finished sessions with a Mann-Whitney U test.
///
/// Produces both sessions' rendered summaries plus the statistical verdict:
/// whether the null hypothesis "the per-repetition cost distributions have
/// equal medians" can be rejected at the 5% two-sided level.
///
/// The verdict is symmetric in operand order.
///
/// # Errors
///
/// Returns [`CompareError::EmptySession`] if either session has no retained
/// samples; the test is undefined on empty input and is never silently
/// computed.
pub fn compare(a: &BenchmarkSession, b: &BenchmarkSession) -> Result<Comparison, CompareError> {
    let (summary_a, values_a) = comparison_inputs(a, "A")?;
    let (summary_b, values_b) = comparison_inputs(b, "B")?;

    let test = statistics::mann_whitney(&values_a, &values_b);

    Ok(Comparison {
        a: summary_a,
        b: summary_b,
        test,
    })
}

fn comparison_inputs(
    session: &BenchmarkSession,
    fallback_name: &str,
) -> Result<(Summary, Vec<f64>), CompareError> {
    let summary = session.summary().ok_or_else(|| CompareError::EmptySession {
        name: session.name().unwrap_or(fallback_name).to_string(),
    })?;

    let values = session
        .samples()
        .iter()
        .map(Sample::per_repetition)
        .collect();

    Ok((summary, values))
}
