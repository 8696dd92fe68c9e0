//! Result types: rendered summaries, comparison outcomes, usage errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::statistics::MannWhitney;

/// Human-scaled summary of one session's measurement.
///
/// `Display` renders the one-line form
/// `"{scaled_value} {prefix}s/{unit_name} (1e{power})[ for {name}]"`,
/// e.g. `2.5 ns/iteration (1e-9) for push`. The sink is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Minimum per-repetition cost divided by the unit factor, in seconds.
    pub seconds_per_unit: f64,

    /// `seconds_per_unit` rescaled into the selected prefix's range.
    pub scaled_value: f64,

    /// SI prefix symbol, possibly empty.
    pub prefix: String,

    /// Power of ten the prefix corresponds to.
    pub power: i32,

    /// Name of the unit one iteration corresponds to.
    pub unit_name: String,

    /// The session's display label, if any.
    pub name: Option<String>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}s/{} (1e{})",
            self.scaled_value, self.prefix, self.unit_name, self.power
        )?;
        if let Some(name) = &self.name {
            write!(f, " for {name}")?;
        }
        Ok(())
    }
}

/// Outcome of comparing two sessions.
///
/// `Display` renders both summaries followed by the statistical verdict,
/// one line each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// Summary of the first session.
    pub a: Summary,

    /// Summary of the second session.
    pub b: Summary,

    /// The underlying Mann-Whitney U test.
    pub test: MannWhitney,
}

impl Comparison {
    /// Verdict line of the comparison.
    pub fn verdict(&self) -> &'static str {
        if self.test.reject_equal_medians {
            "medians differ significantly (95% confidence)"
        } else {
            "cannot reject equal medians"
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.a)?;
        writeln!(f, "{}", self.b)?;
        write!(f, "{}", self.verdict())
    }
}

/// Usage-contract violations when comparing sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    /// A session has no retained samples; the rank test is undefined on
    /// empty input.
    EmptySession {
        /// The offending session's label (or "A"/"B" if unnamed).
        name: String,
    },
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::EmptySession { name } => {
                write!(f, "session {name:?} has no samples to compare")
            }
        }
    }
}

impl std::error::Error for CompareError {}
