//! Statistical comparison of two measurement runs.
//!
//! Sample counts in a benchmark session are small and nothing guarantees the
//! timing noise is normal, so the comparison uses a distribution-free rank
//! test (Mann-Whitney U) rather than a t-test: pooled ranking with exact
//! averaged tie handling, then the U statistic and its critical-value
//! decision ([`mann_whitney`]).

mod mann_whitney;
mod rank;

pub use mann_whitney::{critical_value, mann_whitney, MannWhitney};
