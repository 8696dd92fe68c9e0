//! Mann-Whitney U test at the 5% two-sided significance level.
//!
//! Decides whether two sets of per-repetition costs come from distributions
//! with different medians. The test is rank-based and makes no normality
//! assumption, which matters for the small sample counts a benchmark
//! session produces.

use serde::{Deserialize, Serialize};

use super::rank::{rank_pooled, Source};

/// Two-sided 95% quantile of the standard normal distribution.
const Z_95_TWO_SIDED: f64 = 1.959_963_984_540_054_2;

/// Largest sample size of the bigger set covered by the table.
const TABLE_MAX_LARGER: usize = 40;

/// Largest sample size of the smaller set covered by the table.
const TABLE_MAX_SMALLER: usize = 20;

/// Critical values of U at alpha = 0.05 two-sided, flattened row by row.
///
/// The row for smaller sample size `m` holds entries for larger sizes
/// `m..=40`; `-1` marks size pairs where no rejection is possible at this
/// significance level (U is never negative, so the comparison fails).
#[rustfmt::skip]
const U_CRITICAL_05: [i32; 610] = [
    // m = 1
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, 0, 0,
    // m = 2
    -1, -1, -1, -1, -1, -1, 0, 0, 0, 0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 3,
    3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7,
    // m = 3
    -1, -1, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9,
    9, 10, 10, 11, 11, 12, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18,
    // m = 4
    0, 1, 2, 3, 4, 4, 5, 6, 7, 8, 9, 10, 11, 11, 12, 13, 14, 15, 16, 17,
    17, 18, 19, 20, 21, 22, 23, 24, 24, 25, 26, 27, 28, 29, 30, 31, 31,
    // m = 5
    2, 3, 5, 6, 7, 8, 9, 11, 12, 13, 14, 15, 17, 18, 19, 20, 22, 23, 24, 25,
    27, 28, 29, 30, 32, 33, 34, 35, 37, 38, 39, 40, 41, 43, 44, 45,
    // m = 6
    5, 6, 8, 10, 11, 13, 14, 16, 17, 19, 21, 22, 24, 25, 27, 29, 30, 32, 33, 35,
    37, 38, 40, 42, 43, 45, 46, 48, 50, 51, 53, 55, 56, 58, 59,
    // m = 7
    8, 10, 12, 14, 16, 18, 20, 22, 24, 26, 28, 30, 32, 34, 36, 38, 40, 42, 44, 46,
    48, 50, 52, 54, 56, 58, 60, 62, 64, 66, 68, 70, 72, 74,
    // m = 8
    13, 15, 17, 19, 22, 24, 26, 29, 31, 34, 36, 38, 41, 43, 45, 48, 50, 53, 55, 57,
    60, 62, 65, 67, 69, 72, 74, 77, 79, 81, 84, 86, 89,
    // m = 9
    17, 20, 23, 26, 28, 31, 34, 37, 39, 42, 45, 48, 50, 53, 56, 59, 62, 64, 67, 70,
    73, 76, 78, 81, 84, 87, 89, 92, 95, 98, 101, 103,
    // m = 10
    23, 26, 29, 33, 36, 39, 42, 45, 48, 52, 55, 58, 61, 64, 67, 71, 74, 77, 80, 83,
    87, 90, 93, 96, 99, 103, 106, 109, 112, 115, 119,
    // m = 11
    30, 33, 37, 40, 44, 47, 51, 55, 58, 62, 65, 69, 73, 76, 80, 83, 87, 90, 94, 98,
    101, 105, 108, 112, 116, 119, 123, 127, 130, 134,
    // m = 12
    37, 41, 45, 49, 53, 57, 61, 65, 69, 73, 77, 81, 85, 89, 93, 97, 101, 105, 109, 113,
    117, 121, 125, 129, 133, 137, 141, 145, 149,
    // m = 13
    45, 50, 54, 59, 63, 67, 72, 76, 80, 85, 89, 94, 98, 102, 107, 111, 116, 120, 125, 129,
    133, 138, 142, 147, 151, 156, 160, 165,
    // m = 14
    55, 59, 64, 69, 74, 78, 83, 88, 93, 98, 102, 107, 112, 117, 122, 127, 131, 136, 141, 146,
    151, 156, 161, 165, 170, 175, 180,
    // m = 15
    64, 70, 75, 80, 85, 90, 96, 101, 106, 111, 117, 122, 127, 132, 138, 143, 148, 153, 159, 164,
    169, 174, 180, 185, 190, 196,
    // m = 16
    75, 81, 86, 92, 98, 103, 109, 115, 120, 126, 132, 137, 143, 149, 154, 160, 166, 171, 177, 183,
    188, 194, 200, 206, 211,
    // m = 17
    87, 93, 99, 105, 111, 117, 123, 129, 135, 141, 147, 154, 160, 166, 172, 178, 184, 190, 196, 202,
    209, 215, 221, 227,
    // m = 18
    99, 106, 112, 119, 125, 132, 138, 145, 151, 158, 164, 171, 177, 184, 190, 197, 203, 210, 216, 223,
    230, 236, 243,
    // m = 19
    113, 119, 126, 133, 140, 147, 154, 161, 168, 175, 182, 189, 196, 203, 210, 217, 224, 231, 238, 245,
    252, 258,
    // m = 20
    127, 134, 141, 149, 156, 163, 171, 178, 186, 193, 200, 208, 215, 222, 230, 237, 245, 252, 259, 267,
    274,
];

/// Outcome of a Mann-Whitney U test over two sets of per-repetition costs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MannWhitney {
    /// The test statistic: `min(u_a, u_b)`.
    pub u: f64,

    /// U computed from set A's rank sum.
    pub u_a: f64,

    /// U computed from set B's rank sum. `u_a + u_b == n_a * n_b` exactly.
    pub u_b: f64,

    /// Size of set A.
    pub n_a: usize,

    /// Size of set B.
    pub n_b: usize,

    /// Rejection threshold for `u` at alpha = 0.05 two-sided.
    pub critical_value: f64,

    /// True if the null hypothesis "equal medians" is rejected.
    pub reject_equal_medians: bool,
}

/// Run a Mann-Whitney U test on two sets of per-repetition costs.
///
/// Rejects the null hypothesis "both distributions have equal medians" at the
/// 5% two-sided significance level when `U <= critical_value(n_a, n_b)`.
/// Symmetric in argument order.
///
/// # Panics
///
/// Panics if either input is empty; the test is undefined on empty sets and
/// callers must reject that case up front.
pub fn mann_whitney(a: &[f64], b: &[f64]) -> MannWhitney {
    assert!(!a.is_empty(), "Mann-Whitney test requires non-empty set A");
    assert!(!b.is_empty(), "Mann-Whitney test requires non-empty set B");

    let pooled = rank_pooled(a, b);

    let mut rank_a_doubled: u64 = 0;
    let mut rank_b_doubled: u64 = 0;
    for observation in &pooled {
        match observation.source {
            Source::A => rank_a_doubled += observation.rank_doubled,
            Source::B => rank_b_doubled += observation.rank_doubled,
        }
    }

    let n_a = a.len();
    let n_b = b.len();

    // Doubled rank sums are halved here, at the final summation step.
    let u_a = (n_a * n_b + n_a * (n_a + 1) / 2) as f64 - rank_a_doubled as f64 / 2.0;
    let u_b = (n_a * n_b + n_b * (n_b + 1) / 2) as f64 - rank_b_doubled as f64 / 2.0;
    let u = u_a.min(u_b);

    let critical = critical_value(n_a, n_b);

    MannWhitney {
        u,
        u_a,
        u_b,
        n_a,
        n_b,
        critical_value: critical,
        reject_equal_medians: u <= critical,
    }
}

/// Critical value of U at alpha = 0.05 two-sided for the given sample sizes.
///
/// Uses the published table where it has entries and falls back to the
/// normal approximation beyond it; the two branches agree at the boundary to
/// within two units.
pub fn critical_value(n_a: usize, n_b: usize) -> f64 {
    let (larger, smaller) = if n_a >= n_b { (n_a, n_b) } else { (n_b, n_a) };

    if larger <= TABLE_MAX_LARGER && smaller <= TABLE_MAX_SMALLER {
        // Rows are flattened densely: row `m` starts after the rows for
        // 1..m, each of length 41 - its own m.
        let idx = smaller * (83 - smaller) / 2 + larger - smaller - 41;
        U_CRITICAL_05[idx] as f64
    } else {
        let n_product = (n_a * n_b) as f64;
        let spread = (n_product * (n_a + n_b + 1) as f64 / 12.0).sqrt();
        (Z_95_TWO_SIDED * spread - n_product / 2.0).abs()
    }
}
