//! Pooled ranking with averaged tie ranks.

/// Which input set a pooled observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    A,
    B,
}

/// A per-repetition value tagged with its origin and assigned rank.
///
/// Ranks are 1-based and stored doubled: the averaged rank of a tie block is
/// a multiple of one half, so doubling keeps every rank an exact integer.
/// Halve only after summation, never per element.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RankedObservation {
    pub value: f64,
    pub source: Source,
    pub rank_doubled: u64,
}

/// Pool two value sets, sort ascending, and assign doubled ranks.
///
/// Tied values all receive the averaged rank of their tie block.
pub(crate) fn rank_pooled(a: &[f64], b: &[f64]) -> Vec<RankedObservation> {
    let mut pooled: Vec<RankedObservation> = a
        .iter()
        .map(|&value| (value, Source::A))
        .chain(b.iter().map(|&value| (value, Source::B)))
        .map(|(value, source)| RankedObservation {
            value,
            source,
            rank_doubled: 0,
        })
        .collect();

    pooled.sort_by(|x, y| x.value.total_cmp(&y.value));

    // Walk tie blocks [back, front): once the value changes (or the end is
    // reached), every element of the block gets the block's averaged rank.
    // With 0-based indices the averaged 1-based rank is (back+1 + front) / 2,
    // so its doubled form is back + front + 1.
    let mut back = 0;
    let mut front = 1;
    while front <= pooled.len() {
        if front == pooled.len() || pooled[back].value != pooled[front].value {
            let rank_doubled = (back + front + 1) as u64;
            for observation in &mut pooled[back..front] {
                observation.rank_doubled = rank_doubled;
            }
            back = front;
        }
        front += 1;
    }

    pooled
}
