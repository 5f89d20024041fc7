//! The fixed credit-rating scale and rank comparisons.

/// The 22-step rating scale, best first.
pub const RATING_SCALE: [&str; 22] = [
    "AAA", "AA+", "AA", "AA-", "A+", "A", "A-", "BBB+", "BBB", "BBB-", "BB+", "BB", "BB-", "B+",
    "B", "B-", "CCC+", "CCC", "CCC-", "CC", "C", "D",
];

/// Rank of a rating label on the scale (0 = best). `None` for labels
/// outside the scale.
pub fn rank(label: &str) -> Option<usize> {
    RATING_SCALE.iter().position(|r| *r == label)
}

/// Sort key for ordering assets by consensus rating.
///
/// Unrecognized labels key after every recognized rating so they sort
/// last; callers must use a stable sort to preserve source order among
/// them.
pub fn sort_rank(label: &str) -> usize {
    rank(label).unwrap_or(RATING_SCALE.len())
}

/// Outcome of comparing a selected rating against the consensus rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingSignal {
    /// Selected rating ranks strictly better than consensus
    Improved,
    /// Selected rating ranks strictly worse than consensus
    Downgraded,
    /// Equal ranks, or either label is outside the scale
    Neutral,
}

/// Compare a selected rating to the consensus rating by scale rank.
pub fn signal(selected: &str, consensus: &str) -> RatingSignal {
    match (rank(selected), rank(consensus)) {
        (Some(s), Some(c)) if s < c => RatingSignal::Improved,
        (Some(s), Some(c)) if s > c => RatingSignal::Downgraded,
        _ => RatingSignal::Neutral,
    }
}
