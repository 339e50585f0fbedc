//! Maturity statistics over the review history.

use std::collections::HashSet;

use srs_core::types::Maturity;

use crate::models::ReviewSnapshot;

/// Per-bucket item counts derived from one history scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaturityCounts {
    pub new: i64,
    pub learning: i64,
    pub mature: i64,
}

/// Bucket each item by the repetition on its most recent record.
///
/// `rows` must be ordered by review date descending, so the first row seen
/// for an item is its current state; later rows for the same item are
/// older history and are skipped.
pub fn classify_history(rows: &[ReviewSnapshot]) -> MaturityCounts {
    let mut counts = MaturityCounts::default();
    let mut seen = HashSet::new();

    for row in rows {
        if !seen.insert(row.item_id) {
            continue;
        }
        let repetition = u32::try_from(row.repetition).unwrap_or(0);
        match Maturity::from_repetition(repetition) {
            Maturity::New => counts.new += 1,
            Maturity::Learning => counts.learning += 1,
            Maturity::Mature => counts.mature += 1,
        }
    }

    counts
}
