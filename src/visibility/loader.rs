//! Incremental loading from a point source into the index

use crate::spatial::PointOctree;
use super::source::PointSource;

/// Result of one load step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Loaded count after the step
    pub loaded_count: usize,
    /// Points read from the source during this step
    pub taken: usize,
    /// Points the index accepted
    pub inserted: usize,
    /// Points the index rejected (outside the root boundary or non-finite)
    pub rejected: usize,
}

/// Where a session stands relative to its load cap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded yet, more is available
    Empty,
    /// Some points loaded, more could be
    PartiallyLoaded(usize),
    /// Loaded count reached the source size or the target cap
    FullyLoaded(usize),
}

impl LoadState {
    /// Classify `loaded_count` against the source size and the target cap
    pub fn classify(loaded_count: usize, total_available: usize, target_count: usize) -> Self {
        if loaded_count >= total_available.min(target_count) {
            LoadState::FullyLoaded(loaded_count)
        } else if loaded_count == 0 {
            LoadState::Empty
        } else {
            LoadState::PartiallyLoaded(loaded_count)
        }
    }

    pub fn is_fully_loaded(&self) -> bool {
        matches!(self, LoadState::FullyLoaded(_))
    }
}

/// Admit the next `target_count - loaded_count` points from `source`.
///
/// Reads continue where `loaded_count` left off, in source order, clamped to
/// what the source holds. A non-positive shortfall or an exhausted source is a
/// no-op. Rejected inserts still count as loaded: they were consumed from the
/// source and are never re-read.
///
/// # Arguments
/// * `index` - Octree receiving the points
/// * `source` - Ordered point source
/// * `loaded_count` - Points already taken from `source`
/// * `target_count` - Cumulative cap on points taken
pub fn check_and_load_more_stars<P, S>(
    index: &mut PointOctree<P>,
    source: &S,
    loaded_count: usize,
    target_count: usize,
) -> LoadOutcome
where
    S: PointSource<Payload = P> + ?Sized,
{
    let mut outcome = LoadOutcome {
        loaded_count,
        ..Default::default()
    };

    let to_load = target_count.saturating_sub(loaded_count);
    if to_load == 0 {
        return outcome;
    }

    let batch = source.points(loaded_count, to_load);
    outcome.taken = batch.len();

    for point in batch {
        if index.insert(point) {
            outcome.inserted += 1;
        } else {
            outcome.rejected += 1;
        }
    }
    outcome.loaded_count = loaded_count + outcome.taken;

    if outcome.taken > 0 {
        log::debug!(
            "Loaded {} points ({} rejected), {} / {} taken from source",
            outcome.inserted,
            outcome.rejected,
            outcome.loaded_count,
            source.total_available(),
        );
    }
    if outcome.rejected > 0 {
        log::warn!(
            "{} points fell outside the index boundary and were dropped",
            outcome.rejected
        );
    }

    outcome
}
