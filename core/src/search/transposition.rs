use crate::puzzle::Direction;
use moka::sync::Cache;
use std::time::Duration;

/// Board, depth, and the move that led there. The incoming move decides
/// which child is skipped, so it is part of what makes two subtrees equal.
type Position = (u64, u32, Option<Direction>);

/// Bounded, expiring map from a [`Position`] to the smallest `f` seen
/// beyond the threshold when that subtree was last searched.
pub(crate) struct TranspositionCache {
    entries: Option<Cache<Position, u32>>,
}

impl TranspositionCache {
    pub(crate) fn new(capacity: u64, ttl: Duration) -> Self {
        let entries = (capacity > 0).then(|| Cache::builder().max_capacity(capacity).time_to_live(ttl).build());
        Self { entries }
    }

    /// A stored bound is only returned when it lies beyond `threshold`; a
    /// bound at or under it says nothing about the current iteration.
    pub(crate) fn bound(&self, position: Position, threshold: u32) -> Option<u32> {
        self.entries
            .as_ref()?
            .get(&position)
            .filter(|&bound| bound > threshold)
    }

    pub(crate) fn record(&self, position: Position, bound: u32) {
        if let Some(entries) = &self.entries {
            entries.insert(position, bound);
        }
    }

    pub(crate) fn clear(&self) {
        if let Some(entries) = &self.entries {
            entries.invalidate_all();
        }
    }
}
