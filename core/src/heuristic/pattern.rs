use super::{Predictor, manhattan_distance};
use crate::error::PuzzleError;
use crate::pattern::PatternHeuristic;
use crate::puzzle::Board;
use moka::sync::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

const LOOKUP_CACHE_CAPACITY: u64 = 100_000;
const LOOKUP_CACHE_TTL: Duration = Duration::from_secs(300);

/// Predictor backed by a pattern table or a disjoint composite.
///
/// Bounds are cached per board. Queries against another goal, as the backward
/// pass of a bidirectional search makes, are answered with plain Manhattan.
/// A lookup the table rejects (different board size) is logged, counted and
/// also answered with Manhattan.
pub struct PatternPredictor {
    source: Arc<dyn PatternHeuristic>,
    cache: Cache<u64, u32>,
    fallbacks: AtomicU64,
}

impl PatternPredictor {
    pub fn new(source: Arc<dyn PatternHeuristic>) -> Self {
        Self {
            source,
            cache: Cache::builder()
                .max_capacity(LOOKUP_CACHE_CAPACITY)
                .time_to_live(LOOKUP_CACHE_TTL)
                .build(),
            fallbacks: AtomicU64::new(0),
        }
    }

    /// Lookups answered by Manhattan instead of the table.
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }

    fn fall_back(&self, state: &Board, goal: &Board, error: PuzzleError) -> u32 {
        if self.fallbacks.fetch_add(1, Ordering::Relaxed) == 0 {
            warn!(%error, source = %self.source.describe(), "pattern lookup failed, using Manhattan");
        } else {
            debug!(%error, "pattern lookup failed, using Manhattan");
        }
        manhattan_distance(state, goal)
    }
}

impl Predictor for PatternPredictor {
    fn heuristic(&self, state: &Board, goal: &Board) -> u32 {
        if goal != self.source.goal() {
            return manhattan_distance(state, goal);
        }
        if let Some(bound) = self.cache.get(&state.key()) {
            return bound;
        }
        match self.source.lookup(state) {
            Ok(bound) => {
                self.cache.insert(state.key(), bound);
                bound
            }
            Err(error) => self.fall_back(state, goal, error),
        }
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}
