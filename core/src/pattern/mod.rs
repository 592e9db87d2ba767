pub mod abstraction;
mod build;
pub mod database;
pub mod disjoint;
pub mod partition;
pub mod preload;
pub mod storage;

use crate::error::Result;
use crate::puzzle::Board;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub use abstraction::{AbstractState, MAX_PATTERN_TILES, Pattern};
pub use database::PatternDatabase;
pub use disjoint::DisjointPatternDatabase;
pub use partition::PartitionScheme;
pub use preload::PatternPreload;

/// How a pattern table is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMethod {
    /// Breadth-first from the goal pattern
    #[default]
    Bfs,
    /// Goal-side breadth-first alternating with a sweep from far-away seeds
    Bidirectional,
}

/// Knobs for building pattern tables.
#[derive(Debug, Clone)]
pub struct PatternConfig {
    /// Cap on abstract states processed per sweep; a table built under the cap may be partial
    pub max_states: usize,
    /// Seed count for the bidirectional build
    pub seed_count: usize,
    /// Build disjoint partitions on a thread pool
    pub parallel: bool,
    /// Worker threads for parallel builds; `0` picks one per partition
    pub workers: usize,
    /// How long to wait for each partition build
    pub build_timeout: Duration,
    /// Checked between BFS levels; any set flag abandons the build
    pub cancel: Vec<Arc<AtomicBool>>,
}

impl PatternConfig {
    pub fn new(max_states: usize) -> Self {
        Self {
            max_states,
            ..Self::default()
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn with_build_timeout(mut self, build_timeout: Duration) -> Self {
        self.build_timeout = build_timeout;
        self
    }

    /// Adds a flag to the ones already watched.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel.push(cancel);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.iter().any(|flag| flag.load(Ordering::Relaxed))
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            max_states: 2_000_000,
            seed_count: 8,
            parallel: true,
            workers: 0,
            build_timeout: Duration::from_secs(600),
            cancel: Vec::new(),
        }
    }
}

/// Where the two sweeps of a bidirectional build first touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeetingPoint {
    pub key: u64,
    pub goal_depth: u8,
    pub seed_depth: u8,
}

#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    pub method: BuildMethod,
    pub states_processed: usize,
    /// Whether the goal-side sweep ran out of states before the cap
    pub complete: bool,
    pub elapsed: Duration,
    pub meeting: Option<MeetingPoint>,
}

/// A table-backed lower bound on moves to a fixed goal.
pub trait PatternHeuristic: Send + Sync {
    fn goal(&self) -> &Board;

    /// Bound for `board`; errors when the board is not comparable with the table.
    fn lookup(&self, board: &Board) -> Result<u32>;

    fn describe(&self) -> String;
}
