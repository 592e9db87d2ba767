pub mod best_first;
pub mod bidirectional;
pub mod frontier;
pub mod ida_star;
pub mod kind;
pub mod node;
mod transposition;

use crate::puzzle::{Direction, Problem};
use std::time::Duration;

pub use best_first::BestFirstSearcher;
pub use bidirectional::BidirectionalIdaStarSearcher;
pub use frontier::{Evaluation, Frontier, Priority};
pub use ida_star::IdaStarSearcher;
pub use kind::SearcherKind;
pub use node::{Node, NodeArena, NodeId};

/// A search strategy. A searcher is reusable; each call to `search` resets
/// its statistics.
pub trait Searcher {
    fn search(&mut self, problem: &Problem) -> SearchOutcome;

    /// Counters from the most recent search.
    fn stats(&self) -> &SearchStats;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(Solution),
    /// Start and goal are in different solvability classes; nothing was searched.
    Unsolvable,
    /// Everything reachable was searched without meeting the goal.
    Exhausted,
    /// The time budget ran out first.
    TimedOut,
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn cost(&self) -> Option<u32> {
        self.solution().map(Solution::cost)
    }
}

/// Root-to-goal path. `path[i + 1]` is `path[i]` after `path[i + 1].action()`.
#[derive(Debug, Clone)]
pub struct Solution {
    path: Vec<Node>,
}

impl Solution {
    pub(crate) fn new(path: Vec<Node>) -> Self {
        Self { path }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.path
    }

    pub fn cost(&self) -> u32 {
        self.path.last().map(Node::path_cost).unwrap_or_default()
    }

    /// Number of moves.
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn moves(&self) -> Vec<Direction> {
        self.path.iter().filter_map(Node::action).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Child nodes constructed
    pub generated: u64,
    /// Nodes whose successors were produced
    pub expanded: u64,
    /// Deepening iterations (iterative searches only)
    pub iterations: u32,
    /// Threshold of the last deepening iteration
    pub final_threshold: Option<u32>,
    /// Children or branches cut by the pruning policy
    pub pruned: u64,
    pub transposition_hits: u64,
    pub max_depth: u32,
    pub elapsed: Duration,
    /// Bidirectional IDA* handed over to plain IDA*
    pub fell_back: bool,
}

impl SearchStats {
    fn absorb(&mut self, other: &SearchStats) {
        self.generated += other.generated;
        self.expanded += other.expanded;
        self.iterations += other.iterations;
        self.final_threshold = other.final_threshold.or(self.final_threshold);
        self.pruned += other.pruned;
        self.transposition_hits += other.transposition_hits;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}
