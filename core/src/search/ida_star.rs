use super::node::{Node, NodeArena, NodeId};
use super::transposition::TranspositionCache;
use super::{SearchOutcome, SearchStats, Searcher, Solution};
use crate::heuristic::Predictor;
use crate::puzzle::{Board, Problem};
use crate::search_config::SearchConfig;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

/// Iterative-deepening A*: repeated depth-first passes bounded by `f`, each
/// pass raising the bound to the smallest `f` that exceeded it.
pub struct IdaStarSearcher {
    predictor: Arc<dyn Predictor>,
    config: SearchConfig,
    transpositions: TranspositionCache,
    stats: SearchStats,
}

/// Result of one bounded depth-first descent.
enum Descent {
    Found(NodeId),
    /// Smallest `f` beyond the threshold inside the subtree
    Exceeded(u32),
    /// Nothing left below this node
    DeadEnd,
    Cancelled,
}

struct DepthFirst<'a> {
    predictor: &'a dyn Predictor,
    goal: Board,
    threshold: u32,
    timer: Instant,
    config: &'a SearchConfig,
    transpositions: &'a TranspositionCache,
    stats: &'a mut SearchStats,
    arena: NodeArena,
}

impl IdaStarSearcher {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self::with_config(predictor, SearchConfig::default())
    }

    pub fn with_config(predictor: Arc<dyn Predictor>, config: SearchConfig) -> Self {
        let transpositions = TranspositionCache::new(config.transposition_capacity, config.transposition_ttl);
        Self {
            predictor,
            config,
            transpositions,
            stats: SearchStats::default(),
        }
    }

    fn run(&mut self, problem: &Problem, timer: Instant) -> SearchOutcome {
        self.transpositions.clear();
        let goal = *problem.goal();
        let mut root = Node::root(*problem.initial());
        let mut threshold = root.evaluate(self.predictor.as_ref(), &goal);

        let mut pass = DepthFirst {
            predictor: self.predictor.as_ref(),
            goal,
            threshold,
            timer,
            config: &self.config,
            transpositions: &self.transpositions,
            stats: &mut self.stats,
            arena: NodeArena::new(),
        };

        loop {
            pass.stats.iterations += 1;
            pass.stats.final_threshold = Some(threshold);
            pass.threshold = threshold;
            trace!(threshold, "ida* iteration");

            pass.arena.clear();
            let root_id = pass.arena.push(root);
            match pass.descend(root_id, 0) {
                Descent::Found(id) => return SearchOutcome::Found(Solution::new(pass.arena.path_to(id))),
                Descent::Exceeded(next) => threshold = next,
                Descent::DeadEnd => return SearchOutcome::Exhausted,
                Descent::Cancelled => return SearchOutcome::TimedOut,
            }
        }
    }
}

impl DepthFirst<'_> {
    fn descend(&mut self, id: NodeId, depth: u32) -> Descent {
        if self.timer.elapsed() >= self.config.time_budget {
            return Descent::Cancelled;
        }

        let node = *self.arena.get(id);
        let f = node.evaluation().unwrap_or(node.path_cost());
        if f > self.threshold {
            return Descent::Exceeded(f);
        }
        if *node.state() == self.goal {
            return Descent::Found(id);
        }
        if self.config.pruning.prunes_branch(f, depth) {
            self.stats.pruned += 1;
            return Descent::DeadEnd;
        }

        let position = (node.state().key(), depth, node.action());
        if let Some(bound) = self.transpositions.bound(position, self.threshold) {
            self.stats.transposition_hits += 1;
            return Descent::Exceeded(bound);
        }

        self.stats.expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let mark = self.arena.len();
        let children = self.push_children(id, &node);
        let mut smallest: Option<u32> = None;

        for child_id in children {
            let child_f = self.arena.get(child_id).evaluation().unwrap_or_default();
            if self.config.pruning.prunes_child(child_f, self.threshold) {
                self.stats.pruned += 1;
                continue;
            }
            match self.descend(child_id, depth + 1) {
                Descent::Found(found) => return Descent::Found(found),
                Descent::Cancelled => return Descent::Cancelled,
                Descent::Exceeded(bound) => smallest = Some(smallest.map_or(bound, |s| s.min(bound))),
                Descent::DeadEnd => {}
            }
        }
        self.arena.truncate(mark);

        match smallest {
            Some(bound) => {
                self.transpositions.record(position, bound);
                Descent::Exceeded(bound)
            }
            None => Descent::DeadEnd,
        }
    }

    /// Scores every child except the one undoing the last move and pushes
    /// them best-first.
    fn push_children(&mut self, id: NodeId, node: &Node) -> Vec<NodeId> {
        let undo = node.action().map(|action| action.inverse());
        let mut children: Vec<Node> = node
            .state()
            .successors()
            .filter(|&(direction, _)| Some(direction) != undo)
            .map(|(direction, successor)| {
                let mut child = node.child(id, direction, successor);
                child.evaluate(self.predictor, &self.goal);
                child
            })
            .collect();
        self.stats.generated += children.len() as u64;
        children.sort_by_key(|child| child.heuristic());

        children.into_iter().map(|child| self.arena.push(child)).collect()
    }
}

impl Searcher for IdaStarSearcher {
    fn search(&mut self, problem: &Problem) -> SearchOutcome {
        self.stats = SearchStats::default();
        if !problem.solvable() {
            return SearchOutcome::Unsolvable;
        }

        let timer = Instant::now();
        let outcome = self.run(problem, timer);
        self.stats.elapsed = timer.elapsed();

        debug!(
            predictor = self.predictor.name(),
            iterations = self.stats.iterations,
            threshold = ?self.stats.final_threshold,
            expanded = self.stats.expanded,
            transposition_hits = self.stats.transposition_hits,
            pruned = self.stats.pruned,
            cost = ?outcome.cost(),
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "ida* search finished"
        );
        outcome
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn name(&self) -> &'static str {
        "idastar"
    }
}
