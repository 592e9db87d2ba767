use super::frontier::{Evaluation, Frontier};
use super::node::{Node, NodeArena};
use super::{SearchOutcome, SearchStats, Searcher, Solution};
use crate::heuristic::{Predictor, ZeroPredictor};
use crate::puzzle::Problem;
use crate::search_config::SearchConfig;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Graph search over a [`Frontier`]: A* or Dijkstra depending on the evaluation.
pub struct BestFirstSearcher {
    evaluation: Evaluation,
    predictor: Arc<dyn Predictor>,
    config: SearchConfig,
    stats: SearchStats,
}

struct BestFirstState {
    frontier: Frontier,
    arena: NodeArena,
    explored: FxHashSet<u64>,
}

impl BestFirstState {
    fn new(evaluation: Evaluation, root: Node) -> Self {
        let mut frontier = Frontier::new(evaluation);
        frontier.offer(root);
        Self {
            frontier,
            arena: NodeArena::new(),
            explored: FxHashSet::default(),
        }
    }
}

impl BestFirstSearcher {
    pub fn new(evaluation: Evaluation, predictor: Arc<dyn Predictor>) -> Self {
        Self {
            evaluation,
            predictor,
            config: SearchConfig::default(),
            stats: SearchStats::default(),
        }
    }

    pub fn astar(predictor: Arc<dyn Predictor>) -> Self {
        Self::new(Evaluation::AStar, predictor)
    }

    pub fn dijkstra() -> Self {
        Self::new(Evaluation::Dijkstra, Arc::new(ZeroPredictor))
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    fn run(&mut self, problem: &Problem, timer: Instant) -> SearchOutcome {
        let goal = *problem.goal();
        let predictor = Arc::clone(&self.predictor);
        let mut root = Node::root(*problem.initial());
        root.evaluate(predictor.as_ref(), &goal);
        let mut state = BestFirstState::new(self.evaluation, root);

        while let Some(node) = state.frontier.poll() {
            if timer.elapsed() >= self.config.time_budget {
                return SearchOutcome::TimedOut;
            }
            if !state.explored.insert(node.state().key()) {
                continue;
            }
            self.stats.expanded += 1;
            self.stats.max_depth = self.stats.max_depth.max(node.path_cost());

            let id = state.arena.push(node);
            if problem.is_goal(node.state()) {
                return SearchOutcome::Found(Solution::new(state.arena.path_to(id)));
            }

            for (direction, successor) in node.state().successors() {
                self.stats.generated += 1;
                if state.explored.contains(&successor.key()) {
                    continue;
                }
                let mut child = node.child(id, direction, successor);
                child.evaluate(predictor.as_ref(), &goal);
                state.frontier.offer(child);
            }
        }

        SearchOutcome::Exhausted
    }
}

impl Searcher for BestFirstSearcher {
    fn search(&mut self, problem: &Problem) -> SearchOutcome {
        self.stats = SearchStats::default();
        if !problem.solvable() {
            return SearchOutcome::Unsolvable;
        }

        let timer = Instant::now();
        let outcome = self.run(problem, timer);
        self.stats.elapsed = timer.elapsed();

        debug!(
            searcher = self.name(),
            predictor = self.predictor.name(),
            expanded = self.stats.expanded,
            generated = self.stats.generated,
            cost = ?outcome.cost(),
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "best-first search finished"
        );
        outcome
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn name(&self) -> &'static str {
        match self.evaluation {
            Evaluation::AStar => "astar",
            Evaluation::Dijkstra => "dijkstra",
        }
    }
}
