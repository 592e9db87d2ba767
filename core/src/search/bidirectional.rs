use super::ida_star::IdaStarSearcher;
use super::node::{Node, linked};
use super::{SearchOutcome, SearchStats, Searcher, Solution};
use crate::heuristic::Predictor;
use crate::puzzle::{Board, Direction, Problem};
use crate::search_config::SearchConfig;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Cheapest known way to reach a board from one side's root.
#[derive(Debug, Clone, Copy)]
struct Visit {
    board: Board,
    cost: u32,
    parent: Option<u64>,
    action: Option<Direction>,
}

type Visited = FxHashMap<u64, Visit>;

/// IDA* run from both ends under one shared threshold.
///
/// Each iteration makes a forward pass toward the goal and a backward pass
/// toward the start, recording every board either pass touches. A pass stops
/// when it reaches a board the other side has recorded at a combined cost
/// within the threshold. Past the threshold ceiling, the iteration ceiling or
/// the time budget the search falls back to plain IDA*.
pub struct BidirectionalIdaStarSearcher {
    predictor: Arc<dyn Predictor>,
    config: SearchConfig,
    stats: SearchStats,
}

enum Pass {
    Met(u64),
    Exceeded(u32),
    DeadEnd,
    Cancelled,
}

enum Stop {
    Done(SearchOutcome),
    FallBack(&'static str),
}

struct Sweep<'a> {
    own: &'a mut Visited,
    other: &'a Visited,
    target: Board,
    threshold: u32,
    predictor: &'a dyn Predictor,
    timer: Instant,
    config: &'a SearchConfig,
    stats: &'a mut SearchStats,
}

impl BidirectionalIdaStarSearcher {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self::with_config(predictor, SearchConfig::default())
    }

    pub fn with_config(predictor: Arc<dyn Predictor>, config: SearchConfig) -> Self {
        Self {
            predictor,
            config,
            stats: SearchStats::default(),
        }
    }

    fn run(&mut self, problem: &Problem, timer: Instant) -> Stop {
        let initial = *problem.initial();
        let goal = *problem.goal();
        let predictor = self.predictor.as_ref();

        let mut forward: Visited = FxHashMap::default();
        let mut backward: Visited = FxHashMap::default();
        forward.insert(initial.key(), Visit::root(initial));
        backward.insert(goal.key(), Visit::root(goal));

        let mut threshold = predictor
            .heuristic(&initial, &goal)
            .max(predictor.heuristic(&goal, &initial));

        loop {
            if threshold > self.config.threshold_ceiling {
                return Stop::FallBack("threshold ceiling");
            }
            if self.stats.iterations >= self.config.max_iterations {
                return Stop::FallBack("iteration ceiling");
            }
            self.stats.iterations += 1;
            self.stats.final_threshold = Some(threshold);
            debug!(threshold, forward = forward.len(), backward = backward.len(), "bidirectional iteration");

            let ahead = Sweep {
                own: &mut forward,
                other: &backward,
                target: goal,
                threshold,
                predictor,
                timer,
                config: &self.config,
                stats: &mut self.stats,
            }
            .start(initial);
            let ahead_bound = match ahead {
                Pass::Met(key) => {
                    return Stop::Done(SearchOutcome::Found(splice(&forward, &backward, key, predictor, &goal)));
                }
                Pass::Cancelled => return Stop::FallBack("time budget"),
                Pass::Exceeded(bound) => Some(bound),
                Pass::DeadEnd => None,
            };

            let behind = Sweep {
                own: &mut backward,
                other: &forward,
                target: initial,
                threshold,
                predictor,
                timer,
                config: &self.config,
                stats: &mut self.stats,
            }
            .start(goal);
            let behind_bound = match behind {
                Pass::Met(key) => {
                    return Stop::Done(SearchOutcome::Found(splice(&forward, &backward, key, predictor, &goal)));
                }
                Pass::Cancelled => return Stop::FallBack("time budget"),
                Pass::Exceeded(bound) => Some(bound),
                Pass::DeadEnd => None,
            };

            threshold = match (ahead_bound, behind_bound) {
                (Some(a), Some(b)) => a.min(b),
                (Some(bound), None) | (None, Some(bound)) => bound,
                (None, None) => return Stop::Done(SearchOutcome::Exhausted),
            };
        }
    }

    fn fall_back(&mut self, problem: &Problem, reason: &str) -> SearchOutcome {
        warn!(
            reason,
            threshold = ?self.stats.final_threshold,
            iterations = self.stats.iterations,
            "bidirectional search giving up, falling back to ida*"
        );
        let mut fallback = IdaStarSearcher::with_config(Arc::clone(&self.predictor), self.config.clone());
        let outcome = fallback.search(problem);
        self.stats.absorb(fallback.stats());
        self.stats.fell_back = true;
        outcome
    }
}

impl Visit {
    fn root(board: Board) -> Self {
        Self {
            board,
            cost: 0,
            parent: None,
            action: None,
        }
    }
}

impl Sweep<'_> {
    fn start(mut self, root: Board) -> Pass {
        let h = self.predictor.heuristic(&root, &self.target);
        self.descend(root, 0, h, None, None)
    }

    fn descend(
        &mut self,
        board: Board,
        cost: u32,
        h: u32,
        parent: Option<u64>,
        action: Option<Direction>,
    ) -> Pass {
        if self.timer.elapsed() >= self.config.time_budget {
            return Pass::Cancelled;
        }
        let f = cost.saturating_add(h);
        if f > self.threshold {
            return Pass::Exceeded(f);
        }

        let key = board.key();
        self.remember(key, board, cost, parent, action);
        if let Some(met) = self.other.get(&key) {
            if cost + met.cost <= self.threshold {
                return Pass::Met(key);
            }
        }

        self.stats.expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(cost);

        let undo = action.map(Direction::inverse);
        let mut children: Vec<(Direction, Board, u32)> = board
            .successors()
            .filter(|&(direction, _)| Some(direction) != undo)
            .map(|(direction, successor)| {
                let h = self.predictor.heuristic(&successor, &self.target);
                (direction, successor, h)
            })
            .collect();
        self.stats.generated += children.len() as u64;
        children.sort_by_key(|&(_, _, h)| h);

        let mut smallest: Option<u32> = None;
        for (direction, successor, h) in children {
            let step = cost.saturating_add(direction.step_cost());
            match self.descend(successor, step, h, Some(key), Some(direction)) {
                Pass::Met(meeting) => return Pass::Met(meeting),
                Pass::Cancelled => return Pass::Cancelled,
                Pass::Exceeded(bound) => smallest = Some(smallest.map_or(bound, |s| s.min(bound))),
                Pass::DeadEnd => {}
            }
        }
        smallest.map_or(Pass::DeadEnd, Pass::Exceeded)
    }

    /// Keeps the cheapest route to each board; never used to skip a board.
    fn remember(&mut self, key: u64, board: Board, cost: u32, parent: Option<u64>, action: Option<Direction>) {
        let visit = Visit {
            board,
            cost,
            parent,
            action,
        };
        match self.own.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(visit);
            }
            Entry::Occupied(mut slot) if cost < slot.get().cost => {
                slot.insert(visit);
            }
            Entry::Occupied(_) => {}
        }
    }
}

/// Start-to-meeting from the forward records, then meeting-to-goal by
/// walking the backward records and inverting their moves.
fn splice(forward: &Visited, backward: &Visited, meeting: u64, predictor: &dyn Predictor, goal: &Board) -> Solution {
    let mut steps: Vec<(Board, Option<Direction>)> = Vec::new();
    let mut cursor = forward.get(&meeting);
    while let Some(visit) = cursor {
        steps.push((visit.board, visit.action));
        cursor = visit.parent.and_then(|parent| forward.get(&parent));
    }
    steps.reverse();

    let mut cursor = backward.get(&meeting);
    while let Some(visit) = cursor {
        let Some(parent) = visit.parent.and_then(|parent| backward.get(&parent)) else {
            break;
        };
        steps.push((parent.board, visit.action.map(Direction::inverse)));
        cursor = Some(parent);
    }

    let mut cost = 0u32;
    let path = steps
        .into_iter()
        .enumerate()
        .map(|(index, (board, action))| {
            if let Some(action) = action {
                cost += action.step_cost();
            }
            Node::new(board, cost, linked(index), action).with_heuristic(predictor.heuristic(&board, goal))
        })
        .collect();
    Solution::new(path)
}

impl Searcher for BidirectionalIdaStarSearcher {
    fn search(&mut self, problem: &Problem) -> SearchOutcome {
        self.stats = SearchStats::default();
        if !problem.solvable() {
            return SearchOutcome::Unsolvable;
        }

        let timer = Instant::now();
        let outcome = match self.run(problem, timer) {
            Stop::Done(outcome) => outcome,
            Stop::FallBack(reason) => self.fall_back(problem, reason),
        };
        self.stats.elapsed = timer.elapsed();

        debug!(
            predictor = self.predictor.name(),
            iterations = self.stats.iterations,
            threshold = ?self.stats.final_threshold,
            expanded = self.stats.expanded,
            fell_back = self.stats.fell_back,
            cost = ?outcome.cost(),
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "bidirectional search finished"
        );
        outcome
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn name(&self) -> &'static str {
        "bidirectional-idastar"
    }
}
