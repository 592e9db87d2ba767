#![allow(dead_code)]

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::OnceLock;
use tilesearch_core::puzzle::{Board, Direction, Problem};
use tilesearch_core::search::Solution;

/// Every board reachable from a goal together with its exact move distance.
pub struct Distances {
    pub by_key: FxHashMap<u64, u32>,
    pub boards: Vec<Board>,
}

impl Distances {
    pub fn of(&self, board: &Board) -> Option<u32> {
        self.by_key.get(&board.key()).copied()
    }
}

pub fn exact_distances(goal: &Board) -> Distances {
    let mut by_key = FxHashMap::default();
    let mut boards = Vec::new();
    let mut queue = VecDeque::new();

    by_key.insert(goal.key(), 0);
    boards.push(*goal);
    queue.push_back(*goal);

    while let Some(current) = queue.pop_front() {
        let distance = by_key[&current.key()];
        for (_, next) in current.successors() {
            if !by_key.contains_key(&next.key()) {
                by_key.insert(next.key(), distance + 1);
                boards.push(next);
                queue.push_back(next);
            }
        }
    }

    Distances { by_key, boards }
}

/// Exact distances for the solved 3x3 board, computed once per test binary.
pub fn eight_puzzle() -> &'static Distances {
    static TABLE: OnceLock<Distances> = OnceLock::new();
    TABLE.get_or_init(|| exact_distances(&Board::goal(3).unwrap()))
}

/// Deterministic random walk from `board` that never undoes its last move.
pub fn scramble(board: &Board, moves: usize, seed: u64) -> Board {
    let mut state = *board;
    let mut rng = seed;
    let mut last: Option<Direction> = None;

    for _ in 0..moves {
        rng = rng
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let options: Vec<Direction> = state
            .actions()
            .filter(|direction| Some(direction.inverse()) != last)
            .collect();
        let direction = options[(rng >> 33) as usize % options.len()];
        state = state.next(direction).unwrap();
        last = Some(direction);
    }
    state
}

pub fn board(dimension: usize, tiles: &[u8]) -> Board {
    Board::new(dimension, tiles).unwrap()
}

pub fn assert_valid_path(problem: &Problem, solution: &Solution) {
    let nodes = solution.nodes();
    assert_eq!(nodes.first().unwrap().state(), problem.initial());
    assert_eq!(nodes.last().unwrap().state(), problem.goal());
    assert!(nodes[0].action().is_none());
    assert!(nodes[0].parent().is_none());

    for (index, pair) in nodes.windows(2).enumerate() {
        let action = pair[1].action().expect("every step after the root has a move");
        assert_eq!(pair[0].state().next(action).unwrap(), *pair[1].state());
        assert_eq!(pair[1].path_cost(), pair[0].path_cost() + 1);
        assert_eq!(pair[1].parent().map(|id| id.index()), Some(index));
    }
    assert_eq!(solution.cost() as usize, solution.len());
    assert_eq!(solution.moves().len(), solution.len());
}
