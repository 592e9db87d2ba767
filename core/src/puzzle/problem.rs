use super::board::Board;
use crate::error::{PuzzleError, Result};

/// An initial board paired with the goal board it should reach.
///
/// Solvability is decided analytically once, at construction.
#[derive(Debug, Clone)]
pub struct Problem {
    initial: Board,
    goal: Board,
    solvable: bool,
}

impl Problem {
    pub fn new(initial: Board, goal: Board) -> Result<Self> {
        if initial.dimension() != goal.dimension() {
            return Err(PuzzleError::DimensionMismatch {
                expected: initial.dimension(),
                actual: goal.dimension(),
            });
        }
        let solvable = same_solvability_class(&initial, &goal);
        Ok(Self {
            initial,
            goal,
            solvable,
        })
    }

    pub fn from_tiles(dimension: usize, initial: &[u8], goal: &[u8]) -> Result<Self> {
        Self::new(Board::new(dimension, initial)?, Board::new(dimension, goal)?)
    }

    /// Problem whose goal is the conventional solved board.
    pub fn to_solved(initial: Board) -> Result<Self> {
        let goal = Board::goal(initial.dimension())?;
        Self::new(initial, goal)
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    pub fn dimension(&self) -> usize {
        self.initial.dimension()
    }

    pub fn is_goal(&self, board: &Board) -> bool {
        *board == self.goal
    }

    pub fn solvable(&self) -> bool {
        self.solvable
    }
}

fn same_solvability_class(start: &Board, goal: &Board) -> bool {
    let start_parity = count_inversions(start) % 2;
    let goal_parity = count_inversions(goal) % 2;
    let dimension = start.dimension();

    if dimension % 2 == 1 {
        return start_parity == goal_parity;
    }

    let start_row = start.blank() / dimension;
    let goal_row = goal.blank() / dimension;
    let row_difference = start_row.abs_diff(goal_row);
    start_parity == (goal_parity + row_difference) % 2
}

/// Inversions among the non-blank tiles, counted by merge sort.
pub(crate) fn count_inversions(board: &Board) -> usize {
    let mut tiles: Vec<u8> = board.tiles().iter().copied().filter(|&t| t != 0).collect();
    let mut scratch = vec![0u8; tiles.len()];
    sort_and_count(&mut tiles, &mut scratch)
}

fn sort_and_count(tiles: &mut [u8], scratch: &mut [u8]) -> usize {
    if tiles.len() < 2 {
        return 0;
    }
    let mid = tiles.len() / 2;
    let mut count = {
        let (left, right) = tiles.split_at_mut(mid);
        let (left_scratch, right_scratch) = scratch.split_at_mut(mid);
        sort_and_count(left, left_scratch) + sort_and_count(right, right_scratch)
    };

    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < mid && j < tiles.len() {
        if tiles[i] <= tiles[j] {
            scratch[k] = tiles[i];
            i += 1;
        } else {
            scratch[k] = tiles[j];
            j += 1;
            count += mid - i;
        }
        k += 1;
    }
    scratch[k..k + mid - i].copy_from_slice(&tiles[i..mid]);
    k += mid - i;
    scratch[k..].copy_from_slice(&tiles[j..]);
    tiles.copy_from_slice(&scratch[..tiles.len()]);

    count
}
