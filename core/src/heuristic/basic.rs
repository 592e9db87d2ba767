use super::Predictor;
use crate::puzzle::Board;

/// Always zero. Turns A* into Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroPredictor;

impl Predictor for ZeroPredictor {
    fn heuristic(&self, _state: &Board, _goal: &Board) -> u32 {
        0
    }

    fn name(&self) -> &'static str {
        "zero"
    }
}

/// Number of non-blank tiles off their goal cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct MisplacedPredictor;

impl Predictor for MisplacedPredictor {
    fn heuristic(&self, state: &Board, goal: &Board) -> u32 {
        state
            .tiles()
            .iter()
            .zip(goal.tiles())
            .filter(|&(&tile, &target)| tile != 0 && tile != target)
            .count() as u32
    }

    fn name(&self) -> &'static str {
        "misplaced"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanPredictor;

impl Predictor for ManhattanPredictor {
    fn heuristic(&self, state: &Board, goal: &Board) -> u32 {
        manhattan_distance(state, goal)
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}

/// Grid distance of the blank from its goal cell. Weak, but admissible.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankDistancePredictor;

impl Predictor for BlankDistancePredictor {
    fn heuristic(&self, state: &Board, goal: &Board) -> u32 {
        let (row, col) = state.row_col(state.blank());
        let (goal_row, goal_col) = goal.row_col(goal.blank());
        (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
    }

    fn name(&self) -> &'static str {
        "blank"
    }
}

/// Sum over non-blank tiles of grid distance to the tile's goal cell.
pub fn manhattan_distance(state: &Board, goal: &Board) -> u32 {
    let goal_positions = goal.positions();
    state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != 0)
        .map(|(cell, &tile)| cell_distance(state, cell, goal_positions[tile as usize] as usize))
        .sum()
}

/// Manhattan distance restricted to `tiles`.
pub fn manhattan_for_tiles(state: &Board, goal: &Board, tiles: &[u8]) -> u32 {
    let positions = state.positions();
    let goal_positions = goal.positions();
    tiles
        .iter()
        .map(|&tile| {
            cell_distance(
                state,
                positions[tile as usize] as usize,
                goal_positions[tile as usize] as usize,
            )
        })
        .sum()
}

fn cell_distance(board: &Board, from: usize, to: usize) -> u32 {
    let (row, col) = board.row_col(from);
    let (goal_row, goal_col) = board.row_col(to);
    (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
}
