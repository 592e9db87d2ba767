use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction the blank travels in one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column offset applied to the blank.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn inverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn step_cost(self) -> u32 {
        1
    }

    /// Cell reached from `cell` on a `dimension`-wide board, if it stays in bounds.
    pub fn target(self, cell: usize, dimension: usize) -> Option<usize> {
        let row = cell / dimension;
        let col = cell % dimension;
        match self {
            Direction::Up if row > 0 => Some(cell - dimension),
            Direction::Down if row + 1 < dimension => Some(cell + dimension),
            Direction::Left if col > 0 => Some(cell - 1),
            Direction::Right if col + 1 < dimension => Some(cell + 1),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}
