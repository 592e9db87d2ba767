use crate::error::{PuzzleError, Result};
use crate::puzzle::{Board, Direction};

/// Tracked tiles are packed at 6 bits per cell together with the blank
/// region, so at most 9 tiles fit in a 64-bit key.
pub const MAX_PATTERN_TILES: usize = 9;

/// A subset of tiles whose positions are tracked, plus where they sit in the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    dimension: usize,
    tiles: Vec<u8>,
    goal_positions: Vec<u8>,
    goal_blank: u8,
}

/// Projection of a board onto a [`Pattern`].
///
/// The blank is stored as its whole region of reachable non-tracked cells, so
/// boards that differ only in where untracked tiles and the blank sit inside
/// one region share the same abstract state and key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbstractState {
    positions: [u8; MAX_PATTERN_TILES],
    len: u8,
    occupied: u16,
    region: u16,
    key: u64,
}

impl Pattern {
    pub fn new(goal: &Board, tiles: &[u8]) -> Result<Self> {
        let cells = goal.cell_count();
        if tiles.is_empty() {
            return Err(PuzzleError::InvalidPattern("no tiles".into()));
        }
        if tiles.len() > MAX_PATTERN_TILES {
            return Err(PuzzleError::InvalidPattern(format!(
                "{} tiles exceed the limit of {MAX_PATTERN_TILES}",
                tiles.len()
            )));
        }

        let mut seen = 0u32;
        let mut goal_positions = Vec::with_capacity(tiles.len());
        for &tile in tiles {
            if tile == 0 || tile as usize >= cells {
                return Err(PuzzleError::InvalidPattern(format!(
                    "tile {tile} is not a movable tile of a {0}x{0} board",
                    goal.dimension()
                )));
            }
            if seen & (1 << tile) != 0 {
                return Err(PuzzleError::InvalidPattern(format!("tile {tile} listed twice")));
            }
            seen |= 1 << tile;
            let position = goal.position_of(tile).unwrap_or_default();
            goal_positions.push(position as u8);
        }

        Ok(Self {
            dimension: goal.dimension(),
            tiles: tiles.to_vec(),
            goal_positions,
            goal_blank: goal.blank() as u8,
        })
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Tracked tiles on their goal cells, blank in the goal blank's region.
    pub fn goal_state(&self) -> AbstractState {
        AbstractState::new(&self.goal_positions, self.goal_blank as usize, self.dimension)
    }

    pub fn project(&self, board: &Board) -> AbstractState {
        let cells = board.positions();
        let positions: Vec<u8> = self.tiles.iter().map(|&tile| cells[tile as usize]).collect();
        AbstractState::new(&positions, board.blank(), self.dimension)
    }

    /// States one tracked-tile move away. The blank may first wander anywhere
    /// in its region for free, then pushes an adjacent tracked tile.
    pub fn neighbors(&self, state: &AbstractState) -> Vec<AbstractState> {
        let mut neighbors = Vec::with_capacity(8);
        for cell in cells_of(state.region) {
            for direction in Direction::ALL {
                let Some(target) = direction.target(cell, self.dimension) else {
                    continue;
                };
                if state.occupied & (1 << target) == 0 {
                    continue;
                }
                let mut positions = state.positions;
                if let Some(moved) = positions[..state.len as usize]
                    .iter()
                    .position(|&position| position as usize == target)
                {
                    positions[moved] = cell as u8;
                    neighbors.push(AbstractState::new(
                        &positions[..state.len as usize],
                        target,
                        self.dimension,
                    ));
                }
            }
        }
        neighbors
    }

    /// Far-from-goal layouts used to seed the second sweep of a bidirectional
    /// build: tracked tiles packed into the first cells, the last cells, or
    /// along the diagonal, with the blank on successive free cells.
    pub fn strategic_states(&self, count: usize) -> Vec<AbstractState> {
        let cells = self.dimension * self.dimension;
        let k = self.tiles.len();
        let goal_key = self.goal_state().key();
        let mut states: Vec<AbstractState> = Vec::with_capacity(count);

        for i in 0..count {
            let positions: Vec<u8> = match i % 3 {
                0 => (0..k).map(|j| j as u8).collect(),
                1 => (0..k).map(|j| (cells - 1 - j) as u8).collect(),
                _ => (0..k)
                    .map(|j| ((j * self.dimension + j) % cells) as u8)
                    .collect(),
            };
            let occupied = positions.iter().fold(0u16, |mask, &p| mask | (1 << p));
            if occupied.count_ones() as usize != k {
                continue;
            }
            let free: Vec<usize> = (0..cells).filter(|&c| occupied & (1 << c) == 0).collect();
            if free.is_empty() {
                continue;
            }
            let blank = free[(i / 3) % free.len()];
            let state = AbstractState::new(&positions, blank, self.dimension);
            if state.key() != goal_key && states.iter().all(|s| s.key() != state.key()) {
                states.push(state);
            }
        }
        states
    }
}

impl AbstractState {
    fn new(positions: &[u8], blank: usize, dimension: usize) -> Self {
        let mut packed = [0u8; MAX_PATTERN_TILES];
        packed[..positions.len()].copy_from_slice(positions);
        let occupied = positions.iter().fold(0u16, |mask, &p| mask | (1 << p));
        let region = blank_region(dimension, occupied, blank);

        let key = positions
            .iter()
            .fold(u64::from(region.trailing_zeros()), |key, &position| {
                (key << 6) | u64::from(position & 0x3F)
            });

        Self {
            positions: packed,
            len: positions.len() as u8,
            occupied,
            region,
            key,
        }
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    /// Cells of the tracked tiles, in pattern order.
    pub fn positions(&self) -> &[u8] {
        &self.positions[..self.len as usize]
    }
}

/// Cells reachable from `start` without crossing an occupied cell.
fn blank_region(dimension: usize, occupied: u16, start: usize) -> u16 {
    let mut region = 1u16 << start;
    let mut frontier = region;
    while frontier != 0 {
        let mut next = 0u16;
        for cell in cells_of(frontier) {
            for direction in Direction::ALL {
                if let Some(target) = direction.target(cell, dimension) {
                    let bit = 1u16 << target;
                    if occupied & bit == 0 && region & bit == 0 {
                        region |= bit;
                        next |= bit;
                    }
                }
            }
        }
        frontier = next;
    }
    region
}

fn cells_of(mut mask: u16) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let cell = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        Some(cell)
    })
}
