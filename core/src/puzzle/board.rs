use super::direction::Direction;
use crate::error::{PuzzleError, Result};
use std::fmt;
use std::hash::{Hash, Hasher};

pub const MIN_DIMENSION: usize = 2;
pub const MAX_DIMENSION: usize = 4;
pub const MAX_CELLS: usize = MAX_DIMENSION * MAX_DIMENSION;

/// Immutable snapshot of a sliding-tile board.
///
/// Tile `0` is the blank. Every board carries a 64-bit key packing one tile
/// per nibble (first cell in the most significant position), which is why
/// boards are limited to 4x4. Equality compares key and dimension; hashing
/// uses the key alone.
#[derive(Clone, Copy)]
pub struct Board {
    tiles: [u8; MAX_CELLS],
    dimension: u8,
    blank: u8,
    key: u64,
}

impl Board {
    /// Validates `tiles` as a permutation of `0..dimension²` and builds the board.
    pub fn new(dimension: usize, tiles: &[u8]) -> Result<Self> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
            return Err(PuzzleError::UnsupportedDimension(dimension));
        }
        let cells = dimension * dimension;
        if tiles.len() != cells {
            return Err(PuzzleError::LengthMismatch {
                dimension,
                expected: cells,
                actual: tiles.len(),
            });
        }

        let mut seen = 0u32;
        for &tile in tiles {
            let tile = tile as usize;
            if tile >= cells || seen & (1 << tile) != 0 {
                return Err(PuzzleError::NotAPermutation { cells });
            }
            seen |= 1 << tile;
        }

        let mut packed = [0u8; MAX_CELLS];
        packed[..cells].copy_from_slice(tiles);
        let blank = tiles.iter().position(|&t| t == 0).unwrap_or_default();
        Ok(Self::from_parts(packed, dimension, blank))
    }

    /// The conventional goal: tiles `1..n²-1` in reading order, blank last.
    pub fn goal(dimension: usize) -> Result<Self> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
            return Err(PuzzleError::UnsupportedDimension(dimension));
        }
        let cells = dimension * dimension;
        let tiles: Vec<u8> = (1..cells as u8).chain(std::iter::once(0)).collect();
        Self::new(dimension, &tiles)
    }

    fn from_parts(tiles: [u8; MAX_CELLS], dimension: usize, blank: usize) -> Self {
        let key = tiles[..dimension * dimension]
            .iter()
            .fold(0u64, |key, &tile| (key << 4) | u64::from(tile & 0xF));
        Self {
            tiles,
            dimension: dimension as u8,
            blank: blank as u8,
            key,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension as usize
    }

    pub fn cell_count(&self) -> usize {
        self.dimension() * self.dimension()
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles[..self.cell_count()]
    }

    pub fn blank(&self) -> usize {
        self.blank as usize
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn tile_at(&self, cell: usize) -> u8 {
        self.tiles[cell]
    }

    pub fn position_of(&self, tile: u8) -> Option<usize> {
        self.tiles().iter().position(|&t| t == tile)
    }

    /// Cell of every tile, indexed by tile label.
    pub fn positions(&self) -> [u8; MAX_CELLS] {
        let mut positions = [0u8; MAX_CELLS];
        for (cell, &tile) in self.tiles().iter().enumerate() {
            positions[tile as usize] = cell as u8;
        }
        positions
    }

    pub fn row_col(&self, cell: usize) -> (usize, usize) {
        (cell / self.dimension(), cell % self.dimension())
    }

    /// Moves that keep the blank on the board. Each call starts a fresh iterator.
    pub fn actions(&self) -> impl Iterator<Item = Direction> + use<> {
        let blank = self.blank();
        let dimension = self.dimension();
        Direction::ALL
            .into_iter()
            .filter(move |direction| direction.target(blank, dimension).is_some())
    }

    /// Slides the tile next to the blank into it.
    pub fn next(&self, direction: Direction) -> Result<Board> {
        let target = direction
            .target(self.blank(), self.dimension())
            .ok_or_else(|| PuzzleError::IllegalMove {
                direction: direction.to_string(),
                blank: self.blank(),
            })?;
        Ok(self.swap_blank(target))
    }

    /// Every legal move paired with the board it produces.
    pub fn successors(&self) -> impl Iterator<Item = (Direction, Board)> + use<> {
        let board = *self;
        Direction::ALL.into_iter().filter_map(move |direction| {
            direction
                .target(board.blank(), board.dimension())
                .map(|target| (direction, board.swap_blank(target)))
        })
    }

    fn swap_blank(&self, target: usize) -> Board {
        let mut tiles = self.tiles;
        tiles.swap(self.blank(), target);
        Self::from_parts(tiles, self.dimension(), target)
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.dimension == other.dimension
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("dimension", &self.dimension)
            .field("tiles", &self.tiles())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles().chunks(self.dimension()) {
            let line: Vec<String> = row
                .iter()
                .map(|&tile| match tile {
                    0 => "  ".to_string(),
                    tile => format!("{tile:>2}"),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
