use super::abstraction::{AbstractState, Pattern};
use super::build::{self, DistanceTable};
use super::{BuildMethod, BuildStats, PatternConfig, PatternHeuristic, storage};
use crate::error::{PuzzleError, Result};
use crate::heuristic::manhattan_for_tiles;
use crate::puzzle::Board;
use std::path::Path;
use tracing::{info, warn};

/// Exact abstract distances for one tile subset, keyed by abstract state.
#[derive(Debug, Clone)]
pub struct PatternDatabase {
    pattern: Pattern,
    goal: Board,
    table: DistanceTable,
    stats: BuildStats,
}

impl PatternDatabase {
    pub fn build(goal: &Board, tiles: &[u8], method: BuildMethod, config: &PatternConfig) -> Result<Self> {
        let pattern = Pattern::new(goal, tiles)?;
        let (table, stats) = match method {
            BuildMethod::Bfs => build::breadth_first(&pattern, config)?,
            BuildMethod::Bidirectional => build::bidirectional(&pattern, config)?,
        };

        info!(
            tiles = ?pattern.tiles(),
            ?method,
            entries = table.len(),
            processed = stats.states_processed,
            complete = stats.complete,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "pattern database built"
        );

        Ok(Self {
            pattern,
            goal: *goal,
            table,
            stats,
        })
    }

    pub(crate) fn from_table(goal: &Board, tiles: &[u8], table: DistanceTable, complete: bool) -> Result<Self> {
        let pattern = Pattern::new(goal, tiles)?;
        let stats = BuildStats {
            states_processed: table.len(),
            complete,
            ..BuildStats::default()
        };
        Ok(Self {
            pattern,
            goal: *goal,
            table,
            stats,
        })
    }

    /// Loads the table at `path` when it was built for this goal and tile set,
    /// otherwise builds it and tries to write it back.
    pub fn load_or_build(
        path: &Path,
        goal: &Board,
        tiles: &[u8],
        method: BuildMethod,
        config: &PatternConfig,
    ) -> Result<Self> {
        match storage::load(path) {
            Ok(database) if database.matches(goal, tiles) => {
                info!(path = %path.display(), entries = database.len(), "pattern database loaded");
                return Ok(database);
            }
            Ok(_) => warn!(path = %path.display(), "stored pattern database is for another goal or tile set"),
            Err(PuzzleError::Io(error)) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => warn!(path = %path.display(), %error, "discarding unreadable pattern database"),
        }

        let database = Self::build(goal, tiles, method, config)?;
        if let Err(error) = storage::save(&database, path) {
            warn!(path = %path.display(), %error, "could not persist pattern database");
        }
        Ok(database)
    }

    pub fn matches(&self, goal: &Board, tiles: &[u8]) -> bool {
        self.goal == *goal && self.pattern.tiles() == tiles
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn tiles(&self) -> &[u8] {
        self.pattern.tiles()
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn distance(&self, state: &AbstractState) -> Option<u8> {
        self.table.get(&state.key()).copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = (u64, u8)> + '_ {
        self.table.iter().map(|(&key, &distance)| (key, distance))
    }

    /// Table distance for `board`, or the tracked tiles' Manhattan sum when
    /// a capped build never reached its abstract state.
    pub fn lookup(&self, board: &Board) -> Result<u32> {
        if board.dimension() != self.goal.dimension() {
            return Err(PuzzleError::DimensionMismatch {
                expected: self.goal.dimension(),
                actual: board.dimension(),
            });
        }
        let state = self.pattern.project(board);
        Ok(match self.distance(&state) {
            Some(distance) => u32::from(distance),
            None => manhattan_for_tiles(board, &self.goal, self.pattern.tiles()),
        })
    }
}

impl PatternHeuristic for PatternDatabase {
    fn goal(&self) -> &Board {
        &self.goal
    }

    fn lookup(&self, board: &Board) -> Result<u32> {
        PatternDatabase::lookup(self, board)
    }

    fn describe(&self) -> String {
        format!("pattern {:?} ({} entries)", self.pattern.tiles(), self.table.len())
    }
}
