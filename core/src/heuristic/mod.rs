pub mod basic;
pub mod pattern;

use crate::error::{PuzzleError, Result};
use crate::pattern::{BuildMethod, DisjointPatternDatabase, PartitionScheme, PatternConfig};
use crate::puzzle::Board;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use basic::{
    BlankDistancePredictor, ManhattanPredictor, MisplacedPredictor, ZeroPredictor, manhattan_distance,
    manhattan_for_tiles,
};
pub use pattern::PatternPredictor;

/// Admissible estimate of the moves left from `state` to `goal`.
///
/// Implementations must never overestimate and must be safe to share
/// between threads.
pub trait Predictor: Send + Sync {
    fn heuristic(&self, state: &Board, goal: &Board) -> u32;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    Zero,
    Misplaced,
    #[default]
    Manhattan,
    Blank,
    Pattern,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 5] = [
        HeuristicKind::Zero,
        HeuristicKind::Misplaced,
        HeuristicKind::Manhattan,
        HeuristicKind::Blank,
        HeuristicKind::Pattern,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeuristicKind::Zero => "zero",
            HeuristicKind::Misplaced => "misplaced",
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::Blank => "blank",
            HeuristicKind::Pattern => "pattern",
        }
    }

    /// Builds the predictor. `Pattern` builds the default disjoint split for
    /// the goal's board size, which can take a while on 4x4.
    pub fn build(self, goal: &Board, config: &PatternConfig) -> Result<Arc<dyn Predictor>> {
        let predictor: Arc<dyn Predictor> = match self {
            HeuristicKind::Zero => Arc::new(ZeroPredictor),
            HeuristicKind::Misplaced => Arc::new(MisplacedPredictor),
            HeuristicKind::Manhattan => Arc::new(ManhattanPredictor),
            HeuristicKind::Blank => Arc::new(BlankDistancePredictor),
            HeuristicKind::Pattern => {
                let scheme = PartitionScheme::for_dimension(goal.dimension())?;
                let database = DisjointPatternDatabase::from_scheme(goal, scheme, BuildMethod::Bfs, config)?;
                Arc::new(PatternPredictor::new(Arc::new(database)))
            }
        };
        Ok(predictor)
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeuristicKind {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "zero" | "none" => Ok(HeuristicKind::Zero),
            "misplaced" | "hamming" => Ok(HeuristicKind::Misplaced),
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "blank" => Ok(HeuristicKind::Blank),
            "pattern" | "pdb" => Ok(HeuristicKind::Pattern),
            _ => Err(PuzzleError::UnknownKind(s.to_string())),
        }
    }
}
