pub mod error;
pub mod heuristic;
pub mod pattern;
pub mod puzzle;
pub mod search;
pub mod search_config;

// Re-export commonly used items
pub use error::{PuzzleError, Result};
pub use heuristic::{HeuristicKind, Predictor};
pub use pattern::{BuildMethod, DisjointPatternDatabase, PartitionScheme, PatternConfig, PatternDatabase, PatternPreload};
pub use puzzle::{Board, Direction, Problem};
pub use search::{SearchOutcome, SearchStats, Searcher, SearcherKind, Solution};
pub use search_config::{PruningPolicy, SearchConfig};
