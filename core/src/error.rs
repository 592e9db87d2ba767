use std::path::PathBuf;

/// Errors raised while constructing boards, problems and pattern databases.
///
/// Searches never return these: a search always ends in a
/// [`SearchOutcome`](crate::search::SearchOutcome).
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("unsupported board dimension {0} (expected 2..=4)")]
    UnsupportedDimension(usize),

    #[error("board has {actual} tiles, expected {expected} for a {dimension}x{dimension} board")]
    LengthMismatch {
        dimension: usize,
        expected: usize,
        actual: usize,
    },

    #[error("tiles are not a permutation of 0..{cells}")]
    NotAPermutation { cells: usize },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("move {direction} is not legal with the blank at cell {blank}")]
    IllegalMove { direction: String, blank: usize },

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    #[error("corrupt pattern database {path}: {reason}")]
    CorruptDatabase { path: PathBuf, reason: String },

    #[error("pattern database build failed: {0}")]
    BuildFailed(String),

    #[error("unknown kind '{0}'")]
    UnknownKind(String),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
