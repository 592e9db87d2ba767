mod board;
mod direction;
mod problem;

pub use board::{Board, MAX_CELLS, MAX_DIMENSION, MIN_DIMENSION};
pub use direction::Direction;
pub use problem::Problem;
