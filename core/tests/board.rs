mod common;

use common::{board, eight_puzzle};
use std::collections::HashSet;
use tilesearch_core::PuzzleError;
use tilesearch_core::puzzle::{Board, Direction};

#[test]
fn test_goal_board_layout() {
    let goal = Board::goal(3).unwrap();
    assert_eq!(goal.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
    assert_eq!(goal.blank(), 8);
    assert_eq!(goal.dimension(), 3);
    assert_eq!(goal.cell_count(), 9);
}

#[test]
fn test_rejects_bad_boards() {
    assert!(matches!(Board::new(5, &[0; 25]), Err(PuzzleError::UnsupportedDimension(5))));
    assert!(matches!(Board::new(1, &[0]), Err(PuzzleError::UnsupportedDimension(1))));
    assert!(matches!(
        Board::new(3, &[1, 2, 3, 0]),
        Err(PuzzleError::LengthMismatch { expected: 9, actual: 4, .. })
    ));
    assert!(matches!(
        Board::new(3, &[1, 1, 3, 4, 5, 6, 7, 8, 0]),
        Err(PuzzleError::NotAPermutation { cells: 9 })
    ));
    assert!(matches!(
        Board::new(2, &[1, 2, 3, 4]),
        Err(PuzzleError::NotAPermutation { cells: 4 })
    ));
}

#[test]
fn test_corner_blank_has_two_moves() {
    let goal = Board::goal(4).unwrap();
    let actions: Vec<Direction> = goal.actions().collect();
    assert_eq!(actions, vec![Direction::Up, Direction::Left]);

    let centre = board(3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]);
    assert_eq!(centre.actions().count(), 4);
    assert_eq!(centre.successors().count(), 4);
}

#[test]
fn test_next_slides_a_tile_into_the_blank() {
    let start = board(3, &[1, 2, 3, 4, 0, 5, 7, 8, 6]);
    let moved = start.next(Direction::Right).unwrap();
    assert_eq!(moved.tiles(), &[1, 2, 3, 4, 5, 0, 7, 8, 6]);
    assert_eq!(moved.blank(), 5);
    // source board is untouched
    assert_eq!(start.blank(), 4);

    let back = moved.next(Direction::Right.inverse()).unwrap();
    assert_eq!(back, start);
}

#[test]
fn test_every_move_is_undone_by_its_inverse() {
    let mut moves = 0;
    for state in &eight_puzzle().boards {
        for direction in state.actions() {
            let moved = state.next(direction).unwrap();
            assert_eq!(moved.next(direction.inverse()).unwrap(), *state, "{state:?} {direction}");
            moves += 1;
        }
    }
    // every reachable 3x3 board has between two and four legal moves
    assert!(moves >= 2 * eight_puzzle().boards.len());
}

#[test]
fn test_illegal_move_is_an_error() {
    let goal = Board::goal(3).unwrap();
    let result = goal.next(Direction::Down);
    assert!(matches!(result, Err(PuzzleError::IllegalMove { blank: 8, .. })));
}

#[test]
fn test_equality_and_hashing_follow_tiles() {
    let a = board(2, &[1, 2, 3, 0]);
    let b = Board::goal(2).unwrap();
    let c = board(2, &[1, 2, 0, 3]);
    assert_eq!(a, b);
    assert_eq!(a.key(), b.key());
    assert_ne!(a, c);

    let set: HashSet<Board> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_keys_are_unique_across_the_eight_puzzle() {
    let distances = common::eight_puzzle();
    assert_eq!(distances.boards.len(), 181_440);
    let keys: HashSet<u64> = distances.boards.iter().map(Board::key).collect();
    assert_eq!(keys.len(), distances.boards.len());
}

#[test]
fn test_positions_index_by_tile() {
    let start = board(3, &[8, 6, 7, 2, 5, 4, 3, 0, 1]);
    let positions = start.positions();
    assert_eq!(positions[0], 7);
    assert_eq!(positions[8], 0);
    assert_eq!(start.position_of(1), Some(8));
    assert_eq!(start.row_col(7), (2, 1));
    assert_eq!(start.tile_at(4), 5);
}

#[test]
fn test_display_renders_rows() {
    let goal = Board::goal(2).unwrap();
    assert_eq!(goal.to_string(), " 1  2\n 3   \n");
}

#[test]
fn test_direction_serde() {
    assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), r#""left""#);
    let parsed: Direction = serde_json::from_str(r#""up""#).unwrap();
    assert_eq!(parsed, Direction::Up);
    assert_eq!(Direction::Down.to_string(), "down");
    assert_eq!(Direction::Up.delta(), (-1, 0));
}
