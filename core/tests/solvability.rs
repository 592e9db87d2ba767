mod common;

use common::{board, eight_puzzle, exact_distances};
use std::sync::Arc;
use tilesearch_core::heuristic::ManhattanPredictor;
use tilesearch_core::puzzle::{Board, Problem};
use tilesearch_core::search::{SearchOutcome, Searcher, SearcherKind};
use tilesearch_core::{PuzzleError, SearchConfig};

fn permutations(items: &[u8]) -> Vec<Vec<u8>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut all = Vec::new();
    for (index, &first) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(index);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            all.push(tail);
        }
    }
    all
}

#[test]
fn test_single_swap_is_unsolvable() {
    let problem = Problem::from_tiles(3, &[1, 2, 3, 4, 5, 6, 8, 7, 0], &[1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    assert!(!problem.solvable());
}

#[test]
fn test_one_move_from_goal_is_solvable() {
    let problem = Problem::to_solved(board(4, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, 15])).unwrap();
    assert!(problem.solvable());
}

#[test]
fn test_analytic_check_matches_reachability_on_2x2() {
    let goal = Board::goal(2).unwrap();
    let reachable = exact_distances(&goal);
    assert_eq!(reachable.boards.len(), 12);

    for tiles in permutations(&[0, 1, 2, 3]) {
        let start = board(2, &tiles);
        let problem = Problem::new(start, goal).unwrap();
        assert_eq!(problem.solvable(), reachable.of(&start).is_some(), "tiles {tiles:?}");
    }
}

fn assert_matches_reachability(tiles: &[u8; 9], goal: &Board, reachable_count: &mut usize) {
    let start = board(3, tiles);
    let solvable = Problem::new(start, *goal).unwrap().solvable();
    assert_eq!(solvable, eight_puzzle().of(&start).is_some(), "tiles {tiles:?}");
    if solvable {
        *reachable_count += 1;
    }
}

#[test]
fn test_analytic_check_matches_reachability_on_every_3x3_board() {
    let goal = Board::goal(3).unwrap();
    let mut tiles: [u8; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];
    let mut counters = [0usize; 9];
    let mut checked = 1;
    let mut solvable = 0;
    assert_matches_reachability(&tiles, &goal, &mut solvable);

    // Heap's algorithm: each step is one swap away from the previous permutation
    let mut i = 1;
    while i < tiles.len() {
        if counters[i] < i {
            let other = if i % 2 == 0 { 0 } else { counters[i] };
            tiles.swap(other, i);
            assert_matches_reachability(&tiles, &goal, &mut solvable);
            checked += 1;
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }

    assert_eq!(checked, 362_880);
    assert_eq!(solvable, 181_440);
}

#[test]
fn test_analytic_check_matches_reachability_with_custom_goal() {
    // goal with the blank in the top row
    let goal = board(3, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    let reachable = exact_distances(&goal);
    let samples = [
        [1, 2, 3, 4, 5, 6, 7, 8, 0],
        [8, 7, 6, 5, 4, 3, 2, 1, 0],
        [1, 0, 2, 3, 4, 5, 6, 7, 8],
        [1, 2, 0, 3, 4, 5, 6, 7, 8],
        [2, 1, 0, 3, 4, 5, 6, 7, 8],
    ];
    for tiles in samples {
        let start = board(3, &tiles);
        let problem = Problem::new(start, goal).unwrap();
        assert_eq!(problem.solvable(), reachable.of(&start).is_some(), "tiles {tiles:?}");
    }
}

#[test]
fn test_even_board_blank_row_parity() {
    let goal = Board::goal(4).unwrap();
    let shifted = goal.next(tilesearch_core::Direction::Up).unwrap();
    assert!(Problem::new(shifted, goal).unwrap().solvable());

    // swap two tiles and move the blank up one row: still the wrong class
    let swapped = board(4, &[2, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0, 13, 14, 15, 12]);
    assert!(!Problem::new(swapped, goal).unwrap().solvable());
}

#[test]
fn test_mismatched_dimensions_are_rejected() {
    let result = Problem::new(Board::goal(3).unwrap(), Board::goal(4).unwrap());
    assert!(matches!(result, Err(PuzzleError::DimensionMismatch { expected: 3, actual: 4 })));
}

#[test]
fn test_every_searcher_reports_unsolvable_without_searching() {
    let problem = Problem::from_tiles(3, &[1, 2, 3, 4, 5, 6, 8, 7, 0], &[1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    for kind in SearcherKind::ALL {
        let mut searcher = kind.build(Arc::new(ManhattanPredictor), SearchConfig::default());
        let outcome = searcher.search(&problem);
        assert!(matches!(outcome, SearchOutcome::Unsolvable), "{kind}");
        assert_eq!(searcher.stats().expanded, 0);
        assert_eq!(searcher.stats().generated, 0);
    }
}
