mod common;

use common::{assert_valid_path, board, eight_puzzle, scramble};
use std::sync::Arc;
use std::time::Duration;
use tilesearch_core::heuristic::{ManhattanPredictor, ZeroPredictor};
use tilesearch_core::puzzle::{Board, Problem};
use tilesearch_core::search::{IdaStarSearcher, SearchOutcome, Searcher};
use tilesearch_core::{PruningPolicy, SearchConfig};

#[test]
fn test_ida_star_is_optimal() {
    let goal = Board::goal(3).unwrap();
    for seed in 10..16 {
        let start = scramble(&goal, 24, seed);
        let problem = Problem::new(start, goal).unwrap();
        let mut searcher = IdaStarSearcher::new(Arc::new(ManhattanPredictor));
        let outcome = searcher.search(&problem);

        assert_eq!(outcome.cost(), eight_puzzle().of(&start), "seed {seed}");
        assert_valid_path(&problem, outcome.solution().unwrap());
    }
}

#[test]
fn test_threshold_grows_to_solution_cost() {
    let problem = Problem::from_tiles(3, &[8, 6, 7, 2, 5, 4, 3, 0, 1], &[1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    let mut searcher = IdaStarSearcher::new(Arc::new(ManhattanPredictor));
    let outcome = searcher.search(&problem);

    assert_eq!(outcome.cost(), Some(31));
    let stats = searcher.stats();
    assert_eq!(stats.final_threshold, Some(31));
    // Manhattan is 21 here and bounds keep the parity of the solution
    assert!((1..=6).contains(&stats.iterations));
    assert!(stats.max_depth <= 31);
}

#[test]
fn test_transposition_cache_does_not_change_the_answer() {
    let goal = Board::goal(3).unwrap();
    let no_cache = SearchConfig {
        transposition_capacity: 0,
        ..SearchConfig::default()
    };
    for seed in 20..24 {
        let start = scramble(&goal, 26, seed);
        let problem = Problem::new(start, goal).unwrap();

        let mut cached = IdaStarSearcher::new(Arc::new(ManhattanPredictor));
        let mut plain = IdaStarSearcher::with_config(Arc::new(ManhattanPredictor), no_cache.clone());
        let with_cache = cached.search(&problem);
        let without = plain.search(&problem);

        assert_eq!(with_cache.cost(), without.cost());
        assert_eq!(plain.stats().transposition_hits, 0);
        assert!(cached.stats().expanded <= plain.stats().expanded);
    }
}

#[test]
fn test_one_move_on_4x4() {
    let problem = Problem::to_solved(board(4, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, 15])).unwrap();
    let mut searcher = IdaStarSearcher::new(Arc::new(ManhattanPredictor));
    let outcome = searcher.search(&problem);
    assert_eq!(outcome.cost(), Some(1));
    assert_eq!(searcher.stats().iterations, 1);
}

#[test]
fn test_moderate_4x4_instance() {
    let goal = Board::goal(4).unwrap();
    let start = scramble(&goal, 30, 42);
    let problem = Problem::new(start, goal).unwrap();

    let mut searcher = IdaStarSearcher::new(Arc::new(ManhattanPredictor));
    let outcome = searcher.search(&problem);
    let solution = outcome.solution().expect("30-move scramble is well within budget");
    assert!(solution.cost() <= 30);
    assert_eq!(solution.cost() % 2, 30 % 2);
    assert_valid_path(&problem, solution);
}

#[test]
fn test_pruning_still_solves_easy_instances() {
    let goal = Board::goal(3).unwrap();
    let config = SearchConfig::default().with_pruning(PruningPolicy::aggressive());
    for seed in 30..34 {
        let start = scramble(&goal, 10, seed);
        let problem = Problem::new(start, goal).unwrap();
        let mut searcher = IdaStarSearcher::with_config(Arc::new(ManhattanPredictor), config.clone());
        let outcome = searcher.search(&problem);
        if let Some(solution) = outcome.solution() {
            assert_valid_path(&problem, solution);
            assert!(solution.cost() >= eight_puzzle().of(&start).unwrap());
        }
    }
}

#[test]
fn test_zero_budget_times_out() {
    let goal = Board::goal(3).unwrap();
    let problem = Problem::new(scramble(&goal, 20, 5), goal).unwrap();
    let mut searcher =
        IdaStarSearcher::with_config(Arc::new(ZeroPredictor), SearchConfig::new(Duration::ZERO));
    assert!(matches!(searcher.search(&problem), SearchOutcome::TimedOut));
}

#[test]
fn test_pruning_policy_defaults() {
    let policy = PruningPolicy::default();
    assert!(!policy.enabled);
    assert_eq!(policy.min_depth, 5);
    assert_eq!(policy.depth_factor, 6);
    assert!(PruningPolicy::aggressive().enabled);
}
