mod common;

use common::{eight_puzzle, scramble};
use tilesearch_core::heuristic::HeuristicKind;
use tilesearch_core::pattern::{BuildMethod, PartitionScheme, PatternConfig};
use tilesearch_core::puzzle::{Board, Problem};
use tilesearch_core::search::SearcherKind;
use tilesearch_core::{PuzzleError, SearchConfig};

#[test]
fn test_searcher_kind_default() {
    assert_eq!(SearcherKind::default(), SearcherKind::AStar);
    assert_eq!(HeuristicKind::default(), HeuristicKind::Manhattan);
}

#[test]
fn test_searcher_kind_from_str() {
    assert_eq!("astar".parse::<SearcherKind>().unwrap(), SearcherKind::AStar);
    assert_eq!("A*".parse::<SearcherKind>().unwrap(), SearcherKind::AStar);
    assert_eq!("DIJKSTRA".parse::<SearcherKind>().unwrap(), SearcherKind::Dijkstra);
    assert_eq!("ida*".parse::<SearcherKind>().unwrap(), SearcherKind::IdaStar);
    assert_eq!(
        "bidirectional-idastar".parse::<SearcherKind>().unwrap(),
        SearcherKind::BidirectionalIdaStar
    );
    assert!(matches!("bfs".parse::<SearcherKind>(), Err(PuzzleError::UnknownKind(_))));
}

#[test]
fn test_heuristic_kind_from_str() {
    assert_eq!("hamming".parse::<HeuristicKind>().unwrap(), HeuristicKind::Misplaced);
    assert_eq!("PDB".parse::<HeuristicKind>().unwrap(), HeuristicKind::Pattern);
    assert!(matches!("euclid".parse::<HeuristicKind>(), Err(PuzzleError::UnknownKind(_))));
    for kind in HeuristicKind::ALL {
        assert_eq!(kind.as_str().parse::<HeuristicKind>().unwrap(), kind);
    }
}

#[test]
fn test_kind_serde_round_names() {
    for kind in SearcherKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.as_str()));
        let parsed: SearcherKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, kind);
    }
    assert_eq!(serde_json::to_string(&HeuristicKind::Blank).unwrap(), r#""blank""#);
    assert_eq!(serde_json::to_string(&BuildMethod::Bidirectional).unwrap(), r#""bidirectional""#);
    assert_eq!(serde_json::to_string(&PartitionScheme::SixSixThree).unwrap(), r#""six-six-three""#);
    assert!(serde_json::from_str::<SearcherKind>(r#""greedy""#).is_err());
}

#[test]
fn test_every_kind_solves_with_every_heuristic() {
    let goal = Board::goal(3).unwrap();
    let start = scramble(&goal, 16, 2024);
    let problem = Problem::new(start, goal).unwrap();
    let expected = eight_puzzle().of(&start);

    for heuristic in HeuristicKind::ALL {
        let predictor = heuristic.build(&goal, &PatternConfig::default()).unwrap();
        for kind in SearcherKind::ALL {
            let mut searcher = kind.build(predictor.clone(), SearchConfig::default());
            assert_eq!(searcher.name(), kind.as_str());
            let outcome = searcher.search(&problem);
            assert_eq!(outcome.cost(), expected, "{kind} with {heuristic}");
        }
    }
}

#[test]
fn test_pattern_kind_needs_a_supported_board() {
    let goal = Board::goal(2).unwrap();
    let predictor = HeuristicKind::Pattern.build(&goal, &PatternConfig::default()).unwrap();
    assert_eq!(predictor.name(), "pattern");
    assert_eq!(predictor.heuristic(&goal, &goal), 0);
}
