use super::{BestFirstSearcher, BidirectionalIdaStarSearcher, IdaStarSearcher, Searcher};
use crate::error::PuzzleError;
use crate::heuristic::Predictor;
use crate::search_config::SearchConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearcherKind {
    #[default]
    #[serde(rename = "astar")]
    AStar,
    #[serde(rename = "dijkstra")]
    Dijkstra,
    #[serde(rename = "idastar")]
    IdaStar,
    #[serde(rename = "bidirectional-idastar")]
    BidirectionalIdaStar,
}

impl SearcherKind {
    pub const ALL: [SearcherKind; 4] = [
        SearcherKind::AStar,
        SearcherKind::Dijkstra,
        SearcherKind::IdaStar,
        SearcherKind::BidirectionalIdaStar,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearcherKind::AStar => "astar",
            SearcherKind::Dijkstra => "dijkstra",
            SearcherKind::IdaStar => "idastar",
            SearcherKind::BidirectionalIdaStar => "bidirectional-idastar",
        }
    }

    /// Dijkstra ignores `predictor`.
    pub fn build(self, predictor: Arc<dyn Predictor>, config: SearchConfig) -> Box<dyn Searcher> {
        match self {
            SearcherKind::AStar => Box::new(BestFirstSearcher::astar(predictor).with_config(config)),
            SearcherKind::Dijkstra => Box::new(BestFirstSearcher::dijkstra().with_config(config)),
            SearcherKind::IdaStar => Box::new(IdaStarSearcher::with_config(predictor, config)),
            SearcherKind::BidirectionalIdaStar => {
                Box::new(BidirectionalIdaStarSearcher::with_config(predictor, config))
            }
        }
    }
}

impl fmt::Display for SearcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearcherKind {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(SearcherKind::AStar),
            "dijkstra" => Ok(SearcherKind::Dijkstra),
            "idastar" | "ida*" => Ok(SearcherKind::IdaStar),
            "bidirectional-idastar" | "bidirectional" => Ok(SearcherKind::BidirectionalIdaStar),
            _ => Err(PuzzleError::UnknownKind(s.to_string())),
        }
    }
}
