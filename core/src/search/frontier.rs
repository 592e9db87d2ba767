use super::node::Node;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// `(primary, secondary)`; smaller is better.
pub type Priority = (u32, u32);

/// How a frontier ranks its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Evaluation {
    /// `f = g + h`, ties broken by lower `g`. Unscored nodes rank as `h = 0`.
    AStar,
    /// `g` alone
    Dijkstra,
}

impl Evaluation {
    pub fn priority(self, node: &Node) -> Priority {
        match self {
            Evaluation::AStar => (
                node.path_cost()
                    .saturating_add(node.heuristic().unwrap_or_default()),
                node.path_cost(),
            ),
            Evaluation::Dijkstra => (node.path_cost(), 0),
        }
    }
}

struct Queued {
    priority: Priority,
    sequence: u64,
    node: Node,
}

/// Priority queue holding at most one node per board.
///
/// Offering a board that is already queued keeps whichever entry ranks better,
/// and equal ranks are served first in, first out.
pub struct Frontier {
    evaluation: Evaluation,
    order: BTreeSet<(Priority, u64, u64)>,
    queued: FxHashMap<u64, Queued>,
    next_sequence: u64,
}

impl Frontier {
    pub fn new(evaluation: Evaluation) -> Self {
        Self {
            evaluation,
            order: BTreeSet::new(),
            queued: FxHashMap::default(),
            next_sequence: 0,
        }
    }

    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    /// Queues `node`, or replaces the queued node for the same board when
    /// `node` ranks strictly better. Returns whether the frontier changed.
    pub fn offer(&mut self, node: Node) -> bool {
        let key = node.state().key();
        let priority = self.evaluation.priority(&node);

        if let Some(existing) = self.queued.get(&key) {
            if priority >= existing.priority {
                return false;
            }
            self.order.remove(&(existing.priority, existing.sequence, key));
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.order.insert((priority, sequence, key));
        self.queued.insert(
            key,
            Queued {
                priority,
                sequence,
                node,
            },
        );
        true
    }

    pub fn poll(&mut self) -> Option<Node> {
        let (_, _, key) = self.order.pop_first()?;
        self.queued.remove(&key).map(|queued| queued.node)
    }

    pub fn peek(&self) -> Option<&Node> {
        let (_, _, key) = self.order.first()?;
        self.queued.get(key).map(|queued| &queued.node)
    }

    /// Whether a node for the same board is queued.
    pub fn contains(&self, node: &Node) -> bool {
        self.queued.contains_key(&node.state().key())
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.queued.clear();
    }
}
