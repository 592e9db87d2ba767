use crate::heuristic::Predictor;
use crate::puzzle::{Board, Direction};

/// Index of a [`Node`] in the [`NodeArena`] that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A board reached by a path: cost so far, cached heuristic, and the step
/// that produced it. Parents are arena indices, so a node never owns its
/// ancestors.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    state: Board,
    path_cost: u32,
    heuristic: Option<u32>,
    parent: Option<NodeId>,
    action: Option<Direction>,
}

impl Node {
    pub fn root(state: Board) -> Self {
        Self {
            state,
            path_cost: 0,
            heuristic: None,
            parent: None,
            action: None,
        }
    }

    pub fn new(state: Board, path_cost: u32, parent: Option<NodeId>, action: Option<Direction>) -> Self {
        Self {
            state,
            path_cost,
            heuristic: None,
            parent,
            action,
        }
    }

    pub fn with_heuristic(mut self, heuristic: u32) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn state(&self) -> &Board {
        &self.state
    }

    pub fn path_cost(&self) -> u32 {
        self.path_cost
    }

    /// `None` until a predictor has scored this node.
    pub fn heuristic(&self) -> Option<u32> {
        self.heuristic
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn action(&self) -> Option<Direction> {
        self.action
    }

    /// `g + h` once scored.
    pub fn evaluation(&self) -> Option<u32> {
        self.heuristic.map(|h| self.path_cost.saturating_add(h))
    }

    /// Scores the node on first use and returns the cached value after that.
    pub fn evaluate(&mut self, predictor: &dyn Predictor, goal: &Board) -> u32 {
        *self
            .heuristic
            .get_or_insert_with(|| predictor.heuristic(&self.state, goal))
    }

    /// Child reached by moving the blank in `direction` from this node (stored at `id`).
    pub fn child(&self, id: NodeId, direction: Direction, state: Board) -> Node {
        Node::new(
            state,
            self.path_cost.saturating_add(direction.step_cost()),
            Some(id),
            Some(direction),
        )
    }
}

/// Append-only node storage for one search. IDA* uses it as a stack via
/// [`truncate`](Self::truncate).
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Nodes from the root down to `id`, with parents re-pointed at their
    /// index in the returned path.
    pub fn path_to(&self, id: NodeId) -> Vec<Node> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.nodes[node_id.0];
            path.push(node);
            current = node.parent;
        }
        path.reverse();

        for (index, node) in path.iter_mut().enumerate() {
            node.parent = linked(index);
        }
        path
    }
}

/// Parent of the node at `index` in a root-first path.
pub(crate) fn linked(index: usize) -> Option<NodeId> {
    index.checked_sub(1).map(NodeId)
}
