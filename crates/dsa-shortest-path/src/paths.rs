//! The shared result shape every engine in this crate returns: per-node
//! distance plus enough predecessor information to reconstruct a path.
//! The predecessor map is always populated (it is cheap to keep), and
//! path reconstruction is simply a method callers can ignore when they
//! only want distances.

use std::collections::HashMap;

use dsa_graph::{ArcIndex, NodeIndex};

/// Distances and predecessor arcs computed by a shortest-path engine,
/// rooted at one source node.
pub struct ShortestPaths<W> {
    pub(crate) distance: HashMap<NodeIndex, W>,
    pub(crate) predecessor: HashMap<NodeIndex, (NodeIndex, ArcIndex)>,
}

impl<W: Copy> ShortestPaths<W> {
    pub fn new() -> Self {
        Self {
            distance: HashMap::new(),
            predecessor: HashMap::new(),
        }
    }

    /// The shortest known distance to `node`, or `None` if it is
    /// unreachable from the source.
    #[must_use]
    pub fn distance_to(&self, node: NodeIndex) -> Option<W> {
        self.distance.get(&node).copied()
    }

    #[must_use]
    pub fn is_reachable(&self, node: NodeIndex) -> bool {
        self.distance.contains_key(&node)
    }

    /// The predecessor node and the arc used to reach `node` on some
    /// shortest path, or `None` for the source itself or an unreached node.
    #[must_use]
    pub fn predecessor_of(&self, node: NodeIndex) -> Option<(NodeIndex, ArcIndex)> {
        self.predecessor.get(&node).copied()
    }

    /// Reconstructs the arc sequence of a shortest path from the source to
    /// `node`; `None` if `node` is unreachable. Empty (not `None`) if
    /// `node` is the source itself.
    #[must_use]
    pub fn path_to(&self, node: NodeIndex) -> Option<Vec<ArcIndex>> {
        if !self.is_reachable(node) {
            return None;
        }
        let mut path = Vec::new();
        let mut cur = node;
        while let Some((prev, arc)) = self.predecessor.get(&cur) {
            path.push(*arc);
            cur = *prev;
        }
        path.reverse();
        Some(path)
    }
}

impl<W: Copy> Default for ShortestPaths<W> {
    fn default() -> Self {
        Self::new()
    }
}
