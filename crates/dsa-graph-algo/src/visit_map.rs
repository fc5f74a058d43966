//! A dense "has this node been seen" set, sized to the graph's current node
//! count. Traversal owns this itself rather than reusing the graph's own
//! per-node [`dsa_graph::TraversalFlags`] bit, so a caller can run a
//! traversal while still freely reading (or even mutating payloads of) the
//! graph through the `&G`/`&mut G` it is handed. Backed by a
//! [`fixedbitset::FixedBitSet`] rather than `Vec<bool>` for the same reason
//! a plain bit per node is cheaper to scan and clear than a byte per node.

use dsa_graph::NodeIndex;
use fixedbitset::FixedBitSet;

#[derive(Clone, Debug, Default)]
pub struct VisitedSet(FixedBitSet);

impl VisitedSet {
    #[must_use]
    pub fn with_capacity(n: usize) -> Self {
        Self(FixedBitSet::with_capacity(n))
    }

    fn ensure(&mut self, idx: usize) {
        if idx >= self.0.len() {
            self.0.grow(idx + 1);
        }
    }

    /// Marks `node` visited; returns `true` if it was not already visited.
    pub fn visit(&mut self, node: NodeIndex) -> bool {
        self.ensure(node.0);
        let was = self.0.contains(node.0);
        self.0.insert(node.0);
        !was
    }

    #[must_use]
    pub fn is_visited(&self, node: NodeIndex) -> bool {
        node.0 < self.0.len() && self.0.contains(node.0)
    }
}
