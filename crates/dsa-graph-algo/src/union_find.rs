//! A disjoint-set forest with union-by-rank and path compression, the
//! helper Kruskal's algorithm needs to test whether two nodes are already
//! in the same tree. Keyed by [`dsa_graph::NodeIndex`] rather than a raw
//! `usize`.

use std::collections::HashMap;

use dsa_graph::NodeIndex;

pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
    index: HashMap<NodeIndex, usize>,
}

impl UnionFind {
    pub fn new(nodes: impl IntoIterator<Item = NodeIndex>) -> Self {
        let mut parent = Vec::new();
        let mut rank = Vec::new();
        let mut index = HashMap::new();
        for node in nodes {
            index.insert(node, parent.len());
            parent.push(parent.len());
            rank.push(0);
        }
        Self { parent, rank, index }
    }

    fn find_compress(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find_compress(self.parent[x]);
            self.parent[x] = root;
        }
        self.parent[x]
    }

    pub fn find(&mut self, node: NodeIndex) -> usize {
        let x = self.index[&node];
        self.find_compress(x)
    }

    /// Unifies the two sets containing `a` and `b`. Returns `false` (no-op)
    /// if they were already the same set.
    pub fn union(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.rank[ra] < self.rank[rb] {
            self.parent[ra] = rb;
        } else if self.rank[ra] > self.rank[rb] {
            self.parent[rb] = ra;
        } else {
            self.parent[rb] = ra;
            self.rank[ra] += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_merges_sets_and_find_agrees() {
        let nodes = [NodeIndex(0), NodeIndex(1), NodeIndex(2)];
        let mut uf = UnionFind::new(nodes);
        assert_ne!(uf.find(nodes[0]), uf.find(nodes[1]));
        assert!(uf.union(nodes[0], nodes[1]));
        assert_eq!(uf.find(nodes[0]), uf.find(nodes[1]));
        assert!(!uf.union(nodes[0], nodes[1]));
        assert_ne!(uf.find(nodes[0]), uf.find(nodes[2]));
    }
}
