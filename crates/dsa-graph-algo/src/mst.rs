//! Minimum spanning tree: Kruskal's algorithm over a sorted arc list with
//! [`crate::union_find::UnionFind`] cycle detection, and Prim's algorithm
//! seeded from one node and grown via a priority queue.

use dsa_graph::{ArcIndex, GraphRepr, NodeIndex};
use dsa_heap::BinaryHeap;

use crate::union_find::UnionFind;
use crate::visit_map::VisitedSet;

/// Kruskal: sort every arc by weight, greedily add it unless its endpoints
/// are already connected. Runs over the whole graph, not just one
/// component, so the result may be a spanning *forest* if `g` is
/// disconnected.
pub fn kruskal<G, N, E, W, F>(g: &G, weight: F) -> Vec<ArcIndex>
where
    G: GraphRepr<N, E>,
    W: Ord,
    F: Fn(&E) -> W,
{
    let mut arcs = g.arcs();
    arcs.sort_by_key(|&a| weight(g.arc_info(a).expect("live arc has info")));

    let mut uf = UnionFind::new(g.nodes());
    let mut tree = Vec::new();
    for arc in arcs {
        let (u, v) = (g.src_node(arc), g.tgt_node(arc));
        if uf.union(u, v) {
            tree.push(arc);
        }
    }
    tree
}

/// Prim, seeded from `source`: grows one tree by repeatedly adding the
/// cheapest arc crossing the frontier. Only reaches `source`'s connected
/// component; a disconnected graph leaves the rest unvisited rather than
/// silently returning a forest, since Prim has no notion of "restart at a
/// new component".
pub fn prim<G, N, E, W, F>(g: &G, source: NodeIndex, weight: F) -> Vec<ArcIndex>
where
    G: GraphRepr<N, E>,
    W: Ord + Copy,
    F: Fn(&E) -> W,
{
    let mut in_tree = VisitedSet::with_capacity(g.nodes().len());
    in_tree.visit(source);
    let mut frontier: BinaryHeap<W, (NodeIndex, ArcIndex)> = BinaryHeap::new();
    for arc in g.incident_arcs(source) {
        if let Some(other) = g.connected_node(arc, source) {
            frontier.push(weight(g.arc_info(arc).unwrap()), (other, arc));
        }
    }

    let mut tree = Vec::new();
    while let Some((_, (node, arc))) = frontier.pop() {
        if !in_tree.visit(node) {
            continue;
        }
        tree.push(arc);
        for next_arc in g.incident_arcs(node) {
            if let Some(other) = g.connected_node(next_arc, node) {
                if !in_tree.is_visited(other) {
                    frontier.push(weight(g.arc_info(next_arc).unwrap()), (other, next_arc));
                }
            }
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_graph::{ListGraph, Undirected};

    fn sample() -> (ListGraph<(), u32, Undirected>, Vec<NodeIndex>) {
        // A small weighted graph with one obvious minimum spanning tree.
        let mut g = ListGraph::new();
        let nodes: Vec<_> = (0..4).map(|_| g.insert_node(())).collect();
        g.insert_arc(nodes[0], nodes[1], 1).unwrap();
        g.insert_arc(nodes[1], nodes[2], 2).unwrap();
        g.insert_arc(nodes[2], nodes[3], 3).unwrap();
        g.insert_arc(nodes[0], nodes[3], 10).unwrap();
        g.insert_arc(nodes[0], nodes[2], 10).unwrap();
        (g, nodes)
    }

    fn total_weight(g: &ListGraph<(), u32, Undirected>, tree: &[ArcIndex]) -> u32 {
        tree.iter().map(|&a| *g.arc_info(a).unwrap()).sum()
    }

    #[test]
    fn kruskal_finds_the_minimum_tree() {
        let (g, nodes) = sample();
        let tree = kruskal(&g, |&w| w);
        assert_eq!(tree.len(), nodes.len() - 1);
        assert_eq!(total_weight(&g, &tree), 6);
    }

    #[test]
    fn prim_agrees_with_kruskal_on_total_weight() {
        let (g, nodes) = sample();
        let tree = prim(&g, nodes[0], |&w| w);
        assert_eq!(tree.len(), nodes.len() - 1);
        assert_eq!(total_weight(&g, &tree), 6);
    }
}
