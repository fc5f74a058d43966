//! Min-cut extraction: after max-flow terminates, the set of nodes
//! reachable from the source in the residual graph is the source side of
//! the minimum cut; the cut consists of arcs from that set to its
//! complement.

use std::collections::HashSet;
use std::ops::{Add, Sub};

use dsa_graph::{ArcIndex, NodeIndex};

use crate::network::FlowNetwork;

pub struct MinCut<C> {
    pub capacity: C,
    pub source_side: HashSet<NodeIndex>,
    pub cut_arcs: Vec<ArcIndex>,
}

/// Computes the minimum S-T cut of a network whose flow has already been
/// driven to its maximum (by [`crate::ford_fulkerson`], [`crate::dinic`], or
/// any other max-flow driver in this crate).
#[must_use]
pub fn min_cut<C>(net: &FlowNetwork<C>, source: NodeIndex) -> MinCut<C>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    let mut reachable = HashSet::new();
    reachable.insert(source);
    let mut stack = vec![source];
    while let Some(node) = stack.pop() {
        for arc in net.admissible_arcs(node) {
            let next = net.tgt_node(arc);
            if reachable.insert(next) {
                stack.push(next);
            }
        }
    }

    let mut capacity = C::default();
    let mut cut_arcs = Vec::new();
    for &arc in net.forward_arcs() {
        let src_in = reachable.contains(&net.src_node(arc));
        let tgt_in = reachable.contains(&net.tgt_node(arc));
        if src_in && !tgt_in {
            capacity = capacity + net.capacity_of(arc);
            cut_arcs.push(arc);
        }
    }

    MinCut {
        capacity,
        source_side: reachable,
        cut_arcs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dinic;

    #[test]
    fn min_cut_equals_max_flow() {
        let mut net: FlowNetwork<i64> = FlowNetwork::new();
        let s = net.add_node();
        let a = net.add_node();
        let b = net.add_node();
        let t = net.add_node();
        net.add_edge(s, a, 10).unwrap();
        net.add_edge(s, b, 10).unwrap();
        net.add_edge(a, b, 1).unwrap();
        net.add_edge(a, t, 10).unwrap();
        net.add_edge(b, t, 10).unwrap();

        let max_flow = dinic(&mut net, s, t).unwrap();
        let cut = min_cut(&net, s);
        assert_eq!(cut.capacity, max_flow);
        assert!(cut.source_side.contains(&s));
        assert!(!cut.source_side.contains(&t));
    }

    #[test]
    fn clrs_textbook_min_cut_has_two_arcs() {
        let mut net: FlowNetwork<i64> = FlowNetwork::new();
        let nodes: Vec<_> = (0..6).map(|_| net.add_node()).collect();
        for (u, v, cap) in [
            (0, 1, 16),
            (0, 2, 13),
            (1, 2, 10),
            (1, 3, 12),
            (2, 1, 4),
            (2, 4, 14),
            (3, 2, 9),
            (3, 5, 20),
            (4, 3, 7),
            (4, 5, 4),
        ] {
            net.add_edge(nodes[u], nodes[v], cap).unwrap();
        }
        dinic(&mut net, nodes[0], nodes[5]).unwrap();
        let cut = min_cut(&net, nodes[0]);
        assert_eq!(cut.capacity, 23);
        assert_eq!(cut.cut_arcs.len(), 2);
    }
}
