//! Augmenting-path search strategies shared by [`crate::ford_fulkerson`] and
//! [`crate::edmonds_karp`]: repeatedly find any augmenting source->sink path
//! in the residual graph and augment by its bottleneck capacity, with
//! termination depending on the path-selection rule. Both searches only
//! ever look at arcs with positive residual capacity, so they operate
//! directly on the residual network rather than needing a separate
//! residual-graph view.

use std::collections::{HashMap, VecDeque};
use std::ops::{Add, Sub};

use dsa_graph::{ArcIndex, NodeIndex};

use crate::network::FlowNetwork;

fn reconstruct<C>(source: NodeIndex, sink: NodeIndex, came_from: &HashMap<NodeIndex, ArcIndex>, net: &FlowNetwork<C>) -> Vec<ArcIndex>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    let mut path = Vec::new();
    let mut node = sink;
    while node != source {
        let arc = came_from[&node];
        path.push(arc);
        node = net.src_node(arc);
    }
    path.reverse();
    path
}

/// Depth-first augmenting-path search (Ford-Fulkerson's generic rule, using
/// DFS as the concrete choice).
pub fn find_path_dfs<C>(net: &FlowNetwork<C>, source: NodeIndex, sink: NodeIndex) -> Option<Vec<ArcIndex>>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    let mut visited = std::collections::HashSet::new();
    let mut came_from = HashMap::new();
    let mut stack = vec![source];
    visited.insert(source);

    while let Some(node) = stack.pop() {
        if node == sink {
            return Some(reconstruct(source, sink, &came_from, net));
        }
        for arc in net.admissible_arcs(node) {
            let next = net.tgt_node(arc);
            if visited.insert(next) {
                came_from.insert(next, arc);
                stack.push(next);
            }
        }
    }
    None
}

/// Breadth-first augmenting-path search — Edmonds-Karp's path-selection rule,
/// which bounds the number of augmentations at O(V*E).
pub fn find_path_bfs<C>(net: &FlowNetwork<C>, source: NodeIndex, sink: NodeIndex) -> Option<Vec<ArcIndex>>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    let mut visited = std::collections::HashSet::new();
    let mut came_from = HashMap::new();
    let mut queue = VecDeque::from([source]);
    visited.insert(source);

    while let Some(node) = queue.pop_front() {
        if node == sink {
            return Some(reconstruct(source, sink, &came_from, net));
        }
        for arc in net.admissible_arcs(node) {
            let next = net.tgt_node(arc);
            if visited.insert(next) {
                came_from.insert(next, arc);
                queue.push_back(next);
            }
        }
    }
    None
}
