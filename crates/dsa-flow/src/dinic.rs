//! Dinic's algorithm: a BFS builds a "level graph" (each arc goes from
//! level l to level l+1), then a DFS finds blocking flows through it;
//! repeat until no augmenting path remains. Kept to the same two-phase
//! shape (`build_level_graph` / `find_blocking_flow`) expressed over
//! [`FlowNetwork`].

use std::collections::{HashMap, VecDeque};
use std::ops::{Add, Sub};

use dsa_core::Result;
use dsa_graph::{ArcIndex, NodeIndex};

use crate::network::FlowNetwork;

fn build_level_graph<C>(net: &FlowNetwork<C>, source: NodeIndex) -> HashMap<NodeIndex, usize>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    let mut level = HashMap::new();
    level.insert(source, 0);
    let mut queue = VecDeque::from([source]);
    while let Some(node) = queue.pop_front() {
        let here = level[&node];
        for arc in net.admissible_arcs(node) {
            let next = net.tgt_node(arc);
            if !level.contains_key(&next) {
                level.insert(next, here + 1);
                queue.push_back(next);
            }
        }
    }
    level
}

/// DFS restricted to strictly-increasing-level arcs, with a per-node "next
/// arc to try" cursor so an exhausted arc is never revisited within the same
/// level graph.
fn find_blocking_path<C>(
    net: &FlowNetwork<C>,
    level: &HashMap<NodeIndex, usize>,
    cursor: &mut HashMap<NodeIndex, usize>,
    source: NodeIndex,
    sink: NodeIndex,
) -> Option<Vec<ArcIndex>>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    let mut path = Vec::new();
    let mut node = source;
    loop {
        if node == sink {
            return Some(path);
        }
        let arcs = net.admissible_arcs(node);
        let start = *cursor.get(&node).unwrap_or(&0);
        let mut advanced = false;
        for i in start..arcs.len() {
            let arc = arcs[i];
            let next = net.tgt_node(arc);
            if level.get(&next) == Some(&(level[&node] + 1)) {
                cursor.insert(node, i + 1);
                path.push(arc);
                node = next;
                advanced = true;
                break;
            }
        }
        if advanced {
            continue;
        }
        cursor.insert(node, arcs.len());
        if let Some(&last_arc) = path.last() {
            path.pop();
            node = net.src_node(last_arc);
        } else {
            return None; // dead end back at source: no path left in this level graph
        }
    }
}

/// Computes maximum flow via repeated level-graph construction and blocking
/// flow saturation. O(V^2 * E) in general.
pub fn dinic<C>(net: &mut FlowNetwork<C>, source: NodeIndex, sink: NodeIndex) -> Result<C>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    tracing::debug!(?source, ?sink, "dinic starting");
    let mut total = C::default();
    loop {
        let level = build_level_graph(net, source);
        if !level.contains_key(&sink) {
            break;
        }
        let mut cursor = HashMap::new();
        while let Some(path) = find_blocking_path(net, &level, &mut cursor, source, sink) {
            let delta = net.bottleneck(&path).expect("a found path has at least one arc");
            net.augment(&path, delta);
            total = total + delta;
        }
    }
    Ok(total)
}
