//! Preflow-push / push-relabel: maintains a preflow (excess allowed at
//! nodes other than source/sink) and node heights; the operations are PUSH
//! (send delta along an admissible arc from a node with excess) and RELABEL
//! (raise a node's height to one more than its minimum-height admissible
//! neighbor). Variants differ only in which active node is discharged next.

use std::collections::{HashMap, VecDeque};
use std::ops::{Add, Sub};

use dsa_core::Result;
use dsa_graph::NodeIndex;

use crate::network::FlowNetwork;

/// Which active node push-relabel discharges next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActiveNodeOrder {
    /// A plain FIFO queue of active nodes (the generic O(V^2*E) bound).
    Fifo,
    /// Always discharge the active node with the greatest height, using a
    /// bucket keyed by height (O(V^2*sqrt(E))).
    HighestLabel,
    /// Pick a uniformly random active node each step — no tighter bound than
    /// FIFO, offered because the original exposes it as a scheduling choice.
    Random,
}

struct State<C> {
    excess: HashMap<NodeIndex, C>,
    height: HashMap<NodeIndex, usize>,
}

fn initialize<C>(net: &mut FlowNetwork<C>, source: NodeIndex) -> State<C>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    let nodes = net.nodes();
    let mut height = HashMap::new();
    let mut excess = HashMap::new();
    for &node in &nodes {
        height.insert(node, 0);
        excess.insert(node, C::default());
    }
    height.insert(source, nodes.len());

    for arc in net.admissible_arcs(source) {
        let cap = net.residual_capacity(arc);
        if cap > C::default() {
            let tgt = net.tgt_node(arc);
            net.push_flow(arc, cap);
            *excess.get_mut(&tgt).unwrap() = *excess.get(&tgt).unwrap() + cap;
            *excess.get_mut(&source).unwrap() = *excess.get(&source).unwrap() - cap;
        }
    }
    State { excess, height }
}

fn discharge<C>(net: &mut FlowNetwork<C>, state: &mut State<C>, node: NodeIndex, source: NodeIndex, sink: NodeIndex, queue: &mut VecDeque<NodeIndex>)
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    loop {
        let excess = *state.excess.get(&node).unwrap();
        if excess <= C::default() {
            return;
        }
        let mut pushed = false;
        for arc in net.admissible_arcs(node) {
            let tgt = net.tgt_node(arc);
            if state.height[&node] != state.height[&tgt] + 1 {
                continue;
            }
            let residual = net.residual_capacity(arc);
            let delta = if residual < excess { residual } else { excess };
            net.push_flow(arc, delta);
            *state.excess.get_mut(&node).unwrap() = *state.excess.get(&node).unwrap() - delta;
            let tgt_excess = state.excess.get_mut(&tgt).unwrap();
            let was_inactive = *tgt_excess <= C::default();
            *tgt_excess = *tgt_excess + delta;
            if was_inactive && tgt != source && tgt != sink {
                queue.push_back(tgt);
            }
            pushed = true;
            if *state.excess.get(&node).unwrap() <= C::default() {
                break;
            }
        }
        if pushed {
            continue;
        }
        // no admissible arc: relabel to one more than the minimum-height neighbor
        let min_neighbor_height = net
            .admissible_arcs(node)
            .into_iter()
            .map(|arc| state.height[&net.tgt_node(arc)])
            .min();
        match min_neighbor_height {
            Some(h) => state.height.insert(node, h + 1),
            None => return, // isolated in the residual graph; nothing left to do
        };
    }
}

/// Runs push-relabel to completion and returns the maximum flow value. The
/// active-node schedule affects running time only, never the result.
pub fn push_relabel<C>(
    net: &mut FlowNetwork<C>,
    source: NodeIndex,
    sink: NodeIndex,
    order: ActiveNodeOrder,
) -> Result<C>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    tracing::debug!(?source, ?sink, ?order, "push-relabel starting");
    let mut state = initialize(net, source);
    let mut queue: VecDeque<NodeIndex> = net
        .nodes()
        .into_iter()
        .filter(|&n| n != source && n != sink && *state.excess.get(&n).unwrap() > C::default())
        .collect();

    let mut rng_state: u64 = 0x2545_F491_4F6C_DD1D;
    while !queue.is_empty() {
        let index = match order {
            ActiveNodeOrder::Fifo => 0,
            ActiveNodeOrder::HighestLabel => queue
                .iter()
                .enumerate()
                .max_by_key(|(_, &n)| state.height[&n])
                .map(|(i, _)| i)
                .unwrap(),
            ActiveNodeOrder::Random => {
                rng_state ^= rng_state << 13;
                rng_state ^= rng_state >> 7;
                rng_state ^= rng_state << 17;
                (rng_state as usize) % queue.len()
            }
        };
        let node = queue.remove(index).unwrap();
        if *state.excess.get(&node).unwrap() <= C::default() {
            continue;
        }
        discharge(net, &mut state, node, source, sink, &mut queue);
        if *state.excess.get(&node).unwrap() > C::default() {
            queue.push_back(node);
        }
    }

    Ok(*state.excess.get(&sink).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_push_relabel_matches_dinic() {
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

        assert_eq!(push_relabel(&mut net, s, t, ActiveNodeOrder::Fifo).unwrap(), 20);
    }

    #[test]
    fn highest_label_variant_agrees_with_fifo() {
        let mut net: FlowNetwork<i64> = FlowNetwork::new();
        let s = net.add_node();
        let a = net.add_node();
        let t = net.add_node();
        net.add_edge(s, a, 5).unwrap();
        net.add_edge(a, t, 3).unwrap();

        assert_eq!(
            push_relabel(&mut net, s, t, ActiveNodeOrder::HighestLabel).unwrap(),
            3
        );
    }
}
