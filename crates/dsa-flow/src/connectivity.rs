//! Edge and vertex connectivity via max-flow reductions: edge connectivity
//! builds a unit-capacity digraph with two anti-parallel arcs per
//! undirected edge and takes the minimum max-flow from a fixed source to
//! every other node; vertex connectivity splits each non-{s,t} node v into
//! (v_in -> v_out) with capacity 1 and takes the minimum max-flow over all
//! non-adjacent s,t pairs.

use std::collections::HashMap;

use dsa_graph::{GraphRepr, NodeIndex};

use crate::dinic::dinic;
use crate::network::FlowNetwork;

/// Builds a unit-capacity digraph from an undirected edge list: one
/// anti-parallel arc pair per original edge.
fn unit_capacity_digraph(edges: &[(NodeIndex, NodeIndex)], node_count: usize) -> (FlowNetwork<i64>, HashMap<NodeIndex, NodeIndex>) {
    let mut net = FlowNetwork::new();
    let mut mapped = HashMap::new();
    for original in edges.iter().flat_map(|&(a, b)| [a, b]) {
        mapped.entry(original).or_insert_with(|| net.add_node());
    }
    while mapped.len() < node_count {
        net.add_node();
    }
    for &(a, b) in edges {
        let (u, v) = (mapped[&a], mapped[&b]);
        net.add_edge(u, v, 1).unwrap();
        net.add_edge(v, u, 1).unwrap();
    }
    (net, mapped)
}

/// k-edge connectivity: the minimum number of edges whose removal
/// disconnects the graph, computed as the minimum over max-flows from a
/// fixed source to every other node.
#[must_use]
pub fn k_edge_connectivity<N, E, G>(g: &G) -> i64
where
    G: GraphRepr<N, E>,
{
    let nodes = g.nodes();
    if nodes.len() < 2 {
        return 0;
    }
    let edges: Vec<(NodeIndex, NodeIndex)> = g
        .arcs()
        .into_iter()
        .map(|arc| (g.src_node(arc), g.tgt_node(arc)))
        .collect();
    let (mut net, mapped) = unit_capacity_digraph(&edges, nodes.len());
    let source = mapped[&nodes[0]];

    nodes[1..]
        .iter()
        .map(|&n| {
            net.reset_flow();
            dinic(&mut net, source, mapped[&n]).unwrap()
        })
        .min()
        .unwrap_or(0)
}

/// Builds the node-split network for one (source, sink) pair: every node
/// other than `s`/`t` gets a capacity-1 `v_in -> v_out` arc so at most one
/// unit of flow can pass through it; `s` and `t` themselves are left
/// unsplit-capacity since only intermediate nodes count toward the cut.
fn split_network<N, E, G>(
    g: &G,
    s: NodeIndex,
    t: NodeIndex,
) -> (FlowNetwork<i64>, HashMap<NodeIndex, NodeIndex>, HashMap<NodeIndex, NodeIndex>)
where
    G: GraphRepr<N, E>,
{
    const INF: i64 = i64::MAX / 4;
    let mut net: FlowNetwork<i64> = FlowNetwork::new();
    let mut node_in = HashMap::new();
    let mut node_out = HashMap::new();
    for n in g.nodes() {
        let a = net.add_node();
        let b = net.add_node();
        let cap = if n == s || n == t { INF } else { 1 };
        net.add_edge(a, b, cap).unwrap();
        node_in.insert(n, a);
        node_out.insert(n, b);
    }
    for arc in g.arcs() {
        let (u, v) = (g.src_node(arc), g.tgt_node(arc));
        net.add_edge(node_out[&u], node_in[&v], INF).unwrap();
        if !g.is_directed() {
            net.add_edge(node_out[&v], node_in[&u], INF).unwrap();
        }
    }
    (net, node_in, node_out)
}

/// k-vertex connectivity: split every non-terminal node `v` into `v_in ->
/// v_out` (capacity 1, forcing at most one flow unit through it), compute
/// max-flow between every non-adjacent pair, and take the minimum. `None` if
/// the graph is complete (no non-adjacent pair exists, so vertex
/// connectivity is conventionally `n - 1`).
#[must_use]
pub fn k_vertex_connectivity<N, E, G>(g: &G) -> Option<i64>
where
    G: GraphRepr<N, E>,
{
    let nodes = g.nodes();
    if nodes.len() < 2 {
        return None;
    }
    let adjacency: std::collections::HashSet<(NodeIndex, NodeIndex)> = g
        .arcs()
        .into_iter()
        .flat_map(|arc| {
            let (u, v) = (g.src_node(arc), g.tgt_node(arc));
            [(u, v), (v, u)]
        })
        .collect();

    let mut best: Option<i64> = None;
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let (s, t) = (nodes[i], nodes[j]);
            if adjacency.contains(&(s, t)) {
                continue;
            }
            let (mut net, node_in, node_out) = split_network(g, s, t);
            let flow = dinic(&mut net, node_out[&s], node_in[&t]).unwrap();
            best = Some(best.map_or(flow, |b: i64| b.min(flow)));
        }
    }
    best
}
