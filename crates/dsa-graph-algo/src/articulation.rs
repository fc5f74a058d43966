//! Articulation points and biconnected components over an undirected
//! graph: a single DFS computing discovery times and lowlinks. A
//! non-root node `u` is an articulation point iff it has a child `v` with
//! `low(v) >= disc(u)`; the root is one iff it has at least two DFS
//! children. Biconnected components fall out of the same walk via an
//! explicit arc stack.

use std::collections::{HashMap, HashSet};

use dsa_graph::{ArcIndex, GraphRepr, NodeIndex};

struct State {
    disc: HashMap<NodeIndex, usize>,
    low: HashMap<NodeIndex, usize>,
    time: usize,
    articulation_points: HashSet<NodeIndex>,
    arc_stack: Vec<ArcIndex>,
    components: Vec<Vec<ArcIndex>>,
}

/// The set of articulation points of `g`, treated as undirected (an arc's
/// two [`dsa_graph::GraphRepr::connected_node`] endpoints are symmetric).
pub fn articulation_points<G, N, E>(g: &G) -> HashSet<NodeIndex>
where
    G: GraphRepr<N, E>,
{
    biconnected_components(g).0
}

/// Articulation points and the biconnected components (each the set of
/// arcs it contains) of `g`.
pub fn biconnected_components<G, N, E>(g: &G) -> (HashSet<NodeIndex>, Vec<Vec<ArcIndex>>)
where
    G: GraphRepr<N, E>,
{
    let mut state = State {
        disc: HashMap::new(),
        low: HashMap::new(),
        time: 0,
        articulation_points: HashSet::new(),
        arc_stack: Vec::new(),
        components: Vec::new(),
    };

    for root in g.nodes() {
        if state.disc.contains_key(&root) {
            continue;
        }
        let root_children = visit(g, root, None, &mut state);
        if root_children >= 2 {
            state.articulation_points.insert(root);
        }
        if !state.arc_stack.is_empty() {
            state.components.push(std::mem::take(&mut state.arc_stack));
        }
    }
    (state.articulation_points, state.components)
}

/// Recursive DFS from `node`; returns the number of DFS children `node`
/// itself has (used by the caller to apply the root-specific rule).
fn visit<G, N, E>(g: &G, node: NodeIndex, parent_arc: Option<ArcIndex>, state: &mut State) -> usize
where
    G: GraphRepr<N, E>,
{
    state.disc.insert(node, state.time);
    state.low.insert(node, state.time);
    state.time += 1;
    let mut children = 0;

    for arc in g.incident_arcs(node) {
        if Some(arc) == parent_arc {
            continue;
        }
        let child = match g.connected_node(arc, node) {
            Some(c) => c,
            None => continue,
        };
        if !state.disc.contains_key(&child) {
            children += 1;
            state.arc_stack.push(arc);
            visit(g, child, Some(arc), state);

            let low_child = state.low[&child];
            let low_node = state.low[&node];
            state.low.insert(node, low_node.min(low_child));

            if low_child >= state.disc[&node] {
                if parent_arc.is_some() {
                    // the root's own articulation rule (>= 2 DFS children)
                    // is applied by the caller once this whole tree is done.
                    state.articulation_points.insert(node);
                }
                let mut component = Vec::new();
                while let Some(top) = state.arc_stack.pop() {
                    let at_boundary = top == arc;
                    component.push(top);
                    if at_boundary {
                        break;
                    }
                }
                state.components.push(component);
            }
        } else if state.disc[&child] < state.disc[&node] {
            state.arc_stack.push(arc);
            let low_node = state.low[&node];
            state.low.insert(node, low_node.min(state.disc[&child]));
        }
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_graph::{ListGraph, Undirected};

    #[test]
    fn bridge_in_a_path_graph_makes_middle_nodes_cut_vertices() {
        let mut g: ListGraph<(), (), Undirected> = ListGraph::new();
        let nodes: Vec<_> = (0..5).map(|_| g.insert_node(())).collect();
        for w in nodes.windows(2) {
            g.insert_arc(w[0], w[1], ()).unwrap();
        }
        let aps = articulation_points(&g);
        assert!(aps.contains(&nodes[1]));
        assert!(aps.contains(&nodes[2]));
        assert!(aps.contains(&nodes[3]));
        assert!(!aps.contains(&nodes[0]));
        assert!(!aps.contains(&nodes[4]));
    }

    #[test]
    fn a_single_cycle_has_no_articulation_points() {
        let mut g: ListGraph<(), (), Undirected> = ListGraph::new();
        let nodes: Vec<_> = (0..4).map(|_| g.insert_node(())).collect();
        for w in nodes.windows(2) {
            g.insert_arc(w[0], w[1], ()).unwrap();
        }
        g.insert_arc(nodes[3], nodes[0], ()).unwrap();
        assert!(articulation_points(&g).is_empty());
    }

    #[test]
    fn two_triangles_joined_at_one_node_share_an_articulation_point() {
        let mut g: ListGraph<(), (), Undirected> = ListGraph::new();
        let nodes: Vec<_> = (0..5).map(|_| g.insert_node(())).collect();
        g.insert_arc(nodes[0], nodes[1], ()).unwrap();
        g.insert_arc(nodes[1], nodes[2], ()).unwrap();
        g.insert_arc(nodes[2], nodes[0], ()).unwrap();
        g.insert_arc(nodes[2], nodes[3], ()).unwrap();
        g.insert_arc(nodes[3], nodes[4], ()).unwrap();
        g.insert_arc(nodes[4], nodes[2], ()).unwrap();
        let aps = articulation_points(&g);
        assert_eq!(aps, HashSet::from([nodes[2]]));
    }
}
