//! Structural graph algorithms exercised together against one graph built
//! through the `dsa` facade, rather than each in isolation against its own
//! fixture.

use std::collections::HashMap;

use dsa::graph::{Directed, GraphRepr, ListGraph, Undirected};
use dsa::graph_algo::{
    breadth_first_distances, kruskal, no_filter, spanning_tree_dfs, strongly_connected_components,
    topological_sort, topological_sort_kahn,
};

fn dag() -> (ListGraph<&'static str, (), Directed>, HashMap<&'static str, dsa::graph::NodeIndex>) {
    let mut g = ListGraph::new();
    let mut idx = HashMap::new();
    for label in ["shirt", "tie", "jacket", "belt", "pants", "shoes", "socks"] {
        idx.insert(label, g.insert_node(label));
    }
    for (s, t) in [
        ("shirt", "tie"),
        ("tie", "jacket"),
        ("shirt", "belt"),
        ("pants", "belt"),
        ("pants", "shoes"),
        ("socks", "shoes"),
    ] {
        g.insert_arc(idx[s], idx[t], ()).unwrap();
    }
    (g, idx)
}

#[test]
fn topological_sort_and_kahn_agree_on_ordering_constraints() {
    let (g, idx) = dag();
    let dfs_order = topological_sort(&g).unwrap();
    let kahn_order = topological_sort_kahn(&g).unwrap();
    let pos = |order: &[dsa::graph::NodeIndex], n| order.iter().position(|&x| x == n).unwrap();
    for (s, t) in [("shirt", "tie"), ("tie", "jacket"), ("pants", "belt"), ("pants", "shoes")] {
        assert!(pos(&dfs_order, idx[s]) < pos(&dfs_order, idx[t]));
        assert!(pos(&kahn_order, idx[s]) < pos(&kahn_order, idx[t]));
    }
}

#[test]
fn introducing_a_back_edge_breaks_both_toposort_variants() {
    let (mut g, idx) = dag();
    g.insert_arc(idx["jacket"], idx["shirt"], ()).unwrap();
    assert!(topological_sort(&g).is_err());
    assert!(topological_sort_kahn(&g).is_err());
}

#[test]
fn scc_on_a_dag_is_all_singletons_but_collapses_once_cycled() {
    let (g, _) = dag();
    let sccs = strongly_connected_components(&g);
    assert!(sccs.iter().all(|c| c.len() == 1));

    let (mut cyclic, idx) = dag();
    cyclic.insert_arc(idx["jacket"], idx["shirt"], ()).unwrap();
    let sccs = strongly_connected_components(&cyclic);
    let big = sccs.iter().find(|c| c.len() > 1).expect("the shirt-tie-jacket loop merges");
    assert!(big.contains(&idx["shirt"]));
    assert!(big.contains(&idx["tie"]));
    assert!(big.contains(&idx["jacket"]));
}

#[test]
fn spanning_tree_and_bfs_distances_agree_on_reachability() {
    let mut g: ListGraph<u32, (), Undirected> = ListGraph::new();
    let nodes: Vec<_> = (0..5).map(|n| g.insert_node(n)).collect();
    for w in nodes.windows(2) {
        g.insert_arc(w[0], w[1], ()).unwrap();
    }
    let tree = spanning_tree_dfs(&g, nodes[0], &no_filter).unwrap();
    assert_eq!(tree.len(), nodes.len() - 1);

    let distances = breadth_first_distances(&g, nodes[0]);
    assert_eq!(distances[&nodes[4]], 4);
}

#[test]
fn kruskal_mst_weight_matches_a_hand_checked_minimum() {
    let mut g: ListGraph<(), u32, Undirected> = ListGraph::new();
    let nodes: Vec<_> = (0..4).map(|_| g.insert_node(())).collect();
    g.insert_arc(nodes[0], nodes[1], 1).unwrap();
    g.insert_arc(nodes[1], nodes[2], 2).unwrap();
    g.insert_arc(nodes[2], nodes[3], 3).unwrap();
    g.insert_arc(nodes[0], nodes[3], 10).unwrap();

    let tree = kruskal(&g, |&w| w);
    let total: u32 = tree.iter().map(|&a| *g.arc_info(a).unwrap()).sum();
    assert_eq!(tree.len(), 3);
    assert_eq!(total, 6);
}
