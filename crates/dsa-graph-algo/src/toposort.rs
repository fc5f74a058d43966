//! Topological sort: a post-order DFS variant that fails on a back edge,
//! and Kahn's in-degree-draining alternative.

use std::collections::{HashMap, VecDeque};

use dsa_core::{Error, Result};
use dsa_graph::{GraphRepr, NodeIndex};

#[derive(Copy, Clone, Eq, PartialEq)]
enum Mark {
    InProgress,
    Done,
}

/// Post-order DFS topological sort. `Error::CycleDetected` the first time a
/// back edge (an arc into a node still on the current DFS stack) is seen,
/// as soon as the cycle is closed rather than after exhausting the rest of
/// the graph.
pub fn topological_sort<G, N, E>(g: &G) -> Result<Vec<NodeIndex>>
where
    G: GraphRepr<N, E>,
{
    let mut marks: HashMap<NodeIndex, Mark> = HashMap::new();
    let mut order = Vec::with_capacity(g.num_nodes());

    fn visit<G, N, E>(
        g: &G,
        node: NodeIndex,
        marks: &mut HashMap<NodeIndex, Mark>,
        order: &mut Vec<NodeIndex>,
    ) -> Result<()>
    where
        G: GraphRepr<N, E>,
    {
        match marks.get(&node) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => return Err(Error::CycleDetected),
            None => {}
        }
        marks.insert(node, Mark::InProgress);
        for arc in g.incident_arcs(node) {
            if g.src_node(arc) != node {
                continue;
            }
            visit(g, g.tgt_node(arc), marks, order)?;
        }
        marks.insert(node, Mark::Done);
        order.push(node);
        Ok(())
    }

    for node in g.nodes() {
        visit(g, node, &mut marks, &mut order)?;
    }
    order.reverse();
    Ok(order)
}

/// Kahn's algorithm: repeatedly emit a source (in-degree 0) and decrement
/// its neighbors' in-degrees. Equivalent output set to [`topological_sort`]
/// on a DAG (the relative order of independent nodes may differ); detects
/// the same cycles by the drained queue running dry before every node has
/// been emitted.
pub fn topological_sort_kahn<G, N, E>(g: &G) -> Result<Vec<NodeIndex>>
where
    G: GraphRepr<N, E>,
{
    let mut in_degree: HashMap<NodeIndex, usize> = g.nodes().into_iter().map(|n| (n, 0)).collect();
    for arc in g.arcs() {
        *in_degree.entry(g.tgt_node(arc)).or_insert(0) += 1;
    }
    let mut queue: VecDeque<NodeIndex> = in_degree
        .iter()
        .filter(|(_, &deg)| deg == 0)
        .map(|(&n, _)| n)
        .collect();
    let mut order = Vec::with_capacity(g.num_nodes());
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for arc in g.incident_arcs(node) {
            if g.src_node(arc) != node {
                continue;
            }
            let tgt = g.tgt_node(arc);
            let deg = in_degree.get_mut(&tgt).expect("every node has an in-degree entry");
            *deg -= 1;
            if *deg == 0 {
                queue.push_back(tgt);
            }
        }
    }
    if order.len() != g.num_nodes() {
        return Err(Error::CycleDetected);
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_graph::{Directed, ListGraph};

    fn position(order: &[NodeIndex], n: NodeIndex) -> usize {
        order.iter().position(|&x| x == n).unwrap()
    }

    /// 5->11, 7->11, 7->8, 3->8, 3->10, 11->2, 11->9,
    /// 11->10, 8->9; every arc's source must precede its target.
    #[test]
    fn toposort_respects_every_arc_on_six_node_dag() {
        let mut g: ListGraph<u32, (), Directed> = ListGraph::new();
        let mut idx = HashMap::new();
        for label in [5, 7, 11, 8, 3, 10, 2, 9] {
            idx.insert(label, g.insert_node(label));
        }
        for (s, t) in [(5, 11), (7, 11), (7, 8), (3, 8), (3, 10), (11, 2), (11, 9), (11, 10), (8, 9)] {
            g.insert_arc(idx[&s], idx[&t], ()).unwrap();
        }
        let order = topological_sort(&g).unwrap();
        for (s, t) in [(5, 11), (7, 11), (7, 8), (3, 8), (3, 10), (11, 2), (11, 9), (11, 10), (8, 9)] {
            assert!(position(&order, idx[&s]) < position(&order, idx[&t]));
        }
        let kahn_order = topological_sort_kahn(&g).unwrap();
        for (s, t) in [(5, 11), (7, 11), (7, 8), (3, 8), (3, 10), (11, 2), (11, 9), (11, 10), (8, 9)] {
            assert!(position(&kahn_order, idx[&s]) < position(&kahn_order, idx[&t]));
        }
    }

    #[test]
    fn adding_a_back_edge_is_cycle_detected() {
        let mut g: ListGraph<u32, (), Directed> = ListGraph::new();
        let mut idx = HashMap::new();
        for label in [5, 7, 11, 8, 3, 10, 2, 9] {
            idx.insert(label, g.insert_node(label));
        }
        for (s, t) in [(5, 11), (7, 11), (7, 8), (3, 8), (3, 10), (11, 2), (11, 9), (11, 10), (8, 9), (9, 5)] {
            g.insert_arc(idx[&s], idx[&t], ()).unwrap();
        }
        assert_eq!(topological_sort(&g), Err(Error::CycleDetected));
        assert_eq!(topological_sort_kahn(&g), Err(Error::CycleDetected));
    }
}
