//! Strongly-connected components via Tarjan's single-DFS algorithm: a
//! single DFS maintaining per-node `(index, lowlink)` and a stack of
//! still-open nodes; a node whose lowlink equals its own index closes and
//! pops its SCC.

use std::collections::HashMap;

use dsa_graph::{GraphRepr, NodeIndex};

struct Tarjan {
    index_of: HashMap<NodeIndex, usize>,
    lowlink: HashMap<NodeIndex, usize>,
    on_stack: HashMap<NodeIndex, bool>,
    stack: Vec<NodeIndex>,
    next_index: usize,
    components: Vec<Vec<NodeIndex>>,
}

/// Every strongly-connected component of `g`, each as the set of nodes it
/// contains. A DAG's components are exactly its singleton nodes.
pub fn strongly_connected_components<G, N, E>(g: &G) -> Vec<Vec<NodeIndex>>
where
    G: GraphRepr<N, E>,
{
    let mut t = Tarjan {
        index_of: HashMap::new(),
        lowlink: HashMap::new(),
        on_stack: HashMap::new(),
        stack: Vec::new(),
        next_index: 0,
        components: Vec::new(),
    };
    for node in g.nodes() {
        if !t.index_of.contains_key(&node) {
            strong_connect(g, node, &mut t);
        }
    }
    t.components
}

fn strong_connect<G, N, E>(g: &G, v: NodeIndex, t: &mut Tarjan)
where
    G: GraphRepr<N, E>,
{
    t.index_of.insert(v, t.next_index);
    t.lowlink.insert(v, t.next_index);
    t.next_index += 1;
    t.stack.push(v);
    t.on_stack.insert(v, true);

    for arc in g.incident_arcs(v) {
        if g.src_node(arc) != v {
            continue;
        }
        let w = g.tgt_node(arc);
        if !t.index_of.contains_key(&w) {
            strong_connect(g, w, t);
            let low_w = t.lowlink[&w];
            let low_v = t.lowlink[&v];
            t.lowlink.insert(v, low_v.min(low_w));
        } else if *t.on_stack.get(&w).unwrap_or(&false) {
            let idx_w = t.index_of[&w];
            let low_v = t.lowlink[&v];
            t.lowlink.insert(v, low_v.min(idx_w));
        }
    }

    if t.lowlink[&v] == t.index_of[&v] {
        let mut component = Vec::new();
        loop {
            let w = t.stack.pop().expect("v's own SCC is still on the stack");
            t.on_stack.insert(w, false);
            component.push(w);
            if w == v {
                break;
            }
        }
        t.components.push(component);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_graph::{Directed, ListGraph};

    #[test]
    fn two_cycles_joined_by_a_bridge_are_two_components() {
        let mut g: ListGraph<(), (), Directed> = ListGraph::new();
        let nodes: Vec<_> = (0..6).map(|_| g.insert_node(())).collect();
        // 0 -> 1 -> 2 -> 0 (a 3-cycle)
        g.insert_arc(nodes[0], nodes[1], ()).unwrap();
        g.insert_arc(nodes[1], nodes[2], ()).unwrap();
        g.insert_arc(nodes[2], nodes[0], ()).unwrap();
        // 3 -> 4 -> 5 -> 3 (another 3-cycle)
        g.insert_arc(nodes[3], nodes[4], ()).unwrap();
        g.insert_arc(nodes[4], nodes[5], ()).unwrap();
        g.insert_arc(nodes[5], nodes[3], ()).unwrap();
        // bridge, one-directional: never merges the two cycles
        g.insert_arc(nodes[2], nodes[3], ()).unwrap();

        let mut sccs = strongly_connected_components(&g);
        for c in &mut sccs {
            c.sort_by_key(|n| n.0);
        }
        sccs.sort_by_key(|c| c[0].0);
        assert_eq!(sccs.len(), 2);
        assert_eq!(sccs[0], vec![nodes[0], nodes[1], nodes[2]]);
        assert_eq!(sccs[1], vec![nodes[3], nodes[4], nodes[5]]);
    }

    #[test]
    fn dag_has_one_singleton_component_per_node() {
        let mut g: ListGraph<(), (), Directed> = ListGraph::new();
        let a = g.insert_node(());
        let b = g.insert_node(());
        g.insert_arc(a, b, ()).unwrap();
        let sccs = strongly_connected_components(&g);
        assert_eq!(sccs.len(), 2);
        assert!(sccs.iter().all(|c| c.len() == 1));
    }
}
