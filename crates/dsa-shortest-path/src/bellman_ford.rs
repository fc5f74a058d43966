//! Bellman-Ford: `|V|-1` relaxation passes over every arc; a further
//! relaxation on pass `|V|` means a negative-weight cycle is reachable from
//! the source. The queue-based SPFA variant only re-examines nodes whose
//! distance just improved.

use std::collections::VecDeque;
use std::ops::Add;

use dsa_core::{Error, Result};
use dsa_graph::{GraphRepr, NodeIndex};

use crate::paths::ShortestPaths;

/// The classic `|V|-1`-pass relaxation. `Error::NegativeCycle` if a further
/// relaxation is still possible on the `|V|`th pass.
pub fn bellman_ford<G, N, E, W, F>(g: &G, source: NodeIndex, weight: F) -> Result<ShortestPaths<W>>
where
    G: GraphRepr<N, E>,
    W: Copy + Ord + Add<Output = W> + Default,
    F: Fn(&E) -> W,
{
    tracing::debug!(?source, "bellman-ford starting");
    let mut result = ShortestPaths::new();
    result.distance.insert(source, W::default());
    let arcs = g.arcs();
    let node_count = g.num_nodes();

    for _ in 1..node_count {
        let mut relaxed_any = false;
        relax_pass(g, &arcs, &mut result, &weight, &mut relaxed_any);
        if !relaxed_any {
            break; // converged early; no need to burn the remaining passes
        }
    }

    let mut relaxed_once_more = false;
    relax_pass(g, &arcs, &mut result, &weight, &mut relaxed_once_more);
    if relaxed_once_more {
        tracing::debug!("bellman-ford detected a negative-weight cycle");
        return Err(Error::NegativeCycle);
    }
    Ok(result)
}

fn relax_pass<G, N, E, W, F>(
    g: &G,
    arcs: &[dsa_graph::ArcIndex],
    result: &mut ShortestPaths<W>,
    weight: &F,
    relaxed_any: &mut bool,
) where
    G: GraphRepr<N, E>,
    W: Copy + Ord + Add<Output = W>,
    F: Fn(&E) -> W,
{
    for &arc in arcs {
        let u = g.src_node(arc);
        let Some(&du) = result.distance.get(&u) else {
            continue;
        };
        let v = g.tgt_node(arc);
        let candidate = du + weight(g.arc_info(arc).expect("live arc has info"));
        if result.distance.get(&v).is_none_or(|&dv| candidate < dv) {
            result.distance.insert(v, candidate);
            result.predecessor.insert(v, (u, arc));
            *relaxed_any = true;
        }
    }
}

/// SPFA: a FIFO queue of nodes whose distance just decreased, so only arcs
/// leaving an actually-improved node are ever re-examined. Still detects a
/// negative cycle, by counting how many times a node has been re-enqueued:
/// more than `num_nodes` re-enqueues can only happen if some cycle keeps
/// improving.
pub fn bellman_ford_spfa<G, N, E, W, F>(
    g: &G,
    source: NodeIndex,
    weight: F,
) -> Result<ShortestPaths<W>>
where
    G: GraphRepr<N, E>,
    W: Copy + Ord + Add<Output = W> + Default,
    F: Fn(&E) -> W,
{
    let mut result = ShortestPaths::new();
    result.distance.insert(source, W::default());
    let mut in_queue = std::collections::HashSet::new();
    let mut enqueue_count: std::collections::HashMap<NodeIndex, usize> = std::collections::HashMap::new();
    let mut queue = VecDeque::from([source]);
    in_queue.insert(source);
    let node_count = g.num_nodes();

    while let Some(node) = queue.pop_front() {
        in_queue.remove(&node);
        let du = result.distance[&node];
        for arc in g.incident_arcs(node) {
            let Some(next) = g.connected_node(arc, node) else {
                continue;
            };
            let candidate = du + weight(g.arc_info(arc).expect("live arc has info"));
            if result.distance.get(&next).is_none_or(|&best| candidate < best) {
                result.distance.insert(next, candidate);
                result.predecessor.insert(next, (node, arc));
                if in_queue.insert(next) {
                    let count = enqueue_count.entry(next).or_insert(0);
                    *count += 1;
                    if *count > node_count {
                        return Err(Error::NegativeCycle);
                    }
                    queue.push_back(next);
                }
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_graph::{Directed, ListGraph};

    /// a 3-node negative cycle A->B (1), B->C (-3), C->A (1); must report
    /// `NegativeCycle`.
    #[test]
    fn three_node_negative_cycle_is_detected() {
        let mut g: ListGraph<&'static str, i64, Directed> = ListGraph::new();
        let a = g.insert_node("A");
        let b = g.insert_node("B");
        let c = g.insert_node("C");
        g.insert_arc(a, b, 1).unwrap();
        g.insert_arc(b, c, -3).unwrap();
        g.insert_arc(c, a, 1).unwrap();

        assert_eq!(bellman_ford(&g, a, |&w| w), Err(Error::NegativeCycle));
        assert_eq!(bellman_ford_spfa(&g, a, |&w| w), Err(Error::NegativeCycle));
    }

    #[test]
    fn negative_edges_without_a_cycle_are_fine() {
        let mut g: ListGraph<(), i64, Directed> = ListGraph::new();
        let a = g.insert_node(());
        let b = g.insert_node(());
        let c = g.insert_node(());
        g.insert_arc(a, b, 4).unwrap();
        g.insert_arc(a, c, 5).unwrap();
        g.insert_arc(b, c, -2).unwrap();

        let paths = bellman_ford(&g, a, |&w| w).unwrap();
        assert_eq!(paths.distance_to(c), Some(2));
    }
}
