//! Dijkstra's algorithm: non-negative arc weights only. The "lazy" variant
//! (the default) pushes a duplicate entry every time a shorter distance is
//! found and skips stale pops instead of mutating the heap in place;
//! [`dijkstra_decrease_key`] instead keeps exactly one live entry per node by
//! calling `decrease_key` on a [`dsa_heap::FibonacciHeap`].

use std::collections::HashMap;
use std::ops::Add;

use dsa_graph::{ArcIndex, GraphRepr, NodeIndex};
use dsa_heap::{BinaryHeap, FibonacciHeap, Handle};

use crate::paths::ShortestPaths;

/// Runs Dijkstra from `source` using a lazy binary heap. `weight` must never
/// return a negative value; callers to whom that is not guaranteed should
/// use Bellman-Ford instead.
pub fn dijkstra<G, N, E, W, F>(g: &G, source: NodeIndex, weight: F) -> ShortestPaths<W>
where
    G: GraphRepr<N, E>,
    W: Copy + Ord + Add<Output = W> + Default,
    F: Fn(&E) -> W,
{
    tracing::debug!(?source, "dijkstra (lazy binary heap) starting");
    let mut result = ShortestPaths::new();
    result.distance.insert(source, W::default());
    let mut heap: BinaryHeap<W, NodeIndex> = BinaryHeap::new();
    heap.push(W::default(), source);

    while let Some((dist, node)) = heap.pop() {
        if result.distance.get(&node).is_some_and(|&best| best < dist) {
            continue; // stale entry: a cheaper path to `node` was already settled
        }
        for arc in g.incident_arcs(node) {
            let Some(next) = g.connected_node(arc, node) else {
                continue;
            };
            let candidate = dist + weight(g.arc_info(arc).expect("live arc has info"));
            if result
                .distance
                .get(&next)
                .is_none_or(|&best| candidate < best)
            {
                result.distance.insert(next, candidate);
                result.predecessor.insert(next, (node, arc));
                heap.push(candidate, next);
            }
        }
    }
    result
}

/// As [`dijkstra`], but keeps one live heap entry per node and calls
/// `decrease_key` instead of pushing duplicates — the shape that benefits
/// most from the Fibonacci-heap backend's O(1) amortized decrease-key.
pub fn dijkstra_decrease_key<G, N, E, W, F>(g: &G, source: NodeIndex, weight: F) -> ShortestPaths<W>
where
    G: GraphRepr<N, E>,
    W: Copy + Ord + Add<Output = W> + Default,
    F: Fn(&E) -> W,
{
    let mut result = ShortestPaths::new();
    result.distance.insert(source, W::default());
    let mut heap: FibonacciHeap<W, NodeIndex> = FibonacciHeap::new();
    let mut handle_of: HashMap<NodeIndex, Handle> = HashMap::new();
    handle_of.insert(source, heap.push(W::default(), source));

    let mut settled: std::collections::HashSet<NodeIndex> = std::collections::HashSet::new();
    while let Some((dist, node)) = heap.pop() {
        if !settled.insert(node) {
            continue;
        }
        for arc in g.incident_arcs(node) {
            let Some(next) = g.connected_node(arc, node) else {
                continue;
            };
            if settled.contains(&next) {
                continue;
            }
            let candidate = dist + weight(g.arc_info(arc).expect("live arc has info"));
            let improves = result.distance.get(&next).is_none_or(|&best| candidate < best);
            if improves {
                result.distance.insert(next, candidate);
                result.predecessor.insert(next, (node, arc));
                match handle_of.get(&next) {
                    Some(&handle) => {
                        let _ = heap.decrease_key(handle, candidate);
                    }
                    None => {
                        handle_of.insert(next, heap.push(candidate, next));
                    }
                }
            }
        }
    }
    result
}

/// All-pairs-free single-target helper: `true` once `target` is settled,
/// stopping the search early — useful when only one destination matters.
pub fn dijkstra_until<G, N, E, W, F>(
    g: &G,
    source: NodeIndex,
    target: NodeIndex,
    weight: F,
) -> Option<Vec<ArcIndex>>
where
    G: GraphRepr<N, E>,
    W: Copy + Ord + Add<Output = W> + Default,
    F: Fn(&E) -> W,
{
    let paths = dijkstra(g, source, weight);
    paths.path_to(target)
}
