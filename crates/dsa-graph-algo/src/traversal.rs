//! Depth-first and breadth-first traversal, both parameterized by an arc
//! filter predicate so callers can restrict traversal to a subgraph (a
//! residual network, a spanning tree, ...) without copying, expressed as a
//! plain closure rather than an adaptor-graph type.

use std::collections::VecDeque;

use dsa_core::{Error, Result};
use dsa_graph::{ArcIndex, GraphRepr, NodeIndex};

use crate::visit_map::VisitedSet;

/// Accepts every arc; the default filter for algorithms that don't need to
/// restrict traversal to a subgraph.
pub fn no_filter(_arc: ArcIndex) -> bool {
    true
}

/// Depth-first walk over a graph, not recursive (so it cannot stack-overflow
/// on a deep graph) — `self.stack`/`self.discovered` track the frontier and
/// what's already been visited.
/// `Dfs` does not borrow the graph, so a caller may still mutate node/arc
/// payloads between calls to [`Dfs::next`].
pub struct Dfs {
    pub stack: Vec<NodeIndex>,
    pub discovered: VisitedSet,
}

impl Dfs {
    pub fn new<G, N, E>(g: &G, start: NodeIndex) -> Self
    where
        G: GraphRepr<N, E>,
    {
        let mut discovered = VisitedSet::with_capacity(g.nodes().len());
        discovered.visit(start);
        Self {
            stack: vec![start],
            discovered,
        }
    }

    /// Advances the walk, honoring `filter`; returns the next node in
    /// preorder (emitted when first discovered), or `None` once every
    /// reachable node has been returned.
    pub fn next<G, N, E>(&mut self, g: &G, filter: &dyn Fn(ArcIndex) -> bool) -> Option<NodeIndex>
    where
        G: GraphRepr<N, E>,
    {
        let node = self.stack.pop()?;
        for arc in g.incident_arcs(node) {
            if !filter(arc) {
                continue;
            }
            if let Some(next) = g.connected_node(arc, node) {
                if self.discovered.visit(next) {
                    self.stack.push(next);
                }
            }
        }
        Some(node)
    }
}

/// Breadth-first walk, queue-based, additionally tracking each discovered
/// node's unweighted distance from the source.
pub struct Bfs {
    queue: VecDeque<NodeIndex>,
    pub discovered: VisitedSet,
    pub distance: std::collections::HashMap<NodeIndex, usize>,
}

impl Bfs {
    pub fn new<G, N, E>(g: &G, start: NodeIndex) -> Self
    where
        G: GraphRepr<N, E>,
    {
        let mut discovered = VisitedSet::with_capacity(g.nodes().len());
        discovered.visit(start);
        let mut distance = std::collections::HashMap::new();
        distance.insert(start, 0);
        let mut queue = VecDeque::new();
        queue.push_back(start);
        Self {
            queue,
            discovered,
            distance,
        }
    }

    pub fn next<G, N, E>(&mut self, g: &G, filter: &dyn Fn(ArcIndex) -> bool) -> Option<NodeIndex>
    where
        G: GraphRepr<N, E>,
    {
        let node = self.queue.pop_front()?;
        let dist = self.distance[&node];
        for arc in g.incident_arcs(node) {
            if !filter(arc) {
                continue;
            }
            if let Some(next) = g.connected_node(arc, node) {
                if self.discovered.visit(next) {
                    self.distance.insert(next, dist + 1);
                    self.queue.push_back(next);
                }
            }
        }
        Some(node)
    }
}

/// Drives a [`Dfs`] to completion, calling `visitor` once per discovered
/// node in preorder. Returns `false` (and stops early) the first time
/// `visitor` returns `false`, letting a caller abort a search early.
pub fn depth_first_traverse<G, N, E>(
    g: &G,
    source: NodeIndex,
    filter: &dyn Fn(ArcIndex) -> bool,
    mut visitor: impl FnMut(NodeIndex) -> bool,
) -> bool
where
    G: GraphRepr<N, E>,
{
    tracing::debug!(?source, "depth-first traversal starting");
    let mut dfs = Dfs::new(g, source);
    while let Some(node) = dfs.next(g, filter) {
        if !visitor(node) {
            tracing::trace!(?node, "depth-first traversal aborted by visitor");
            return false;
        }
    }
    true
}

/// Drives a [`Bfs`] to completion, calling `visitor` once per discovered
/// node in layer order.
pub fn breadth_first_traverse<G, N, E>(
    g: &G,
    source: NodeIndex,
    filter: &dyn Fn(ArcIndex) -> bool,
    mut visitor: impl FnMut(NodeIndex, usize) -> bool,
) -> bool
where
    G: GraphRepr<N, E>,
{
    tracing::debug!(?source, "breadth-first traversal starting");
    let mut bfs = Bfs::new(g, source);
    while let Some(node) = bfs.next(g, filter) {
        let dist = bfs.distance[&node];
        if !visitor(node, dist) {
            return false;
        }
    }
    true
}

/// Unweighted shortest-path distances from `source` to every node BFS can
/// reach.
pub fn breadth_first_distances<G, N, E>(
    g: &G,
    source: NodeIndex,
) -> std::collections::HashMap<NodeIndex, usize>
where
    G: GraphRepr<N, E>,
{
    let mut bfs = Bfs::new(g, source);
    while bfs.next(g, &no_filter).is_some() {}
    bfs.distance
}

/// A spanning tree over the subset of `g` reachable from `source`: the
/// tree's own arcs (produces a tree subgraph of the input).
/// `Error::NotConnected` if `source` cannot reach every node in `g`.
pub fn spanning_tree_dfs<G, N, E>(
    g: &G,
    source: NodeIndex,
    filter: &dyn Fn(ArcIndex) -> bool,
) -> Result<Vec<ArcIndex>>
where
    G: GraphRepr<N, E>,
{
    let mut discovered = VisitedSet::with_capacity(g.nodes().len());
    discovered.visit(source);
    let mut stack = vec![source];
    let mut tree = Vec::new();
    while let Some(node) = stack.pop() {
        for arc in g.incident_arcs(node) {
            if !filter(arc) {
                continue;
            }
            if let Some(next) = g.connected_node(arc, node) {
                if discovered.visit(next) {
                    tree.push(arc);
                    stack.push(next);
                }
            }
        }
    }
    if tree.len() + 1 != g.num_nodes() {
        return Err(Error::NotConnected);
    }
    Ok(tree)
}

/// As [`spanning_tree_dfs`], but built breadth-first layer by layer.
pub fn spanning_tree_bfs<G, N, E>(
    g: &G,
    source: NodeIndex,
    filter: &dyn Fn(ArcIndex) -> bool,
) -> Result<Vec<ArcIndex>>
where
    G: GraphRepr<N, E>,
{
    let mut discovered = VisitedSet::with_capacity(g.nodes().len());
    discovered.visit(source);
    let mut queue = VecDeque::from([source]);
    let mut tree = Vec::new();
    while let Some(node) = queue.pop_front() {
        for arc in g.incident_arcs(node) {
            if !filter(arc) {
                continue;
            }
            if let Some(next) = g.connected_node(arc, node) {
                if discovered.visit(next) {
                    tree.push(arc);
                    queue.push_back(next);
                }
            }
        }
    }
    if tree.len() + 1 != g.num_nodes() {
        return Err(Error::NotConnected);
    }
    Ok(tree)
}

/// A path from `source` to the first node for which `goal` returns `true`,
/// found depth-first; `None` if no reachable node satisfies `goal`.
pub fn find_path_dfs<G, N, E>(
    g: &G,
    source: NodeIndex,
    filter: &dyn Fn(ArcIndex) -> bool,
    mut goal: impl FnMut(NodeIndex) -> bool,
) -> Option<Vec<ArcIndex>>
where
    G: GraphRepr<N, E>,
{
    find_path_generic(g, source, filter, &mut goal, true)
}

/// As [`find_path_dfs`] but explores breadth-first, so the returned path is
/// shortest by arc count.
pub fn find_path_bfs<G, N, E>(
    g: &G,
    source: NodeIndex,
    filter: &dyn Fn(ArcIndex) -> bool,
    mut goal: impl FnMut(NodeIndex) -> bool,
) -> Option<Vec<ArcIndex>>
where
    G: GraphRepr<N, E>,
{
    find_path_generic(g, source, filter, &mut goal, false)
}

fn find_path_generic<G, N, E>(
    g: &G,
    source: NodeIndex,
    filter: &dyn Fn(ArcIndex) -> bool,
    goal: &mut dyn FnMut(NodeIndex) -> bool,
    depth_first: bool,
) -> Option<Vec<ArcIndex>>
where
    G: GraphRepr<N, E>,
{
    if goal(source) {
        return Some(Vec::new());
    }
    let mut discovered = VisitedSet::with_capacity(g.nodes().len());
    discovered.visit(source);
    let mut frontier = VecDeque::from([source]);
    let mut came_from: std::collections::HashMap<NodeIndex, ArcIndex> = std::collections::HashMap::new();
    while let Some(node) = if depth_first {
        frontier.pop_back()
    } else {
        frontier.pop_front()
    } {
        for arc in g.incident_arcs(node) {
            if !filter(arc) {
                continue;
            }
            if let Some(next) = g.connected_node(arc, node) {
                if discovered.visit(next) {
                    came_from.insert(next, arc);
                    if goal(next) {
                        return Some(reconstruct(next, &came_from, g));
                    }
                    frontier.push_back(next);
                }
            }
        }
    }
    None
}

fn reconstruct<G, N, E>(
    mut node: NodeIndex,
    came_from: &std::collections::HashMap<NodeIndex, ArcIndex>,
    g: &G,
) -> Vec<ArcIndex>
where
    G: GraphRepr<N, E>,
{
    let mut path = Vec::new();
    while let Some(&arc) = came_from.get(&node) {
        path.push(arc);
        node = g
            .connected_node(arc, node)
            .expect("arc on the path must be incident to the node it led to");
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_graph::{Directed, ListGraph};

    fn chain() -> (ListGraph<&'static str, (), Directed>, Vec<NodeIndex>) {
        let mut g = ListGraph::new();
        let nodes: Vec<_> = ["a", "b", "c", "d"].into_iter().map(|n| g.insert_node(n)).collect();
        for w in nodes.windows(2) {
            g.insert_arc(w[0], w[1], ()).unwrap();
        }
        (g, nodes)
    }

    #[test]
    fn bfs_distances_are_unweighted_shortest_paths() {
        let (g, nodes) = chain();
        let dist = breadth_first_distances(&g, nodes[0]);
        assert_eq!(dist[&nodes[3]], 3);
    }

    #[test]
    fn spanning_tree_dfs_has_reachable_minus_one_arcs() {
        let (g, nodes) = chain();
        let tree = spanning_tree_dfs(&g, nodes[0], &no_filter).unwrap();
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn spanning_tree_reports_not_connected() {
        let mut g: ListGraph<(), (), Directed> = ListGraph::new();
        let a = g.insert_node(());
        let _b = g.insert_node(());
        assert_eq!(spanning_tree_dfs(&g, a, &no_filter), Err(Error::NotConnected));
    }

    #[test]
    fn find_path_bfs_reaches_goal() {
        let (g, nodes) = chain();
        let path = find_path_bfs(&g, nodes[0], &no_filter, |n| n == nodes[2]).unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn find_path_returns_none_when_unreachable() {
        let mut g: ListGraph<(), (), Directed> = ListGraph::new();
        let a = g.insert_node(());
        let b = g.insert_node(());
        assert_eq!(find_path_dfs(&g, a, &no_filter, |n| n == b), None);
    }
}
