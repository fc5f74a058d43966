//! Graph traversal and structural algorithms, generic over any
//! [`dsa_graph::GraphRepr`] backend: depth-first and breadth-first
//! traversal, topological sort, strongly-connected components, articulation
//! points and biconnected components, spanning trees, minimum spanning
//! trees, and path finding.
//!
//! Every algorithm here is parameterized by an arc filter predicate,
//! defaulting to [`traversal::no_filter`], so callers can restrict
//! traversal to a subgraph (a residual network, a spanning tree, ...)
//! without copying it.

mod articulation;
mod mst;
mod scc;
mod toposort;
mod traversal;
mod union_find;
mod visit_map;

pub use articulation::{articulation_points, biconnected_components};
pub use mst::{kruskal, prim};
pub use scc::strongly_connected_components;
pub use toposort::{topological_sort, topological_sort_kahn};
pub use traversal::{
    breadth_first_distances, breadth_first_traverse, depth_first_traverse, find_path_bfs,
    find_path_dfs, no_filter, spanning_tree_bfs, spanning_tree_dfs, Bfs, Dfs,
};
pub use union_find::UnionFind;
