//! A directed/undirected graph abstraction with two physical backends —
//! [`ListGraph`] (each node owns a circular doubly-linked list of incident
//! arcs, built on [`dsa_intrusive::Ring`]) and [`ArrayGraph`] (each node owns
//! a dynamic array of incident arc indices, built on
//! [`dsa_vector::DynArray`]) — behind one [`GraphRepr`] trait so
//! [`dsa_graph_algo`](../dsa_graph_algo)'s traversal algorithms are generic
//! over which one a caller picks.
//!
//! Nodes and arcs are addressed by [`NodeIndex`]/[`ArcIndex`] rather than
//! raw pointers, giving each a stable textual identity sufficient for an
//! external renderer to key off of. Each also carries a small traversal
//! bitset and an opaque cookie: scratch state algorithms must reset before
//! and after use.

pub mod array_graph;
pub mod list_graph;

pub use array_graph::ArrayGraph;
pub use dsa_core::{Cookie, Error, Result, TraversalFlags};
pub use list_graph::ListGraph;

/// A stable handle to a node, valid until that node is removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

/// A stable handle to an arc, valid until that arc is removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcIndex(pub usize);

/// Selects whether a graph's arcs are directed or undirected, as a
/// zero-sized type parameter so the choice is resolved at compile time.
pub trait Directionality: Copy + Default + 'static {
    const IS_DIRECTED: bool;
}

/// Arcs run one way, source to target.
#[derive(Copy, Clone, Debug, Default)]
pub struct Directed;

/// Arcs have no orientation; an arc is incident to both of its endpoints
/// symmetrically.
#[derive(Copy, Clone, Debug, Default)]
pub struct Undirected;

impl Directionality for Directed {
    const IS_DIRECTED: bool = true;
}

impl Directionality for Undirected {
    const IS_DIRECTED: bool = false;
}

/// The logical interface shared by every physical graph backend:
/// `insert_node`, `remove_node` (cascades to incident arcs),
/// `insert_arc`, `remove_arc`, size queries, endpoint queries, and
/// iteration over nodes / all arcs / arcs incident to a node.
///
/// Iteration order is deterministic (insertion order) for every
/// implementation.
pub trait GraphRepr<N, E>: Sized {
    fn new() -> Self;

    #[must_use]
    fn is_directed(&self) -> bool;

    #[must_use]
    fn num_nodes(&self) -> usize;

    #[must_use]
    fn num_arcs(&self) -> usize;

    fn insert_node(&mut self, info: N) -> NodeIndex;

    /// Removes `node` and cascades to every arc incident to it:
    /// `num_nodes`/`num_arcs` track the owning collections, so a dangling
    /// arc referencing a removed node can never exist.
    fn remove_node(&mut self, node: NodeIndex) -> Result<N>;

    fn insert_arc(&mut self, src: NodeIndex, tgt: NodeIndex, info: E) -> Result<ArcIndex>;

    fn remove_arc(&mut self, arc: ArcIndex) -> Result<E>;

    fn node_info(&self, node: NodeIndex) -> Option<&N>;
    fn node_info_mut(&mut self, node: NodeIndex) -> Option<&mut N>;
    fn arc_info(&self, arc: ArcIndex) -> Option<&E>;
    fn arc_info_mut(&mut self, arc: ArcIndex) -> Option<&mut E>;

    fn src_node(&self, arc: ArcIndex) -> NodeIndex;
    fn tgt_node(&self, arc: ArcIndex) -> NodeIndex;

    /// For an undirected arc, the endpoint other than `node`; `None` if
    /// `node` is not one of the arc's endpoints.
    fn connected_node(&self, arc: ArcIndex, node: NodeIndex) -> Option<NodeIndex>;

    /// All live nodes, insertion order.
    fn nodes(&self) -> Vec<NodeIndex>;

    /// All live arcs, insertion order.
    fn arcs(&self) -> Vec<ArcIndex>;

    /// Arcs incident to `node`: outgoing arcs for a digraph, every arc
    /// touching `node` (as either endpoint) for an undirected graph.
    fn incident_arcs(&self, node: NodeIndex) -> Vec<ArcIndex>;

    fn node_flags(&self, node: NodeIndex) -> TraversalFlags;
    fn set_node_flags(&mut self, node: NodeIndex, flags: TraversalFlags);
    fn node_cookie(&self, node: NodeIndex) -> Cookie;
    fn set_node_cookie(&mut self, node: NodeIndex, cookie: Cookie);

    fn arc_flags(&self, arc: ArcIndex) -> TraversalFlags;
    fn set_arc_flags(&mut self, arc: ArcIndex, flags: TraversalFlags);

    /// Resets every node's and arc's bitset and cookie to empty. Algorithms
    /// call this both before and after they run.
    fn reset_scratch(&mut self) {
        for node in self.nodes() {
            self.set_node_flags(node, TraversalFlags::empty());
            self.set_node_cookie(node, Cookie::empty());
        }
        for arc in self.arcs() {
            self.set_arc_flags(arc, TraversalFlags::empty());
        }
    }
}
