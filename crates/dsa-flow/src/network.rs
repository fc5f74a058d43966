//! The residual network: for every real arc (u,v,cap,flow) there is a
//! residual image (v,u,cap,cap-flow); the two are linked by back-pointers.
//! Each [`FlowNetwork::add_edge`] call inserts both arcs at once and records
//! each one's partner's [`ArcIndex`] so augmenting a path only ever needs
//! the arc itself, never a lookup by endpoint pair.

use std::ops::{Add, Sub};

use dsa_core::{Error, Result};
use dsa_graph::{ArcIndex, Directed, GraphRepr, ListGraph, NodeIndex};

/// One direction of a capacity/flow pair. The reverse image always starts at
/// zero capacity (or `capacity` itself if the edge was declared undirected by
/// the caller adding both directions explicitly).
#[derive(Copy, Clone, Debug)]
pub struct FlowEdge<C> {
    pub capacity: C,
    pub flow: C,
    pub reverse: ArcIndex,
}

/// A directed capacity network plus its auto-maintained residual images.
/// Built on [`ListGraph`] the same way every other traversal-heavy component
/// in this workspace is.
pub struct FlowNetwork<C> {
    graph: ListGraph<(), FlowEdge<C>, Directed>,
    forward_arcs: Vec<ArcIndex>,
}

impl<C> FlowNetwork<C>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: ListGraph::new(),
            forward_arcs: Vec::new(),
        }
    }

    pub fn add_node(&mut self) -> NodeIndex {
        self.graph.insert_node(())
    }

    /// Inserts a forward arc of the given capacity and its zero-capacity
    /// residual image, wired to each other's index. `Error::InvalidCapacity`
    /// if `capacity` is negative.
    pub fn add_edge(&mut self, src: NodeIndex, tgt: NodeIndex, capacity: C) -> Result<ArcIndex> {
        if capacity < C::default() {
            return Err(Error::InvalidCapacity);
        }
        let forward = self
            .graph
            .insert_arc(
                src,
                tgt,
                FlowEdge {
                    capacity,
                    flow: C::default(),
                    reverse: ArcIndex(0), // patched below
                },
            )
            .expect("both endpoints were just inserted or validated by the caller");
        let backward = self
            .graph
            .insert_arc(
                tgt,
                src,
                FlowEdge {
                    capacity: C::default(),
                    flow: C::default(),
                    reverse: forward,
                },
            )
            .expect("both endpoints were just inserted or validated by the caller");
        self.graph.arc_info_mut(forward).unwrap().reverse = backward;
        self.forward_arcs.push(forward);
        Ok(forward)
    }

    #[must_use]
    pub fn nodes(&self) -> Vec<NodeIndex> {
        self.graph.nodes()
    }

    /// Every arc the caller declared via [`Self::add_edge`], excluding the
    /// residual images created alongside them.
    #[must_use]
    pub fn forward_arcs(&self) -> &[ArcIndex] {
        &self.forward_arcs
    }

    /// Every arc in the network, forward and residual alike.
    #[must_use]
    pub fn all_arcs(&self) -> Vec<ArcIndex> {
        self.graph.arcs()
    }

    /// The residual image wired to `arc` at construction time (forward <->
    /// backward, either direction).
    #[must_use]
    pub fn reverse_arc(&self, arc: ArcIndex) -> ArcIndex {
        self.reverse_of(arc)
    }

    /// `true` if `arc` was declared by the caller via [`Self::add_edge`]
    /// (as opposed to being its auto-created residual image).
    #[must_use]
    pub fn is_forward(&self, arc: ArcIndex) -> bool {
        self.forward_arcs.contains(&arc)
    }

    #[must_use]
    pub fn src_node(&self, arc: ArcIndex) -> NodeIndex {
        self.graph.src_node(arc)
    }

    #[must_use]
    pub fn tgt_node(&self, arc: ArcIndex) -> NodeIndex {
        self.graph.tgt_node(arc)
    }

    #[must_use]
    pub fn residual_capacity(&self, arc: ArcIndex) -> C {
        let edge = self.graph.arc_info(arc).expect("arc index is live");
        edge.capacity - edge.flow
    }

    #[must_use]
    pub fn flow_of(&self, arc: ArcIndex) -> C {
        self.graph.arc_info(arc).expect("arc index is live").flow
    }

    #[must_use]
    pub fn capacity_of(&self, arc: ArcIndex) -> C {
        self.graph.arc_info(arc).expect("arc index is live").capacity
    }

    fn reverse_of(&self, arc: ArcIndex) -> ArcIndex {
        self.graph.arc_info(arc).expect("arc index is live").reverse
    }

    /// Arcs with positive residual capacity leaving `node` — what every
    /// augmenting-path search walks.
    #[must_use]
    pub fn admissible_arcs(&self, node: NodeIndex) -> Vec<ArcIndex> {
        self.graph
            .incident_arcs(node)
            .into_iter()
            .filter(|&arc| self.src_node(arc) == node && self.residual_capacity(arc) > C::default())
            .collect()
    }

    /// Pushes `delta` units of flow along `arc`, crediting the reverse
    /// image's residual capacity by the same amount.
    pub fn push_flow(&mut self, arc: ArcIndex, delta: C) {
        let reverse = self.reverse_of(arc);
        self.graph.arc_info_mut(arc).unwrap().flow = self.graph.arc_info(arc).unwrap().flow + delta;
        self.graph.arc_info_mut(reverse).unwrap().flow = self.graph.arc_info(reverse).unwrap().flow - delta;
    }

    /// Resets every arc's flow to zero, keeping capacities and topology —
    /// lets a min-cost solver re-run max-flow with a fresh residual network
    /// without rebuilding it.
    pub fn reset_flow(&mut self) {
        for &arc in &self.forward_arcs {
            let reverse = self.reverse_of(arc);
            self.graph.arc_info_mut(arc).unwrap().flow = C::default();
            self.graph.arc_info_mut(reverse).unwrap().flow = C::default();
        }
    }

    /// Bottleneck (minimum residual capacity) over a path of arcs.
    #[must_use]
    pub fn bottleneck(&self, path: &[ArcIndex]) -> Option<C> {
        path.iter()
            .map(|&arc| self.residual_capacity(arc))
            .min()
    }

    pub fn augment(&mut self, path: &[ArcIndex], delta: C) {
        for &arc in path {
            self.push_flow(arc, delta);
        }
    }
}

impl<C> Default for FlowNetwork<C>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    fn default() -> Self {
        Self::new()
    }
}
