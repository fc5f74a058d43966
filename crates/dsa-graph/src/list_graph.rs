//! Each node owns a circular doubly-linked list of its incident arcs, built
//! on [`dsa_intrusive::Ring`]. O(1) insert node, O(1) insert arc, O(1)
//! remove arc by handle.

use std::marker::PhantomData;

use dsa_intrusive::{Link, Node as LinkNode, Ring};

use crate::{
    ArcIndex, Cookie, Directed, Directionality, Error, GraphRepr, NodeIndex, Result,
    TraversalFlags, Undirected,
};

/// Distinguishes the ring an arc is threaded on at its source endpoint from
/// the one it is threaded on at its target endpoint — the same record
/// needs two independent `(prev, next)` pairs, much like a cache entry
/// that lives in both an LRU list and a hash chain.
#[derive(Copy, Clone, Debug, Default)]
struct SrcTag;
#[derive(Copy, Clone, Debug, Default)]
struct TgtTag;

struct NodeSlot<N> {
    info: N,
    /// Arcs where this node is the source (digraph) or either endpoint
    /// (undirected, first-recorded side).
    out: Ring<usize, SrcTag>,
    /// Arcs where this node is the target (digraph) or either endpoint
    /// (undirected, second-recorded side).
    incoming: Ring<usize, TgtTag>,
    flags: TraversalFlags,
    cookie: Cookie,
}

struct ArcSlot<E> {
    info: E,
    src: NodeIndex,
    tgt: NodeIndex,
    src_link: Link<usize, SrcTag>,
    tgt_link: Link<usize, TgtTag>,
    flags: TraversalFlags,
}

type ArcArena<E> = Vec<Option<ArcSlot<E>>>;

impl<E> LinkNode<usize, SrcTag> for Option<ArcSlot<E>> {
    fn link(&self) -> &Link<usize, SrcTag> {
        &self.as_ref().expect("ring member must be live").src_link
    }
    fn link_mut(&mut self) -> &mut Link<usize, SrcTag> {
        &mut self.as_mut().expect("ring member must be live").src_link
    }
}

impl<E> LinkNode<usize, TgtTag> for Option<ArcSlot<E>> {
    fn link(&self) -> &Link<usize, TgtTag> {
        &self.as_ref().expect("ring member must be live").tgt_link
    }
    fn link_mut(&mut self) -> &mut Link<usize, TgtTag> {
        &mut self.as_mut().expect("ring member must be live").tgt_link
    }
}

/// A graph whose nodes thread their incident arcs on intrusive rings.
/// `Kind` is [`Directed`] or [`Undirected`] (the default); [`ListDigraph`]
/// is a shorthand alias for the directed instantiation.
pub struct ListGraph<N, E, Kind = Undirected> {
    nodes: Vec<Option<NodeSlot<N>>>,
    arcs: ArcArena<E>,
    free_nodes: Vec<usize>,
    free_arcs: Vec<usize>,
    num_nodes: usize,
    num_arcs: usize,
    _kind: PhantomData<Kind>,
}

/// Directed instantiation: arcs are one-directional.
pub type ListDigraph<N, E> = ListGraph<N, E, Directed>;

impl<N, E, Kind: Directionality> Default for ListGraph<N, E, Kind> {
    fn default() -> Self {
        GraphRepr::new()
    }
}

impl<N, E, Kind: Directionality> ListGraph<N, E, Kind> {
    fn node_slot(&self, node: NodeIndex) -> Result<&NodeSlot<N>> {
        self.nodes
            .get(node.0)
            .and_then(Option::as_ref)
            .ok_or(Error::DomainError)
    }

    fn arc_slot(&self, arc: ArcIndex) -> Result<&ArcSlot<E>> {
        self.arcs
            .get(arc.0)
            .and_then(Option::as_ref)
            .ok_or(Error::DomainError)
    }
}

impl<N, E, Kind: Directionality> GraphRepr<N, E> for ListGraph<N, E, Kind> {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            arcs: Vec::new(),
            free_nodes: Vec::new(),
            free_arcs: Vec::new(),
            num_nodes: 0,
            num_arcs: 0,
            _kind: PhantomData,
        }
    }

    fn is_directed(&self) -> bool {
        Kind::IS_DIRECTED
    }

    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    fn num_arcs(&self) -> usize {
        self.num_arcs
    }

    fn insert_node(&mut self, info: N) -> NodeIndex {
        let slot = NodeSlot {
            info,
            out: Ring::new(),
            incoming: Ring::new(),
            flags: TraversalFlags::empty(),
            cookie: Cookie::empty(),
        };
        self.num_nodes += 1;
        if let Some(idx) = self.free_nodes.pop() {
            self.nodes[idx] = Some(slot);
            NodeIndex(idx)
        } else {
            self.nodes.push(Some(slot));
            NodeIndex(self.nodes.len() - 1)
        }
    }

    fn remove_node(&mut self, node: NodeIndex) -> Result<N> {
        self.node_slot(node)?;
        let incident: Vec<usize> = {
            let slot = self.nodes[node.0].as_ref().unwrap();
            let mut ids = slot.out.indices(&self.arcs);
            ids.extend(slot.incoming.indices(&self.arcs));
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        for idx in incident {
            let _ = self.remove_arc(ArcIndex(idx));
        }
        let removed = self.nodes[node.0].take().unwrap();
        self.free_nodes.push(node.0);
        self.num_nodes -= 1;
        Ok(removed.info)
    }

    fn insert_arc(&mut self, src: NodeIndex, tgt: NodeIndex, info: E) -> Result<ArcIndex> {
        self.node_slot(src)?;
        self.node_slot(tgt)?;
        let slot = ArcSlot {
            info,
            src,
            tgt,
            src_link: Link::detached(0),
            tgt_link: Link::detached(0),
            flags: TraversalFlags::empty(),
        };
        let idx = if let Some(idx) = self.free_arcs.pop() {
            self.arcs[idx] = Some(slot);
            idx
        } else {
            self.arcs.push(Some(slot));
            self.arcs.len() - 1
        };
        // `Link::detached` needs the real slot index, so re-detach now that
        // it is known.
        {
            let arc = self.arcs[idx].as_mut().unwrap();
            arc.src_link = Link::detached(idx);
            arc.tgt_link = Link::detached(idx);
        }
        self.nodes[src.0].as_mut().unwrap().out.push_back(&mut self.arcs, idx);
        self.nodes[tgt.0]
            .as_mut()
            .unwrap()
            .incoming
            .push_back(&mut self.arcs, idx);
        self.num_arcs += 1;
        Ok(ArcIndex(idx))
    }

    fn remove_arc(&mut self, arc: ArcIndex) -> Result<E> {
        let (src, tgt) = {
            let slot = self.arc_slot(arc)?;
            (slot.src, slot.tgt)
        };
        self.nodes[src.0].as_mut().unwrap().out.remove(&mut self.arcs, arc.0);
        self.nodes[tgt.0]
            .as_mut()
            .unwrap()
            .incoming
            .remove(&mut self.arcs, arc.0);
        let removed = self.arcs[arc.0].take().unwrap();
        self.free_arcs.push(arc.0);
        self.num_arcs -= 1;
        Ok(removed.info)
    }

    fn node_info(&self, node: NodeIndex) -> Option<&N> {
        self.nodes.get(node.0)?.as_ref().map(|s| &s.info)
    }

    fn node_info_mut(&mut self, node: NodeIndex) -> Option<&mut N> {
        self.nodes.get_mut(node.0)?.as_mut().map(|s| &mut s.info)
    }

    fn arc_info(&self, arc: ArcIndex) -> Option<&E> {
        self.arcs.get(arc.0)?.as_ref().map(|s| &s.info)
    }

    fn arc_info_mut(&mut self, arc: ArcIndex) -> Option<&mut E> {
        self.arcs.get_mut(arc.0)?.as_mut().map(|s| &mut s.info)
    }

    fn src_node(&self, arc: ArcIndex) -> NodeIndex {
        self.arc_slot(arc).expect("valid arc index").src
    }

    fn tgt_node(&self, arc: ArcIndex) -> NodeIndex {
        self.arc_slot(arc).expect("valid arc index").tgt
    }

    fn connected_node(&self, arc: ArcIndex, node: NodeIndex) -> Option<NodeIndex> {
        let slot = self.arc_slot(arc).ok()?;
        if slot.src == node {
            Some(slot.tgt)
        } else if slot.tgt == node {
            Some(slot.src)
        } else {
            None
        }
    }

    fn nodes(&self) -> Vec<NodeIndex> {
        (0..self.nodes.len())
            .filter(|&i| self.nodes[i].is_some())
            .map(NodeIndex)
            .collect()
    }

    fn arcs(&self) -> Vec<ArcIndex> {
        (0..self.arcs.len())
            .filter(|&i| self.arcs[i].is_some())
            .map(ArcIndex)
            .collect()
    }

    fn incident_arcs(&self, node: NodeIndex) -> Vec<ArcIndex> {
        let slot = match self.node_slot(node) {
            Ok(slot) => slot,
            Err(_) => return Vec::new(),
        };
        let mut out: Vec<ArcIndex> = slot.out.indices(&self.arcs).into_iter().map(ArcIndex).collect();
        if !Kind::IS_DIRECTED {
            out.extend(slot.incoming.indices(&self.arcs).into_iter().map(ArcIndex));
        }
        out
    }

    fn node_flags(&self, node: NodeIndex) -> TraversalFlags {
        self.node_slot(node).map(|s| s.flags).unwrap_or_default()
    }

    fn set_node_flags(&mut self, node: NodeIndex, flags: TraversalFlags) {
        if let Some(slot) = self.nodes.get_mut(node.0).and_then(Option::as_mut) {
            slot.flags = flags;
        }
    }

    fn node_cookie(&self, node: NodeIndex) -> Cookie {
        self.node_slot(node).map(|s| s.cookie).unwrap_or_default()
    }

    fn set_node_cookie(&mut self, node: NodeIndex, cookie: Cookie) {
        if let Some(slot) = self.nodes.get_mut(node.0).and_then(Option::as_mut) {
            slot.cookie = cookie;
        }
    }

    fn arc_flags(&self, arc: ArcIndex) -> TraversalFlags {
        self.arc_slot(arc).map(|s| s.flags).unwrap_or_default()
    }

    fn set_arc_flags(&mut self, arc: ArcIndex, flags: TraversalFlags) {
        if let Some(slot) = self.arcs.get_mut(arc.0).and_then(Option::as_mut) {
            slot.flags = flags;
        }
    }
}

impl<N: Clone, E: Clone, Kind: Directionality> Clone for ListGraph<N, E, Kind> {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        let mut node_map = std::collections::HashMap::new();
        for node in self.nodes() {
            let info = self.node_info(node).unwrap().clone();
            node_map.insert(node, out.insert_node(info));
        }
        for arc in self.arcs() {
            let info = self.arc_info(arc).unwrap().clone();
            out.insert_arc(node_map[&self.src_node(arc)], node_map[&self.tgt_node(arc)], info)
                .expect("endpoints were just inserted");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_self_loop_counts_twice_in_incident_arcs() {
        let mut g: ListGraph<(), ()> = ListGraph::new();
        let a = g.insert_node(());
        let loop_arc = g.insert_arc(a, a, ()).unwrap();
        assert_eq!(g.incident_arcs(a), vec![loop_arc, loop_arc]);
    }

    fn star<G: GraphRepr<(), ()>>() -> (G, NodeIndex) {
        let mut g = G::new();
        let hub = g.insert_node(());
        for _ in 0..3 {
            let leaf = g.insert_node(());
            g.insert_arc(hub, leaf, ()).unwrap();
        }
        (g, hub)
    }

    #[test]
    fn remove_node_cascades_to_incident_arcs() {
        let (mut g, hub): (ListGraph<(), (), Directed>, NodeIndex) = star();
        assert_eq!(g.num_arcs(), 3);
        g.remove_node(hub).unwrap();
        assert_eq!(g.num_arcs(), 0);
        assert_eq!(g.num_nodes(), 3);
    }

    #[test]
    fn clone_deep_copies_structure() {
        let (g, hub): (ListGraph<(), (), Directed>, NodeIndex) = star();
        let mut copy = g.clone();
        copy.remove_node(hub).unwrap();
        assert_eq!(copy.num_arcs(), 0);
        assert_eq!(g.num_arcs(), 3, "clone must not alias the original's storage");
    }

    #[test]
    fn digraph_incident_arcs_is_outgoing_only() {
        let mut g: ListDigraph<(), ()> = ListGraph::new();
        let a = g.insert_node(());
        let b = g.insert_node(());
        g.insert_arc(a, b, ()).unwrap();
        assert_eq!(g.incident_arcs(a).len(), 1);
        assert_eq!(g.incident_arcs(b).len(), 0);
    }
}
