//! Each node owns a dynamic array of incident arc indices, built on
//! [`dsa_vector::DynArray`]. O(1) amortized insert arc; O(degree) remove
//! arc, implemented as swap-with-last so no shifting is needed.

use std::marker::PhantomData;

use dsa_vector::DynArray;

use crate::{
    ArcIndex, Cookie, Directed, Directionality, Error, GraphRepr, NodeIndex, Result,
    TraversalFlags, Undirected,
};

struct NodeSlot<N> {
    info: N,
    out: DynArray<ArcIndex>,
    incoming: DynArray<ArcIndex>,
    flags: TraversalFlags,
    cookie: Cookie,
}

struct ArcSlot<E> {
    info: E,
    src: NodeIndex,
    tgt: NodeIndex,
    flags: TraversalFlags,
}

/// Removes the first occurrence of `value` from `arr` by swapping it with
/// the last element and popping, keeping removal O(degree) with no
/// shifting.
fn swap_remove(arr: &mut DynArray<ArcIndex>, value: ArcIndex) {
    if let Some(pos) = (0..arr.len()).find(|&i| arr[i] == value) {
        let last = arr.len() - 1;
        if pos != last {
            let last_val = arr[last];
            arr[pos] = last_val;
        }
        arr.pop_back();
    }
}

/// A graph whose nodes keep their incident arcs in a dynamic array. `Kind`
/// is [`Directed`] or [`Undirected`] (the default); [`ArrayDigraph`] is a
/// shorthand alias for the directed instantiation.
pub struct ArrayGraph<N, E, Kind = Undirected> {
    nodes: Vec<Option<NodeSlot<N>>>,
    arcs: Vec<Option<ArcSlot<E>>>,
    free_nodes: Vec<usize>,
    free_arcs: Vec<usize>,
    num_nodes: usize,
    num_arcs: usize,
    _kind: PhantomData<Kind>,
}

/// Directed instantiation: arcs are one-directional.
pub type ArrayDigraph<N, E> = ArrayGraph<N, E, Directed>;

impl<N, E, Kind: Directionality> Default for ArrayGraph<N, E, Kind> {
    fn default() -> Self {
        GraphRepr::new()
    }
}

impl<N, E, Kind: Directionality> ArrayGraph<N, E, Kind> {
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

impl<N, E, Kind: Directionality> GraphRepr<N, E> for ArrayGraph<N, E, Kind> {
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
            out: DynArray::new(),
            incoming: DynArray::new(),
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
            let mut ids: Vec<usize> = slot.out.iter().map(|a| a.0).collect();
            ids.extend(slot.incoming.iter().map(|a| a.0));
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
            flags: TraversalFlags::empty(),
        };
        let idx = if let Some(idx) = self.free_arcs.pop() {
            self.arcs[idx] = Some(slot);
            idx
        } else {
            self.arcs.push(Some(slot));
            self.arcs.len() - 1
        };
        self.nodes[src.0].as_mut().unwrap().out.push_back(ArcIndex(idx));
        self.nodes[tgt.0].as_mut().unwrap().incoming.push_back(ArcIndex(idx));
        self.num_arcs += 1;
        Ok(ArcIndex(idx))
    }

    fn remove_arc(&mut self, arc: ArcIndex) -> Result<E> {
        let (src, tgt) = {
            let slot = self.arc_slot(arc)?;
            (slot.src, slot.tgt)
        };
        swap_remove(&mut self.nodes[src.0].as_mut().unwrap().out, arc);
        swap_remove(&mut self.nodes[tgt.0].as_mut().unwrap().incoming, arc);
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
        let mut out: Vec<ArcIndex> = slot.out.iter().copied().collect();
        if !Kind::IS_DIRECTED {
            out.extend(slot.incoming.iter().copied());
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

impl<N: Clone, E: Clone, Kind: Directionality> Clone for ArrayGraph<N, E, Kind> {
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
    fn swap_remove_does_not_shift_other_entries() {
        let mut arr = DynArray::new();
        for i in 0..5 {
            arr.push_back(ArcIndex(i));
        }
        swap_remove(&mut arr, ArcIndex(1));
        assert_eq!(arr.len(), 4);
        assert!(arr.iter().any(|a| a.0 == 4));
        assert!(!arr.iter().any(|a| a.0 == 1));
    }

    #[test]
    fn undirected_degree_counts_self_loop_twice() {
        let mut g: ArrayGraph<(), ()> = ArrayGraph::new();
        let a = g.insert_node(());
        g.insert_arc(a, a, ()).unwrap();
        assert_eq!(g.incident_arcs(a).len(), 2);
    }

    #[test]
    fn remove_node_cascades_and_leaves_no_dangling_arc() {
        let mut g: ArrayDigraph<(), ()> = ArrayGraph::new();
        let hub = g.insert_node(());
        let leaves: Vec<_> = (0..4).map(|_| g.insert_node(())).collect();
        for &leaf in &leaves {
            g.insert_arc(hub, leaf, ()).unwrap();
        }
        g.remove_node(hub).unwrap();
        assert_eq!(g.num_arcs(), 0);
        for leaf in leaves {
            assert_eq!(g.incident_arcs(leaf).len(), 0);
        }
    }
}
