//! Ford-Fulkerson and Edmonds-Karp: both repeatedly find an augmenting
//! path and push flow along its bottleneck; they differ only in
//! which path the search picks, so both are expressed as the same driver
//! loop parameterized by a path-finding strategy.

use std::ops::{Add, Sub};

use dsa_core::Result;
use dsa_graph::NodeIndex;

use crate::augment::{find_path_bfs, find_path_dfs};
use crate::network::FlowNetwork;

fn drive<C, F>(net: &mut FlowNetwork<C>, source: NodeIndex, sink: NodeIndex, mut find_path: F) -> C
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
    F: FnMut(&FlowNetwork<C>, NodeIndex, NodeIndex) -> Option<Vec<dsa_graph::ArcIndex>>,
{
    let mut total = C::default();
    while let Some(path) = find_path(net, source, sink) {
        let delta = net.bottleneck(&path).expect("a found path has at least one arc");
        net.augment(&path, delta);
        total = total + delta;
    }
    total
}

/// Ford-Fulkerson with DFS path selection, the algorithm's "use any
/// augmenting path" rule made concrete. Returns the maximum flow value;
/// inspect individual arcs with [`FlowNetwork::flow_of`] afterwards.
pub fn ford_fulkerson<C>(net: &mut FlowNetwork<C>, source: NodeIndex, sink: NodeIndex) -> Result<C>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    tracing::debug!(?source, ?sink, "ford-fulkerson starting");
    Ok(drive(net, source, sink, find_path_dfs))
}

/// Ford-Fulkerson with BFS path selection: O(V*E^2).
pub fn edmonds_karp<C>(net: &mut FlowNetwork<C>, source: NodeIndex, sink: NodeIndex) -> Result<C>
where
    C: Copy + Ord + Default + Add<Output = C> + Sub<Output = C>,
{
    tracing::debug!(?source, ?sink, "edmonds-karp starting");
    Ok(drive(net, source, sink, find_path_bfs))
}
