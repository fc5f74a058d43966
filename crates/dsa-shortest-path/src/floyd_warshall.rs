//! Floyd-Warshall: dense all-pairs shortest paths in O(V^3), tolerating
//! negative arc weights as long as no reachable cycle sums negative. Keeps
//! an explicit `V x V` distance matrix indexed by a side table mapping
//! [`NodeIndex`] to a dense `0..n` position.

use std::ops::Add;

use dsa_core::{Error, Result};
use dsa_graph::{GraphRepr, NodeIndex};

/// Dense all-pairs distances. `distance[i][j]` is the shortest distance from
/// the `i`th node (in [`GraphRepr::nodes`] order) to the `j`th, or `None` if
/// `j` is unreachable from `i`.
pub struct AllPairs<W> {
    nodes: Vec<NodeIndex>,
    distance: Vec<Vec<Option<W>>>,
}

impl<W: Copy> AllPairs<W> {
    #[must_use]
    pub fn distance_between(&self, from: NodeIndex, to: NodeIndex) -> Option<W> {
        let i = self.position_of(from)?;
        let j = self.position_of(to)?;
        self.distance[i][j]
    }

    fn position_of(&self, node: NodeIndex) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }
}

/// Runs Floyd-Warshall over every node pair. `Error::NegativeCycle` if any
/// node's distance to itself goes negative, the standard all-pairs
/// negative-cycle witness (a node reaching itself via a negative-sum loop).
pub fn floyd_warshall<G, N, E, W, F>(g: &G, weight: F) -> Result<AllPairs<W>>
where
    G: GraphRepr<N, E>,
    W: Copy + Ord + Add<Output = W> + Default,
    F: Fn(&E) -> W,
{
    tracing::debug!(num_nodes = g.num_nodes(), "floyd-warshall starting");
    let nodes = g.nodes();
    let n = nodes.len();
    let mut distance: Vec<Vec<Option<W>>> = vec![vec![None; n]; n];
    for (i, _) in nodes.iter().enumerate() {
        distance[i][i] = Some(W::default());
    }
    for arc in g.arcs() {
        let u = g.src_node(arc);
        let v = g.tgt_node(arc);
        let Some(i) = nodes.iter().position(|&n| n == u) else {
            continue;
        };
        let Some(j) = nodes.iter().position(|&n| n == v) else {
            continue;
        };
        let w = weight(g.arc_info(arc).expect("live arc has info"));
        if distance[i][j].is_none_or(|best| w < best) {
            distance[i][j] = Some(w);
        }
        if !g.is_directed() && distance[j][i].is_none_or(|best| w < best) {
            distance[j][i] = Some(w);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let Some(dik) = distance[i][k] else { continue };
            for j in 0..n {
                let Some(dkj) = distance[k][j] else { continue };
                let candidate = dik + dkj;
                if distance[i][j].is_none_or(|best| candidate < best) {
                    distance[i][j] = Some(candidate);
                }
            }
        }
    }

    for i in 0..n {
        if distance[i][i].is_some_and(|d| d < W::default()) {
            tracing::debug!("floyd-warshall detected a negative-weight cycle");
            return Err(Error::NegativeCycle);
        }
    }

    Ok(AllPairs { nodes, distance })
}
