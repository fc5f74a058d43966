//! Shortest-path engines over any [`dsa_graph::GraphRepr`]
//! backend: Dijkstra (lazy-heap and decrease-key variants), Bellman-Ford
//! (standard and SPFA queue-based variants), and dense all-pairs
//! Floyd-Warshall. Every engine is generic over the arc weight type and a
//! caller-supplied `weight` closure, so the graph's edge payload need not be
//! the weight itself — weight extraction is a caller-supplied projection,
//! not a fixed field.

mod bellman_ford;
mod dijkstra;
mod floyd_warshall;
mod paths;

pub use bellman_ford::{bellman_ford, bellman_ford_spfa};
pub use dijkstra::{dijkstra, dijkstra_decrease_key, dijkstra_until};
pub use floyd_warshall::{floyd_warshall, AllPairs};
pub use paths::ShortestPaths;
