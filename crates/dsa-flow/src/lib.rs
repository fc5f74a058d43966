//! Network-flow engine: Ford-Fulkerson, Edmonds-Karp, Dinic's algorithm,
//! push-relabel, min-cut extraction, edge/vertex connectivity and
//! cycle-canceling min-cost max-flow, all built on [`FlowNetwork`]'s
//! explicit forward/residual arc pairs.
//!
//! **Failure model**: negative capacity rejected at
//! [`FlowNetwork::add_edge`] time with `Error::InvalidCapacity`.
//! `Error::NegativeCycle` and `Error::InfeasibleProblem` are reserved for
//! [`min_cost_max_flow`] and are not raised by the plain max-flow drivers,
//! which always terminate with *some* flow (zero if the terminals are
//! disconnected).

mod augment;
mod connectivity;
mod dinic;
mod max_flow;
mod min_cost_flow;
mod min_cut;
mod network;
mod push_relabel;

pub use connectivity::{k_edge_connectivity, k_vertex_connectivity};
pub use dinic::dinic;
pub use max_flow::{edmonds_karp, ford_fulkerson};
pub use min_cost_flow::{min_cost_max_flow, CostTable};
pub use min_cut::{min_cut, MinCut};
pub use network::{FlowEdge, FlowNetwork};
pub use push_relabel::{push_relabel, ActiveNodeOrder};
