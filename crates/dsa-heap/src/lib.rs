//! Priority queue backends: binary, binomial, Fibonacci and pairing heaps,
//! all ordered by a separate priority `P` carried alongside
//! an arbitrary payload `V` (the shape [`dsa_shortest_path`](../dsa_shortest_path)'s
//! Dijkstra implementation needs from whichever one it is handed).
//!
//! Every backend hands back a [`Handle`] from `push`/`insert` that later
//! calls to `decrease_key` use to name a live entry — the idiomatic
//! replacement for a raw node pointer into the heap's internal structure.

mod binary;
mod binomial;
mod fibonacci;
mod pairing;

pub use binary::BinaryHeap;
pub use binomial::BinomialHeap;
pub use fibonacci::FibonacciHeap;
pub use pairing::PairingHeap;

/// An opaque reference to a live entry, returned by `push`/`insert` and
/// consumed by `decrease_key`. Stable across pops and melds of *other*
/// entries; invalid once the entry it names has been popped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle(pub usize);
