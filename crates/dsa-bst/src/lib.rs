//! Self-balancing binary search tree backends, all built on a shared
//! index-addressed arena.
//!
//! Every backend exposes the same surface — `insert`/`search`/`contains`/
//! `remove`/`select`/`rank`/`iter` — so [`dsa_ordered`](../dsa_ordered)'s
//! `set`/`map` adapters can be generic over which one backs a given
//! container.

mod arena;

pub mod avl;
pub mod randomized;
pub mod red_black;
pub mod red_black_topdown;
pub mod splay;
pub mod treap;

pub use arena::Color;
pub use avl::Avl;
pub use randomized::RandomizedBst;
pub use red_black::RedBlack;
pub use red_black_topdown::RedBlackTopDown;
pub use splay::Splay;
pub use treap::Treap;
