//! Treap backend: a BST ordered by key that is simultaneously a max-heap
//! on an independently drawn random priority per node. Insertion
//! rotates the new leaf up while its priority exceeds its parent's;
//! deletion rotates the target down toward a leaf (always rotating in the
//! higher-priority child) and then splices it out.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;

use dsa_core::{seed_or_default, Error, Result};

use crate::arena::{Arena, Metadata, NIL};

#[derive(Copy, Clone)]
pub struct TreapMeta {
    priority: u64,
    size: usize,
}

impl Metadata for TreapMeta {
    fn sentinel() -> Self {
        Self { priority: 0, size: 0 }
    }
    fn size(&self) -> usize {
        self.size
    }
    fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}

/// A randomized treap mapping `K` to `V`.
///
/// Balance is probabilistic rather than invariant-enforced: with
/// independently drawn priorities the expected height is `O(log n)`, but no
/// single insertion sequence is guaranteed balanced.
/// The generator is seeded once at construction via [`seed_or_default`] so a
/// caller who supplies a seed gets byte-identical shapes across runs.
pub struct Treap<K, V> {
    arena: Arena<K, V, TreapMeta>,
    allow_dup: bool,
    rng: RefCell<ChaCha8Rng>,
}

impl<K: Ord + Default, V: Default> Default for Treap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Default, V: Default> Treap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(None)
    }

    #[must_use]
    pub fn with_duplicates() -> Self {
        let mut t = Self::with_seed(None);
        t.allow_dup = true;
        t
    }

    /// Construct with an explicit RNG seed for reproducible shapes, or
    /// `None` for a fresh one each run.
    #[must_use]
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self {
            arena: Arena::new(),
            allow_dup: false,
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed_or_default(seed))),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
    }

    fn priority(&self, idx: usize) -> u64 {
        self.arena.nodes[idx].meta.priority
    }

    fn draw_priority(&self) -> u64 {
        self.rng.borrow_mut().gen()
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let (parent, dir) = self
            .arena
            .find_insert_slot(&key, self.allow_dup)
            .map_err(|_| Error::DuplicateKey)?;
        let mut meta = TreapMeta::sentinel();
        meta.priority = self.draw_priority();
        let idx = self.arena.insert_leaf(parent, dir, key, value, meta);
        self.arena.recompute_size(idx);
        let mut p = parent;
        while p != NIL {
            self.arena.recompute_size(p);
            p = self.arena.nodes[p].parent;
        }
        self.bubble_up(idx);
        Ok(())
    }

    /// Rotate `idx` up while it outranks its parent, restoring the heap
    /// property (the BST property is rotation-invariant).
    fn bubble_up(&mut self, mut idx: usize) {
        while self.arena.nodes[idx].parent != NIL
            && self.priority(idx) > self.priority(self.arena.nodes[idx].parent)
        {
            let parent = self.arena.nodes[idx].parent;
            if idx == self.arena.nodes[parent].left {
                self.arena.rotate_right(parent);
            } else {
                self.arena.rotate_left(parent);
            }
        }
    }

    pub fn search(&self, key: &K) -> Option<&V> {
        let idx = self.arena.search(key);
        (idx != NIL).then(|| &self.arena.nodes[idx].value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.arena.search(key) != NIL
    }

    pub fn remove(&mut self, key: &K) -> Result<V> {
        let idx = self.arena.search(key);
        if idx == NIL {
            return Err(Error::DomainError);
        }
        Ok(self.delete_node(idx))
    }

    /// Rotate the lower-priority child up (pushing `idx` toward a leaf)
    /// until `idx` has no children, then splice it out directly.
    fn delete_node(&mut self, mut idx: usize) -> V {
        loop {
            let (left, right) = (self.arena.nodes[idx].left, self.arena.nodes[idx].right);
            if left == NIL && right == NIL {
                break;
            } else if left == NIL {
                self.arena.rotate_left(idx);
            } else if right == NIL {
                self.arena.rotate_right(idx);
            } else if self.priority(left) > self.priority(right) {
                self.arena.rotate_right(idx);
            } else {
                self.arena.rotate_left(idx);
            }
            // `idx` is now one level deeper in the tree, its own index unchanged.
        }
        let removed_value = std::mem::take(&mut self.arena.nodes[idx].value);
        let (_, parent) = self.arena.splice_out(idx);
        self.arena.deallocate(idx);
        let mut p = parent;
        while p != NIL {
            self.arena.recompute_size(p);
            p = self.arena.nodes[p].parent;
        }
        removed_value
    }

    pub fn select(&self, k: usize) -> Result<(&K, &V)> {
        let idx = self.arena.select(k).ok_or(Error::OutOfRange)?;
        Ok((&self.arena.nodes[idx].key, &self.arena.nodes[idx].value))
    }

    pub fn rank(&self, key: &K) -> usize {
        self.arena.rank(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.arena
            .in_order()
            .into_iter()
            .map(move |idx| (&self.arena.nodes[idx].key, &self.arena.nodes[idx].value))
    }

    /// every node's priority is `>=` both children's (max-heap
    /// order), in addition to the ordinary BST key order.
    #[cfg(test)]
    fn debug_check_heap_order(&self) -> bool {
        fn walk<K, V>(arena: &Arena<K, V, TreapMeta>, idx: usize) -> bool {
            if idx == NIL {
                return true;
            }
            let (l, r) = (arena.nodes[idx].left, arena.nodes[idx].right);
            if l != NIL && arena.nodes[l].meta.priority > arena.nodes[idx].meta.priority {
                return false;
            }
            if r != NIL && arena.nodes[r].meta.priority > arena.nodes[idx].meta.priority {
                return false;
            }
            walk(arena, l) && walk(arena, r)
        }
        walk(&self.arena, self.arena.root)
    }
}
