//! Randomized BST backend: balance comes from choosing, at each insertion,
//! whether the new node becomes the root of the subtree it lands
//! in with probability `1 / (subtree_size + 1)` — the same distribution a
//! uniformly random insertion order would produce, achieved here without
//! requiring the caller to insert in random order. Deletion merges the
//! target's two children with a probability weighted by their sizes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::cmp::Ordering;

use dsa_core::{seed_or_default, Error, Result};

use crate::arena::{Arena, Metadata, NIL};

#[derive(Copy, Clone)]
pub struct RandomizedMeta {
    size: usize,
}

impl Metadata for RandomizedMeta {
    fn sentinel() -> Self {
        Self { size: 0 }
    }
    fn size(&self) -> usize {
        self.size
    }
    fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}

/// A randomized BST mapping `K` to `V`, balanced in expectation rather than
/// by a maintained invariant (expected `O(log n)` height
/// regardless of insertion order, not a worst-case bound).
pub struct RandomizedBst<K, V> {
    arena: Arena<K, V, RandomizedMeta>,
    allow_dup: bool,
    rng: RefCell<ChaCha8Rng>,
}

impl<K: Ord + Default, V: Default> Default for RandomizedBst<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Default, V: Default> RandomizedBst<K, V> {
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

    fn size(&self, idx: usize) -> usize {
        self.arena.size_of(idx)
    }

    /// `true` with probability `1 / (n + 1)`, for a subtree of size `n`
    /// about to gain a member.
    fn becomes_root(&self, subtree_size: usize) -> bool {
        self.rng.borrow_mut().gen_range(0..=subtree_size) == 0
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if !self.allow_dup && self.contains(&key) {
            return Err(Error::DuplicateKey);
        }
        let root = self.arena.root;
        let new_root = self.insert_into(root, key, value)?;
        self.arena.root = new_root;
        self.arena.nodes[new_root].parent = NIL;
        Ok(())
    }

    fn insert_into(&mut self, idx: usize, key: K, value: V) -> Result<usize> {
        if idx == NIL {
            let leaf = self.arena.insert_leaf(NIL, Ordering::Equal, key, value, RandomizedMeta::sentinel());
            self.arena.recompute_size(leaf);
            return Ok(leaf);
        }
        let n = self.size(idx);
        if self.becomes_root(n) {
            return Ok(self.insert_as_root(idx, key, value));
        }
        match key.cmp(&self.arena.nodes[idx].key) {
            Ordering::Less => {
                let left = self.arena.nodes[idx].left;
                let new_left = self.insert_into(left, key, value)?;
                self.arena.nodes[idx].left = new_left;
                self.arena.nodes[new_left].parent = idx;
            }
            _ => {
                let right = self.arena.nodes[idx].right;
                let new_right = self.insert_into(right, key, value)?;
                self.arena.nodes[idx].right = new_right;
                self.arena.nodes[new_right].parent = idx;
            }
        }
        self.arena.recompute_size(idx);
        Ok(idx)
    }

    /// Insert a fresh leaf, then split `idx`'s subtree across it so the new
    /// node becomes the subtree root directly (not via rotation chains).
    fn insert_as_root(&mut self, idx: usize, key: K, value: V) -> usize {
        let (left_part, right_part) = self.split(idx, &key);
        let leaf = self.arena.insert_leaf(NIL, Ordering::Equal, key, value, RandomizedMeta::sentinel());
        self.arena.nodes[leaf].left = left_part;
        if left_part != NIL {
            self.arena.nodes[left_part].parent = leaf;
        }
        self.arena.nodes[leaf].right = right_part;
        if right_part != NIL {
            self.arena.nodes[right_part].parent = leaf;
        }
        self.arena.recompute_size(leaf);
        leaf
    }

    /// Split the subtree rooted at `idx` into (keys < `key`, keys >= `key`).
    fn split(&mut self, idx: usize, key: &K) -> (usize, usize) {
        if idx == NIL {
            return (NIL, NIL);
        }
        if key.cmp(&self.arena.nodes[idx].key) == Ordering::Greater {
            let right = self.arena.nodes[idx].right;
            let (lo, hi) = self.split(right, key);
            self.arena.nodes[idx].right = lo;
            if lo != NIL {
                self.arena.nodes[lo].parent = idx;
            }
            self.arena.nodes[idx].parent = NIL;
            self.arena.recompute_size(idx);
            (idx, hi)
        } else {
            let left = self.arena.nodes[idx].left;
            let (lo, hi) = self.split(left, key);
            self.arena.nodes[idx].left = hi;
            if hi != NIL {
                self.arena.nodes[hi].parent = idx;
            }
            self.arena.nodes[idx].parent = NIL;
            self.arena.recompute_size(idx);
            (lo, idx)
        }
    }

    /// Merge two subtrees known to be key-disjoint and ordered (`left` all
    /// less than `right`), picking the new root with probability
    /// proportional to each side's size.
    fn merge(&mut self, left: usize, right: usize) -> usize {
        if left == NIL {
            return right;
        }
        if right == NIL {
            return left;
        }
        let (ls, rs) = (self.size(left), self.size(right));
        if self.rng.borrow_mut().gen_range(0..ls + rs) < ls {
            let lr = self.arena.nodes[left].right;
            let merged = self.merge(lr, right);
            self.arena.nodes[left].right = merged;
            self.arena.nodes[merged].parent = left;
            self.arena.recompute_size(left);
            left
        } else {
            let rl = self.arena.nodes[right].left;
            let merged = self.merge(left, rl);
            self.arena.nodes[right].left = merged;
            self.arena.nodes[merged].parent = right;
            self.arena.recompute_size(right);
            right
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
        let parent = self.arena.nodes[idx].parent;
        let removed_value = std::mem::take(&mut self.arena.nodes[idx].value);
        let (left, right) = (self.arena.nodes[idx].left, self.arena.nodes[idx].right);
        self.arena.deallocate(idx);
        let merged = self.merge(left, right);
        if parent == NIL {
            self.arena.root = merged;
            if merged != NIL {
                self.arena.nodes[merged].parent = NIL;
            }
        } else if self.arena.nodes[parent].left == idx {
            self.arena.nodes[parent].left = merged;
            if merged != NIL {
                self.arena.nodes[merged].parent = parent;
            }
        } else {
            self.arena.nodes[parent].right = merged;
            if merged != NIL {
                self.arena.nodes[merged].parent = parent;
            }
        }
        let mut p = parent;
        while p != NIL {
            self.arena.recompute_size(p);
            p = self.arena.nodes[p].parent;
        }
        Ok(removed_value)
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_search_contains() {
        let mut tree: RandomizedBst<i32, &str> = RandomizedBst::with_seed(Some(1));
        tree.insert(5, "five").unwrap();
        tree.insert(3, "three").unwrap();
        tree.insert(8, "eight").unwrap();
        assert!(tree.contains(&5));
        assert_eq!(tree.search(&3), Some(&"three"));
        assert_eq!(tree.search(&9), None);
    }

    #[test]
    fn duplicate_key_rejected_by_default() {
        let mut tree: RandomizedBst<i32, i32> = RandomizedBst::with_seed(Some(2));
        tree.insert(1, 1).unwrap();
        assert_eq!(tree.insert(1, 2), Err(Error::DuplicateKey));
    }

    #[test]
    fn in_order_traversal_is_sorted_after_sequential_insert() {
        let mut tree: RandomizedBst<i32, i32> = RandomizedBst::with_seed(Some(11));
        for i in 0..300 {
            tree.insert(i, i).unwrap();
        }
        let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(tree.len(), 300);
    }

    #[test]
    fn remove_preserves_remaining_sorted_order() {
        let mut tree: RandomizedBst<i32, i32> = RandomizedBst::with_seed(Some(13));
        for i in 0..120 {
            tree.insert(i, i).unwrap();
        }
        for i in (0..120).step_by(4) {
            assert_eq!(tree.remove(&i), Ok(i));
        }
        let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(tree.len(), 90);
    }

    #[test]
    fn select_and_rank_agree_with_in_order_position() {
        let mut tree: RandomizedBst<i32, i32> = RandomizedBst::with_seed(Some(17));
        for i in 0..50 {
            tree.insert(i, i).unwrap();
        }
        for i in 0..50 {
            assert_eq!(tree.select(i as usize).unwrap().0, &i);
            assert_eq!(tree.rank(&i), i as usize);
        }
    }
}
