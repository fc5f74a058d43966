//! Splay tree backend: every access (search, insert, or the lookup half
//! of a remove) walks the found node to the root via zig/
//! zig-zig/zig-zag rotations. No explicit balance invariant is maintained;
//! amortized O(log n) per operation comes from the move-to-front-style
//! potential argument, not a per-node structural bound.

use dsa_core::{Error, Result};

use crate::arena::{Arena, Metadata, NIL};

#[derive(Copy, Clone)]
pub struct SplayMeta {
    size: usize,
}

impl Metadata for SplayMeta {
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

/// A splay tree mapping `K` to `V`.
pub struct Splay<K, V> {
    arena: Arena<K, V, SplayMeta>,
    allow_dup: bool,
}

impl<K: Ord + Default, V: Default> Default for Splay<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Default, V: Default> Splay<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            allow_dup: false,
        }
    }

    #[must_use]
    pub fn with_duplicates() -> Self {
        Self {
            arena: Arena::new(),
            allow_dup: true,
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

    fn rotate_left(&mut self, x: usize) -> usize {
        self.arena.rotate_left(x)
    }

    fn rotate_right(&mut self, x: usize) -> usize {
        self.arena.rotate_right(x)
    }

    /// Walk `x` to the root via repeated zig/zig-zig/zig-zag steps.
    fn splay(&mut self, mut x: usize) {
        while self.arena.nodes[x].parent != NIL {
            let parent = self.arena.nodes[x].parent;
            let grandparent = self.arena.nodes[parent].parent;
            if grandparent == NIL {
                // zig
                if x == self.arena.nodes[parent].left {
                    self.rotate_right(parent);
                } else {
                    self.rotate_left(parent);
                }
            } else if x == self.arena.nodes[parent].left && parent == self.arena.nodes[grandparent].left {
                // zig-zig
                self.rotate_right(grandparent);
                self.rotate_right(parent);
            } else if x == self.arena.nodes[parent].right && parent == self.arena.nodes[grandparent].right {
                // zig-zig
                self.rotate_left(grandparent);
                self.rotate_left(parent);
            } else if x == self.arena.nodes[parent].right && parent == self.arena.nodes[grandparent].left {
                // zig-zag
                self.rotate_left(parent);
                self.rotate_right(grandparent);
            } else {
                // zig-zag
                self.rotate_right(parent);
                self.rotate_left(grandparent);
            }
        }
    }

    /// Descend to `key` (or its would-be parent if absent) and splay
    /// whatever node the descent stopped at to the root. Returns the index
    /// now at the root, and whether it holds `key`.
    fn find_and_splay(&mut self, key: &K) -> (usize, bool) {
        if self.arena.is_empty() {
            return (NIL, false);
        }
        let mut cur = self.arena.root;
        let mut last = cur;
        let mut found = false;
        while cur != NIL {
            last = cur;
            match key.cmp(&self.arena.nodes[cur].key) {
                std::cmp::Ordering::Less => cur = self.arena.nodes[cur].left,
                std::cmp::Ordering::Greater => cur = self.arena.nodes[cur].right,
                std::cmp::Ordering::Equal => {
                    found = true;
                    break;
                }
            }
        }
        self.splay(last);
        (self.arena.root, found)
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if self.arena.is_empty() {
            let idx = self.arena.insert_leaf(NIL, std::cmp::Ordering::Equal, key, value, SplayMeta::sentinel());
            self.arena.recompute_size(idx);
            return Ok(());
        }
        let (root, found) = self.find_and_splay(&key);
        if found && !self.allow_dup {
            return Err(Error::DuplicateKey);
        }
        // `root` now holds whatever key the descent landed on; graft the new
        // node above it, splitting its two children between the new node's
        // sides according to key order.
        let dir = key.cmp(&self.arena.nodes[root].key);
        let idx = self.arena.insert_leaf(NIL, std::cmp::Ordering::Equal, key, value, SplayMeta::sentinel());
        if dir == std::cmp::Ordering::Less || (dir == std::cmp::Ordering::Equal && self.allow_dup) {
            let left = self.arena.nodes[root].left;
            self.arena.nodes[idx].left = left;
            if left != NIL {
                self.arena.nodes[left].parent = idx;
            }
            self.arena.nodes[idx].right = root;
            self.arena.nodes[root].left = NIL;
            self.arena.nodes[root].parent = idx;
        } else {
            let right = self.arena.nodes[root].right;
            self.arena.nodes[idx].right = right;
            if right != NIL {
                self.arena.nodes[right].parent = idx;
            }
            self.arena.nodes[idx].left = root;
            self.arena.nodes[root].right = NIL;
            self.arena.nodes[root].parent = idx;
        }
        self.arena.root = idx;
        self.arena.recompute_size(root);
        self.arena.recompute_size(idx);
        Ok(())
    }

    pub fn search(&mut self, key: &K) -> Option<&V> {
        let (root, found) = self.find_and_splay(key);
        found.then(|| &self.arena.nodes[root].value)
    }

    pub fn contains(&mut self, key: &K) -> bool {
        self.find_and_splay(key).1
    }

    pub fn remove(&mut self, key: &K) -> Result<V> {
        let (root, found) = self.find_and_splay(key);
        if !found {
            return Err(Error::DomainError);
        }
        let removed_value = std::mem::take(&mut self.arena.nodes[root].value);
        let left = self.arena.nodes[root].left;
        let right = self.arena.nodes[root].right;
        self.arena.deallocate(root);
        if left == NIL {
            self.arena.root = right;
            if right != NIL {
                self.arena.nodes[right].parent = NIL;
            }
        } else {
            self.arena.nodes[left].parent = NIL;
            self.arena.root = left;
            if right != NIL {
                // Splay the maximum of the left subtree to its root, then
                // hang `right` off it — the standard two-tree splay join.
                let max_left = self.arena.maximum(left);
                self.splay(max_left);
                self.arena.nodes[self.arena.root].right = right;
                self.arena.nodes[right].parent = self.arena.root;
                self.arena.recompute_size(self.arena.root);
            }
        }
        Ok(removed_value)
    }

    /// Position `k` without disturbing the tree's shape via a splay — used
    /// by order-statistics callers that want `at(pos)` to stay a read-only
    /// operation.
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
    fn insert_search_splays_accessed_key_to_root() {
        let mut tree: Splay<i32, &str> = Splay::new();
        tree.insert(5, "five").unwrap();
        tree.insert(3, "three").unwrap();
        tree.insert(8, "eight").unwrap();
        assert_eq!(tree.search(&3), Some(&"three"));
        assert_eq!(tree.arena.nodes[tree.arena.root].key, 3);
    }

    #[test]
    fn duplicate_key_rejected_by_default() {
        let mut tree: Splay<i32, i32> = Splay::new();
        tree.insert(1, 1).unwrap();
        assert_eq!(tree.insert(1, 2), Err(Error::DuplicateKey));
    }

    #[test]
    fn in_order_traversal_is_sorted_after_sequential_insert() {
        let mut tree: Splay<i32, i32> = Splay::new();
        for i in 0..150 {
            tree.insert(i, i).unwrap();
        }
        let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(tree.len(), 150);
    }

    #[test]
    fn remove_then_search_for_removed_key_fails() {
        let mut tree: Splay<i32, i32> = Splay::new();
        for i in 0..40 {
            tree.insert(i, i).unwrap();
        }
        assert_eq!(tree.remove(&20), Ok(20));
        assert_eq!(tree.search(&20), None);
        assert_eq!(tree.len(), 39);
        for i in 0..40 {
            if i != 20 {
                assert!(tree.contains(&i));
            }
        }
    }

    #[test]
    fn select_and_rank_agree_with_in_order_position() {
        let mut tree: Splay<i32, i32> = Splay::new();
        for i in 0..30 {
            tree.insert(i, i).unwrap();
        }
        for i in 0..30 {
            assert_eq!(tree.select(i as usize).unwrap().0, &i);
            assert_eq!(tree.rank(&i), i as usize);
        }
    }
}
