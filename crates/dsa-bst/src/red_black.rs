//! Bottom-up red-black backend.
//!
//! New nodes are inserted red; if the parent is also red, the uncle's color
//! decides between recoloring upward and a terminal rotation (six mirrored
//! insert cases, collapsed here into the usual two by symmetry). Deletion
//! splices out the node (or its successor when it has two children) and, if
//! the spliced color was black, walks a "double-black" deficit up through
//! the usual eight sibling-color cases.

use dsa_core::{Error, Result};

use crate::arena::{Arena, Color, Metadata, NIL};

#[derive(Copy, Clone)]
pub struct RbMeta {
    color: Color,
    size: usize,
}

impl Metadata for RbMeta {
    fn sentinel() -> Self {
        Self {
            color: Color::Black,
            size: 0,
        }
    }
    fn size(&self) -> usize {
        self.size
    }
    fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}

/// A red-black tree mapping `K` to `V`, balanced with the classic
/// bottom-up insert/delete fixups.
pub struct RedBlack<K, V> {
    arena: Arena<K, V, RbMeta>,
    allow_dup: bool,
}

impl<K: Ord + Default, V: Default> Default for RedBlack<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Default, V: Default> RedBlack<K, V> {
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

    fn color(&self, idx: usize) -> Color {
        self.arena.nodes[idx].meta.color
    }

    fn set_color(&mut self, idx: usize, color: Color) {
        self.arena.nodes[idx].meta.color = color;
    }

    fn is_red(&self, idx: usize) -> bool {
        idx != NIL && self.color(idx) == Color::Red
    }

    fn parent(&self, idx: usize) -> usize {
        self.arena.nodes[idx].parent
    }

    fn grandparent(&self, idx: usize) -> usize {
        self.parent(self.parent(idx))
    }

    fn rotate_left(&mut self, x: usize) -> usize {
        self.arena.rotate_left(x)
    }

    fn rotate_right(&mut self, x: usize) -> usize {
        self.arena.rotate_right(x)
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let (parent, dir) = self
            .arena
            .find_insert_slot(&key, self.allow_dup)
            .map_err(|_| Error::DuplicateKey)?;
        let z = self.arena.insert_leaf(parent, dir, key, value, RbMeta::sentinel());
        self.set_color(z, Color::Red);
        self.arena.recompute_size(z);
        let mut p = parent;
        while p != NIL {
            self.arena.recompute_size(p);
            p = self.arena.nodes[p].parent;
        }
        self.insert_fixup(z);
        Ok(())
    }

    fn insert_fixup(&mut self, mut z: usize) {
        while self.is_red(self.parent(z)) {
            let parent = self.parent(z);
            let grandparent = self.grandparent(z);
            if parent == self.arena.nodes[grandparent].left {
                let uncle = self.arena.nodes[grandparent].right;
                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.arena.nodes[parent].right {
                        z = parent;
                        self.rotate_left(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.grandparent(z);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.arena.nodes[grandparent].left;
                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.arena.nodes[parent].left {
                        z = parent;
                        self.rotate_right(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.grandparent(z);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        self.set_color(self.arena.root, Color::Black);
    }

    pub fn search(&self, key: &K) -> Option<&V> {
        let idx = self.arena.search(key);
        (idx != NIL).then(|| &self.arena.nodes[idx].value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.arena.search(key) != NIL
    }

    fn transplant(&mut self, u: usize, v: usize) {
        self.arena.transplant_parent_link(u, v);
    }

    pub fn remove(&mut self, key: &K) -> Result<V> {
        let z = self.arena.search(key);
        if z == NIL {
            return Err(Error::DomainError);
        }
        Ok(self.delete_node(z))
    }

    fn delete_node(&mut self, z: usize) -> V {
        let removed_value = std::mem::take(&mut self.arena.nodes[z].value);
        let mut y = z;
        let mut y_original_color = self.color(y);
        let x;
        let x_parent;
        if self.arena.nodes[z].left == NIL {
            x = self.arena.nodes[z].right;
            x_parent = self.arena.nodes[z].parent;
            self.transplant(z, x);
        } else if self.arena.nodes[z].right == NIL {
            x = self.arena.nodes[z].left;
            x_parent = self.arena.nodes[z].parent;
            self.transplant(z, x);
        } else {
            y = self.arena.minimum(self.arena.nodes[z].right);
            y_original_color = self.color(y);
            x = self.arena.nodes[y].right;
            if self.arena.nodes[y].parent == z {
                x_parent = y;
                self.arena.nodes[x].parent = y;
            } else {
                x_parent = self.arena.nodes[y].parent;
                self.transplant(y, self.arena.nodes[y].right);
                self.arena.nodes[y].right = self.arena.nodes[z].right;
                let yr = self.arena.nodes[y].right;
                self.arena.nodes[yr].parent = y;
            }
            self.transplant(z, y);
            self.arena.nodes[y].left = self.arena.nodes[z].left;
            let yl = self.arena.nodes[y].left;
            self.arena.nodes[yl].parent = y;
            self.set_color(y, self.color(z));
        }
        self.arena.deallocate(z);

        let mut p = x_parent;
        while p != NIL {
            self.arena.recompute_size(p);
            p = self.arena.nodes[p].parent;
        }

        if y_original_color == Color::Black {
            self.delete_fixup(x, x_parent);
        }
        removed_value
    }

    /// Double-black fixup. `x` may be `NIL`; `x_parent` carries where it
    /// logically hangs since the shared sentinel has no stable identity of
    /// its own parent across calls.
    fn delete_fixup(&mut self, mut x: usize, mut x_parent: usize) {
        while x != self.arena.root && !self.is_red(x) {
            if x == self.arena.nodes[x_parent].left {
                let mut sibling = self.arena.nodes[x_parent].right;
                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(x_parent, Color::Red);
                    self.rotate_left(x_parent);
                    sibling = self.arena.nodes[x_parent].right;
                }
                if !self.is_red(self.arena.nodes[sibling].left) && !self.is_red(self.arena.nodes[sibling].right) {
                    self.set_color(sibling, Color::Red);
                    x = x_parent;
                    x_parent = self.arena.nodes[x].parent;
                } else {
                    if !self.is_red(self.arena.nodes[sibling].right) {
                        self.set_color(self.arena.nodes[sibling].left, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.arena.nodes[x_parent].right;
                    }
                    self.set_color(sibling, self.color(x_parent));
                    self.set_color(x_parent, Color::Black);
                    self.set_color(self.arena.nodes[sibling].right, Color::Black);
                    self.rotate_left(x_parent);
                    x = self.arena.root;
                }
            } else {
                let mut sibling = self.arena.nodes[x_parent].left;
                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(x_parent, Color::Red);
                    self.rotate_right(x_parent);
                    sibling = self.arena.nodes[x_parent].left;
                }
                if !self.is_red(self.arena.nodes[sibling].right) && !self.is_red(self.arena.nodes[sibling].left) {
                    self.set_color(sibling, Color::Red);
                    x = x_parent;
                    x_parent = self.arena.nodes[x].parent;
                } else {
                    if !self.is_red(self.arena.nodes[sibling].left) {
                        self.set_color(self.arena.nodes[sibling].right, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.arena.nodes[x_parent].left;
                    }
                    self.set_color(sibling, self.color(x_parent));
                    self.set_color(x_parent, Color::Black);
                    self.set_color(self.arena.nodes[sibling].left, Color::Black);
                    self.rotate_right(x_parent);
                    x = self.arena.root;
                }
            }
        }
        if x != NIL {
            self.set_color(x, Color::Black);
        }
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

    /// root is black; no red node has a red child; every
    /// root-to-sentinel path has the same black count.
    #[cfg(test)]
    fn debug_check_red_black(&self) -> bool {
        if self.arena.root != NIL && self.color(self.arena.root) != Color::Black {
            return false;
        }
        fn walk<K, V>(tree: &RedBlack<K, V>, idx: usize) -> Option<usize>
        where
            K: Ord + Default,
            V: Default,
        {
            if idx == NIL {
                return Some(1);
            }
            if tree.is_red(idx) && (tree.is_red(tree.arena.nodes[idx].left) || tree.is_red(tree.arena.nodes[idx].right)) {
                return None;
            }
            let l = walk(tree, tree.arena.nodes[idx].left)?;
            let r = walk(tree, tree.arena.nodes[idx].right)?;
            if l != r {
                return None;
            }
            Some(l + usize::from(!tree.is_red(idx)))
        }
        walk(self, self.arena.root).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_sequence_stays_sorted_and_balanced() {
        // insert [41, 38, 31, 12, 19, 8]; verify sortedness and red-black
        // invariants after each
        // insertion; final in-order [8,12,19,31,38,41], size 6, height<=4.
        let mut tree: RedBlack<i32, ()> = RedBlack::new();
        for &k in &[41, 38, 31, 12, 19, 8] {
            tree.insert(k, ()).unwrap();
            assert!(tree.contains(&k));
            let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            assert_eq!(keys, sorted);
            assert!(tree.debug_check_red_black());
        }
        let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![8, 12, 19, 31, 38, 41]);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn duplicate_key_rejected_by_default() {
        let mut tree: RedBlack<i32, i32> = RedBlack::new();
        tree.insert(1, 1).unwrap();
        assert_eq!(tree.insert(1, 2), Err(Error::DuplicateKey));
    }

    #[test]
    fn insert_and_remove_large_sequence_preserves_invariants() {
        let mut tree: RedBlack<i32, i32> = RedBlack::new();
        for i in 0..300 {
            tree.insert(i, i).unwrap();
            assert!(tree.debug_check_red_black());
        }
        for i in (0..300).step_by(3) {
            assert_eq!(tree.remove(&i), Ok(i));
            assert!(tree.debug_check_red_black());
        }
        assert_eq!(tree.len(), 200);
        for i in 0..300 {
            assert_eq!(tree.contains(&i), i % 3 != 0);
        }
    }

    #[test]
    fn select_and_rank_agree_with_in_order_position() {
        let mut tree: RedBlack<i32, i32> = RedBlack::new();
        for i in 0..64 {
            tree.insert(i, i * i).unwrap();
        }
        for i in 0..64 {
            assert_eq!(tree.select(i as usize).unwrap().0, &i);
            assert_eq!(tree.rank(&i), i as usize);
        }
    }
}
