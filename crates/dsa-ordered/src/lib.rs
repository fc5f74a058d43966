//! Ordered `set`/`multiset`/`map`/`multimap` adapters, generic over which
//! [`dsa_bst`] backend stores their entries.
//!
//! Rust's `Iterator` trait is this crate's `begin()`/`end()`: callers get a
//! forward iterator from [`Map::iter`] rather than a pair of sentinel
//! cursors, since the underlying arena has no stable pointer identity to
//! hand out anyway.

use std::io::{self, Read, Write};
use std::marker::PhantomData;

use dsa_bst::{Avl, RandomizedBst, RedBlack, RedBlackTopDown, Splay, Treap};
use dsa_core::io::{expect_tag, read_blob, read_len, write_blob, write_len, write_tag};
use dsa_core::{Error, Result};

mod sequence;
pub use sequence::Sequence;

/// Type tag written by [`Map::save`] and checked by [`Map::load`].
const IO_TAG: u32 = 0x4D41_5000; // "MAP\0"

/// The operations every `dsa-bst` backend provides, abstracted so
/// [`Map`]/[`Set`] can be generic over which one they use.
pub trait BstBackend<K, V> {
    fn new() -> Self;
    fn with_duplicates() -> Self;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn clear(&mut self);
    fn insert(&mut self, key: K, value: V) -> Result<()>;
    fn contains(&mut self, key: &K) -> bool;
    fn search(&mut self, key: &K) -> Option<&V>;
    fn remove(&mut self, key: &K) -> Result<V>;
    fn select(&self, pos: usize) -> Result<(&K, &V)>;
    fn rank(&self, key: &K) -> usize;
    fn entries(&self) -> Vec<(&K, &V)>;
}

macro_rules! impl_bst_backend {
    ($ty:ident) => {
        impl<K: Ord + Default, V: Default> BstBackend<K, V> for $ty<K, V> {
            fn new() -> Self {
                $ty::new()
            }
            fn with_duplicates() -> Self {
                $ty::with_duplicates()
            }
            fn len(&self) -> usize {
                $ty::len(self)
            }
            fn is_empty(&self) -> bool {
                $ty::is_empty(self)
            }
            fn clear(&mut self) {
                $ty::clear(self)
            }
            fn insert(&mut self, key: K, value: V) -> Result<()> {
                $ty::insert(self, key, value)
            }
            fn contains(&mut self, key: &K) -> bool {
                $ty::contains(self, key)
            }
            fn search(&mut self, key: &K) -> Option<&V> {
                $ty::search(self, key)
            }
            fn remove(&mut self, key: &K) -> Result<V> {
                $ty::remove(self, key)
            }
            fn select(&self, pos: usize) -> Result<(&K, &V)> {
                $ty::select(self, pos)
            }
            fn rank(&self, key: &K) -> usize {
                $ty::rank(self, key)
            }
            fn entries(&self) -> Vec<(&K, &V)> {
                $ty::iter(self).collect()
            }
        }
    };
}

impl_bst_backend!(Avl);
impl_bst_backend!(RedBlack);
impl_bst_backend!(RedBlackTopDown);
impl_bst_backend!(Treap);
impl_bst_backend!(RandomizedBst);

// Splay's `search`/`contains` mutate the tree (splay-to-root), so it cannot
// share the generic macro above, which assumes `&self` for those two calls
// on the underlying type while still requiring `&mut self` in the trait.
impl<K: Ord + Default, V: Default> BstBackend<K, V> for Splay<K, V> {
    fn new() -> Self {
        Splay::new()
    }
    fn with_duplicates() -> Self {
        Splay::with_duplicates()
    }
    fn len(&self) -> usize {
        Splay::len(self)
    }
    fn is_empty(&self) -> bool {
        Splay::is_empty(self)
    }
    fn clear(&mut self) {
        Splay::clear(self)
    }
    fn insert(&mut self, key: K, value: V) -> Result<()> {
        Splay::insert(self, key, value)
    }
    fn contains(&mut self, key: &K) -> bool {
        Splay::contains(self, key)
    }
    fn search(&mut self, key: &K) -> Option<&V> {
        Splay::search(self, key)
    }
    fn remove(&mut self, key: &K) -> Result<V> {
        Splay::remove(self, key)
    }
    fn select(&self, pos: usize) -> Result<(&K, &V)> {
        Splay::select(self, pos)
    }
    fn rank(&self, key: &K) -> usize {
        Splay::rank(self, key)
    }
    fn entries(&self) -> Vec<(&K, &V)> {
        Splay::iter(self).collect()
    }
}

/// The default backend for [`Map`]/[`Set`] when none is named explicitly:
/// bottom-up red-black, the backend with the tightest worst-case rebalance
/// cost among the six.
pub type DefaultBackend<K, V> = RedBlack<K, V>;

/// An ordered key-value container, supporting `map`/`multimap` semantics.
///
/// Construct with [`Map::new`] for unique keys, or [`Map::with_duplicates`]
/// for multimap semantics (insertion order among equal keys is preserved,
/// per the backend's duplicate-goes-right convention).
pub struct Map<K, V, B = DefaultBackend<K, V>>
where
    B: BstBackend<K, V>,
{
    backend: B,
    _marker: PhantomData<(K, V)>,
}

impl<K, V, B: BstBackend<K, V>> Default for Map<K, V, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, B: BstBackend<K, V>> Map<K, V, B> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: B::new(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn with_duplicates() -> Self {
        Self {
            backend: B::with_duplicates(),
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.backend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    pub fn clear(&mut self) {
        self.backend.clear();
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        self.backend.insert(key, value)
    }

    pub fn contains(&mut self, key: &K) -> bool {
        self.backend.contains(key)
    }

    pub fn search(&mut self, key: &K) -> Option<&V> {
        self.backend.search(key)
    }

    pub fn erase(&mut self, key: &K) -> Result<V> {
        self.backend.remove(key)
    }

    /// `at(pos)`: the `pos`-th entry in ascending key order.
    pub fn at(&self, pos: usize) -> Result<(&K, &V)> {
        self.backend.select(pos)
    }

    /// `position_of(key)`: the 0-indexed ascending position `key` occupies
    /// (its first occurrence, for a multimap).
    pub fn position_of(&self, key: &K) -> usize {
        self.backend.rank(key)
    }

    /// First position whose key is `>= key` (`lower_bound`).
    pub fn lower_bound(&self, key: &K) -> usize {
        self.backend.rank(key)
    }

    /// First position whose key is `> key` (`upper_bound`): the
    /// backend's rank already lands on the first occurrence, so walk past
    /// any further duplicates.
    pub fn upper_bound(&self, key: &K) -> usize
    where
        K: PartialEq,
    {
        let mut pos = self.backend.rank(key);
        while let Ok((k, _)) = self.backend.select(pos) {
            if k != key {
                break;
            }
            pos += 1;
        }
        pos
    }

    /// Entries with keys in `[lo, hi)` (`range`).
    pub fn range(&self, lo: &K, hi: &K) -> Vec<(&K, &V)>
    where
        K: PartialEq,
    {
        let start = self.lower_bound(lo);
        let end = self.lower_bound(hi);
        (start..end).filter_map(|pos| self.backend.select(pos).ok()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.backend.entries().into_iter()
    }

    /// Writes every entry, in ascending key order, as `(IO_TAG, entry
    /// count, [(key bytes, value bytes)]*)`. `encode_key` and
    /// `encode_value` are caller-supplied element codecs — this container
    /// does not know how to serialize `K` or `V` itself.
    pub fn save<W: Write>(
        &self,
        mut w: W,
        mut encode_key: impl FnMut(&K) -> Vec<u8>,
        mut encode_value: impl FnMut(&V) -> Vec<u8>,
    ) -> io::Result<()> {
        let entries = self.backend.entries();
        write_tag(&mut w, IO_TAG)?;
        write_len(&mut w, entries.len() as u64)?;
        for (k, v) in entries {
            write_blob(&mut w, &encode_key(k))?;
            write_blob(&mut w, &encode_value(v))?;
        }
        Ok(())
    }

    /// Inverse of [`Map::save`]. Entries are fed back through `insert` in
    /// the order they were written, so a multimap's per-key insertion order
    /// survives the round trip.
    pub fn load<R: Read>(
        mut r: R,
        mut decode_key: impl FnMut(&[u8]) -> K,
        mut decode_value: impl FnMut(&[u8]) -> V,
    ) -> io::Result<Self> {
        expect_tag(&mut r, IO_TAG)?;
        let count = read_len(&mut r)?;
        let mut map = Self::with_duplicates();
        for _ in 0..count {
            let key_bytes = read_blob(&mut r)?;
            let value_bytes = read_blob(&mut r)?;
            let key = decode_key(&key_bytes);
            let value = decode_value(&value_bytes);
            map.insert(key, value)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        }
        Ok(map)
    }
}

/// An ordered key-only container, supporting `set`/`multiset` semantics,
/// built as a [`Map`] with a unit value.
pub struct Set<K, B = DefaultBackend<K, ()>>
where
    B: BstBackend<K, ()>,
{
    map: Map<K, (), B>,
}

impl<K, B: BstBackend<K, ()>> Default for Set<K, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, B: BstBackend<K, ()>> Set<K, B> {
    #[must_use]
    pub fn new() -> Self {
        Self { map: Map::new() }
    }

    #[must_use]
    pub fn with_duplicates() -> Self {
        Self {
            map: Map::with_duplicates(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn insert(&mut self, key: K) -> Result<()> {
        self.map.insert(key, ())
    }

    pub fn contains(&mut self, key: &K) -> bool {
        self.map.contains(key)
    }

    pub fn erase(&mut self, key: &K) -> Result<()> {
        self.map.erase(key).map(|_| ())
    }

    pub fn at(&self, pos: usize) -> Result<&K> {
        self.map.at(pos).map(|(k, _)| k)
    }

    pub fn position_of(&self, key: &K) -> usize {
        self.map.position_of(key)
    }

    pub fn lower_bound(&self, key: &K) -> usize {
        self.map.lower_bound(key)
    }

    pub fn upper_bound(&self, key: &K) -> usize
    where
        K: PartialEq,
    {
        self.map.upper_bound(key)
    }

    pub fn range(&self, lo: &K, hi: &K) -> Vec<&K>
    where
        K: PartialEq,
    {
        self.map.range(lo, hi).into_iter().map(|(k, _)| k).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.map.iter().map(|(k, _)| k)
    }

    /// See [`Map::save`].
    pub fn save<W: Write>(&self, w: W, encode_key: impl FnMut(&K) -> Vec<u8>) -> io::Result<()> {
        self.map.save(w, encode_key, |()| Vec::new())
    }

    /// See [`Map::load`].
    pub fn load<R: Read>(r: R, decode_key: impl FnMut(&[u8]) -> K) -> io::Result<Self> {
        Ok(Self {
            map: Map::load(r, decode_key, |_| ())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_bst::Avl;

    #[test]
    fn map_insert_search_erase_default_backend() {
        let mut map: Map<i32, &str> = Map::new();
        map.insert(1, "one").unwrap();
        map.insert(2, "two").unwrap();
        assert_eq!(map.search(&1), Some(&"one"));
        assert_eq!(map.erase(&1), Ok("one"));
        assert!(!map.contains(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn map_duplicate_rejected_unless_multimap() {
        let mut map: Map<i32, i32> = Map::new();
        map.insert(5, 1).unwrap();
        assert_eq!(map.insert(5, 2), Err(Error::DuplicateKey));

        let mut multimap: Map<i32, i32> = Map::with_duplicates();
        multimap.insert(5, 1).unwrap();
        assert!(multimap.insert(5, 2).is_ok());
        assert_eq!(multimap.len(), 2);
    }

    #[test]
    fn set_over_avl_backend() {
        let mut set: Set<i32, Avl<i32, ()>> = Set::new();
        for i in [5, 3, 8, 1, 4] {
            set.insert(i).unwrap();
        }
        let items: Vec<i32> = set.iter().copied().collect();
        assert_eq!(items, vec![1, 3, 4, 5, 8]);
        assert_eq!(set.position_of(&4), 2);
        assert_eq!(set.at(2), Ok(&4));
    }

    #[test]
    fn lower_upper_bound_and_range() {
        let mut multiset: Set<i32> = Set::with_duplicates();
        for &k in &[1, 2, 2, 2, 3, 5] {
            multiset.insert(k).unwrap();
        }
        assert_eq!(multiset.lower_bound(&2), 1);
        assert_eq!(multiset.upper_bound(&2), 4);
        assert_eq!(multiset.range(&2, &5), vec![&2, &2, &2, &3]);
    }

    #[test]
    fn map_save_load_round_trip() {
        let mut map: Map<i32, String> = Map::new();
        map.insert(3, "three".to_string()).unwrap();
        map.insert(1, "one".to_string()).unwrap();
        map.insert(2, "two".to_string()).unwrap();

        let mut buf = Vec::new();
        map.save(
            &mut buf,
            |k| k.to_le_bytes().to_vec(),
            |v| v.as_bytes().to_vec(),
        )
        .unwrap();

        let loaded: Map<i32, String> = Map::load(
            &buf[..],
            |b| i32::from_le_bytes(b.try_into().unwrap()),
            |b| String::from_utf8(b.to_vec()).unwrap(),
        )
        .unwrap();

        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.search(&2), Some(&"two".to_string()));
        let items: Vec<_> = loaded.iter().map(|(k, v)| (*k, v.clone())).collect();
        assert_eq!(
            items,
            vec![
                (1, "one".to_string()),
                (2, "two".to_string()),
                (3, "three".to_string()),
            ]
        );
    }

    #[test]
    fn set_save_load_round_trip() {
        let mut set: Set<i32> = Set::new();
        for k in [5, 3, 8, 1] {
            set.insert(k).unwrap();
        }
        let mut buf = Vec::new();
        set.save(&mut buf, |k| k.to_le_bytes().to_vec()).unwrap();
        let loaded: Set<i32> =
            Set::load(&buf[..], |b| i32::from_le_bytes(b.try_into().unwrap())).unwrap();
        assert_eq!(loaded.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
    }
}
