//! Unordered `set`/`map` adapters, generic over which
//! [`dsa_hash`] backend stores their entries.

use std::hash::Hash;
use std::io::{self, Read, Write};
use std::marker::PhantomData;

use dsa_core::io::{expect_tag, read_blob, read_len, write_blob, write_len, write_tag};
use dsa_core::Result;
use dsa_hash::{LhashTable, LinearHashTable, OhashTable};

/// Type tag written by [`UnorderedMap::save`] and checked by
/// [`UnorderedMap::load`].
const IO_TAG: u32 = 0x554D_4150; // "UMAP"

/// The operations every `dsa-hash` backend provides, abstracted so
/// [`UnorderedMap`]/[`UnorderedSet`] can be generic over which one they use.
pub trait HashBackend<K, V> {
    fn new() -> Self;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn clear(&mut self);
    fn insert(&mut self, key: K, value: V) -> Result<()>;
    fn contains(&self, key: &K) -> bool;
    fn search(&self, key: &K) -> Option<&V>;
    fn remove(&mut self, key: &K) -> Result<V>;
    fn entries(&self) -> Vec<(&K, &V)>;
}

macro_rules! impl_hash_backend {
    ($ty:ident) => {
        impl<K: Hash + Eq, V> HashBackend<K, V> for $ty<K, V> {
            fn new() -> Self {
                $ty::new()
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
            fn contains(&self, key: &K) -> bool {
                $ty::contains(self, key)
            }
            fn search(&self, key: &K) -> Option<&V> {
                $ty::search(self, key)
            }
            fn remove(&mut self, key: &K) -> Result<V> {
                $ty::remove(self, key)
            }
            fn entries(&self) -> Vec<(&K, &V)> {
                $ty::iter(self).collect()
            }
        }
    };
}

impl_hash_backend!(LhashTable);
impl_hash_backend!(OhashTable);
impl_hash_backend!(LinearHashTable);

/// The default backend for [`UnorderedMap`]/[`UnorderedSet`] when none is
/// named explicitly.
pub type DefaultBackend<K, V> = OhashTable<K, V>;

/// An unordered key-value container, generic over the `dsa-hash` backend
/// that stores it.
pub struct UnorderedMap<K, V, B = DefaultBackend<K, V>>
where
    B: HashBackend<K, V>,
{
    backend: B,
    _marker: PhantomData<(K, V)>,
}

impl<K, V, B: HashBackend<K, V>> Default for UnorderedMap<K, V, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, B: HashBackend<K, V>> UnorderedMap<K, V, B> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: B::new(),
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

    pub fn contains(&self, key: &K) -> bool {
        self.backend.contains(key)
    }

    pub fn search(&self, key: &K) -> Option<&V> {
        self.backend.search(key)
    }

    pub fn erase(&mut self, key: &K) -> Result<V> {
        self.backend.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.backend.entries().into_iter()
    }

    /// See [`dsa_ordered::Map::save`] — same `(type-tag, count,
    /// [(key bytes, value bytes)]*)` framing, with per-element
    /// encoding supplied by the caller since this container has no
    /// serialization trait bound on `K`/`V`. Iteration order is the
    /// backend's bucket order, not any externally meaningful order.
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

    /// Inverse of [`UnorderedMap::save`].
    pub fn load<R: Read>(
        mut r: R,
        mut decode_key: impl FnMut(&[u8]) -> K,
        mut decode_value: impl FnMut(&[u8]) -> V,
    ) -> io::Result<Self> {
        expect_tag(&mut r, IO_TAG)?;
        let count = read_len(&mut r)?;
        let mut map = Self::new();
        for _ in 0..count {
            let key_bytes = read_blob(&mut r)?;
            let value_bytes = read_blob(&mut r)?;
            map.insert(decode_key(&key_bytes), decode_value(&value_bytes))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        }
        Ok(map)
    }
}

/// An unordered key-only container, built as an [`UnorderedMap`] with a
/// unit value.
pub struct UnorderedSet<K, B = DefaultBackend<K, ()>>
where
    B: HashBackend<K, ()>,
{
    map: UnorderedMap<K, (), B>,
}

impl<K, B: HashBackend<K, ()>> Default for UnorderedSet<K, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, B: HashBackend<K, ()>> UnorderedSet<K, B> {
    #[must_use]
    pub fn new() -> Self {
        Self { map: UnorderedMap::new() }
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

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains(key)
    }

    pub fn erase(&mut self, key: &K) -> Result<()> {
        self.map.erase(key).map(|_| ())
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.map.iter().map(|(k, _)| k)
    }

    /// See [`UnorderedMap::save`].
    pub fn save<W: Write>(&self, w: W, encode_key: impl FnMut(&K) -> Vec<u8>) -> io::Result<()> {
        self.map.save(w, encode_key, |()| Vec::new())
    }

    /// See [`UnorderedMap::load`].
    pub fn load<R: Read>(r: R, decode_key: impl FnMut(&[u8]) -> K) -> io::Result<Self> {
        Ok(Self {
            map: UnorderedMap::load(r, decode_key, |_| ())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_hash::LhashTable;

    #[test]
    fn map_insert_search_erase_default_backend() {
        let mut map: UnorderedMap<&str, i32> = UnorderedMap::new();
        map.insert("a", 1).unwrap();
        map.insert("b", 2).unwrap();
        assert_eq!(map.search(&"a"), Some(&1));
        assert_eq!(map.erase(&"a"), Ok(1));
        assert!(!map.contains(&"a"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn set_over_chaining_backend() {
        let mut set: UnorderedSet<i32, LhashTable<i32, ()>> = UnorderedSet::new();
        for i in 0..50 {
            set.insert(i).unwrap();
        }
        assert_eq!(set.len(), 50);
        for i in 0..50 {
            assert!(set.contains(&i));
        }
        set.erase(&10).unwrap();
        assert!(!set.contains(&10));
    }

    #[test]
    fn map_save_load_round_trip() {
        let mut map: UnorderedMap<i32, String> = UnorderedMap::new();
        for (k, v) in [(1, "one"), (2, "two"), (3, "three")] {
            map.insert(k, v.to_string()).unwrap();
        }
        let mut buf = Vec::new();
        map.save(
            &mut buf,
            |k| k.to_le_bytes().to_vec(),
            |v| v.as_bytes().to_vec(),
        )
        .unwrap();
        let loaded: UnorderedMap<i32, String> = UnorderedMap::load(
            &buf[..],
            |b| i32::from_le_bytes(b.try_into().unwrap()),
            |b| String::from_utf8(b.to_vec()).unwrap(),
        )
        .unwrap();
        assert_eq!(loaded.len(), 3);
        for (k, v) in [(1, "one"), (2, "two"), (3, "three")] {
            assert_eq!(loaded.search(&k), Some(&v.to_string()));
        }
    }
}
