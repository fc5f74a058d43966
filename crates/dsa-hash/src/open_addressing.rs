//! Open-addressing hash table with double hashing (`OhashTable`).
//!
//! Deleted slots become tombstones rather than being reclaimed immediately,
//! so a probe sequence that passed through a deleted slot on insert still
//! finds keys further along it on lookup. The table rehashes (which also
//! clears every tombstone) once tombstones reach a quarter of capacity,
//! independent of the live-entry load factor.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use dsa_core::{Error, Result};

use crate::primes::next_prime;

const DEFAULT_CAPACITY: usize = 11;
const MAX_LOAD_FACTOR: f64 = 0.7;
const TOMBSTONE_REHASH_FRACTION: f64 = 0.25;

#[derive(Clone)]
enum Slot<K, V> {
    Empty,
    Occupied(K, V),
    Tombstone,
}

pub struct OhashTable<K, V> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
}

impl<K: Hash + Eq, V> Default for OhashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> OhashTable<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = next_prime(capacity.max(1));
        Self {
            slots: (0..capacity).map(|_| Slot::Empty).collect(),
            len: 0,
            tombstones: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.len = 0;
        self.tombstones = 0;
    }

    fn hash1(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.slots.len() as u64) as usize
    }

    /// Second probe-sequence hash; always odd relative to capacity so every
    /// probe step is coprime with the (prime) table size and the sequence
    /// visits every slot before repeating.
    fn hash2(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.write_u8(0xA5);
        1 + (hasher.finish() % (self.slots.len() as u64 - 1)) as usize
    }

    fn probe(&self, key: &K) -> impl Iterator<Item = usize> + '_ {
        let h1 = self.hash1(key);
        let h2 = self.hash2(key);
        let cap = self.slots.len();
        (0..cap).map(move |i| (h1 + i * h2) % cap)
    }

    fn load_factor(&self) -> f64 {
        (self.len + self.tombstones) as f64 / self.slots.len() as f64
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if self.load_factor() >= MAX_LOAD_FACTOR {
            self.rehash(next_prime(self.slots.len() * 2));
        }
        let mut first_tombstone = None;
        for idx in self.probe(&key) {
            match &self.slots[idx] {
                Slot::Occupied(k, _) if k == &key => return Err(Error::DuplicateKey),
                Slot::Occupied(_, _) => continue,
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(idx);
                    }
                }
                Slot::Empty => {
                    let target = first_tombstone.unwrap_or(idx);
                    if matches!(self.slots[target], Slot::Tombstone) {
                        self.tombstones -= 1;
                    }
                    self.slots[target] = Slot::Occupied(key, value);
                    self.len += 1;
                    return Ok(());
                }
            }
        }
        // Table is saturated with occupied+tombstone slots; force growth
        // and retry once.
        self.rehash(next_prime(self.slots.len() * 2));
        self.insert(key, value)
    }

    fn find_slot(&self, key: &K) -> Option<usize> {
        for idx in self.probe(key) {
            match &self.slots[idx] {
                Slot::Occupied(k, _) if k == key => return Some(idx),
                Slot::Empty => return None,
                _ => continue,
            }
        }
        None
    }

    pub fn search(&self, key: &K) -> Option<&V> {
        self.find_slot(key).map(|idx| match &self.slots[idx] {
            Slot::Occupied(_, v) => v,
            _ => unreachable!("find_slot only returns occupied indices"),
        })
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find_slot(key).is_some()
    }

    pub fn remove(&mut self, key: &K) -> Result<V> {
        let idx = self.find_slot(key).ok_or(Error::DomainError)?;
        let removed = std::mem::replace(&mut self.slots[idx], Slot::Tombstone);
        self.len -= 1;
        self.tombstones += 1;
        if self.tombstones as f64 >= TOMBSTONE_REHASH_FRACTION * self.slots.len() as f64 {
            self.rehash(self.slots.len());
        }
        match removed {
            Slot::Occupied(_, v) => Ok(v),
            _ => unreachable!("find_slot only returns occupied indices"),
        }
    }

    fn rehash(&mut self, new_capacity: usize) {
        let old = std::mem::replace(&mut self.slots, (0..new_capacity).map(|_| Slot::Empty).collect());
        self.len = 0;
        self.tombstones = 0;
        for slot in old {
            if let Slot::Occupied(k, v) = slot {
                self.insert(k, v).expect("rehashing cannot introduce a duplicate key");
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_search_contains_remove() {
        let mut table: OhashTable<&str, i32> = OhashTable::new();
        table.insert("a", 1).unwrap();
        table.insert("b", 2).unwrap();
        assert_eq!(table.search(&"a"), Some(&1));
        assert_eq!(table.remove(&"a"), Ok(1));
        assert!(!table.contains(&"a"));
        assert!(table.contains(&"b"));
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut table: OhashTable<i32, i32> = OhashTable::new();
        table.insert(1, 1).unwrap();
        assert_eq!(table.insert(1, 2), Err(Error::DuplicateKey));
    }

    #[test]
    fn lookup_survives_tombstones_left_by_unrelated_removal() {
        let mut table: OhashTable<i32, i32> = OhashTable::with_capacity(16);
        for i in 0..8 {
            table.insert(i, i).unwrap();
        }
        for i in (0..8).step_by(2) {
            table.remove(&i).unwrap();
        }
        for i in (1..8).step_by(2) {
            assert_eq!(table.search(&i), Some(&i));
        }
    }

    #[test]
    fn grows_and_keeps_all_entries_reachable() {
        let mut table: OhashTable<i32, i32> = OhashTable::new();
        for i in 0..400 {
            table.insert(i, i * 3).unwrap();
        }
        for i in 0..400 {
            assert_eq!(table.search(&i), Some(&(i * 3)));
        }
        assert_eq!(table.len(), 400);
    }

    #[test]
    fn heavy_insert_remove_churn_keeps_table_consistent() {
        let mut table: OhashTable<i32, i32> = OhashTable::new();
        for round in 0..20 {
            for i in 0..50 {
                let key = round * 50 + i;
                table.insert(key, key).unwrap();
            }
            for i in 0..25 {
                let key = round * 50 + i;
                table.remove(&key).unwrap();
            }
        }
        assert_eq!(table.len(), 20 * 25);
    }
}
