//! Separate-chaining hash table (`LhashTable`): each slot holds a
//! [`DynArray`] of entries that hashed there, so collisions never displace
//! another key and load factor can run past 1.0 without correctness issues
//! (only lookup cost grows).

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use dsa_core::{Error, Result};
use dsa_vector::DynArray;

use crate::primes::next_prime;

const DEFAULT_CAPACITY: usize = 11;
const MAX_LOAD_FACTOR: f64 = 1.0;

pub struct LhashTable<K, V> {
    buckets: Vec<DynArray<(K, V)>>,
    len: usize,
}

impl<K: Hash + Eq, V> Default for LhashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> LhashTable<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = next_prime(capacity.max(1));
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, DynArray::new);
        Self { buckets, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    fn hash(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if self.contains(&key) {
            return Err(Error::DuplicateKey);
        }
        if self.load_factor() >= MAX_LOAD_FACTOR {
            self.rehash(next_prime(self.buckets.len() * 2));
        }
        let idx = self.hash(&key);
        self.buckets[idx].push_back((key, value));
        self.len += 1;
        Ok(())
    }

    fn find_in_bucket(&self, idx: usize, key: &K) -> Option<usize> {
        (0..self.buckets[idx].len()).find(|&i| &self.buckets[idx][i].0 == key)
    }

    pub fn search(&self, key: &K) -> Option<&V> {
        let idx = self.hash(key);
        self.find_in_bucket(idx, key).map(|i| &self.buckets[idx][i].1)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    pub fn remove(&mut self, key: &K) -> Result<V> {
        let idx = self.hash(key);
        let pos = self.find_in_bucket(idx, key).ok_or(Error::DomainError)?;
        let (_, value) = self.buckets[idx].remove_at(pos).map_err(|_| Error::DomainError)?;
        self.len -= 1;
        if self.buckets.len() > DEFAULT_CAPACITY && self.load_factor() < 0.25 {
            self.rehash(next_prime((self.buckets.len() / 2).max(DEFAULT_CAPACITY)));
        }
        Ok(value)
    }

    fn rehash(&mut self, new_capacity: usize) {
        let mut new_buckets = Vec::with_capacity(new_capacity);
        new_buckets.resize_with(new_capacity, DynArray::new);
        let old = std::mem::replace(&mut self.buckets, new_buckets);
        for mut bucket in old {
            while let Some(entry) = bucket.pop_back() {
                let idx = self.hash(&entry.0);
                self.buckets[idx].push_back(entry);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_search_contains_remove() {
        let mut table: LhashTable<&str, i32> = LhashTable::new();
        table.insert("a", 1).unwrap();
        table.insert("b", 2).unwrap();
        assert_eq!(table.search(&"a"), Some(&1));
        assert!(table.contains(&"b"));
        assert_eq!(table.remove(&"a"), Ok(1));
        assert!(!table.contains(&"a"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut table: LhashTable<i32, i32> = LhashTable::new();
        table.insert(1, 1).unwrap();
        assert_eq!(table.insert(1, 2), Err(Error::DuplicateKey));
    }

    #[test]
    fn grows_and_keeps_all_entries_reachable() {
        let mut table: LhashTable<i32, i32> = LhashTable::new();
        for i in 0..500 {
            table.insert(i, i * 2).unwrap();
        }
        for i in 0..500 {
            assert_eq!(table.search(&i), Some(&(i * 2)));
        }
        assert_eq!(table.len(), 500);
    }

    #[test]
    fn remove_missing_key_errors() {
        let mut table: LhashTable<i32, i32> = LhashTable::new();
        assert_eq!(table.remove(&1), Err(Error::DomainError));
    }
}
