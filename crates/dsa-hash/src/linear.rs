//! Dynamic linear hashing (`LinearHashTable`): grows one bucket at a time
//! instead of doubling the whole table, so a single insert never pays for
//! rehashing every entry — only the one bucket the split pointer currently
//! names moves.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use dsa_core::{Error, Result};

const INITIAL_BUCKETS: usize = 4;
const SPLIT_LOAD_FACTOR: f64 = 0.8;

pub struct LinearHashTable<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    level: u32,
    split: usize,
    len: usize,
}

impl<K: Hash + Eq, V> Default for LinearHashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> LinearHashTable<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: (0..INITIAL_BUCKETS).map(|_| Vec::new()).collect(),
            level: 0,
            split: 0,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn base_buckets(&self) -> usize {
        INITIAL_BUCKETS << self.level
    }

    fn hash_at_level(&self, key: &K, level: u32) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % (INITIAL_BUCKETS << level) as u64) as usize
    }

    /// The bucket `key` currently lives in: use next level's wider hash if
    /// the resulting index would fall at or past the current split point
    /// (those buckets have already been split this round), else this
    /// level's hash.
    fn bucket_for(&self, key: &K) -> usize {
        let idx = self.hash_at_level(key, self.level);
        if idx < self.split {
            self.hash_at_level(key, self.level + 1)
        } else {
            idx
        }
    }

    fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let idx = self.bucket_for(&key);
        if self.buckets[idx].iter().any(|(k, _)| k == &key) {
            return Err(Error::DuplicateKey);
        }
        self.buckets[idx].push((key, value));
        self.len += 1;
        if self.load_factor() > SPLIT_LOAD_FACTOR {
            self.split_one_bucket();
        }
        Ok(())
    }

    /// Split the bucket named by `self.split`, redistributing its entries
    /// between it and the freshly appended bucket at `self.buckets.len()`
    /// using the next level's wider hash. Once `split` reaches the current
    /// round's bucket count, every bucket has been split and the round
    /// advances (`level += 1`, `split` resets to 0).
    fn split_one_bucket(&mut self) {
        let old_idx = self.split;
        self.buckets.push(Vec::new());
        let new_idx = self.buckets.len() - 1;
        let entries = std::mem::take(&mut self.buckets[old_idx]);
        for (k, v) in entries {
            let target = self.hash_at_level(&k, self.level + 1);
            if target == new_idx {
                self.buckets[new_idx].push((k, v));
            } else {
                self.buckets[old_idx].push((k, v));
            }
        }
        self.split += 1;
        if self.split >= self.base_buckets() {
            self.split = 0;
            self.level += 1;
        }
    }

    pub fn search(&self, key: &K) -> Option<&V> {
        let idx = self.bucket_for(key);
        self.buckets[idx].iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    pub fn remove(&mut self, key: &K) -> Result<V> {
        let idx = self.bucket_for(key);
        let pos = self.buckets[idx]
            .iter()
            .position(|(k, _)| k == key)
            .ok_or(Error::DomainError)?;
        let (_, value) = self.buckets[idx].swap_remove(pos);
        self.len -= 1;
        Ok(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets.iter().flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }
}
