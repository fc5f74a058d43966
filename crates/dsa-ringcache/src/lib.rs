//! Ring file cache: a bounded FIFO of fixed-size records backed by two
//! files (parameters and data). This crate specifies the operations and
//! failure modes as a trait — out-of-range read, double-init, capacity
//! overflow — and ships one in-memory implementation for exercising that
//! contract in tests. A real on-disk engine with its own parameters/data
//! file layout is out of scope here; any caller wiring this to actual
//! files implements [`RingFileCache`] themselves.

use dsa_core::{Error, Result};

/// The operations a ring file cache exposes, generic over the fixed-size
/// record type `T`.
///
/// `create`/`open` model the two ways a concrete, file-backed implementation
/// would come into existence (fresh on-disk layout vs. re-attaching to an
/// existing one); an in-memory implementation can treat both as plain
/// construction, as [`MemoryRingCache`] does below.
pub trait RingFileCache<T>: Sized {
    /// Initializes a fresh cache of the given `capacity`. `Error::DomainError`
    /// if the location already holds an initialized cache ("double-init").
    fn create(params_path: &str, data_path: &str, capacity: usize) -> Result<Self>;

    /// Attaches to a cache a prior `create` call initialized.
    fn open(params_path: &str) -> Result<Self>;

    #[must_use]
    fn capacity(&self) -> usize;

    #[must_use]
    fn size(&self) -> usize;

    #[must_use]
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[must_use]
    fn is_full(&self) -> bool {
        self.size() == self.capacity()
    }

    /// Appends a record at the tail. `Error::Overflow` if the cache is full.
    fn put(&mut self, record: T) -> Result<()>;

    /// Pops `n` records from the head, returning them oldest-first.
    /// `Error::Underflow` if fewer than `n` records are present.
    fn get(&mut self, n: usize) -> Result<Vec<T>>;

    /// Reads `n` records starting at logical position `pos` (0 = head)
    /// without removing them. `Error::OutOfRange` if `pos + n` exceeds
    /// [`Self::size`].
    fn read(&self, pos: usize, n: usize) -> Result<Vec<T>>;

    /// The `i`th-oldest record still present (0 = the current head).
    fn oldest(&self, i: usize) -> Result<&T>;

    fn read_first(&self) -> Result<&T>;

    fn read_last(&self) -> Result<&T>;

    /// Changes capacity, preserving every currently-stored record even if
    /// the ring is in a wrapped state. `Error::InvalidCapacity` if
    /// `new_capacity` is smaller than [`Self::size`].
    fn resize(&mut self, new_capacity: usize) -> Result<()>;

    /// Forces any buffered state to durable storage. A no-op for an
    /// in-memory implementation.
    fn flush(&mut self) -> Result<()>;
}

/// A `Vec`-backed ring buffer implementing [`RingFileCache`], for exercising
/// the trait's contract without any actual file I/O.
pub struct MemoryRingCache<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T: Clone> MemoryRingCache<T> {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            head: 0,
            len: 0,
        }
    }

    fn slot_of(&self, logical_pos: usize) -> usize {
        (self.head + logical_pos) % self.slots.len().max(1)
    }

    /// In insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).map(move |i| self.slots[self.slot_of(i)].as_ref().expect("live slot"))
    }
}

impl<T: Clone> RingFileCache<T> for MemoryRingCache<T> {
    fn create(_params_path: &str, _data_path: &str, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        Ok(Self::with_capacity(capacity))
    }

    fn open(_params_path: &str) -> Result<Self> {
        // an in-memory cache has no durable backing to re-attach to
        Err(Error::DomainError)
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn size(&self) -> usize {
        self.len
    }

    fn put(&mut self, record: T) -> Result<()> {
        if self.is_full() {
            return Err(Error::Overflow);
        }
        let slot = self.slot_of(self.len);
        self.slots[slot] = Some(record);
        self.len += 1;
        Ok(())
    }

    fn get(&mut self, n: usize) -> Result<Vec<T>> {
        if n > self.len {
            return Err(Error::Underflow);
        }
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let slot = self.head;
            out.push(self.slots[slot].take().expect("live slot"));
            self.head = (self.head + 1) % self.slots.len();
            self.len -= 1;
        }
        Ok(out)
    }

    fn read(&self, pos: usize, n: usize) -> Result<Vec<T>> {
        if pos + n > self.len {
            return Err(Error::OutOfRange);
        }
        Ok((pos..pos + n)
            .map(|i| self.slots[self.slot_of(i)].clone().expect("live slot"))
            .collect())
    }

    fn oldest(&self, i: usize) -> Result<&T> {
        if i >= self.len {
            return Err(Error::OutOfRange);
        }
        Ok(self.slots[self.slot_of(i)].as_ref().expect("live slot"))
    }

    fn read_first(&self) -> Result<&T> {
        self.oldest(0)
    }

    fn read_last(&self) -> Result<&T> {
        if self.len == 0 {
            return Err(Error::Underflow);
        }
        self.oldest(self.len - 1)
    }

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity < self.len {
            return Err(Error::InvalidCapacity);
        }
        let contents: Vec<T> = self.iter().cloned().collect();
        self.slots = vec![None; new_capacity.max(1)];
        self.head = 0;
        self.len = 0;
        for item in contents {
            self.slots[self.len] = Some(item);
            self.len += 1;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_and_overflow_mirror_the_capacity() {
        let mut cache: MemoryRingCache<i32> = MemoryRingCache::create("", "", 4).unwrap();
        for v in [1, 2, 3, 4] {
            cache.put(v).unwrap();
        }
        assert_eq!(cache.put(5), Err(Error::Overflow));
        assert_eq!(*cache.read_first().unwrap(), 1);
        assert_eq!(*cache.read_last().unwrap(), 4);
        assert_eq!(*cache.oldest(2).unwrap(), 3);

        assert_eq!(cache.get(2).unwrap(), vec![1, 2]);
        assert_eq!(cache.size(), 2);
        assert_eq!(*cache.read_first().unwrap(), 3);
    }

    #[test]
    fn wrap_around_is_transparent_to_read() {
        let mut cache: MemoryRingCache<i32> = MemoryRingCache::create("", "", 3).unwrap();
        cache.put(1).unwrap();
        cache.put(2).unwrap();
        cache.put(3).unwrap();
        cache.get(2).unwrap(); // head now at slot 2, one live record (3)
        cache.put(4).unwrap(); // wraps into slots 0 and 1
        cache.put(5).unwrap();
        assert_eq!(cache.read(0, 3).unwrap(), vec![3, 4, 5]);
    }

    #[test]
    fn resize_preserves_contents_while_wrapped() {
        let mut cache: MemoryRingCache<i32> = MemoryRingCache::create("", "", 3).unwrap();
        cache.put(1).unwrap();
        cache.put(2).unwrap();
        cache.put(3).unwrap();
        cache.get(1).unwrap();
        cache.put(4).unwrap(); // wraps

        cache.resize(5).unwrap();
        assert_eq!(cache.capacity(), 5);
        assert_eq!(cache.read(0, 3).unwrap(), vec![2, 3, 4]);
        assert_eq!(cache.resize(1), Err(Error::InvalidCapacity));
    }

    #[test]
    fn out_of_range_and_underflow_are_reported() {
        let cache: MemoryRingCache<i32> = MemoryRingCache::create("", "", 2).unwrap();
        assert_eq!(cache.read(0, 1), Err(Error::OutOfRange));
        assert_eq!(cache.read_first(), Err(Error::OutOfRange));
    }
}
