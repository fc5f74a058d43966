//! Priority queues and the ring cache interface, exercised through the
//! facade as a downstream crate would use them (no direct `dsa_heap`/
//! `dsa_ringcache` dependency of its own).

use dsa::heap::{BinaryHeap, FibonacciHeap, PairingHeap};
use dsa::ringcache::{MemoryRingCache, RingFileCache};

#[test]
fn every_heap_backend_pops_the_same_priority_order() {
    let items = [(5, "e"), (1, "a"), (4, "d"), (2, "b"), (3, "c")];

    let mut binary: BinaryHeap<i32, &str> = BinaryHeap::new();
    let mut fib: FibonacciHeap<i32, &str> = FibonacciHeap::new();
    let mut pairing: PairingHeap<i32, &str> = PairingHeap::new();
    for &(p, v) in &items {
        binary.push(p, v);
        fib.push(p, v);
        pairing.push(p, v);
    }

    let mut expected: Vec<_> = items.to_vec();
    expected.sort_by_key(|&(p, _)| p);

    for (p, v) in expected {
        assert_eq!(binary.pop(), Some((p, v)));
        assert_eq!(fib.pop(), Some((p, v)));
        assert_eq!(pairing.pop(), Some((p, v)));
    }
}

#[test]
fn decrease_key_on_a_fibonacci_heap_changes_pop_order() {
    let mut heap: FibonacciHeap<i32, &str> = FibonacciHeap::new();
    heap.push(10, "slow");
    let urgent = heap.push(20, "urgent");
    heap.push(15, "medium");
    heap.decrease_key(urgent, 1).unwrap();
    assert_eq!(heap.pop(), Some((1, "urgent")));
}

#[test]
fn ring_cache_wraps_and_resizes_while_staying_fifo() {
    let mut cache: MemoryRingCache<u32> = MemoryRingCache::create("params", "data", 3).unwrap();
    cache.put(1).unwrap();
    cache.put(2).unwrap();
    cache.put(3).unwrap();
    assert!(cache.is_full());

    let taken = cache.get(2).unwrap();
    assert_eq!(taken, vec![1, 2]);

    cache.put(4).unwrap();
    cache.put(5).unwrap();
    assert_eq!(cache.read(0, 3).unwrap(), vec![3, 4, 5]);

    cache.resize(5).unwrap();
    assert_eq!(cache.capacity(), 5);
    assert_eq!(cache.read(0, 3).unwrap(), vec![3, 4, 5]);
    assert_eq!(cache.resize(1), Err(dsa::Error::InvalidCapacity));
}
