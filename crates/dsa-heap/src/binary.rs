//! Binary heap backend: a complete tree stored array-style, with a
//! handle-to-index side table so `decrease_key` can locate and
//! sift up an entry without a linear scan.

use dsa_core::{Error, Result};

use crate::Handle;

struct Entry<P, V> {
    priority: P,
    value: V,
    handle: Handle,
}

/// A binary min-heap over `(priority, value)` pairs.
pub struct BinaryHeap<P, V> {
    heap: Vec<Entry<P, V>>,
    /// `position[handle.0]` is that handle's current index in `heap`, or
    /// `None` once popped.
    position: Vec<Option<usize>>,
}

impl<P: Ord, V> Default for BinaryHeap<P, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ord, V> BinaryHeap<P, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            position: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.position[self.heap[i].handle.0] = Some(i);
        self.position[self.heap[j].handle.0] = Some(j);
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[idx].priority < self.heap[parent].priority {
                self.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let (left, right) = (2 * idx + 1, 2 * idx + 2);
            let mut smallest = idx;
            if left < self.heap.len() && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < self.heap.len() && self.heap[right].priority < self.heap[smallest].priority {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.swap(idx, smallest);
            idx = smallest;
        }
    }

    pub fn push(&mut self, priority: P, value: V) -> Handle {
        let handle = Handle(self.position.len());
        self.position.push(Some(self.heap.len()));
        self.heap.push(Entry { priority, value, handle });
        let idx = self.heap.len() - 1;
        self.sift_up(idx);
        handle
    }

    pub fn peek(&self) -> Option<(&P, &V)> {
        self.heap.first().map(|e| (&e.priority, &e.value))
    }

    pub fn pop(&mut self) -> Option<(P, V)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let popped = self.heap.pop().expect("checked non-empty above");
        self.position[popped.handle.0] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((popped.priority, popped.value))
    }

    /// Lower `handle`'s priority and restore heap order. Errs if `priority`
    /// is not actually smaller, or the handle has already been popped.
    pub fn decrease_key(&mut self, handle: Handle, priority: P) -> Result<()> {
        let idx = self
            .position
            .get(handle.0)
            .copied()
            .flatten()
            .ok_or(Error::DomainError)?;
        if priority > self.heap[idx].priority {
            return Err(Error::InvalidInput);
        }
        self.heap[idx].priority = priority;
        self.sift_up(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_yields_ascending_priority_order() {
        let mut heap: BinaryHeap<i32, &str> = BinaryHeap::new();
        heap.push(5, "five");
        heap.push(1, "one");
        heap.push(3, "three");
        assert_eq!(heap.pop(), Some((1, "one")));
        assert_eq!(heap.pop(), Some((3, "three")));
        assert_eq!(heap.pop(), Some((5, "five")));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn decrease_key_moves_entry_ahead() {
        let mut heap: BinaryHeap<i32, &str> = BinaryHeap::new();
        heap.push(10, "a");
        let h = heap.push(20, "b");
        heap.push(15, "c");
        heap.decrease_key(h, 1).unwrap();
        assert_eq!(heap.pop(), Some((1, "b")));
    }

    #[test]
    fn decrease_key_rejects_increase() {
        let mut heap: BinaryHeap<i32, &str> = BinaryHeap::new();
        let h = heap.push(5, "a");
        assert_eq!(heap.decrease_key(h, 10), Err(Error::InvalidInput));
    }

    #[test]
    fn random_sequence_pops_in_sorted_order() {
        let mut heap: BinaryHeap<i32, i32> = BinaryHeap::new();
        let values = [5, 3, 8, 1, 9, 2, 7, 4, 6, 0];
        for &v in &values {
            heap.push(v, v);
        }
        let mut popped = Vec::new();
        while let Some((p, _)) = heap.pop() {
            popped.push(p);
        }
        let mut expected = values.to_vec();
        expected.sort_unstable();
        assert_eq!(popped, expected);
    }
}
