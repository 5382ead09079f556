use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::AddressableQueue;
use crate::constants::Distance;

/// Lazy binary heap (§4.3): stores every `(key, data_id)` ever pushed.
/// `decrease_key` just pushes a new entry instead of touching the old
/// one; `delete_min`/`peek_min` skip entries whose stored key no longer
/// matches the current key for that `data_id` (a stale duplicate left
/// behind by an earlier `decrease_key`). Memory grows with
/// `insert + decrease_key` calls; appropriate when items are rarely
/// re-inserted.
pub struct LazyBinaryHeap {
    heap: BinaryHeap<Reverse<(Distance, usize)>>,
    current_key: Vec<Option<Distance>>,
}

impl LazyBinaryHeap {
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            current_key: vec![None; capacity],
        }
    }

    fn skip_stale(&mut self) {
        while let Some(&Reverse((key, id))) = self.heap.peek() {
            if self.current_key[id] == Some(key) {
                break;
            }
            self.heap.pop();
        }
    }
}

impl AddressableQueue for LazyBinaryHeap {
    fn insert(&mut self, key: Distance, data_id: usize) {
        debug_assert!(self.current_key[data_id].is_none(), "data_id already enqueued");
        self.current_key[data_id] = Some(key);
        self.heap.push(Reverse((key, data_id)));
    }

    fn decrease_key(&mut self, data_id: usize, new_key: Distance) {
        self.current_key[data_id] = Some(new_key);
        self.heap.push(Reverse((new_key, data_id)));
    }

    fn peek_min(&self) -> Option<(Distance, usize)> {
        // `peek_min` is taken without mutation in the trait; clone the
        // minimal prefix logic by scanning past stale heads would require
        // `&mut self`, so we tolerate returning a possibly-stale top here
        // being wrong is not an option: fall back to an internal clone-free
        // re-derivation via the stored current_key check.
        self.heap
            .peek()
            .map(|&Reverse((k, id))| (k, id))
            .filter(|&(k, id)| self.current_key[id] == Some(k))
            .or_else(|| {
                self.heap
                    .iter()
                    .map(|&Reverse(p)| p)
                    .filter(|&(k, id)| self.current_key[id] == Some(k))
                    .min()
            })
    }

    fn delete_min(&mut self) -> Option<(Distance, usize)> {
        self.skip_stale();
        let Reverse((key, id)) = self.heap.pop()?;
        self.current_key[id] = None;
        self.skip_stale();
        Some((key, id))
    }

    fn is_empty(&self) -> bool {
        self.peek_min().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::law_tests::{check, Op};

    #[test]
    fn obeys_queue_laws() {
        let ops = [
            Op::Insert(5, 0),
            Op::Insert(2, 1),
            Op::Insert(9, 2),
            Op::DecreaseKey(2, 1),
            Op::DeleteMin,
            Op::DeleteMin,
            Op::Insert(3, 0),
            Op::DeleteMin,
        ];
        check(LazyBinaryHeap::new(3), 3, &ops);
    }

    proptest::proptest! {
        #[test]
        fn obeys_queue_laws_random(ops in crate::queue::law_tests::arb_ops(16)) {
            check(LazyBinaryHeap::new(16), 16, &ops);
        }
    }
}
