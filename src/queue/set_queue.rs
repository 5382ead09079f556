use std::collections::BTreeSet;

use super::AddressableQueue;
use crate::constants::Distance;

/// Set-based addressable queue: a `BTreeSet<(key, data_id)>` plus a
/// per-`data_id` key cache so `decrease_key` can find and remove the
/// stale entry before reinserting. Supports arbitrary removal at
/// `O(log n)`, with no tombstones or iteration counters; used as the
/// reference/test-oracle queue for the other variants.
pub struct SetQueue {
    entries: BTreeSet<(Distance, usize)>,
    keys: Vec<Option<Distance>>,
}

impl SetQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: BTreeSet::new(),
            keys: vec![None; capacity],
        }
    }
}

impl AddressableQueue for SetQueue {
    fn insert(&mut self, key: Distance, data_id: usize) {
        debug_assert!(self.keys[data_id].is_none(), "data_id already enqueued");
        self.keys[data_id] = Some(key);
        self.entries.insert((key, data_id));
    }

    fn decrease_key(&mut self, data_id: usize, new_key: Distance) {
        if let Some(old_key) = self.keys[data_id] {
            self.entries.remove(&(old_key, data_id));
        }
        self.keys[data_id] = Some(new_key);
        self.entries.insert((new_key, data_id));
    }

    fn peek_min(&self) -> Option<(Distance, usize)> {
        self.entries.iter().next().copied()
    }

    fn delete_min(&mut self) -> Option<(Distance, usize)> {
        let min = *self.entries.iter().next()?;
        self.entries.remove(&min);
        self.keys[min.1] = None;
        Some(min)
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
