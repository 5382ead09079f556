use super::AddressableQueue;
use crate::constants::{Distance, INFINITE};

/// Segment-tree addressable queue (§4.3): a complete binary tree over the
/// `data_id` space, each internal node storing the minimum `(key, data_id)`
/// of its subtree. `insert`/`decrease_key` write a leaf and walk to the
/// root in `O(log n)`; `delete_min` re-inserts the current minimum's leaf
/// as `INFINITE` rather than physically removing it, so capacity is fixed
/// at construction and never shrinks.
pub struct SegmentTreeQueue {
    n: usize,
    tree: Vec<(Distance, usize)>,
}

impl SegmentTreeQueue {
    pub fn new(capacity: usize) -> Self {
        let n = capacity.max(1);
        Self {
            n,
            tree: vec![(INFINITE, usize::MAX); 2 * n],
        }
    }

    fn set_leaf(&mut self, data_id: usize, key: Distance) {
        let mut pos = self.n + data_id;
        self.tree[pos] = (key, data_id);
        while pos > 1 {
            pos /= 2;
            let left = self.tree[2 * pos];
            let right = self.tree[2 * pos + 1];
            self.tree[pos] = if left.0 <= right.0 { left } else { right };
        }
    }
}

impl AddressableQueue for SegmentTreeQueue {
    fn insert(&mut self, key: Distance, data_id: usize) {
        debug_assert!(
            self.tree[self.n + data_id].0 == INFINITE,
            "data_id already enqueued"
        );
        self.set_leaf(data_id, key);
    }

    fn decrease_key(&mut self, data_id: usize, new_key: Distance) {
        debug_assert!(
            new_key <= self.tree[self.n + data_id].0,
            "decrease_key must not increase the key"
        );
        self.set_leaf(data_id, new_key);
    }

    fn peek_min(&self) -> Option<(Distance, usize)> {
        let root = self.tree[1];
        if root.0 == INFINITE {
            None
        } else {
            Some(root)
        }
    }

    fn delete_min(&mut self) -> Option<(Distance, usize)> {
        let (key, data_id) = self.peek_min()?;
        self.set_leaf(data_id, INFINITE);
        Some((key, data_id))
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
        check(SegmentTreeQueue::new(3), 3, &ops);
    }

    #[test]
    fn handles_non_power_of_two_capacity() {
        let mut q = SegmentTreeQueue::new(5);
        for (key, id) in [(10, 0), (3, 1), (7, 2), (1, 3), (8, 4)] {
            q.insert(key, id);
        }
        let mut out = Vec::new();
        while let Some((k, _)) = q.delete_min() {
            out.push(k);
        }
        assert_eq!(out, vec![1, 3, 7, 8, 10]);
    }

    proptest::proptest! {
        #[test]
        fn obeys_queue_laws_random(ops in crate::queue::law_tests::arb_ops(16)) {
            check(SegmentTreeQueue::new(16), 16, &ops);
        }
    }
}
