use super::AddressableQueue;
use crate::constants::Distance;

/// D-ary heap (§4.3): branching factor fixed at construction. Shallower
/// trees than a binary heap for `d > 2`, at the cost of wider `sift_down`
/// scans per level.
///
/// Unlike the reference implementation's linear scan inside
/// `DecreaseKey`, this port keeps a `data_id -> heap slot` position index
/// so `decrease_key` is `O(log_d n)` rather than `O(n)`.
pub struct DAryHeap {
    arity: usize,
    heap: Vec<(Distance, usize)>,
    position: Vec<Option<usize>>,
}

impl DAryHeap {
    pub fn new(capacity: usize, arity: usize) -> Self {
        assert!(arity >= 2, "arity must be at least 2");
        Self {
            arity,
            heap: Vec::with_capacity(capacity),
            position: vec![None; capacity],
        }
    }

    fn parent(&self, i: usize) -> Option<usize> {
        if i == 0 {
            None
        } else {
            Some((i - 1) / self.arity)
        }
    }

    fn first_child(&self, i: usize) -> usize {
        i * self.arity + 1
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a].1] = Some(a);
        self.position[self.heap[b].1] = Some(b);
    }

    fn sift_up(&mut self, mut i: usize) {
        while let Some(p) = self.parent(i) {
            if self.heap[p].0 <= self.heap[i].0 {
                break;
            }
            self.swap(p, i);
            i = p;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let first = self.first_child(i);
            if first >= self.heap.len() {
                break;
            }
            let last = (first + self.arity).min(self.heap.len());
            let smallest = (first..last).min_by_key(|&c| self.heap[c].0).unwrap();
            if self.heap[smallest].0 >= self.heap[i].0 {
                break;
            }
            self.swap(smallest, i);
            i = smallest;
        }
    }
}

impl AddressableQueue for DAryHeap {
    fn insert(&mut self, key: Distance, data_id: usize) {
        debug_assert!(self.position[data_id].is_none(), "data_id already enqueued");
        let idx = self.heap.len();
        self.heap.push((key, data_id));
        self.position[data_id] = Some(idx);
        self.sift_up(idx);
    }

    fn decrease_key(&mut self, data_id: usize, new_key: Distance) {
        let idx = self.position[data_id].expect("data_id not enqueued");
        debug_assert!(new_key <= self.heap[idx].0, "decrease_key must not increase the key");
        self.heap[idx].0 = new_key;
        self.sift_up(idx);
    }

    fn peek_min(&self) -> Option<(Distance, usize)> {
        self.heap.first().copied()
    }

    fn delete_min(&mut self) -> Option<(Distance, usize)> {
        if self.heap.is_empty() {
            return None;
        }
        let min = self.heap[0];
        self.position[min.1] = None;
        let last = self.heap.pop().unwrap();
        if !self.heap.is_empty() {
            self.heap[0] = last;
            self.position[last.1] = Some(0);
            self.sift_down(0);
        }
        Some(min)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::law_tests::{check, Op};

    #[test]
    fn obeys_queue_laws_binary() {
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
        check(DAryHeap::new(3, 2), 3, &ops);
    }

    #[test]
    fn obeys_queue_laws_quaternary() {
        let ops = [
            Op::Insert(7, 0),
            Op::Insert(1, 1),
            Op::Insert(4, 2),
            Op::Insert(2, 3),
            Op::DecreaseKey(0, 0),
            Op::DeleteMin,
            Op::DeleteMin,
            Op::DeleteMin,
            Op::DeleteMin,
        ];
        check(DAryHeap::new(4, 4), 4, &ops);
    }

    proptest::proptest! {
        #[test]
        fn obeys_queue_laws_random(ops in crate::queue::law_tests::arb_ops(16)) {
            check(DAryHeap::new(16, 4), 16, &ops);
        }
    }
}
