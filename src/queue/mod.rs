//! Addressable min-heap priority queue family (§4.3, §2 "Priority queue
//! family"). All variants implement [`AddressableQueue`] so the Dijkstra
//! kernels (§4.4/§4.5) are generic over the queue implementation; the
//! kernels themselves are written against `FastBinaryHeap` by default
//! (the variant the reference implementation uses on its hot path), with
//! the others available for benchmarking and for the property tests in
//! §8 that check all six against the same reference model.
//!
//! `data_id` is always an index into a caller-owned array of size `N`
//! fixed at construction; re-inserting an already-enqueued `data_id`
//! without an intervening `delete_min`/`clear` is a contract violation
//! (`debug_assert`-checked, per §7's "invariant violation" taxonomy).

mod dary_heap;
mod fast_heap;
mod fibonacci_heap;
mod lazy_heap;
mod segment_tree_queue;
mod set_queue;

pub use dary_heap::DAryHeap;
pub use fast_heap::FastBinaryHeap;
pub use fibonacci_heap::FibonacciHeap;
pub use lazy_heap::LazyBinaryHeap;
pub use segment_tree_queue::SegmentTreeQueue;
pub use set_queue::SetQueue;

use crate::constants::Distance;

/// Shared contract for every addressable priority queue variant.
pub trait AddressableQueue {
    /// Enqueues `data_id` with the given `key`. `data_id` must not
    /// currently be enqueued.
    fn insert(&mut self, key: Distance, data_id: usize);

    /// Lowers the key of an already-enqueued `data_id`.
    fn decrease_key(&mut self, data_id: usize, new_key: Distance);

    /// The (key, data_id) pair with the smallest key, if any.
    fn peek_min(&self) -> Option<(Distance, usize)>;

    /// Removes and returns the minimum (key, data_id) pair.
    fn delete_min(&mut self) -> Option<(Distance, usize)>;

    fn is_empty(&self) -> bool;
}

#[cfg(test)]
pub(crate) mod law_tests {
    //! Shared property-test helper (§8 "Priority queue laws"): exercised
    //! against every variant's `new(n)` constructor with a reference
    //! `BTreeSet` model.
    use super::*;
    use std::collections::BTreeSet;

    #[derive(Debug, Clone, Copy)]
    pub enum Op {
        Insert(Distance, usize),
        DecreaseKey(usize, Distance),
        DeleteMin,
    }

    /// Runs `ops` against both `q` and a `BTreeSet<(Distance, usize)>`
    /// reference model, asserting `peek_min`/`delete_min` agree and that
    /// `delete_min` never regresses without an intervening insertion of a
    /// smaller key (monotonicity).
    pub fn check<Q: AddressableQueue>(mut q: Q, n: usize, ops: &[Op]) {
        let mut model: BTreeSet<(Distance, usize)> = BTreeSet::new();
        let mut enqueued = vec![false; n];
        let mut last_popped: Option<Distance> = None;

        for &op in ops {
            match op {
                Op::Insert(k, id) => {
                    if enqueued[id] {
                        continue;
                    }
                    q.insert(k, id);
                    model.insert((k, id));
                    enqueued[id] = true;
                }
                Op::DecreaseKey(id, new_k) => {
                    if !enqueued[id] {
                        continue;
                    }
                    let old = *model.iter().find(|(_, d)| *d == id).unwrap();
                    if new_k >= old.0 {
                        continue;
                    }
                    model.remove(&old);
                    model.insert((new_k, id));
                    q.decrease_key(id, new_k);
                }
                Op::DeleteMin => {
                    if model.is_empty() {
                        assert!(q.is_empty());
                        continue;
                    }
                    let expected = *model.iter().next().unwrap();
                    assert_eq!(q.peek_min(), Some(expected));
                    let got = q.delete_min().unwrap();
                    assert_eq!(got, expected);
                    if let Some(last) = last_popped {
                        assert!(got.0 >= last);
                    }
                    last_popped = Some(got.0);
                    model.remove(&expected);
                    enqueued[got.1] = false;
                }
            }
        }
    }

    use proptest::prelude::*;

    fn arb_op(n: usize) -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..10_000u64, 0..n).prop_map(|(k, id)| Op::Insert(k, id)),
            (0..n, 0..10_000u64).prop_map(|(id, k)| Op::DecreaseKey(id, k)),
            Just(Op::DeleteMin),
        ]
    }

    /// A bounded random sequence of queue operations over `n` distinct ids,
    /// for checking `check` against each variant with generated rather than
    /// hand-written op sequences.
    pub fn arb_ops(n: usize) -> impl Strategy<Value = Vec<Op>> {
        prop::collection::vec(arb_op(n), 0..64)
    }
}
