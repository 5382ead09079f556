//! Witness search (§4.6.2): a bidirectional, per-side hop-limited Dijkstra
//! used while contracting vertex `c` to test whether a `(u, v)` shortcut is
//! actually needed — if some other path already connects `u` to `v` more
//! cheaply than the shortcut would, the shortcut is skipped. Built on the
//! same two-frontier, meet-in-the-middle structure as the general
//! [`crate::search::bidir_dijkstra::BidirDijkstra`], with two differences:
//! each side's expansion is independently hop-capped rather than sharing
//! one termination test, and relaxation is filtered to admissible vertices
//! (not `avoid`, not already contracted) rather than open to the whole
//! graph.
use rustc_hash::FxHashMap;

use crate::constants::{Distance, Weight, INFINITE};
use crate::graph::{Graph, NodeIndex};
use crate::queue::{AddressableQueue, FastBinaryHeap};

const UNCONTRACTED: u32 = u32::MAX;

pub(crate) struct WitnessSearch<'a> {
    g: &'a Graph,
    order: &'a [u32],
    hop_limit: usize,
    queue_fwd: FastBinaryHeap,
    queue_bwd: FastBinaryHeap,
    dist_fwd: FxHashMap<NodeIndex, Distance>,
    dist_bwd: FxHashMap<NodeIndex, Distance>,
}

impl<'a> WitnessSearch<'a> {
    pub(crate) fn new(g: &'a Graph, order: &'a [u32], hop_limit: usize) -> Self {
        let n = g.num_nodes();
        Self {
            g,
            order,
            hop_limit,
            queue_fwd: FastBinaryHeap::new(n),
            queue_bwd: FastBinaryHeap::new(n),
            dist_fwd: FxHashMap::default(),
            dist_bwd: FxHashMap::default(),
        }
    }

    fn admissible(&self, avoid: NodeIndex, v: NodeIndex) -> bool {
        v != avoid && self.order[v.index()] == UNCONTRACTED
    }

    fn dist_fwd_of(&self, v: NodeIndex) -> Distance {
        self.dist_fwd.get(&v).copied().unwrap_or(INFINITE)
    }

    fn dist_bwd_of(&self, v: NodeIndex) -> Distance {
        self.dist_bwd.get(&v).copied().unwrap_or(INFINITE)
    }

    /// True iff some path from `u` to `v`, not passing through `avoid` or
    /// any already-contracted vertex, is strictly cheaper than
    /// `max_weight` — meaning the `(u, v, max_weight)` shortcut would be
    /// redundant. Expands forward from `u` over out-links and backward
    /// from `v` over in-links simultaneously, each side capped at
    /// `hop_limit` pop events independently of the other.
    pub(crate) fn witness_exists(&mut self, u: NodeIndex, v: NodeIndex, avoid: NodeIndex, max_weight: Weight) -> bool {
        self.queue_fwd.clear();
        self.queue_bwd.clear();
        self.dist_fwd.clear();
        self.dist_bwd.clear();

        let max_weight = max_weight as Distance;
        if u == v {
            return true;
        }

        self.dist_fwd.insert(u, 0);
        self.dist_bwd.insert(v, 0);
        self.queue_fwd.insert(0, u.index());
        self.queue_bwd.insert(0, v.index());

        let mut best = INFINITE;
        let mut hops_fwd = 0;
        let mut hops_bwd = 0;

        loop {
            let fwd_active = hops_fwd < self.hop_limit && !self.queue_fwd.is_empty();
            let bwd_active = hops_bwd < self.hop_limit && !self.queue_bwd.is_empty();
            if best < max_weight || (!fwd_active && !bwd_active) {
                break;
            }

            if fwd_active {
                let (d_a, a_idx) = self.queue_fwd.delete_min().unwrap();
                hops_fwd += 1;
                let a = NodeIndex::new(a_idx);
                for (_, edge) in self.g.out_links(a) {
                    let to = edge.target;
                    if !self.admissible(avoid, to) {
                        continue;
                    }
                    let new_dist = d_a + edge.weight as Distance;
                    if new_dist < self.dist_fwd_of(to) {
                        let first = self.dist_fwd.insert(to, new_dist).is_none();
                        if first {
                            self.queue_fwd.insert(new_dist, to.index());
                        } else {
                            self.queue_fwd.decrease_key(to.index(), new_dist);
                        }
                    }
                    best = best.min(new_dist + self.dist_bwd_of(to));
                }
            }

            if bwd_active {
                let (d_b, b_idx) = self.queue_bwd.delete_min().unwrap();
                hops_bwd += 1;
                let b = NodeIndex::new(b_idx);
                for (_, edge) in self.g.in_links(b) {
                    let to = edge.target;
                    if !self.admissible(avoid, to) {
                        continue;
                    }
                    let new_dist = d_b + edge.weight as Distance;
                    if new_dist < self.dist_bwd_of(to) {
                        let first = self.dist_bwd.insert(to, new_dist).is_none();
                        if first {
                            self.queue_bwd.insert(new_dist, to.index());
                        } else {
                            self.queue_bwd.decrease_key(to.index(), new_dist);
                        }
                    }
                    best = best.min(new_dist + self.dist_fwd_of(to));
                }
            }
        }

        best < max_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node_index;

    #[test]
    fn finds_cheaper_detour_as_witness() {
        // 0 -> 1 -> 2 direct costs 2+2=4 via the to-be-contracted vertex 1;
        // 0 -> 3 -> 2 is a witness at cost 1+1=2.
        let mut g = Graph::new();
        g.add_nodes(4);
        g.add_edge(node_index(0), node_index(1), 2);
        g.add_edge(node_index(1), node_index(2), 2);
        g.add_edge(node_index(0), node_index(3), 1);
        g.add_edge(node_index(3), node_index(2), 1);

        let order = vec![UNCONTRACTED; 4];
        let mut search = WitnessSearch::new(&g, &order, 50);
        assert!(search.witness_exists(node_index(0), node_index(2), node_index(1), 4));
    }

    #[test]
    fn no_witness_means_shortcut_is_needed() {
        let mut g = Graph::new();
        g.add_nodes(3);
        g.add_edge(node_index(0), node_index(1), 2);
        g.add_edge(node_index(1), node_index(2), 2);

        let order = vec![UNCONTRACTED; 3];
        let mut search = WitnessSearch::new(&g, &order, 50);
        assert!(!search.witness_exists(node_index(0), node_index(2), node_index(1), 4));
    }

    #[test]
    fn already_contracted_vertices_are_not_usable_as_witnesses() {
        // The only alternative path runs through vertex 3, already contracted.
        let mut g = Graph::new();
        g.add_nodes(4);
        g.add_edge(node_index(0), node_index(1), 2);
        g.add_edge(node_index(1), node_index(2), 2);
        g.add_edge(node_index(0), node_index(3), 1);
        g.add_edge(node_index(3), node_index(2), 1);

        let mut order = vec![UNCONTRACTED; 4];
        order[3] = 0;
        let mut search = WitnessSearch::new(&g, &order, 50);
        assert!(!search.witness_exists(node_index(0), node_index(2), node_index(1), 4));
    }

    #[test]
    fn witness_found_from_the_backward_side_still_counts() {
        // Only the backward frontier (expanding from v=2 over in-links)
        // ever reaches the cheap detour through vertex 3 within one hop;
        // make sure a witness found purely on that side is honored.
        let mut g = Graph::new();
        g.add_nodes(4);
        g.add_edge(node_index(0), node_index(1), 5);
        g.add_edge(node_index(1), node_index(2), 5);
        g.add_edge(node_index(0), node_index(3), 1);
        g.add_edge(node_index(3), node_index(2), 1);

        let order = vec![UNCONTRACTED; 4];
        let mut search = WitnessSearch::new(&g, &order, 50);
        assert!(search.witness_exists(node_index(0), node_index(2), node_index(1), 10));
    }

    #[test]
    fn hop_limit_per_side_is_independent() {
        // A long chain 0->4->5->6->7->2 is a witness, but only reachable
        // after more than one hop from either side; with hop_limit = 1 on
        // each side neither frontier reaches it, so no witness is found
        // and the shortcut is kept.
        let mut g = Graph::new();
        g.add_nodes(8);
        g.add_edge(node_index(0), node_index(1), 100);
        g.add_edge(node_index(1), node_index(2), 100);
        g.add_edge(node_index(0), node_index(4), 1);
        g.add_edge(node_index(4), node_index(5), 1);
        g.add_edge(node_index(5), node_index(6), 1);
        g.add_edge(node_index(6), node_index(7), 1);
        g.add_edge(node_index(7), node_index(2), 1);

        let order = vec![UNCONTRACTED; 8];
        let mut search = WitnessSearch::new(&g, &order, 1);
        assert!(!search.witness_exists(node_index(0), node_index(2), node_index(1), 200));

        let mut search = WitnessSearch::new(&g, &order, 50);
        assert!(search.witness_exists(node_index(0), node_index(2), node_index(1), 200));
    }
}
