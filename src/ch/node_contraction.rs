//! Node contraction (§4.6.1, §4.6.3, §4.6.4): orders the vertices of a
//! [`Graph`], inserting shortcuts as each is contracted, and hands back
//! the finished [`OverlayGraph`] plus the order used.
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::ch::overlay_graph::OverlayGraph;
use crate::ch::witness_search::WitnessSearch;
use crate::constants::Weight;
use crate::graph::{node_index, EdgeIndex, Graph, NodeIndex};
use crate::statistics::ConstructionStats;

/// Tuning knobs for the contraction loop.
#[derive(Debug, Clone, Copy)]
pub struct ContractionParams {
    /// Hop budget (pop-event count) for each witness search (§4.6.2).
    /// No principled default exists in the reference implementation;
    /// 50 is the value it ships with in practice.
    pub dij_limit: usize,
}

impl Default for ContractionParams {
    fn default() -> Self {
        Self { dij_limit: 50 }
    }
}

/// Which rule picks the vertex to contract next (§4.6.3).
#[derive(Debug, Clone)]
pub enum OrderingStrategy {
    /// Shuffled vertex list, deterministic seed.
    Random { seed: u64 },
    /// Ascending current degree, ties broken by a deterministic shuffle.
    Degree { seed: u64 },
    /// Lazy-updated priority combining level and edge-difference
    /// estimates ("HL").
    Lazy,
}

impl Default for OrderingStrategy {
    fn default() -> Self {
        OrderingStrategy::Lazy
    }
}

/// Per-vertex bookkeeping the "HL" priority needs across the whole run.
#[derive(Clone, Copy, Default)]
struct HlState {
    level: u32,
}

/// A single simulated-or-real contraction outcome for vertex `c`: the
/// shortcuts it would need (or now needs), used both to compute the HL
/// priority and to actually perform the contraction.
struct ContractionOutcome {
    // (u, v, weight, hop, edge u->c, edge c->v)
    shortcuts: Vec<(NodeIndex, NodeIndex, Weight, u32, EdgeIndex, EdgeIndex)>,
    edges_removed: usize,
}

/// Drives the contraction of a [`Graph`] into an [`OverlayGraph`].
pub struct NodeContractor<'a> {
    g: &'a mut Graph,
    params: ContractionParams,
    order: Vec<u32>,
    hop: Vec<u32>,
    hl: Vec<HlState>,
    shortcuts: FxHashMap<EdgeIndex, [EdgeIndex; 2]>,
    stats: ConstructionStats,
}

const UNCONTRACTED: u32 = u32::MAX;

impl<'a> NodeContractor<'a> {
    pub fn new(g: &'a mut Graph) -> Self {
        Self::with_params(g, ContractionParams::default())
    }

    pub fn with_params(g: &'a mut Graph, params: ContractionParams) -> Self {
        g.prune_dominated_parallels();
        let n = g.num_nodes();
        let hop = vec![1u32; g.edges.len()];
        Self {
            g,
            params,
            order: vec![UNCONTRACTED; n],
            hop,
            hl: vec![HlState::default(); n],
            shortcuts: FxHashMap::default(),
            stats: ConstructionStats::default(),
        }
    }

    pub fn stats(&self) -> ConstructionStats {
        self.stats
    }

    /// Runs contraction to completion using `strategy`, calling
    /// `progress(done, total)` once per contracted vertex (§4.6.4's
    /// progress-reporting note; the default no-op is `|_, _| {}`).
    /// Returns the finished overlay graph.
    pub fn run(mut self, strategy: OrderingStrategy, mut progress: impl FnMut(usize, usize)) -> OverlayGraph {
        self.stats.init();
        let n = self.g.num_nodes();

        let mut cur_order = 0u32;
        match strategy {
            OrderingStrategy::Random { seed } => {
                let mut remaining: Vec<NodeIndex> = (0..n).map(node_index).collect();
                let mut rng = StdRng::seed_from_u64(seed);
                remaining.shuffle(&mut rng);
                self.stats.stop_timer_node_ordering();
                for v in remaining {
                    self.contract(v, cur_order);
                    cur_order += 1;
                    progress(cur_order as usize, n);
                }
            }
            OrderingStrategy::Degree { seed } => {
                let mut remaining: Vec<NodeIndex> = (0..n).map(node_index).collect();
                let mut rng = StdRng::seed_from_u64(seed);
                remaining.shuffle(&mut rng);
                remaining.sort_by_key(|&v| self.degree(v));
                self.stats.stop_timer_node_ordering();
                for v in remaining {
                    self.contract(v, cur_order);
                    cur_order += 1;
                    progress(cur_order as usize, n);
                }
            }
            OrderingStrategy::Lazy => {
                self.stats.stop_timer_node_ordering();
                self.run_lazy(n, &mut cur_order, &mut progress);
            }
        }
        self.stats.stop_timer_construction();

        OverlayGraph::compile(self.g.clone(), self.order, self.shortcuts)
    }

    fn degree(&self, v: NodeIndex) -> usize {
        self.g.links(v).count()
    }

    fn run_lazy(&mut self, n: usize, cur_order: &mut u32, progress: &mut impl FnMut(usize, usize)) {
        use std::cmp::Ordering;

        #[derive(Clone, Copy)]
        struct Entry {
            priority: f64,
            node: NodeIndex,
        }
        impl PartialEq for Entry {
            fn eq(&self, other: &Self) -> bool {
                self.priority == other.priority
            }
        }
        impl Eq for Entry {}
        impl PartialOrd for Entry {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for Entry {
            fn cmp(&self, other: &Self) -> Ordering {
                // Reversed so `BinaryHeap` (a max-heap) pops the smallest priority first.
                other.priority.partial_cmp(&self.priority).unwrap_or(Ordering::Equal)
            }
        }

        let mut heap: std::collections::BinaryHeap<Entry> = (0..n)
            .map(node_index)
            .map(|v| Entry {
                priority: self.priority_of(v),
                node: v,
            })
            .collect();

        while let Some(Entry { priority, node: v }) = heap.pop() {
            if self.order[v.index()] != UNCONTRACTED {
                continue;
            }
            let fresh = self.priority_of(v);
            if fresh > priority + f64::EPSILON {
                heap.push(Entry { priority: fresh, node: v });
                continue;
            }
            self.contract(v, *cur_order);
            *cur_order += 1;
            progress(*cur_order as usize, n);
        }
    }

    /// HL priority (§4.6.3): `L(v) + ordA/ordD + sumhA/sumhD`, with the
    /// reference implementation's unconditional `(x+1)/(y+1)`-shaped
    /// smoothing so division by zero never arises and isolated vertices
    /// (ordA=ordD=sumhA=sumhD=0) reduce to plain `L(v)`.
    fn priority_of(&self, v: NodeIndex) -> f64 {
        if self.order[v.index()] != UNCONTRACTED {
            return f64::INFINITY;
        }
        let outcome = self.simulate(v);
        let edges_removed = outcome.edges_removed as f64;
        let shortcuts_added = outcome.shortcuts.len() as f64;
        let sum_h_removed: f64 = self
            .g
            .links(v)
            .map(|(idx, _)| self.hop[idx.index()] as f64)
            .sum();
        let sum_h_added: f64 = outcome.shortcuts.iter().map(|&(_, _, _, h, _, _)| h as f64).sum();

        let level = self.hl[v.index()].level as f64;
        let ord_ratio = (shortcuts_added + 1.0) / (edges_removed + 1.0);
        let hop_ratio = (sum_h_added + 1.0) / (sum_h_removed + 1.0);
        level + ord_ratio + hop_ratio
    }

    /// Computes what contracting `c` right now would require, without
    /// mutating the graph: every admissible (u, v) pair that needs a
    /// shortcut, found via the bounded witness search (§4.6.2).
    fn simulate(&self, c: NodeIndex) -> ContractionOutcome {
        debug_assert_eq!(self.order[c.index()], UNCONTRACTED);

        // `idx` is c's in-admitting half-edge (owned by c); its mirror,
        // always the adjacent slot in `g.edges` (see `add_link`), is the
        // u-owned forward half-edge u -> c we want for unpacking.
        let in_neighbors: Vec<(NodeIndex, Weight, u32, EdgeIndex)> = self
            .g
            .in_links(c)
            .filter(|(_, e)| self.order[e.target.index()] == UNCONTRACTED)
            .map(|(idx, e)| (e.target, e.weight, self.hop[idx.index()], idx.mirror()))
            .collect();
        let out_neighbors: Vec<(NodeIndex, Weight, u32, EdgeIndex)> = self
            .g
            .out_links(c)
            .filter(|(_, e)| self.order[e.target.index()] == UNCONTRACTED)
            .map(|(idx, e)| (e.target, e.weight, self.hop[idx.index()], idx))
            .collect();

        let mut best: FxHashMap<(NodeIndex, NodeIndex), (Weight, u32, EdgeIndex, EdgeIndex)> = FxHashMap::default();
        let mut search = WitnessSearch::new(self.g, &self.order, self.params.dij_limit);

        for &(u, w_uc, h_uc, edge_uc) in &in_neighbors {
            for &(v, w_cv, h_cv, edge_cv) in &out_neighbors {
                if u == v {
                    continue;
                }
                let shortcut_weight = w_uc + w_cv;
                if search.witness_exists(u, v, c, shortcut_weight) {
                    continue;
                }
                best.entry((u, v))
                    .and_modify(|(w, h, uc, cv)| {
                        if shortcut_weight < *w {
                            *w = shortcut_weight;
                            *h = h_uc + h_cv;
                            *uc = edge_uc;
                            *cv = edge_cv;
                        }
                    })
                    .or_insert((shortcut_weight, h_uc + h_cv, edge_uc, edge_cv));
            }
        }

        let shortcuts = best
            .into_iter()
            .map(|((u, v), (w, h, uc, cv))| (u, v, w, h, uc, cv))
            .collect();

        ContractionOutcome {
            shortcuts,
            edges_removed: in_neighbors.len() + out_neighbors.len(),
        }
    }

    /// Actually contracts `c`: assigns its order, inserts the shortcuts
    /// `simulate` found, removes its now-downward links, and propagates
    /// the level estimate to its neighbors.
    fn contract(&mut self, c: NodeIndex, cur_order: u32) {
        self.order[c.index()] = cur_order;
        let outcome = self.simulate(c);

        for &(u, v, w, h, edge_uc, edge_cv) in &outcome.shortcuts {
            let fwd = self.g.add_shortcut(u, v, w, c);
            // `add_shortcut` always pushes the mirrored backward
            // half-edge right after the forward one; `hop` tracks both.
            debug_assert_eq!(fwd.index(), self.hop.len());
            self.hop.push(h);
            self.hop.push(h);
            self.shortcuts.insert(fwd, [edge_uc, edge_cv]);
            self.stats.shortcuts_added += 1;
        }

        let neighbors: Vec<NodeIndex> = self.g.links(c).map(|(_, e)| e.target).collect();
        self.g.remove_out_edge_if(c, |e| self.order[e.target.index()] <= cur_order);

        let new_level = self.hl[c.index()].level + 1;
        for n in neighbors {
            let entry = &mut self.hl[n.index()];
            entry.level = entry.level.max(new_level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ch::ch_search::CHSearch;
    use crate::search::dijkstra::Dijkstra;
    use crate::util::test_graphs::generate_complex_graph;

    #[test]
    fn contracts_every_vertex_exactly_once() {
        let mut g = generate_complex_graph();
        let n = g.num_nodes();
        let contractor = NodeContractor::new(&mut g);
        let overlay = contractor.run(OrderingStrategy::Lazy, |_, _| {});
        let mut orders: Vec<usize> = (0..n).map(|v| overlay.order_of(node_index(v))).collect();
        orders.sort_unstable();
        assert_eq!(orders, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn ch_query_matches_plain_dijkstra_on_complex_graph() {
        let mut g = generate_complex_graph();
        let plain = g.clone();
        let contractor = NodeContractor::new(&mut g);
        let overlay = contractor.run(OrderingStrategy::Random { seed: 7 }, |_, _| {});

        let mut ch = CHSearch::new(&overlay);
        let mut reference = Dijkstra::new(&plain);
        for s in 0..plain.num_nodes() {
            for t in 0..plain.num_nodes() {
                let (s, t) = (node_index(s), node_index(t));
                let expected = reference.search(s, t).map(|sp| sp.distance);
                let got = ch.search(s, t).map(|sp| sp.distance);
                assert_eq!(got, expected, "mismatch for {:?} -> {:?}", s, t);
            }
        }
    }
}
