//! Contraction Hierarchies query (§4.6.5): a bidirectional Dijkstra
//! restricted to the overlay's upward graph G↑ (forward) and downward
//! graph G↓ (backward), meeting at the vertex of highest contraction
//! order on the shortest path. Distinct from the general
//! [`BidirDijkstra`](crate::search::bidir_dijkstra::BidirDijkstra) kernel:
//! it walks the compiled [`OverlayGraph`] rather than a plain [`Graph`]
//! and unpacks shortcuts on reconstruction.
//!
//! Does not implement the reference implementation's "stall-on-demand"
//! pruning — every settled vertex is kept, only the standard
//! meet-in-the-middle termination bound is used.
use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::constants::{Distance, INFINITE};
use crate::ch::overlay_graph::OverlayGraph;
use crate::graph::{DefaultIdx, EdgeIndex, NodeIndex};
use crate::queue::{AddressableQueue, FastBinaryHeap};
use crate::search::shortest_path::ShortestPath;
use crate::statistics::SearchStats;

type NodeData = FxHashMap<NodeIndex, (Distance, Option<EdgeIndex>)>;

pub struct CHSearch<'a, Idx = DefaultIdx> {
    pub stats: SearchStats,
    g: &'a OverlayGraph<Idx>,
    data_fwd: NodeData,
    data_bwd: NodeData,
    best_distance: Distance,
    meeting_node: Option<NodeIndex<Idx>>,
    queue_fwd: FastBinaryHeap,
    queue_bwd: FastBinaryHeap,
}

impl<'a> CHSearch<'a> {
    pub fn new(graph: &'a OverlayGraph) -> Self {
        CHSearch {
            queue_fwd: FastBinaryHeap::new(graph.num_nodes()),
            queue_bwd: FastBinaryHeap::new(graph.num_nodes()),
            g: graph,
            stats: SearchStats::default(),
            data_fwd: FxHashMap::default(),
            data_bwd: FxHashMap::default(),
            best_distance: INFINITE,
            meeting_node: None,
        }
    }

    fn reset(&mut self) {
        self.data_fwd.clear();
        self.data_bwd.clear();
        self.best_distance = INFINITE;
        self.meeting_node = None;
        self.queue_fwd.clear();
        self.queue_bwd.clear();
        self.stats.init();
    }

    fn dist_fwd(&self, node: NodeIndex) -> Distance {
        self.data_fwd.get(&node).map(|&(d, _)| d).unwrap_or(INFINITE)
    }

    fn dist_bwd(&self, node: NodeIndex) -> Distance {
        self.data_bwd.get(&node).map(|&(d, _)| d).unwrap_or(INFINITE)
    }

    /// Finds the shortest path from `source` to `target`, unpacking every
    /// shortcut edge on the way into the sequence of original edges it
    /// represents.
    pub fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<ShortestPath> {
        self.reset();

        if source == target {
            self.stats.nodes_settled += 1;
            self.stats.finish();
            return Some(ShortestPath::new(vec![source], 0));
        }

        self.data_fwd.insert(source, (0, None));
        self.data_bwd.insert(target, (0, None));
        self.queue_fwd.insert(0, source.index());
        self.queue_bwd.insert(0, target.index());

        while !self.queue_fwd.is_empty() || !self.queue_bwd.is_empty() {
            let fwd_min = self.queue_fwd.peek_min().map(|(d, _)| d).unwrap_or(INFINITE);
            let bwd_min = self.queue_bwd.peek_min().map(|(d, _)| d).unwrap_or(INFINITE);
            if fwd_min.saturating_add(bwd_min) >= self.best_distance {
                break;
            }

            if let Some((d_u, u_idx)) = self.queue_fwd.delete_min() {
                let u = NodeIndex::new(u_idx);
                self.stats.nodes_settled += 1;
                for (edge_idx, edge) in self.g.edges_fwd(u) {
                    let new_dist = d_u + edge.weight as Distance;
                    if new_dist < self.dist_fwd(edge.target) {
                        let first = self.data_fwd.insert(edge.target, (new_dist, Some(edge_idx))).is_none();
                        if first {
                            self.queue_fwd.insert(new_dist, edge.target.index());
                        } else {
                            self.queue_fwd.decrease_key(edge.target.index(), new_dist);
                        }
                    }
                    let via = new_dist + self.dist_bwd(edge.target);
                    if via < self.best_distance {
                        debug!("fwd meet candidate at {:?}: {}", edge.target, via);
                        self.best_distance = via;
                        self.meeting_node = Some(edge.target);
                    }
                }
                let via = d_u + self.dist_bwd(u);
                if via < self.best_distance {
                    self.best_distance = via;
                    self.meeting_node = Some(u);
                }
            }

            if let Some((d_v, v_idx)) = self.queue_bwd.delete_min() {
                let v = NodeIndex::new(v_idx);
                self.stats.nodes_settled += 1;
                for (edge_idx, edge) in self.g.edges_bwd(v) {
                    let new_dist = d_v + edge.weight as Distance;
                    if new_dist < self.dist_bwd(edge.target) {
                        let first = self.data_bwd.insert(edge.target, (new_dist, Some(edge_idx))).is_none();
                        if first {
                            self.queue_bwd.insert(new_dist, edge.target.index());
                        } else {
                            self.queue_bwd.decrease_key(edge.target.index(), new_dist);
                        }
                    }
                    let via = new_dist + self.dist_fwd(edge.target);
                    if via < self.best_distance {
                        debug!("bwd meet candidate at {:?}: {}", edge.target, via);
                        self.best_distance = via;
                        self.meeting_node = Some(edge.target);
                    }
                }
                let via = d_v + self.dist_fwd(v);
                if via < self.best_distance {
                    self.best_distance = via;
                    self.meeting_node = Some(v);
                }
            }
        }

        self.stats.finish();
        info!(
            "meeting node {:?}, distance {}, {} nodes settled",
            self.meeting_node, self.best_distance, self.stats.nodes_settled
        );

        let meeting = self.meeting_node?;
        Some(self.reconstruct(meeting, source))
    }

    /// Walks both predecessor-edge chains back to `source`/the query's
    /// target, unpacking each (possibly shortcut) edge into its original
    /// edges on the way.
    ///
    /// Every link satisfies the owning-vertex invariant (§4.2: `e.source`
    /// is always the vertex whose adjacency the link lives in), so a
    /// forward predecessor edge found via `data_fwd` is owned by the
    /// node *closer to `source`*, and a backward predecessor edge found
    /// via `data_bwd` is owned by the node *closer to the query target*.
    fn reconstruct(&self, meeting: NodeIndex, source: NodeIndex) -> ShortestPath {
        let mut fwd_half = vec![];
        let mut cur = meeting;
        while let Some(edge_idx) = self.data_fwd.get(&cur).and_then(|&(_, e)| e) {
            // Unpacked sub-edges form a contiguous chain, so their
            // `source`s are exactly the waypoints strictly before `cur`;
            // walking the chain in reverse here lets a single final
            // `reverse()` put the whole half in source-to-meeting order.
            for unpacked in self.g.unpack_edge(edge_idx).into_iter().rev() {
                fwd_half.push(self.g.edge(unpacked).source);
            }
            cur = self.g.edge(edge_idx).source;
        }
        fwd_half.reverse();
        debug_assert_eq!(fwd_half.first().copied().unwrap_or(meeting), source);

        let mut bwd_half = vec![];
        let mut cur = meeting;
        while let Some(edge_idx) = self.data_bwd.get(&cur).and_then(|&(_, e)| e) {
            // `edge_idx` is the backward-admitting copy owned by the next
            // node towards the target; its mirror is the forward-facing
            // copy the shortcuts map is keyed on.
            let mirrored = edge_idx.mirror();
            for unpacked in self.g.unpack_edge(mirrored) {
                bwd_half.push(self.g.edge(unpacked).target);
            }
            cur = self.g.edge(edge_idx).source;
        }

        let path = [fwd_half, vec![meeting], bwd_half].concat();
        ShortestPath::new(path, self.best_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ch::node_contraction::{NodeContractor, OrderingStrategy};
    use crate::graph::node_index;
    use crate::search::{assert_no_path, assert_path};
    use crate::util::test_graphs::{generate_complex_graph, generate_simple_graph};

    #[test]
    fn search_on_simple_graph_matches_edges() {
        let mut g = generate_simple_graph();
        let contractor = NodeContractor::new(&mut g);
        let overlay = contractor.run(OrderingStrategy::Lazy, |_, _| {});

        let mut ch = CHSearch::new(&overlay);
        assert_path(vec![4, 0, 2], 2, ch.search(node_index(4), node_index(2)));
    }

    #[test]
    fn no_path_between_disconnected_vertices() {
        let mut g = generate_simple_graph();
        let contractor = NodeContractor::new(&mut g);
        let overlay = contractor.run(OrderingStrategy::Lazy, |_, _| {});

        let mut ch = CHSearch::new(&overlay);
        // vertex 1 (B) has no outgoing street in the one-way layout.
        assert_no_path(ch.search(node_index(1), node_index(4)));
    }

    #[test]
    fn query_distance_matches_plain_dijkstra_everywhere() {
        use crate::search::dijkstra::Dijkstra;

        let mut g = generate_complex_graph();
        let plain = g.clone();
        let contractor = NodeContractor::new(&mut g);
        let overlay = contractor.run(OrderingStrategy::Lazy, |_, _| {});

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
