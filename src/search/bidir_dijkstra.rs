//! General bidirectional Dijkstra (§4.5): two plain searches, forward from
//! the source over out-links and backward from the target over in-links,
//! alternating one settle each, tracking the best path seen so far via
//! the standard meet-in-the-middle termination criterion. Used as a
//! reference implementation; Contraction Hierarchies' query (§4.6.5) is a
//! specialized variant restricted to upward edges, implemented separately
//! in [`crate::ch::ch_search`].
use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::constants::{Distance, INFINITE};
use crate::graph::{DefaultIdx, Graph, NodeIndex};
use crate::queue::{AddressableQueue, FastBinaryHeap};
use crate::search::shortest_path::ShortestPath;
use crate::statistics::SearchStats;

type NodeData = FxHashMap<NodeIndex, (Distance, Option<NodeIndex>)>;

pub struct BidirDijkstra<'a, Idx = DefaultIdx> {
    pub stats: SearchStats,
    pub data_fwd: NodeData,
    pub data_bwd: NodeData,
    pub best_distance: Distance,
    pub meeting_node: Option<NodeIndex<Idx>>,
    g: &'a Graph<Idx>,
    queue_fwd: FastBinaryHeap,
    queue_bwd: FastBinaryHeap,
}

impl<'a> BidirDijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        BidirDijkstra {
            g: graph,
            data_fwd: FxHashMap::default(),
            data_bwd: FxHashMap::default(),
            stats: SearchStats::default(),
            best_distance: INFINITE,
            meeting_node: None,
            queue_fwd: FastBinaryHeap::new(graph.num_nodes()),
            queue_bwd: FastBinaryHeap::new(graph.num_nodes()),
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

    fn reconstruct(&self, meeting: NodeIndex, source: NodeIndex) -> ShortestPath {
        let mut fwd_half = vec![];
        let mut cur = meeting;
        while let Some(prev) = self.data_fwd.get(&cur).and_then(|&(_, p)| p) {
            fwd_half.push(prev);
            cur = prev;
        }
        fwd_half.reverse();

        let mut bwd_half = vec![];
        let mut cur = meeting;
        while let Some(prev) = self.data_bwd.get(&cur).and_then(|&(_, p)| p) {
            bwd_half.push(prev);
            cur = prev;
        }

        debug_assert_eq!(fwd_half.first().copied().unwrap_or(meeting), source);
        let path = [fwd_half, vec![meeting], bwd_half].concat();
        ShortestPath::new(path, self.best_distance)
    }

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

        while !self.queue_fwd.is_empty() && !self.queue_bwd.is_empty() {
            if self.dist_fwd(NodeIndex::new(self.queue_fwd.peek_min().unwrap().1))
                + self.dist_bwd(NodeIndex::new(self.queue_bwd.peek_min().unwrap().1))
                >= self.best_distance
            {
                break;
            }

            let (d_u, u_idx) = self.queue_fwd.delete_min().unwrap();
            let u = NodeIndex::new(u_idx);
            self.stats.nodes_settled += 1;
            for (_, edge) in self.g.out_links(u) {
                let new_dist = d_u + edge.weight as Distance;
                if new_dist < self.dist_fwd(edge.target) {
                    let first = self.data_fwd.insert(edge.target, (new_dist, Some(u))).is_none();
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

            let (d_v, v_idx) = self.queue_bwd.delete_min().unwrap();
            let v = NodeIndex::new(v_idx);
            self.stats.nodes_settled += 1;
            for (_, edge) in self.g.in_links(v) {
                let new_dist = d_v + edge.weight as Distance;
                if new_dist < self.dist_bwd(edge.target) {
                    let first = self.data_bwd.insert(edge.target, (new_dist, Some(v))).is_none();
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
        }

        self.stats.finish();
        info!(
            "meeting node {:?}, distance {}, {} nodes settled",
            self.meeting_node, self.best_distance, self.stats.nodes_settled
        );

        self.meeting_node.map(|m| self.reconstruct(m, source))
    }
}
