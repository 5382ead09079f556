use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::constants::{Distance, INFINITE};
use crate::graph::{DefaultIdx, Graph, NodeIndex};
use crate::queue::{AddressableQueue, FastBinaryHeap};
use crate::search::shortest_path::ShortestPath;
use crate::statistics::SearchStats;
use crate::visitor::{DijkstraVisitor, NullVisitor};

/// Single-source Dijkstra over the dynamic [`Graph`] (§4.4), driven by a
/// [`DijkstraVisitor`]. CH's bounded witness search and plain
/// point-to-point queries both instantiate this with a different
/// visitor instead of a different kernel.
pub struct Dijkstra<'a, Idx = DefaultIdx> {
    pub stats: SearchStats,
    g: &'a Graph<Idx>,
    queue: FastBinaryHeap,
    dist: FxHashMap<NodeIndex<Idx>, (Distance, Option<NodeIndex<Idx>>)>,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Dijkstra {
            g: graph,
            stats: SearchStats::default(),
            queue: FastBinaryHeap::new(graph.num_nodes()),
            dist: FxHashMap::default(),
        }
    }

    /// Runs a plain point-to-point search, stopping as soon as `target`
    /// is settled.
    pub fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<ShortestPath> {
        self.search_with(source, Some(target), &mut NullVisitor)
    }

    /// Runs a search to exhaustion from `source`, visiting every vertex
    /// reachable via admissible out-edges. Used for witness searches and
    /// per-cell reverse sweeps, where the caller's visitor decides when
    /// to stop (via `should_continue`) and what to record.
    pub fn search_with<V: DijkstraVisitor<DefaultIdx>>(
        &mut self,
        source: NodeIndex,
        target: Option<NodeIndex>,
        visitor: &mut V,
    ) -> Option<ShortestPath> {
        self.stats.init();
        self.queue.clear();
        self.dist.clear();

        self.dist.insert(source, (0, None));
        self.queue.insert(0, source.index());
        visitor.discover_vertex(source, 0);

        while !self.queue.is_empty() {
            if !visitor.should_continue() {
                break;
            }
            let Some((dist_u, u_idx)) = self.queue.delete_min() else {
                break;
            };
            let u = NodeIndex::new(u_idx);
            self.stats.nodes_settled += 1;
            visitor.examine_vertex(u, dist_u);

            if Some(u) == target {
                break;
            }

            for (_, edge) in self.g.out_links(u) {
                let v = edge.target;
                visitor.examine_edge(u, v);
                if !visitor.should_relax(u, v) {
                    continue;
                }
                let new_dist = dist_u + edge.weight as Distance;
                let better = self.dist.get(&v).map(|&(d, _)| new_dist < d).unwrap_or(true);
                if better {
                    let first_time = self.dist.insert(v, (new_dist, Some(u))).is_none();
                    if first_time {
                        self.queue.insert(new_dist, v.index());
                        visitor.discover_vertex(v, new_dist);
                    } else {
                        self.queue.decrease_key(v.index(), new_dist);
                    }
                    visitor.edge_relaxed(u, v, new_dist);
                } else {
                    visitor.edge_not_relaxed(u, v);
                }
            }
            visitor.finish_vertex(u, dist_u);
        }
        self.stats.finish();

        let Some(target) = target else { return None };
        let sp = super::reconstruct_path(target, source, &self.dist);
        match &sp {
            Some(sp) => {
                debug!("path found: {:?}", sp.nodes);
                info!(
                    "path found: {:?}, {} nodes settled",
                    self.stats.duration, self.stats.nodes_settled
                );
            }
            None => info!(
                "no path found: {:?}, {} nodes settled",
                self.stats.duration, self.stats.nodes_settled
            ),
        }
        sp
    }

    /// The distance map from the most recent search, keyed by vertex.
    /// Used by callers (e.g. witness searches) that need more than the
    /// single target distance `search` returns.
    pub fn distances(&self) -> &FxHashMap<NodeIndex, (Distance, Option<NodeIndex>)> {
        &self.dist
    }

    pub fn distance_to(&self, v: NodeIndex) -> Distance {
        self.dist.get(&v).map(|&(d, _)| d).unwrap_or(INFINITE)
    }
}
