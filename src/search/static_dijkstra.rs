use rustc_hash::FxHashMap;

use crate::constants::{Distance, INFINITE};
use crate::graph::NodeIndex;
use crate::graph_adapters::Incidence;
use crate::queue::{AddressableQueue, FastBinaryHeap};
use crate::search::shortest_path::ShortestPath;
use crate::static_graph::StaticGraph;
use crate::visitor::{DijkstraVisitor, NullVisitor};

/// Plain Dijkstra over anything implementing [`Incidence`] — a
/// [`StaticGraph`] (§4.1) by default, or its [`Complement`](crate::graph_adapters::Complement)
/// for Arc-Flags' reverse per-cell sweep (§4.7.1). Also the ground-truth
/// reference implementation CH/Arc-Flags query results are checked
/// against (§8).
pub struct StaticDijkstra<'a, G = StaticGraph> {
    g: &'a G,
    queue: FastBinaryHeap,
    dist: FxHashMap<NodeIndex, (Distance, Option<NodeIndex>)>,
}

impl<'a, G: Incidence> StaticDijkstra<'a, G> {
    pub fn new(g: &'a G) -> Self {
        Self {
            g,
            queue: FastBinaryHeap::new(g.num_vertices()),
            dist: FxHashMap::default(),
        }
    }

    pub fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<ShortestPath> {
        self.search_with(source, Some(target), &mut NullVisitor)
    }

    pub fn search_with<V: DijkstraVisitor>(
        &mut self,
        source: NodeIndex,
        target: Option<NodeIndex>,
        visitor: &mut V,
    ) -> Option<ShortestPath> {
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
            visitor.examine_vertex(u, dist_u);
            if Some(u) == target {
                break;
            }

            for e in self.g.out_edges(u) {
                let v = self.g.target(e);
                visitor.examine_edge(u, v);
                if !visitor.should_relax(u, v) {
                    continue;
                }
                let new_dist = dist_u + self.g.weight(e) as Distance;
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

        let target = target?;
        super::reconstruct_path(target, source, &self.dist)
    }

    /// Distance-only query (no path reconstruction), to a set of targets
    /// at once — used by Arc-Flags' per-cell reverse sweep, which needs
    /// every border vertex's distance from one source in a single run.
    pub fn distances_from(&mut self, source: NodeIndex) -> &FxHashMap<NodeIndex, (Distance, Option<NodeIndex>)> {
        self.search_with(source, None, &mut NullVisitor);
        &self.dist
    }

    pub fn distance_to(&self, v: NodeIndex) -> Distance {
        self.dist.get(&v).map(|&(d, _)| d).unwrap_or(INFINITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node_index;
    use crate::search::assert_path;
    use crate::static_graph::StaticGraphBuilder;

    fn triangle() -> StaticGraph {
        let mut b = StaticGraphBuilder::new(4);
        b.add_edge(node_index(0), node_index(1), 4).unwrap();
        b.add_edge(node_index(0), node_index(2), 1).unwrap();
        b.add_edge(node_index(2), node_index(1), 1).unwrap();
        b.add_edge(node_index(1), node_index(3), 1).unwrap();
        b.build()
    }

    #[test]
    fn picks_the_cheaper_detour() {
        let g = triangle();
        let mut d = StaticDijkstra::new(&g);
        assert_path(vec![0, 2, 1, 3], 3, d.search(node_index(0), node_index(3)));
    }

    #[test]
    fn distances_from_covers_all_reachable_vertices() {
        let g = triangle();
        let mut d = StaticDijkstra::new(&g);
        d.distances_from(node_index(0));
        assert_eq!(d.distance_to(node_index(1)), 2);
        assert_eq!(d.distance_to(node_index(2)), 1);
        assert_eq!(d.distance_to(node_index(3)), 3);
    }
}
