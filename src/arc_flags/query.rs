//! Arc-Flags query (§4.7.2): forward Dijkstra pruned by a single
//! visitor gate — relax `e` only if its target-cell flag bit for the
//! query's target is set. Distances are exactly those of the pruned
//! search; nothing downstream needs unpacking, since Arc-Flags never
//! inserts edges the way Contraction Hierarchies does.

use log::info;

use crate::arc_flags::bitset::Bitset;
use crate::arc_flags::partition::Partition;
use crate::graph::NodeIndex;
use crate::search::shortest_path::ShortestPath;
use crate::search::static_dijkstra::StaticDijkstra;
use crate::static_graph::StaticGraph;
use crate::statistics::SearchStats;
use crate::visitor::DijkstraVisitor;

/// Gates `should_relax` on the flag table's bit for the query's fixed
/// target cell. Everything else is left to the default no-op behavior.
struct FlagFilter<'a> {
    g: &'a StaticGraph,
    flags: &'a [Bitset],
    target_cell: u32,
}

impl<'a> DijkstraVisitor for FlagFilter<'a> {
    fn should_relax(&mut self, from: NodeIndex, to: NodeIndex) -> bool {
        match self.g.edge(from, to) {
            Some(e) => self.flags[e.index()].get(self.target_cell as usize),
            None => false,
        }
    }
}

/// A one-directional Arc-Flags query engine bound to a graph, its
/// partition, and the forward flag table built by
/// [`build_forward_flags`](crate::arc_flags::preprocess::build_forward_flags).
pub struct ArcFlagsQuery<'a> {
    pub stats: SearchStats,
    g: &'a StaticGraph,
    partition: &'a Partition,
    flags: &'a [Bitset],
    dijkstra: StaticDijkstra<'a, StaticGraph>,
}

impl<'a> ArcFlagsQuery<'a> {
    pub fn new(g: &'a StaticGraph, partition: &'a Partition, flags: &'a [Bitset]) -> Self {
        Self {
            stats: SearchStats::default(),
            g,
            partition,
            flags,
            dijkstra: StaticDijkstra::new(g),
        }
    }

    pub fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<ShortestPath> {
        self.stats.init();
        let mut filter = FlagFilter {
            g: self.g,
            flags: self.flags,
            target_cell: self.partition.cell_of(target),
        };
        let result = self.dijkstra.search_with(source, Some(target), &mut filter);
        self.stats.finish();
        info!("arc-flags query {:?} -> {:?}: {:?}", source, target, result.as_ref().map(|r| r.distance));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc_flags::preprocess::build_forward_flags;
    use crate::graph::node_index;
    use crate::search::{assert_no_path, assert_path};
    use crate::static_graph::StaticGraphBuilder;

    fn grid() -> (StaticGraph, Partition) {
        // 0 -> 1 -> 3
        //  \-> 2 ->/
        // cell(0)=cell(1)=0, cell(2)=cell(3)=1. Cheapest 0->3 is via 2.
        let mut b = StaticGraphBuilder::new(4);
        b.add_edge(node_index(0), node_index(1), 5).unwrap();
        b.add_edge(node_index(1), node_index(3), 5).unwrap();
        b.add_edge(node_index(0), node_index(2), 1).unwrap();
        b.add_edge(node_index(2), node_index(3), 1).unwrap();
        let g = b.build();
        let p = Partition::new(vec![0, 0, 1, 1], 2).unwrap();
        (g, p)
    }

    #[test]
    fn query_matches_plain_dijkstra() {
        let (g, p) = grid();
        let flags = build_forward_flags(&g, &p);
        let mut q = ArcFlagsQuery::new(&g, &p, &flags);
        assert_path(vec![0, 2, 3], 2, q.search(node_index(0), node_index(3)));
    }

    #[test]
    fn unreachable_target_still_reports_no_path() {
        let mut b = StaticGraphBuilder::new(2);
        b.add_edge(node_index(0), node_index(0), 1).unwrap();
        let g = b.build();
        let p = Partition::new(vec![0, 1], 2).unwrap();
        let flags = build_forward_flags(&g, &p);
        let mut q = ArcFlagsQuery::new(&g, &p, &flags);
        assert_no_path(q.search(node_index(0), node_index(1)));
    }
}
