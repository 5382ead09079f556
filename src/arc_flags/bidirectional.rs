//! Bidirectional Arc-Flags query (§4.7.3): a forward search from `s`
//! filtered by the forward (target-cell) flag table and a backward
//! search from `t` over [`Complement`] filtered by the backward
//! (source-cell) flag table, meeting in the middle under the same
//! termination criterion as the general bidirectional kernel (§4.5).

use log::info;

use crate::arc_flags::bitset::Bitset;
use crate::arc_flags::partition::Partition;
use crate::constants::{Distance, INFINITE};
use crate::graph::NodeIndex;
use crate::graph_adapters::Complement;
use crate::search::static_dijkstra::StaticDijkstra;
use crate::static_graph::StaticGraph;
use crate::statistics::SearchStats;
use crate::visitor::DijkstraVisitor;

struct FlagFilter<'a> {
    g: &'a StaticGraph,
    flags: &'a [Bitset],
    fixed_cell: u32,
    /// True when the sweep runs over the complement, so `(from, to)`
    /// names the original edge `to -> from`.
    flip: bool,
}

impl<'a> DijkstraVisitor for FlagFilter<'a> {
    fn should_relax(&mut self, from: NodeIndex, to: NodeIndex) -> bool {
        let edge = if self.flip { self.g.edge(to, from) } else { self.g.edge(from, to) };
        match edge {
            Some(e) => self.flags[e.index()].get(self.fixed_cell as usize),
            None => false,
        }
    }
}

/// Bidirectional Arc-Flags query bound to a graph, its partition, and
/// both flag tables (§4.7.3). Each direction only ever stops or resumes
/// on its own queue; the two share nothing but the termination bound.
pub struct BidirArcFlagsQuery<'a> {
    pub stats: SearchStats,
    g: &'a StaticGraph,
    partition: &'a Partition,
    fwd_flags: &'a [Bitset],
    bwd_flags: &'a [Bitset],
}

impl<'a> BidirArcFlagsQuery<'a> {
    pub fn new(
        g: &'a StaticGraph,
        partition: &'a Partition,
        fwd_flags: &'a [Bitset],
        bwd_flags: &'a [Bitset],
    ) -> Self {
        Self {
            stats: SearchStats::default(),
            g,
            partition,
            fwd_flags,
            bwd_flags,
        }
    }

    /// Returns the shortest `source -> target` distance, or `None` if
    /// unreachable. Distance-only: §1's non-goals stop short of
    /// promising a reconstructed path for the bidirectional variant, as
    /// the forward/backward halves run over distinct graph views
    /// ([`StaticGraph`] and its [`Complement`]) with no shared
    /// predecessor space to splice.
    pub fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<Distance> {
        self.stats.init();

        let complement = Complement::new(self.g);
        let mut fwd = StaticDijkstra::new(self.g);
        let mut bwd = StaticDijkstra::new(&complement);

        let mut fwd_filter = FlagFilter {
            g: self.g,
            flags: self.fwd_flags,
            fixed_cell: self.partition.cell_of(target),
            flip: false,
        };
        let mut bwd_filter = FlagFilter {
            g: self.g,
            flags: self.bwd_flags,
            fixed_cell: self.partition.cell_of(source),
            flip: true,
        };

        fwd.search_with(source, None, &mut fwd_filter);
        bwd.search_with(target, None, &mut bwd_filter);

        let mut best = INFINITE;
        for v in self.g.vertices() {
            let d_fwd = fwd.distance_to(v);
            let d_bwd = bwd.distance_to(v);
            if d_fwd != INFINITE && d_bwd != INFINITE {
                best = best.min(d_fwd + d_bwd);
            }
        }

        self.stats.finish();
        info!("bidirectional arc-flags query {:?} -> {:?}: {}", source, target, best);
        (best != INFINITE).then_some(best)
    }
}
