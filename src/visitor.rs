//! Dijkstra visitor extension points (§4.4, §9). A `DijkstraVisitor`
//! observes (and optionally steers) a single-source shortest-path search
//! without the kernel itself knowing anything about why it is being run —
//! contraction-order witness searches, arc-flags per-cell sources, and
//! plain point-to-point queries all drive the same kernel through a
//! different visitor. Every method has a no-op default so a caller only
//! overrides what it actually needs; implementations are monomorphized at
//! the call site, not boxed as trait objects, so the extra indirection
//! compiles away on the hot path.

use crate::constants::Distance;
use crate::graph::NodeIndex;

/// Observes and can steer a Dijkstra-family search as it runs.
///
/// `vertex` arguments are the graph's own node indices; `dist` is the
/// tentative (for `edge_relaxed`/`examine_edge`) or final (for
/// `finish_vertex`) distance from the search's source.
pub trait DijkstraVisitor<Idx = crate::graph::DefaultIdx> {
    /// Called once per vertex the instant it is first enqueued.
    fn discover_vertex(&mut self, _vertex: NodeIndex<Idx>, _dist: Distance) {}

    /// Called when a vertex is popped as the current minimum, before its
    /// out-edges are examined.
    fn examine_vertex(&mut self, _vertex: NodeIndex<Idx>, _dist: Distance) {}

    /// Called for every out-edge of the vertex under examination, whether
    /// or not it ends up relaxed.
    fn examine_edge(&mut self, _from: NodeIndex<Idx>, _to: NodeIndex<Idx>) {}

    /// Gate on whether an edge may be relaxed at all, independent of
    /// whether it would improve the tentative distance. Returning `false`
    /// prunes the edge from the search entirely — used by CH's "only
    /// upward edges" restriction and arc-flags' flag-bit filter.
    fn should_relax(&mut self, _from: NodeIndex<Idx>, _to: NodeIndex<Idx>) -> bool {
        true
    }

    /// Called after an edge successfully improves `to`'s tentative
    /// distance.
    fn edge_relaxed(&mut self, _from: NodeIndex<Idx>, _to: NodeIndex<Idx>, _new_dist: Distance) {}

    /// Called when an edge was examined but did not improve `to`'s
    /// tentative distance (it was already at least as good).
    fn edge_not_relaxed(&mut self, _from: NodeIndex<Idx>, _to: NodeIndex<Idx>) {}

    /// Called once a vertex is settled (popped and all out-edges
    /// examined), with its final distance.
    fn finish_vertex(&mut self, _vertex: NodeIndex<Idx>, _dist: Distance) {}

    /// Global early-termination check, consulted before each pop. The
    /// bounded witness search (§4.6.2's `dij_limit`) and the termination
    /// tracker (§4.5) are both expressed as overrides of this method.
    fn should_continue(&mut self) -> bool {
        true
    }
}

/// The default visitor: observes nothing, prunes nothing, never stops
/// early except when the queue itself empties. Used for plain
/// point-to-point queries that need no side channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullVisitor;

impl<Idx> DijkstraVisitor<Idx> for NullVisitor {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DefaultIdx;

    struct CountingVisitor {
        discovered: usize,
        finished: usize,
    }

    impl DijkstraVisitor<DefaultIdx> for CountingVisitor {
        fn discover_vertex(&mut self, _vertex: NodeIndex<DefaultIdx>, _dist: Distance) {
            self.discovered += 1;
        }
        fn finish_vertex(&mut self, _vertex: NodeIndex<DefaultIdx>, _dist: Distance) {
            self.finished += 1;
        }
    }

    #[test]
    fn default_methods_are_inert() {
        let mut v = NullVisitor;
        assert!(DijkstraVisitor::<DefaultIdx>::should_relax(
            &mut v,
            NodeIndex::new(0),
            NodeIndex::new(1)
        ));
        assert!(DijkstraVisitor::<DefaultIdx>::should_continue(&mut v));
    }

    #[test]
    fn overrides_are_observed() {
        let mut v = CountingVisitor {
            discovered: 0,
            finished: 0,
        };
        v.discover_vertex(NodeIndex::new(0), 0);
        v.finish_vertex(NodeIndex::new(0), 0);
        assert_eq!(v.discovered, 1);
        assert_eq!(v.finished, 1);
    }
}
