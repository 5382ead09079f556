//! Graph adapters (§2 "Graph adapters", §4.7.1): small views that let the
//! shared Dijkstra kernels run over something other than a [`StaticGraph`]
//! directly, plus a property-map abstraction over vertex/edge attributes.
//!
//! [`Complement`] is the one Arc-Flags preprocessing actually needs: its
//! per-cell sweep runs "a Dijkstra from v in the reverse of G" (§4.7.1)
//! without ever building a second, physically reversed graph — it just
//! swaps which adjacency slice counts as "out".

use crate::constants::Weight;
use crate::graph::NodeIndex;
use crate::static_graph::{EdgeRef, StaticGraph};

/// The subset of graph operations a Dijkstra-family kernel needs from
/// whatever it's searching over. [`StaticGraph`] and [`Complement`] both
/// implement it, so [`StaticDijkstra`](crate::search::static_dijkstra::StaticDijkstra)
/// is generic over this rather than hard-wired to one direction.
pub trait Incidence {
    fn num_vertices(&self) -> usize;
    fn out_edges(&self, v: NodeIndex) -> Box<dyn Iterator<Item = EdgeRef> + '_>;
    fn target(&self, e: EdgeRef) -> NodeIndex;
    fn weight(&self, e: EdgeRef) -> Weight;
}

impl Incidence for StaticGraph {
    fn num_vertices(&self) -> usize {
        StaticGraph::num_vertices(self)
    }

    fn out_edges(&self, v: NodeIndex) -> Box<dyn Iterator<Item = EdgeRef> + '_> {
        Box::new(StaticGraph::out_edges(self, v))
    }

    fn target(&self, e: EdgeRef) -> NodeIndex {
        StaticGraph::target(self, e)
    }

    fn weight(&self, e: EdgeRef) -> Weight {
        StaticGraph::weight(self, e)
    }
}

/// Swaps in- and out-adjacency of a [`StaticGraph`] without copying it:
/// `out_edges` walks the underlying in-slice and `target` resolves to the
/// underlying edge's source. Every [`EdgeRef`] it yields is the same index
/// the original graph uses, so flags/properties keyed by edge id need no
/// translation between the two views.
pub struct Complement<'a> {
    inner: &'a StaticGraph,
}

impl<'a> Complement<'a> {
    pub fn new(inner: &'a StaticGraph) -> Self {
        Self { inner }
    }

    /// The original (non-complemented) edge an edge yielded by this view
    /// corresponds to — identity, since `Complement` reuses edge ids, but
    /// named for call sites that want to be explicit about which
    /// direction they mean.
    pub fn underlying(&self, e: EdgeRef) -> EdgeRef {
        e
    }

    pub fn source(&self, e: EdgeRef) -> NodeIndex {
        self.inner.target(e)
    }
}

impl<'a> Incidence for Complement<'a> {
    fn num_vertices(&self) -> usize {
        self.inner.num_vertices()
    }

    fn out_edges(&self, v: NodeIndex) -> Box<dyn Iterator<Item = EdgeRef> + '_> {
        Box::new(self.inner.in_edges(v))
    }

    fn target(&self, e: EdgeRef) -> NodeIndex {
        self.inner.source(e)
    }

    fn weight(&self, e: EdgeRef) -> Weight {
        self.inner.weight(e)
    }
}

/// A key→value view over vertex or edge attributes (§3 "property map"),
/// narrowed from the source's templated property-map concept (§9) to a
/// plain `get`/`put` pair over a dense backing store.
pub trait PropertyMap<K, V> {
    fn get(&self, key: K) -> &V;
    fn put(&mut self, key: K, value: V);
}

impl<V> PropertyMap<NodeIndex, V> for Vec<V> {
    fn get(&self, key: NodeIndex) -> &V {
        &self[key.index()]
    }

    fn put(&mut self, key: NodeIndex, value: V) {
        self[key.index()] = value;
    }
}

impl<V> PropertyMap<EdgeRef, V> for Vec<V> {
    fn get(&self, key: EdgeRef) -> &V {
        &self[key.index()]
    }

    fn put(&mut self, key: EdgeRef, value: V) {
        self[key.index()] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node_index;
    use crate::static_graph::StaticGraphBuilder;

    fn triangle() -> StaticGraph {
        let mut b = StaticGraphBuilder::new(3);
        b.add_edge(node_index(0), node_index(1), 1).unwrap();
        b.add_edge(node_index(1), node_index(2), 1).unwrap();
        b.add_edge(node_index(2), node_index(0), 1).unwrap();
        b.build()
    }

    #[test]
    fn complement_swaps_direction() {
        let g = triangle();
        let c = Complement::new(&g);
        let out: Vec<_> = c.out_edges(node_index(1)).map(|e| c.target(e)).collect();
        assert_eq!(out, vec![node_index(0)]);
        assert_eq!(g.out_edges(node_index(0)).map(|e| g.target(e)).next(), Some(node_index(1)));
    }

    #[test]
    fn property_map_over_vec() {
        let mut dist: Vec<u32> = vec![0; 3];
        PropertyMap::<NodeIndex, u32>::put(&mut dist, node_index(1), 42);
        assert_eq!(*PropertyMap::<NodeIndex, u32>::get(&dist, node_index(1)), 42);
    }
}
