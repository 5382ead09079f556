//! Static CSR graph (§3, §4.1): an immutable forward-star directed graph
//! built once from an edge stream, read many times. Backs Arc-Flags
//! preprocessing/queries and the plain-Dijkstra reference implementation
//! used to check CH/AF correctness.
//!
//! Grounded in the offset-array ("first edge id per rank") layout common
//! to CH/CSR route-planning codebases: one flat adjacency arena holding
//! `2*|E|` entries, sliced per vertex into an in-range (sorted by source)
//! followed by an out-range (sorted by target), mirroring §3's
//! "edgesSeparators" description.

use crate::collections::SortedRange;
use crate::constants::Weight;
use crate::graph::{node_index, NodeIndex};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("edge endpoint {0} is out of range for a graph with {1} vertices")]
    VertexOutOfRange(usize, usize),
}

/// One property record per original edge, shared by its two adjacency
/// entries (in-slice of target, out-slice of source). Equality of edge
/// descriptors reduces to comparing this index (§9's "indices, not
/// pointers" design note).
#[derive(Debug, Clone, Copy)]
struct EdgeRecord {
    source: NodeIndex,
    target: NodeIndex,
    weight: Weight,
}

/// An adjacency-arena entry: the neighboring vertex plus the index of the
/// shared edge record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AdjEntry {
    neighbor: usize,
    edge: u32,
}

/// A descriptor for an edge reachable through the static graph's API.
/// Carries enough to look up source/target/weight without re-indexing
/// through the owning graph's internals from outside the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef(u32);

impl EdgeRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub struct StaticGraph {
    offsets: Vec<u32>,
    separators: Vec<u32>,
    entries: Vec<AdjEntry>,
    edges: Vec<EdgeRecord>,
}

impl StaticGraph {
    pub fn num_vertices(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.num_vertices()).map(node_index)
    }

    pub fn source(&self, e: EdgeRef) -> NodeIndex {
        self.edges[e.index()].source
    }

    pub fn target(&self, e: EdgeRef) -> NodeIndex {
        self.edges[e.index()].target
    }

    pub fn weight(&self, e: EdgeRef) -> Weight {
        self.edges[e.index()].weight
    }

    fn in_slice(&self, v: NodeIndex) -> &[AdjEntry] {
        let start = self.offsets[v.index()] as usize;
        let sep = self.separators[v.index()] as usize;
        &self.entries[start..start + sep]
    }

    fn out_slice(&self, v: NodeIndex) -> &[AdjEntry] {
        let start = self.offsets[v.index()] as usize;
        let sep = self.separators[v.index()] as usize;
        let end = self.offsets[v.index() + 1] as usize;
        &self.entries[start + sep..end]
    }

    pub fn out_degree(&self, v: NodeIndex) -> usize {
        self.out_slice(v).len()
    }

    pub fn in_degree(&self, v: NodeIndex) -> usize {
        self.in_slice(v).len()
    }

    pub fn degree(&self, v: NodeIndex) -> usize {
        self.out_degree(v) + self.in_degree(v)
    }

    /// Out-edges of `v`, sorted by target.
    pub fn out_edges(&self, v: NodeIndex) -> impl Iterator<Item = EdgeRef> + '_ {
        self.out_slice(v).iter().map(|e| EdgeRef(e.edge))
    }

    /// In-edges of `v` (edges e with target(e) == v), sorted by source.
    pub fn in_edges(&self, v: NodeIndex) -> impl Iterator<Item = EdgeRef> + '_ {
        self.in_slice(v).iter().map(|e| EdgeRef(e.edge))
    }

    pub fn adjacent_vertices(&self, v: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.out_slice(v).iter().map(|e| node_index(e.neighbor))
    }

    pub fn in_adjacent_vertices(&self, v: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.in_slice(v).iter().map(|e| node_index(e.neighbor))
    }

    /// The unique (u,v) edge, if present. Binary searches the sorted
    /// out-slice; not all call sites need this (§4.1 notes it's optional).
    pub fn edge(&self, u: NodeIndex, v: NodeIndex) -> Option<EdgeRef> {
        let slice = self.out_slice(u);
        let neighbors: Vec<usize> = slice.iter().map(|e| e.neighbor).collect();
        let range = SortedRange::new(&neighbors);
        range.find(&v.index()).map(|i| EdgeRef(slice[i].edge))
    }
}

/// Builds a [`StaticGraph`] from a mixed edge stream plus a known vertex
/// count (§4.1). Rejects edges whose endpoint is >= `num_vertices`.
pub struct StaticGraphBuilder {
    num_vertices: usize,
    edges: Vec<EdgeRecord>,
}

impl StaticGraphBuilder {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            edges: Vec::new(),
        }
    }

    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, weight: Weight) -> Result<(), GraphError> {
        if source.index() >= self.num_vertices {
            return Err(GraphError::VertexOutOfRange(source.index(), self.num_vertices));
        }
        if target.index() >= self.num_vertices {
            return Err(GraphError::VertexOutOfRange(target.index(), self.num_vertices));
        }
        self.edges.push(EdgeRecord { source, target, weight });
        Ok(())
    }

    pub fn build(self) -> StaticGraph {
        let n = self.num_vertices;
        let mut out_deg = vec![0u32; n];
        let mut in_deg = vec![0u32; n];
        for e in &self.edges {
            out_deg[e.source.index()] += 1;
            in_deg[e.target.index()] += 1;
        }

        let mut offsets = vec![0u32; n + 1];
        let mut separators = vec![0u32; n];
        for v in 0..n {
            separators[v] = in_deg[v];
            offsets[v + 1] = offsets[v] + in_deg[v] + out_deg[v];
        }

        let mut entries = vec![AdjEntry { neighbor: 0, edge: 0 }; 2 * self.edges.len()];
        let mut in_cursor: Vec<u32> = (0..n).map(|v| offsets[v]).collect();
        let mut out_cursor: Vec<u32> = (0..n).map(|v| offsets[v] + separators[v]).collect();

        for (i, e) in self.edges.iter().enumerate() {
            let oc = out_cursor[e.source.index()] as usize;
            entries[oc] = AdjEntry {
                neighbor: e.target.index(),
                edge: i as u32,
            };
            out_cursor[e.source.index()] += 1;

            let ic = in_cursor[e.target.index()] as usize;
            entries[ic] = AdjEntry {
                neighbor: e.source.index(),
                edge: i as u32,
            };
            in_cursor[e.target.index()] += 1;
        }

        for v in 0..n {
            let start = offsets[v] as usize;
            let sep = separators[v] as usize;
            let end = offsets[v + 1] as usize;
            entries[start..start + sep].sort_by_key(|e| e.neighbor);
            entries[start + sep..end].sort_by_key(|e| e.neighbor);
        }

        StaticGraph {
            offsets,
            separators,
            entries,
            edges: self.edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_graph() -> StaticGraph {
        // 0 -> 1 -> 2 -> 0, plus 0 -> 2 directly.
        let mut b = StaticGraphBuilder::new(3);
        b.add_edge(node_index(0), node_index(1), 1).unwrap();
        b.add_edge(node_index(1), node_index(2), 1).unwrap();
        b.add_edge(node_index(2), node_index(0), 1).unwrap();
        b.add_edge(node_index(0), node_index(2), 5).unwrap();
        b.build()
    }

    #[test]
    fn counts_and_degrees() {
        let g = small_graph();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 4);
        assert_eq!(g.out_degree(node_index(0)), 2);
        assert_eq!(g.in_degree(node_index(0)), 1);
        assert_eq!(g.out_degree(node_index(0)), g.out_edges(node_index(0)).count());
        assert_eq!(g.in_degree(node_index(2)), g.in_edges(node_index(2)).count());
    }

    #[test]
    fn out_edge_appears_in_target_in_edges() {
        let g = small_graph();
        for v in g.vertices() {
            for e in g.out_edges(v) {
                let t = g.target(e);
                let found = g.in_edges(t).filter(|&ie| ie == e).count();
                assert_eq!(found, 1);
            }
        }
    }

    #[test]
    fn adjacency_slices_are_sorted() {
        let g = small_graph();
        for v in g.vertices() {
            let outs: Vec<_> = g.adjacent_vertices(v).map(|n| n.index()).collect();
            assert!(outs.windows(2).all(|w| w[0] <= w[1]));
            let ins: Vec<_> = g.in_adjacent_vertices(v).map(|n| n.index()).collect();
            assert!(ins.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn rejects_out_of_range_endpoint() {
        let mut b = StaticGraphBuilder::new(2);
        let err = b.add_edge(node_index(0), node_index(5), 1).unwrap_err();
        assert_eq!(err, GraphError::VertexOutOfRange(5, 2));
    }

    #[test]
    fn edge_lookup() {
        let g = small_graph();
        let e = g.edge(node_index(0), node_index(1)).unwrap();
        assert_eq!(g.weight(e), 1);
        assert!(g.edge(node_index(1), node_index(0)).is_none());
    }
}
