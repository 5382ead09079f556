//! The overlay graph (§4.6.5): the read-only result of node contraction.
//! Every vertex keeps two adjacency lists derived from the fully
//! contracted [`Graph`] — the upward graph G↑ (edges_fwd, leading to a
//! higher-order neighbor) and the downward graph G↓ (edges_bwd) — so a
//! CH query only ever walks edges whose target outranks its source.
use std::path::PathBuf;

use anyhow::Context;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::graph::{DefaultIdx, Edge, EdgeIndex, Graph, NodeIndex};

#[derive(Serialize, Deserialize)]
pub struct OverlayGraph<Idx = DefaultIdx> {
    /// G↑: for each vertex, the out-admitting links whose target has a
    /// higher contraction order.
    edges_fwd: Vec<Vec<EdgeIndex<Idx>>>,
    /// G↓: for each vertex, the in-admitting links whose target has a
    /// higher contraction order.
    edges_bwd: Vec<Vec<EdgeIndex<Idx>>>,
    /// Maps a shortcut's edge index to the `[incoming, outgoing]` pair
    /// of edges it replaces, for recursive path unpacking.
    shortcuts: FxHashMap<EdgeIndex<Idx>, [EdgeIndex<Idx>; 2]>,
    /// Contraction order, indexed by vertex.
    order: Vec<u32>,
    g: Graph<Idx>,
}

impl OverlayGraph {
    /// Builds the overlay from a fully contracted graph, its contraction
    /// order, and the shortcut-unpacking map accumulated during
    /// contraction (§4.6.1, §4.6.4).
    pub(crate) fn compile(g: Graph, order: Vec<u32>, shortcuts: FxHashMap<EdgeIndex, [EdgeIndex; 2]>) -> Self {
        let n = g.num_nodes();
        let mut edges_fwd = vec![Vec::new(); n];
        let mut edges_bwd = vec![Vec::new(); n];

        for v in 0..n {
            let vi = NodeIndex::new(v);
            for (idx, e) in g.out_links(vi) {
                if order[e.target.index()] > order[v] {
                    edges_fwd[v].push(idx);
                }
            }
            for (idx, e) in g.in_links(vi) {
                if order[e.target.index()] > order[v] {
                    edges_bwd[v].push(idx);
                }
            }
        }

        OverlayGraph {
            edges_fwd,
            edges_bwd,
            shortcuts,
            order,
            g,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.g.num_nodes()
    }

    /// Contraction order of `v`, lower orders contracted first.
    pub fn order_of(&self, v: NodeIndex) -> usize {
        self.order[v.index()] as usize
    }

    pub fn encode(&self, path: impl Into<PathBuf>) -> anyhow::Result<usize> {
        let mut file = std::fs::File::create(path.into())?;
        let bytes_written =
            bincode::serde::encode_into_std_write(self, &mut file, bincode::config::standard())?;

        Ok(bytes_written)
    }

    pub fn from_decode(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path.into()).context("Failed to read file")?;
        let mut reader = std::io::BufReader::new(file);

        let overlay_graph = bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())
            .context("Failed to decode overlay graph")?;

        Ok(overlay_graph)
    }

    /// The underlying road graph, including every shortcut added during
    /// contraction.
    pub fn road_graph(&self) -> &Graph {
        &self.g
    }

    pub fn edge(&self, edge_idx: EdgeIndex) -> &Edge {
        self.g.edge(edge_idx)
    }

    pub fn edges_fwd(&self, node: NodeIndex) -> impl Iterator<Item = (EdgeIndex, &Edge)> {
        self.edges_fwd[node.index()].iter().map(|&idx| (idx, self.g.edge(idx)))
    }

    pub fn edges_bwd(&self, node: NodeIndex) -> impl Iterator<Item = (EdgeIndex, &Edge)> {
        self.edges_bwd[node.index()].iter().map(|&idx| (idx, self.g.edge(idx)))
    }

    /// Recursively unpacks a (possibly shortcut) edge into the sequence
    /// of original edges it represents.
    pub(crate) fn unpack_edge(&self, edge_idx: EdgeIndex) -> Vec<EdgeIndex> {
        match self.shortcuts.get(&edge_idx) {
            Some([incoming, outgoing]) => {
                let mut unpacked = self.unpack_edge(*incoming);
                unpacked.extend(self.unpack_edge(*outgoing));
                unpacked
            }
            None => vec![edge_idx],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ch::node_contraction::{NodeContractor, OrderingStrategy};
    use crate::graph::node_index;
    use crate::util::test_graphs::generate_complex_graph;

    #[test]
    fn upward_edges_only_lead_to_higher_order_vertices() {
        let mut g = generate_complex_graph();
        let n = g.num_nodes();
        let contractor = NodeContractor::new(&mut g);
        let overlay = contractor.run(OrderingStrategy::Random { seed: 1 }, |_, _| {});

        for v in 0..n {
            let v = node_index(v);
            for (_, e) in overlay.edges_fwd(v) {
                assert!(overlay.order_of(e.target) > overlay.order_of(v));
            }
            for (_, e) in overlay.edges_bwd(v) {
                assert!(overlay.order_of(e.target) > overlay.order_of(v));
            }
        }
    }

    #[test]
    fn unpack_edge_is_identity_for_original_edges() {
        let mut g = generate_complex_graph();
        let contractor = NodeContractor::new(&mut g);
        let overlay = contractor.run(OrderingStrategy::Random { seed: 1 }, |_, _| {});

        // Every original edge survives contraction under *some* index and
        // unpacks to itself.
        for (idx, _) in overlay.road_graph().out_links(node_index(0)) {
            if !overlay.shortcuts.contains_key(&idx) {
                assert_eq!(overlay.unpack_edge(idx), vec![idx]);
            }
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let mut g = generate_complex_graph();
        let contractor = NodeContractor::new(&mut g);
        let overlay = contractor.run(OrderingStrategy::Random { seed: 3 }, |_, _| {});

        let path = std::env::temp_dir().join("waygraph_overlay_roundtrip_test.bin");
        overlay.encode(&path).unwrap();
        let decoded = OverlayGraph::from_decode(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.num_nodes(), overlay.num_nodes());
        for v in 0..overlay.num_nodes() {
            let v = node_index(v);
            assert_eq!(decoded.order_of(v), overlay.order_of(v));
            assert_eq!(decoded.edges_fwd(v).count(), overlay.edges_fwd(v).count());
        }
    }
}
