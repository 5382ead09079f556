//! Dynamic adjacency-list graph (§4.2): the mutable graph Contraction
//! Hierarchies contracts in place.
//!
//! Unlike the plain directed input graph, every link here carries a
//! [`Direction`] bit: an original directed edge `u -> v` contributes one
//! link to `u`'s adjacency (usable going *forward*, towards `v`) and a
//! mirrored link to `v`'s adjacency (usable only *backward*, i.e. only
//! when walked from `v` towards `u`). This is the "undirected-with-
//! direction-bit view" the contraction algorithm needs: every vertex has
//! a single adjacency list that mixes both of its original in- and
//! out-neighbors, distinguished only by the direction tag.
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{fmt, hash::Hash};

use crate::constants::Weight;

/// Default integer type for node and edge indices.
/// Increase for graphs with more than `u32::MAX` nodes/edges.
pub type DefaultIdx = u32;

pub trait IndexType: Copy + Default + Hash + Ord + fmt::Debug {
    fn new(idx: usize) -> Self;
    fn index(&self) -> usize;
    fn max() -> Self;
}

impl IndexType for usize {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x
    }
    #[inline(always)]
    fn index(&self) -> Self {
        *self
    }
    #[inline(always)]
    fn max() -> Self {
        usize::MAX
    }
}

impl IndexType for u32 {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x as u32
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self as usize
    }
    #[inline(always)]
    fn max() -> Self {
        u32::MAX
    }
}

impl IndexType for u16 {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x as u16
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self as usize
    }
    #[inline(always)]
    fn max() -> Self {
        u16::MAX
    }
}

impl IndexType for u8 {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x as u8
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self as usize
    }
    #[inline(always)]
    fn max() -> Self {
        u8::MAX
    }
}

/// Vertex identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct NodeIndex<Idx = DefaultIdx>(Idx);

impl NodeIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(IndexType::new(x))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    #[inline]
    pub fn end() -> Self {
        NodeIndex(IndexType::max())
    }
}

impl<Idx: IndexType> From<Idx> for NodeIndex<Idx> {
    fn from(ix: Idx) -> Self {
        NodeIndex(ix)
    }
}

/// Short version of `NodeIndex::new`.
pub fn node_index(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

/// Edge (half-edge / link) identifier.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize,
)]
pub struct EdgeIndex<Idx = DefaultIdx>(Idx);

impl<Idx: IndexType> From<Idx> for EdgeIndex<Idx> {
    fn from(ix: Idx) -> Self {
        EdgeIndex(ix)
    }
}

impl<Idx: IndexType> EdgeIndex<Idx> {
    #[inline]
    pub fn new(x: usize) -> Self {
        EdgeIndex(IndexType::new(x))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    /// An invalid `EdgeIndex`, used to denote absence of an edge.
    #[inline]
    pub fn end() -> Self {
        EdgeIndex(IndexType::max())
    }

    /// The other half of this edge's forward/backward pair. `add_edge`
    /// and `add_shortcut` always push a link immediately followed by its
    /// mirror, so the two occupy an even/odd pair of slots in
    /// `Graph::edges` — flipping the low bit of the index finds the twin.
    #[inline]
    pub fn mirror(self) -> Self {
        let i = self.index();
        EdgeIndex::new(if i % 2 == 0 { i + 1 } else { i - 1 })
    }
}

/// Which query directions a link may be relaxed in, per §3/§4.6.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Direction {
    Forward,
    Backward,
    Both,
}

impl Direction {
    #[inline]
    pub fn allows_forward(self) -> bool {
        matches!(self, Direction::Forward | Direction::Both)
    }

    #[inline]
    pub fn allows_backward(self) -> bool {
        matches!(self, Direction::Backward | Direction::Both)
    }

    #[inline]
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
            Direction::Both => Direction::Both,
        }
    }
}

/// A link stored in one endpoint's adjacency list. `source` is the vertex
/// owning the list this link lives in; `target` is the other endpoint.
/// `unpack` carries the contracted vertex a shortcut witnesses (`None` for
/// original edges).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Edge<Idx = DefaultIdx> {
    pub source: NodeIndex<Idx>,
    pub target: NodeIndex<Idx>,
    pub weight: Weight,
    pub direction: Direction,
    pub unpack: Option<NodeIndex<Idx>>,
}

impl Edge {
    pub fn new(source: NodeIndex<DefaultIdx>, target: NodeIndex<DefaultIdx>, weight: Weight) -> Self {
        Edge {
            source,
            target,
            weight,
            direction: Direction::Forward,
            unpack: None,
        }
    }

    pub fn with_direction(
        source: NodeIndex<DefaultIdx>,
        target: NodeIndex<DefaultIdx>,
        weight: Weight,
        direction: Direction,
        unpack: Option<NodeIndex<DefaultIdx>>,
    ) -> Self {
        Edge {
            source,
            target,
            weight,
            direction,
            unpack,
        }
    }
}

/// The dynamic, direction-tagged graph CH contracts in place (§4.2).
#[derive(Clone, Serialize, Deserialize)]
pub struct Graph<Idx = DefaultIdx> {
    /// Per-vertex adjacency: every link incident to the vertex, whichever
    /// original direction it came from.
    pub adj: Vec<Vec<EdgeIndex<Idx>>>,
    pub edges: Vec<Edge<Idx>>,
    pub num_nodes: usize,
    pub num_shortcuts: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            adj: Vec::new(),
            edges: Vec::new(),
            num_nodes: 0,
            num_shortcuts: 0,
        }
    }

    pub fn with_capacity(num_nodes: usize, num_edges: usize) -> Self {
        Self {
            adj: Vec::with_capacity(num_nodes),
            edges: Vec::with_capacity(2 * num_edges),
            num_nodes: 0,
            num_shortcuts: 0,
        }
    }

    /// Adds a new vertex, returning its index.
    pub fn add_node(&mut self) -> NodeIndex {
        let idx = NodeIndex::new(self.num_nodes);
        assert!(
            NodeIndex::end() != idx,
            "Maximum number of nodes for index type {} exceeded",
            std::any::type_name::<DefaultIdx>()
        );
        self.adj.push(Vec::new());
        self.num_nodes += 1;
        idx
    }

    /// Adds `num` fresh vertices.
    pub fn add_nodes(&mut self, num: usize) {
        for _ in 0..num {
            self.add_node();
        }
    }

    /// Adds a directed original edge `source -> target`: a `Forward` link
    /// in `source`'s adjacency and a mirrored `Backward` link in
    /// `target`'s. Returns the forward half-edge's index.
    ///
    /// **Panics** if `source`/`target` doesn't exist, or the weight is zero.
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, weight: Weight) -> EdgeIndex {
        self.add_link(source, target, weight, Direction::Forward, Direction::Backward, None)
    }

    /// Adds a shortcut edge witnessing the contraction of `via`.
    pub fn add_shortcut(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        weight: Weight,
        via: NodeIndex,
    ) -> EdgeIndex {
        self.num_shortcuts += 1;
        self.add_link(
            source,
            target,
            weight,
            Direction::Forward,
            Direction::Backward,
            Some(via),
        )
    }

    fn add_link(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        weight: Weight,
        dir_at_source: Direction,
        dir_at_target: Direction,
        unpack: Option<NodeIndex>,
    ) -> EdgeIndex {
        assert!(source.index() < self.num_nodes, "Source node does not exist");
        assert!(target.index() < self.num_nodes, "Target node does not exist");

        let fwd_idx = EdgeIndex::new(self.edges.len());
        self.edges.push(Edge::with_direction(source, target, weight, dir_at_source, unpack));
        self.adj[source.index()].push(fwd_idx);

        let bwd_idx = EdgeIndex::new(self.edges.len());
        self.edges.push(Edge::with_direction(target, source, weight, dir_at_target, unpack));
        self.adj[target.index()].push(bwd_idx);

        fwd_idx
    }

    pub fn edge(&self, idx: EdgeIndex) -> &Edge {
        &self.edges[idx.index()]
    }

    /// All links incident to `v`, regardless of direction.
    pub fn links(&self, v: NodeIndex) -> impl Iterator<Item = (EdgeIndex, &Edge)> {
        self.adj[v.index()].iter().map(|&idx| (idx, &self.edges[idx.index()]))
    }

    /// Links incident to `v` that can be relaxed walking *away* from `v`
    /// (original out-edges and shortcuts that replace them).
    pub fn out_links(&self, v: NodeIndex) -> impl Iterator<Item = (EdgeIndex, &Edge)> {
        self.links(v).filter(|(_, e)| e.direction.allows_forward())
    }

    /// Links incident to `v` that can be relaxed walking *into* `v`.
    pub fn in_links(&self, v: NodeIndex) -> impl Iterator<Item = (EdgeIndex, &Edge)> {
        self.links(v).filter(|(_, e)| e.direction.allows_backward())
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Removes all links of `v` whose target satisfies `pred`, from both
    /// `v`'s adjacency and the target's (the mirrored half-edge is dropped
    /// too, since a dangling twin would be observable as a phantom
    /// neighbor on the other endpoint).
    pub fn remove_out_edge_if(&mut self, v: NodeIndex, mut pred: impl FnMut(&Edge) -> bool) {
        let mut removed_twin_targets: Vec<NodeIndex> = Vec::new();
        self.adj[v.index()].retain(|&idx| {
            let keep = !pred(&self.edges[idx.index()]);
            if !keep {
                removed_twin_targets.push(self.edges[idx.index()].target);
            }
            keep
        });
        for target in removed_twin_targets {
            self.adj[target.index()].retain(|&idx| self.edges[idx.index()].target != v);
        }
    }

    /// Dominated-parallel pruning (§4.6.1): for every vertex and every
    /// out-admitting link, drop every other out-admitting link to the same
    /// neighbor with weight >= its own (symmetrically for in-admitting
    /// links). When exactly one forward-only and one backward-only link
    /// of equal weight to the same neighbor remain and neither is a
    /// shortcut, they are merged into a single `Both` link.
    pub fn prune_dominated_parallels(&mut self) {
        for v in 0..self.num_nodes {
            let v = NodeIndex::new(v);
            self.prune_parallels_at(v, |d| d.allows_forward());
            self.prune_parallels_at(v, |d| d.allows_backward());
        }
        self.merge_equal_weight_pairs();
    }

    fn prune_parallels_at(&mut self, v: NodeIndex, admits: impl Fn(Direction) -> bool) {
        let mut best: FxHashMap<NodeIndex, (Weight, EdgeIndex)> = FxHashMap::default();
        for &idx in &self.adj[v.index()] {
            let e = &self.edges[idx.index()];
            if !admits(e.direction) {
                continue;
            }
            best.entry(e.target)
                .and_modify(|(w, i)| {
                    if e.weight < *w {
                        *w = e.weight;
                        *i = idx;
                    }
                })
                .or_insert((e.weight, idx));
        }
        let keep: std::collections::HashSet<EdgeIndex> = best.values().map(|&(_, i)| i).collect();
        self.adj[v.index()].retain(|idx| {
            let e = &self.edges[idx.index()];
            !admits(e.direction) || keep.contains(idx)
        });
    }

    fn merge_equal_weight_pairs(&mut self) {
        for v in 0..self.num_nodes {
            let v = NodeIndex::new(v);
            let links: Vec<EdgeIndex> = self.adj[v.index()].clone();
            for idx in links {
                let e = self.edges[idx.index()].clone();
                if e.direction != Direction::Forward || e.unpack.is_some() {
                    continue;
                }
                if let Some(&twin) = self.adj[v.index()].iter().find(|&&other| {
                    let oe = &self.edges[other.index()];
                    oe.target == e.target && oe.direction == Direction::Backward && oe.unpack.is_none() && oe.weight == e.weight
                }) {
                    self.edges[idx.index()].direction = Direction::Both;
                    self.edges[twin.index()].direction = Direction::Both;
                }
            }
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a `Forward`/`Backward` edge pair from source to target, one in
/// each direction, both carrying `weight`. Used in test fixtures for a
/// "two-way street": `edge!(a, b, 3)`.
#[macro_export]
macro_rules! edge {
    ($source:expr => $target:expr, $weight:expr) => {
        ($source.into(), $target.into(), $weight)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_creates_forward_and_backward_halves() {
        let mut g = Graph::new();
        let a = g.add_node();
        let b = g.add_node();
        g.add_edge(a, b, 2);

        assert_eq!(g.out_links(a).count(), 1);
        assert_eq!(g.in_links(b).count(), 1);
        assert_eq!(g.out_links(b).count(), 0);
        assert_eq!(g.in_links(a).count(), 0);
    }

    #[test]
    fn prune_keeps_cheapest_parallel() {
        let mut g = Graph::new();
        let a = g.add_node();
        let b = g.add_node();
        g.add_edge(a, b, 5);
        g.add_edge(a, b, 2);

        g.prune_dominated_parallels();
        let out: Vec<_> = g.out_links(a).collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].1.weight, 2);
    }

    #[test]
    fn remove_out_edge_if_drops_mirrored_twin() {
        let mut g = Graph::new();
        let a = g.add_node();
        let b = g.add_node();
        g.add_edge(a, b, 1);

        g.remove_out_edge_if(a, |_| true);
        assert_eq!(g.out_links(a).count(), 0);
        assert_eq!(g.in_links(b).count(), 0);
    }
}
