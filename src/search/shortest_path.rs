use crate::constants::Distance;
use crate::graph::{DefaultIdx, NodeIndex};

/// A found route: the vertex sequence from source to target (inclusive)
/// and its total distance. `nodes` is empty only when source == target
/// and the caller chose not to special-case it upstream.
#[derive(Debug, PartialEq)]
pub struct ShortestPath<Idx = DefaultIdx> {
    pub nodes: Vec<NodeIndex<Idx>>,
    pub distance: Distance,
}

impl<Idx> ShortestPath<Idx> {
    pub fn new(nodes: Vec<NodeIndex<Idx>>, distance: Distance) -> Self {
        ShortestPath { nodes, distance }
    }
}
