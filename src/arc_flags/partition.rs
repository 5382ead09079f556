//! Graph partition (§3 "Partition", §4.7): an external assignment of
//! every vertex to one of `K` cells, fixed after load. Arc-Flags
//! preprocessing only cares about the *border* vertices of each cell —
//! those with a neighbor in a different cell — since a shortest path can
//! only change which cell is "closest" at a border crossing.

use thiserror::Error;

use crate::graph::{node_index, NodeIndex};
use crate::static_graph::StaticGraph;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
    #[error("cell {cell} assigned to vertex {vertex} is out of range for {num_cells} cells")]
    CellOutOfRange { vertex: usize, cell: u32, num_cells: u32 },
}

/// `cell(v) ∈ [0, K)` for every vertex, plus the cell count `K`.
pub struct Partition {
    cell: Vec<u32>,
    num_cells: u32,
}

impl Partition {
    pub fn new(cell: Vec<u32>, num_cells: u32) -> Result<Self, PartitionError> {
        for (vertex, &c) in cell.iter().enumerate() {
            if c >= num_cells {
                return Err(PartitionError::CellOutOfRange { vertex, cell: c, num_cells });
            }
        }
        Ok(Self { cell, num_cells })
    }

    pub fn num_cells(&self) -> u32 {
        self.num_cells
    }

    pub fn num_vertices(&self) -> usize {
        self.cell.len()
    }

    pub fn cell_of(&self, v: NodeIndex) -> u32 {
        self.cell[v.index()]
    }

    /// A vertex is a border vertex iff it has a neighbor (either
    /// direction) assigned to a different cell.
    pub fn is_border(&self, g: &StaticGraph, v: NodeIndex) -> bool {
        let c = self.cell_of(v);
        g.adjacent_vertices(v)
            .chain(g.in_adjacent_vertices(v))
            .any(|n| self.cell_of(n) != c)
    }

    pub fn border_vertices<'a>(&'a self, g: &'a StaticGraph) -> impl Iterator<Item = NodeIndex> + 'a {
        g.vertices().filter(move |&v| self.is_border(g, v))
    }

    pub fn vertices_in_cell(&self, cell: u32) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.cell.len()).filter(move |&i| self.cell[i] == cell).map(node_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node_index;
    use crate::static_graph::StaticGraphBuilder;

    // 0 - 1 - 2 - 3, cells {0,1} = A, {2,3} = B. 1 and 2 are the only
    // border vertices.
    fn line() -> StaticGraph {
        let mut b = StaticGraphBuilder::new(4);
        b.add_edge(node_index(0), node_index(1), 1).unwrap();
        b.add_edge(node_index(1), node_index(2), 1).unwrap();
        b.add_edge(node_index(2), node_index(3), 1).unwrap();
        b.build()
    }

    #[test]
    fn rejects_out_of_range_cell() {
        let err = Partition::new(vec![0, 1, 5], 2).unwrap_err();
        assert_eq!(err, PartitionError::CellOutOfRange { vertex: 2, cell: 5, num_cells: 2 });
    }

    #[test]
    fn border_vertices_are_exactly_the_cut_endpoints() {
        let g = line();
        let p = Partition::new(vec![0, 0, 1, 1], 2).unwrap();
        let borders: Vec<_> = p.border_vertices(&g).map(|v| v.index()).collect();
        assert_eq!(borders, vec![1, 2]);
    }

    #[test]
    fn vertices_in_cell_partitions_the_vertex_set() {
        let p = Partition::new(vec![0, 0, 1, 1], 2).unwrap();
        assert_eq!(p.vertices_in_cell(0).map(|v| v.index()).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(p.vertices_in_cell(1).map(|v| v.index()).collect::<Vec<_>>(), vec![2, 3]);
    }
}
