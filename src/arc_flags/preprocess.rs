//! Arc-Flags preprocessing (§4.7.1, §4.7.3): for every cell, run a
//! Dijkstra from each of its border vertices, setting the cell's bit on
//! every edge examined. After every cell has run, a flag table has bit
//! `c` set on edge `e` iff `e` lies on some shortest path touching cell
//! `c` at the sweep's endpoint.
//!
//! The forward table (§4.7.1, target-cell indexed) sweeps the
//! [`Complement`] of `g` from each border vertex — a Dijkstra "in the
//! reverse of G" — and attributes each edge it walks to the *original*
//! `G` edge running the opposite way. The backward table (§4.7.3,
//! source-cell indexed) sweeps `g` directly, the mirror-image procedure
//! "run on the reverse graph" of the reverse graph.

use log::info;

use crate::arc_flags::bitset::Bitset;
use crate::arc_flags::partition::Partition;
use crate::graph::NodeIndex;
use crate::graph_adapters::{Complement, Incidence};
use crate::search::static_dijkstra::StaticDijkstra;
use crate::static_graph::StaticGraph;
use crate::visitor::DijkstraVisitor;

/// Sets `cell`'s bit on every original-`G` edge a sweep examines.
/// `flip` is true when the sweep itself runs over the complement, so an
/// examined `(from, to)` pair names the original edge `to -> from`
/// rather than `from -> to`.
struct FlagSetter<'a> {
    g: &'a StaticGraph,
    cell: u32,
    flip: bool,
    flags: &'a mut [Bitset],
}

impl<'a> DijkstraVisitor for FlagSetter<'a> {
    fn examine_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        let edge = if self.flip { self.g.edge(to, from) } else { self.g.edge(from, to) };
        if let Some(e) = edge {
            self.flags[e.index()].set(self.cell as usize, true);
        }
    }
}

/// Marks the intra-cell edges of every cell (§4.7.1): `u -> v` with
/// `cell(u) = cell(v) = c` trivially sits on a shortest path ending (and
/// starting) in `c`.
fn mark_intra_cell_edges(g: &StaticGraph, partition: &Partition, flags: &mut [Bitset]) {
    for v in g.vertices() {
        let c = partition.cell_of(v);
        for e in g.out_edges(v) {
            if partition.cell_of(g.target(e)) == c {
                flags[e.index()].set(c as usize, true);
            }
        }
    }
}

/// Forward flag table (§4.7.1): `flags[e].get(c)` answers "does `e` lie
/// on some shortest path ending in cell `c`". Indexed by target-cell.
pub fn build_forward_flags(g: &StaticGraph, partition: &Partition) -> Vec<Bitset> {
    let mut flags = vec![Bitset::empty(); g.num_edges()];
    mark_intra_cell_edges(g, partition, &mut flags);

    let complement = Complement::new(g);
    for cell in 0..partition.num_cells() {
        let mut swept = 0usize;
        for source in partition.vertices_in_cell(cell).filter(|&v| partition.is_border(g, v)) {
            let mut setter = FlagSetter { g, cell, flip: true, flags: &mut flags };
            let mut dij = StaticDijkstra::new(&complement);
            dij.search_with(source, None, &mut setter);
            swept += 1;
        }
        info!("arc-flags forward sweep cell {cell}: {swept} border vertices");
    }
    flags
}

/// Backward flag table (§4.7.3): `flags[e].get(c)` answers "does `e` lie
/// on some shortest path starting in cell `c`". Indexed by source-cell,
/// built by the mirror-image sweep directly over `g`.
pub fn build_backward_flags(g: &StaticGraph, partition: &Partition) -> Vec<Bitset> {
    let mut flags = vec![Bitset::empty(); g.num_edges()];
    mark_intra_cell_edges(g, partition, &mut flags);

    for cell in 0..partition.num_cells() {
        let mut swept = 0usize;
        for source in partition.vertices_in_cell(cell).filter(|&v| partition.is_border(g, v)) {
            let mut setter = FlagSetter { g, cell, flip: false, flags: &mut flags };
            let mut dij: StaticDijkstra<'_, StaticGraph> = StaticDijkstra::new(g);
            dij.search_with(source, None, &mut setter);
            swept += 1;
        }
        info!("arc-flags backward sweep cell {cell}: {swept} border vertices");
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node_index;
    use crate::static_graph::StaticGraphBuilder;

    // 0 -> 1 -> 2 -> 3, cells {0,1}=A {2,3}=B, one-way chain.
    fn line() -> (StaticGraph, Partition) {
        let mut b = StaticGraphBuilder::new(4);
        b.add_edge(node_index(0), node_index(1), 1).unwrap();
        b.add_edge(node_index(1), node_index(2), 1).unwrap();
        b.add_edge(node_index(2), node_index(3), 1).unwrap();
        let g = b.build();
        let p = Partition::new(vec![0, 0, 1, 1], 2).unwrap();
        (g, p)
    }

    #[test]
    fn every_edge_on_the_only_path_carries_both_cell_bits_forward() {
        let (g, p) = line();
        let flags = build_forward_flags(&g, &p);
        // every edge lies on the unique path ending in cell 1 (vertex 3).
        for e in g.out_edges(node_index(0)).chain(g.out_edges(node_index(1))).chain(g.out_edges(node_index(2))) {
            assert!(flags[e.index()].get(1), "edge {:?} missing target-cell bit", e);
        }
        // the 0->1 edge also ends in cell 0.
        let e01 = g.edge(node_index(0), node_index(1)).unwrap();
        assert!(flags[e01.index()].get(0));
    }

    #[test]
    fn backward_flags_indexed_by_source_cell() {
        let (g, p) = line();
        let flags = build_backward_flags(&g, &p);
        // every edge lies on a path starting in cell 0 (vertex 0).
        for e in g.out_edges(node_index(0)).chain(g.out_edges(node_index(1))).chain(g.out_edges(node_index(2))) {
            assert!(flags[e.index()].get(0), "edge {:?} missing source-cell bit", e);
        }
    }
}
