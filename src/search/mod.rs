//! Shared Dijkstra-family kernels (§4.4, §4.5): a plain single-source
//! search and a bidirectional search with a termination tracker, both
//! generic over any [`DijkstraVisitor`](crate::visitor::DijkstraVisitor)
//! so Contraction Hierarchies' witness search and Arc-Flags' per-cell
//! reverse search drive the same code as a plain point-to-point query.

pub mod bidir_dijkstra;
pub mod dijkstra;
pub mod shortest_path;
pub mod static_dijkstra;

use crate::constants::{Distance, INFINITE};
use crate::graph::{DefaultIdx, NodeIndex};
use rustc_hash::FxHashMap;

use self::shortest_path::ShortestPath;

/// Walks `predecessor` back from `target` to `source`, reversing the
/// result. Returns `None` if `target` was never discovered.
pub(crate) fn reconstruct_path<Idx: Copy + Eq + std::hash::Hash>(
    target: NodeIndex<Idx>,
    source: NodeIndex<Idx>,
    dist: &FxHashMap<NodeIndex<Idx>, (Distance, Option<NodeIndex<Idx>>)>,
) -> Option<ShortestPath<Idx>> {
    let &(weight, _) = dist.get(&target)?;
    if weight == INFINITE {
        return None;
    }

    let mut nodes = vec![target];
    let mut current = target;
    while current != source {
        let (_, pred) = dist.get(&current)?;
        current = (*pred)?;
        nodes.push(current);
    }
    nodes.reverse();
    Some(ShortestPath::new(nodes, weight))
}

#[cfg(test)]
pub(crate) fn assert_path(
    expected: Vec<usize>,
    expected_weight: Distance,
    actual: Option<ShortestPath<DefaultIdx>>,
) {
    let sp = actual.expect("expected a path, found none");
    assert_eq!(
        sp.nodes.iter().map(|n| n.index()).collect::<Vec<_>>(),
        expected
    );
    assert_eq!(sp.distance, expected_weight);
}

#[cfg(test)]
pub(crate) fn assert_no_path(actual: Option<ShortestPath<DefaultIdx>>) {
    assert!(
        actual.is_none(),
        "expected no path, found {:?}",
        actual.map(|s| s.distance)
    );
}
