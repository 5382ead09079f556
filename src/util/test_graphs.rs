//! Small hand-built fixtures used across the kernel and preprocessing
//! test suites. Larger benchmark/correctness graphs are expected to come
//! from the `io` adapters reading a DDSG-style file, not from fixtures
//! baked into this crate.
use crate::graph::{node_index, Graph};

/// An 11-vertex graph ('A'..='K', indexed 0..=10) with every street
/// two-way — each `add_edge` call contributes both directions, matching
/// the original drawing's `<=>` arrows.
pub fn generate_complex_graph() -> Graph {
    let mut g = Graph::new();
    g.add_nodes(11);

    g.add_edge(node_index(0), node_index(1), 3); // A <=> B
    g.add_edge(node_index(0), node_index(2), 5); // A <=> C
    g.add_edge(node_index(0), node_index(10), 3); // A <=> K

    g.add_edge(node_index(1), node_index(3), 5); // B <=> D
    g.add_edge(node_index(1), node_index(2), 3); // B <=> C

    g.add_edge(node_index(2), node_index(3), 2); // C <=> D
    g.add_edge(node_index(2), node_index(9), 2); // C <=> J

    g.add_edge(node_index(3), node_index(9), 4); // D <=> J
    g.add_edge(node_index(3), node_index(4), 7); // D <=> E

    g.add_edge(node_index(4), node_index(9), 3); // E <=> J
    g.add_edge(node_index(4), node_index(5), 6); // E <=> F

    g.add_edge(node_index(5), node_index(7), 2); // F <=> H
    g.add_edge(node_index(5), node_index(6), 4); // F <=> G

    g.add_edge(node_index(6), node_index(7), 3); // G <=> H
    g.add_edge(node_index(6), node_index(8), 5); // G <=> I

    g.add_edge(node_index(7), node_index(8), 3); // H <=> I
    g.add_edge(node_index(7), node_index(9), 2); // H <=> J

    g.add_edge(node_index(8), node_index(9), 4); // I <=> J
    g.add_edge(node_index(8), node_index(10), 6); // I <=> K

    g.add_edge(node_index(9), node_index(10), 3); // J <=> K

    g
}

/// A small one-way-street graph:
/// ```text
///           B
///           |
/// E -> A -> C
///      |  /
///      D
/// ```
pub fn generate_simple_graph() -> Graph {
    let mut g = Graph::new();
    g.add_nodes(5);
    let (a, b, c, d, e) = (
        node_index(0),
        node_index(1),
        node_index(2),
        node_index(3),
        node_index(4),
    );

    g.add_edge(a, c, 1);
    g.add_edge(a, d, 1);
    g.add_edge(e, a, 1);
    g.add_edge(c, b, 1);
    g.add_edge(c, d, 1);

    g
}
