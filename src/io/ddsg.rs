//! DDSG-like text graph format (§6): a header line `d <V> <E>` (or the
//! DIMACS-lineage `p sp <V> <E>` spelling), followed by one edge per
//! line `u v w d` where `d` is a direction code. Lines starting with `c`
//! are comments. Named after the format used by the DIMACS
//! shortest-path challenge tooling this engine's input format lineage
//! traces back to.
//!
//! This module only builds an in-memory edge list; turning that into a
//! [`StaticGraph`] or dynamic [`Graph`] is a second, explicit step so
//! callers that only want one representation don't pay for the other.

use std::io::BufRead;

use anyhow::{bail, Context, Result};

use crate::constants::Weight;
use crate::graph::{node_index, Graph};
use crate::static_graph::{StaticGraph, StaticGraphBuilder};

/// Which of the two endpoints' orderings an edge is traversable in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    Forward,
    Backward,
    Both,
}

#[derive(Debug, Clone, Copy)]
pub struct DdsgEdge {
    pub source: usize,
    pub target: usize,
    pub weight: Weight,
    pub direction: EdgeDirection,
}

#[derive(Debug, Clone)]
pub struct DdsgGraph {
    pub num_vertices: usize,
    pub edges: Vec<DdsgEdge>,
}

/// Parses a DDSG-like stream into an in-memory edge list. Rejects an
/// unexpected token or a truncated record with the offending line number
/// attached via [`Context`].
pub fn parse<R: BufRead>(reader: R) -> Result<DdsgGraph> {
    let mut num_vertices = None;
    let mut declared_edges = None;
    let mut edges = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let lineno = i + 1;
        let line = line.with_context(|| format!("reading line {lineno}"))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["d", v, e] | ["p", "sp", v, e] => {
                num_vertices = Some(
                    v.parse::<usize>()
                        .with_context(|| format!("vertex count at line {lineno}: {line:?}"))?,
                );
                declared_edges = Some(
                    e.parse::<usize>()
                        .with_context(|| format!("edge count at line {lineno}: {line:?}"))?,
                );
            }
            [u, v, w, d] => {
                let source = u.parse::<usize>().with_context(|| format!("source at line {lineno}: {line:?}"))?;
                let target = v.parse::<usize>().with_context(|| format!("target at line {lineno}: {line:?}"))?;
                let weight = w.parse::<Weight>().with_context(|| format!("weight at line {lineno}: {line:?}"))?;
                let code = d.parse::<u8>().with_context(|| format!("direction code at line {lineno}: {line:?}"))?;
                let direction = match code {
                    0 | 3 => EdgeDirection::Both,
                    1 => EdgeDirection::Forward,
                    2 => EdgeDirection::Backward,
                    other => bail!("unknown direction code {other} at line {lineno}: {line:?}"),
                };
                edges.push(DdsgEdge { source, target, weight, direction });
            }
            _ => bail!("malformed record at line {lineno}: {line:?}"),
        }
    }

    let num_vertices = num_vertices.context("missing `d <V> <E>` / `p sp <V> <E>` header")?;
    if let Some(expected) = declared_edges {
        if expected != edges.len() {
            bail!("header declared {expected} edges but {} were read", edges.len());
        }
    }
    Ok(DdsgGraph { num_vertices, edges })
}

/// Expands `graph.edges` into a [`StaticGraph`], emitting both `(u, v)`
/// and `(v, u)` for a bidirectional code and the single named direction
/// otherwise (§6).
pub fn to_static_graph(graph: &DdsgGraph) -> Result<StaticGraph> {
    let mut builder = StaticGraphBuilder::new(graph.num_vertices);
    for e in &graph.edges {
        let (u, v) = (node_index(e.source), node_index(e.target));
        match e.direction {
            EdgeDirection::Both => {
                builder.add_edge(u, v, e.weight)?;
                builder.add_edge(v, u, e.weight)?;
            }
            EdgeDirection::Forward => {
                builder.add_edge(u, v, e.weight)?;
            }
            EdgeDirection::Backward => {
                builder.add_edge(v, u, e.weight)?;
            }
        }
    }
    Ok(builder.build())
}

/// Builds the dynamic, direction-tagged [`Graph`] Contraction Hierarchies
/// contracts. A bidirectional code becomes two independent `add_edge`
/// calls (one per orientation); pruning the resulting parallel
/// Forward/Backward pair into a single `Both` link is contraction's job
/// (§4.6.1), not this adapter's.
pub fn to_dynamic_graph(graph: &DdsgGraph) -> Graph {
    let mut g = Graph::with_capacity(graph.num_vertices, graph.edges.len());
    g.add_nodes(graph.num_vertices);
    for e in &graph.edges {
        let (u, v) = (node_index(e.source), node_index(e.target));
        match e.direction {
            EdgeDirection::Both => {
                g.add_edge(u, v, e.weight);
                g.add_edge(v, u, e.weight);
            }
            EdgeDirection::Forward => {
                g.add_edge(u, v, e.weight);
            }
            EdgeDirection::Backward => {
                g.add_edge(v, u, e.weight);
            }
        }
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
c comment line, ignored
d 3 3
0 1 4 1
1 2 5 2
0 2 1 0
";

    #[test]
    fn parses_header_and_direction_codes() {
        let parsed = parse(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(parsed.num_vertices, 3);
        assert_eq!(parsed.edges.len(), 3);
        assert_eq!(parsed.edges[0].direction, EdgeDirection::Forward);
        assert_eq!(parsed.edges[1].direction, EdgeDirection::Backward);
        assert_eq!(parsed.edges[2].direction, EdgeDirection::Both);
    }

    #[test]
    fn accepts_dimacs_style_header() {
        let text = SAMPLE.replacen("d 3 3", "p sp 3 3", 1);
        let parsed = parse(Cursor::new(text)).unwrap();
        assert_eq!(parsed.num_vertices, 3);
    }

    #[test]
    fn rejects_edge_count_mismatch() {
        let text = SAMPLE.replacen("d 3 3", "d 3 9", 1);
        let err = parse(Cursor::new(text)).unwrap_err();
        assert!(err.to_string().contains("declared 9 edges"));
    }

    #[test]
    fn bidirectional_code_expands_to_both_orientations() {
        let parsed = parse(Cursor::new(SAMPLE)).unwrap();
        let g = to_static_graph(&parsed).unwrap();
        assert!(g.edge(node_index(0), node_index(2)).is_some());
        assert!(g.edge(node_index(2), node_index(0)).is_some());
        // the forward-only edge 0->1 has no reverse counterpart.
        assert!(g.edge(node_index(1), node_index(0)).is_none());
    }

    #[test]
    fn backward_code_flips_endpoints() {
        let parsed = parse(Cursor::new(SAMPLE)).unwrap();
        let g = to_static_graph(&parsed).unwrap();
        // `1 2 5 2` means the edge is only traversable 2 -> 1.
        assert!(g.edge(node_index(2), node_index(1)).is_some());
        assert!(g.edge(node_index(1), node_index(2)).is_none());
    }
}
