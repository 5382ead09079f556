//! Verification input format (§6): whitespace-separated `src tgt dist`
//! triples the engine is expected to reproduce exactly for the given
//! query — used to check a preprocessed graph's query results against a
//! fixed expectation file rather than a live reference Dijkstra.

use std::io::BufRead;

use anyhow::{Context, Result};

use crate::constants::Distance;
use crate::graph::node_index;
use crate::graph::NodeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationCase {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub expected_distance: Distance,
}

pub fn parse<R: BufRead>(reader: R) -> Result<Vec<VerificationCase>> {
    let mut cases = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let lineno = i + 1;
        let line = line.with_context(|| format!("reading line {lineno}"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [src, tgt, dist] = tokens.as_slice() else {
            anyhow::bail!("malformed verification record at line {lineno}: {line:?}");
        };
        let source = node_index(src.parse().with_context(|| format!("src at line {lineno}"))?);
        let target = node_index(tgt.parse().with_context(|| format!("tgt at line {lineno}"))?);
        let expected_distance: Distance = dist.parse().with_context(|| format!("dist at line {lineno}"))?;
        cases.push(VerificationCase { source, target, expected_distance });
    }
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_triples() {
        let cases = parse(Cursor::new("0 1 5\n2 3 10\n")).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].source, node_index(0));
        assert_eq!(cases[0].target, node_index(1));
        assert_eq!(cases[0].expected_distance, 5);
    }

    #[test]
    fn rejects_malformed_line() {
        let err = parse(Cursor::new("0 1\n")).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }
}
