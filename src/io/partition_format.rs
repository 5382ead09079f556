//! Partition input format (§6): one unsigned integer per vertex,
//! whitespace-separated, naming that vertex's cell id in `[0, num_cells)`.

use std::io::BufRead;

use anyhow::{bail, Context, Result};

use crate::arc_flags::partition::Partition;

/// Reads exactly `num_vertices` cell ids and builds a [`Partition`].
/// Rejects a cell id `>= num_cells` and a vertex count mismatch.
pub fn parse<R: BufRead>(reader: R, num_vertices: usize, num_cells: u32) -> Result<Partition> {
    let mut cell = Vec::with_capacity(num_vertices);
    for token in reader.lines().collect::<std::io::Result<Vec<_>>>()?.iter().flat_map(|l| l.split_whitespace()) {
        cell.push(token.parse::<u32>().with_context(|| format!("cell id {token:?}"))?);
    }

    if cell.len() != num_vertices {
        bail!("partition assigns {} cells but the graph has {num_vertices} vertices", cell.len());
    }

    Partition::new(cell, num_cells).context("partition cell id out of range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_whitespace_separated_cells() {
        let p = parse(Cursor::new("0 0\n1 1\n"), 4, 2).unwrap();
        assert_eq!(p.num_vertices(), 4);
        assert_eq!(p.num_cells(), 2);
    }

    #[test]
    fn rejects_vertex_count_mismatch() {
        let err = parse(Cursor::new("0 1\n"), 3, 2).unwrap_err();
        assert!(err.to_string().contains("3 vertices"));
    }

    #[test]
    fn rejects_cell_id_out_of_range() {
        let err = parse(Cursor::new("0 5\n"), 2, 2).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
