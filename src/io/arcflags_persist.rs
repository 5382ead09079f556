//! Bidirectional arc-flags persistence (§6): one line per edge, `src tgt
//! <K bits>_forward <K bits>_backward`, in the order iterating vertices
//! then out-edges of the in-memory graph produces. Reading back asserts
//! that `src`/`tgt` match that same iteration order, so a file built
//! against a differently-ordered graph is rejected rather than silently
//! misapplied.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

use crate::arc_flags::bitset::Bitset;
use crate::static_graph::StaticGraph;

/// Writes `fwd`/`bwd` (one entry per edge, indexed the way
/// [`build_forward_flags`](crate::arc_flags::preprocess::build_forward_flags)
/// returns them) for every edge of `g`, in vertex-then-out-edge order.
pub fn write<W: Write>(mut writer: W, g: &StaticGraph, fwd: &[Bitset], bwd: &[Bitset]) -> Result<()> {
    for v in g.vertices() {
        for e in g.out_edges(v) {
            let target = g.target(e);
            let f = bits_string(fwd[e.index()]);
            let b = bits_string(bwd[e.index()]);
            writeln!(writer, "{} {} {} {}", v.index(), target.index(), f, b)?;
        }
    }
    Ok(())
}

/// Reads a file written by [`write`], asserting each line's `src`/`tgt`
/// matches `g`'s own vertex-then-out-edge iteration order.
pub fn read<R: BufRead>(reader: R, g: &StaticGraph) -> Result<(Vec<Bitset>, Vec<Bitset>)> {
    let mut fwd = vec![Bitset::empty(); g.num_edges()];
    let mut bwd = vec![Bitset::empty(); g.num_edges()];

    let mut lines = reader.lines();
    for v in g.vertices() {
        for e in g.out_edges(v) {
            let line = lines
                .next()
                .context("arc-flags file ended before all edges were read")??;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let [src, tgt, f, b] = tokens.as_slice() else {
                bail!("malformed arc-flags record: {line:?}");
            };
            let src: usize = src.parse().with_context(|| format!("src column {src:?}"))?;
            let tgt: usize = tgt.parse().with_context(|| format!("tgt column {tgt:?}"))?;
            if src != v.index() || tgt != g.target(e).index() {
                bail!(
                    "arc-flags file order mismatch: expected edge {} -> {}, found {} -> {}",
                    v.index(),
                    g.target(e).index(),
                    src,
                    tgt
                );
            }
            fwd[e.index()] = parse_bits(f)?;
            bwd[e.index()] = parse_bits(b)?;
        }
    }
    Ok((fwd, bwd))
}

fn bits_string(flag: Bitset) -> String {
    (0..Bitset::BITS as usize).map(|i| if flag.get(i) { '1' } else { '0' }).collect()
}

fn parse_bits(s: &str) -> Result<Bitset> {
    if s.len() != Bitset::BITS as usize {
        bail!("expected {} bits, found {}: {s:?}", Bitset::BITS, s.len());
    }
    let mut flag = Bitset::empty();
    for (i, c) in s.chars().enumerate() {
        match c {
            '0' => {}
            '1' => flag.set(i, true),
            other => bail!("expected '0'/'1', found {other:?} in {s:?}"),
        }
    }
    Ok(flag)
}
