//! Demonstrates the two ambient-stack hooks the core deliberately stays
//! silent about: a real logger (`env_logger::init()`, the crate never
//! calls this itself — §7) and an `indicatif`-backed progress sink wired
//! to [`NodeContractor::run`]'s `progress` callback (§4.6.4). Run with
//! `cargo bench --bench contraction_progress` (or as a plain binary via
//! `cargo run`); `RUST_LOG=info` shows the phase-boundary log lines.
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use waygraph::ch::node_contraction::{NodeContractor, OrderingStrategy};
use waygraph::graph::{node_index, Graph};

/// A small grid graph, large enough to exercise more than one contraction
/// step but with no file-system dependency.
fn grid_graph(rows: usize, cols: usize) -> Graph {
    let mut g = Graph::new();
    g.add_nodes(rows * cols);
    let id = |r: usize, c: usize| r * cols + c;
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                let (a, b) = (node_index(id(r, c)), node_index(id(r, c + 1)));
                g.add_edge(a, b, 1);
                g.add_edge(b, a, 1);
            }
            if r + 1 < rows {
                let (a, b) = (node_index(id(r, c)), node_index(id(r + 1, c)));
                g.add_edge(a, b, 1);
                g.add_edge(b, a, 1);
            }
        }
    }
    g
}

fn main() {
    env_logger::init();

    let mut g = grid_graph(40, 40);
    let total = g.num_nodes();
    info!("contracting a {total}-vertex grid");

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {human_pos}/{human_len} nodes ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let contractor = NodeContractor::new(&mut g);
    let overlay = contractor.run(OrderingStrategy::Lazy, |done, _total| pb.set_position(done as u64));
    pb.finish_with_message("contraction done");

    info!("overlay has {} vertices, all ordered", overlay.num_nodes());
}
