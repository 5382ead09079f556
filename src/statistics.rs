//! Statistics module. Used to collect various statistics about searches
//! and the contraction preprocessing pass.
use std::{
    fmt::{Debug, Display},
    time::{Duration, Instant},
};

use histogram::Histogram;

use crate::graph::Graph;

/// Collects statistics about a single search run.
#[derive(Debug, Default)]
pub struct SearchStats {
    /// Vertices popped as the current minimum and examined.
    pub nodes_settled: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl SearchStats {
    pub fn init(&mut self) {
        self.nodes_settled = 0;
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stats: {} nodes settled in {:?}", self.nodes_settled, self.duration)
    }
}

fn degree_histogram(g: &Graph, outgoing: bool) -> Histogram {
    let hist = Histogram::new(0, 10, 30).unwrap();
    for v in 0..g.num_nodes() {
        let v = crate::graph::node_index(v);
        let degree = if outgoing { g.out_links(v).count() } else { g.in_links(v).count() };
        hist.increment(degree as u64, 1).unwrap();
    }
    hist
}

/// Out-degree distribution of the graph's vertices.
pub fn degree_out_hist(g: &Graph) -> Histogram {
    degree_histogram(g, true)
}

/// In-degree distribution of the graph's vertices.
pub fn degree_in_hist(g: &Graph) -> Histogram {
    degree_histogram(g, false)
}

/// Average in-degree across all vertices.
pub fn average_in_degree(g: &Graph) -> f64 {
    let sum: usize = (0..g.num_nodes())
        .map(|v| g.in_links(crate::graph::node_index(v)).count())
        .sum();
    sum as f64 / g.num_nodes() as f64
}

/// Average out-degree across all vertices.
pub fn average_out_degree(g: &Graph) -> f64 {
    let sum: usize = (0..g.num_nodes())
        .map(|v| g.out_links(crate::graph::node_index(v)).count())
        .sum();
    sum as f64 / g.num_nodes() as f64
}

/// Collects timing and shortcut-count statistics about the node
/// contraction preprocessing pass (§4.6.4).
#[derive(Debug, Clone, Copy)]
pub struct ConstructionStats {
    pub node_ordering_time: Duration,
    pub contraction_time: Duration,
    pub total_time: Duration,
    pub shortcuts_added: usize,
    timer: Instant,
}

impl Default for ConstructionStats {
    fn default() -> Self {
        ConstructionStats {
            node_ordering_time: Duration::new(0, 0),
            contraction_time: Duration::new(0, 0),
            total_time: Duration::new(0, 0),
            shortcuts_added: 0,
            timer: Instant::now(),
        }
    }
}

impl Display for ConstructionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "---Construction Stats---")?;
        writeln!(f, "Node Ordering      : {:?}", self.node_ordering_time)?;
        writeln!(f, "Construction       : {:?}", self.contraction_time)?;
        writeln!(f, "------------------------")?;
        writeln!(f, "Total time         : {:?}", self.total_time)?;
        writeln!(f, "Shortcuts added [#]: {}", self.shortcuts_added)
    }
}

impl ConstructionStats {
    pub(crate) fn init(&mut self) {
        self.timer = Instant::now();
        self.shortcuts_added = 0;
        self.node_ordering_time = Duration::new(0, 0);
        self.contraction_time = Duration::new(0, 0);
        self.total_time = Duration::new(0, 0);
    }

    pub(crate) fn stop_timer_node_ordering(&mut self) {
        self.node_ordering_time = self.timer.elapsed();
        self.total_time += self.node_ordering_time;
        self.timer = Instant::now();
    }

    pub(crate) fn stop_timer_construction(&mut self) {
        self.contraction_time = self.timer.elapsed();
        self.total_time += self.contraction_time;
        self.timer = Instant::now();
    }
}
