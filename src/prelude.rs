//! Re-exports of the crate's most commonly used items.
pub use crate::ch::ch_search::CHSearch;
pub use crate::ch::node_contraction::{ContractionParams, NodeContractor, OrderingStrategy};
pub use crate::ch::overlay_graph::OverlayGraph;

pub use crate::arc_flags::bidirectional::BidirArcFlagsQuery;
pub use crate::arc_flags::bitset::Bitset;
pub use crate::arc_flags::partition::Partition;
pub use crate::arc_flags::preprocess::{build_backward_flags, build_forward_flags};
pub use crate::arc_flags::query::ArcFlagsQuery;
pub use crate::arc_flags::reduction::{reduce_greedy, reduce_ranked, ReductionParams};

pub use crate::graph::{node_index, Graph, NodeIndex};
pub use crate::graph_adapters::{Complement, Incidence};
pub use crate::static_graph::StaticGraph;

pub use crate::search;
pub use crate::search::shortest_path::ShortestPath;

pub use crate::visitor::{DijkstraVisitor, NullVisitor};
