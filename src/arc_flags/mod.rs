//! Arc-Flags (§4.7): a per-cell reachability flag on every edge, a
//! flag-filtered Dijkstra query, a bidirectional variant with per-
//! direction flags, and a flag-reduction stage that trades pruning power
//! for a smaller distinct-flag set.
pub mod bidirectional;
pub mod bitset;
pub mod partition;
pub mod preprocess;
pub mod query;
pub mod reduction;
