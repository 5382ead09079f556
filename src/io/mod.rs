//! External I/O adapters (§6): text-format parsers and a persistence
//! format, kept strictly on top of the algorithmic core. Every function
//! here either parses into or serializes from the core's in-memory
//! types; none of it is imported by `ch`, `arc_flags`, or `search`.
pub mod arcflags_persist;
pub mod ddsg;
pub mod partition_format;
pub mod verification;
