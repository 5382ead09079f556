/// Edge weight type. Weight is a non-negative integer per the data model;
/// the source domain (road-network traversal cost) is an integer unit and
/// an integer representation makes "never negative" a type-level property
/// the engine never has to re-check.
pub type Weight = u32;

/// Accumulated path distance. Wider than `Weight` so summing many edges over
/// a continental-scale graph cannot overflow.
pub type Distance = u64;

/// Sentinel distance meaning "no path found". Never a valid finite distance.
pub const INFINITE: Distance = Distance::MAX;
