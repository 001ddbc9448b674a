//! Structured span field names.
//!
//! The vocabulary log queries can rely on. `tracing` macros take field
//! names as identifiers, so the engine's events spell these out literally
//! (`graph_node_count = ...`); this module is the reference list and must
//! change with them.

/// Number of variables in a frozen graph.
pub const GRAPH_NODE_COUNT: &str = "graph_node_count";

/// Number of directed edges in a frozen graph.
pub const GRAPH_EDGE_COUNT: &str = "graph_edge_count";

/// xxh3 hash of the canonical adjacency.
pub const SIGNATURE_HASH: &str = "signature_hash";

/// Closure row computation time in microseconds.
pub const CLOSURE_COMPUTE_TIME: &str = "closure_compute_time";

/// Variables reached from a start variable.
pub const CLOSURE_REACHED: &str = "closure_reached";

/// Closure cache hit rate (0.0 - 1.0).
pub const CACHE_HIT_RATE: &str = "cache_hit_rate";

/// Row queries answered from memo instead of recomputation.
pub const CLOSURE_SAVINGS: &str = "closure_savings";
