//! Shared constants for the linked-variables engine.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "LINKVARS_LOG";

/// Log filter used when `LINKVARS_LOG` is absent or invalid.
pub const DEFAULT_LOG_FILTER: &str = "linkvars=info";

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "linkvars.toml";

/// Default closure cache capacity.
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 1_000;

// ---- Distance weights ----
//
// Closure rows are computed with two Dijkstra passes. Each weight dominates
// the sum of any realistic number of weaker edges, so the total distance of a
// path encodes its weakest level.

/// Low pass: statically assigned.
pub const LOW_STATICALLY_ASSIGNED: u64 = 1;
/// Low pass: delayed. Cheap, so a delay-only path beats any resolved one.
pub const LOW_DELAYED: u64 = 1 << 10;
/// Low pass: assigned.
pub const LOW_ASSIGNED: u64 = 1 << 20;
/// Low pass: dependent.
pub const LOW_DEPENDENT: u64 = 1 << 30;
/// Low pass: common hidden content.
pub const LOW_COMMON_HC: u64 = 1 << 40;

/// High pass: statically assigned.
pub const HIGH_STATICALLY_ASSIGNED: u64 = 1;
/// High pass: assigned.
pub const HIGH_ASSIGNED: u64 = 1 << 10;
/// High pass: dependent.
pub const HIGH_DEPENDENT: u64 = 1 << 20;
/// High pass: common hidden content.
pub const HIGH_COMMON_HC: u64 = 1 << 40;
/// High pass: delayed. Expensive, so any resolved path wins.
pub const HIGH_DELAYED: u64 = 1 << 50;
