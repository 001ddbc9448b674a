//! Closure cache configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CACHE_MAX_ENTRIES;

/// Configuration for the cross-graph closure cache.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Share closures between structurally identical graphs. Default: true.
    pub enabled: Option<bool>,
    /// Maximum number of cached closures. Default: 1000.
    pub max_entries: Option<u64>,
}

impl CacheConfig {
    /// Returns whether caching is enabled, defaulting to true.
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Returns the effective capacity, defaulting to [`DEFAULT_CACHE_MAX_ENTRIES`].
    pub fn effective_max_entries(&self) -> u64 {
        self.max_entries.unwrap_or(DEFAULT_CACHE_MAX_ENTRIES)
    }
}
