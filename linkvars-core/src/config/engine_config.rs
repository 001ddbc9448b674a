//! Closure engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for closure computation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Compute every row when a closure is created instead of on demand. Default: false.
    pub eager_closure: Option<bool>,
    /// Emit a trace event for every rejected composition. Default: false.
    pub log_rejections: Option<bool>,
}

impl EngineConfig {
    pub fn effective_eager_closure(&self) -> bool {
        self.eager_closure.unwrap_or(false)
    }

    pub fn effective_log_rejections(&self) -> bool {
        self.log_rejections.unwrap_or(false)
    }
}
