//! Entry point tying configuration, graphs and the closure cache together.

use std::sync::Arc;

use linkvars_core::config::LinkvarsConfig;

use super::cache::ClosureCache;
use crate::graph::WeightedGraph;

/// Creates graphs that share one closure cache.
///
/// Cheap to share between threads; every analyzed scope asks for its own
/// [`WeightedGraph`].
#[derive(Debug)]
pub struct ClosureEngine {
    config: LinkvarsConfig,
    cache: Option<Arc<ClosureCache>>,
}

impl ClosureEngine {
    pub fn new(config: &LinkvarsConfig) -> Self {
        let cache = config
            .cache
            .effective_enabled()
            .then(|| Arc::new(ClosureCache::new(config.cache.effective_max_entries())));
        tracing::debug!(
            cache_enabled = cache.is_some(),
            eager_closure = config.engine.effective_eager_closure(),
            "closure engine created"
        );
        Self {
            config: config.clone(),
            cache,
        }
    }

    /// A fresh, empty graph bound to this engine's settings and cache.
    pub fn graph(&self) -> WeightedGraph {
        WeightedGraph::with_engine(self.config.engine.clone(), self.cache.clone())
    }

    pub fn config(&self) -> &LinkvarsConfig {
        &self.config
    }

    /// `None` when caching is disabled.
    pub fn cache(&self) -> Option<&ClosureCache> {
        self.cache.as_deref()
    }

    /// Log the cache counters at `info`.
    pub fn report(&self) {
        if let Some(cache) = &self.cache {
            tracing::info!(
                hits = cache.hits(),
                misses = cache.misses(),
                removals = cache.removals(),
                cache_hit_rate = cache.hit_rate(),
                closure_savings = cache.evicted_savings(),
                "closure cache"
            );
        }
    }
}

impl Default for ClosureEngine {
    fn default() -> Self {
        Self::new(&LinkvarsConfig::default())
    }
}
