//! Closure cache shared between structurally identical graphs.
//!
//! Uses `moka::sync::Cache` keyed by the xxh3 hash of the canonical
//! adjacency. Tracks hits/misses/removals and the savings of evicted entries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use linkvars_core::types::collections::FxHashMap;
use moka::notification::RemovalCause;
use moka::sync::Cache;
use xxhash_rust::xxh3::xxh3_64;

use crate::graph::Arena;
use crate::level::LinkLevel;

/// One computed row: `(position, level)` for every reached variable.
pub(crate) type Row = Vec<(usize, LinkLevel)>;

/// A row is identified by its start position and the floor rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RowKey {
    pub(crate) start: usize,
    pub(crate) floor: Option<i8>,
}

/// Memoized closure rows of one graph shape.
#[derive(Debug)]
pub struct ClosureEntry {
    key: String,
    rows: RwLock<FxHashMap<RowKey, Arc<Row>>>,
    savings: AtomicU64,
}

impl ClosureEntry {
    pub(crate) fn new(key: String) -> Self {
        Self {
            key,
            rows: RwLock::new(FxHashMap::default()),
            savings: AtomicU64::new(0),
        }
    }

    /// Structural key of the graph shape this entry serves.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Row queries answered without recomputation.
    pub fn savings(&self) -> u64 {
        self.savings.load(Ordering::Relaxed)
    }

    pub fn row_count(&self) -> usize {
        self.rows.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub(crate) fn get_or_compute(&self, key: RowKey, compute: impl FnOnce() -> Row) -> Arc<Row> {
        if let Some(row) = self
            .rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            self.savings.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(row);
        }
        // Computed outside the lock; a concurrent computation of the same
        // row yields the same value, the first one stored wins.
        let row = Arc::new(compute());
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(rows.entry(key).or_insert(row))
    }
}

/// Cross-graph closure cache with hit/miss tracking.
pub struct ClosureCache {
    cache: Cache<u64, Arc<ClosureEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    removals: Arc<AtomicU64>,
    evicted_savings: Arc<AtomicU64>,
}

impl ClosureCache {
    pub fn new(max_entries: u64) -> Self {
        let removals = Arc::new(AtomicU64::new(0));
        let evicted_savings = Arc::new(AtomicU64::new(0));
        let listener_removals = Arc::clone(&removals);
        let listener_savings = Arc::clone(&evicted_savings);
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .eviction_listener(move |_hash: Arc<u64>, entry: Arc<ClosureEntry>, cause: RemovalCause| {
                if cause.was_evicted() {
                    listener_removals.fetch_add(1, Ordering::Relaxed);
                    listener_savings.fetch_add(entry.savings(), Ordering::Relaxed);
                }
            })
            .build();
        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            removals,
            evicted_savings,
        }
    }

    /// The shared entry for this graph shape, created on first use.
    ///
    /// A hash collision with a different shape yields a fresh entry that
    /// is not cached.
    pub fn entry_for(&self, arena: &Arena) -> Arc<ClosureEntry> {
        let key = arena.cache_key();
        let hash = xxh3_64(key.as_bytes());
        let entry = match self.cache.get(&hash) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(signature_hash = hash, "closure cache hit");
                entry
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(signature_hash = hash, "closure cache miss");
                self.cache
                    .get_with(hash, || Arc::new(ClosureEntry::new(key.clone())))
            }
        };
        if entry.key() != key {
            tracing::warn!(signature_hash = hash, "closure cache hash collision");
            return Arc::new(ClosureEntry::new(key));
        }
        entry
    }

    /// Total cache hits.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Total cache misses.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Entries evicted for capacity.
    pub fn removals(&self) -> u64 {
        self.removals.load(Ordering::Relaxed)
    }

    /// Sum of the savings of evicted entries.
    pub fn evicted_savings(&self) -> u64 {
        self.evicted_savings.load(Ordering::Relaxed)
    }

    /// Cache hit rate (0.0–1.0).
    pub fn hit_rate(&self) -> f64 {
        let h = self.hits() as f64;
        let m = self.misses() as f64;
        let total = h + m;
        if total == 0.0 {
            0.0
        } else {
            h / total
        }
    }

    /// Number of entries currently in the cache.
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl std::fmt::Debug for ClosureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureCache")
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .field("removals", &self.removals())
            .finish()
    }
}
