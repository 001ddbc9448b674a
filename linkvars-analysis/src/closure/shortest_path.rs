//! Transitive closure of a frozen graph.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use linkvars_core::config::EngineConfig;
use linkvars_core::errors::GraphError;

use super::cache::{ClosureEntry, Row, RowKey};
use super::dijkstra::shortest_paths;
use super::weights::{high_weight, is_delay_distance, low_weight};
use crate::graph::{Arena, Variable};
use crate::level::{DelayCauses, LinkLevel};

/// Query interface over the closure of one graph.
///
/// Rows are computed on demand per start variable and floor, and memoized
/// in a [`ClosureEntry`] that structurally identical graphs share.
#[derive(Debug)]
pub struct ShortestPath {
    arena: Arena,
    entry: Arc<ClosureEntry>,
    log_rejections: bool,
}

impl ShortestPath {
    pub(crate) fn new(arena: Arena, entry: Arc<ClosureEntry>, engine: &EngineConfig) -> Self {
        let shortest = Self {
            arena,
            entry,
            log_rejections: engine.effective_log_rejections(),
        };
        if engine.effective_eager_closure() {
            for start in 0..shortest.arena.len() {
                shortest.row(start, None);
            }
        }
        shortest
    }

    /// Every variable reachable from `start` with its composed level.
    ///
    /// With a floor, only edges at least as strong as the floor are
    /// followed. `start` maps to [`LinkLevel::StaticallyAssigned`].
    pub fn links(
        &self,
        start: &Variable,
        floor: Option<&LinkLevel>,
    ) -> Result<BTreeMap<Variable, LinkLevel>, GraphError> {
        let position = self
            .arena
            .position(start)
            .ok_or_else(|| GraphError::UnknownVariable {
                name: start.to_string(),
            })?;
        let row = self.row(position, floor);
        Ok(row
            .iter()
            .filter_map(|(i, level)| {
                self.arena
                    .variable_at(*i)
                    .map(|v| (v.clone(), level.clone()))
            })
            .collect())
    }

    /// The full closure, one row per variable, without floor.
    pub fn compute_all(&self) -> BTreeMap<Variable, BTreeMap<Variable, LinkLevel>> {
        self.arena
            .variables()
            .iter()
            .filter_map(|v| self.links(v, None).ok().map(|row| (v.clone(), row)))
            .collect()
    }

    pub fn variables(&self) -> &[Variable] {
        self.arena.variables()
    }

    /// Variable at position `i` of the canonical node order.
    pub fn variable_at(&self, i: usize) -> Option<&Variable> {
        self.arena.variable_at(i)
    }

    pub fn signature(&self) -> &str {
        self.arena.signature()
    }

    pub fn signature_hash(&self) -> u64 {
        self.arena.signature_hash()
    }

    /// Row queries this graph shape answered from memo so far.
    pub fn savings(&self) -> u64 {
        self.entry.savings()
    }

    fn row(&self, start: usize, floor: Option<&LinkLevel>) -> Arc<Row> {
        let key = RowKey {
            start,
            floor: floor.map(LinkLevel::value),
        };
        self.entry.get_or_compute(key, || self.compute_row(start, floor))
    }

    fn compute_row(&self, start: usize, floor: Option<&LinkLevel>) -> Row {
        let _span = tracing::debug_span!("closure_row", start, floor = ?floor.map(LinkLevel::value)).entered();
        let started = Instant::now();
        let graph = self.arena.graph();

        let low = shortest_paths(
            graph,
            start,
            DelayCauses::none(),
            low_weight,
            floor.map_or(u64::MAX, low_weight),
            |_, _| {},
        );
        let high = shortest_paths(
            graph,
            start,
            LinkLevel::StaticallyAssigned,
            high_weight,
            floor.map_or(u64::MAX, high_weight),
            |from, to| {
                if self.log_rejections {
                    tracing::trace!(
                        from = %self.display(from),
                        to = %self.display(to),
                        "composition rejected"
                    );
                }
            },
        );

        let mut row = Row::with_capacity(low.len());
        for (i, (low, high)) in low.into_iter().zip(high).enumerate() {
            if i == start {
                row.push((i, LinkLevel::StaticallyAssigned));
                continue;
            }
            let Some((distance, causes)) = low else {
                continue;
            };
            let level = if is_delay_distance(distance) {
                Some(LinkLevel::Delayed(causes))
            } else if let Some((_, level)) = high {
                Some(level)
            } else if !causes.is_empty() {
                Some(LinkLevel::Delayed(causes))
            } else {
                None
            };
            if let Some(level) = level {
                row.push((i, level));
            }
        }

        tracing::debug!(
            closure_reached = row.len(),
            closure_compute_time = started.elapsed().as_micros() as u64,
            "closure row computed"
        );
        row
    }

    fn display(&self, i: usize) -> String {
        self.arena
            .variable_at(i)
            .map_or_else(|| i.to_string(), ToString::to_string)
    }
}
