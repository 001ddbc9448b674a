//! The per-scope variable graph.

use std::collections::BTreeMap;
use std::sync::Arc;

use linkvars_core::config::EngineConfig;
use linkvars_core::errors::GraphError;
use linkvars_core::types::collections::FxHashMap;

use super::arena::Arena;
use super::variable::Variable;
use crate::closure::{ClosureCache, ShortestPath};
use crate::level::LinkLevel;

/// One node: a variable and its direct edges.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) variable: Variable,
    pub(crate) edges: BTreeMap<Variable, LinkLevel>,
}

/// Variables of one analyzed scope with their direct link levels.
///
/// Built incrementally with [`add_node`](Self::add_node), then frozen by
/// the first call to [`shortest_path`](Self::shortest_path) or
/// [`static_clusters`](Self::static_clusters).
#[derive(Debug)]
pub struct WeightedGraph {
    nodes: Vec<Node>,
    index: FxHashMap<Variable, usize>,
    frozen: bool,
    engine: EngineConfig,
    cache: Option<Arc<ClosureCache>>,
}

impl Default for WeightedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedGraph {
    /// A graph with default engine settings and a private, uncached closure.
    pub fn new() -> Self {
        Self::with_engine(EngineConfig::default(), None)
    }

    pub(crate) fn with_engine(engine: EngineConfig, cache: Option<Arc<ClosureCache>>) -> Self {
        Self {
            nodes: Vec::new(),
            index: FxHashMap::default(),
            frozen: false,
            engine,
            cache,
        }
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.index.contains_key(variable)
    }

    /// Visit every node with its direct edges, in insertion order.
    pub fn visit(&self, mut visitor: impl FnMut(&Variable, &BTreeMap<Variable, LinkLevel>)) {
        for node in &self.nodes {
            visitor(&node.variable, &node.edges);
        }
    }

    /// Add `variable` with direct edges to its neighbours.
    ///
    /// Repeated calls for the same variable merge with [`LinkLevel::min`].
    /// Every edge also gets its reverse on the target, except edges leaving
    /// a return value. Nothing is changed when an edge is rejected.
    pub fn add_node(
        &mut self,
        variable: Variable,
        edges: impl IntoIterator<Item = (Variable, LinkLevel)>,
    ) -> Result<(), GraphError> {
        if self.frozen {
            return Err(GraphError::Frozen {
                name: variable.to_string(),
            });
        }
        let edges: Vec<(Variable, LinkLevel)> = edges.into_iter().collect();
        for (target, level) in &edges {
            if matches!(level, LinkLevel::Independent) {
                return Err(GraphError::IndependentEdge {
                    from: variable.to_string(),
                    to: target.to_string(),
                });
            }
            if target.is_return_value() {
                return Err(GraphError::ReturnValueTarget {
                    from: variable.to_string(),
                    to: target.to_string(),
                });
            }
        }

        let source = self.get_or_create(&variable);
        let symmetric = !variable.is_return_value();
        for (target, level) in edges {
            let merged = merge_edge(&mut self.nodes[source].edges, target.clone(), level);
            let t = self.get_or_create(&target);
            if symmetric {
                merge_edge(&mut self.nodes[t].edges, variable.clone(), merged.reverse());
            }
        }
        Ok(())
    }

    fn get_or_create(&mut self, variable: &Variable) -> usize {
        if let Some(&i) = self.index.get(variable) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(Node {
            variable: variable.clone(),
            edges: BTreeMap::new(),
        });
        self.index.insert(variable.clone(), i);
        i
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Freeze the graph and hand out its transitive closure.
    ///
    /// Structurally identical graphs built by the same engine share one
    /// closure entry.
    pub fn shortest_path(&mut self) -> ShortestPath {
        self.freeze();
        let arena = Arena::build(&self.nodes);
        tracing::debug!(
            graph_node_count = arena.len(),
            graph_edge_count = arena.edge_count(),
            signature_hash = arena.signature_hash(),
            "graph frozen"
        );
        let entry = match &self.cache {
            Some(cache) => cache.entry_for(&arena),
            None => Arc::new(crate::closure::ClosureEntry::new(arena.cache_key())),
        };
        ShortestPath::new(arena, entry, &self.engine)
    }
}

fn merge_edge(edges: &mut BTreeMap<Variable, LinkLevel>, target: Variable, level: LinkLevel) -> LinkLevel {
    match edges.get_mut(&target) {
        Some(existing) => {
            *existing = existing.min(&level);
            existing.clone()
        }
        None => {
            edges.insert(target, level.clone());
            level
        }
    }
}
