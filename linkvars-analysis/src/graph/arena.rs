//! Frozen, index-addressed form of a graph.

use std::fmt::Write as _;

use linkvars_core::types::collections::FxHashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use xxhash_rust::xxh3::xxh3_64;

use super::variable::Variable;
use super::weighted_graph::Node;
use crate::level::{DelayCauses, LinkLevel};

/// Variables numbered in node order, adjacency by index.
///
/// Node `i` of the petgraph arena is the `i`-th variable in
/// [`Variable`]'s order, so positions are stable for structurally
/// identical graphs whatever the insertion order was.
#[derive(Debug)]
pub struct Arena {
    variables: Vec<Variable>,
    position: FxHashMap<Variable, usize>,
    graph: DiGraph<(), LinkLevel, u32>,
    signature: String,
    structure: String,
    delay_causes: DelayCauses,
}

impl Arena {
    pub(crate) fn build(nodes: &[Node]) -> Self {
        let mut sorted: Vec<&Node> = nodes.iter().collect();
        sorted.sort_by(|a, b| a.variable.cmp(&b.variable));

        let variables: Vec<Variable> = sorted.iter().map(|n| n.variable.clone()).collect();
        let position: FxHashMap<Variable, usize> = variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();

        let mut graph = DiGraph::with_capacity(variables.len(), 0);
        for _ in &variables {
            graph.add_node(());
        }

        let mut signature = String::with_capacity(variables.len() * 8);
        let mut structure = String::with_capacity(variables.len() * 32);
        let mut delay_causes = DelayCauses::none();
        for (d1, node) in sorted.iter().enumerate() {
            let _ = write!(signature, "{d1}");
            let _ = write!(structure, "#{d1}");
            if node.edges.is_empty() {
                signature.push('/');
                continue;
            }
            let mut codes = Vec::with_capacity(node.edges.len());
            for (target, level) in &node.edges {
                // Every edge target is a node: add_node creates it.
                let Some(&d2) = position.get(target) else {
                    continue;
                };
                if let LinkLevel::Delayed(causes) = level {
                    delay_causes.merge_in(causes);
                }
                let code = if level.is_delayed() {
                    "D".to_string()
                } else {
                    level.minimal()
                };
                codes.push(format!("{d2}:{code}"));
                let _ = write!(structure, ">{d2}:{level:?};");
                graph.add_edge(NodeIndex::new(d1), NodeIndex::new(d2), level.clone());
            }
            codes.sort();
            let _ = write!(signature, "({})", codes.join(";"));
        }

        Self {
            variables,
            position,
            graph,
            signature,
            structure,
            delay_causes,
        }
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable_at(&self, i: usize) -> Option<&Variable> {
        self.variables.get(i)
    }

    pub fn position(&self, variable: &Variable) -> Option<usize> {
        self.position.get(variable).copied()
    }

    pub(crate) fn graph(&self) -> &DiGraph<(), LinkLevel, u32> {
        &self.graph
    }

    /// Canonical adjacency `i(j:code;...)`, `i/` for nodes without edges.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Union of the causes of every delayed edge.
    pub fn delay_causes(&self) -> &DelayCauses {
        &self.delay_causes
    }

    /// Cache key: every edge with its complete level, modification areas
    /// and delay causes included. The signature abbreviates both.
    pub(crate) fn cache_key(&self) -> String {
        self.structure.clone()
    }

    pub fn signature_hash(&self) -> u64 {
        xxh3_64(self.cache_key().as_bytes())
    }
}
