//! Clusters of statically assigned variables.

use linkvars_core::types::collections::FxHashMap;
use petgraph::unionfind::UnionFind;

use super::variable::Variable;
use super::weighted_graph::WeightedGraph;
use crate::level::LinkLevel;

/// Variables that are the same object, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cluster {
    variables: Vec<Variable>,
}

impl Cluster {
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.variables.contains(variable)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    fn push(&mut self, variable: &Variable) {
        if !self.contains(variable) {
            self.variables.push(variable.clone());
        }
    }
}

/// Result of [`WeightedGraph::static_clusters`].
///
/// The return-value cluster overlaps with the others: it holds the return
/// value plus every cluster the return value is statically assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterResult {
    pub return_value_cluster: Option<Cluster>,
    pub return_value: Option<Variable>,
    pub clusters: Vec<Cluster>,
}

impl WeightedGraph {
    /// Group variables connected by statically assigned edges. Freezes the graph.
    pub fn static_clusters(&mut self) -> ClusterResult {
        self.freeze();
        let nodes = self.nodes();
        let position: FxHashMap<&Variable, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (&n.variable, i))
            .collect();

        let mut union_find = UnionFind::<usize>::new(nodes.len());
        let mut return_value = None;
        let mut assigned_to_return_value = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            let is_rv = node.variable.is_return_value();
            if is_rv {
                return_value = Some(node.variable.clone());
                assigned_to_return_value.clear();
            }
            for (target, level) in &node.edges {
                if !matches!(level, LinkLevel::StaticallyAssigned) {
                    continue;
                }
                let Some(&t) = position.get(target) else {
                    continue;
                };
                if is_rv {
                    assigned_to_return_value.push(t);
                } else {
                    union_find.union(i, t);
                }
            }
        }

        let mut by_representative: FxHashMap<usize, usize> = FxHashMap::default();
        let mut clusters: Vec<Cluster> = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            if node.variable.is_return_value() {
                continue;
            }
            let slot = *by_representative
                .entry(union_find.find(i))
                .or_insert_with(|| {
                    clusters.push(Cluster::default());
                    clusters.len() - 1
                });
            clusters[slot].push(&node.variable);
        }

        let return_value_cluster = return_value.as_ref().map(|rv| {
            let mut cluster = Cluster::default();
            cluster.push(rv);
            for &t in &assigned_to_return_value {
                if let Some(&slot) = by_representative.get(&union_find.find(t)) {
                    for v in clusters[slot].variables() {
                        cluster.push(v);
                    }
                }
            }
            cluster
        });

        ClusterResult {
            return_value_cluster,
            return_value,
            clusters,
        }
    }
}
