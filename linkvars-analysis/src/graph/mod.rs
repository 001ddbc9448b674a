//! Variable graph of one analyzed scope.

pub mod arena;
pub mod clusters;
pub mod variable;
pub mod weighted_graph;

pub use arena::Arena;
pub use clusters::{Cluster, ClusterResult};
pub use variable::{Variable, VariableKind};
pub use weighted_graph::WeightedGraph;
