//! linkvars-analysis: transitive closure of linked variables.
//!
//! - Coords: coordinates into hidden content, with wildcard and markers
//! - Links: coordinate correspondences and their composition along a path
//! - Level: the link-level lattice (`min`, `max`, `reverse`)
//! - Graph: per-scope variable graph, node order, static clusters
//! - Closure: two-pass Dijkstra closure, memoized rows, cross-graph cache
//!
//! ```ignore
//! let engine = ClosureEngine::new(&LinkvarsConfig::default());
//! let mut graph = engine.graph();
//! graph.add_node(a.clone(), [(b.clone(), LinkLevel::Assigned)])?;
//! let closure = graph.shortest_path();
//! let row = closure.links(&a, None)?;
//! ```

pub mod closure;
pub mod coords;
pub mod graph;
pub mod level;
pub mod linked_variables;
pub mod links;

pub use closure::{ClosureCache, ClosureEngine, ShortestPath};
pub use coords::{Index, Indices};
pub use graph::{Variable, VariableKind, WeightedGraph};
pub use level::{DelayCauses, LinkLevel};
pub use linked_variables::LinkedVariables;
pub use links::{Composition, Link, LinkMap};
