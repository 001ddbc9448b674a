//! Transitive closure of the variable graph.
//!
//! Two Dijkstra passes per start variable: the low pass decides which
//! variables are only reachable through delays, the high pass composes the
//! link maps of the best resolved paths.

pub mod cache;
mod dijkstra;
pub mod engine;
pub mod shortest_path;
pub mod weights;

pub use cache::{ClosureCache, ClosureEntry};
pub use engine::ClosureEngine;
pub use shortest_path::ShortestPath;
