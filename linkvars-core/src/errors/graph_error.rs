//! Graph and closure precondition errors.

use super::error_code::{self, LinkvarsErrorCode};

/// Precondition violations of the graph and closure API.
///
/// "No relationship found" is never an error: an empty result is a valid
/// answer. These variants signal misuse by the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Variable {name} is not a node of this graph")]
    UnknownVariable { name: String },

    #[error("Graph is frozen: cannot add edges for {name} after computing its closure")]
    Frozen { name: String },

    #[error("Independent edge from {from} to {to} carries no relationship and cannot be stored")]
    IndependentEdge { from: String, to: String },

    #[error("Return value {to} cannot be the target of an edge (from {from})")]
    ReturnValueTarget { from: String, to: String },

    #[error("Linked variables not yet set: {operation} requires a resolved value")]
    NotYetSet { operation: &'static str },

    #[error("Index {index} out of range for {len} linked variables")]
    SelectOutOfRange { index: usize, len: usize },
}

impl LinkvarsErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        error_code::GRAPH_ERROR
    }
}
