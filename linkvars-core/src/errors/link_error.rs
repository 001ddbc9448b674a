//! Link construction errors.

use super::error_code::{self, LinkvarsErrorCode};

/// Structural problems detected when building coordinates or link maps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("Coordinate set must not be empty")]
    EmptyIndices,

    #[error("Wildcard coordinate mixed with concrete coordinates: {found}")]
    WildcardMixed { found: String },

    #[error("Link map has {count} entries touching the wildcard, at most one is allowed")]
    MultipleWildcardEntries { count: usize },

    #[error("Wildcard-to-wildcard entry must be the only entry, found {entries} entries")]
    WildcardToWildcardMixed { entries: usize },

    #[error("Common hidden content level requires at least one link")]
    EmptyHiddenContent,

    #[error("Target coordinates {target} appear in more than one entry")]
    SharedTarget { target: String },
}

impl LinkvarsErrorCode for LinkError {
    fn error_code(&self) -> &'static str {
        error_code::LINK_ERROR
    }
}
