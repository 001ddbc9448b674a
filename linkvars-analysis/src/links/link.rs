//! A single coordinate correspondence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coords::Indices;

/// Target coordinates of one link-map entry, and whether a modification of
/// the source coordinates propagates to them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    to: Indices,
    mutable: bool,
}

impl Link {
    pub fn new(to: Indices, mutable: bool) -> Self {
        Self { to, mutable }
    }

    pub fn to(&self) -> &Indices {
        &self.to
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Same target, given mutability.
    pub fn with_mutable(&self, mutable: bool) -> Self {
        Self {
            to: self.to.clone(),
            mutable,
        }
    }

    /// Replace the target when `correction` has an entry for it.
    pub fn correct_to(&self, correction: &BTreeMap<Indices, Indices>) -> Self {
        Self {
            to: correction.get(&self.to).cloned().unwrap_or_else(|| self.to.clone()),
            mutable: self.mutable,
        }
    }

    /// Coordinate union; mutable if either side is.
    pub fn merge(&self, other: &Link) -> Self {
        Self {
            to: self.to.merge(&other.to),
            mutable: self.mutable || other.mutable,
        }
    }

    pub fn prefix_theirs(&self, position: i32) -> Self {
        Self {
            to: self.to.prefix(position),
            mutable: self.mutable,
        }
    }
}
