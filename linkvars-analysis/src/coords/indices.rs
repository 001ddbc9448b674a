//! `Indices`: a non-empty, ordered set of coordinates.

use std::collections::BTreeSet;
use std::fmt;

use linkvars_core::errors::LinkError;
use serde::{Deserialize, Serialize};

use super::index::Index;

/// An ordered set of [`Index`] values.
///
/// Never empty, and the wildcard never shares the set with other members:
/// both are guaranteed by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Indices(BTreeSet<Index>);

impl Indices {
    /// Every hidden-content position, generically.
    pub fn all() -> Self {
        Self::from_index(Index::all())
    }

    /// Marker for "does not propagate modification".
    pub fn no_modification() -> Self {
        Self::from_index(Index::no_modification())
    }

    pub fn unspecified() -> Self {
        Self::from_index(Index::unspecified())
    }

    pub fn field() -> Self {
        Self::from_index(Index::field())
    }

    /// The single position `position`.
    pub fn of(position: i32) -> Self {
        Self::from_index(Index::new(position))
    }

    pub fn from_index(index: Index) -> Self {
        Self(BTreeSet::from([index]))
    }

    /// Build a set from arbitrary members, rejecting an empty set and a
    /// wildcard mixed with other coordinates.
    pub fn try_from_iter(members: impl IntoIterator<Item = Index>) -> Result<Self, LinkError> {
        let set: BTreeSet<Index> = members.into_iter().collect();
        if set.is_empty() {
            return Err(LinkError::EmptyIndices);
        }
        if set.len() > 1 && set.iter().any(Index::is_all) {
            let found = set.iter().map(ToString::to_string).collect::<Vec<_>>().join(";");
            return Err(LinkError::WildcardMixed { found });
        }
        Ok(Self(set))
    }

    /// Members that are known to be valid; the wildcard absorbs the rest.
    fn normalized(set: BTreeSet<Index>) -> Option<Self> {
        if set.is_empty() {
            None
        } else if set.iter().any(Index::is_all) {
            Some(Self::all())
        } else {
            Some(Self(set))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Index> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_all(&self) -> bool {
        self.0.len() == 1 && self.0.iter().all(Index::is_all)
    }

    pub fn is_no_modification(&self) -> bool {
        self.0.len() == 1 && self.0.iter().all(Index::is_no_modification)
    }

    /// True for concrete coordinates: not the wildcard, not a marker.
    pub fn has_value(&self) -> bool {
        !self.is_all()
            && !self.is_no_modification()
            && !(self.0.len() == 1 && self.0.iter().all(Index::is_unspecified))
    }

    /// Union. The wildcard absorbs everything; the no-modification marker
    /// is neutral.
    pub fn merge(&self, other: &Indices) -> Self {
        if self.is_all() || other.is_all() {
            return Self::all();
        }
        if self.is_no_modification() {
            return other.clone();
        }
        if other.is_no_modification() {
            return self.clone();
        }
        Self(self.0.union(&other.0).cloned().collect())
    }

    pub fn prefix(&self, position: i32) -> Self {
        Self(self.0.iter().map(|i| i.prefix(position)).collect())
    }

    /// Every member of `other` followed by every member of `self`.
    pub fn prepend(&self, other: &Indices) -> Self {
        let set = other
            .0
            .iter()
            .flat_map(|o| self.0.iter().map(move |s| s.prepend(o)))
            .collect();
        Self(set)
    }

    /// Outermost segment of every nested member; `None` when no member is nested.
    pub fn first(&self) -> Option<Self> {
        Self::normalized(self.0.iter().filter_map(Index::take_first).collect())
    }

    /// Nested members with their outermost segment dropped.
    pub fn size2plus_drop_one(&self) -> Option<Self> {
        Self::normalized(self.0.iter().filter_map(Index::drop_first).collect())
    }

    pub fn contains_size2plus(&self) -> bool {
        self.0.iter().any(|i| i.len() > 1)
    }

    /// The single position of the first member, if it has exactly one segment.
    pub fn single(&self) -> Option<i32> {
        self.0.iter().next().and_then(Index::single)
    }

    pub fn map_first(&self, f: impl Fn(i32) -> i32) -> Self {
        Self(self.0.iter().map(|i| i.map_first(&f)).collect())
    }

    /// Whether two modification areas can refer to the same position.
    ///
    /// The no-modification marker intersects nothing, the wildcard
    /// intersects every other area.
    pub fn intersects(&self, other: &Indices) -> bool {
        if self.is_no_modification() || other.is_no_modification() {
            return false;
        }
        if self.is_all() || other.is_all() {
            return true;
        }
        self.0.iter().any(|a| other.0.iter().any(|b| a.overlaps(b)))
    }

    /// Intersection restricted to concrete coordinates: the wildcard does
    /// not vouch for anything here.
    pub fn intersects_concretely(&self, other: &Indices) -> bool {
        self.has_value() && other.has_value() && self.intersects(other)
    }
}

impl From<Index> for Indices {
    fn from(index: Index) -> Self {
        Self::from_index(index)
    }
}

impl fmt::Display for Indices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}
