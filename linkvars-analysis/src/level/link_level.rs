//! `LinkLevel`: how strongly two variables are related.

use std::collections::BTreeMap;
use std::fmt;

use linkvars_core::errors::LinkError;

use super::delay::DelayCauses;
use crate::coords::Indices;
use crate::links::LinkMap;

const RANK_DELAYED: i8 = -1;
const RANK_STATICALLY_ASSIGNED: i8 = 0;
const RANK_ASSIGNED: i8 = 1;
const RANK_DEPENDENT: i8 = 2;
const RANK_COMMON_HC: i8 = 4;
const RANK_INDEPENDENT: i8 = 5;

/// Lattice value labelling an edge of the variable graph.
///
/// Ordered by [`value`](Self::value): statically assigned (0) is the
/// strongest relationship, independent (5) the weakest. Equality is
/// structural: two common-hidden-content levels are equal only when their
/// link maps are, so use [`le`](Self::le) and friends for rank comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkLevel {
    /// Same object, syntactically.
    StaticallyAssigned,
    /// Same object, through an assignment somewhere.
    Assigned,
    /// Modifying one may modify the other.
    Dependent(LinkMap),
    /// The two share hidden content at the linked coordinates.
    CommonHc(LinkMap),
    /// No relationship.
    Independent,
    /// Not known yet.
    Delayed(DelayCauses),
}

impl LinkLevel {
    pub fn dependent(links: LinkMap) -> Self {
        LinkLevel::Dependent(links)
    }

    /// A shared-hidden-content level needs at least one correspondence.
    pub fn common_hc(links: LinkMap) -> Result<Self, LinkError> {
        if links.is_empty() {
            return Err(LinkError::EmptyHiddenContent);
        }
        Ok(LinkLevel::CommonHc(links))
    }

    pub fn delayed(cause: impl Into<std::sync::Arc<str>>) -> Self {
        LinkLevel::Delayed(DelayCauses::new(cause))
    }

    /// Integer rank; `-1` for delays.
    pub fn value(&self) -> i8 {
        match self {
            LinkLevel::StaticallyAssigned => RANK_STATICALLY_ASSIGNED,
            LinkLevel::Assigned => RANK_ASSIGNED,
            LinkLevel::Dependent(_) => RANK_DEPENDENT,
            LinkLevel::CommonHc(_) => RANK_COMMON_HC,
            LinkLevel::Independent => RANK_INDEPENDENT,
            LinkLevel::Delayed(_) => RANK_DELAYED,
        }
    }

    pub fn le(&self, other: &LinkLevel) -> bool {
        self.value() <= other.value()
    }

    pub fn lt(&self, other: &LinkLevel) -> bool {
        self.value() < other.value()
    }

    pub fn ge(&self, other: &LinkLevel) -> bool {
        self.value() >= other.value()
    }

    pub fn is_delayed(&self) -> bool {
        matches!(self, LinkLevel::Delayed(_))
    }

    pub fn is_done(&self) -> bool {
        !self.is_delayed()
    }

    pub fn is_dependent(&self) -> bool {
        matches!(self, LinkLevel::Dependent(_))
    }

    pub fn is_common_hc(&self) -> bool {
        matches!(self, LinkLevel::CommonHc(_))
    }

    pub fn is_statically_assigned_or_assigned(&self) -> bool {
        matches!(self, LinkLevel::StaticallyAssigned | LinkLevel::Assigned)
    }

    pub fn links(&self) -> Option<&LinkMap> {
        match self {
            LinkLevel::Dependent(links) | LinkLevel::CommonHc(links) => Some(links),
            _ => None,
        }
    }

    pub fn have_links(&self) -> bool {
        self.links().is_some_and(|l| !l.is_empty())
    }

    pub fn delay_causes(&self) -> Option<&DelayCauses> {
        match self {
            LinkLevel::Delayed(causes) => Some(causes),
            _ => None,
        }
    }

    /// Weakest-but-safe combination of two data-flow paths into a variable.
    ///
    /// Delays merge their causes. A delay gives way only to a statically
    /// assigned value and wins over every other resolved value. Two
    /// dependent or two common-hidden-content levels union their link maps.
    pub fn min(&self, other: &LinkLevel) -> LinkLevel {
        use LinkLevel::*;
        match (self, other) {
            (Delayed(a), Delayed(b)) => Delayed(a.merge(b)),
            (Delayed(_), StaticallyAssigned) | (StaticallyAssigned, Delayed(_)) => StaticallyAssigned,
            (Delayed(_), _) => self.clone(),
            (_, Delayed(_)) => other.clone(),
            (CommonHc(a), CommonHc(b)) => CommonHc(a.merge(b)),
            (Dependent(a), Dependent(b)) => Dependent(a.merge(b)),
            _ if other.value() < self.value() => other.clone(),
            _ => self.clone(),
        }
    }

    /// Strongest of the two; delays absorb.
    pub fn max(&self, other: &LinkLevel) -> LinkLevel {
        if self.is_delayed() {
            return self.clone();
        }
        if other.is_delayed() {
            return other.clone();
        }
        if self.value() < other.value() {
            return other.clone();
        }
        debug_assert!(
            !(self.is_common_hc() && other.is_common_hc()) || self == other,
            "max of two different common hidden content levels: {self} vs {other}"
        );
        self.clone()
    }

    /// Swap direction of the link map; scalar levels are unchanged.
    pub fn reverse(&self) -> LinkLevel {
        match self {
            LinkLevel::Dependent(links) => LinkLevel::Dependent(links.reverse()),
            LinkLevel::CommonHc(links) => LinkLevel::CommonHc(links.reverse()),
            _ => self.clone(),
        }
    }

    /// Modifications travel a hidden-content link only when it is the
    /// mutable wildcard link `*M-4-..`.
    pub fn allow_modified(&self) -> bool {
        match self {
            LinkLevel::CommonHc(links) => {
                links.len() == 1
                    && links
                        .iter()
                        .all(|(from, link)| from.is_all() && link.is_mutable())
            }
            _ => true,
        }
    }

    pub fn mine_is_all(&self) -> bool {
        self.links().is_some_and(LinkMap::mine_is_all)
    }

    pub fn theirs_is_all(&self) -> bool {
        self.links().is_some_and(LinkMap::theirs_is_all)
    }

    pub fn correct_to(&self, correction: &BTreeMap<Indices, Indices>) -> LinkLevel {
        self.map_links(|links| links.correct_to(correction))
    }

    pub fn prefix_mine(&self, position: i32) -> LinkLevel {
        self.map_links(|links| links.prefix_mine(position))
    }

    pub fn prefix_theirs(&self, position: i32) -> LinkLevel {
        self.map_links(|links| links.prefix_theirs(position))
    }

    pub fn change_to_hc(&self) -> LinkLevel {
        match self {
            LinkLevel::Dependent(links) => LinkLevel::CommonHc(links.clone()),
            _ => self.clone(),
        }
    }

    fn map_links(&self, f: impl FnOnce(&LinkMap) -> LinkMap) -> LinkLevel {
        match self {
            LinkLevel::Dependent(links) if !links.is_empty() => LinkLevel::Dependent(f(links)),
            LinkLevel::CommonHc(links) if !links.is_empty() => LinkLevel::CommonHc(f(links)),
            _ => self.clone(),
        }
    }

    /// Full label when the level carries links, the bare rank otherwise.
    pub fn minimal(&self) -> String {
        if self.have_links() {
            self.to_string()
        } else {
            self.value().to_string()
        }
    }
}

impl fmt::Display for LinkLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkLevel::Delayed(_) => f.write_str("<delayed>"),
            LinkLevel::Dependent(links) | LinkLevel::CommonHc(links) if !links.is_empty() => {
                links.write_label(f, self.value())
            }
            _ => write!(f, "-{}-", self.value()),
        }
    }
}
