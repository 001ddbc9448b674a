//! `LinkMap`: coordinate correspondences between two variables.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use linkvars_core::errors::LinkError;
use serde::{Deserialize, Serialize};

use super::link::Link;
use crate::coords::Indices;

/// Partial map from source coordinates to target coordinates, plus the
/// modification areas on either side.
///
/// The areas record which part of a composite a modification actually
/// reaches. They start as the wildcard ("no restriction yet") and become
/// the no-modification marker once frozen with
/// [`ensure_no_modification`](Self::ensure_no_modification).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkMap {
    map: BTreeMap<Indices, Link>,
    modification_area_source: Indices,
    modification_area_target: Indices,
}

impl Default for LinkMap {
    fn default() -> Self {
        Self::empty()
    }
}

impl LinkMap {
    /// No correspondences.
    pub fn empty() -> Self {
        Self {
            map: BTreeMap::new(),
            modification_area_source: Indices::all(),
            modification_area_target: Indices::all(),
        }
    }

    /// Validated link map with unrestricted modification areas.
    ///
    /// Rejects wildcard misuse and two entries with the same target.
    pub fn new(map: BTreeMap<Indices, Link>) -> Result<Self, LinkError> {
        Self::with_areas(map, Indices::all(), Indices::all())
    }

    /// Validated link map with explicit modification areas.
    pub fn with_areas(
        map: BTreeMap<Indices, Link>,
        modification_area_source: Indices,
        modification_area_target: Indices,
    ) -> Result<Self, LinkError> {
        validate(&map)?;
        Ok(Self {
            map,
            modification_area_source,
            modification_area_target,
        })
    }

    /// One entry `from -> to`; `crate::coords::index::ALL` selects the wildcard.
    pub fn single(from: i32, to: i32, mutable: bool) -> Self {
        let indices = |i: i32| {
            if i == crate::coords::index::ALL {
                Indices::all()
            } else {
                Indices::of(i)
            }
        };
        Self::from_parts(
            BTreeMap::from([(indices(from), Link::new(indices(to), mutable))]),
            Indices::all(),
            Indices::all(),
        )
    }

    /// Composition results skip validation: a composed map may legitimately
    /// touch the wildcard more than once.
    pub(crate) fn from_parts(
        map: BTreeMap<Indices, Link>,
        modification_area_source: Indices,
        modification_area_target: Indices,
    ) -> Self {
        Self {
            map,
            modification_area_source,
            modification_area_target,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn get(&self, from: &Indices) -> Option<&Link> {
        self.map.get(from)
    }

    /// Entries in source-coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (&Indices, &Link)> {
        self.map.iter()
    }

    pub(crate) fn entries(&self) -> &BTreeMap<Indices, Link> {
        &self.map
    }

    pub fn modification_area_source(&self) -> &Indices {
        &self.modification_area_source
    }

    pub fn modification_area_target(&self) -> &Indices {
        &self.modification_area_target
    }

    /// Same entries, given modification areas.
    pub fn with_modification_areas(&self, source: Indices, target: Indices) -> Self {
        Self::from_parts(self.map.clone(), source, target)
    }

    /// Freeze both areas to "does not carry modification".
    pub fn ensure_no_modification(&self) -> Self {
        self.with_modification_areas(Indices::no_modification(), Indices::no_modification())
    }

    /// Swap the roles of source and target. Validated maps never share a
    /// target, so for them this is its own inverse; composed maps that do
    /// get the shared target's sources merged.
    pub fn reverse(&self) -> Self {
        let mut map: BTreeMap<Indices, Link> = BTreeMap::new();
        for (from, link) in &self.map {
            insert_merged(&mut map, link.to().clone(), Link::new(from.clone(), link.is_mutable()));
        }
        Self::from_parts(
            map,
            self.modification_area_target.clone(),
            self.modification_area_source.clone(),
        )
    }

    /// Combine two alternative paths to the same destination: key-wise
    /// union with [`Link::merge`] on collisions, areas joined independently.
    ///
    /// Commutative, associative and idempotent.
    pub fn merge(&self, other: &LinkMap) -> Self {
        let mut map = self.map.clone();
        for (from, link) in &other.map {
            insert_merged(&mut map, from.clone(), link.clone());
        }
        Self::from_parts(
            map,
            self.modification_area_source.merge(&other.modification_area_source),
            self.modification_area_target.merge(&other.modification_area_target),
        )
    }

    /// Keep our source coordinates, take the link that `other` holds for
    /// each of our targets. `None` when `other` lacks one of them.
    pub fn mine_to_theirs(&self, other: &LinkMap) -> Option<Self> {
        let mut map = BTreeMap::new();
        for (from, link) in &self.map {
            map.insert(from.clone(), other.map.get(link.to())?.clone());
        }
        Some(Self::from_parts(
            map,
            self.modification_area_source.clone(),
            other.modification_area_target.clone(),
        ))
    }

    /// Re-key on our targets, taking the link that `other` holds for each.
    pub fn theirs_to_theirs(&self, other: &LinkMap) -> Option<Self> {
        let mut map = BTreeMap::new();
        for link in self.map.values() {
            map.insert(link.to().clone(), other.map.get(link.to())?.clone());
        }
        Some(Self::from_parts(
            map,
            other.modification_area_source.clone(),
            other.modification_area_target.clone(),
        ))
    }

    pub fn correct_to(&self, correction: &BTreeMap<Indices, Indices>) -> Self {
        let map = self
            .map
            .iter()
            .map(|(from, link)| (from.clone(), link.correct_to(correction)))
            .collect();
        Self::from_parts(
            map,
            self.modification_area_source.clone(),
            self.modification_area_target.clone(),
        )
    }

    pub fn prefix_mine(&self, position: i32) -> Self {
        let mut map = BTreeMap::new();
        for (from, link) in &self.map {
            insert_merged(&mut map, from.prefix(position), link.clone());
        }
        Self::from_parts(
            map,
            self.modification_area_source.clone(),
            self.modification_area_target.clone(),
        )
    }

    pub fn prefix_theirs(&self, position: i32) -> Self {
        let map = self
            .map
            .iter()
            .map(|(from, link)| (from.clone(), link.prefix_theirs(position)))
            .collect();
        Self::from_parts(
            map,
            self.modification_area_source.clone(),
            self.modification_area_target.clone(),
        )
    }

    /// Exactly one entry, keyed by the wildcard.
    pub fn mine_is_all(&self) -> bool {
        self.map.len() == 1 && self.map.keys().all(Indices::is_all)
    }

    /// Exactly one entry, pointing at the wildcard.
    pub fn theirs_is_all(&self) -> bool {
        self.map.len() == 1 && self.map.values().all(|l| l.to().is_all())
    }

    /// Render as `from-rank-to[|areaSource-areaTarget]`.
    pub(crate) fn write_label(&self, f: &mut fmt::Formatter<'_>, rank: i8) -> fmt::Result {
        let mut from = Vec::with_capacity(self.map.len());
        let mut to = Vec::with_capacity(self.map.len());
        for (key, link) in &self.map {
            let m = if link.is_mutable() { "M" } else { "" };
            from.push(format!("{key}{m}"));
            to.push(format!("{}{m}", link.to()));
        }
        write!(f, "{}-{}-{}", from.join(","), rank, to.join(","))?;
        if self.modification_area_source.has_value() || self.modification_area_target.has_value() {
            write!(
                f,
                "|{}-{}",
                self.modification_area_source, self.modification_area_target
            )?;
        }
        Ok(())
    }
}

pub(crate) fn insert_merged(map: &mut BTreeMap<Indices, Link>, from: Indices, link: Link) {
    match map.get_mut(&from) {
        Some(existing) => *existing = existing.merge(&link),
        None => {
            map.insert(from, link);
        }
    }
}

fn validate(map: &BTreeMap<Indices, Link>) -> Result<(), LinkError> {
    let all_to_all = map
        .iter()
        .any(|(from, link)| from.is_all() && link.to().is_all());
    if all_to_all && map.len() > 1 {
        return Err(LinkError::WildcardToWildcardMixed { entries: map.len() });
    }
    let touching = map
        .iter()
        .filter(|(from, link)| from.is_all() || link.to().is_all())
        .count();
    if touching > 1 {
        return Err(LinkError::MultipleWildcardEntries { count: touching });
    }
    let mut targets = BTreeSet::new();
    for link in map.values() {
        if !targets.insert(link.to()) {
            return Err(LinkError::SharedTarget {
                target: link.to().to_string(),
            });
        }
    }
    Ok(())
}
