//! Composition of two consecutive link maps.
//!
//! Given `E = A -> B` and `F = B -> C`, [`LinkMap::next`] computes the
//! correspondences of `A -> C`. Each entry of `E` is routed through its
//! target coordinates on `B`:
//!
//! 1. `F` has an entry for exactly those coordinates: take its target.
//! 2. Otherwise `F` has a wildcard entry: restart from the wildcard.
//! 3. Otherwise the coordinates on `B` are the wildcard itself: every
//!    entry of `F` is reachable.
//! 4. Otherwise the entry dies. That is a conflict unless the two
//!    modification areas on `B` intersect.
//!
//! A conflicted composition is rejected outright, even when other entries
//! composed fine: two siblings of a common parent must not become linked.

use std::collections::BTreeMap;

use super::link::Link;
use super::link_map::{insert_merged, LinkMap};
use crate::coords::Indices;

/// Outcome of [`LinkMap::next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    /// Accepted, with at least one correspondence.
    Composed(LinkMap),
    /// Accepted, but no correspondence survived.
    Edgeless,
    /// The two edges do not compose; the path must not be extended.
    Rejected,
}

impl Composition {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Composition::Rejected)
    }

    /// The composed map; an empty map for an accepted edgeless result.
    pub fn into_links(self) -> Option<LinkMap> {
        match self {
            Composition::Composed(links) => Some(links),
            Composition::Edgeless => Some(LinkMap::empty()),
            Composition::Rejected => None,
        }
    }
}

/// Accumulates composed entries for one `next` call.
struct Composer<'a> {
    current: &'a LinkMap,
    following: &'a LinkMap,
    result: BTreeMap<Indices, Link>,
    conflicted: bool,
    restarted_from_wildcard: bool,
    fanned_out: bool,
}

impl<'a> Composer<'a> {
    fn new(current: &'a LinkMap, following: &'a LinkMap) -> Self {
        Self {
            current,
            following,
            result: BTreeMap::new(),
            conflicted: false,
            restarted_from_wildcard: false,
            fanned_out: false,
        }
    }

    fn push(&mut self, from: &Indices, to: &Indices, mutable: bool) {
        if from.is_all() && to.is_all() {
            // A wildcard reaching a wildcard through one coordinate of the
            // intermediate: only sound when the areas pin down the same spot.
            if self
                .current
                .modification_area_source()
                .intersects_concretely(self.following.modification_area_target())
            {
                insert_merged(&mut self.result, from.clone(), Link::new(to.clone(), mutable));
            } else {
                self.conflicted = true;
            }
            return;
        }
        insert_merged(&mut self.result, from.clone(), Link::new(to.clone(), mutable));
    }

    fn visit(&mut self, from: &Indices, link: &Link) {
        let middle = link.to();
        if let Some(link2) = self.following.get(middle) {
            let mutable = !middle.is_all() && link.is_mutable() && link2.is_mutable();
            self.push(from, link2.to(), mutable);
        } else if let Some(all_link) = self.following.get(&Indices::all()) {
            let mutable = link.is_mutable() || all_link.is_mutable();
            self.restarted_from_wildcard = true;
            self.push(from, all_link.to(), mutable);
        } else if middle.is_all() {
            self.fanned_out = true;
            let following = self.following;
            for (_, link2) in following.iter() {
                let mutable = link.is_mutable() || link2.is_mutable();
                self.push(from, link2.to(), mutable);
            }
        } else if !self
            .current
            .modification_area_target()
            .intersects(self.following.modification_area_source())
        {
            self.conflicted = true;
        }
    }

    /// Areas of the composed map. Nested composites keep the outer
    /// variable's coordinate first: `a -> r` in area `1` of `r`, `r -> s` in
    /// area `3` of `s` gives `a -> s` in area `3.1`.
    fn areas(&self) -> (Indices, Indices) {
        let (e, f) = (self.current, self.following);
        let mut source = e.modification_area_source().clone();
        let mut target = f.modification_area_target().clone();
        if self.restarted_from_wildcard
            && e.modification_area_source().is_all()
            && f.modification_area_source().is_all()
            && e.modification_area_target().has_value()
            && f.modification_area_target().has_value()
        {
            target = e.modification_area_target().prepend(f.modification_area_target());
        }
        if self.fanned_out
            && e.modification_area_target().is_all()
            && f.modification_area_target().is_all()
            && e.modification_area_source().has_value()
            && f.modification_area_source().has_value()
        {
            source = f.modification_area_source().prepend(e.modification_area_source());
        }
        (source, target)
    }

    fn finish(self) -> Composition {
        if self.conflicted {
            return Composition::Rejected;
        }
        if self.result.is_empty() {
            let no_modification = self.current.modification_area_target().is_no_modification()
                || self.following.modification_area_source().is_no_modification();
            return if no_modification {
                Composition::Rejected
            } else {
                Composition::Edgeless
            };
        }
        let (source, target) = self.areas();
        Composition::Composed(LinkMap::from_parts(self.result, source, target))
    }
}

impl LinkMap {
    /// Compose `self` (`A -> B`) with `following` (`B -> C`) into `A -> C`.
    ///
    /// An empty `self` carries no coordinate information and yields
    /// `following` unchanged; an empty `following` yields an edgeless result.
    pub fn next(&self, following: &LinkMap) -> Composition {
        if self.is_empty() {
            return if following.is_empty() {
                Composition::Edgeless
            } else {
                Composition::Composed(following.clone())
            };
        }
        if following.is_empty() {
            return Composition::Edgeless;
        }
        let mut composer = Composer::new(self, following);
        for (from, link) in self.entries() {
            composer.visit(from, link);
        }
        composer.finish()
    }
}
