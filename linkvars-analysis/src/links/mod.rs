//! Links between the hidden content of two variables.
//!
//! A [`LinkMap`] says which coordinates of one variable's hidden content
//! correspond to which coordinates of another's. Maps are composed along
//! graph paths with [`LinkMap::next`].

pub mod compose;
pub mod link;
pub mod link_map;

pub use compose::Composition;
pub use link::Link;
pub use link_map::LinkMap;
