//! Coordinates into hidden content.
//!
//! An [`Index`] is a path through nested type parameters (`0.1` is the
//! second parameter of the first parameter); an [`Indices`] is a set of
//! them. Sentinels mark the wildcard `*`, "no modification" `X`,
//! "unspecified" `?` and "the fields as a whole" `F`.

pub mod index;
pub mod indices;

pub use index::Index;
pub use indices::Indices;
