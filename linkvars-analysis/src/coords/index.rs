//! `Index`: a path through nested hidden-content positions.

use std::fmt;

use linkvars_core::types::collections::SmallVec4;
use serde::{Deserialize, Serialize};

/// Wildcard: every hidden-content position.
pub const ALL: i32 = -1;
/// Modification coordinate not yet known.
pub const UNSPECIFIED: i32 = -2;
/// Explicitly does not propagate modification.
pub const NO_MODIFICATION: i32 = -3;
/// The fields of an object, taken as a whole.
pub const FIELD: i32 = -4;

/// A coordinate: `0` is the first type parameter, `0.1` is the second type
/// parameter of the first type parameter, and so on.
///
/// Ordering is lexicographic over the segments, a prefix sorting first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Index(SmallVec4<i32>);

impl Index {
    /// Single-segment coordinate.
    pub fn new(position: i32) -> Self {
        let mut segments = SmallVec4::new();
        segments.push(position);
        Self(segments)
    }

    /// Multi-segment coordinate. Falls back to the wildcard when `segments` is empty.
    pub fn path(segments: impl IntoIterator<Item = i32>) -> Self {
        let segments: SmallVec4<i32> = segments.into_iter().collect();
        if segments.is_empty() {
            return Self::all();
        }
        Self(segments)
    }

    pub fn all() -> Self {
        Self::new(ALL)
    }

    pub fn no_modification() -> Self {
        Self::new(NO_MODIFICATION)
    }

    pub fn unspecified() -> Self {
        Self::new(UNSPECIFIED)
    }

    pub fn field() -> Self {
        Self::new(FIELD)
    }

    /// `n` nested zero positions, e.g. `0.0.0` for a three-dimensional array.
    pub fn zeroes(n: usize) -> Self {
        Self::path(std::iter::repeat(0).take(n.max(1)))
    }

    pub fn segments(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_all(&self) -> bool {
        self.is_sentinel(ALL)
    }

    pub fn is_no_modification(&self) -> bool {
        self.is_sentinel(NO_MODIFICATION)
    }

    pub fn is_unspecified(&self) -> bool {
        self.is_sentinel(UNSPECIFIED)
    }

    fn is_sentinel(&self, sentinel: i32) -> bool {
        self.0.len() == 1 && self.0[0] == sentinel
    }

    /// Nest this coordinate one level deeper: `prefix(2)` on `0.1` gives `2.0.1`.
    pub fn prefix(&self, position: i32) -> Self {
        let mut segments = SmallVec4::with_capacity(self.0.len() + 1);
        segments.push(position);
        segments.extend_from_slice(&self.0);
        Self(segments)
    }

    /// `other` followed by this coordinate.
    pub fn prepend(&self, other: &Index) -> Self {
        let mut segments = SmallVec4::with_capacity(self.0.len() + other.0.len());
        segments.extend_from_slice(&other.0);
        segments.extend_from_slice(&self.0);
        Self(segments)
    }

    /// Everything but the outermost segment; `None` for single-segment coordinates.
    pub fn drop_first(&self) -> Option<Self> {
        (self.0.len() > 1).then(|| Self(self.0[1..].iter().copied().collect()))
    }

    /// Only the outermost segment; `None` for single-segment coordinates.
    pub fn take_first(&self) -> Option<Self> {
        (self.0.len() > 1).then(|| Self::new(self.0[0]))
    }

    pub fn single(&self) -> Option<i32> {
        (self.0.len() == 1).then(|| self.0[0])
    }

    /// Length of the coordinate if it consists of zeroes only.
    pub fn count_sequential_zeros(&self) -> Option<usize> {
        self.0.iter().all(|&i| i == 0).then_some(self.0.len())
    }

    pub fn replace_last(&self, value: i32) -> Self {
        let mut segments = self.0.clone();
        if let Some(last) = segments.last_mut() {
            *last = value;
        }
        Self(segments)
    }

    /// Rewrite the outermost segment.
    pub fn map_first(&self, f: impl FnOnce(i32) -> i32) -> Self {
        let mut segments = self.0.clone();
        if let Some(first) = segments.first_mut() {
            *first = f(*first);
        }
        Self(segments)
    }

    /// A coordinate compatible with both: their longest common prefix, or
    /// the wildcard when they diverge at the outermost segment.
    pub fn merge(&self, other: &Index) -> Self {
        if self == other {
            return self.clone();
        }
        let common: SmallVec4<i32> = self
            .0
            .iter()
            .zip(other.0.iter())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| *a)
            .collect();
        if common.is_empty() {
            Self::all()
        } else {
            Self(common)
        }
    }

    /// True when one coordinate contains the other, i.e. one is a prefix of
    /// the other. The wildcard overlaps every coordinate.
    pub fn overlaps(&self, other: &Index) -> bool {
        if self.is_all() || other.is_all() {
            return true;
        }
        let n = self.0.len().min(other.0.len());
        self.0[..n] == other.0[..n]
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match *segment {
                ALL => f.write_str("*")?,
                UNSPECIFIED => f.write_str("?")?,
                NO_MODIFICATION => f.write_str("X")?,
                FIELD => f.write_str("F")?,
                n => write!(f, "{n}")?,
            }
        }
        Ok(())
    }
}
