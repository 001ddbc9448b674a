//! Causes of a delayed link level.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Sorted set of labels explaining why a relationship is not known yet.
///
/// Causes only accumulate: merging two delays keeps every cause of both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DelayCauses(BTreeSet<Arc<str>>);

impl DelayCauses {
    pub fn new(cause: impl Into<Arc<str>>) -> Self {
        Self(BTreeSet::from([cause.into()]))
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn merge(&self, other: &DelayCauses) -> Self {
        if other.0.is_subset(&self.0) {
            return self.clone();
        }
        Self(self.0.union(&other.0).cloned().collect())
    }

    pub fn merge_in(&mut self, other: &DelayCauses) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.as_ref())
    }
}

impl<S: Into<Arc<str>>> FromIterator<S> for DelayCauses {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for DelayCauses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cause) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(cause)?;
        }
        Ok(())
    }
}
