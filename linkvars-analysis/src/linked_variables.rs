//! Per-variable result of the closure, as handed back to the analyzer.

use std::collections::BTreeMap;
use std::fmt;

use linkvars_core::errors::GraphError;

use crate::graph::Variable;
use crate::level::LinkLevel;

/// Linked variables of one variable, or the marker for "not computed yet".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkedVariables {
    #[default]
    NotYetSet,
    Resolved(BTreeMap<Variable, LinkLevel>),
}

impl LinkedVariables {
    pub fn empty() -> Self {
        LinkedVariables::Resolved(BTreeMap::new())
    }

    pub fn of(variable: Variable, level: LinkLevel) -> Self {
        LinkedVariables::Resolved(BTreeMap::from([(variable, level)]))
    }

    pub fn from_map(map: BTreeMap<Variable, LinkLevel>) -> Self {
        LinkedVariables::Resolved(map)
    }

    pub fn is_not_yet_set(&self) -> bool {
        matches!(self, LinkedVariables::NotYetSet)
    }

    /// The marker counts as delayed.
    pub fn is_delayed(&self) -> bool {
        match self {
            LinkedVariables::NotYetSet => true,
            LinkedVariables::Resolved(map) => map.values().any(LinkLevel::is_delayed),
        }
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        matches!(self, LinkedVariables::Resolved(map) if map.contains_key(variable))
    }

    fn resolved(&self, operation: &'static str) -> Result<&BTreeMap<Variable, LinkLevel>, GraphError> {
        match self {
            LinkedVariables::Resolved(map) => Ok(map),
            LinkedVariables::NotYetSet => Err(GraphError::NotYetSet { operation }),
        }
    }

    pub fn value(&self, variable: &Variable) -> Result<Option<&LinkLevel>, GraphError> {
        Ok(self.resolved("value")?.get(variable))
    }

    pub fn len(&self) -> Result<usize, GraphError> {
        Ok(self.resolved("len")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, GraphError> {
        Ok(self.resolved("is_empty")?.is_empty())
    }

    pub fn iter(&self) -> Result<impl Iterator<Item = (&Variable, &LinkLevel)>, GraphError> {
        Ok(self.resolved("iter")?.iter())
    }

    /// The `index`-th level, ordering entries by simple name and rank.
    pub fn select(&self, index: usize) -> Result<&LinkLevel, GraphError> {
        let map = self.resolved("select")?;
        let mut entries: Vec<(String, &LinkLevel)> = map
            .iter()
            .map(|(v, level)| (format!("{}:{}", v.simple_name(), level.value()), level))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
            .get(index)
            .map(|(_, level)| *level)
            .ok_or(GraphError::SelectOutOfRange {
                index,
                len: entries.len(),
            })
    }

    /// Combine with `other`, raising each of its levels to at least
    /// `minimum`. Once statically assigned, always statically assigned.
    pub fn merge(&self, other: &LinkedVariables, minimum: Option<&LinkLevel>) -> LinkedVariables {
        let (LinkedVariables::Resolved(mine), LinkedVariables::Resolved(theirs)) = (self, other) else {
            return LinkedVariables::NotYetSet;
        };
        let mut map = mine.clone();
        for (variable, level) in theirs {
            let new_value = match minimum {
                Some(minimum) => level.max(minimum),
                None => level.clone(),
            };
            let merged = match map.get(variable) {
                None => new_value,
                Some(LinkLevel::StaticallyAssigned) => LinkLevel::StaticallyAssigned,
                Some(_) if new_value == LinkLevel::StaticallyAssigned => LinkLevel::StaticallyAssigned,
                Some(existing) => new_value.min(existing),
            };
            map.insert(variable.clone(), merged);
        }
        LinkedVariables::Resolved(map)
    }
}

impl From<BTreeMap<Variable, LinkLevel>> for LinkedVariables {
    fn from(map: BTreeMap<Variable, LinkLevel>) -> Self {
        LinkedVariables::Resolved(map)
    }
}

/// `label:simpleName` pairs sorted by simple name, then fully qualified name.
impl fmt::Display for LinkedVariables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = match self {
            LinkedVariables::NotYetSet => return f.write_str("NOT_YET_SET"),
            LinkedVariables::Resolved(map) => map,
        };
        let mut entries: Vec<(&Variable, &LinkLevel)> = map.iter().collect();
        entries.sort_by(|(a, _), (b, _)| {
            a.simple_name()
                .cmp(b.simple_name())
                .then_with(|| a.fqn().cmp(b.fqn()))
        });
        for (i, (variable, level)) in entries.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{level}:{}", variable.simple_name())?;
        }
        Ok(())
    }
}
