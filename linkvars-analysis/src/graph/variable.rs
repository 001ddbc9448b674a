//! Graph nodes.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// What a variable stands for. Only the return value is treated specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariableKind {
    Local,
    Field,
    This,
    ReturnValue,
}

/// A variable of the analyzed scope, identified by its fully qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    fqn: Arc<str>,
    simple_name: Arc<str>,
    kind: VariableKind,
}

impl Variable {
    pub fn new(fqn: impl Into<Arc<str>>, simple_name: impl Into<Arc<str>>, kind: VariableKind) -> Self {
        Self {
            fqn: fqn.into(),
            simple_name: simple_name.into(),
            kind,
        }
    }

    /// Simple name is the last `.`-separated segment of `fqn`.
    pub fn with_kind(fqn: &str, kind: VariableKind) -> Self {
        let simple = fqn.rsplit('.').next().unwrap_or(fqn);
        Self::new(fqn, simple, kind)
    }

    pub fn local(fqn: &str) -> Self {
        Self::with_kind(fqn, VariableKind::Local)
    }

    pub fn field(fqn: &str) -> Self {
        Self::with_kind(fqn, VariableKind::Field)
    }

    pub fn this(fqn: &str) -> Self {
        Self::with_kind(fqn, VariableKind::This)
    }

    pub fn return_value(fqn: &str) -> Self {
        Self::with_kind(fqn, VariableKind::ReturnValue)
    }

    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn is_return_value(&self) -> bool {
        self.kind == VariableKind::ReturnValue
    }
}

/// Compare two strings starting from their last character. Fully qualified
/// names share long prefixes, so this settles most comparisons early.
pub fn reverse_str_cmp(a: &str, b: &str) -> Ordering {
    a.chars().rev().cmp(b.chars().rev())
}

/// Node order of the closure arena: reverse comparison of the fully
/// qualified name, then kind and simple name.
impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        reverse_str_cmp(&self.fqn, &other.fqn)
            .then(self.kind.cmp(&other.kind))
            .then_with(|| self.simple_name.cmp(&other.simple_name))
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqn)
    }
}
