//! Identity-bearing variables.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_VAR_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a variable or parameter.
///
/// Assigned once at construction. Clones share the id, so a cloned variable
/// is the same variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(u64);

impl VarId {
    pub(crate) fn next() -> Self {
        VarId(NEXT_VAR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a variable refers to. Only affects the generated name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Node variable (`this0`).
    Node,
    /// Relationship variable (`this1`).
    Relationship,
    /// Path variable (`p0`).
    Path,
    /// Any other variable (`var0`).
    Generic,
}

impl VariableKind {
    /// Returns the prefix used when generating a name.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            VariableKind::Node | VariableKind::Relationship => "this",
            VariableKind::Path => "p",
            VariableKind::Generic => "var",
        }
    }
}

/// A variable slot rendered to a generated or explicit name.
///
/// Anonymous variables get a name from the environment the first time they
/// are rendered. Named variables always render their own name.
#[derive(Debug, Clone)]
pub struct Variable {
    id: VarId,
    kind: VariableKind,
    name: Option<Arc<str>>,
}

impl Variable {
    fn anonymous(kind: VariableKind) -> Self {
        Variable {
            id: VarId::next(),
            kind,
            name: None,
        }
    }

    fn with_name(kind: VariableKind, name: impl Into<Arc<str>>) -> Self {
        Variable {
            id: VarId::next(),
            kind,
            name: Some(name.into()),
        }
    }

    /// Creates an anonymous generic variable.
    #[must_use]
    pub fn new() -> Self {
        Self::anonymous(VariableKind::Generic)
    }

    /// Creates an anonymous node variable.
    #[must_use]
    pub fn node() -> Self {
        Self::anonymous(VariableKind::Node)
    }

    /// Creates an anonymous relationship variable.
    #[must_use]
    pub fn relationship() -> Self {
        Self::anonymous(VariableKind::Relationship)
    }

    /// Creates an anonymous path variable.
    #[must_use]
    pub fn path() -> Self {
        Self::anonymous(VariableKind::Path)
    }

    /// Creates a generic variable with an explicit name.
    #[must_use]
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self::with_name(VariableKind::Generic, name)
    }

    /// Creates a node variable with an explicit name.
    #[must_use]
    pub fn named_node(name: impl Into<Arc<str>>) -> Self {
        Self::with_name(VariableKind::Node, name)
    }

    /// Creates a relationship variable with an explicit name.
    #[must_use]
    pub fn named_relationship(name: impl Into<Arc<str>>) -> Self {
        Self::with_name(VariableKind::Relationship, name)
    }

    /// Creates a path variable with an explicit name.
    #[must_use]
    pub fn named_path(name: impl Into<Arc<str>>) -> Self {
        Self::with_name(VariableKind::Path, name)
    }

    /// Returns the identity of this variable.
    #[must_use]
    pub fn id(&self) -> VarId {
        self.id
    }

    /// Returns the variable kind.
    #[must_use]
    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    /// Returns the explicit name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns true if this variable carries an explicit name.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_identity() {
        let a = Variable::node();
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_distinct_instances_differ() {
        let a = Variable::node();
        let b = Variable::node();
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_named_variable() {
        let v = Variable::named_node("movie");
        assert!(v.is_named());
        assert_eq!(v.name(), Some("movie"));
        assert_eq!(v.kind(), VariableKind::Node);
    }

    #[test]
    fn test_kind_prefixes() {
        assert_eq!(VariableKind::Node.prefix(), "this");
        assert_eq!(VariableKind::Relationship.prefix(), "this");
        assert_eq!(VariableKind::Path.prefix(), "p");
        assert_eq!(VariableKind::Generic.prefix(), "var");
    }
}
