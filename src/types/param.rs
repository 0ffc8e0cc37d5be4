//! Query parameters.

use std::sync::Arc;

use serde_json::Value;

use super::variable::VarId;

/// Name prefix for generated parameter names.
pub const PARAM_PREFIX: &str = "param";

/// A parameter slot carrying an optional bound value.
///
/// A parameter with a value is emitted into the parameter map. A parameter
/// bound to JSON `null` renders inline as `NULL` and is never emitted. A
/// placeholder (no value) renders `$name` but is left out of the map, the
/// caller supplies it at execution time.
#[derive(Debug, Clone)]
pub struct Param {
    id: VarId,
    name: Option<Arc<str>>,
    value: Option<Value>,
}

impl Param {
    /// Creates an anonymous parameter bound to `value`.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Param {
            id: VarId::next(),
            name: None,
            value: Some(value.into()),
        }
    }

    /// Creates an anonymous parameter without a value.
    #[must_use]
    pub fn placeholder() -> Self {
        Param {
            id: VarId::next(),
            name: None,
            value: None,
        }
    }

    /// Creates a parameter with an explicit name, bound to `value`.
    #[must_use]
    pub fn named(name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        Param {
            id: VarId::next(),
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    /// Creates a parameter with an explicit name and no value.
    #[must_use]
    pub fn named_placeholder(name: impl Into<Arc<str>>) -> Self {
        Param {
            id: VarId::next(),
            name: Some(name.into()),
            value: None,
        }
    }

    /// Returns the identity of this parameter.
    #[must_use]
    pub fn id(&self) -> VarId {
        self.id
    }

    /// Returns the explicit name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the bound value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Returns true if a value is bound.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Returns true if the bound value is exactly `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.value, Some(Value::Null))
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
