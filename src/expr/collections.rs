//! Maps, lists and property access.

use crate::env::Environment;
use crate::error::Result;
use crate::render::{render_joined, Render};

use super::Expr;

/// A map expression: `{ key: value, ... }`.
///
/// Keys keep insertion order. Setting an existing key replaces its value in
/// place.
#[derive(Debug, Clone, Default)]
pub struct MapExpr {
    entries: Vec<(String, Expr)>,
}

impl MapExpr {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces an entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Expr>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for MapExpr
where
    K: Into<String>,
    V: Into<Expr>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MapExpr::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Render for MapExpr {
    fn render(&self, env: &mut Environment) -> Result<String> {
        if self.entries.is_empty() {
            return Ok("{}".to_string());
        }
        let mut parts = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            let value = value.render(env)?;
            parts.push(format!("{}: {value}", env.escape_property(key)));
        }
        Ok(format!("{{ {} }}", parts.join(", ")))
    }
}

/// Access path applied to a base expression.
#[derive(Debug, Clone)]
pub enum PropertyKey {
    /// `base.key`
    Name(String),
    /// `base[index]`
    Index(Expr),
}

/// Property or index access on an expression: `this0.title`, `list[0]`.
#[derive(Debug, Clone)]
pub struct PropertyRef {
    base: Expr,
    key: PropertyKey,
}

impl PropertyRef {
    /// Creates a `.key` access.
    #[must_use]
    pub fn name(base: impl Into<Expr>, key: impl Into<String>) -> Self {
        PropertyRef {
            base: base.into(),
            key: PropertyKey::Name(key.into()),
        }
    }

    /// Creates an `[index]` access.
    #[must_use]
    pub fn index(base: impl Into<Expr>, index: impl Into<Expr>) -> Self {
        PropertyRef {
            base: base.into(),
            key: PropertyKey::Index(index.into()),
        }
    }

    /// Returns the base expression.
    #[must_use]
    pub fn base(&self) -> &Expr {
        &self.base
    }

    /// Returns the access key.
    #[must_use]
    pub fn key(&self) -> &PropertyKey {
        &self.key
    }
}

impl Render for PropertyRef {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let base = self.base.render(env)?;
        match &self.key {
            PropertyKey::Name(name) => Ok(format!("{base}.{}", env.escape_property(name))),
            PropertyKey::Index(index) => Ok(format!("{base}[{}]", index.render(env)?)),
        }
    }
}

pub(super) fn render_list(items: &[Expr], env: &mut Environment) -> Result<String> {
    Ok(format!("[{}]", render_joined(items, env, ", ")?))
}
