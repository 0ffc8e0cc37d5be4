//! Build configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operator placed between labels of a node pattern or label predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelOperator {
    /// `:A:B`
    #[default]
    #[serde(rename = ":")]
    Colon,
    /// `:A&B`
    #[serde(rename = "&")]
    Ampersand,
}

impl LabelOperator {
    /// Returns the separator token.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            LabelOperator::Colon => ":",
            LabelOperator::Ampersand => "&",
        }
    }
}

/// Prefixes prepended to every generated name.
///
/// Named variables and named parameters are never prefixed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvPrefix {
    /// Prefix for generated variable names (`this0`, `var1`, ...).
    pub variables: String,
    /// Prefix for generated parameter names (`param0`, ...).
    pub params: String,
}

impl EnvPrefix {
    /// Uses the same prefix for variables and parameters.
    #[must_use]
    pub fn uniform(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            variables: prefix.clone(),
            params: prefix,
        }
    }
}

impl From<&str> for EnvPrefix {
    fn from(prefix: &str) -> Self {
        Self::uniform(prefix)
    }
}

impl From<String> for EnvPrefix {
    fn from(prefix: String) -> Self {
        Self::uniform(prefix)
    }
}

/// Opt-outs for automatic escaping.
///
/// When a flag is set, the caller is responsible for escaping the
/// corresponding identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnsafeEscapeOptions {
    /// Render node labels verbatim.
    pub disable_node_label_escaping: bool,
    /// Render relationship types verbatim.
    pub disable_relationship_type_escaping: bool,
}

/// Configuration for a single `build` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Cypher version emitted as a `CYPHER <version>` header line.
    pub cypher_version: Option<String>,
    /// Global prefix for generated names.
    pub prefix: EnvPrefix,
    /// Parameters merged into the output under their given names.
    pub extra_params: BTreeMap<String, Value>,
    /// Separator between multiple labels.
    pub label_operator: LabelOperator,
    /// Escaping opt-outs.
    pub unsafe_escape: UnsafeEscapeOptions,
    /// Identifiers escaped in addition to the built-in reserved words.
    pub extra_reserved_words: Vec<String>,
}

impl BuildConfig {
    /// Creates a default build configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Cypher version header.
    #[must_use]
    pub fn with_cypher_version(mut self, version: impl Into<String>) -> Self {
        self.cypher_version = Some(version.into());
        self
    }

    /// Sets the global name prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<EnvPrefix>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Adds an extra parameter.
    #[must_use]
    pub fn with_extra_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_params.insert(name.into(), value.into());
        self
    }

    /// Adds several extra parameters.
    #[must_use]
    pub fn with_extra_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.extra_params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the label separator.
    #[must_use]
    pub fn with_label_operator(mut self, operator: LabelOperator) -> Self {
        self.label_operator = operator;
        self
    }

    /// Sets the escaping opt-outs.
    #[must_use]
    pub fn with_unsafe_escape(mut self, options: UnsafeEscapeOptions) -> Self {
        self.unsafe_escape = options;
        self
    }

    /// Adds a reserved word that always gets escaped.
    #[must_use]
    pub fn with_reserved_word(mut self, word: impl Into<String>) -> Self {
        self.extra_reserved_words.push(word.into());
        self
    }
}
