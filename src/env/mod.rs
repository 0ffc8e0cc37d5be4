//! Per-render identifier environment.
//!
//! An [`Environment`] is created for every `build` call. It assigns
//! deterministic names to anonymous variables in first-encounter order and
//! collects the parameters seen during the render walk. It is discarded when
//! the build finishes and never shared between builds.

mod escape;

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::trace;

use crate::config::{BuildConfig, EnvPrefix, LabelOperator, UnsafeEscapeOptions};
use crate::error::Result;
use crate::render::Render;
use crate::types::{Param, VarId, Variable, PARAM_PREFIX};

pub use escape::{
    escape_identifier, escape_identifier_with, escape_string_literal, is_reserved, RESERVED_WORDS,
};

/// Final parameter map returned by `build`.
pub type Params = HashMap<String, Value>;

/// A parameter registered with the environment, in encounter order.
#[derive(Debug, Clone)]
struct TrackedParam {
    key: String,
    value: Option<Value>,
}

/// Registry of name assignments and collected parameters for one render.
#[derive(Debug)]
pub struct Environment {
    prefix: EnvPrefix,
    label_operator: LabelOperator,
    unsafe_escape: UnsafeEscapeOptions,
    extra_reserved_words: Vec<String>,
    /// Generated names, keyed by identity.
    names: HashMap<VarId, String>,
    /// Number of generated parameter names.
    param_count: usize,
    /// Parameters seen, in registration order.
    params: Vec<TrackedParam>,
    registered: HashSet<VarId>,
}

impl Environment {
    /// Creates an empty environment for one render.
    #[must_use]
    pub fn new(config: &BuildConfig) -> Self {
        Environment {
            prefix: config.prefix.clone(),
            label_operator: config.label_operator,
            unsafe_escape: config.unsafe_escape,
            extra_reserved_words: config.extra_reserved_words.clone(),
            names: HashMap::new(),
            param_count: 0,
            params: Vec::new(),
            registered: HashSet::new(),
        }
    }

    /// Resolves a variable to its name.
    ///
    /// Named variables render their escaped name. Anonymous variables get a
    /// generated name on first lookup and keep it for the rest of the render.
    pub fn resolve(&mut self, variable: &Variable) -> String {
        if let Some(name) = variable.name() {
            return self.escape_identifier(name).into_owned();
        }
        if let Some(name) = self.names.get(&variable.id()) {
            return name.clone();
        }

        // Parameters and variables are numbered in separate sequences.
        let index = self.names.len() - self.param_count;
        let name = format!("{}{}{}", self.prefix.variables, variable.kind().prefix(), index);
        trace!(name = %name, kind = ?variable.kind(), "env.resolve.assign");
        self.names.insert(variable.id(), name.clone());
        name
    }

    /// Resolves a parameter to its placeholder name (without the `$`).
    ///
    /// The parameter is registered for collection the first time it is seen.
    pub fn resolve_param(&mut self, param: &Param) -> String {
        if let Some(name) = param.name() {
            self.track(param.id(), name.to_string(), param.value().cloned());
            return self.escape_identifier(name).into_owned();
        }
        if let Some(name) = self.names.get(&param.id()) {
            return name.clone();
        }

        let name = format!("{}{}{}", self.prefix.params, PARAM_PREFIX, self.param_count);
        self.param_count += 1;
        trace!(name = %name, has_value = param.has_value(), "env.resolve.param");
        self.names.insert(param.id(), name.clone());
        self.track(param.id(), name.clone(), param.value().cloned());
        name
    }

    /// Registers a parameter under a caller-chosen name.
    ///
    /// Does nothing if the same parameter identity is already registered.
    pub fn declare_parameter(&mut self, name: &str, param: &Param) {
        self.track(param.id(), name.to_string(), param.value().cloned());
    }

    fn track(&mut self, id: VarId, key: String, value: Option<Value>) {
        if self.registered.insert(id) {
            self.params.push(TrackedParam { key, value });
        }
    }

    /// Returns `name -> value` for every registered parameter with a value.
    #[must_use]
    pub fn collect_parameters(&self) -> Params {
        self.params
            .iter()
            .filter_map(|p| p.value.as_ref().map(|v| (p.key.clone(), v.clone())))
            .collect()
    }

    /// Number of parameters registered so far.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Renders a node with this environment.
    ///
    /// Intended for raw callbacks that need to embed builder nodes.
    ///
    /// # Errors
    ///
    /// Returns the node's render error.
    pub fn compile(&mut self, node: &dyn Render) -> Result<String> {
        node.render(self)
    }

    /// Escapes a variable name or other identifier.
    #[must_use]
    pub fn escape_identifier<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        escape_identifier_with(identifier, &self.extra_reserved_words)
    }

    /// Escapes a property or map key.
    #[must_use]
    pub fn escape_property<'a>(&self, key: &'a str) -> Cow<'a, str> {
        self.escape_identifier(key)
    }

    /// Escapes a node label unless label escaping is disabled.
    #[must_use]
    pub fn escape_label<'a>(&self, label: &'a str) -> Cow<'a, str> {
        if self.unsafe_escape.disable_node_label_escaping {
            Cow::Borrowed(label)
        } else {
            self.escape_identifier(label)
        }
    }

    /// Escapes a relationship type unless type escaping is disabled.
    #[must_use]
    pub fn escape_type<'a>(&self, rel_type: &'a str) -> Cow<'a, str> {
        if self.unsafe_escape.disable_relationship_type_escaping {
            Cow::Borrowed(rel_type)
        } else {
            self.escape_identifier(rel_type)
        }
    }

    /// Renders `:A:B` (or `:A&B`) for a label list; empty for no labels.
    #[must_use]
    pub fn render_labels(&self, labels: &[String]) -> String {
        if labels.is_empty() {
            return String::new();
        }
        let escaped: Vec<Cow<'_, str>> = labels.iter().map(|l| self.escape_label(l)).collect();
        format!(":{}", escaped.join(self.label_operator.token()))
    }

    /// Renders `:A|B` for a relationship type list; empty for no types.
    #[must_use]
    pub fn render_types(&self, types: &[String]) -> String {
        if types.is_empty() {
            return String::new();
        }
        let escaped: Vec<Cow<'_, str>> = types.iter().map(|t| self.escape_type(t)).collect();
        format!(":{}", escaped.join("|"))
    }
}
