//! Build entrypoint: render a tree into query text plus parameters.

use std::ops::{Deref, DerefMut};

use serde::Serialize;
use tracing::debug;

use crate::clauses::Clause;
use crate::config::BuildConfig;
use crate::env::{Environment, Params};
use crate::error::Result;
use crate::render::Render;
use crate::types::Param;

/// Rendered query text and the parameters it references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildOutput {
    /// Query text, lines joined with `\n`.
    pub cypher: String,
    /// Parameter name (without `$`) to value.
    pub params: Params,
}

/// Root of a query: owns the head clause and, through it, the whole chain.
///
/// Only a `Query` can be built. Chain-extension methods hand out `&mut`
/// borrows of successor clauses, and those cannot be built on their own:
///
/// ```compile_fail
/// use cypher_builder::prelude::*;
///
/// let node = Variable::node();
/// let mut query = Query::new(Match::new(&node));
/// let tail = query.return_(&node).unwrap();
/// tail.build_default();
/// ```
#[derive(Debug, Clone)]
pub struct Query<H = Clause> {
    head: H,
}

impl<H: Render> Query<H> {
    /// Wraps the head clause of a chain.
    #[must_use]
    pub fn new(head: H) -> Self {
        Query { head }
    }

    /// Returns the head clause.
    #[must_use]
    pub fn head(&self) -> &H {
        &self.head
    }

    /// Unwraps the head clause, e.g. to nest it in a subquery or UNION.
    #[must_use]
    pub fn into_head(self) -> H {
        self.head
    }
}

impl<H: Render> From<H> for Query<H> {
    fn from(head: H) -> Self {
        Query::new(head)
    }
}

impl<H> Deref for Query<H> {
    type Target = H;

    fn deref(&self) -> &H {
        &self.head
    }
}

impl<H> DerefMut for Query<H> {
    fn deref_mut(&mut self) -> &mut H {
        &mut self.head
    }
}

/// Renders `root` and every node below it with a fresh environment.
///
/// Extra parameters from the configuration are added under their given names
/// after rendering, and the Cypher version prefix is prepended last.
fn build_root<T: Render + ?Sized>(root: &T, config: &BuildConfig) -> Result<BuildOutput> {
    let mut env = Environment::new(config);
    let mut cypher = root.render(&mut env)?;

    for (name, value) in &config.extra_params {
        env.declare_parameter(name, &Param::named(name.as_str(), value.clone()));
    }
    if let Some(version) = &config.cypher_version {
        cypher = format!("CYPHER {version}\n{cypher}");
    }

    let params = env.collect_parameters();
    debug!(
        lines = cypher.lines().count(),
        params = params.len(),
        bytes = cypher.len(),
        "build.complete"
    );
    Ok(BuildOutput { cypher, params })
}

/// A query that can be built.
pub trait Statement {
    /// Builds with `config`.
    ///
    /// # Errors
    ///
    /// Returns the first render error. The environment is discarded either way.
    fn build(&self, config: &BuildConfig) -> Result<BuildOutput>;

    /// Builds with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns the first render error.
    fn build_default(&self) -> Result<BuildOutput> {
        self.build(&BuildConfig::default())
    }
}

impl<H: Render> Statement for Query<H> {
    fn build(&self, config: &BuildConfig) -> Result<BuildOutput> {
        build_root(&self.head, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clauses::{Chainable, Match};
    use crate::config::EnvPrefix;
    use crate::pattern::NodePattern;
    use crate::types::Variable;
    use serde_json::json;

    #[test]
    fn test_build_simple_match() {
        let node = Variable::node();
        let mut query = Query::new(Match::new(NodePattern::new(&node).label("Movie")));
        query.return_(&node).unwrap();

        let output = query.build_default().unwrap();
        assert_eq!(output.cypher, "MATCH (this0:Movie)\nRETURN this0");
        assert!(output.params.is_empty());
    }

    #[test]
    fn test_build_with_version_prefix_and_extra_params() {
        let node = Variable::node();
        let query = Query::new(Match::new(&node));
        let config = BuildConfig::new()
            .with_cypher_version("5")
            .with_prefix(EnvPrefix::uniform("q_"))
            .with_extra_param("jwt", json!({"sub": "abc"}));

        let output = query.build(&config).unwrap();
        assert_eq!(output.cypher, "CYPHER 5\nMATCH (q_this0)");
        assert_eq!(output.params.get("jwt"), Some(&json!({"sub": "abc"})));
    }

    #[test]
    fn test_build_is_repeatable() {
        let node = Variable::node();
        let mut query = Query::new(Match::new(&node));
        query.return_(&node).unwrap();
        let first = query.build_default().unwrap();
        let second = query.build_default().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_root_renders_chain_extended_through_tail() {
        let node = Variable::node();
        let mut query = Query::new(Match::new(&node));
        let tail = query.with(&node).unwrap();
        tail.return_(&node).unwrap();

        let output = query.build_default().unwrap();
        assert_eq!(output.cypher, "MATCH (this0)\nWITH this0\nRETURN this0");
        assert!(!query.head().is_last());
    }

    #[test]
    fn test_into_head_round_trip() {
        let node = Variable::node();
        let query = Query::from(Match::new(&node));
        let rebuilt = Query::new(query.clone().into_head());
        assert_eq!(
            query.build_default().unwrap(),
            rebuilt.build_default().unwrap()
        );
    }

    #[test]
    fn test_output_serializes() {
        let output = BuildOutput {
            cypher: "RETURN 1".into(),
            params: Params::new(),
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value, json!({"cypher": "RETURN 1", "params": {}}));
    }
}
