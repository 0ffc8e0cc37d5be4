//! Node patterns: `(this0:Movie { title: $param0 } WHERE this0.year > 2000)`.

use crate::env::Environment;
use crate::error::Result;
use crate::expr::{Expr, MapExpr};
use crate::render::Render;
use crate::types::Variable;

/// A single node element of a pattern.
#[derive(Debug, Clone, Default)]
pub struct NodePattern {
    variable: Option<Variable>,
    labels: Vec<String>,
    properties: Option<MapExpr>,
    predicate: Option<Expr>,
}

impl NodePattern {
    /// Creates a node pattern bound to `variable`.
    #[must_use]
    pub fn new(variable: &Variable) -> Self {
        NodePattern {
            variable: Some(variable.clone()),
            ..Self::default()
        }
    }

    /// Creates a node pattern without a variable: `()`.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Adds labels; all of them must match.
    #[must_use]
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Adds a single label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Sets the inline property map.
    #[must_use]
    pub fn properties(mut self, properties: impl Into<MapExpr>) -> Self {
        self.properties = Some(properties.into());
        self
    }

    /// Sets the inline WHERE predicate.
    #[must_use]
    pub fn where_(mut self, predicate: impl Into<Expr>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    /// Returns the bound variable, if any.
    #[must_use]
    pub fn variable(&self) -> Option<&Variable> {
        self.variable.as_ref()
    }
}

impl From<&Variable> for NodePattern {
    fn from(variable: &Variable) -> Self {
        NodePattern::new(variable)
    }
}

impl From<Variable> for NodePattern {
    fn from(variable: Variable) -> Self {
        NodePattern {
            variable: Some(variable),
            ..Self::default()
        }
    }
}

impl Render for NodePattern {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let mut text = String::from("(");
        if let Some(variable) = &self.variable {
            text.push_str(&env.resolve(variable));
        }
        text.push_str(&env.render_labels(&self.labels));
        if let Some(properties) = &self.properties {
            text.push(' ');
            text.push_str(&properties.render(env)?);
        }
        if let Some(predicate) = &self.predicate {
            text.push_str(" WHERE ");
            text.push_str(&predicate.render(env)?);
        }
        text.push(')');
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::types::Param;

    fn render(node: &NodePattern) -> String {
        let mut env = Environment::new(&BuildConfig::default());
        node.render(&mut env).unwrap()
    }

    #[test]
    fn test_bare_node() {
        assert_eq!(render(&NodePattern::new(&Variable::node())), "(this0)");
        assert_eq!(render(&NodePattern::anonymous()), "()");
    }

    #[test]
    fn test_node_with_labels_and_properties() {
        let node = NodePattern::new(&Variable::node())
            .labels(["Movie", "Film"])
            .properties(MapExpr::new().set("test", Param::new("v")));
        assert_eq!(render(&node), "(this0:Movie:Film { test: $param0 })");
    }

    #[test]
    fn test_node_with_where() {
        let movie = Variable::node();
        let node = NodePattern::new(&movie)
            .label("Movie")
            .where_(movie.property("year").gt(2000));
        assert_eq!(render(&node), "(this0:Movie WHERE this0.year > 2000)");
    }

    #[test]
    fn test_label_is_escaped() {
        let node = NodePattern::anonymous().label("Old Movie");
        assert_eq!(render(&node), "(:`Old Movie`)");
    }
}
