//! Label and relationship-type predicates: `this0:Movie`, `this1:ACTED_IN|DIRECTED`.

use crate::env::Environment;
use crate::error::{CypherError, Result};
use crate::render::Render;
use crate::types::Variable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelKind {
    Labels,
    Types,
}

/// Predicate testing the labels of a node or the type of a relationship.
#[derive(Debug, Clone)]
pub struct LabelPredicate {
    target: Variable,
    names: Vec<String>,
    kind: LabelKind,
}

impl LabelPredicate {
    /// `var:A:B`: node has every label.
    ///
    /// # Errors
    ///
    /// Returns `EmptyLabels` if `labels` is empty.
    pub fn labels<I, S>(target: &Variable, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(target, labels, LabelKind::Labels, "HasLabel")
    }

    /// `var:A|B`: relationship has one of the types.
    ///
    /// # Errors
    ///
    /// Returns `EmptyLabels` if `types` is empty.
    pub fn types<I, S>(target: &Variable, types: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(target, types, LabelKind::Types, "HasType")
    }

    fn build<I, S>(target: &Variable, names: I, kind: LabelKind, what: &'static str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(CypherError::EmptyLabels(what));
        }
        Ok(LabelPredicate {
            target: target.clone(),
            names,
            kind,
        })
    }
}

impl Render for LabelPredicate {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let target = env.resolve(&self.target);
        let names = match self.kind {
            LabelKind::Labels => env.render_labels(&self.names),
            LabelKind::Types => env.render_types(&self.names),
        };
        Ok(format!("{target}{names}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;

    #[test]
    fn test_has_labels() {
        let mut env = Environment::new(&BuildConfig::default());
        let node = Variable::node();
        let pred = LabelPredicate::labels(&node, ["Movie", "Film"]).unwrap();
        assert_eq!(pred.render(&mut env).unwrap(), "this0:Movie:Film");
    }

    #[test]
    fn test_has_types() {
        let mut env = Environment::new(&BuildConfig::default());
        let rel = Variable::relationship();
        let pred = LabelPredicate::types(&rel, ["ACTED_IN", "DIRECTED"]).unwrap();
        assert_eq!(pred.render(&mut env).unwrap(), "this0:ACTED_IN|DIRECTED");
    }

    #[test]
    fn test_empty_labels_rejected() {
        let node = Variable::node();
        let err = LabelPredicate::labels(&node, Vec::<String>::new()).unwrap_err();
        assert_eq!(err, CypherError::EmptyLabels("HasLabel"));
        assert_eq!(err.to_string(), "HasLabel needs at least one label");
    }
}
