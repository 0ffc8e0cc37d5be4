//! CASE expressions.

use crate::env::Environment;
use crate::error::{CypherError, Result};
use crate::render::{join_lines, pad_block, Render};

use super::Expr;

#[derive(Debug, Clone)]
struct When {
    predicate: Expr,
    result: Option<Expr>,
}

/// Generic or simple CASE expression.
///
/// Branches are recorded as they are added; a WHEN without THEN is only
/// reported when the expression is rendered.
///
/// ```text
/// CASE this0.rating
///     WHEN 5 THEN "great"
///     ELSE "ok"
/// END
/// ```
#[derive(Debug, Clone, Default)]
pub struct Case {
    comparator: Option<Expr>,
    branches: Vec<When>,
    default: Option<Expr>,
}

impl Case {
    /// Creates a generic CASE, each WHEN is a predicate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simple CASE comparing `comparator` against each WHEN value.
    #[must_use]
    pub fn with_comparator(comparator: impl Into<Expr>) -> Self {
        Case {
            comparator: Some(comparator.into()),
            ..Self::default()
        }
    }

    /// Starts a new WHEN branch.
    #[must_use]
    pub fn when(mut self, predicate: impl Into<Expr>) -> Self {
        self.branches.push(When {
            predicate: predicate.into(),
            result: None,
        });
        self
    }

    /// Sets the result of the last WHEN branch. No-op without a branch.
    #[must_use]
    pub fn then(mut self, result: impl Into<Expr>) -> Self {
        if let Some(branch) = self.branches.last_mut() {
            branch.result = Some(result.into());
        }
        self
    }

    /// Sets the ELSE result.
    #[must_use]
    pub fn else_(mut self, default: impl Into<Expr>) -> Self {
        self.default = Some(default.into());
        self
    }
}

impl Render for Case {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let mut header = String::from("CASE");
        if let Some(comparator) = &self.comparator {
            header.push(' ');
            header.push_str(&comparator.render(env)?);
        }

        let mut lines = Vec::with_capacity(self.branches.len() + 1);
        for branch in &self.branches {
            let result = branch.result.as_ref().ok_or(CypherError::CaseWithoutThen)?;
            let predicate = branch.predicate.render(env)?;
            let result = result.render(env)?;
            lines.push(format!("WHEN {predicate} THEN {result}"));
        }
        if let Some(default) = &self.default {
            lines.push(format!("ELSE {}", default.render(env)?));
        }

        Ok(join_lines([header, pad_block(&lines.join("\n")), "END".to_string()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::types::Variable;

    #[test]
    fn test_generic_case() {
        let mut env = Environment::new(&BuildConfig::default());
        let node = Variable::node();
        let case = Case::new()
            .when(node.property("age").lt(18))
            .then("minor")
            .else_("adult");

        assert_eq!(
            case.render(&mut env).unwrap(),
            "CASE\n    WHEN this0.age < 18 THEN \"minor\"\n    ELSE \"adult\"\nEND"
        );
    }

    #[test]
    fn test_simple_case() {
        let mut env = Environment::new(&BuildConfig::default());
        let node = Variable::node();
        let case = Case::with_comparator(node.property("rating"))
            .when(5)
            .then("great")
            .when(1)
            .then("bad");

        assert_eq!(
            case.render(&mut env).unwrap(),
            "CASE this0.rating\n    WHEN 5 THEN \"great\"\n    WHEN 1 THEN \"bad\"\nEND"
        );
    }

    #[test]
    fn test_when_without_then_fails_at_render() {
        let case = Case::new().when(true);
        let mut env = Environment::new(&BuildConfig::default());
        let err = case.render(&mut env).unwrap_err();
        assert_eq!(err.to_string(), "Cannot generate CASE ... WHEN statement without THEN");
    }

    #[test]
    fn test_case_without_branches_has_no_blank_line() {
        let mut env = Environment::new(&BuildConfig::default());
        assert_eq!(Case::new().render(&mut env).unwrap(), "CASE\nEND");
        assert_eq!(
            Case::new().else_(1).render(&mut env).unwrap(),
            "CASE\n    ELSE 1\nEND"
        );
    }
}
