//! Subquery expressions and list comprehensions.

use crate::clauses::Clause;
use crate::env::Environment;
use crate::error::Result;
use crate::pattern::PathPattern;
use crate::render::{pad_block, Render};
use crate::types::Variable;

use super::Expr;

/// Keyword of a subquery expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubqueryKind {
    /// `EXISTS { ... }`
    Exists,
    /// `COUNT { ... }`
    Count,
    /// `COLLECT { ... }`
    Collect,
}

impl SubqueryKind {
    fn keyword(self) -> &'static str {
        match self {
            SubqueryKind::Exists => "EXISTS",
            SubqueryKind::Count => "COUNT",
            SubqueryKind::Collect => "COLLECT",
        }
    }
}

/// Body of a subquery expression.
#[derive(Debug, Clone)]
pub enum SubqueryBody {
    /// A bare pattern: `EXISTS { (this0)-[:ACTED_IN]->(this1) }`.
    Pattern(PathPattern),
    /// A full clause chain.
    Query(Box<Clause>),
}

impl From<PathPattern> for SubqueryBody {
    fn from(pattern: PathPattern) -> Self {
        SubqueryBody::Pattern(pattern)
    }
}

impl From<crate::pattern::Pattern> for SubqueryBody {
    fn from(pattern: crate::pattern::Pattern) -> Self {
        SubqueryBody::Pattern(pattern.into())
    }
}

impl From<Clause> for SubqueryBody {
    fn from(clause: Clause) -> Self {
        SubqueryBody::Query(Box::new(clause))
    }
}

/// `EXISTS { ... }`, `COUNT { ... }` or `COLLECT { ... }`.
#[derive(Debug, Clone)]
pub struct SubqueryExpr {
    kind: SubqueryKind,
    body: SubqueryBody,
}

impl SubqueryExpr {
    /// Creates a subquery expression.
    #[must_use]
    pub fn new(kind: SubqueryKind, body: impl Into<SubqueryBody>) -> Self {
        SubqueryExpr {
            kind,
            body: body.into(),
        }
    }
}

impl Render for SubqueryExpr {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let keyword = self.kind.keyword();
        match &self.body {
            SubqueryBody::Pattern(pattern) => Ok(format!("{keyword} {{ {} }}", pattern.render(env)?)),
            SubqueryBody::Query(clause) => {
                let body = clause.render(env)?;
                Ok(format!("{keyword} {{\n{}\n}}", pad_block(&body)))
            }
        }
    }
}

/// `EXISTS { ... }`
pub fn exists(body: impl Into<SubqueryBody>) -> Expr {
    Expr::Subquery(Box::new(SubqueryExpr::new(SubqueryKind::Exists, body)))
}

/// `COUNT { ... }`
pub fn count_subquery(body: impl Into<SubqueryBody>) -> Expr {
    Expr::Subquery(Box::new(SubqueryExpr::new(SubqueryKind::Count, body)))
}

/// `COLLECT { ... }`
pub fn collect_subquery(body: impl Into<SubqueryBody>) -> Expr {
    Expr::Subquery(Box::new(SubqueryExpr::new(SubqueryKind::Collect, body)))
}

/// `[var IN list WHERE predicate | projection]`
#[derive(Debug, Clone)]
pub struct ListComprehension {
    variable: Variable,
    list: Expr,
    filter: Option<Expr>,
    projection: Option<Expr>,
}

impl ListComprehension {
    /// Iterates `variable` over `list`.
    #[must_use]
    pub fn new(variable: &Variable, list: impl Into<Expr>) -> Self {
        ListComprehension {
            variable: variable.clone(),
            list: list.into(),
            filter: None,
            projection: None,
        }
    }

    /// Keeps only items matching `predicate`.
    #[must_use]
    pub fn where_(mut self, predicate: impl Into<Expr>) -> Self {
        self.filter = Some(predicate.into());
        self
    }

    /// Maps each kept item through `projection`.
    #[must_use]
    pub fn map(mut self, projection: impl Into<Expr>) -> Self {
        self.projection = Some(projection.into());
        self
    }
}

impl Render for ListComprehension {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let variable = env.resolve(&self.variable);
        let mut text = format!("[{variable} IN {}", self.list.render(env)?);
        if let Some(filter) = &self.filter {
            text.push_str(" WHERE ");
            text.push_str(&filter.render(env)?);
        }
        if let Some(projection) = &self.projection {
            text.push_str(" | ");
            text.push_str(&projection.render(env)?);
        }
        text.push(']');
        Ok(text)
    }
}
