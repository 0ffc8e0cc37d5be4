//! Function calls.
//!
//! The generic [`FunctionCall`] covers every Cypher function. A handful of
//! common helpers are provided on top of it.

use crate::env::Environment;
use crate::error::{CypherError, Result};
use crate::render::{render_joined, Render};

use super::Expr;

#[derive(Debug, Clone)]
enum FunctionArgs {
    Exprs(Vec<Expr>),
    /// `count(*)`
    Star,
}

/// `name(arg, ...)`, `name(DISTINCT arg)` or `name(*)`.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    name: String,
    args: FunctionArgs,
    distinct: bool,
}

impl FunctionCall {
    /// Creates a call with expression arguments.
    ///
    /// The name is rendered verbatim, so namespaced names such as
    /// `apoc.coll.sum` work as-is.
    #[must_use]
    pub fn new<I>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        FunctionCall {
            name: name.into(),
            args: FunctionArgs::Exprs(args.into_iter().map(Into::into).collect()),
            distinct: false,
        }
    }

    /// Creates a star-argument call such as `count(*)`.
    #[must_use]
    pub fn star(name: impl Into<String>) -> Self {
        FunctionCall {
            name: name.into(),
            args: FunctionArgs::Star,
            distinct: false,
        }
    }

    /// Applies DISTINCT to the arguments.
    ///
    /// # Errors
    ///
    /// Returns `DistinctStarArgument` for star-argument calls.
    pub fn distinct(mut self) -> Result<Self> {
        if matches!(self.args, FunctionArgs::Star) {
            return Err(CypherError::DistinctStarArgument {
                function: self.name,
            });
        }
        self.distinct = true;
        Ok(self)
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if this is a star-argument call.
    #[must_use]
    pub fn is_star(&self) -> bool {
        matches!(self.args, FunctionArgs::Star)
    }
}

impl Render for FunctionCall {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let args = match &self.args {
            FunctionArgs::Star => "*".to_string(),
            FunctionArgs::Exprs(args) => render_joined(args, env, ", ")?,
        };
        let distinct = if self.distinct { "DISTINCT " } else { "" };
        Ok(format!("{}({distinct}{args})", self.name))
    }
}

/// `count(expr)`
pub fn count(expr: impl Into<Expr>) -> FunctionCall {
    FunctionCall::new("count", [expr.into()])
}

/// `count(*)`
pub fn count_star() -> FunctionCall {
    FunctionCall::star("count")
}

/// `collect(expr)`
pub fn collect(expr: impl Into<Expr>) -> FunctionCall {
    FunctionCall::new("collect", [expr.into()])
}

/// `size(expr)`
pub fn size(expr: impl Into<Expr>) -> FunctionCall {
    FunctionCall::new("size", [expr.into()])
}

/// `coalesce(a, b, ...)`
pub fn coalesce<I>(exprs: I) -> FunctionCall
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    FunctionCall::new("coalesce", exprs)
}
