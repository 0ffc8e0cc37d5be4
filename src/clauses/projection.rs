//! Column lists of RETURN, WITH and CALL import.

use crate::env::Environment;
use crate::error::Result;
use crate::expr::Expr;
use crate::render::Render;
use crate::types::Variable;

/// One projected column: `expr` or `expr AS alias`.
#[derive(Debug, Clone)]
pub struct ProjectionItem {
    expr: Expr,
    alias: Option<Variable>,
}

impl ProjectionItem {
    /// Projects `expr` without an alias.
    #[must_use]
    pub fn new(expr: impl Into<Expr>) -> Self {
        ProjectionItem {
            expr: expr.into(),
            alias: None,
        }
    }

    /// Projects `expr AS alias`.
    #[must_use]
    pub fn aliased(expr: impl Into<Expr>, alias: &Variable) -> Self {
        ProjectionItem {
            expr: expr.into(),
            alias: Some(alias.clone()),
        }
    }
}

impl From<&Variable> for ProjectionItem {
    fn from(variable: &Variable) -> Self {
        ProjectionItem::new(variable)
    }
}

impl From<Variable> for ProjectionItem {
    fn from(variable: Variable) -> Self {
        ProjectionItem::new(variable)
    }
}

impl From<Expr> for ProjectionItem {
    fn from(expr: Expr) -> Self {
        ProjectionItem::new(expr)
    }
}

impl<E: Into<Expr>> From<(E, &Variable)> for ProjectionItem {
    fn from((expr, alias): (E, &Variable)) -> Self {
        ProjectionItem::aliased(expr, alias)
    }
}

impl<E: Into<Expr>> From<(E, &str)> for ProjectionItem {
    fn from((expr, alias): (E, &str)) -> Self {
        ProjectionItem::aliased(expr, &Variable::named(alias))
    }
}

impl Render for ProjectionItem {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let expr = self.expr.render(env)?;
        match &self.alias {
            Some(alias) => {
                let alias = env.resolve(alias);
                if alias == expr {
                    Ok(expr)
                } else {
                    Ok(format!("{expr} AS {alias}"))
                }
            }
            None => Ok(expr),
        }
    }
}

/// A column list with optional `*` and DISTINCT.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    star: bool,
    distinct: bool,
    items: Vec<ProjectionItem>,
}

impl Projection {
    /// Creates a projection of `items`.
    #[must_use]
    pub fn new<I, P>(items: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProjectionItem>,
    {
        Projection {
            items: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Creates `*`.
    #[must_use]
    pub fn star() -> Self {
        Projection {
            star: true,
            ..Self::default()
        }
    }

    pub(crate) fn push(&mut self, item: ProjectionItem) {
        self.items.push(item);
    }

    pub(crate) fn set_star(&mut self) {
        self.star = true;
    }

    pub(crate) fn set_distinct(&mut self) {
        self.distinct = true;
    }

    /// Returns true if neither `*` nor any column is projected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.star && self.items.is_empty()
    }
}

impl Render for Projection {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let mut columns = Vec::with_capacity(self.items.len() + 1);
        if self.star || self.items.is_empty() {
            columns.push("*".to_string());
        }
        for item in &self.items {
            columns.push(item.render(env)?);
        }
        let columns = columns.join(", ");
        if self.distinct {
            Ok(format!("DISTINCT {columns}"))
        } else {
            Ok(columns)
        }
    }
}
