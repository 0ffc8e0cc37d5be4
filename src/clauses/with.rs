//! WITH and RETURN.

use crate::env::Environment;
use crate::error::Result;
use crate::expr::Expr;
use crate::render::{join_lines, Render};
use crate::types::Variable;

use super::projection::{Projection, ProjectionItem};
use super::slots::{OrderSlot, WhereSlot, WithOrder, WithWhere};
use super::NextClause;

/// `WITH <columns>` with ORDER BY/SKIP/LIMIT and WHERE.
#[derive(Debug, Clone, Default)]
pub struct With {
    projection: Projection,
    order: OrderSlot,
    where_: WhereSlot,
    pub(crate) next: NextClause,
}

impl With {
    /// Creates a WITH projecting `columns`.
    #[must_use]
    pub fn new<I, P>(columns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProjectionItem>,
    {
        With {
            projection: Projection::new(columns),
            ..Self::default()
        }
    }

    /// Creates `WITH *`.
    #[must_use]
    pub fn star() -> Self {
        With {
            projection: Projection::star(),
            ..Self::default()
        }
    }

    /// Adds a column.
    pub fn add_column(&mut self, column: impl Into<ProjectionItem>) -> &mut Self {
        self.projection.push(column.into());
        self
    }

    /// Adds `*` in front of the columns.
    pub fn add_star(&mut self) -> &mut Self {
        self.projection.set_star();
        self
    }

    /// `WITH DISTINCT`
    pub fn distinct(&mut self) -> &mut Self {
        self.projection.set_distinct();
        self
    }
}

impl WithWhere for With {
    fn where_slot(&mut self) -> &mut WhereSlot {
        &mut self.where_
    }
}

impl WithOrder for With {
    fn order_slot(&mut self) -> &mut OrderSlot {
        &mut self.order
    }
}

impl Render for With {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let body = join_lines([
            format!("WITH {}", self.projection.render(env)?),
            self.order.render(env)?,
            self.where_.render(env)?,
        ]);
        Ok(format!("{body}{}", self.next.render(env)?))
    }
}

/// `RETURN <columns>` with ORDER BY/SKIP/LIMIT. Always ends a chain.
#[derive(Debug, Clone, Default)]
pub struct Return {
    projection: Projection,
    order: OrderSlot,
}

impl Return {
    /// Creates a RETURN of `columns`.
    #[must_use]
    pub fn new<I, P>(columns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProjectionItem>,
    {
        Return {
            projection: Projection::new(columns),
            order: OrderSlot::default(),
        }
    }

    /// Creates `RETURN *`.
    #[must_use]
    pub fn star() -> Self {
        Return {
            projection: Projection::star(),
            order: OrderSlot::default(),
        }
    }

    /// Adds a column.
    pub fn add_column(&mut self, column: impl Into<ProjectionItem>) -> &mut Self {
        self.projection.push(column.into());
        self
    }

    /// `RETURN DISTINCT`
    pub fn distinct(&mut self) -> &mut Self {
        self.projection.set_distinct();
        self
    }
}

impl WithOrder for Return {
    fn order_slot(&mut self) -> &mut OrderSlot {
        &mut self.order
    }
}

impl Render for Return {
    fn render(&self, env: &mut Environment) -> Result<String> {
        Ok(join_lines([
            format!("RETURN {}", self.projection.render(env)?),
            self.order.render(env)?,
        ]))
    }
}

macro_rules! impl_from_columns {
    ($($clause:ty),*) => {
        $(
            impl From<&Variable> for $clause {
                fn from(variable: &Variable) -> Self {
                    <$clause>::new([variable])
                }
            }

            impl From<Expr> for $clause {
                fn from(expr: Expr) -> Self {
                    <$clause>::new([expr])
                }
            }

            impl From<ProjectionItem> for $clause {
                fn from(item: ProjectionItem) -> Self {
                    <$clause>::new([item])
                }
            }

            impl<E: Into<Expr>> From<(E, &Variable)> for $clause {
                fn from(column: (E, &Variable)) -> Self {
                    <$clause>::new([ProjectionItem::from(column)])
                }
            }

            impl<E: Into<Expr>> From<(E, &str)> for $clause {
                fn from(column: (E, &str)) -> Self {
                    <$clause>::new([ProjectionItem::from(column)])
                }
            }

            impl From<Vec<ProjectionItem>> for $clause {
                fn from(items: Vec<ProjectionItem>) -> Self {
                    <$clause>::new(items)
                }
            }

            impl From<Projection> for $clause {
                fn from(projection: Projection) -> Self {
                    let mut clause = <$clause>::default();
                    clause.projection = projection;
                    clause
                }
            }
        )*
    };
}

impl_from_columns!(With, Return);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clauses::Order;
    use crate::config::BuildConfig;
    use crate::expr::count;

    fn render(clause: &impl Render) -> String {
        let mut env = Environment::new(&BuildConfig::default());
        clause.render(&mut env).unwrap()
    }

    #[test]
    fn test_return_columns_and_order() {
        let movie = Variable::node();
        let mut clause = Return::new([
            ProjectionItem::from(&movie),
            ProjectionItem::from((movie.property("title"), "title")),
        ]);
        clause
            .order_by(movie.property("title"), Order::Desc)
            .skip(5)
            .limit(10);
        assert_eq!(
            render(&clause),
            "RETURN this0, this0.title AS title\nORDER BY this0.title DESC\nSKIP 5\nLIMIT 10"
        );
    }

    #[test]
    fn test_return_star_and_distinct() {
        let mut clause = Return::star();
        clause.distinct();
        assert_eq!(render(&clause), "RETURN DISTINCT *");
    }

    #[test]
    fn test_with_where_after_order() {
        let movie = Variable::node();
        let total = Variable::named("total");
        let mut clause = With::new([ProjectionItem::from(&movie)]);
        clause
            .add_column((count(&movie), &total))
            .order_by(&total, Order::Asc)
            .limit(3)
            .where_(Expr::from(&total).gt(1));
        assert_eq!(
            render(&clause),
            "WITH this0, count(this0) AS total\nORDER BY total ASC\nLIMIT 3\nWHERE total > 1"
        );
    }

    #[test]
    fn test_with_star_and_columns() {
        let x = Variable::named("x");
        let mut clause = With::star();
        clause.add_column(&x).distinct();
        assert_eq!(render(&clause), "WITH DISTINCT *, x");
    }
}
