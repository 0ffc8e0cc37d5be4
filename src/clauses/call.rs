//! CALL subqueries and procedure calls.

use std::fmt::Write as _;

use crate::env::Environment;
use crate::error::Result;
use crate::expr::Expr;
use crate::render::{join_lines, pad_block, render_joined, Render};
use crate::types::Variable;

use super::projection::{Projection, ProjectionItem};
use super::slots::{WhereSlot, WithWhere};
use super::{Clause, NextClause};

/// `CALL { ... }` subquery, optionally run in transactions.
///
/// ```text
/// CALL {
///     WITH this0
///     MATCH (this0)-[:ACTED_IN]->(this1)
///     RETURN count(this1) AS var2
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Call {
    body: Box<Clause>,
    import: Option<Projection>,
    in_transactions: Option<Option<Expr>>,
    pub(crate) next: NextClause,
}

impl Call {
    /// Wraps `body` in a CALL subquery.
    #[must_use]
    pub fn new(body: impl Into<Clause>) -> Self {
        Call {
            body: Box::new(body.into()),
            import: None,
            in_transactions: None,
            next: NextClause::default(),
        }
    }

    /// Imports outer variables with a leading `WITH`.
    pub fn import_with<I, P>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProjectionItem>,
    {
        let import = self.import.get_or_insert_with(Projection::default);
        for column in columns {
            import.push(column.into());
        }
        self
    }

    /// Imports every outer variable: `WITH *`.
    pub fn import_all(&mut self) -> &mut Self {
        self.import
            .get_or_insert_with(Projection::default)
            .set_star();
        self
    }

    /// `IN TRANSACTIONS [OF n ROWS]`
    pub fn in_transactions(&mut self, rows: Option<Expr>) -> &mut Self {
        self.in_transactions = Some(rows);
        self
    }
}

impl From<Clause> for Call {
    fn from(body: Clause) -> Self {
        Call::new(body)
    }
}

impl Render for Call {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let import = match &self.import {
            Some(projection) => format!("WITH {}", projection.render(env)?),
            None => String::new(),
        };
        let body = join_lines([import, self.body.render(env)?]);

        let mut text = format!("CALL {{\n{}\n}}", pad_block(&body));
        if let Some(rows) = &self.in_transactions {
            text.push_str(" IN TRANSACTIONS");
            if let Some(rows) = rows {
                let _ = write!(text, " OF {} ROWS", rows.render(env)?);
            }
        }
        Ok(format!("{text}{}", self.next.render(env)?))
    }
}

/// `CALL name(args) YIELD col AS alias` with an optional WHERE.
#[derive(Debug, Clone)]
pub struct CallProcedure {
    name: String,
    args: Vec<Expr>,
    yields: Vec<(String, Option<Variable>)>,
    where_: WhereSlot,
    pub(crate) next: NextClause,
}

impl CallProcedure {
    /// Calls procedure `name` with `args`. The name is rendered verbatim.
    #[must_use]
    pub fn new<I>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        CallProcedure {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            yields: Vec::new(),
            where_: WhereSlot::default(),
            next: NextClause::default(),
        }
    }

    /// Yields a result column under its own name.
    pub fn yield_(&mut self, column: impl Into<String>) -> &mut Self {
        self.yields.push((column.into(), None));
        self
    }

    /// Yields a result column bound to `alias`.
    pub fn yield_as(&mut self, column: impl Into<String>, alias: &Variable) -> &mut Self {
        self.yields.push((column.into(), Some(alias.clone())));
        self
    }
}

impl From<&str> for CallProcedure {
    fn from(name: &str) -> Self {
        CallProcedure::new(name, Vec::<Expr>::new())
    }
}

impl WithWhere for CallProcedure {
    fn where_slot(&mut self) -> &mut WhereSlot {
        &mut self.where_
    }
}

impl Render for CallProcedure {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let mut call = format!("CALL {}({})", self.name, render_joined(&self.args, env, ", ")?);
        if !self.yields.is_empty() {
            let mut columns = Vec::with_capacity(self.yields.len());
            for (column, alias) in &self.yields {
                let column = env.escape_identifier(column).into_owned();
                match alias {
                    Some(alias) => columns.push(format!("{column} AS {}", env.resolve(alias))),
                    None => columns.push(column),
                }
            }
            call.push_str(" YIELD ");
            call.push_str(&columns.join(", "));
        }
        let body = join_lines([call, self.where_.render(env)?]);
        Ok(format!("{body}{}", self.next.render(env)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clauses::{Chainable, Match, Return};
    use crate::config::BuildConfig;
    use crate::expr::count;
    use crate::pattern::{Pattern, RelationshipPattern};

    fn render(clause: &impl Render) -> String {
        let mut env = Environment::new(&BuildConfig::default());
        clause.render(&mut env).unwrap()
    }

    #[test]
    fn test_call_subquery_with_import() {
        let actor = Variable::node();
        let movie = Variable::node();
        let total = Variable::named("total");

        let mut inner = Match::new(
            Pattern::new(&actor)
                .related(RelationshipPattern::anonymous().rel_type("ACTED_IN"))
                .to(&movie),
        );
        inner.return_((count(&movie), &total)).unwrap();

        let mut call = Call::new(inner);
        call.import_with([&actor]);
        assert_eq!(
            render(&call),
            "CALL {\n    WITH this0\n    MATCH (this0)-[:ACTED_IN]->(this1)\n    RETURN count(this1) AS total\n}"
        );
    }

    #[test]
    fn test_call_in_transactions() {
        let node = Variable::node();
        let mut inner = Match::new(&node);
        inner.return_(&node).unwrap();
        let mut call = Call::new(inner);
        call.import_all().in_transactions(Some(Expr::from(100)));
        assert_eq!(
            render(&call),
            "CALL {\n    WITH *\n    MATCH (this0)\n    RETURN this0\n} IN TRANSACTIONS OF 100 ROWS"
        );
    }

    #[test]
    fn test_call_procedure_yield_where() {
        let label = Variable::named("name");
        let mut call = CallProcedure::new("db.labels", Vec::<Expr>::new());
        call.yield_as("label", &label)
            .where_(Expr::from(&label).starts_with("M"));
        call.return_(Return::new([&label])).unwrap();
        assert_eq!(
            render(&call),
            "CALL db.labels() YIELD label AS name\nWHERE name STARTS WITH \"M\"\nRETURN name"
        );
    }

    #[test]
    fn test_call_procedure_args() {
        let call = CallProcedure::new("apoc.util.sleep", [1000]);
        assert_eq!(render(&call), "CALL apoc.util.sleep(1000)");
    }
}
