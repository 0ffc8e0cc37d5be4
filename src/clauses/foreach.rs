//! FOREACH.

use crate::env::Environment;
use crate::error::Result;
use crate::expr::Expr;
use crate::render::{pad_block, Render};
use crate::types::Variable;

use super::{Clause, NextClause};

/// `FOREACH (<variable> IN <list> | <updates>)`
#[derive(Debug, Clone)]
pub struct Foreach {
    variable: Variable,
    list: Expr,
    body: Box<Clause>,
    pub(crate) next: NextClause,
}

impl Foreach {
    /// Runs `body` once for every element of `list`, bound to `variable`.
    #[must_use]
    pub fn new(variable: &Variable, list: impl Into<Expr>, body: impl Into<Clause>) -> Self {
        Foreach {
            variable: variable.clone(),
            list: list.into(),
            body: Box::new(body.into()),
            next: NextClause::default(),
        }
    }
}

impl Render for Foreach {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let variable = env.resolve(&self.variable);
        let list = self.list.render(env)?;
        let body = self.body.render(env)?;
        Ok(format!(
            "FOREACH ({variable} IN {list} |\n{}\n){}",
            pad_block(&body),
            self.next.render(env)?
        ))
    }
}
