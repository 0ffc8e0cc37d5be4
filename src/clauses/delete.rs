//! Standalone DELETE and FINISH.

use crate::env::Environment;
use crate::error::Result;
use crate::expr::Expr;
use crate::render::Render;
use crate::types::Variable;

use super::slots::{DeleteSlot, WithDelete};
use super::NextClause;

/// `DELETE a, b` or `DETACH DELETE a, b` as its own clause.
#[derive(Debug, Clone, Default)]
pub struct Delete {
    targets: DeleteSlot,
    pub(crate) next: NextClause,
}

impl Delete {
    /// `DELETE targets`
    #[must_use]
    pub fn new<I, T>(targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        let mut clause = Delete::default();
        clause.delete(targets);
        clause
    }

    /// `DETACH DELETE targets`
    #[must_use]
    pub fn detach<I, T>(targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        let mut clause = Delete::default();
        clause.detach_delete(targets);
        clause
    }
}

impl From<&Variable> for Delete {
    fn from(target: &Variable) -> Self {
        Delete::new([target])
    }
}

impl WithDelete for Delete {
    fn delete_slot(&mut self) -> &mut DeleteSlot {
        &mut self.targets
    }
}

impl Render for Delete {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let targets = self.targets.render(env)?;
        let next = self.next.render(env)?;
        if targets.is_empty() {
            return Ok(next.strip_prefix('\n').unwrap_or(&next).to_string());
        }
        Ok(format!("{targets}{next}"))
    }
}

/// `FINISH`: ends a query without returning rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct Finish;

impl Render for Finish {
    fn render(&self, _env: &mut Environment) -> Result<String> {
        Ok("FINISH".to_string())
    }
}
