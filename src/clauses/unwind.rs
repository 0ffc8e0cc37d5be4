//! UNWIND.

use crate::env::Environment;
use crate::error::Result;
use crate::expr::Expr;
use crate::render::{join_lines, Render};
use crate::types::Variable;

use super::slots::{DeleteSlot, UpdateSlot, WithDelete, WithSetRemove};
use super::NextClause;

/// `UNWIND <list> AS <variable>`
#[derive(Debug, Clone)]
pub struct Unwind {
    list: Expr,
    variable: Variable,
    update: UpdateSlot,
    delete: DeleteSlot,
    pub(crate) next: NextClause,
}

impl Unwind {
    /// Unwinds `list` into `variable`.
    #[must_use]
    pub fn new(list: impl Into<Expr>, variable: &Variable) -> Self {
        Unwind {
            list: list.into(),
            variable: variable.clone(),
            update: UpdateSlot::default(),
            delete: DeleteSlot::default(),
            next: NextClause::default(),
        }
    }
}

impl<E: Into<Expr>> From<(E, &Variable)> for Unwind {
    fn from((list, variable): (E, &Variable)) -> Self {
        Unwind::new(list, variable)
    }
}

impl WithSetRemove for Unwind {
    fn update_slot(&mut self) -> &mut UpdateSlot {
        &mut self.update
    }
}

impl WithDelete for Unwind {
    fn delete_slot(&mut self) -> &mut DeleteSlot {
        &mut self.delete
    }
}

impl Render for Unwind {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let list = self.list.render(env)?;
        let variable = env.resolve(&self.variable);
        let body = join_lines([
            format!("UNWIND {list} AS {variable}"),
            self.update.render(env)?,
            self.delete.render(env)?,
        ]);
        Ok(format!("{body}{}", self.next.render(env)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::types::Param;

    #[test]
    fn test_unwind_param() {
        let mut env = Environment::new(&BuildConfig::default());
        let item = Variable::new();
        let clause = Unwind::new(Param::new(vec![1, 2, 3]), &item);
        assert_eq!(clause.render(&mut env).unwrap(), "UNWIND $param0 AS var0");
        assert_eq!(env.collect_parameters().len(), 1);
    }

    #[test]
    fn test_unwind_from_tuple() {
        let mut env = Environment::new(&BuildConfig::default());
        let item = Variable::named("row");
        let clause = Unwind::from((Expr::list(["a", "b"]), &item));
        assert_eq!(clause.render(&mut env).unwrap(), "UNWIND [\"a\", \"b\"] AS row");
    }
}
