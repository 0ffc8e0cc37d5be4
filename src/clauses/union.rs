//! UNION and UNION ALL.

use crate::env::Environment;
use crate::error::Result;
use crate::render::{render_joined, Render};

use super::Clause;

/// Full queries combined with `UNION` or `UNION ALL`. Always ends a chain.
#[derive(Debug, Clone)]
pub struct Union {
    queries: Vec<Clause>,
    all: bool,
}

impl Union {
    /// Combines `queries` with `UNION`.
    #[must_use]
    pub fn new<I, C>(queries: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        Union {
            queries: queries.into_iter().map(Into::into).collect(),
            all: false,
        }
    }

    /// Adds another query.
    pub fn push(&mut self, query: impl Into<Clause>) -> &mut Self {
        self.queries.push(query.into());
        self
    }

    /// Switches to `UNION ALL`.
    pub fn all(&mut self) -> &mut Self {
        self.all = true;
        self
    }
}

impl Render for Union {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let separator = if self.all { "\nUNION ALL\n" } else { "\nUNION\n" };
        render_joined(&self.queries, env, separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clauses::{Chainable, Match};
    use crate::config::BuildConfig;
    use crate::pattern::NodePattern;
    use crate::types::Variable;

    fn query(label: &str, out: &Variable) -> Match {
        let node = Variable::node();
        let mut clause = Match::new(NodePattern::new(&node).label(label));
        clause.return_((&node, out)).unwrap();
        clause
    }

    #[test]
    fn test_union() {
        let name = Variable::named("n");
        let union = Union::new([query("Movie", &name), query("Show", &name)]);
        let mut env = Environment::new(&BuildConfig::default());
        assert_eq!(
            union.render(&mut env).unwrap(),
            "MATCH (this0:Movie)\nRETURN this0 AS n\nUNION\nMATCH (this1:Show)\nRETURN this1 AS n"
        );
    }

    #[test]
    fn test_union_all() {
        let name = Variable::named("n");
        let mut union = Union::new([query("Movie", &name)]);
        union.push(query("Show", &name)).all();
        let mut env = Environment::new(&BuildConfig::default());
        assert!(union.render(&mut env).unwrap().contains("\nUNION ALL\n"));
    }
}
