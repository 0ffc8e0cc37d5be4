//! Raw clause text.

use crate::env::Environment;
use crate::error::Result;
use crate::expr::Raw;
use crate::render::Render;

use super::NextClause;

/// A clause made of raw text, chainable like any other clause.
#[derive(Debug, Clone)]
pub struct RawClause {
    raw: Raw,
    pub(crate) next: NextClause,
}

impl RawClause {
    /// Wraps a raw node.
    #[must_use]
    pub fn new(raw: Raw) -> Self {
        RawClause {
            raw,
            next: NextClause::default(),
        }
    }
}

impl From<Raw> for RawClause {
    fn from(raw: Raw) -> Self {
        RawClause::new(raw)
    }
}

impl From<&str> for RawClause {
    fn from(text: &str) -> Self {
        RawClause::new(Raw::new(text))
    }
}

impl From<String> for RawClause {
    fn from(text: String) -> Self {
        RawClause::new(Raw::new(text))
    }
}

impl Render for RawClause {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let text = self.raw.render(env)?;
        let next = self.next.render(env)?;
        if text.is_empty() {
            // Nothing to separate from, drop the leading newline.
            return Ok(next.trim_start_matches('\n').to_string());
        }
        Ok(format!("{text}{next}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clauses::Chainable;
    use crate::config::BuildConfig;
    use crate::types::Variable;

    #[test]
    fn test_raw_clause_chain() {
        let mut env = Environment::new(&BuildConfig::default());
        let node = Variable::node();
        let mut clause = RawClause::from("MATCH (n:Legacy)");
        clause.return_(&node).unwrap();
        assert_eq!(
            clause.render(&mut env).unwrap(),
            "MATCH (n:Legacy)\nRETURN this0"
        );
    }

    #[test]
    fn test_raw_clause_callback() {
        let mut env = Environment::new(&BuildConfig::default());
        let node = Variable::node();
        let captured = node.clone();
        let clause = RawClause::new(Raw::with(move |env| {
            Ok(format!("MATCH ({})", env.compile(&captured)?))
        }));
        assert_eq!(env.resolve(&node), "this0");
        assert_eq!(clause.render(&mut env).unwrap(), "MATCH (this0)");
    }
}
