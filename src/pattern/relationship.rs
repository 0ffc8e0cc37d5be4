//! Relationship patterns: `-[this1:ACTED_IN*1..3]->`.

use crate::env::Environment;
use crate::error::Result;
use crate::expr::{Expr, MapExpr};
use crate::render::Render;
use crate::types::Variable;

/// Arrow direction of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// `-[]->`
    #[default]
    Right,
    /// `<-[]-`
    Left,
    /// `-[]-`
    Undirected,
}

impl Direction {
    fn arrows(self) -> (&'static str, &'static str) {
        match self {
            Direction::Right => ("-", "->"),
            Direction::Left => ("<-", "-"),
            Direction::Undirected => ("-", "-"),
        }
    }
}

/// Variable-length bound of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathLength {
    /// `*`
    Any,
    /// `*n`
    Exact(u32),
    /// `*min..max`, either side may be open. Both open renders `*`.
    Range { min: Option<u32>, max: Option<u32> },
}

impl PathLength {
    /// `*min..max`
    #[must_use]
    pub fn between(min: u32, max: u32) -> Self {
        PathLength::Range {
            min: Some(min),
            max: Some(max),
        }
    }

    /// `*min..`
    #[must_use]
    pub fn at_least(min: u32) -> Self {
        PathLength::Range {
            min: Some(min),
            max: None,
        }
    }

    /// `*..max`
    #[must_use]
    pub fn at_most(max: u32) -> Self {
        PathLength::Range {
            min: None,
            max: Some(max),
        }
    }

    fn token(self) -> String {
        let bound = |b: Option<u32>| b.map(|n| n.to_string()).unwrap_or_default();
        match self {
            PathLength::Exact(n) => format!("*{n}"),
            PathLength::Any | PathLength::Range { min: None, max: None } => "*".to_string(),
            PathLength::Range { min, max } => format!("*{}..{}", bound(min), bound(max)),
        }
    }
}

/// A relationship element of a pattern.
#[derive(Debug, Clone, Default)]
pub struct RelationshipPattern {
    variable: Option<Variable>,
    types: Vec<String>,
    direction: Direction,
    length: Option<PathLength>,
    properties: Option<MapExpr>,
    predicate: Option<Expr>,
}

impl RelationshipPattern {
    /// Creates a relationship pattern bound to `variable`.
    #[must_use]
    pub fn new(variable: &Variable) -> Self {
        RelationshipPattern {
            variable: Some(variable.clone()),
            ..Self::default()
        }
    }

    /// Creates a relationship pattern without a variable: `-[]->`.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Adds a type; a relationship matches any of its types.
    #[must_use]
    pub fn rel_type(mut self, rel_type: impl Into<String>) -> Self {
        self.types.push(rel_type.into());
        self
    }

    /// Adds several types.
    #[must_use]
    pub fn rel_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.extend(types.into_iter().map(Into::into));
        self
    }

    /// Sets the arrow direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Makes the relationship variable-length.
    #[must_use]
    pub fn length(mut self, length: PathLength) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the inline property map.
    #[must_use]
    pub fn properties(mut self, properties: impl Into<MapExpr>) -> Self {
        self.properties = Some(properties.into());
        self
    }

    /// Sets the inline WHERE predicate.
    #[must_use]
    pub fn where_(mut self, predicate: impl Into<Expr>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    /// Returns the bound variable, if any.
    #[must_use]
    pub fn variable(&self) -> Option<&Variable> {
        self.variable.as_ref()
    }
}

impl From<&Variable> for RelationshipPattern {
    fn from(variable: &Variable) -> Self {
        RelationshipPattern::new(variable)
    }
}

impl From<Variable> for RelationshipPattern {
    fn from(variable: Variable) -> Self {
        RelationshipPattern {
            variable: Some(variable),
            ..Self::default()
        }
    }
}

impl Render for RelationshipPattern {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let (left, right) = self.direction.arrows();
        let mut inner = String::new();
        if let Some(variable) = &self.variable {
            inner.push_str(&env.resolve(variable));
        }
        inner.push_str(&env.render_types(&self.types));
        if let Some(length) = self.length {
            inner.push_str(&length.token());
        }
        if let Some(predicate) = &self.predicate {
            inner.push_str(" WHERE ");
            inner.push_str(&predicate.render(env)?);
        }
        if let Some(properties) = &self.properties {
            inner.push(' ');
            inner.push_str(&properties.render(env)?);
        }
        Ok(format!("{left}[{}]{right}", inner.trim_start()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;

    fn render(rel: &RelationshipPattern) -> String {
        let mut env = Environment::new(&BuildConfig::default());
        rel.render(&mut env).unwrap()
    }

    #[test]
    fn test_empty_relationship() {
        assert_eq!(render(&RelationshipPattern::anonymous()), "-[]->");
    }

    #[test]
    fn test_directions() {
        let rel = Variable::relationship();
        let base = RelationshipPattern::new(&rel).rel_type("ACTED_IN");
        assert_eq!(render(&base.clone()), "-[this0:ACTED_IN]->");
        assert_eq!(render(&base.clone().direction(Direction::Left)), "<-[this0:ACTED_IN]-");
        assert_eq!(render(&base.direction(Direction::Undirected)), "-[this0:ACTED_IN]-");
    }

    #[test]
    fn test_types_joined_with_pipe() {
        let rel = RelationshipPattern::anonymous().rel_types(["ACTED_IN", "DIRECTED"]);
        assert_eq!(render(&rel), "-[:ACTED_IN|DIRECTED]->");
    }

    #[test]
    fn test_lengths() {
        let rel = RelationshipPattern::anonymous();
        assert_eq!(render(&rel.clone().length(PathLength::Any)), "-[*]->");
        assert_eq!(render(&rel.clone().length(PathLength::Exact(2))), "-[*2]->");
        assert_eq!(render(&rel.clone().length(PathLength::between(1, 3))), "-[*1..3]->");
        assert_eq!(render(&rel.clone().length(PathLength::at_least(2))), "-[*2..]->");
        assert_eq!(render(&rel.clone().length(PathLength::at_most(4))), "-[*..4]->");
        let open = PathLength::Range { min: None, max: None };
        assert_eq!(render(&rel.length(open)), "-[*]->");
    }

    #[test]
    fn test_where_before_properties() {
        let rel = Variable::relationship();
        let pattern = RelationshipPattern::new(&rel)
            .rel_type("RATED")
            .properties(MapExpr::new().set("stars", 5))
            .where_(rel.property("since").gt(2000));
        assert_eq!(
            render(&pattern),
            "-[this0:RATED WHERE this0.since > 2000 { stars: 5 }]->"
        );
    }
}
