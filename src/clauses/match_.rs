//! MATCH and OPTIONAL MATCH.

use crate::env::Environment;
use crate::error::{CypherError, Result};
use crate::pattern::{NodePattern, PathPattern, PathSelector, Pattern, QuantifiedPath};
use crate::render::{join_lines, Render};
use crate::types::Variable;

use super::slots::{DeleteSlot, UpdateSlot, WhereSlot, WithDelete, WithSetRemove, WithWhere};
use super::NextClause;

/// `MATCH <patterns>` with optional WHERE, SET/REMOVE and DELETE.
#[derive(Debug, Clone)]
pub struct Match {
    patterns: Vec<PathPattern>,
    optional: bool,
    selector: Option<PathSelector>,
    where_: WhereSlot,
    update: UpdateSlot,
    delete: DeleteSlot,
    pub(crate) next: NextClause,
}

impl Match {
    /// Creates a MATCH of a single pattern.
    #[must_use]
    pub fn new(pattern: impl Into<PathPattern>) -> Self {
        Match {
            patterns: vec![pattern.into()],
            optional: false,
            selector: None,
            where_: WhereSlot::default(),
            update: UpdateSlot::default(),
            delete: DeleteSlot::default(),
            next: NextClause::default(),
        }
    }

    /// Adds another comma-separated pattern.
    pub fn pattern(&mut self, pattern: impl Into<PathPattern>) -> &mut Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Turns this clause into OPTIONAL MATCH.
    pub fn optional(&mut self) -> &mut Self {
        self.optional = true;
        self
    }

    /// Applies a path selector such as `SHORTEST 1`.
    ///
    /// Selectors only apply to a single pattern; rendering fails otherwise.
    pub fn selector(&mut self, selector: PathSelector) -> &mut Self {
        self.selector = Some(selector);
        self
    }

    /// `SHORTEST k`
    pub fn shortest(&mut self, k: u32) -> &mut Self {
        self.selector(PathSelector::Shortest(k))
    }

    /// `ALL SHORTEST`
    pub fn all_shortest(&mut self) -> &mut Self {
        self.selector(PathSelector::AllShortest)
    }

    /// `ANY`
    pub fn any(&mut self) -> &mut Self {
        self.selector(PathSelector::Any)
    }

    /// `SHORTEST k GROUPS`
    pub fn shortest_groups(&mut self, k: u32) -> &mut Self {
        self.selector(PathSelector::ShortestGroups(k))
    }

    /// Returns true for OPTIONAL MATCH.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

impl From<PathPattern> for Match {
    fn from(pattern: PathPattern) -> Self {
        Match::new(pattern)
    }
}

impl From<Pattern> for Match {
    fn from(pattern: Pattern) -> Self {
        Match::new(pattern)
    }
}

impl From<QuantifiedPath> for Match {
    fn from(path: QuantifiedPath) -> Self {
        Match::new(path)
    }
}

impl From<NodePattern> for Match {
    fn from(node: NodePattern) -> Self {
        Match::new(node)
    }
}

impl From<&Variable> for Match {
    fn from(node: &Variable) -> Self {
        Match::new(node)
    }
}

impl WithWhere for Match {
    fn where_slot(&mut self) -> &mut WhereSlot {
        &mut self.where_
    }
}

impl WithSetRemove for Match {
    fn update_slot(&mut self) -> &mut UpdateSlot {
        &mut self.update
    }
}

impl WithDelete for Match {
    fn delete_slot(&mut self) -> &mut DeleteSlot {
        &mut self.delete
    }
}

impl Render for Match {
    fn render(&self, env: &mut Environment) -> Result<String> {
        if let Some(selector) = self.selector {
            if self.patterns.len() > 1 {
                return Err(CypherError::PathSelectorWithMultiplePatterns {
                    selector: selector.keyword(),
                    count: self.patterns.len(),
                });
            }
        }

        let mut patterns = Vec::with_capacity(self.patterns.len());
        for pattern in &self.patterns {
            patterns.push(pattern.render_with_selector(env, self.selector)?);
        }
        let keyword = if self.optional { "OPTIONAL MATCH" } else { "MATCH" };

        let body = join_lines([
            format!("{keyword} {}", patterns.join(", ")),
            self.where_.render(env)?,
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
    use crate::pattern::RelationshipPattern;
    use crate::types::Param;

    fn render(clause: &Match) -> Result<String> {
        let mut env = Environment::new(&BuildConfig::default());
        clause.render(&mut env)
    }

    #[test]
    fn test_match_with_where() {
        let movie = Variable::node();
        let mut clause = Match::new(NodePattern::new(&movie).label("Movie"));
        clause
            .where_(movie.property("title").eq(Param::new("The Matrix")))
            .where_(None::<crate::expr::Expr>);
        assert_eq!(
            render(&clause).unwrap(),
            "MATCH (this0:Movie)\nWHERE this0.title = $param0"
        );
    }

    #[test]
    fn test_optional_match_multiple_patterns() {
        let a = Variable::node();
        let b = Variable::node();
        let mut clause = Match::new(&a);
        clause.pattern(&b).optional();
        assert_eq!(render(&clause).unwrap(), "OPTIONAL MATCH (this0), (this1)");
    }

    #[test]
    fn test_match_set_and_delete() {
        let node = Variable::node();
        let mut clause = Match::new(&node);
        clause
            .set_property(node.property("archived"), true)
            .detach_delete([&node]);
        assert_eq!(
            render(&clause).unwrap(),
            "MATCH (this0)\nSET\n    this0.archived = true\nDETACH DELETE this0"
        );
    }

    #[test]
    fn test_shortest_path() {
        let path = Variable::path();
        let a = Variable::named_node("a");
        let b = Variable::named_node("b");
        let pattern = Pattern::new(&a)
            .related(RelationshipPattern::anonymous().rel_type("ROAD"))
            .to(&b)
            .assign_to(&path);
        let mut clause = Match::new(pattern);
        clause.shortest(1);
        assert_eq!(
            render(&clause).unwrap(),
            "MATCH p0 = SHORTEST 1 (a)-[:ROAD]->(b)"
        );
    }

    #[test]
    fn test_selector_with_multiple_patterns_fails_at_render() {
        let a = Variable::node();
        let b = Variable::node();
        let mut clause = Match::new(&a);
        clause.pattern(&b).all_shortest();
        let err = render(&clause).unwrap_err();
        assert_eq!(
            err,
            CypherError::PathSelectorWithMultiplePatterns {
                selector: "ALL SHORTEST".to_string(),
                count: 2,
            }
        );
    }
}
