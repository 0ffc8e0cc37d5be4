//! Patterns, quantified path segments and path assignment.

use crate::env::Environment;
use crate::error::Result;
use crate::render::Render;
use crate::types::Variable;

use super::node::NodePattern;
use super::relationship::RelationshipPattern;

#[derive(Debug, Clone)]
struct Hop {
    relationship: RelationshipPattern,
    node: Option<NodePattern>,
}

/// A chain of alternating node and relationship elements.
///
/// ```text
/// (this0:Person)-[this1:ACTED_IN]->(this2:Movie)
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    start: NodePattern,
    hops: Vec<Hop>,
}

impl Pattern {
    /// Starts a pattern at `node`.
    #[must_use]
    pub fn new(node: impl Into<NodePattern>) -> Self {
        Pattern {
            start: node.into(),
            hops: Vec::new(),
        }
    }

    /// Appends a relationship. Until [`Pattern::to`] is called, its far end
    /// renders as an empty node `()`.
    #[must_use]
    pub fn related(mut self, relationship: impl Into<RelationshipPattern>) -> Self {
        self.hops.push(Hop {
            relationship: relationship.into(),
            node: None,
        });
        self
    }

    /// Sets the far end of the last relationship.
    ///
    /// Without a pending relationship an anonymous `-[]->` is inserted first.
    #[must_use]
    pub fn to(mut self, node: impl Into<NodePattern>) -> Self {
        match self.hops.last_mut() {
            Some(hop) if hop.node.is_none() => hop.node = Some(node.into()),
            _ => self.hops.push(Hop {
                relationship: RelationshipPattern::anonymous(),
                node: Some(node.into()),
            }),
        }
        self
    }

    /// Assigns the pattern to a path variable: `p0 = (...)`.
    #[must_use]
    pub fn assign_to(self, path: &Variable) -> PathPattern {
        PathPattern::from(self).assign_to(path)
    }

    /// Number of relationships in the pattern.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// Returns true if the pattern is a single node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

impl From<&Variable> for Pattern {
    fn from(variable: &Variable) -> Self {
        Pattern::new(variable)
    }
}

impl From<NodePattern> for Pattern {
    fn from(node: NodePattern) -> Self {
        Pattern::new(node)
    }
}

impl Render for Pattern {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let mut text = self.start.render(env)?;
        for hop in &self.hops {
            text.push_str(&hop.relationship.render(env)?);
            match &hop.node {
                Some(node) => text.push_str(&node.render(env)?),
                None => text.push_str("()"),
            }
        }
        Ok(text)
    }
}

/// Repetition bound of a quantified path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `{n}`
    Exactly(u32),
    /// `{min,max}`, either side may be open. Both open renders `*`.
    Range { min: Option<u32>, max: Option<u32> },
}

impl Quantifier {
    fn token(self) -> String {
        let bound = |b: Option<u32>| b.map(|n| n.to_string()).unwrap_or_default();
        match self {
            Quantifier::ZeroOrMore | Quantifier::Range { min: None, max: None } => "*".to_string(),
            Quantifier::OneOrMore => "+".to_string(),
            Quantifier::Exactly(n) => format!("{{{n}}}"),
            Quantifier::Range { min, max } => format!("{{{},{}}}", bound(min), bound(max)),
        }
    }
}

/// A parenthesized, repeated pattern: `((a)-[]->(b)){1,3}`.
#[derive(Debug, Clone)]
pub struct QuantifiedPath {
    pattern: Pattern,
    quantifier: Quantifier,
}

impl QuantifiedPath {
    /// Repeats `pattern` according to `quantifier`.
    #[must_use]
    pub fn new(pattern: impl Into<Pattern>, quantifier: Quantifier) -> Self {
        QuantifiedPath {
            pattern: pattern.into(),
            quantifier,
        }
    }
}

impl Render for QuantifiedPath {
    fn render(&self, env: &mut Environment) -> Result<String> {
        Ok(format!("({}){}", self.pattern.render(env)?, self.quantifier.token()))
    }
}

/// One segment of a [`PathPattern`].
#[derive(Debug, Clone)]
pub enum PathSegment {
    Pattern(Pattern),
    Quantified(QuantifiedPath),
}

impl From<Pattern> for PathSegment {
    fn from(pattern: Pattern) -> Self {
        PathSegment::Pattern(pattern)
    }
}

impl From<QuantifiedPath> for PathSegment {
    fn from(path: QuantifiedPath) -> Self {
        PathSegment::Quantified(path)
    }
}

impl Render for PathSegment {
    fn render(&self, env: &mut Environment) -> Result<String> {
        match self {
            PathSegment::Pattern(p) => p.render(env),
            PathSegment::Quantified(q) => q.render(env),
        }
    }
}

/// Path selector in front of a MATCH pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSelector {
    /// `SHORTEST k`
    Shortest(u32),
    /// `ALL SHORTEST`
    AllShortest,
    /// `ANY`
    Any,
    /// `SHORTEST k GROUPS`
    ShortestGroups(u32),
}

impl PathSelector {
    /// Returns the selector keywords.
    #[must_use]
    pub fn keyword(self) -> String {
        match self {
            PathSelector::Shortest(k) => format!("SHORTEST {k}"),
            PathSelector::AllShortest => "ALL SHORTEST".to_string(),
            PathSelector::Any => "ANY".to_string(),
            PathSelector::ShortestGroups(k) => format!("SHORTEST {k} GROUPS"),
        }
    }
}

/// A full MATCH/CREATE pattern: concatenated segments with an optional path
/// variable.
///
/// ```text
/// p0 = (this1:Station)((this2)-[:LINK]->(this3)){1,3}(this4:Station)
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
    path: Option<Variable>,
    segments: Vec<PathSegment>,
}

impl PathPattern {
    /// Starts a path with `segment`.
    #[must_use]
    pub fn new(segment: impl Into<PathSegment>) -> Self {
        PathPattern {
            path: None,
            segments: vec![segment.into()],
        }
    }

    /// Appends a segment. Segments are concatenated without separators.
    #[must_use]
    pub fn then(mut self, segment: impl Into<PathSegment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Assigns the path to `path`.
    #[must_use]
    pub fn assign_to(mut self, path: &Variable) -> Self {
        self.path = Some(path.clone());
        self
    }

    /// Returns the path variable, if assigned.
    #[must_use]
    pub fn path_variable(&self) -> Option<&Variable> {
        self.path.as_ref()
    }

    /// Renders with an optional selector between the assignment and the
    /// pattern: `p0 = SHORTEST 1 (...)`.
    ///
    /// # Errors
    ///
    /// Returns the first render error of a nested element.
    pub fn render_with_selector(
        &self,
        env: &mut Environment,
        selector: Option<PathSelector>,
    ) -> Result<String> {
        let mut text = String::new();
        if let Some(path) = &self.path {
            text.push_str(&env.resolve(path));
            text.push_str(" = ");
        }
        if let Some(selector) = selector {
            text.push_str(&selector.keyword());
            text.push(' ');
        }
        for segment in &self.segments {
            text.push_str(&segment.render(env)?);
        }
        Ok(text)
    }
}

impl From<Pattern> for PathPattern {
    fn from(pattern: Pattern) -> Self {
        PathPattern::new(pattern)
    }
}

impl From<QuantifiedPath> for PathPattern {
    fn from(path: QuantifiedPath) -> Self {
        PathPattern::new(path)
    }
}

impl From<NodePattern> for PathPattern {
    fn from(node: NodePattern) -> Self {
        PathPattern::new(Pattern::new(node))
    }
}

impl From<&Variable> for PathPattern {
    fn from(variable: &Variable) -> Self {
        PathPattern::new(Pattern::new(variable))
    }
}

impl Render for PathPattern {
    fn render(&self, env: &mut Environment) -> Result<String> {
        self.render_with_selector(env, None)
    }
}
