//! CREATE and MERGE.

use crate::env::Environment;
use crate::error::Result;
use crate::pattern::{NodePattern, PathPattern, Pattern};
use crate::render::{join_lines, render_joined, Render};
use crate::types::Variable;

use super::slots::{render_set_list, SetItem, UpdateSlot, WithSetRemove};
use super::NextClause;

/// `CREATE <patterns>` followed by optional SET/REMOVE.
#[derive(Debug, Clone)]
pub struct Create {
    patterns: Vec<PathPattern>,
    update: UpdateSlot,
    pub(crate) next: NextClause,
}

impl Create {
    /// Creates a CREATE of a single pattern.
    #[must_use]
    pub fn new(pattern: impl Into<PathPattern>) -> Self {
        Create {
            patterns: vec![pattern.into()],
            update: UpdateSlot::default(),
            next: NextClause::default(),
        }
    }

    /// Adds another comma-separated pattern.
    pub fn pattern(&mut self, pattern: impl Into<PathPattern>) -> &mut Self {
        self.patterns.push(pattern.into());
        self
    }
}

impl WithSetRemove for Create {
    fn update_slot(&mut self) -> &mut UpdateSlot {
        &mut self.update
    }
}

impl Render for Create {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let body = join_lines([
            format!("CREATE {}", render_joined(&self.patterns, env, ", ")?),
            self.update.render(env)?,
        ]);
        Ok(format!("{body}{}", self.next.render(env)?))
    }
}

/// `MERGE <pattern>` with ON CREATE SET, ON MATCH SET and SET/REMOVE.
#[derive(Debug, Clone)]
pub struct Merge {
    pattern: PathPattern,
    on_create: Vec<SetItem>,
    on_match: Vec<SetItem>,
    update: UpdateSlot,
    pub(crate) next: NextClause,
}

impl Merge {
    /// Creates a MERGE of `pattern`.
    #[must_use]
    pub fn new(pattern: impl Into<PathPattern>) -> Self {
        Merge {
            pattern: pattern.into(),
            on_create: Vec::new(),
            on_match: Vec::new(),
            update: UpdateSlot::default(),
            next: NextClause::default(),
        }
    }

    /// Adds assignments applied only when the pattern is created.
    pub fn on_create_set<I, T>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SetItem>,
    {
        self.on_create.extend(items.into_iter().map(Into::into));
        self
    }

    /// Adds assignments applied only when the pattern already exists.
    pub fn on_match_set<I, T>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SetItem>,
    {
        self.on_match.extend(items.into_iter().map(Into::into));
        self
    }
}

impl WithSetRemove for Merge {
    fn update_slot(&mut self) -> &mut UpdateSlot {
        &mut self.update
    }
}

impl Render for Merge {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let body = join_lines([
            format!("MERGE {}", self.pattern.render(env)?),
            render_set_list("ON CREATE SET", &self.on_create, env)?,
            render_set_list("ON MATCH SET", &self.on_match, env)?,
            self.update.render(env)?,
        ]);
        Ok(format!("{body}{}", self.next.render(env)?))
    }
}

macro_rules! impl_from_pattern {
    ($($clause:ty),*) => {
        $(
            impl From<PathPattern> for $clause {
                fn from(pattern: PathPattern) -> Self {
                    <$clause>::new(pattern)
                }
            }

            impl From<Pattern> for $clause {
                fn from(pattern: Pattern) -> Self {
                    <$clause>::new(pattern)
                }
            }

            impl From<NodePattern> for $clause {
                fn from(node: NodePattern) -> Self {
                    <$clause>::new(node)
                }
            }

            impl From<&Variable> for $clause {
                fn from(node: &Variable) -> Self {
                    <$clause>::new(node)
                }
            }
        )*
    };
}

impl_from_pattern!(Create, Merge);
