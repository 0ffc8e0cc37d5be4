//! The render contract shared by every AST node.

use crate::env::Environment;
use crate::error::Result;

/// Indentation used for nested blocks.
pub const INDENT: &str = "    ";

/// A tree node that can produce query text.
///
/// Rendering resolves variable names and registers parameters in `env` as a
/// side effect. Nodes are never mutated while rendering.
pub trait Render {
    /// Renders this node to text.
    ///
    /// # Errors
    ///
    /// Returns an error if the node, or any node below it, is structurally
    /// invalid in a way only detectable once the tree is complete.
    fn render(&self, env: &mut Environment) -> Result<String>;
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, env: &mut Environment) -> Result<String> {
        (**self).render(env)
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render(&self, env: &mut Environment) -> Result<String> {
        (**self).render(env)
    }
}

/// A missing node renders as empty text.
impl<T: Render> Render for Option<T> {
    fn render(&self, env: &mut Environment) -> Result<String> {
        match self {
            Some(node) => node.render(env),
            None => Ok(String::new()),
        }
    }
}

/// Indents every non-empty line of `text` by one level.
#[must_use]
pub fn pad_block(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders each node and joins the results with `separator`.
pub(crate) fn render_joined<T: Render>(
    nodes: &[T],
    env: &mut Environment,
    separator: &str,
) -> Result<String> {
    let rendered = nodes
        .iter()
        .map(|n| n.render(env))
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join(separator))
}

/// Renders `node` with `prefix` in front, or nothing if absent or empty.
pub(crate) fn render_prefixed<T: Render>(
    node: Option<&T>,
    env: &mut Environment,
    prefix: &str,
) -> Result<String> {
    match node {
        Some(node) => {
            let text = node.render(env)?;
            if text.is_empty() {
                Ok(String::new())
            } else {
                Ok(format!("{prefix}{text}"))
            }
        }
        None => Ok(String::new()),
    }
}

/// Joins rendered lines, skipping empty ones.
pub(crate) fn join_lines<I>(lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    lines
        .into_iter()
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_block() {
        assert_eq!(pad_block("MATCH (n)\nRETURN n"), "    MATCH (n)\n    RETURN n");
        assert_eq!(pad_block("a\n\nb"), "    a\n\n    b");
    }

    #[test]
    fn test_join_lines_skips_empty() {
        let lines = vec!["MATCH (n)".to_string(), String::new(), "RETURN n".to_string()];
        assert_eq!(join_lines(lines), "MATCH (n)\nRETURN n");
    }
}
