//! Literal values inlined into the query text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::env::{escape_string_literal, Environment};
use crate::error::Result;
use crate::render::Render;

/// A literal value rendered directly into the query text.
///
/// Unlike [`Param`](super::Param), a literal never produces a parameter slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Literal(Value);

impl Literal {
    /// Creates a literal from any JSON-convertible value.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Literal(value.into())
    }

    /// The `NULL` literal.
    #[must_use]
    pub fn null() -> Self {
        Literal(Value::Null)
    }

    /// Returns the wrapped value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Returns true if this literal is `NULL`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl Render for Literal {
    fn render(&self, env: &mut Environment) -> Result<String> {
        Ok(render_value(&self.0, env))
    }
}

/// Renders a JSON value as Cypher literal text.
pub(crate) fn render_value(value: &Value, env: &Environment) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{}\"", escape_string_literal(s)),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(|v| render_value(v, env)).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", env.escape_property(k), render_value(v, env)))
                .collect();
            format!("{{ {} }}", entries.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use serde_json::json;

    fn render(lit: &Literal) -> String {
        let mut env = Environment::new(&BuildConfig::default());
        lit.render(&mut env).unwrap()
    }

    #[test]
    fn test_scalar_literals() {
        assert_eq!(render(&Literal::new(42)), "42");
        assert_eq!(render(&Literal::new(1.5)), "1.5");
        assert_eq!(render(&Literal::new(true)), "true");
        assert_eq!(render(&Literal::null()), "NULL");
    }

    #[test]
    fn test_string_literal_escaping() {
        assert_eq!(render(&Literal::new("The Matrix")), "\"The Matrix\"");
        assert_eq!(render(&Literal::new(r#"say "hi""#)), r#""say \"hi\"""#);
        assert_eq!(render(&Literal::new(r"a\b")), r#""a\\b""#);
    }

    #[test]
    fn test_nested_literals() {
        assert_eq!(render(&Literal::new(json!([1, "a", null]))), "[1, \"a\", NULL]");
        assert_eq!(render(&Literal::new(json!({}))), "{}");
        assert_eq!(
            render(&Literal::new(json!({"title": "x", "my key": 1}))),
            "{ `my key`: 1, title: \"x\" }"
        );
    }
}
