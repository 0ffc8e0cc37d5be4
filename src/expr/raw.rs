//! Raw escape hatch for text the builder cannot express.

use std::fmt;
use std::sync::Arc;

use crate::env::Environment;
use crate::error::Result;
use crate::render::Render;

type RawCallback = dyn Fn(&mut Environment) -> Result<String> + Send + Sync;

/// Raw query text, either fixed or produced by a callback at render time.
///
/// Callbacks receive the render environment, so they can embed variables and
/// parameters through [`Environment::compile`] and keep naming consistent
/// with the rest of the query.
#[derive(Clone)]
pub struct Raw {
    source: RawSource,
}

#[derive(Clone)]
enum RawSource {
    Text(String),
    Callback(Arc<RawCallback>),
}

impl Raw {
    /// Inlines `text` verbatim.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Raw {
            source: RawSource::Text(text.into()),
        }
    }

    /// Produces text with `callback` when rendered.
    #[must_use]
    pub fn with<F>(callback: F) -> Self
    where
        F: Fn(&mut Environment) -> Result<String> + Send + Sync + 'static,
    {
        Raw {
            source: RawSource::Callback(Arc::new(callback)),
        }
    }
}

impl fmt::Debug for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            RawSource::Text(text) => f.debug_tuple("Raw").field(text).finish(),
            RawSource::Callback(_) => f.write_str("Raw(<callback>)"),
        }
    }
}

impl Render for Raw {
    fn render(&self, env: &mut Environment) -> Result<String> {
        match &self.source {
            RawSource::Text(text) => Ok(text.clone()),
            RawSource::Callback(callback) => callback(env),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::error::CypherError;
    use crate::types::{Param, Variable};

    #[test]
    fn test_raw_text() {
        let mut env = Environment::new(&BuildConfig::default());
        assert_eq!(Raw::new("timestamp()").render(&mut env).unwrap(), "timestamp()");
    }

    #[test]
    fn test_raw_callback_shares_environment() {
        let node = Variable::node();
        let param = Param::new(10);
        let inner_node = node.clone();
        let raw = Raw::with(move |env| {
            let n = env.compile(&inner_node)?;
            let p = env.compile(&param)?;
            Ok(format!("{n}.score > {p}"))
        });

        let mut env = Environment::new(&BuildConfig::default());
        assert_eq!(env.resolve(&node), "this0");
        assert_eq!(raw.render(&mut env).unwrap(), "this0.score > $param0");
        assert_eq!(env.collect_parameters().len(), 1);
    }

    #[test]
    fn test_raw_callback_error_propagates() {
        let raw = Raw::with(|_| Err(CypherError::Raw("not compilable".into())));
        let mut env = Environment::new(&BuildConfig::default());
        let err = raw.render(&mut env).unwrap_err();
        assert_eq!(err.to_string(), "Raw render error: not compilable");
    }
}
