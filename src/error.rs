//! Error types for query construction and rendering.

use thiserror::Error;

/// Result type alias using [`CypherError`].
pub type Result<T> = std::result::Result<T, CypherError>;

/// Error types for query construction and rendering.
///
/// Construction errors are returned by the constructor that received the bad
/// input. Render errors only surface from `build`, because the invariant they
/// check depends on the finished tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CypherError {
    // ==================== Construction Errors ====================
    /// Label or relationship-type predicate built without any label.
    #[error("{0} needs at least one label")]
    EmptyLabels(&'static str),

    /// Multi-operand operator built with too few operands.
    #[error("{operator} needs at least 2 operands, got {count}")]
    NotEnoughOperands {
        operator: &'static str,
        count: usize,
    },

    /// DISTINCT requested on a star-argument function such as `count(*)`.
    #[error("Cannot use DISTINCT with star argument in function {function}(*)")]
    DistinctStarArgument { function: String },

    // ==================== Chain Errors ====================
    /// A clause that already has a successor was given another one.
    #[error("Cannot add {next} clause after {current}: {current} already has a next clause ({existing})")]
    ClauseAlreadyChained {
        current: &'static str,
        next: &'static str,
        existing: &'static str,
    },

    // ==================== Render Errors ====================
    /// CASE branch with a WHEN predicate but no THEN result.
    #[error("Cannot generate CASE ... WHEN statement without THEN")]
    CaseWithoutThen,

    /// Path selector (SHORTEST, ANY, ...) combined with several patterns.
    #[error("{selector} cannot be used with multiple path patterns, got {count}")]
    PathSelectorWithMultiplePatterns { selector: String, count: usize },

    /// Raw escape hatch failed to produce text.
    #[error("Raw render error: {0}")]
    Raw(String),
}
