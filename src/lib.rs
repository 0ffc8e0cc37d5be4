//! cypher-builder - programmatic Cypher query construction
//!
//! Queries are assembled from typed nodes (clauses, patterns and
//! expressions) and rendered into query text plus a parameter map. Anonymous
//! variables get deterministic names (`this0`, `var1`, `p2`) in the order they
//! are first rendered, and literal values bound to [`Param`]s are lifted into
//! the parameter map instead of being inlined.
//!
//! ```
//! use cypher_builder::prelude::*;
//!
//! let movie = Variable::node();
//! let mut query = Query::new(Match::new(NodePattern::new(&movie).label("Movie")));
//! query
//!     .where_(movie.property("title").eq(Param::new("The Matrix")))
//!     .return_(&movie)?;
//!
//! let output = query.build_default()?;
//! assert_eq!(
//!     output.cypher,
//!     "MATCH (this0:Movie)\nWHERE this0.title = $param0\nRETURN this0"
//! );
//! assert_eq!(output.params["param0"], "The Matrix");
//! # Ok::<(), cypher_builder::CypherError>(())
//! ```

pub mod build;
pub mod clauses;
pub mod config;
pub mod env;
pub mod error;
pub mod expr;
pub mod pattern;
pub mod render;
pub mod types;

pub use build::{BuildOutput, Query, Statement};
pub use config::{BuildConfig, EnvPrefix, LabelOperator, UnsafeEscapeOptions};
pub use env::{Environment, Params};
pub use error::{CypherError, Result};
pub use render::Render;
pub use types::{Literal, Param, Variable, VariableKind};

/// Common imports for building queries.
pub mod prelude {
    pub use crate::build::{BuildOutput, Query, Statement};
    pub use crate::clauses::{
        Call, CallProcedure, Chainable, Clause, Create, Delete, Finish, Foreach, Match, Merge,
        Order, ProjectionItem, RawClause, RemoveItem, Return, SetItem, Union, Unwind, With,
        WithDelete, WithOrder, WithSetRemove, WithWhere,
    };
    pub use crate::config::{BuildConfig, EnvPrefix, LabelOperator, UnsafeEscapeOptions};
    pub use crate::error::{CypherError, Result};
    pub use crate::expr::{
        and, coalesce, collect, collect_subquery, count, count_star, count_subquery, exists, not,
        or, size, xor, Case, Expr, FunctionCall, ListComprehension, MapExpr, NormalForm, Raw,
    };
    pub use crate::pattern::{
        Direction, NodePattern, PathLength, PathPattern, PathSelector, Pattern, QuantifiedPath,
        Quantifier, RelationshipPattern,
    };
    pub use crate::types::{Param, Variable};
}
