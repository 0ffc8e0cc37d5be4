//! Graph patterns used by MATCH, CREATE, MERGE and pattern subqueries.

mod node;
mod path;
mod relationship;

pub use node::NodePattern;
pub use path::{PathPattern, PathSegment, PathSelector, Pattern, QuantifiedPath, Quantifier};
pub use relationship::{Direction, PathLength, RelationshipPattern};
