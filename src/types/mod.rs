//! Variables, parameters and literal values.

mod param;
mod value;
mod variable;

pub use param::{Param, PARAM_PREFIX};
pub use value::Literal;
pub use variable::{VarId, Variable, VariableKind};
