//! Value-producing expression nodes.
//!
//! [`Expr`] is a plain value: operators take their operands by value and
//! clone freely. Rendering only touches the environment through the
//! variables and parameters the expression contains.

mod case;
mod collections;
mod function;
mod label;
mod operators;
mod raw;
mod subquery;

use serde_json::Value;

use crate::env::Environment;
use crate::error::Result;
use crate::render::Render;
use crate::types::{Literal, Param, Variable};

pub use case::Case;
pub use collections::{MapExpr, PropertyKey, PropertyRef};
pub use function::{coalesce, collect, count, count_star, size, FunctionCall};
pub use label::LabelPredicate;
pub use operators::{
    and, not, or, xor, BoolOperator, BooleanOp, Comparison, ComparisonOp, MathOp, MathOperator,
    NormalForm,
};
pub use raw::Raw;
pub use subquery::{
    collect_subquery, count_subquery, exists, ListComprehension, SubqueryBody, SubqueryExpr,
    SubqueryKind,
};

/// Any value-producing node.
#[derive(Debug, Clone)]
pub enum Expr {
    Variable(Variable),
    Param(Param),
    Literal(Literal),
    Property(Box<PropertyRef>),
    List(Vec<Expr>),
    Map(MapExpr),
    Boolean(BooleanOp),
    Not(Box<Expr>),
    Comparison(Box<Comparison>),
    Math(MathOp),
    Negate(Box<Expr>),
    Function(FunctionCall),
    Case(Box<Case>),
    Label(LabelPredicate),
    Subquery(Box<SubqueryExpr>),
    ListComprehension(Box<ListComprehension>),
    Raw(Raw),
}

impl Expr {
    /// Creates a literal expression.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(Literal::new(value))
    }

    /// The `NULL` literal.
    #[must_use]
    pub fn null() -> Self {
        Expr::Literal(Literal::null())
    }

    /// Creates a list expression: `[a, b]`.
    #[must_use]
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Expr::List(items.into_iter().map(Into::into).collect())
    }

    /// `self.key`
    #[must_use]
    pub fn property(self, key: impl Into<String>) -> Self {
        Expr::Property(Box::new(PropertyRef::name(self, key)))
    }

    /// `self[index]`
    #[must_use]
    pub fn index(self, index: impl Into<Expr>) -> Self {
        Expr::Property(Box::new(PropertyRef::index(self, index)))
    }

    fn compare(self, op: ComparisonOp, other: impl Into<Expr>) -> Self {
        Expr::Comparison(Box::new(Comparison::binary(op, self, other)))
    }

    fn predicate(self, op: ComparisonOp) -> Self {
        Expr::Comparison(Box::new(Comparison::unary(op, self)))
    }

    /// `self = other`
    #[must_use]
    pub fn eq(self, other: impl Into<Expr>) -> Self {
        self.compare(ComparisonOp::Eq, other)
    }

    /// `self <> other`
    #[must_use]
    pub fn neq(self, other: impl Into<Expr>) -> Self {
        self.compare(ComparisonOp::Neq, other)
    }

    /// `self < other`
    #[must_use]
    pub fn lt(self, other: impl Into<Expr>) -> Self {
        self.compare(ComparisonOp::Lt, other)
    }

    /// `self <= other`
    #[must_use]
    pub fn lte(self, other: impl Into<Expr>) -> Self {
        self.compare(ComparisonOp::Lte, other)
    }

    /// `self > other`
    #[must_use]
    pub fn gt(self, other: impl Into<Expr>) -> Self {
        self.compare(ComparisonOp::Gt, other)
    }

    /// `self >= other`
    #[must_use]
    pub fn gte(self, other: impl Into<Expr>) -> Self {
        self.compare(ComparisonOp::Gte, other)
    }

    /// `self IN list`
    #[must_use]
    pub fn in_list(self, list: impl Into<Expr>) -> Self {
        self.compare(ComparisonOp::In, list)
    }

    /// `self CONTAINS other`
    #[must_use]
    pub fn contains(self, other: impl Into<Expr>) -> Self {
        self.compare(ComparisonOp::Contains, other)
    }

    /// `self STARTS WITH other`
    #[must_use]
    pub fn starts_with(self, other: impl Into<Expr>) -> Self {
        self.compare(ComparisonOp::StartsWith, other)
    }

    /// `self ENDS WITH other`
    #[must_use]
    pub fn ends_with(self, other: impl Into<Expr>) -> Self {
        self.compare(ComparisonOp::EndsWith, other)
    }

    /// `self =~ regex`
    #[must_use]
    pub fn matches(self, regex: impl Into<Expr>) -> Self {
        self.compare(ComparisonOp::Matches, regex)
    }

    /// `self IS NULL`
    #[must_use]
    pub fn is_null(self) -> Self {
        self.predicate(ComparisonOp::IsNull)
    }

    /// `self IS NOT NULL`
    #[must_use]
    pub fn is_not_null(self) -> Self {
        self.predicate(ComparisonOp::IsNotNull)
    }

    /// `self IS [form] NORMALIZED`
    #[must_use]
    pub fn is_normalized(self, form: Option<NormalForm>) -> Self {
        self.predicate(ComparisonOp::IsNormalized {
            negated: false,
            form,
        })
    }

    /// `self IS NOT [form] NORMALIZED`
    #[must_use]
    pub fn is_not_normalized(self, form: Option<NormalForm>) -> Self {
        self.predicate(ComparisonOp::IsNormalized {
            negated: true,
            form,
        })
    }

    fn math(self, op: MathOperator, other: impl Into<Expr>) -> Self {
        Expr::Math(MathOp::pair(op, self, other.into()))
    }

    /// `(self + other)`
    #[must_use]
    pub fn plus(self, other: impl Into<Expr>) -> Self {
        self.math(MathOperator::Plus, other)
    }

    /// `(self - other)`
    #[must_use]
    pub fn minus(self, other: impl Into<Expr>) -> Self {
        self.math(MathOperator::Minus, other)
    }

    /// `(self * other)`
    #[must_use]
    pub fn multiply(self, other: impl Into<Expr>) -> Self {
        self.math(MathOperator::Multiply, other)
    }

    /// `(self / other)`
    #[must_use]
    pub fn divide(self, other: impl Into<Expr>) -> Self {
        self.math(MathOperator::Divide, other)
    }

    /// `(self % other)`
    #[must_use]
    pub fn modulo(self, other: impl Into<Expr>) -> Self {
        self.math(MathOperator::Modulo, other)
    }

    /// `(self ^ other)`
    #[must_use]
    pub fn pow(self, other: impl Into<Expr>) -> Self {
        self.math(MathOperator::Pow, other)
    }

    /// `-self`
    #[must_use]
    pub fn negate(self) -> Self {
        Expr::Negate(Box::new(self))
    }
}

impl Variable {
    /// `var.key`
    #[must_use]
    pub fn property(&self, key: impl Into<String>) -> Expr {
        Expr::from(self).property(key)
    }

    /// `var[index]`
    #[must_use]
    pub fn index(&self, index: impl Into<Expr>) -> Expr {
        Expr::from(self).index(index)
    }

    /// `var:A:B`
    ///
    /// # Errors
    ///
    /// Returns `EmptyLabels` if no label is given.
    pub fn has_labels<I, S>(&self, labels: I) -> Result<Expr>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LabelPredicate::labels(self, labels).map(Expr::Label)
    }

    /// `var:T1|T2`
    ///
    /// # Errors
    ///
    /// Returns `EmptyLabels` if no type is given.
    pub fn has_types<I, S>(&self, types: I) -> Result<Expr>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LabelPredicate::types(self, types).map(Expr::Label)
    }
}

impl Render for Variable {
    fn render(&self, env: &mut Environment) -> Result<String> {
        Ok(env.resolve(self))
    }
}

impl Render for Param {
    fn render(&self, env: &mut Environment) -> Result<String> {
        if self.is_null() {
            return Ok("NULL".to_string());
        }
        Ok(format!("${}", env.resolve_param(self)))
    }
}

impl Render for Expr {
    fn render(&self, env: &mut Environment) -> Result<String> {
        match self {
            Expr::Variable(v) => v.render(env),
            Expr::Param(p) => p.render(env),
            Expr::Literal(l) => l.render(env),
            Expr::Property(p) => p.render(env),
            Expr::List(items) => collections::render_list(items, env),
            Expr::Map(m) => m.render(env),
            Expr::Boolean(b) => b.render(env),
            Expr::Not(inner) => operators::render_not(inner, env),
            Expr::Comparison(c) => c.render(env),
            Expr::Math(m) => m.render(env),
            Expr::Negate(inner) => Ok(format!("-{}", inner.render(env)?)),
            Expr::Function(f) => f.render(env),
            Expr::Case(c) => c.render(env),
            Expr::Label(l) => l.render(env),
            Expr::Subquery(s) => s.render(env),
            Expr::ListComprehension(c) => c.render(env),
            Expr::Raw(r) => r.render(env),
        }
    }
}

impl From<&Variable> for Expr {
    fn from(v: &Variable) -> Self {
        Expr::Variable(v.clone())
    }
}

impl From<&Param> for Expr {
    fn from(p: &Param) -> Self {
        Expr::Param(p.clone())
    }
}

impl From<&Expr> for Expr {
    fn from(e: &Expr) -> Self {
        e.clone()
    }
}

macro_rules! impl_expr_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(node: $ty) -> Self {
                    Expr::$variant(node.into())
                }
            }
        )*
    };
}

impl_expr_from! {
    Variable => Variable,
    Param => Param,
    Literal => Literal,
    PropertyRef => Property,
    MapExpr => Map,
    BooleanOp => Boolean,
    Comparison => Comparison,
    MathOp => Math,
    FunctionCall => Function,
    Case => Case,
    LabelPredicate => Label,
    SubqueryExpr => Subquery,
    ListComprehension => ListComprehension,
    Raw => Raw,
    Vec<Expr> => List,
}

macro_rules! impl_expr_from_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Expr::literal(value)
                }
            }
        )*
    };
}

impl_expr_from_literal!(i32, i64, u32, u64, usize, f32, f64, bool, &str, String, Value);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use serde_json::json;

    fn env() -> Environment {
        Environment::new(&BuildConfig::default())
    }

    #[test]
    fn test_null_param_renders_inline() {
        let mut env = env();
        let p = Param::new(Value::Null);
        assert_eq!(Expr::from(&p).render(&mut env).unwrap(), "NULL");
        assert!(env.collect_parameters().is_empty());
    }

    #[test]
    fn test_param_reused_keeps_name() {
        let mut env = env();
        let p = Param::new("x");
        let pred = and([Expr::from(&p).eq(1), Expr::from(&p).eq(2)]).unwrap();
        assert_eq!(pred.render(&mut env).unwrap(), "($param0 = 1 AND $param0 = 2)");
        assert_eq!(env.collect_parameters().len(), 1);
    }

    #[test]
    fn test_named_param() {
        let mut env = env();
        let p = Param::named("auth", json!({"roles": ["admin"]}));
        assert_eq!(Expr::from(&p).render(&mut env).unwrap(), "$auth");
        assert_eq!(env.collect_parameters().get("auth"), Some(&json!({"roles": ["admin"]})));
    }

    #[test]
    fn test_literal_conversions() {
        let mut env = env();
        assert_eq!(Expr::from(7).render(&mut env).unwrap(), "7");
        assert_eq!(Expr::from("a").render(&mut env).unwrap(), "\"a\"");
        assert_eq!(Expr::null().render(&mut env).unwrap(), "NULL");
        assert_eq!(Expr::list([1, 2]).render(&mut env).unwrap(), "[1, 2]");
    }

    #[test]
    fn test_property_chain() {
        let mut env = env();
        let node = Variable::node();
        let expr = node.property("address").property("city");
        assert_eq!(expr.render(&mut env).unwrap(), "this0.address.city");
    }

    #[test]
    fn test_has_labels_helper() {
        let mut env = env();
        let node = Variable::node();
        assert_eq!(
            node.has_labels(["Movie"]).unwrap().render(&mut env).unwrap(),
            "this0:Movie"
        );
        assert!(node.has_types(Vec::<&str>::new()).is_err());
    }
}
