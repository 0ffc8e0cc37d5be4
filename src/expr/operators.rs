//! Boolean, comparison and arithmetic operators.

use crate::env::Environment;
use crate::error::{CypherError, Result};
use crate::render::{render_joined, Render};

use super::Expr;

/// Multi-operand boolean operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOperator {
    And,
    Or,
    Xor,
}

impl BoolOperator {
    /// Returns the Cypher keyword.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            BoolOperator::And => "AND",
            BoolOperator::Or => "OR",
            BoolOperator::Xor => "XOR",
        }
    }
}

/// `(a AND b AND ...)` with at least two operands.
#[derive(Debug, Clone)]
pub struct BooleanOp {
    op: BoolOperator,
    operands: Vec<Expr>,
}

impl BooleanOp {
    /// Creates a boolean operation.
    ///
    /// # Errors
    ///
    /// Returns `NotEnoughOperands` if fewer than two operands are given. Use
    /// [`and`], [`or`] or [`xor`] to collapse degenerate inputs instead.
    pub fn new(op: BoolOperator, operands: Vec<Expr>) -> Result<Self> {
        if operands.len() < 2 {
            return Err(CypherError::NotEnoughOperands {
                operator: op.keyword(),
                count: operands.len(),
            });
        }
        Ok(BooleanOp { op, operands })
    }

    /// Returns the operator.
    #[must_use]
    pub fn operator(&self) -> BoolOperator {
        self.op
    }

    /// Returns the operands.
    #[must_use]
    pub fn operands(&self) -> &[Expr] {
        &self.operands
    }
}

impl Render for BooleanOp {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let separator = format!(" {} ", self.op.keyword());
        Ok(format!("({})", render_joined(&self.operands, env, &separator)?))
    }
}

fn combine<I>(op: BoolOperator, operands: I) -> Option<Expr>
where
    I: IntoIterator,
    I::Item: Into<Option<Expr>>,
{
    let mut defined: Vec<Expr> = operands.into_iter().filter_map(Into::into).collect();
    match defined.len() {
        0 => None,
        1 => defined.pop(),
        _ => Some(Expr::Boolean(BooleanOp { op, operands: defined })),
    }
}

/// Combines predicates with AND.
///
/// `None` operands are skipped. No defined operand yields `None` and a single
/// defined operand is returned unchanged.
pub fn and<I>(operands: I) -> Option<Expr>
where
    I: IntoIterator,
    I::Item: Into<Option<Expr>>,
{
    combine(BoolOperator::And, operands)
}

/// Combines predicates with OR, collapsing like [`and`].
pub fn or<I>(operands: I) -> Option<Expr>
where
    I: IntoIterator,
    I::Item: Into<Option<Expr>>,
{
    combine(BoolOperator::Or, operands)
}

/// Combines predicates with XOR, collapsing like [`and`].
pub fn xor<I>(operands: I) -> Option<Expr>
where
    I: IntoIterator,
    I::Item: Into<Option<Expr>>,
{
    combine(BoolOperator::Xor, operands)
}

/// Negates a predicate: `NOT (x)`.
pub fn not(operand: impl Into<Expr>) -> Expr {
    Expr::Not(Box::new(operand.into()))
}

pub(super) fn render_not(operand: &Expr, env: &mut Environment) -> Result<String> {
    let inner = operand.render(env)?;
    // Boolean operations already render their own parentheses.
    if matches!(operand, Expr::Boolean(_)) {
        Ok(format!("NOT {inner}"))
    } else {
        Ok(format!("NOT ({inner})"))
    }
}

/// Unicode normalization form for `IS NORMALIZED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalForm {
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

impl NormalForm {
    fn keyword(self) -> &'static str {
        match self {
            NormalForm::Nfc => "NFC",
            NormalForm::Nfd => "NFD",
            NormalForm::Nfkc => "NFKC",
            NormalForm::Nfkd => "NFKD",
        }
    }
}

/// Comparison and predicate operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Contains,
    StartsWith,
    EndsWith,
    Matches,
    IsNull,
    IsNotNull,
    IsNormalized {
        negated: bool,
        form: Option<NormalForm>,
    },
}

impl ComparisonOp {
    /// Returns true for operators without a right-hand operand.
    #[must_use]
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            ComparisonOp::IsNull | ComparisonOp::IsNotNull | ComparisonOp::IsNormalized { .. }
        )
    }

    fn keyword(self) -> String {
        match self {
            ComparisonOp::Eq => "=".into(),
            ComparisonOp::Neq => "<>".into(),
            ComparisonOp::Lt => "<".into(),
            ComparisonOp::Lte => "<=".into(),
            ComparisonOp::Gt => ">".into(),
            ComparisonOp::Gte => ">=".into(),
            ComparisonOp::In => "IN".into(),
            ComparisonOp::Contains => "CONTAINS".into(),
            ComparisonOp::StartsWith => "STARTS WITH".into(),
            ComparisonOp::EndsWith => "ENDS WITH".into(),
            ComparisonOp::Matches => "=~".into(),
            ComparisonOp::IsNull => "IS NULL".into(),
            ComparisonOp::IsNotNull => "IS NOT NULL".into(),
            ComparisonOp::IsNormalized { negated, form } => {
                let mut keyword = String::from("IS ");
                if negated {
                    keyword.push_str("NOT ");
                }
                if let Some(form) = form {
                    keyword.push_str(form.keyword());
                    keyword.push(' ');
                }
                keyword.push_str("NORMALIZED");
                keyword
            }
        }
    }
}

/// `left OP right`, or `left OP` for unary predicates.
#[derive(Debug, Clone)]
pub struct Comparison {
    op: ComparisonOp,
    left: Expr,
    right: Option<Expr>,
}

impl Comparison {
    /// Creates a binary comparison.
    #[must_use]
    pub fn binary(op: ComparisonOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Comparison {
            op,
            left: left.into(),
            right: Some(right.into()),
        }
    }

    /// Creates a unary predicate such as `IS NULL`.
    #[must_use]
    pub fn unary(op: ComparisonOp, operand: impl Into<Expr>) -> Self {
        Comparison {
            op,
            left: operand.into(),
            right: None,
        }
    }

    /// Returns the operator.
    #[must_use]
    pub fn operator(&self) -> ComparisonOp {
        self.op
    }
}

impl Render for Comparison {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let left = self.left.render(env)?;
        match &self.right {
            Some(right) => {
                let right = right.render(env)?;
                Ok(format!("{left} {} {right}", self.op.keyword()))
            }
            None => Ok(format!("{left} {}", self.op.keyword())),
        }
    }
}

/// Arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Pow,
}

impl MathOperator {
    fn symbol(self) -> &'static str {
        match self {
            MathOperator::Plus => "+",
            MathOperator::Minus => "-",
            MathOperator::Multiply => "*",
            MathOperator::Divide => "/",
            MathOperator::Modulo => "%",
            MathOperator::Pow => "^",
        }
    }
}

/// `(a + b + ...)` with at least two operands.
#[derive(Debug, Clone)]
pub struct MathOp {
    op: MathOperator,
    operands: Vec<Expr>,
}

impl MathOp {
    /// Creates an arithmetic operation.
    ///
    /// # Errors
    ///
    /// Returns `NotEnoughOperands` if fewer than two operands are given.
    pub fn new(op: MathOperator, operands: Vec<Expr>) -> Result<Self> {
        if operands.len() < 2 {
            return Err(CypherError::NotEnoughOperands {
                operator: op.symbol(),
                count: operands.len(),
            });
        }
        Ok(MathOp { op, operands })
    }

    pub(super) fn pair(op: MathOperator, left: Expr, right: Expr) -> Self {
        MathOp {
            op,
            operands: vec![left, right],
        }
    }
}

impl Render for MathOp {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let separator = format!(" {} ", self.op.symbol());
        Ok(format!("({})", render_joined(&self.operands, env, &separator)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::types::{Param, Variable};

    fn render(expr: &impl Render) -> String {
        let mut env = Environment::new(&BuildConfig::default());
        expr.render(&mut env).unwrap()
    }

    #[test]
    fn test_and_collapses_empty() {
        assert!(and(Vec::<Expr>::new()).is_none());
        assert!(and([None::<Expr>, None]).is_none());
        assert_eq!(render(&and(Vec::<Expr>::new())), "");
    }

    #[test]
    fn test_and_single_operand_unchanged() {
        let node = Variable::node();
        let pred = node.property("a").eq(1);
        let single = and([Some(pred.clone()), None]).unwrap();
        assert_eq!(render(&single), render(&pred));
        assert_eq!(render(&single), "this0.a = 1");
    }

    #[test]
    fn test_and_two_operands() {
        let node = Variable::node();
        let combined = and([node.property("a").eq(1), node.property("b").eq(2)]).unwrap();
        assert_eq!(render(&combined), "(this0.a = 1 AND this0.b = 2)");
    }

    #[test]
    fn test_or_and_xor() {
        let x = Expr::literal(true);
        let y = Expr::literal(false);
        assert_eq!(render(&or([x.clone(), y.clone()])), "(true OR false)");
        assert_eq!(render(&xor([x, y])), "(true XOR false)");
    }

    #[test]
    fn test_boolean_op_requires_two_operands() {
        let err = BooleanOp::new(BoolOperator::And, vec![Expr::literal(true)]).unwrap_err();
        assert_eq!(
            err,
            CypherError::NotEnoughOperands {
                operator: "AND",
                count: 1
            }
        );
    }

    #[test]
    fn test_not_wraps_non_boolean() {
        let node = Variable::node();
        assert_eq!(render(&not(node.property("a").is_null())), "NOT (this0.a IS NULL)");
    }

    #[test]
    fn test_not_reuses_boolean_parens() {
        let pred = and([Expr::literal(true), Expr::literal(false)]).unwrap();
        assert_eq!(render(&not(pred)), "NOT (true AND false)");
    }

    #[test]
    fn test_comparisons() {
        let node = Variable::node();
        let title = node.property("title");
        assert_eq!(render(&title.clone().neq("x")), "this0.title <> \"x\"");
        assert_eq!(render(&title.clone().starts_with("The")), "this0.title STARTS WITH \"The\"");
        assert_eq!(render(&title.clone().in_list(Param::new(vec!["a", "b"]))), "this0.title IN $param0");
        assert_eq!(render(&title.clone().matches(".*")), "this0.title =~ \".*\"");
        assert_eq!(render(&title.is_not_null()), "this0.title IS NOT NULL");
    }

    #[test]
    fn test_normalization_predicates() {
        let s = Expr::literal("abc");
        assert_eq!(render(&s.clone().is_normalized(None)), "\"abc\" IS NORMALIZED");
        assert_eq!(
            render(&s.clone().is_normalized(Some(NormalForm::Nfkc))),
            "\"abc\" IS NFKC NORMALIZED"
        );
        assert_eq!(
            render(&s.is_not_normalized(Some(NormalForm::Nfd))),
            "\"abc\" IS NOT NFD NORMALIZED"
        );
    }

    #[test]
    fn test_math() {
        let a = Expr::literal(1);
        let b = Expr::literal(2);
        assert_eq!(render(&a.clone().plus(b.clone())), "(1 + 2)");
        assert_eq!(render(&a.clone().pow(b.clone())), "(1 ^ 2)");
        assert_eq!(render(&a.clone().negate()), "-1");

        let sum = MathOp::new(MathOperator::Plus, vec![a, b, Expr::literal(3)]).unwrap();
        assert_eq!(render(&sum), "(1 + 2 + 3)");
        assert!(MathOp::new(MathOperator::Minus, vec![]).is_err());
    }
}
