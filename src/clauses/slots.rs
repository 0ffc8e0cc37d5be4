//! Sub-clause slots shared by several clauses.
//!
//! A slot is owned by its clause and is not part of the clause chain. Each
//! slot has a capability trait whose default methods delegate to the slot,
//! so clauses only expose the accessor.

use crate::env::Environment;
use crate::error::Result;
use crate::expr::{and, or, Expr, MapExpr};
use crate::render::{pad_block, render_joined, Render};
use crate::types::Variable;

// ==================== WHERE ====================

/// Accumulated WHERE predicate.
#[derive(Debug, Clone, Default)]
pub struct WhereSlot {
    predicate: Option<Expr>,
}

impl WhereSlot {
    /// ANDs `predicate` onto the current one. `None` is ignored.
    pub fn and(&mut self, predicate: Option<Expr>) {
        self.predicate = and([self.predicate.take(), predicate]);
    }

    /// ORs `predicate` onto the current one. `None` is ignored.
    pub fn or(&mut self, predicate: Option<Expr>) {
        self.predicate = or([self.predicate.take(), predicate]);
    }

    /// Returns the current predicate.
    #[must_use]
    pub fn predicate(&self) -> Option<&Expr> {
        self.predicate.as_ref()
    }
}

impl Render for WhereSlot {
    fn render(&self, env: &mut Environment) -> Result<String> {
        match &self.predicate {
            Some(predicate) => Ok(format!("WHERE {}", predicate.render(env)?)),
            None => Ok(String::new()),
        }
    }
}

/// Clauses accepting a WHERE predicate.
pub trait WithWhere {
    #[doc(hidden)]
    fn where_slot(&mut self) -> &mut WhereSlot;

    /// Adds a predicate. Calling it again ANDs the predicates; `None` is a
    /// no-op.
    fn where_(&mut self, predicate: impl Into<Option<Expr>>) -> &mut Self
    where
        Self: Sized,
    {
        self.where_slot().and(predicate.into());
        self
    }

    /// Same as [`WithWhere::where_`].
    fn and_where(&mut self, predicate: impl Into<Option<Expr>>) -> &mut Self
    where
        Self: Sized,
    {
        self.where_(predicate)
    }

    /// ORs a predicate onto the current one.
    fn or_where(&mut self, predicate: impl Into<Option<Expr>>) -> &mut Self
    where
        Self: Sized,
    {
        self.where_slot().or(predicate.into());
        self
    }

    /// Adds `target.key = value` for every entry, ANDed together.
    fn where_properties(&mut self, target: &Variable, properties: MapExpr) -> &mut Self
    where
        Self: Sized,
    {
        let predicates: Vec<Expr> = properties
            .iter()
            .map(|(key, value)| target.property(key).eq(value.clone()))
            .collect();
        self.where_(and(predicates))
    }
}

// ==================== SET / REMOVE ====================

/// One assignment of a SET list.
#[derive(Debug, Clone)]
pub enum SetItem {
    /// `target = value`
    Assign { target: Expr, value: Expr },
    /// `this0 += { ... }`
    Merge { target: Variable, value: Expr },
    /// `this0:Label`
    Labels { target: Variable, labels: Vec<String> },
}

impl SetItem {
    /// `target = value`
    #[must_use]
    pub fn assign(target: impl Into<Expr>, value: impl Into<Expr>) -> Self {
        SetItem::Assign {
            target: target.into(),
            value: value.into(),
        }
    }

    /// `target += value`
    #[must_use]
    pub fn merge(target: &Variable, value: impl Into<Expr>) -> Self {
        SetItem::Merge {
            target: target.clone(),
            value: value.into(),
        }
    }

    /// `target:A:B`
    #[must_use]
    pub fn labels<I, S>(target: &Variable, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SetItem::Labels {
            target: target.clone(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

impl<V: Into<Expr>> From<(Expr, V)> for SetItem {
    fn from((target, value): (Expr, V)) -> Self {
        SetItem::assign(target, value)
    }
}

impl Render for SetItem {
    fn render(&self, env: &mut Environment) -> Result<String> {
        match self {
            SetItem::Assign { target, value } => {
                let target = target.render(env)?;
                Ok(format!("{target} = {}", value.render(env)?))
            }
            SetItem::Merge { target, value } => {
                let target = env.resolve(target);
                Ok(format!("{target} += {}", value.render(env)?))
            }
            SetItem::Labels { target, labels } => {
                let target = env.resolve(target);
                Ok(format!("{target}{}", env.render_labels(labels)))
            }
        }
    }
}

/// One entry of a REMOVE list.
#[derive(Debug, Clone)]
pub enum RemoveItem {
    /// `this0.key`
    Property(Expr),
    /// `this0:Label`
    Labels { target: Variable, labels: Vec<String> },
}

impl RemoveItem {
    /// Removes a property.
    #[must_use]
    pub fn property(target: impl Into<Expr>) -> Self {
        RemoveItem::Property(target.into())
    }

    /// Removes labels.
    #[must_use]
    pub fn labels<I, S>(target: &Variable, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RemoveItem::Labels {
            target: target.clone(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Expr> for RemoveItem {
    fn from(target: Expr) -> Self {
        RemoveItem::Property(target)
    }
}

impl Render for RemoveItem {
    fn render(&self, env: &mut Environment) -> Result<String> {
        match self {
            RemoveItem::Property(target) => target.render(env),
            RemoveItem::Labels { target, labels } => {
                let target = env.resolve(target);
                Ok(format!("{target}{}", env.render_labels(labels)))
            }
        }
    }
}

#[derive(Debug, Clone)]
enum UpdateBlock {
    Set(Vec<SetItem>),
    Remove(Vec<RemoveItem>),
}

/// SET and REMOVE blocks, in the order they were added.
///
/// Consecutive calls of the same kind merge into one block; alternating
/// calls start new blocks.
#[derive(Debug, Clone, Default)]
pub struct UpdateSlot {
    blocks: Vec<UpdateBlock>,
}

impl UpdateSlot {
    /// Appends SET items. Empty input is a no-op.
    pub fn set(&mut self, items: Vec<SetItem>) {
        if items.is_empty() {
            return;
        }
        match self.blocks.last_mut() {
            Some(UpdateBlock::Set(existing)) => existing.extend(items),
            _ => self.blocks.push(UpdateBlock::Set(items)),
        }
    }

    /// Appends REMOVE items. Empty input is a no-op.
    pub fn remove(&mut self, items: Vec<RemoveItem>) {
        if items.is_empty() {
            return;
        }
        match self.blocks.last_mut() {
            Some(UpdateBlock::Remove(existing)) => existing.extend(items),
            _ => self.blocks.push(UpdateBlock::Remove(items)),
        }
    }

    /// Returns true if nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Renders `SET` followed by one indented assignment per line.
pub(crate) fn render_set_list(
    keyword: &str,
    items: &[SetItem],
    env: &mut Environment,
) -> Result<String> {
    if items.is_empty() {
        return Ok(String::new());
    }
    let body = render_joined(items, env, ",\n")?;
    Ok(format!("{keyword}\n{}", pad_block(&body)))
}

impl Render for UpdateSlot {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let mut lines = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block {
                UpdateBlock::Set(items) => lines.push(render_set_list("SET", items, env)?),
                UpdateBlock::Remove(items) => {
                    lines.push(format!("REMOVE {}", render_joined(items, env, ", ")?));
                }
            }
        }
        Ok(lines.join("\n"))
    }
}

/// Clauses accepting SET and REMOVE.
pub trait WithSetRemove {
    #[doc(hidden)]
    fn update_slot(&mut self) -> &mut UpdateSlot;

    /// Adds SET items, merging with an immediately preceding SET.
    fn set<I, T>(&mut self, items: I) -> &mut Self
    where
        Self: Sized,
        I: IntoIterator<Item = T>,
        T: Into<SetItem>,
    {
        self.update_slot()
            .set(items.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a single `target = value` assignment.
    fn set_property(&mut self, target: impl Into<Expr>, value: impl Into<Expr>) -> &mut Self
    where
        Self: Sized,
    {
        self.update_slot().set(vec![SetItem::assign(target, value)]);
        self
    }

    /// Adds REMOVE items, merging with an immediately preceding REMOVE.
    fn remove<I, T>(&mut self, items: I) -> &mut Self
    where
        Self: Sized,
        I: IntoIterator<Item = T>,
        T: Into<RemoveItem>,
    {
        self.update_slot()
            .remove(items.into_iter().map(Into::into).collect());
        self
    }
}

// ==================== DELETE ====================

/// DELETE or DETACH DELETE targets.
#[derive(Debug, Clone, Default)]
pub struct DeleteSlot {
    targets: Vec<Expr>,
    detach: bool,
}

impl DeleteSlot {
    /// Adds targets. Any detach call makes the whole list DETACH DELETE.
    pub fn add(&mut self, targets: Vec<Expr>, detach: bool) {
        self.targets.extend(targets);
        self.detach |= detach;
    }

    /// Returns true if no target has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl Render for DeleteSlot {
    fn render(&self, env: &mut Environment) -> Result<String> {
        if self.targets.is_empty() {
            return Ok(String::new());
        }
        let keyword = if self.detach { "DETACH DELETE" } else { "DELETE" };
        Ok(format!("{keyword} {}", render_joined(&self.targets, env, ", ")?))
    }
}

/// Clauses accepting DELETE.
pub trait WithDelete {
    #[doc(hidden)]
    fn delete_slot(&mut self) -> &mut DeleteSlot;

    /// `DELETE a, b`
    fn delete<I, T>(&mut self, targets: I) -> &mut Self
    where
        Self: Sized,
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        self.delete_slot()
            .add(targets.into_iter().map(Into::into).collect(), false);
        self
    }

    /// `DETACH DELETE a, b`
    fn detach_delete<I, T>(&mut self, targets: I) -> &mut Self
    where
        Self: Sized,
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        self.delete_slot()
            .add(targets.into_iter().map(Into::into).collect(), true);
        self
    }
}

// ==================== ORDER BY / SKIP / LIMIT ====================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    fn keyword(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// ORDER BY, SKIP and LIMIT.
#[derive(Debug, Clone, Default)]
pub struct OrderSlot {
    sort: Vec<(Expr, Order)>,
    skip: Option<Expr>,
    limit: Option<Expr>,
}

impl OrderSlot {
    /// Appends a sort key.
    pub fn order_by(&mut self, expr: Expr, order: Order) {
        self.sort.push((expr, order));
    }

    /// Sets SKIP, replacing any previous value.
    pub fn skip(&mut self, skip: Expr) {
        self.skip = Some(skip);
    }

    /// Sets LIMIT, replacing any previous value.
    pub fn limit(&mut self, limit: Expr) {
        self.limit = Some(limit);
    }
}

impl Render for OrderSlot {
    fn render(&self, env: &mut Environment) -> Result<String> {
        let mut lines = Vec::new();
        if !self.sort.is_empty() {
            let mut keys = Vec::with_capacity(self.sort.len());
            for (expr, order) in &self.sort {
                keys.push(format!("{} {}", expr.render(env)?, order.keyword()));
            }
            lines.push(format!("ORDER BY {}", keys.join(", ")));
        }
        if let Some(skip) = &self.skip {
            lines.push(format!("SKIP {}", skip.render(env)?));
        }
        if let Some(limit) = &self.limit {
            lines.push(format!("LIMIT {}", limit.render(env)?));
        }
        Ok(lines.join("\n"))
    }
}

/// Clauses accepting ORDER BY, SKIP and LIMIT.
pub trait WithOrder {
    #[doc(hidden)]
    fn order_slot(&mut self) -> &mut OrderSlot;

    /// Adds a sort key.
    fn order_by(&mut self, expr: impl Into<Expr>, order: Order) -> &mut Self
    where
        Self: Sized,
    {
        self.order_slot().order_by(expr.into(), order);
        self
    }

    /// `SKIP n`
    fn skip(&mut self, skip: impl Into<Expr>) -> &mut Self
    where
        Self: Sized,
    {
        self.order_slot().skip(skip.into());
        self
    }

    /// `LIMIT n`
    fn limit(&mut self, limit: impl Into<Expr>) -> &mut Self
    where
        Self: Sized,
    {
        self.order_slot().limit(limit.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::types::Param;

    fn env() -> Environment {
        Environment::new(&BuildConfig::default())
    }

    #[test]
    fn test_where_slot_ands_repeated_predicates() {
        let node = Variable::node();
        let mut slot = WhereSlot::default();
        slot.and(Some(node.property("a").eq(1)));
        slot.and(None);
        slot.and(Some(node.property("b").eq(2)));
        assert_eq!(
            slot.render(&mut env()).unwrap(),
            "WHERE (this0.a = 1 AND this0.b = 2)"
        );
    }

    #[test]
    fn test_empty_where_renders_nothing() {
        let slot = WhereSlot::default();
        assert_eq!(slot.render(&mut env()).unwrap(), "");
    }

    #[test]
    fn test_update_slot_merges_consecutive_sets() {
        let node = Variable::node();
        let mut slot = UpdateSlot::default();
        slot.set(vec![SetItem::assign(node.property("a"), Param::new(1))]);
        slot.set(vec![SetItem::assign(node.property("b"), Param::new(2))]);
        assert_eq!(
            slot.render(&mut env()).unwrap(),
            "SET\n    this0.a = $param0,\n    this0.b = $param1"
        );
    }

    #[test]
    fn test_update_slot_keeps_append_order() {
        let node = Variable::node();
        let mut slot = UpdateSlot::default();
        slot.set(vec![SetItem::assign(node.property("a"), 1)]);
        slot.remove(vec![RemoveItem::property(node.property("b"))]);
        slot.set(vec![SetItem::labels(&node, ["Archived"])]);
        slot.set(Vec::new());
        assert_eq!(
            slot.render(&mut env()).unwrap(),
            "SET\n    this0.a = 1\nREMOVE this0.b\nSET\n    this0:Archived"
        );
    }

    #[test]
    fn test_set_merge_operator() {
        let node = Variable::node();
        let mut slot = UpdateSlot::default();
        slot.set(vec![SetItem::merge(&node, MapExpr::new().set("x", 1))]);
        assert_eq!(slot.render(&mut env()).unwrap(), "SET\n    this0 += { x: 1 }");
    }

    #[test]
    fn test_delete_slot() {
        let node = Variable::node();
        let mut slot = DeleteSlot::default();
        assert_eq!(slot.render(&mut env()).unwrap(), "");
        slot.add(vec![Expr::from(&node)], true);
        assert_eq!(slot.render(&mut env()).unwrap(), "DETACH DELETE this0");
    }

    #[test]
    fn test_order_slot() {
        let node = Variable::node();
        let mut slot = OrderSlot::default();
        slot.order_by(node.property("title"), Order::Asc);
        slot.order_by(node.property("year"), Order::Desc);
        slot.skip(Expr::from(10));
        slot.limit(Param::new(5).into());
        assert_eq!(
            slot.render(&mut env()).unwrap(),
            "ORDER BY this0.title ASC, this0.year DESC\nSKIP 10\nLIMIT $param0"
        );
    }
}
