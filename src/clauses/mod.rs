//! Clauses and the clause chain.
//!
//! A query is a singly linked chain of clauses owned by its head:
//!
//! ```text
//! Match ──next──▶ With ──next──▶ Return
//!   │
//!   └─ WhereSlot / UpdateSlot / DeleteSlot (sub-clauses, not chained)
//! ```
//!
//! Chain-extension methods ([`Chainable`]) take `&mut self`, attach the new
//! clause as the successor and return a mutable borrow of it, so the next
//! call continues from the new tail while the head keeps ownership of the
//! whole chain. Rendering starts from the head, and only a
//! [`Query`](crate::Query) wrapping the head can be built.

mod call;
mod create;
mod delete;
mod foreach;
mod match_;
mod projection;
mod raw;
mod slots;
mod union;
mod unwind;
mod with;

use std::fmt;

use tracing::trace;

use crate::env::Environment;
use crate::error::{CypherError, Result};
use crate::expr::SubqueryBody;
use crate::render::Render;

pub use call::{Call, CallProcedure};
pub use create::{Create, Merge};
pub use delete::{Delete, Finish};
pub use foreach::Foreach;
pub use match_::Match;
pub use projection::{Projection, ProjectionItem};
pub use raw::RawClause;
pub use slots::{
    DeleteSlot, Order, OrderSlot, RemoveItem, SetItem, UpdateSlot, WhereSlot, WithDelete,
    WithOrder, WithSetRemove, WithWhere,
};
pub use union::Union;
pub use unwind::Unwind;
pub use with::{Return, With};

/// Kind tag of a clause, used in chain errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Match,
    Create,
    Merge,
    With,
    Return,
    Unwind,
    Call,
    CallProcedure,
    Foreach,
    Union,
    Delete,
    Finish,
    Raw,
}

impl ClauseKind {
    /// Returns the clause name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ClauseKind::Match => "Match",
            ClauseKind::Create => "Create",
            ClauseKind::Merge => "Merge",
            ClauseKind::With => "With",
            ClauseKind::Return => "Return",
            ClauseKind::Unwind => "Unwind",
            ClauseKind::Call => "Call",
            ClauseKind::CallProcedure => "CallProcedure",
            ClauseKind::Foreach => "Foreach",
            ClauseKind::Union => "Union",
            ClauseKind::Delete => "Delete",
            ClauseKind::Finish => "Finish",
            ClauseKind::Raw => "Raw",
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any clause.
#[derive(Debug, Clone)]
pub enum Clause {
    Match(Match),
    Create(Create),
    Merge(Merge),
    With(With),
    Return(Return),
    Unwind(Unwind),
    Call(Call),
    CallProcedure(CallProcedure),
    Foreach(Foreach),
    Union(Union),
    Delete(Delete),
    Finish(Finish),
    Raw(RawClause),
}

impl Clause {
    /// Returns the kind of this clause.
    #[must_use]
    pub fn kind(&self) -> ClauseKind {
        match self {
            Clause::Match(_) => ClauseKind::Match,
            Clause::Create(_) => ClauseKind::Create,
            Clause::Merge(_) => ClauseKind::Merge,
            Clause::With(_) => ClauseKind::With,
            Clause::Return(_) => ClauseKind::Return,
            Clause::Unwind(_) => ClauseKind::Unwind,
            Clause::Call(_) => ClauseKind::Call,
            Clause::CallProcedure(_) => ClauseKind::CallProcedure,
            Clause::Foreach(_) => ClauseKind::Foreach,
            Clause::Union(_) => ClauseKind::Union,
            Clause::Delete(_) => ClauseKind::Delete,
            Clause::Finish(_) => ClauseKind::Finish,
            Clause::Raw(_) => ClauseKind::Raw,
        }
    }

    /// Returns the successor, if any. Terminal clauses never have one.
    #[must_use]
    pub fn next(&self) -> Option<&Clause> {
        match self {
            Clause::Match(c) => c.next.get(),
            Clause::Create(c) => c.next.get(),
            Clause::Merge(c) => c.next.get(),
            Clause::With(c) => c.next.get(),
            Clause::Unwind(c) => c.next.get(),
            Clause::Call(c) => c.next.get(),
            Clause::CallProcedure(c) => c.next.get(),
            Clause::Foreach(c) => c.next.get(),
            Clause::Delete(c) => c.next.get(),
            Clause::Raw(c) => c.next.get(),
            Clause::Return(_) | Clause::Union(_) | Clause::Finish(_) => None,
        }
    }

    /// Returns true if the clause has no successor.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    /// Number of clauses from this one to the end of the chain.
    #[must_use]
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut current = self;
        while let Some(next) = current.next() {
            len += 1;
            current = next;
        }
        len
    }
}

impl Render for Clause {
    fn render(&self, env: &mut Environment) -> Result<String> {
        match self {
            Clause::Match(c) => c.render(env),
            Clause::Create(c) => c.render(env),
            Clause::Merge(c) => c.render(env),
            Clause::With(c) => c.render(env),
            Clause::Return(c) => c.render(env),
            Clause::Unwind(c) => c.render(env),
            Clause::Call(c) => c.render(env),
            Clause::CallProcedure(c) => c.render(env),
            Clause::Foreach(c) => c.render(env),
            Clause::Union(c) => c.render(env),
            Clause::Delete(c) => c.render(env),
            Clause::Finish(c) => c.render(env),
            Clause::Raw(c) => c.render(env),
        }
    }
}

/// A clause type that can be stored in the chain.
pub trait ChainLink: Into<Clause> {
    /// Kind tag of this clause type.
    const KIND: ClauseKind;

    #[doc(hidden)]
    fn from_clause_mut(clause: &mut Clause) -> Option<&mut Self>;
}

macro_rules! impl_chain_link {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl ChainLink for $ty {
                const KIND: ClauseKind = ClauseKind::$variant;

                fn from_clause_mut(clause: &mut Clause) -> Option<&mut Self> {
                    match clause {
                        Clause::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Clause {
                fn from(clause: $ty) -> Self {
                    Clause::$variant(clause)
                }
            }

            impl From<$ty> for SubqueryBody {
                fn from(clause: $ty) -> Self {
                    SubqueryBody::from(Clause::$variant(clause))
                }
            }
        )*
    };
}

impl_chain_link! {
    Match => Match,
    Create => Create,
    Merge => Merge,
    With => With,
    Return => Return,
    Unwind => Unwind,
    Call => Call,
    CallProcedure => CallProcedure,
    Foreach => Foreach,
    Union => Union,
    Delete => Delete,
    Finish => Finish,
    Raw => RawClause,
}

/// Successor slot of a chainable clause.
#[derive(Debug, Clone, Default)]
pub struct NextClause(Option<Box<Clause>>);

impl NextClause {
    /// Returns the successor, if attached.
    #[must_use]
    pub fn get(&self) -> Option<&Clause> {
        self.0.as_deref()
    }

    /// Returns true if a successor is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.0.is_some()
    }

    fn attach<C: ChainLink>(&mut self, current: ClauseKind, clause: C) -> Result<&mut C> {
        if let Some(existing) = &self.0 {
            return Err(CypherError::ClauseAlreadyChained {
                current: current.name(),
                next: C::KIND.name(),
                existing: existing.kind().name(),
            });
        }
        trace!(current = current.name(), next = C::KIND.name(), "clause.attach");
        let slot = self.0.insert(Box::new(clause.into()));
        match C::from_clause_mut(slot) {
            Some(inner) => Ok(inner),
            None => unreachable!("slot holds the {} that was just attached", C::KIND),
        }
    }

    /// Renders `"\n" + successor`, or nothing at the end of the chain.
    pub(crate) fn render(&self, env: &mut Environment) -> Result<String> {
        match &self.0 {
            Some(next) => Ok(format!("\n{}", next.render(env)?)),
            None => Ok(String::new()),
        }
    }
}

/// Clauses that can be followed by another clause.
///
/// Every method fails with [`CypherError::ClauseAlreadyChained`] if this
/// clause already has a successor.
pub trait Chainable: ChainLink {
    #[doc(hidden)]
    fn next_clause(&mut self) -> &mut NextClause;

    #[doc(hidden)]
    fn next_ref(&self) -> &NextClause;

    /// Attaches any clause as the successor.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn then<C: ChainLink>(&mut self, clause: C) -> Result<&mut C>
    where
        Self: Sized,
    {
        self.next_clause().attach(Self::KIND, clause)
    }

    /// Continues with MATCH.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn match_(&mut self, clause: impl Into<Match>) -> Result<&mut Match>
    where
        Self: Sized,
    {
        self.then(clause.into())
    }

    /// Continues with OPTIONAL MATCH.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn optional_match(&mut self, clause: impl Into<Match>) -> Result<&mut Match>
    where
        Self: Sized,
    {
        let mut clause = clause.into();
        clause.optional();
        self.then(clause)
    }

    /// Continues with CREATE.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn create(&mut self, clause: impl Into<Create>) -> Result<&mut Create>
    where
        Self: Sized,
    {
        self.then(clause.into())
    }

    /// Continues with MERGE.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn merge(&mut self, clause: impl Into<Merge>) -> Result<&mut Merge>
    where
        Self: Sized,
    {
        self.then(clause.into())
    }

    /// Continues with WITH.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn with(&mut self, clause: impl Into<With>) -> Result<&mut With>
    where
        Self: Sized,
    {
        self.then(clause.into())
    }

    /// Ends the chain with RETURN.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn return_(&mut self, clause: impl Into<Return>) -> Result<&mut Return>
    where
        Self: Sized,
    {
        self.then(clause.into())
    }

    /// Continues with UNWIND.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn unwind(&mut self, clause: impl Into<Unwind>) -> Result<&mut Unwind>
    where
        Self: Sized,
    {
        self.then(clause.into())
    }

    /// Continues with a CALL subquery.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn call(&mut self, clause: impl Into<Call>) -> Result<&mut Call>
    where
        Self: Sized,
    {
        self.then(clause.into())
    }

    /// Continues with a procedure call.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn call_procedure(&mut self, clause: impl Into<CallProcedure>) -> Result<&mut CallProcedure>
    where
        Self: Sized,
    {
        self.then(clause.into())
    }

    /// Continues with FOREACH.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn foreach(&mut self, clause: impl Into<Foreach>) -> Result<&mut Foreach>
    where
        Self: Sized,
    {
        self.then(clause.into())
    }

    /// Continues with a standalone DELETE.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn delete_clause(&mut self, clause: impl Into<Delete>) -> Result<&mut Delete>
    where
        Self: Sized,
    {
        self.then(clause.into())
    }

    /// Ends the chain with FINISH.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn finish(&mut self) -> Result<&mut Finish>
    where
        Self: Sized,
    {
        self.then(Finish)
    }

    /// Continues with raw clause text.
    ///
    /// # Errors
    ///
    /// Returns `ClauseAlreadyChained` if a successor is already attached.
    fn raw(&mut self, clause: impl Into<RawClause>) -> Result<&mut RawClause>
    where
        Self: Sized,
    {
        self.then(clause.into())
    }

    /// Returns true if no successor is attached.
    fn is_last(&self) -> bool {
        !self.next_ref().is_attached()
    }
}

macro_rules! impl_chainable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Chainable for $ty {
                fn next_clause(&mut self) -> &mut NextClause {
                    &mut self.next
                }

                fn next_ref(&self) -> &NextClause {
                    &self.next
                }
            }
        )*
    };
}

impl_chainable!(Match, Create, Merge, With, Unwind, Call, CallProcedure, Foreach, Delete, RawClause);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::expr::Expr;
    use crate::pattern::Pattern;
    use crate::types::Variable;

    fn render(clause: &impl Render) -> String {
        let mut env = Environment::new(&BuildConfig::default());
        clause.render(&mut env).unwrap()
    }

    #[test]
    fn test_chain_renders_in_order() {
        let node = Variable::node();
        let mut query = Match::new(Pattern::new(&node));
        query.with(&node).unwrap().return_(&node).unwrap();
        assert_eq!(render(&query), "MATCH (this0)\nWITH this0\nRETURN this0");
    }

    #[test]
    fn test_second_attach_fails() {
        let list = Variable::new();
        let mut unwind = Unwind::new(Expr::list([1, 2]), &list);
        unwind.unwind((Expr::from(&list), &Variable::new())).unwrap();

        let err = unwind
            .unwind((Expr::list([3]), &Variable::new()))
            .unwrap_err();
        match &err {
            CypherError::ClauseAlreadyChained { current, next, .. } => {
                assert_eq!(*current, "Unwind");
                assert_eq!(*next, "Unwind");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("Cannot add Unwind clause after Unwind"));
    }

    #[test]
    fn test_failed_attach_keeps_existing_successor() {
        let node = Variable::node();
        let mut query = Match::new(Pattern::new(&node));
        query.return_(&node).unwrap();
        assert!(query.with(&node).is_err());
        assert_eq!(render(&query), "MATCH (this0)\nRETURN this0");
    }

    #[test]
    fn test_is_last_and_chain_len() {
        let node = Variable::node();
        let mut query = Match::new(Pattern::new(&node));
        assert!(query.is_last());
        query.with(&node).unwrap().finish().unwrap();
        assert!(!query.is_last());

        let clause = Clause::from(query);
        assert_eq!(clause.kind(), ClauseKind::Match);
        assert_eq!(clause.chain_len(), 3);
        assert!(clause.next().is_some_and(|next| next.kind() == ClauseKind::With));
    }
}
