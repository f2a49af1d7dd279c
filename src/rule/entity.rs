//! Typed rules for a single entity.

use std::{
    any::{Any, type_name},
    marker::PhantomData,
};

use crate::{
    error::{EntityMismatch, Error},
    rule::{MutationRule, QueryRule},
    types::{Context, Decision, Mutation, Query},
};

/// Lifts a function over one concrete query type into a [`QueryRule`].
///
/// The rule downcasts each incoming query to `T` and hands the typed
/// value to the function, so rules written next to a schema get the
/// query's real fields instead of a `dyn` object. A query of any other
/// type resolves to an
/// [`EntityMismatch`](crate::ErrorKind::EntityMismatch) error: a rule
/// registered for one entity must not silently pass judgment on
/// another, and failing loudly turns a mis-wired policy into a test
/// failure instead of a hole.
///
/// ```
/// use rulegate::prelude::*;
///
/// struct NoteQuery {
///     workspace: i64,
/// }
///
/// impl Query for NoteQuery {
///     fn entity(&self) -> &str {
///         "note"
///     }
/// }
///
/// let policy = QueryPolicy::new().rule(EntityQueryRule::new(
///     |cx: &Context, query: &NoteQuery| {
///         Ok(match cx.get("workspace").and_then(ContextValue::as_integer) {
///             Some(workspace) if workspace == query.workspace => Decision::allow(),
///             _ => Decision::deny_with("wrong workspace"),
///         })
///     },
/// ));
///
/// let cx = Context::new().with("workspace", 3);
/// assert!(policy.eval_query(&cx, &NoteQuery { workspace: 3 }).is_ok());
/// assert!(policy.eval_query(&cx, &NoteQuery { workspace: 4 }).is_err());
/// ```
pub struct EntityQueryRule<T, F> {
    rule: F,
    entity: PhantomData<fn(&T)>,
}

impl<T, F> EntityQueryRule<T, F>
where
    T: Query,
    F: Fn(&Context, &T) -> Result<Decision, Error> + Send + Sync,
{
    /// Wraps a function over `T` queries.
    #[must_use]
    pub fn new(rule: F) -> Self {
        Self {
            rule,
            entity: PhantomData,
        }
    }
}

impl<T, F> QueryRule for EntityQueryRule<T, F>
where
    T: Query,
    F: Fn(&Context, &T) -> Result<Decision, Error> + Send + Sync,
{
    fn eval_query(&self, cx: &Context, query: &dyn Query) -> Result<Decision, Error> {
        match (query as &dyn Any).downcast_ref::<T>() {
            Some(typed) => (self.rule)(cx, typed),
            None => Err(EntityMismatch::new(type_name::<T>(), query.entity()).into()),
        }
    }
}

/// Lifts a function over one concrete mutation type into a
/// [`MutationRule`].
///
/// Mismatched mutations are rejected the same way [`EntityQueryRule`]
/// rejects mismatched queries.
pub struct EntityMutationRule<T, F> {
    rule: F,
    entity: PhantomData<fn(&T)>,
}

impl<T, F> EntityMutationRule<T, F>
where
    T: Mutation,
    F: Fn(&Context, &T) -> Result<Decision, Error> + Send + Sync,
{
    /// Wraps a function over `T` mutations.
    #[must_use]
    pub fn new(rule: F) -> Self {
        Self {
            rule,
            entity: PhantomData,
        }
    }
}

impl<T, F> MutationRule for EntityMutationRule<T, F>
where
    T: Mutation,
    F: Fn(&Context, &T) -> Result<Decision, Error> + Send + Sync,
{
    fn eval_mutation(&self, cx: &Context, mutation: &dyn Mutation) -> Result<Decision, Error> {
        match (mutation as &dyn Any).downcast_ref::<T>() {
            Some(typed) => (self.rule)(cx, typed),
            None => Err(EntityMismatch::new(type_name::<T>(), mutation.entity()).into()),
        }
    }
}
