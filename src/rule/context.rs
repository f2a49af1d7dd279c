//! Rules that decide from context alone.

use crate::{
    error::Error,
    rule::{MutationRule, QueryRule},
    types::{Context, Decision, Mutation, Query},
};

/// A rule that ignores the operation and decides from the [`Context`].
///
/// Implements both [`QueryRule`] and [`MutationRule`], so one instance
/// can guard reads and writes alike. Typical uses are viewer checks
/// that hold regardless of what is being touched:
///
/// ```
/// use rulegate::prelude::*;
///
/// let admins_allowed = ContextRule::new(|cx: &Context| {
///     Ok(match cx.get("role").and_then(ContextValue::as_str) {
///         Some("admin") => Decision::allow(),
///         _ => Decision::skip(),
///     })
/// });
///
/// let policy = QueryPolicy::new().rule(admins_allowed).rule(always_deny());
///
/// let admin = Context::new().with("role", "admin");
/// assert!(policy.eval_query(&admin, &TestQuery::new("note")).is_ok());
/// assert!(policy.eval_query(&Context::new(), &TestQuery::new("note")).is_err());
/// ```
#[derive(Clone)]
pub struct ContextRule<F> {
    rule: F,
}

impl<F> ContextRule<F>
where
    F: Fn(&Context) -> Result<Decision, Error> + Send + Sync,
{
    /// Wraps a function of the context.
    #[must_use]
    pub fn new(rule: F) -> Self {
        Self { rule }
    }
}

impl<F> QueryRule for ContextRule<F>
where
    F: Fn(&Context) -> Result<Decision, Error> + Send + Sync,
{
    fn eval_query(&self, cx: &Context, _query: &dyn Query) -> Result<Decision, Error> {
        (self.rule)(cx)
    }
}

impl<F> MutationRule for ContextRule<F>
where
    F: Fn(&Context) -> Result<Decision, Error> + Send + Sync,
{
    fn eval_mutation(&self, cx: &Context, _mutation: &dyn Mutation) -> Result<Decision, Error> {
        (self.rule)(cx)
    }
}

/// Shorthand for [`ContextRule::new`].
#[must_use]
pub fn context_rule<F>(rule: F) -> ContextRule<F>
where
    F: Fn(&Context) -> Result<Decision, Error> + Send + Sync,
{
    ContextRule::new(rule)
}
