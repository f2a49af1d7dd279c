//! Rules with a constant outcome.

use std::borrow::Cow;

use crate::{
    error::Error,
    rule::{MutationRule, QueryRule},
    types::{Context, Decision, Mutation, Query},
};

/// A rule that returns the same decision for every operation.
///
/// Most useful as the explicit fallback at the end of a chain, since
/// an exhausted chain allows by default:
///
/// ```
/// use rulegate::prelude::*;
///
/// let policy = QueryPolicy::new().rule(always_deny().with_message("closed by default"));
/// let error = policy
///     .eval_query(&Context::new(), &TestQuery::new("note"))
///     .unwrap_err();
/// assert!(error.is_denial());
/// ```
#[derive(Debug, Clone)]
pub struct FixedRule {
    decision: Decision,
}

impl FixedRule {
    /// Creates a rule that always returns `decision`.
    #[must_use]
    pub fn new(decision: Decision) -> Self {
        Self { decision }
    }

    /// Attaches a message to the fixed decision.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.decision = self.decision.with_message(message);
        self
    }

    /// The decision this rule returns.
    #[must_use]
    pub fn decision(&self) -> &Decision {
        &self.decision
    }
}

impl QueryRule for FixedRule {
    fn eval_query(&self, _cx: &Context, _query: &dyn Query) -> Result<Decision, Error> {
        Ok(self.decision.clone())
    }
}

impl MutationRule for FixedRule {
    fn eval_mutation(&self, _cx: &Context, _mutation: &dyn Mutation) -> Result<Decision, Error> {
        Ok(self.decision.clone())
    }
}

/// A rule that allows every operation it sees.
#[must_use]
pub fn always_allow() -> FixedRule {
    FixedRule::new(Decision::allow())
}

/// A rule that denies every operation it sees.
#[must_use]
pub fn always_deny() -> FixedRule {
    FixedRule::new(Decision::deny())
}
