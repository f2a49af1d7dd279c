//! A rule that records the operations it sees.

use std::sync::{Arc, Mutex};

use crate::{
    error::Error,
    rule::{MutationRule, QueryRule},
    types::{Context, Decision, Mutation, Query},
};

/// A rule returning a canned decision while recording every call.
///
/// Clones share the call log, so a test keeps one handle for
/// assertions and installs another into the policy under test:
///
/// ```
/// use rulegate::prelude::*;
///
/// let probe = RecordingRule::skipping();
/// let policy = QueryPolicy::new().rule(probe.clone());
///
/// policy.eval_query(&Context::new(), &TestQuery::new("note")).unwrap();
/// assert_eq!(probe.calls(), vec!["note".to_owned()]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingRule {
    decision: Decision,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingRule {
    /// A recording rule returning `decision` on every call.
    #[must_use]
    pub fn new(decision: Decision) -> Self {
        Self {
            decision,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A recording rule that always allows.
    #[must_use]
    pub fn allowing() -> Self {
        Self::new(Decision::allow())
    }

    /// A recording rule that always denies.
    #[must_use]
    pub fn denying() -> Self {
        Self::new(Decision::deny())
    }

    /// A recording rule that always skips.
    #[must_use]
    pub fn skipping() -> Self {
        Self::new(Decision::skip())
    }

    /// Entity names seen so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times the rule has been consulted.
    #[must_use]
    pub fn times_called(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns `true` if the rule was consulted at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.times_called() > 0
    }

    /// Forgets all recorded calls.
    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, entity: &str) {
        self.calls.lock().unwrap().push(entity.to_owned());
    }
}

impl QueryRule for RecordingRule {
    fn eval_query(&self, _cx: &Context, query: &dyn Query) -> Result<Decision, Error> {
        self.record(query.entity());
        Ok(self.decision.clone())
    }
}

impl MutationRule for RecordingRule {
    fn eval_mutation(&self, _cx: &Context, mutation: &dyn Mutation) -> Result<Decision, Error> {
        self.record(mutation.entity());
        Ok(self.decision.clone())
    }
}
