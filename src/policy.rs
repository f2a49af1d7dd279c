//! Rule chains and their evaluation.

use std::{fmt, sync::Arc};

use crate::{
    error::{AccessDenied, Error},
    rule::{MutationRule, QueryRule},
    types::{Context, Decision, Mutation, Query},
};

/// An ordered chain of query rules.
///
/// Evaluation walks the chain in insertion order. The first rule to
/// return a terminal decision resolves the chain; a chain that runs
/// out of rules resolves to allow, so a closed-by-default policy ends
/// with [`always_deny`](crate::rule::always_deny). A decision already
/// stored in the [`Context`] resolves the chain before any rule runs.
///
/// Policies are cheap to clone and share their rules across clones.
/// A policy is itself a [`QueryRule`]: embedded in another chain it
/// contributes its resolution, or skips when exhausted.
#[derive(Clone, Default)]
pub struct QueryPolicy {
    rules: Vec<Arc<dyn QueryRule>>,
}

impl QueryPolicy {
    /// Creates an empty policy, which allows everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule, consuming and returning the policy.
    #[must_use]
    pub fn rule(mut self, rule: impl QueryRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Appends an already-shared rule in place.
    pub fn push(&mut self, rule: Arc<dyn QueryRule>) {
        self.rules.push(rule);
    }

    /// Number of rules in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when the chain has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates the chain and maps the resolution to `Ok` or an
    /// error.
    ///
    /// Allow and an exhausted chain produce `Ok(())`. Deny produces an
    /// error whose [`denial`](Error::denial) payload carries the
    /// resolving decision and the query's entity. A rule error stops
    /// the chain and propagates unchanged.
    pub fn eval_query(&self, cx: &Context, query: &dyn Query) -> Result<(), Error> {
        let decision = self.decide(cx, query)?;
        if decision.is_deny() {
            return Err(AccessDenied::new(decision)
                .with_entity(query.entity().to_owned())
                .into());
        }
        Ok(())
    }

    /// Resolves the chain to a decision without mapping deny to an
    /// error.
    ///
    /// Exhaustion resolves to skip, which
    /// [`eval_query`](QueryPolicy::eval_query) treats as allow but an
    /// enclosing chain treats as "ask the next rule". This is also the
    /// behavior of the policy's [`QueryRule`] impl.
    pub fn decide(&self, cx: &Context, query: &dyn Query) -> Result<Decision, Error> {
        if let Some(decision) = cx.decision() {
            tracing::debug!(entity = query.entity(), %decision, "using decision from context");
            return Ok(decision.clone());
        }
        for (index, rule) in self.rules.iter().enumerate() {
            let decision = rule.eval_query(cx, query)?;
            tracing::trace!(
                entity = query.entity(),
                index,
                verdict = %decision.verdict(),
                "query rule evaluated"
            );
            if decision.is_terminal() {
                tracing::debug!(entity = query.entity(), index, %decision, "query chain resolved");
                return Ok(decision);
            }
        }
        tracing::debug!(
            entity = query.entity(),
            rules = self.rules.len(),
            "query chain exhausted"
        );
        Ok(Decision::skip())
    }
}

impl QueryRule for QueryPolicy {
    fn eval_query(&self, cx: &Context, query: &dyn Query) -> Result<Decision, Error> {
        self.decide(cx, query)
    }
}

impl fmt::Debug for QueryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryPolicy")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// An ordered chain of mutation rules.
///
/// Resolution works exactly like [`QueryPolicy`]; denial errors
/// additionally record the mutation kind.
#[derive(Clone, Default)]
pub struct MutationPolicy {
    rules: Vec<Arc<dyn MutationRule>>,
}

impl MutationPolicy {
    /// Creates an empty policy, which allows everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule, consuming and returning the policy.
    #[must_use]
    pub fn rule(mut self, rule: impl MutationRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Appends an already-shared rule in place.
    pub fn push(&mut self, rule: Arc<dyn MutationRule>) {
        self.rules.push(rule);
    }

    /// Number of rules in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when the chain has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates the chain and maps the resolution to `Ok` or an
    /// error.
    ///
    /// See [`QueryPolicy::eval_query`]; the denial payload here also
    /// carries [`Mutation::op`].
    pub fn eval_mutation(&self, cx: &Context, mutation: &dyn Mutation) -> Result<(), Error> {
        let decision = self.decide(cx, mutation)?;
        if decision.is_deny() {
            return Err(AccessDenied::new(decision)
                .with_entity(mutation.entity().to_owned())
                .with_operation(mutation.op())
                .into());
        }
        Ok(())
    }

    /// Resolves the chain to a decision without mapping deny to an
    /// error. Exhaustion resolves to skip.
    pub fn decide(&self, cx: &Context, mutation: &dyn Mutation) -> Result<Decision, Error> {
        if let Some(decision) = cx.decision() {
            tracing::debug!(
                entity = mutation.entity(),
                op = %mutation.op(),
                %decision,
                "using decision from context"
            );
            return Ok(decision.clone());
        }
        for (index, rule) in self.rules.iter().enumerate() {
            let decision = rule.eval_mutation(cx, mutation)?;
            tracing::trace!(
                entity = mutation.entity(),
                op = %mutation.op(),
                index,
                verdict = %decision.verdict(),
                "mutation rule evaluated"
            );
            if decision.is_terminal() {
                tracing::debug!(
                    entity = mutation.entity(),
                    op = %mutation.op(),
                    index,
                    %decision,
                    "mutation chain resolved"
                );
                return Ok(decision);
            }
        }
        tracing::debug!(
            entity = mutation.entity(),
            op = %mutation.op(),
            rules = self.rules.len(),
            "mutation chain exhausted"
        );
        Ok(Decision::skip())
    }
}

impl MutationRule for MutationPolicy {
    fn eval_mutation(&self, cx: &Context, mutation: &dyn Mutation) -> Result<Decision, Error> {
        self.decide(cx, mutation)
    }
}

impl fmt::Debug for MutationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationPolicy")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// The query and mutation chains guarding one entity, or one schema.
#[derive(Clone, Debug, Default)]
pub struct Policy {
    query: QueryPolicy,
    mutation: MutationPolicy,
}

impl Policy {
    /// Combines a query chain and a mutation chain.
    #[must_use]
    pub fn new(query: QueryPolicy, mutation: MutationPolicy) -> Self {
        Self { query, mutation }
    }

    /// The query half.
    #[must_use]
    pub fn query(&self) -> &QueryPolicy {
        &self.query
    }

    /// The mutation half.
    #[must_use]
    pub fn mutation(&self) -> &MutationPolicy {
        &self.mutation
    }

    /// Evaluates the query chain. See [`QueryPolicy::eval_query`].
    pub fn eval_query(&self, cx: &Context, query: &dyn Query) -> Result<(), Error> {
        self.query.eval_query(cx, query)
    }

    /// Evaluates the mutation chain. See
    /// [`MutationPolicy::eval_mutation`].
    pub fn eval_mutation(&self, cx: &Context, mutation: &dyn Mutation) -> Result<(), Error> {
        self.mutation.eval_mutation(cx, mutation)
    }
}
