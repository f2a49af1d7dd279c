//! Mutation rules gated by operation kind.

use crate::{
    error::Error,
    rule::MutationRule,
    types::{Context, Decision, Mutation, Op},
};

/// Runs the inner rule only for mutations whose kind is in `mask`,
/// skipping everything else.
///
/// ```
/// use rulegate::prelude::*;
///
/// let policy = MutationPolicy::new().rule(on_operation(always_deny(), Op::DELETE_ANY));
///
/// let cx = Context::new();
/// assert!(policy.eval_mutation(&cx, &TestMutation::new("note", Op::DELETE)).is_err());
/// assert!(policy.eval_mutation(&cx, &TestMutation::new("note", Op::CREATE)).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct OnOperation<R> {
    rule: R,
    mask: Op,
}

impl<R: MutationRule> OnOperation<R> {
    /// Gates `rule` behind the operation mask.
    #[must_use]
    pub fn new(rule: R, mask: Op) -> Self {
        Self { rule, mask }
    }
}

impl<R: MutationRule> MutationRule for OnOperation<R> {
    fn eval_mutation(&self, cx: &Context, mutation: &dyn Mutation) -> Result<Decision, Error> {
        if !mutation.op_is(self.mask) {
            return Ok(Decision::skip());
        }
        self.rule.eval_mutation(cx, mutation)
    }
}

/// Shorthand for [`OnOperation::new`].
#[must_use]
pub fn on_operation<R: MutationRule>(rule: R, mask: Op) -> OnOperation<R> {
    OnOperation::new(rule, mask)
}

/// Denies every mutation whose kind is in `mask`, skipping the rest.
#[derive(Debug, Clone)]
pub struct DenyOperation {
    mask: Op,
}

impl DenyOperation {
    /// Denies the mutation kinds in `mask`.
    #[must_use]
    pub fn new(mask: Op) -> Self {
        Self { mask }
    }
}

impl MutationRule for DenyOperation {
    fn eval_mutation(&self, _cx: &Context, mutation: &dyn Mutation) -> Result<Decision, Error> {
        if mutation.op_is(self.mask) {
            return Ok(Decision::deny_with(format!(
                "operation {} is not permitted on {}",
                mutation.op(),
                mutation.entity()
            )));
        }
        Ok(Decision::skip())
    }
}

/// Shorthand for [`DenyOperation::new`].
#[must_use]
pub fn deny_operation(mask: Op) -> DenyOperation {
    DenyOperation::new(mask)
}
