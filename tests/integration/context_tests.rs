//! Context attributes and pre-resolved decisions.

use rulegate::prelude::*;

use crate::common::{init_tracing, viewer};

#[test]
fn stored_allow_bypasses_rules() {
    init_tracing();
    let probe = RecordingRule::denying();
    let policy = QueryPolicy::new().rule(probe.clone());
    let cx = Context::new().with_decision(Decision::allow());

    assert!(policy.eval_query(&cx, &TestQuery::new("note")).is_ok());
    assert!(!probe.was_called());
}

#[test]
fn stored_deny_bypasses_rules_and_keeps_its_message() {
    init_tracing();
    let probe = RecordingRule::allowing();
    let policy = MutationPolicy::new().rule(probe.clone());
    let cx = Context::new().with_decision(Decision::deny_with("maintenance window"));

    let error = policy
        .eval_mutation(&cx, &TestMutation::new("note", Op::CREATE))
        .unwrap_err();
    assert!(error.is_denial());
    assert_eq!(
        error.denial().and_then(|d| d.message()),
        Some("maintenance window")
    );
    assert!(!probe.was_called());
}

#[test]
fn storing_skip_changes_nothing() {
    init_tracing();
    let cx = Context::new().with_decision(Decision::skip());
    assert!(cx.decision().is_none());

    // Rules still run: the deny fallback is reached as usual.
    let policy = QueryPolicy::new().rule(always_deny());
    assert!(policy.eval_query(&cx, &TestQuery::new("note")).is_err());
}

#[test]
fn derived_context_pins_child_evaluations() {
    init_tracing();
    let policy = MutationPolicy::new().rule(deny_operation(Op::WRITE));
    let cx = viewer(7);

    // The parent operation was vetted by hand; children inherit its verdict.
    let pinned = cx.clone().with_decision(Decision::allow());
    assert!(
        policy
            .eval_mutation(&pinned, &TestMutation::new("note", Op::UPDATE_ONE))
            .is_ok()
    );
    // The original context is untouched.
    assert!(
        policy
            .eval_mutation(&cx, &TestMutation::new("note", Op::UPDATE_ONE))
            .is_err()
    );
}

#[test]
fn pinned_decision_applies_to_every_policy_that_sees_it() {
    init_tracing();
    let query_policy = QueryPolicy::new().rule(always_deny());
    let mutation_policy = MutationPolicy::new().rule(always_deny());
    let cx = Context::new().with_decision(Decision::allow_with("trusted migration"));

    assert!(query_policy.eval_query(&cx, &TestQuery::new("note")).is_ok());
    assert!(
        mutation_policy
            .eval_mutation(&cx, &TestMutation::new("note", Op::DELETE))
            .is_ok()
    );
}

#[test]
fn attributes_reach_rules() {
    init_tracing();
    let policy = QueryPolicy::new().rule(ContextRule::new(|cx: &Context| {
        Ok(match cx.get("viewer_id").and_then(ContextValue::as_integer) {
            Some(_) => Decision::skip(),
            None => Decision::deny_with("anonymous"),
        })
    }));

    assert!(policy.eval_query(&viewer(1), &TestQuery::new("note")).is_ok());
    let error = policy.eval_query(&Context::new(), &TestQuery::new("note")).unwrap_err();
    assert_eq!(error.denial().and_then(|d| d.message()), Some("anonymous"));
}
