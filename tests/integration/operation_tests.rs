//! Operation kinds and operation-gated rules.

use rulegate::prelude::*;
use test_case::test_case;

use crate::common::init_tracing;

#[test_case(Op::DELETE, true ; "bulk delete is gated")]
#[test_case(Op::DELETE_ONE, true ; "single delete is gated")]
#[test_case(Op::UPDATE, false ; "bulk update passes")]
#[test_case(Op::UPDATE_ONE, false ; "single update passes")]
#[test_case(Op::CREATE, false ; "create passes")]
fn deny_delete_matrix(op: Op, denied: bool) {
    init_tracing();
    let policy = MutationPolicy::new().rule(deny_operation(Op::DELETE_ANY));
    let outcome = policy.eval_mutation(&Context::new(), &TestMutation::new("note", op));
    assert_eq!(outcome.is_err(), denied);
}

#[test]
fn on_operation_consults_inner_rule_only_for_matching_kinds() {
    init_tracing();
    let probe = RecordingRule::denying();
    let policy = MutationPolicy::new().rule(on_operation(probe.clone(), Op::UPDATE_ANY));

    assert!(
        policy
            .eval_mutation(&Context::new(), &TestMutation::new("note", Op::CREATE))
            .is_ok()
    );
    assert!(!probe.was_called());

    assert!(
        policy
            .eval_mutation(&Context::new(), &TestMutation::new("note", Op::UPDATE))
            .is_err()
    );
    assert_eq!(probe.calls(), vec!["note".to_owned()]);
}

#[test]
fn gated_rules_compose_with_later_rules() {
    init_tracing();
    // Bulk writes need a confirmation flag; everything else flows on.
    let policy = MutationPolicy::new()
        .rule(on_operation(
            ContextRule::new(|cx: &Context| {
                Ok(if cx.get("confirmed").and_then(ContextValue::as_bool) == Some(true) {
                    Decision::skip()
                } else {
                    Decision::deny_with("bulk writes need confirmation")
                })
            }),
            Op::UPDATE | Op::DELETE,
        ))
        .rule(always_allow());

    let plain = Context::new();
    let confirmed = Context::new().with("confirmed", true);

    assert!(
        policy
            .eval_mutation(&plain, &TestMutation::new("note", Op::UPDATE_ONE))
            .is_ok()
    );
    assert!(
        policy
            .eval_mutation(&plain, &TestMutation::new("note", Op::UPDATE))
            .is_err()
    );
    assert!(
        policy
            .eval_mutation(&confirmed, &TestMutation::new("note", Op::UPDATE))
            .is_ok()
    );
}

#[test]
fn denial_reports_operation_and_entity() {
    init_tracing();
    let policy = MutationPolicy::new().rule(deny_operation(Op::WRITE));
    let error = policy
        .eval_mutation(&Context::new(), &TestMutation::new("note", Op::DELETE_ONE))
        .unwrap_err();

    let denial = error.denial().expect("denial payload");
    assert_eq!(denial.entity(), Some("note"));
    assert_eq!(denial.operation(), Some(Op::DELETE_ONE));
    assert!(denial.decision().is_deny());
}
