//! Chain resolution order, fallbacks, and composition.

use rulegate::prelude::*;

use crate::common::{NoteQuery, init_tracing};

#[test]
fn empty_policy_allows() {
    init_tracing();
    let policy = QueryPolicy::new();
    assert!(policy.eval_query(&Context::new(), &TestQuery::new("note")).is_ok());
}

#[test]
fn all_skip_chain_allows() {
    init_tracing();
    let first = RecordingRule::skipping();
    let second = RecordingRule::skipping();
    let policy = QueryPolicy::new().rule(first.clone()).rule(second.clone());

    assert!(policy.eval_query(&Context::new(), &TestQuery::new("note")).is_ok());
    assert_eq!(first.times_called(), 1);
    assert_eq!(second.times_called(), 1);
}

#[test]
fn first_terminal_verdict_wins() {
    init_tracing();
    let unreached = RecordingRule::denying();
    let policy = QueryPolicy::new()
        .rule(RecordingRule::skipping())
        .rule(RecordingRule::allowing())
        .rule(unreached.clone());

    assert!(policy.eval_query(&Context::new(), &TestQuery::new("note")).is_ok());
    assert!(!unreached.was_called());
}

#[test]
fn deny_stops_the_chain_and_keeps_its_message() {
    init_tracing();
    let unreached = RecordingRule::allowing();
    let policy = QueryPolicy::new()
        .rule(always_deny().with_message("no reads today"))
        .rule(unreached.clone());

    let error = policy.eval_query(&Context::new(), &TestQuery::new("note")).unwrap_err();
    assert!(error.is_denial());
    assert_eq!(error.to_string(), "access denied: no reads today (entity: note)");
    assert_eq!(error.denial().and_then(|d| d.message()), Some("no reads today"));
    assert!(!unreached.was_called());
}

#[test]
fn skip_then_deny_resolves_before_later_allows() {
    init_tracing();
    let unreached = RecordingRule::allowing();
    let policy = QueryPolicy::new()
        .rule(RecordingRule::skipping())
        .rule(always_deny().with_message("no access"))
        .rule(unreached.clone());

    let error = policy.eval_query(&Context::new(), &TestQuery::new("note")).unwrap_err();
    assert_eq!(error.denial().and_then(|d| d.message()), Some("no access"));
    assert!(!unreached.was_called());
}

#[test]
fn always_deny_alone_denies_everything() {
    init_tracing();
    let queries = QueryPolicy::new().rule(always_deny());
    let mutations = MutationPolicy::new().rule(always_deny());

    let cx = Context::new();
    for entity in ["note", "tag", "user"] {
        assert!(queries.eval_query(&cx, &TestQuery::new(entity)).is_err());
    }
    for op in [Op::CREATE, Op::UPDATE, Op::DELETE_ONE] {
        assert!(
            mutations
                .eval_mutation(&cx, &TestMutation::new("note", op))
                .is_err()
        );
    }
}

#[test]
fn rule_order_decides_between_conflicting_rules() {
    init_tracing();
    let deny_first = QueryPolicy::new().rule(always_deny()).rule(always_allow());
    let allow_first = QueryPolicy::new().rule(always_allow()).rule(always_deny());

    let cx = Context::new();
    assert!(deny_first.eval_query(&cx, &TestQuery::new("note")).is_err());
    assert!(allow_first.eval_query(&cx, &TestQuery::new("note")).is_ok());
}

#[test]
fn rule_errors_propagate_verbatim() {
    init_tracing();
    let unreached = RecordingRule::allowing();
    let policy = QueryPolicy::new()
        .rule(|_: &Context, _: &dyn Query| -> Result<Decision> {
            Err(Error::evaluation("viewer store unreachable"))
        })
        .rule(unreached.clone());

    let error = policy.eval_query(&Context::new(), &TestQuery::new("note")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Evaluation);
    assert_eq!(error.to_string(), "evaluation failed: viewer store unreachable");
    assert!(!error.is_denial());
    assert!(!unreached.was_called());
}

#[test]
fn nested_policy_exhaustion_falls_through_to_outer_rules() {
    init_tracing();
    let inner = QueryPolicy::new().rule(RecordingRule::skipping());
    let policy = QueryPolicy::new()
        .rule(inner)
        .rule(always_deny().with_message("outer fallback"));

    let error = policy.eval_query(&Context::new(), &TestQuery::new("note")).unwrap_err();
    assert_eq!(error.denial().and_then(|d| d.message()), Some("outer fallback"));
}

#[test]
fn nested_policy_allow_resolves_the_outer_chain() {
    init_tracing();
    let inner = QueryPolicy::new().rule(RecordingRule::allowing());
    let policy = QueryPolicy::new().rule(inner).rule(always_deny());

    assert!(policy.eval_query(&Context::new(), &TestQuery::new("note")).is_ok());
}

#[test]
fn wrapped_denials_unwrap_across_layers() {
    init_tracing();
    let policy = QueryPolicy::new().rule(|cx: &Context, query: &dyn Query| -> Result<Decision> {
        // A pre-flight hook that consults a nested policy and wraps
        // whatever comes back in its own error.
        let nested = QueryPolicy::new().rule(always_deny().with_message("slug is reserved"));
        match nested.eval_query(cx, query) {
            Ok(()) => Ok(Decision::skip()),
            Err(denial) => Err(Error::evaluation("pre-flight check failed").with_source(denial)),
        }
    });

    let error = policy.eval_query(&Context::new(), &TestQuery::new("note")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Evaluation);
    assert!(error.is_denial());
    let denial = error.denial().expect("denial recoverable through wrapping");
    assert_eq!(denial.message(), Some("slug is reserved"));
    assert_eq!(denial.entity(), Some("note"));
}

#[test]
fn wrapped_mismatches_stay_denials() {
    init_tracing();
    let policy = QueryPolicy::new().rule(|cx: &Context, query: &dyn Query| -> Result<Decision> {
        // A hook that funnels a typed rule through its own error.
        let typed = QueryPolicy::new().rule(EntityQueryRule::new(
            |_: &Context, _: &NoteQuery| Ok(Decision::allow()),
        ));
        match typed.eval_query(cx, query) {
            Ok(()) => Ok(Decision::skip()),
            Err(mismatch) => {
                Err(Error::evaluation("pre-flight check failed").with_source(mismatch))
            }
        }
    });

    let error = policy.eval_query(&Context::new(), &TestQuery::new("card")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Evaluation);
    assert!(error.is_denial());
    assert!(error.denial().is_none());
}

#[test]
fn evaluation_is_repeatable() {
    init_tracing();
    let policy = QueryPolicy::new().rule(|cx: &Context, _: &dyn Query| -> Result<Decision> {
        Ok(match cx.get("tenant").and_then(ContextValue::as_str) {
            Some("acme") => Decision::allow(),
            _ => Decision::deny(),
        })
    });

    let acme = Context::new().with("tenant", "acme");
    let other = Context::new().with("tenant", "initech");
    for _ in 0..3 {
        assert!(policy.eval_query(&acme, &TestQuery::new("note")).is_ok());
        assert!(policy.eval_query(&other, &TestQuery::new("note")).is_err());
    }
}
