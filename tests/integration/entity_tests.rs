//! Typed per-entity rules and mismatch handling.

use rulegate::prelude::*;

use crate::common::{NoteMutation, NoteQuery, init_tracing, note_mutation_policy, viewer};

#[test]
fn typed_rule_reads_entity_fields() {
    init_tracing();
    let policy = QueryPolicy::new().rule(EntityQueryRule::new(
        |cx: &Context, query: &NoteQuery| {
            Ok(match cx.get("viewer_id").and_then(ContextValue::as_integer) {
                Some(viewer_id) if viewer_id == query.author_id => Decision::allow(),
                _ => Decision::deny_with("not the author"),
            })
        },
    ));

    assert!(policy.eval_query(&viewer(7), &NoteQuery { author_id: 7 }).is_ok());

    let error = policy
        .eval_query(&viewer(8), &NoteQuery { author_id: 7 })
        .unwrap_err();
    assert!(error.is_denial());
    assert_eq!(error.denial().and_then(|d| d.message()), Some("not the author"));
}

#[test]
fn mismatched_query_type_is_denied() {
    init_tracing();
    let policy = QueryPolicy::new()
        .rule(EntityQueryRule::new(|_: &Context, _: &NoteQuery| {
            Ok(Decision::allow())
        }));

    let error = policy.eval_query(&Context::new(), &TestQuery::new("card")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::EntityMismatch);
    assert!(error.is_denial());

    let message = error.to_string();
    assert!(message.contains("NoteQuery"), "message: {message}");
    assert!(message.contains("card"), "message: {message}");
}

#[test]
fn author_policy_resolves_in_rule_order() {
    init_tracing();
    let policy = note_mutation_policy();

    // Authors touch their own notes, deletes included.
    assert!(
        policy
            .eval_mutation(&viewer(7), &NoteMutation { op: Op::DELETE_ONE, author_id: 7 })
            .is_ok()
    );
    // Everyone else may update but not delete.
    assert!(
        policy
            .eval_mutation(&viewer(9), &NoteMutation { op: Op::UPDATE_ONE, author_id: 7 })
            .is_ok()
    );
    let error = policy
        .eval_mutation(&viewer(9), &NoteMutation { op: Op::DELETE_ONE, author_id: 7 })
        .unwrap_err();
    assert!(error.is_denial());
    let denial = error.denial().expect("denial payload");
    assert_eq!(denial.operation(), Some(Op::DELETE_ONE));
}

#[test]
fn policies_reject_foreign_mutations() {
    init_tracing();
    let policy = note_mutation_policy();

    // Routing a tag mutation into the note policy is a wiring bug and
    // surfaces as a mismatch, not as a silent pass.
    let error = policy
        .eval_mutation(&viewer(7), &TestMutation::new("tag", Op::CREATE))
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::EntityMismatch);
    assert!(error.is_denial());
}
