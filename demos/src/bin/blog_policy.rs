//! A small blog schema guarded end to end.
//!
//! Published posts are readable by everyone, drafts only by a
//! signed-in author. Writes require the author; bulk deletes are
//! reserved for admins.
//!
//! Run with `cargo run -p rulegate-demos --bin blog_policy`.

use rulegate::prelude::*;

#[derive(Debug, Clone)]
struct PostQuery {
    include_drafts: bool,
}

impl Query for PostQuery {
    fn entity(&self) -> &str {
        "post"
    }
}

#[derive(Debug, Clone)]
struct PostMutation {
    op: Op,
    author_id: i64,
}

impl Mutation for PostMutation {
    fn entity(&self) -> &str {
        "post"
    }

    fn op(&self) -> Op {
        self.op
    }
}

fn post_policy() -> Policy {
    let admins = |cx: &Context| -> Result<Decision> {
        Ok(match cx.get("role").and_then(ContextValue::as_str) {
            Some("admin") => Decision::allow(),
            _ => Decision::skip(),
        })
    };

    let query = QueryPolicy::new()
        .rule(context_rule(admins))
        .rule(EntityQueryRule::new(|cx: &Context, query: &PostQuery| {
            Ok(if query.include_drafts && !cx.contains_key("viewer_id") {
                Decision::deny_with("drafts require a signed-in author")
            } else {
                Decision::allow()
            })
        }));

    let mutation = MutationPolicy::new()
        .rule(context_rule(admins))
        .rule(deny_operation(Op::DELETE))
        .rule(EntityMutationRule::new(
            |cx: &Context, mutation: &PostMutation| {
                Ok(match cx.get("viewer_id").and_then(ContextValue::as_integer) {
                    Some(viewer) if viewer == mutation.author_id => Decision::allow(),
                    _ => Decision::deny_with("only the author may write"),
                })
            },
        ));

    Policy::new(query, mutation)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let policy = post_policy();

    let anonymous = Context::new();
    let author = Context::new().with("viewer_id", 7).with("role", "member");
    let admin = Context::new().with("role", "admin");

    let published = PostQuery { include_drafts: false };
    let drafts = PostQuery { include_drafts: true };

    report("anonymous reads published", policy.eval_query(&anonymous, &published));
    report("anonymous reads drafts", policy.eval_query(&anonymous, &drafts));
    report("author reads drafts", policy.eval_query(&author, &drafts));

    let edit_own = PostMutation { op: Op::UPDATE_ONE, author_id: 7 };
    let edit_other = PostMutation { op: Op::UPDATE_ONE, author_id: 9 };
    let purge = PostMutation { op: Op::DELETE, author_id: 7 };

    report("author edits own post", policy.eval_mutation(&author, &edit_own));
    report("author edits another post", policy.eval_mutation(&author, &edit_other));
    report("author bulk-deletes", policy.eval_mutation(&author, &purge));
    report("admin bulk-deletes", policy.eval_mutation(&admin, &purge));
}

fn report(label: &str, outcome: Result<()>) {
    match outcome {
        Ok(()) => println!("{label}: allowed"),
        Err(error) => println!("{label}: {error}"),
    }
}
