//! Gate deletes behind an allow-list of maintainers.
//!
//! Run with `cargo run -p rulegate-demos --bin deny_delete`; set
//! `RUST_LOG=trace` to watch every rule fire.

use rulegate::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let policy = MutationPolicy::new()
        .rule(ContextRule::new(|cx: &Context| {
            Ok(match cx.get("role").and_then(ContextValue::as_str) {
                Some("maintainer") => Decision::allow(),
                _ => Decision::skip(),
            })
        }))
        .rule(deny_operation(Op::DELETE_ANY));

    let delete = TestMutation::new("artifact", Op::DELETE);

    for role in ["maintainer", "contributor"] {
        let cx = Context::new().with("role", role);
        match policy.eval_mutation(&cx, &delete) {
            Ok(()) => println!("{role}: delete allowed"),
            Err(error) => println!("{role}: {error}"),
        }
    }
}
