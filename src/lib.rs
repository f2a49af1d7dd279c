//! Ordered allow/deny/skip rule chains for gating data access.
//!
//! `rulegate` decides whether a query or a mutation may proceed. Rules
//! are consulted in order and each returns a [`Decision`]: allow or
//! deny resolves the operation immediately, skip hands it to the next
//! rule. A chain that runs out of rules allows, so chains that should
//! be closed by default end with an explicit fallback.
//!
//! # Quick start
//!
//! ```
//! use rulegate::prelude::*;
//!
//! // Admins may do anything; nobody else deletes; the rest is left to
//! // later rules and ultimately allowed.
//! let policy = MutationPolicy::new()
//!     .rule(ContextRule::new(|cx: &Context| {
//!         Ok(match cx.get("role").and_then(ContextValue::as_str) {
//!             Some("admin") => Decision::allow(),
//!             _ => Decision::skip(),
//!         })
//!     }))
//!     .rule(deny_operation(Op::DELETE_ANY));
//!
//! let admin = Context::new().with("role", "admin");
//! let intern = Context::new().with("role", "intern");
//! let delete = TestMutation::new("note", Op::DELETE_ONE);
//!
//! assert!(policy.eval_mutation(&admin, &delete).is_ok());
//!
//! let error = policy.eval_mutation(&intern, &delete).unwrap_err();
//! assert!(error.is_denial());
//! ```
//!
//! # Pre-resolved decisions
//!
//! A [`Decision`] stored in the [`Context`] resolves every policy that
//! sees that context, without consulting a single rule. This is how a
//! privileged internal call bypasses checks, and how a parent
//! operation pins the verdict for the sub-operations it spawns:
//!
//! ```
//! use rulegate::prelude::*;
//!
//! let policy = QueryPolicy::new().rule(always_deny());
//! let cx = Context::new().with_decision(Decision::allow());
//! assert!(policy.eval_query(&cx, &TestQuery::new("note")).is_ok());
//! ```
//!
//! # Denials are errors with structure
//!
//! Evaluation returns `Result<(), Error>`. A deny resolution carries
//! an [`AccessDenied`] payload in the error's source chain, and
//! [`Error::denial`] recovers it through any number of wrapping
//! layers, so middleware can always tell "forbidden" from "broken".

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod error;
pub mod policy;
pub mod prelude;
pub mod rule;
pub mod testing;
pub mod types;

pub use error::{AccessDenied, EntityMismatch, Error, ErrorKind, Result};
pub use policy::{MutationPolicy, Policy, QueryPolicy};
pub use rule::{MutationRule, QueryRule};
pub use types::{Context, ContextValue, Decision, Mutation, Op, Query, Verdict};
