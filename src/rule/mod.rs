//! Rule traits and adapters.
//!
//! A rule examines one operation and produces a [`Decision`]. Rules
//! are written against either queries or mutations; the adapters here
//! lift closures, constants, and per-entity functions into the two
//! rule traits.
//!
//! | Adapter | Purpose |
//! |---------|---------|
//! | closures | any `Fn(&Context, &dyn Query) -> Result<Decision, Error>` is already a rule (same for mutations) |
//! | [`FixedRule`] | always returns the same decision |
//! | [`OnOperation`] | gates an inner rule by mutation kind |
//! | [`DenyOperation`] | denies whole mutation kinds outright |
//! | [`ContextRule`] | decides from context alone, usable on both sides |
//! | [`EntityQueryRule`] / [`EntityMutationRule`] | typed rules for one entity |

mod context;
mod entity;
mod filter;
mod fixed;

pub use context::{ContextRule, context_rule};
pub use entity::{EntityMutationRule, EntityQueryRule};
pub use filter::{DenyOperation, OnOperation, deny_operation, on_operation};
pub use fixed::{FixedRule, always_allow, always_deny};

use crate::{
    error::Error,
    types::{Context, Decision, Mutation, Query},
};

/// A rule consulted for read operations.
///
/// Returning `Ok` with a [`Decision`] is the normal path, denials
/// included. Returning `Err` also rejects the operation: the error
/// stops the chain and propagates to the caller unchanged.
pub trait QueryRule: Send + Sync {
    /// Evaluates the rule against one query.
    fn eval_query(&self, cx: &Context, query: &dyn Query) -> Result<Decision, Error>;
}

/// A rule consulted for write operations.
pub trait MutationRule: Send + Sync {
    /// Evaluates the rule against one mutation.
    fn eval_mutation(&self, cx: &Context, mutation: &dyn Mutation) -> Result<Decision, Error>;
}

impl<F> QueryRule for F
where
    F: Fn(&Context, &dyn Query) -> Result<Decision, Error> + Send + Sync,
{
    fn eval_query(&self, cx: &Context, query: &dyn Query) -> Result<Decision, Error> {
        self(cx, query)
    }
}

impl<F> MutationRule for F
where
    F: Fn(&Context, &dyn Mutation) -> Result<Decision, Error> + Send + Sync,
{
    fn eval_mutation(&self, cx: &Context, mutation: &dyn Mutation) -> Result<Decision, Error> {
        self(cx, mutation)
    }
}
