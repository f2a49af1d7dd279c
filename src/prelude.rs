//! Prelude module for convenient imports.
//!
//! Re-exports the types most policy code touches:
//!
//! ```rust
//! use rulegate::prelude::*;
//! ```
//!
//! This provides access to:
//! - Decision and verdict types
//! - The rule traits and adapters
//! - Policies and the error types
//! - Test descriptors

pub use crate::{
    error::{AccessDenied, EntityMismatch, Error, ErrorKind, Result},
    policy::{MutationPolicy, Policy, QueryPolicy},
    rule::{
        ContextRule, DenyOperation, EntityMutationRule, EntityQueryRule, FixedRule, MutationRule,
        OnOperation, QueryRule, always_allow, always_deny, context_rule, deny_operation,
        on_operation,
    },
    testing::{RecordingRule, TestMutation, TestQuery},
    types::{Context, ContextValue, Decision, Mutation, Op, Query, Verdict},
};
