//! Core data types shared across the crate.

mod context;
mod decision;
mod op;
mod operation;

pub use context::{Context, ContextValue};
pub use decision::{Decision, Verdict};
pub use op::Op;
pub use operation::{Mutation, Query};
