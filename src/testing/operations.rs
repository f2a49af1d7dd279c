//! Minimal operation descriptors.

use crate::types::{Mutation, Op, Query};

/// A query descriptor with nothing but an entity name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestQuery {
    entity: String,
}

impl TestQuery {
    /// Creates a query descriptor for `entity`.
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
        }
    }
}

impl Query for TestQuery {
    fn entity(&self) -> &str {
        &self.entity
    }
}

/// A mutation descriptor with an entity name and an operation kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestMutation {
    entity: String,
    op: Op,
}

impl TestMutation {
    /// Creates a mutation descriptor.
    #[must_use]
    pub fn new(entity: impl Into<String>, op: Op) -> Self {
        Self {
            entity: entity.into(),
            op,
        }
    }
}

impl Mutation for TestMutation {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn op(&self) -> Op {
        self.op
    }
}
