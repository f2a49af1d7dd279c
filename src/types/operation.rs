//! Descriptions of the operations policies gate.

use std::any::Any;

use crate::types::Op;

/// A read operation about to touch an entity type.
///
/// Implementors describe the query; rules inspect it. The [`Any`]
/// supertrait lets per-entity rules recover the concrete type, so a
/// query struct can expose entity-specific state (predicates, limits,
/// requested fields) to the rules written for it.
pub trait Query: Any {
    /// The entity type the query reads, e.g. `"user"`.
    fn entity(&self) -> &str;
}

/// A write operation about to touch an entity type.
pub trait Mutation: Any {
    /// The entity type the mutation writes.
    fn entity(&self) -> &str;

    /// The operation kind.
    fn op(&self) -> Op;

    /// Returns `true` if the operation kind is contained in `mask`.
    ///
    /// ```
    /// use rulegate::testing::TestMutation;
    /// use rulegate::{Mutation, Op};
    ///
    /// let mutation = TestMutation::new("note", Op::DELETE_ONE);
    /// assert!(mutation.op_is(Op::DELETE_ANY));
    /// assert!(!mutation.op_is(Op::CREATE));
    /// ```
    fn op_is(&self, mask: Op) -> bool {
        self.op().intersects(mask)
    }
}
