//! Mutation operation kinds.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// The kind of a mutation, as a bitmask.
    ///
    /// A concrete mutation carries exactly one of the single-bit
    /// flags. The named unions classify mutations in rules, e.g.
    /// [`Op::DELETE_ANY`] matches single-row and bulk deletes alike.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Op: u8 {
        /// Insert a new row.
        const CREATE = 1 << 0;
        /// Update rows selected by a predicate.
        const UPDATE = 1 << 1;
        /// Update a single row addressed by id.
        const UPDATE_ONE = 1 << 2;
        /// Delete rows selected by a predicate.
        const DELETE = 1 << 3;
        /// Delete a single row addressed by id.
        const DELETE_ONE = 1 << 4;

        /// Any update, bulk or single-row.
        const UPDATE_ANY = Self::UPDATE.bits() | Self::UPDATE_ONE.bits();
        /// Any delete, bulk or single-row.
        const DELETE_ANY = Self::DELETE.bits() | Self::DELETE_ONE.bits();
        /// Every write operation.
        const WRITE = Self::CREATE.bits() | Self::UPDATE_ANY.bits() | Self::DELETE_ANY.bits();
    }
}

impl Op {
    /// Returns `true` if the operation touches rows selected by a
    /// predicate rather than a single addressed row.
    #[must_use]
    pub fn is_bulk(self) -> bool {
        self.intersects(Self::UPDATE.union(Self::DELETE))
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Op, &str); 5] = [
            (Op::CREATE, "create"),
            (Op::UPDATE, "update"),
            (Op::UPDATE_ONE, "update_one"),
            (Op::DELETE, "delete"),
            (Op::DELETE_ONE, "delete_one"),
        ];
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
