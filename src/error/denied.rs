//! Typed payloads carried by denial errors.

use std::{borrow::Cow, error::Error as StdError, fmt};

use crate::types::{Decision, Op};

/// The structured form of a policy denial.
///
/// Stored as the source of a [`Denied`](crate::ErrorKind::Denied)
/// error so callers can recover the resolving [`Decision`] and what it
/// rejected. [`Error::denial`](crate::Error::denial) digs one out from
/// arbitrarily deep wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessDenied {
    decision: Decision,
    entity: Option<Cow<'static, str>>,
    operation: Option<Op>,
}

impl AccessDenied {
    /// Wraps the decision that resolved to deny.
    #[must_use]
    pub fn new(decision: Decision) -> Self {
        Self {
            decision,
            entity: None,
            operation: None,
        }
    }

    /// Records the entity type the denied operation targeted.
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<Cow<'static, str>>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Records the mutation kind that was denied.
    #[must_use]
    pub fn with_operation(mut self, operation: Op) -> Self {
        self.operation = Some(operation);
        self
    }

    /// The decision that caused the denial.
    #[must_use]
    pub fn decision(&self) -> &Decision {
        &self.decision
    }

    /// The message attached to the denying decision, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.decision.message()
    }

    /// The entity type the denied operation targeted, if recorded.
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// The denied mutation kind, if recorded.
    #[must_use]
    pub fn operation(&self) -> Option<Op> {
        self.operation
    }
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("access denied")?;
        if let Some(entity) = self.entity() {
            write!(f, " for \"{entity}\"")?;
        }
        if let Some(operation) = self.operation {
            write!(f, " ({operation})")?;
        }
        if let Some(message) = self.message() {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl StdError for AccessDenied {}

/// A per-entity rule was handed an operation of the wrong entity type.
///
/// Treated as a denial: a rule registered for one entity has no
/// authority to wave another one through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMismatch {
    expected: &'static str,
    actual: String,
}

impl EntityMismatch {
    /// Records the operation type the rule expects and the entity name
    /// actually seen.
    #[must_use]
    pub fn new(expected: &'static str, actual: impl Into<String>) -> Self {
        Self {
            expected,
            actual: actual.into(),
        }
    }

    /// The concrete operation type the rule was registered for.
    #[must_use]
    pub fn expected(&self) -> &'static str {
        self.expected
    }

    /// The entity name of the operation that arrived.
    #[must_use]
    pub fn actual(&self) -> &str {
        &self.actual
    }
}

impl fmt::Display for EntityMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule expects operations of type {}, got entity \"{}\"",
            self.expected, self.actual
        )
    }
}

impl StdError for EntityMismatch {}
