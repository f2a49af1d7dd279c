//! The crate-wide error type.

use std::{borrow::Cow, error::Error as StdError, fmt};

use crate::{
    error::{
        denied::{AccessDenied, EntityMismatch},
        kind::ErrorKind,
    },
    types::Decision,
};

/// Error produced while evaluating policies.
///
/// Carries a [`kind`](Error::kind) for classification, a message for
/// humans, and an optional source chain. Denials keep their structured
/// [`AccessDenied`] payload in that chain, however many layers of
/// wrapping sit above it.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    entity: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates an error with an explicit kind and message.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            entity: None,
            source: None,
        }
    }

    /// Creates an error with the default message for its kind.
    #[must_use]
    pub fn from_kind(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Denied => "operation rejected by policy",
            ErrorKind::EntityMismatch => "rule applied to an operation of the wrong entity type",
            ErrorKind::Evaluation => "rule returned an error",
        };
        Self::new(kind, message)
    }

    /// Creates a denial error from the decision that resolved to deny.
    ///
    /// The decision travels as an [`AccessDenied`] payload in the
    /// source chain, recoverable through [`denial`](Error::denial).
    #[must_use]
    pub fn denied(decision: Decision) -> Self {
        Self::from(AccessDenied::new(decision))
    }

    /// Creates an [`ErrorKind::Evaluation`] error.
    ///
    /// This is the constructor for rules that fail for operational
    /// reasons (a lookup failed, a dependency was down) rather than by
    /// policy.
    #[must_use]
    pub fn evaluation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Evaluation, message)
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Tags the error with the entity type under evaluation.
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// The error's classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The entity type tag, if one was attached.
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Returns `true` if this error rejects the operation by policy.
    ///
    /// True when this error, or any error in its source chain, either
    /// has a denial kind ([`ErrorKind::Denied`] or
    /// [`ErrorKind::EntityMismatch`]) or is a typed [`AccessDenied`] /
    /// [`EntityMismatch`] payload. Wrapping a denial in further context
    /// never demotes it to an operational failure.
    #[must_use]
    pub fn is_denial(&self) -> bool {
        let mut current: Option<&(dyn StdError + 'static)> = Some(self);
        while let Some(error) = current {
            if let Some(nested) = error.downcast_ref::<Error>() {
                if nested.kind.is_denial() {
                    return true;
                }
            } else if error.downcast_ref::<AccessDenied>().is_some()
                || error.downcast_ref::<EntityMismatch>().is_some()
            {
                return true;
            }
            current = error.source();
        }
        false
    }

    /// Walks the source chain for an [`AccessDenied`] payload.
    ///
    /// This sees through any number of wrapping layers, so a denial a
    /// rule wrapped in its own error is still recognized as one:
    ///
    /// ```
    /// use rulegate::{AccessDenied, Decision, Error};
    ///
    /// let denial = Error::from(AccessDenied::new(Decision::deny_with("not yours")));
    /// let wrapped = Error::evaluation("pre-flight check failed").with_source(denial);
    ///
    /// let found = wrapped.denial().expect("denial survives wrapping");
    /// assert_eq!(found.message(), Some("not yours"));
    /// ```
    #[must_use]
    pub fn denial(&self) -> Option<&AccessDenied> {
        let mut current: Option<&(dyn StdError + 'static)> = Some(self);
        while let Some(error) = current {
            if let Some(denied) = error.downcast_ref::<AccessDenied>() {
                return Some(denied);
            }
            current = error.source();
        }
        None
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(entity) = self.entity() {
            write!(f, " (entity: {entity})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<AccessDenied> for Error {
    fn from(denied: AccessDenied) -> Self {
        let message: Cow<'static, str> = match denied.message() {
            Some(message) => Cow::Owned(message.to_owned()),
            None => Cow::Borrowed("operation rejected by policy"),
        };
        let mut error = Self::new(ErrorKind::Denied, message);
        if let Some(entity) = denied.entity() {
            error = error.with_entity(entity.to_owned());
        }
        error.with_source(denied)
    }
}

impl From<EntityMismatch> for Error {
    fn from(mismatch: EntityMismatch) -> Self {
        Self::new(ErrorKind::EntityMismatch, mismatch.to_string())
            .with_entity(mismatch.actual().to_owned())
            .with_source(mismatch)
    }
}
