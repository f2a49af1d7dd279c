//! Error classification.

use thiserror::Error;

/// Broad classification of evaluation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A policy resolved to deny, or a caller pre-resolved a denial.
    #[error("access denied")]
    Denied,

    /// A per-entity rule received an operation for a different entity.
    #[error("entity mismatch")]
    EntityMismatch,

    /// A rule failed before reaching a verdict.
    #[error("evaluation failed")]
    Evaluation,
}

impl ErrorKind {
    /// Returns `true` if errors of this kind reject the operation by
    /// policy rather than by accident.
    ///
    /// Every error blocks the operation; the distinction matters to
    /// callers that render "forbidden" differently from "broken".
    #[must_use]
    pub fn is_denial(self) -> bool {
        matches!(self, Self::Denied | Self::EntityMismatch)
    }
}
