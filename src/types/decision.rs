//! Decisions produced by rule evaluation.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// The three outcomes a rule can produce.
///
/// `Allow` and `Deny` are terminal: the first rule in a chain to return
/// one of them resolves the operation. `Skip` abstains and hands the
/// operation to the next rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The operation is permitted. Evaluation stops.
    Allow,
    /// The operation is rejected. Evaluation stops.
    Deny,
    /// The rule has no opinion. Evaluation continues.
    Skip,
}

impl Verdict {
    /// Returns the lowercase name of the verdict.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
            Self::Skip => "skip",
        }
    }

    /// Returns `true` if this verdict resolves a chain.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Skip)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of a single rule, or of a resolved chain.
///
/// A decision is a [`Verdict`] plus an optional message explaining it.
/// Two decisions compare equal only when both parts match; to match on
/// the verdict alone, compare against a [`Verdict`] directly:
///
/// ```
/// use rulegate::{Decision, Verdict};
///
/// let decision = Decision::deny_with("quota exceeded");
/// assert_eq!(decision, Verdict::Deny);
/// assert_ne!(decision, Decision::deny());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decision {
    verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<Cow<'static, str>>,
}

impl Decision {
    /// Creates a decision with the given verdict and no message.
    #[must_use]
    pub fn new(verdict: Verdict) -> Self {
        Self {
            verdict,
            message: None,
        }
    }

    /// An `Allow` decision with no message.
    #[must_use]
    pub fn allow() -> Self {
        Self::new(Verdict::Allow)
    }

    /// A `Deny` decision with no message.
    #[must_use]
    pub fn deny() -> Self {
        Self::new(Verdict::Deny)
    }

    /// A `Skip` decision with no message.
    #[must_use]
    pub fn skip() -> Self {
        Self::new(Verdict::Skip)
    }

    /// An `Allow` decision carrying a message.
    #[must_use]
    pub fn allow_with(message: impl Into<Cow<'static, str>>) -> Self {
        Self::allow().with_message(message)
    }

    /// A `Deny` decision carrying a message.
    ///
    /// The message travels with the denial all the way to the caller,
    /// so this is the place to say why:
    ///
    /// ```
    /// use rulegate::Decision;
    ///
    /// let decision = Decision::deny_with("only the author may edit");
    /// assert_eq!(decision.message(), Some("only the author may edit"));
    /// ```
    #[must_use]
    pub fn deny_with(message: impl Into<Cow<'static, str>>) -> Self {
        Self::deny().with_message(message)
    }

    /// A `Skip` decision carrying a message.
    #[must_use]
    pub fn skip_with(message: impl Into<Cow<'static, str>>) -> Self {
        Self::skip().with_message(message)
    }

    /// Replaces the message, keeping the verdict.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The verdict this decision carries.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// The attached message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns `true` if the verdict is [`Verdict::Allow`].
    #[must_use]
    pub fn is_allow(&self) -> bool {
        self.verdict == Verdict::Allow
    }

    /// Returns `true` if the verdict is [`Verdict::Deny`].
    #[must_use]
    pub fn is_deny(&self) -> bool {
        self.verdict == Verdict::Deny
    }

    /// Returns `true` if the verdict is [`Verdict::Skip`].
    #[must_use]
    pub fn is_skip(&self) -> bool {
        self.verdict == Verdict::Skip
    }

    /// Returns `true` if the decision resolves a chain.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.verdict.is_terminal()
    }
}

impl From<Verdict> for Decision {
    fn from(verdict: Verdict) -> Self {
        Self::new(verdict)
    }
}

impl PartialEq<Verdict> for Decision {
    fn eq(&self, other: &Verdict) -> bool {
        self.verdict == *other
    }
}

impl PartialEq<Decision> for Verdict {
    fn eq(&self, other: &Decision) -> bool {
        *self == other.verdict
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{}: {message}", self.verdict),
            None => fmt::Display::fmt(&self.verdict, f),
        }
    }
}
