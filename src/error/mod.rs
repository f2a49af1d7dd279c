//! Error types and the crate-wide [`Result`] alias.
//!
//! Everything that goes wrong during evaluation flows through
//! [`Error`]. Denials are errors too: "was this blocked by policy?"
//! is answered by [`Error::is_denial`] and the payload behind
//! [`Error::denial`], not by a separate channel.

mod core;
mod denied;
mod kind;

pub use self::core::Error;
pub use denied::{AccessDenied, EntityMismatch};
pub use kind::ErrorKind;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
