//! Test doubles for exercising policies without a data layer behind
//! them.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`TestQuery`] | minimal query descriptor with a fixed entity name |
//! | [`TestMutation`] | minimal mutation descriptor with entity and kind |
//! | [`RecordingRule`] | canned-decision rule that records every call |
//!
//! Everything here ships in the library proper, not behind `cfg(test)`:
//! policy code living next to a schema is easiest to test with
//! descriptors that need no database, and downstream crates deserve the
//! same convenience.

mod operations;
mod recording;

pub use operations::{TestMutation, TestQuery};
pub use recording::RecordingRule;
