//! Warden Policy - Derived-State Layer
//!
//! In-memory state the moderation assistant derives from the event stream:
//!
//! - [`PolicyStore`]: per-source-room tables of policy rules, answering
//!   match queries most-specific first
//! - [`BlacklistTracker`]: rooms the assistant was removed from
//! - [`ReactionQueue`]: pending actions awaiting human confirmation
//! - [`cascade`] / [`DerivedState`]: redaction propagation across the above
//!
//! Nothing in this crate performs I/O or reads a clock; all inputs arrive
//! through the documented operations and every mutation completes
//! synchronously, so callers can safely interleave handlers at their own
//! suspension points.

pub mod blacklist;
pub mod error;
pub mod pattern;
pub mod reaction;
pub mod redaction;
pub mod store;

pub use blacklist::{BlacklistTracker, RemovalCause};
pub use error::PolicyError;
pub use pattern::EntityPattern;
pub use reaction::{PendingAction, ReactionQueue};
pub use redaction::{cascade, DerivedState};
pub use store::{IngestOutcome, PolicyList, PolicyRule, PolicyStore};
