//! Warden Engine - Orchestration Layer
//!
//! Orchestrates the moderation core per inbound event:
//!
//! - [`ModerationContext`]: explicitly owned registries (policy store,
//!   blacklist, reaction queue) plus the assistant identity and effects
//!   handle, passed to every handler call
//! - [`enforcement`]: the ban-check sequence (capability check, banlist
//!   resolution, policy lookup), producing an explicit [`Decision`] and at
//!   most one ban side effect per event
//! - [`router::dispatch`]: exhaustive dispatch over the closed event model
//!
//! Everything here is best-effort: failures degrade to no-ops or defaults
//! and are logged once, at this boundary.

pub mod context;
pub mod enforcement;
pub mod router;

pub use context::ModerationContext;
pub use enforcement::{bancheck, evaluate, Decision, SkipReason};
pub use router::dispatch;
