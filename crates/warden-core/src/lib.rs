//! Warden Core - Interface Layer
//!
//! Foundational types shared by every Warden crate:
//!
//! - Identifiers: [`RoomId`], [`UserId`], [`EventId`], [`RoomAlias`]
//! - Event model: [`RoomEvent`] with the closed [`EventKind`] enumeration
//! - Errors: the unified [`WardenError`] taxonomy
//! - Effect traits: [`RoomEffects`] (capability provider) and
//!   [`ConfigEffects`] (configuration provider)
//!
//! This crate defines interfaces only; policy state lives in
//! `warden-policy` and orchestration in `warden-engine`.

pub mod effects;
pub mod error;
pub mod events;
pub mod identifiers;

pub use effects::{ConfigEffects, PowerAction, RoomEffects, DEFAULT_PREFIX};
pub use error::{Result, WardenError};
pub use events::{
    EventKind, MembershipChange, PolicyRuleContent, Recommendation, RoomEvent, StateContent,
    StateEvent,
};
pub use identifiers::{EventId, RoomAlias, RoomId, UserId};
