//! Effect trait definitions for transport-backed operations
//!
//! Pure trait definitions: this module defines **what** the moderation core
//! may ask of the outside world; the transport adapter defines **how**.
//! Every method crosses a network round-trip and is therefore a suspension
//! point — callers must not hold partially mutated state across these calls.

use crate::error::WardenError;
use crate::events::StateEvent;
use crate::identifiers::{EventId, RoomAlias, RoomId, UserId};
use async_trait::async_trait;

/// Privileged actions the assistant may need authority for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerAction {
    /// Ban a user from a room
    Ban,
    /// Kick a user from a room
    Kick,
    /// Redact another user's event
    Redact,
}

/// Capability provider backed by the transport.
///
/// All results are best-effort: a failed lookup is substituted with a
/// documented default by the caller, and a failed action is logged and
/// swallowed at the engine boundary. Nothing here retries.
#[async_trait]
pub trait RoomEffects: Send + Sync {
    /// Whether `user` currently holds authority for `action` in `room`.
    async fn has_power(
        &self,
        user: &UserId,
        room: &RoomId,
        action: PowerAction,
    ) -> Result<bool, WardenError>;

    /// The room's published alias, if one is set.
    async fn published_alias(&self, room: &RoomId) -> Result<Option<RoomAlias>, WardenError>;

    /// Ordered sequence of current state events for the room.
    async fn room_state(&self, room: &RoomId) -> Result<Vec<StateEvent>, WardenError>;

    /// Ban `user` from `room`, citing `reason`.
    async fn ban_user(&self, user: &UserId, room: &RoomId, reason: &str)
        -> Result<(), WardenError>;

    /// Redact `event` in `room`.
    async fn redact_event(&self, room: &RoomId, event: &EventId) -> Result<(), WardenError>;
}

/// Default command prefix when a room has none configured.
pub const DEFAULT_PREFIX: &str = "+";

/// Per-room configuration provider.
///
/// Lookups are synchronous reads of local configuration; absence is an
/// expected state answered with a documented default, never an error.
pub trait ConfigEffects: Send + Sync {
    /// Ordered banlist source rooms configured for `room`, if any.
    fn banlists(&self, room: &RoomId) -> Option<Vec<RoomId>>;

    /// Command prefix configured for `room`, if any.
    fn prefix(&self, room: &RoomId) -> Option<String>;

    /// Banlist set used for enforcement: the configured list, followed by
    /// the room itself so a room always consults its own rules.
    fn banlists_or_self(&self, room: &RoomId) -> Vec<RoomId> {
        let mut lists = self.banlists(room).unwrap_or_default();
        lists.push(room.clone());
        lists
    }

    /// Command prefix with the documented default substituted.
    fn prefix_or_default(&self, room: &RoomId) -> String {
        self.prefix(room)
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string())
    }
}
