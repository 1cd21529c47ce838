//! Moderation context: explicitly owned state passed to every handler
//!
//! The context replaces process-wide registries with one coordinating
//! structure: it owns the policy store, the blacklist tracker, and the
//! reaction queue, and carries the assistant's identity plus the effects
//! handle. No other component mutates these structures directly.

use warden_core::{EventId, UserId};
use warden_policy::{BlacklistTracker, PendingAction, PolicyStore, ReactionQueue};

/// Owned state and collaborators for one logical event stream.
#[derive(Debug)]
pub struct ModerationContext<E> {
    effects: E,
    assistant: UserId,
    /// Per-source-room policy rule tables
    pub policies: PolicyStore,
    /// Rooms the assistant has been removed from
    pub blacklist: BlacklistTracker,
    /// Actions deferred to human confirmation
    pub reactions: ReactionQueue,
}

impl<E> ModerationContext<E> {
    /// Create a context for the given assistant identity.
    pub fn new(effects: E, assistant: UserId) -> Self {
        Self {
            effects,
            assistant,
            policies: PolicyStore::new(),
            blacklist: BlacklistTracker::new(),
            reactions: ReactionQueue::new(),
        }
    }

    /// The transport-backed effects handle.
    pub fn effects(&self) -> &E {
        &self.effects
    }

    /// The assistant's own user id.
    pub fn assistant(&self) -> &UserId {
        &self.assistant
    }

    /// The assistant's homeserver.
    pub fn server(&self) -> &str {
        self.assistant.server_name()
    }

    /// Defer an action until a human confirms it by reacting to `target`.
    ///
    /// `created_at_ms` is supplied by the caller; the queue applies no
    /// expiry of its own.
    pub fn defer_action(&mut self, target: EventId, action: PendingAction, created_at_ms: u64) {
        self.reactions.enqueue(target, action, created_at_ms);
    }
}
