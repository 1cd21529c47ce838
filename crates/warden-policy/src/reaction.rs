//! Reaction queue: deferred actions awaiting human confirmation
//!
//! An action is registered against the event a human is expected to react
//! to; a later reaction event consumes it. The queue guarantees at-most-once
//! delivery under sequential processing and nothing more: expiry of stale
//! entries is the owning caller's responsibility, and timestamps are
//! supplied by the caller so this layer never reads a clock.

use crate::redaction::DerivedState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use warden_core::{EventId, RoomId, UserId};

/// An action deferred until a confirming reaction arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    /// Ban a user from a room
    BanUser {
        /// Target room
        room: RoomId,
        /// User to ban
        user: UserId,
        /// Ban reason
        reason: String,
    },
    /// Redact an event in a room
    RedactEvent {
        /// Target room
        room: RoomId,
        /// Event to redact
        event: EventId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct QueueEntry {
    action: PendingAction,
    created_at_ms: u64,
}

/// Pending-action registry keyed by target event.
#[derive(Debug, Clone, Default)]
pub struct ReactionQueue {
    pending: HashMap<EventId, QueueEntry>,
}

impl ReactionQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pending action keyed by `target`.
    ///
    /// A stale entry for the same target is replaced.
    pub fn enqueue(&mut self, target: EventId, action: PendingAction, created_at_ms: u64) {
        self.pending.insert(
            target,
            QueueEntry {
                action,
                created_at_ms,
            },
        );
    }

    /// Consume and return the action for `target`, if one is queued.
    ///
    /// The entry is removed so it cannot execute twice.
    pub fn resolve(&mut self, target: &EventId) -> Option<PendingAction> {
        self.pending.remove(target).map(|entry| entry.action)
    }

    /// Drop the entry for `target` without executing it.
    pub fn discard(&mut self, target: &EventId) -> bool {
        self.pending.remove(target).is_some()
    }

    /// Whether an action is queued for `target`.
    pub fn contains(&self, target: &EventId) -> bool {
        self.pending.contains_key(target)
    }

    /// When the entry for `target` was created, if one is queued.
    pub fn created_at_ms(&self, target: &EventId) -> Option<u64> {
        self.pending.get(target).map(|entry| entry.created_at_ms)
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl DerivedState for ReactionQueue {
    /// Redacting the target event drops its pending action.
    fn retract(&mut self, event: &EventId) -> bool {
        self.discard(event)
    }
}
