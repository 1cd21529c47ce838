//! Blacklist tracker: rooms the assistant has been removed from
//!
//! Memory-only and process-wide in lifetime; cleared on restart and
//! re-derived implicitly from transport membership. No eviction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use warden_core::RoomId;

/// Why the assistant was removed from a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalCause {
    /// Kicked or otherwise made to leave
    Kicked,
    /// Banned
    Banned,
}

/// Record of rooms the assistant was removed from.
#[derive(Debug, Clone, Default)]
pub struct BlacklistTracker {
    entries: HashMap<RoomId, RemovalCause>,
}

impl BlacklistTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a removal. Idempotent upsert; the last cause wins.
    pub fn add(&mut self, room: RoomId, cause: RemovalCause) {
        self.entries.insert(room, cause);
    }

    /// Whether the room is flagged.
    pub fn has(&self, room: &RoomId) -> bool {
        self.entries.contains_key(room)
    }

    /// The recorded cause, if the room is flagged.
    pub fn cause(&self, room: &RoomId) -> Option<RemovalCause> {
        self.entries.get(room).copied()
    }

    /// Number of flagged rooms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no rooms are flagged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
