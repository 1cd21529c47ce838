//! Typed room event model
//!
//! The transport delivers a stream of room events; Warden handles a closed
//! set of kinds so dispatch is exhaustive and checked at build time. State
//! types the assistant never inspects collapse into [`StateContent::Other`].

use crate::identifiers::{EventId, RoomId, UserId};
use serde::{Deserialize, Serialize};

/// The action a policy rule recommends against a matched entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Ban the matched user from moderated rooms
    Ban,
}

/// Payload of a policy-rule state event.
///
/// An absent payload (`None` where this content is expected) is a rule
/// withdrawal: the publishing room retracted the rule for that state key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRuleContent {
    /// Exact user id or glob over user/server identities
    pub entity: String,
    /// Action the rule recommends
    pub recommendation: Recommendation,
    /// Human-readable justification, carried into the ban reason
    pub reason: String,
}

/// Membership transition carried by a membership state event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipChange {
    /// The member joined or was re-admitted
    Join,
    /// The member left or was kicked
    Leave,
    /// The member was banned
    Ban,
    /// The member was invited
    Invite,
}

/// The closed set of inbound event kinds Warden handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A room message
    Message {
        /// Plain-text body
        body: String,
    },
    /// A policy-rule state event from a banlist room
    PolicyRule {
        /// State key identifying the rule within its source room
        state_key: String,
        /// Rule payload; `None` withdraws the rule
        content: Option<PolicyRuleContent>,
    },
    /// A reaction referencing an earlier event
    Reaction {
        /// The event being reacted to
        relates_to: EventId,
        /// Reaction key (emoji or shortcode)
        key: String,
    },
    /// Retraction of an earlier event
    Redaction {
        /// The event being redacted
        redacts: EventId,
    },
    /// A membership state change
    Membership {
        /// The member whose state changed
        member: UserId,
        /// The transition
        change: MembershipChange,
    },
}

/// An inbound event delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomEvent {
    /// Unique event identifier
    pub event_id: EventId,
    /// Room the event was sent in
    pub room_id: RoomId,
    /// Sender of the event
    pub sender: UserId,
    /// Typed payload
    pub kind: EventKind,
}

impl RoomEvent {
    /// Whether this event updates a policy rule.
    ///
    /// Policy updates are processed even when sent by the assistant itself.
    pub fn is_policy_update(&self) -> bool {
        matches!(self.kind, EventKind::PolicyRule { .. })
    }
}

/// Content of a current-state entry returned by a room-state lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateContent {
    /// The room's display name (`m.room.name`)
    Name {
        /// The name value
        name: String,
    },
    /// A membership entry
    Membership {
        /// The member
        member: UserId,
        /// Current membership
        change: MembershipChange,
    },
    /// A policy rule held in current state
    PolicyRule {
        /// Rule payload; `None` means withdrawn
        content: Option<PolicyRuleContent>,
    },
    /// Any state type the assistant does not inspect
    Other,
}

/// A current-state event from a room-state lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEvent {
    /// State key within the event type
    pub state_key: String,
    /// Typed content
    pub content: StateContent,
}

impl StateEvent {
    /// The room name, if this entry carries one.
    pub fn room_name(&self) -> Option<&str> {
        match &self.content {
            StateContent::Name { name } => Some(name),
            _ => None,
        }
    }
}
