//! Core identifier types for the federated room network
//!
//! Federation identifiers are sigil-prefixed strings: rooms (`!room:server`),
//! users (`@user:server`), events (`$event`), and published aliases
//! (`#alias:server`). Each newtype validates its sigil on construction and
//! is otherwise an opaque key.

use crate::error::WardenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn validate_sigil(value: &str, sigil: char, kind: &str) -> Result<(), WardenError> {
    if value.starts_with(sigil) && value.len() > 1 {
        Ok(())
    } else {
        Err(WardenError::invalid_identifier(format!(
            "{kind} must start with '{sigil}': {value:?}"
        )))
    }
}

/// Room identifier (`!localpart:server`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Create a room ID, validating the `!` sigil.
    pub fn new(value: impl Into<String>) -> Result<Self, WardenError> {
        let value = value.into();
        validate_sigil(&value, '!', "room id")?;
        Ok(Self(value))
    }

    /// View as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomId {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RoomId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// User identifier (`@localpart:server`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user ID, validating the `@` sigil and server part.
    pub fn new(value: impl Into<String>) -> Result<Self, WardenError> {
        let value = value.into();
        validate_sigil(&value, '@', "user id")?;
        if !value.contains(':') {
            return Err(WardenError::invalid_identifier(format!(
                "user id missing server part: {value:?}"
            )));
        }
        Ok(Self(value))
    }

    /// View as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The localpart between the `@` sigil and the server separator.
    pub fn localpart(&self) -> &str {
        let body = &self.0[1..];
        body.split(':').next().unwrap_or(body)
    }

    /// The homeserver this user belongs to.
    pub fn server_name(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, server)) => server,
            None => "",
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Event identifier (`$opaque`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Create an event ID, validating the `$` sigil.
    pub fn new(value: impl Into<String>) -> Result<Self, WardenError> {
        let value = value.into();
        validate_sigil(&value, '$', "event id")?;
        Ok(Self(value))
    }

    /// View as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EventId {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Published room alias (`#alias:server`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomAlias(String);

impl RoomAlias {
    /// Create a room alias, validating the `#` sigil.
    pub fn new(value: impl Into<String>) -> Result<Self, WardenError> {
        let value = value.into();
        validate_sigil(&value, '#', "room alias")?;
        Ok(Self(value))
    }

    /// View as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomAlias {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_id_requires_sigil() {
        assert!(RoomId::new("!room:example.org").is_ok());
        assert!(RoomId::new("room:example.org").is_err());
        assert!(RoomId::new("!").is_err());
    }

    #[test]
    fn user_id_parts() {
        let user = UserId::new("@alice:example.org").unwrap();
        assert_eq!(user.localpart(), "alice");
        assert_eq!(user.server_name(), "example.org");
    }

    #[test]
    fn user_id_requires_server() {
        assert!(UserId::new("@alice").is_err());
        assert!(UserId::new("alice:example.org").is_err());
    }

    #[test]
    fn display_round_trips() {
        let room: RoomId = "!room:example.org".parse().unwrap();
        assert_eq!(room.to_string(), "!room:example.org");

        let alias: RoomAlias = "#watchdog:example.org".parse().unwrap();
        assert_eq!(alias.as_str(), "#watchdog:example.org");
    }

    #[test]
    fn serde_is_transparent() {
        let event = EventId::new("$abc123").unwrap();
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, "\"$abc123\"");
        let back: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
