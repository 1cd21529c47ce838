//! Policy store: per-source-room tables of active policy rules
//!
//! The store is a purely in-memory index. Rules arrive as policy-rule state
//! events from banlist rooms; an upsert is keyed by (source room, state key)
//! and an empty payload withdraws the rule. The store also remembers which
//! event produced each rule so a later redaction of that event can retract
//! the rule through the same withdrawal path.

use crate::error::PolicyError;
use crate::pattern::EntityPattern;
use crate::redaction::DerivedState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use warden_core::{EventId, PolicyRuleContent, Recommendation, RoomId, UserId};

/// An active policy rule published by a banlist room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Room the rule was published in
    pub source_room: RoomId,
    /// State key identifying the rule within its source room
    pub state_key: String,
    /// Who the rule targets
    pub pattern: EntityPattern,
    /// Action the rule recommends
    pub recommendation: Recommendation,
    /// Justification carried into the ban reason
    pub reason: String,
    /// Event that produced this rule, for redaction tracking
    pub event_id: EventId,
}

/// Result of ingesting a policy-rule event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// A new rule became active
    Inserted,
    /// An existing rule for the same state key was replaced
    Replaced,
    /// An active rule was withdrawn
    Withdrawn,
    /// A withdrawal arrived for a state key with no active rule
    Ignored,
}

/// The set of active rules belonging to one source room.
///
/// Owned exclusively by the [`PolicyStore`]; mutated only through its
/// ingest and retract operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyList {
    rules: HashMap<String, PolicyRule>,
}

impl PolicyList {
    /// Number of active rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the list holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over active rules in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &PolicyRule> {
        self.rules.values()
    }
}

/// In-memory index of policy rules keyed by source room and state key.
#[derive(Debug, Clone, Default)]
pub struct PolicyStore {
    lists: HashMap<RoomId, PolicyList>,
    /// Originating event of each active rule, for redaction lookups.
    origins: HashMap<EventId, (RoomId, String)>,
}

impl PolicyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert or withdraw the rule at (`source_room`, `state_key`).
    ///
    /// A `None` payload withdraws the existing rule. An unparseable entity
    /// pattern is an error the caller logs and swallows; the store is left
    /// unchanged in that case.
    pub fn ingest(
        &mut self,
        source_room: RoomId,
        event_id: EventId,
        state_key: String,
        content: Option<PolicyRuleContent>,
    ) -> Result<IngestOutcome, PolicyError> {
        let Some(content) = content else {
            return Ok(self.withdraw(&source_room, &state_key));
        };

        let pattern = EntityPattern::parse(&content.entity)?;
        let rule = PolicyRule {
            source_room: source_room.clone(),
            state_key: state_key.clone(),
            pattern,
            recommendation: content.recommendation,
            reason: content.reason,
            event_id: event_id.clone(),
        };

        let list = self.lists.entry(source_room.clone()).or_default();
        let replaced = list.rules.insert(state_key.clone(), rule);
        if let Some(old) = &replaced {
            self.origins.remove(&old.event_id);
        }
        self.origins.insert(event_id, (source_room, state_key));

        Ok(if replaced.is_some() {
            IngestOutcome::Replaced
        } else {
            IngestOutcome::Inserted
        })
    }

    fn withdraw(&mut self, source_room: &RoomId, state_key: &str) -> IngestOutcome {
        let Some(list) = self.lists.get_mut(source_room) else {
            return IngestOutcome::Ignored;
        };
        match list.rules.remove(state_key) {
            Some(old) => {
                self.origins.remove(&old.event_id);
                if list.is_empty() {
                    self.lists.remove(source_room);
                }
                IngestOutcome::Withdrawn
            }
            None => IngestOutcome::Ignored,
        }
    }

    /// Rules from `source_room` matching `user`, most specific first.
    ///
    /// An unknown source room yields an empty result, not an error.
    pub fn matching_rules(&self, source_room: &RoomId, user: &UserId) -> Vec<&PolicyRule> {
        let Some(list) = self.lists.get(source_room) else {
            return Vec::new();
        };
        let mut rules: Vec<&PolicyRule> =
            list.iter().filter(|rule| rule.pattern.matches(user)).collect();
        rules.sort_by(|a, b| a.pattern.specificity(&b.pattern));
        rules
    }

    /// The most specific recommendation `source_room` has for `user`.
    pub fn recommendation(&self, source_room: &RoomId, user: &UserId) -> Option<&PolicyRule> {
        self.matching_rules(source_room, user).into_iter().next()
    }

    /// The active rule list of a source room, if it has any rules.
    pub fn list(&self, source_room: &RoomId) -> Option<&PolicyList> {
        self.lists.get(source_room)
    }

    /// Total number of active rules across all source rooms.
    pub fn rule_count(&self) -> usize {
        self.lists.values().map(PolicyList::len).sum()
    }
}

impl DerivedState for PolicyStore {
    /// Redaction of a policy-rule event is equivalent to withdrawing the
    /// rule it created.
    fn retract(&mut self, event: &EventId) -> bool {
        let Some((room, state_key)) = self.origins.remove(event) else {
            return false;
        };
        matches!(
            self.withdraw(&room, &state_key),
            IngestOutcome::Withdrawn
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn room(id: &str) -> RoomId {
        RoomId::new(id).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn event(id: &str) -> EventId {
        EventId::new(id).unwrap()
    }

    fn ban(entity: &str, reason: &str) -> PolicyRuleContent {
        PolicyRuleContent {
            entity: entity.into(),
            recommendation: Recommendation::Ban,
            reason: reason.into(),
        }
    }

    #[test]
    fn ingest_then_match() {
        let mut store = PolicyStore::new();
        let outcome = store
            .ingest(
                room("!list:example.org"),
                event("$r1"),
                "rule:@bad:example.org".into(),
                Some(ban("@bad:example.org", "spam")),
            )
            .unwrap();
        assert_eq!(outcome, IngestOutcome::Inserted);

        let rules = store.matching_rules(&room("!list:example.org"), &user("@bad:example.org"));
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].reason, "spam");

        assert!(store
            .matching_rules(&room("!list:example.org"), &user("@fine:example.org"))
            .is_empty());
    }

    #[test]
    fn empty_content_withdraws() {
        let mut store = PolicyStore::new();
        store
            .ingest(
                room("!list:example.org"),
                event("$r1"),
                "k".into(),
                Some(ban("@bad:example.org", "spam")),
            )
            .unwrap();

        let outcome = store
            .ingest(room("!list:example.org"), event("$r2"), "k".into(), None)
            .unwrap();
        assert_eq!(outcome, IngestOutcome::Withdrawn);
        assert!(store
            .matching_rules(&room("!list:example.org"), &user("@bad:example.org"))
            .is_empty());

        // A second withdrawal for the same key has nothing to remove.
        let outcome = store
            .ingest(room("!list:example.org"), event("$r3"), "k".into(), None)
            .unwrap();
        assert_eq!(outcome, IngestOutcome::Ignored);
    }

    #[test]
    fn upsert_replaces_by_state_key() {
        let mut store = PolicyStore::new();
        store
            .ingest(
                room("!list:example.org"),
                event("$r1"),
                "k".into(),
                Some(ban("@bad:example.org", "spam")),
            )
            .unwrap();
        let outcome = store
            .ingest(
                room("!list:example.org"),
                event("$r2"),
                "k".into(),
                Some(ban("@bad:example.org", "flooding")),
            )
            .unwrap();
        assert_eq!(outcome, IngestOutcome::Replaced);
        assert_eq!(store.rule_count(), 1);

        let rules = store.matching_rules(&room("!list:example.org"), &user("@bad:example.org"));
        assert_eq!(rules[0].reason, "flooding");

        // The replaced rule's event no longer retracts anything.
        assert!(!store.retract(&event("$r1")));
    }

    #[test]
    fn unknown_room_yields_empty() {
        let store = PolicyStore::new();
        assert!(store
            .matching_rules(&room("!nowhere:example.org"), &user("@x:example.org"))
            .is_empty());
        assert!(store
            .recommendation(&room("!nowhere:example.org"), &user("@x:example.org"))
            .is_none());
    }

    #[test]
    fn most_specific_match_first() {
        let mut store = PolicyStore::new();
        let list = room("!list:example.org");
        store
            .ingest(
                list.clone(),
                event("$glob"),
                "server".into(),
                Some(ban("@*:evil.example", "bad server")),
            )
            .unwrap();
        store
            .ingest(
                list.clone(),
                event("$exact"),
                "user".into(),
                Some(ban("@bad:evil.example", "spam")),
            )
            .unwrap();

        let rules = store.matching_rules(&list, &user("@bad:evil.example"));
        assert_eq!(rules.len(), 2);
        assert_matches!(rules[0].pattern, EntityPattern::Exact(_));
        assert_eq!(rules[0].reason, "spam");
    }

    #[test]
    fn retract_by_originating_event() {
        let mut store = PolicyStore::new();
        store
            .ingest(
                room("!list:example.org"),
                event("$r1"),
                "k".into(),
                Some(ban("@bad:example.org", "spam")),
            )
            .unwrap();

        assert!(store.retract(&event("$r1")));
        assert!(store
            .matching_rules(&room("!list:example.org"), &user("@bad:example.org"))
            .is_empty());
        assert!(!store.retract(&event("$r1")));
    }

    #[test]
    fn invalid_pattern_leaves_store_unchanged() {
        let mut store = PolicyStore::new();
        let result = store.ingest(
            room("!list:example.org"),
            event("$r1"),
            "k".into(),
            Some(ban("@[oops:example.org", "broken")),
        );
        assert!(result.is_err());
        assert_eq!(store.rule_count(), 0);
    }
}
