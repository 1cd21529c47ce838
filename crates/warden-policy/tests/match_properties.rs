//! Property tests for policy store match behavior
//!
//! `matching_rules` must be deterministic and idempotent for fixed store
//! state, and a withdrawal must always stop a rule from matching.

use proptest::prelude::*;
use warden_core::{EventId, PolicyRuleContent, Recommendation, RoomId, UserId};
use warden_policy::PolicyStore;

fn localpart() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

fn server() -> impl Strategy<Value = String> {
    "[a-z]{2,6}\\.(org|net|example)"
}

fn user_id() -> impl Strategy<Value = UserId> {
    (localpart(), server()).prop_map(|(local, server)| {
        UserId::new(format!("@{local}:{server}")).expect("generated user id is valid")
    })
}

fn ban(entity: &str) -> PolicyRuleContent {
    PolicyRuleContent {
        entity: entity.into(),
        recommendation: Recommendation::Ban,
        reason: "spam".into(),
    }
}

proptest! {
    #[test]
    fn match_is_deterministic_and_idempotent(users in prop::collection::vec(user_id(), 1..8), probe in user_id()) {
        let list = RoomId::new("!list:example.org").unwrap();
        let mut store = PolicyStore::new();

        for (i, user) in users.iter().enumerate() {
            let event = EventId::new(format!("$r{i}")).unwrap();
            store
                .ingest(list.clone(), event, format!("rule:{user}"), Some(ban(user.as_str())))
                .unwrap();
        }

        let first: Vec<_> = store.matching_rules(&list, &probe).into_iter().cloned().collect();
        let second: Vec<_> = store.matching_rules(&list, &probe).into_iter().cloned().collect();
        prop_assert_eq!(&first, &second);

        // Every listed user matches their own exact rule.
        for user in &users {
            let rules = store.matching_rules(&list, user);
            prop_assert!(rules.iter().any(|r| r.pattern.as_str() == user.as_str()));
        }
    }

    #[test]
    fn withdrawal_stops_matching(user in user_id()) {
        let list = RoomId::new("!list:example.org").unwrap();
        let mut store = PolicyStore::new();
        let state_key = format!("rule:{user}");

        store
            .ingest(list.clone(), EventId::new("$r1").unwrap(), state_key.clone(), Some(ban(user.as_str())))
            .unwrap();
        prop_assert!(!store.matching_rules(&list, &user).is_empty());

        store
            .ingest(list.clone(), EventId::new("$r2").unwrap(), state_key, None)
            .unwrap();
        prop_assert!(store.matching_rules(&list, &user).is_empty());
    }

    #[test]
    fn server_glob_matches_whole_server(local in localpart()) {
        let list = RoomId::new("!list:example.org").unwrap();
        let mut store = PolicyStore::new();
        store
            .ingest(
                list.clone(),
                EventId::new("$r1").unwrap(),
                "server:evil.example".into(),
                Some(ban("@*:evil.example")),
            )
            .unwrap();

        let on_server = UserId::new(format!("@{local}:evil.example")).unwrap();
        let elsewhere = UserId::new(format!("@{local}:example.org")).unwrap();
        prop_assert!(!store.matching_rules(&list, &on_server).is_empty());
        prop_assert!(store.matching_rules(&list, &elsewhere).is_empty());
    }
}
