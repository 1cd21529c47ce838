//! Entity patterns for policy rules
//!
//! A rule targets either an exact federation identifier or a glob over
//! user/server identities (for example `@*:evil.example`). Match results
//! are ordered most-specific first: exact patterns before globs, and globs
//! with more literal (non-wildcard) text before looser ones.

use crate::error::PolicyError;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use warden_core::UserId;

const GLOB_META: [char; 4] = ['*', '?', '[', ']'];

/// A compiled entity pattern from a policy rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EntityPattern {
    /// Matches one exact identifier
    Exact(String),
    /// Matches identifiers by glob
    Glob(Pattern),
}

impl EntityPattern {
    /// Compile a pattern from policy-rule entity text.
    ///
    /// Text without glob metacharacters is treated as an exact identifier.
    pub fn parse(entity: &str) -> Result<Self, PolicyError> {
        if entity.contains(&GLOB_META[..]) {
            let pattern = Pattern::new(entity)
                .map_err(|e| PolicyError::invalid_pattern(entity, e.to_string()))?;
            Ok(Self::Glob(pattern))
        } else {
            Ok(Self::Exact(entity.to_string()))
        }
    }

    /// Whether this pattern matches the given user.
    pub fn matches(&self, user: &UserId) -> bool {
        match self {
            Self::Exact(id) => id == user.as_str(),
            Self::Glob(pattern) => pattern.matches(user.as_str()),
        }
    }

    /// The pattern's source text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact(id) => id,
            Self::Glob(pattern) => pattern.as_str(),
        }
    }

    /// Count of literal characters, used to rank glob specificity.
    fn literal_len(&self) -> usize {
        self.as_str().chars().filter(|c| !GLOB_META.contains(c)).count()
    }

    /// Order two patterns most-specific first.
    ///
    /// Exact patterns sort before globs; among globs, more literal text
    /// sorts first. Source text breaks ties so ordering is total.
    pub fn specificity(&self, other: &Self) -> Ordering {
        let rank = |p: &Self| match p {
            Self::Exact(_) => 0u8,
            Self::Glob(_) => 1u8,
        };
        rank(self)
            .cmp(&rank(other))
            .then_with(|| other.literal_len().cmp(&self.literal_len()))
            .then_with(|| self.as_str().cmp(other.as_str()))
    }
}

impl fmt::Display for EntityPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for EntityPattern {
    type Error = PolicyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EntityPattern> for String {
    fn from(pattern: EntityPattern) -> Self {
        pattern.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn exact_pattern_matches_only_itself() {
        let pattern = EntityPattern::parse("@bad:example.org").unwrap();
        assert!(pattern.matches(&user("@bad:example.org")));
        assert!(!pattern.matches(&user("@bad2:example.org")));
    }

    #[test]
    fn glob_matches_by_server_suffix() {
        let pattern = EntityPattern::parse("@*:evil.example").unwrap();
        assert!(pattern.matches(&user("@anyone:evil.example")));
        assert!(!pattern.matches(&user("@anyone:example.org")));
    }

    #[test]
    fn exact_sorts_before_glob() {
        let exact = EntityPattern::parse("@bad:example.org").unwrap();
        let glob = EntityPattern::parse("@*:example.org").unwrap();
        assert_eq!(exact.specificity(&glob), Ordering::Less);
    }

    #[test]
    fn tighter_glob_sorts_first() {
        let narrow = EntityPattern::parse("@spam*:evil.example").unwrap();
        let wide = EntityPattern::parse("@*:*").unwrap();
        assert_eq!(narrow.specificity(&wide), Ordering::Less);
    }

    #[test]
    fn invalid_glob_is_rejected() {
        assert!(EntityPattern::parse("@[oops:example.org").is_err());
    }
}
