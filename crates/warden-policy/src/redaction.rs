//! Redaction cascade over holders of derived state
//!
//! When a source event is retracted, every component holding state derived
//! from it must invalidate that state: the policy store treats it as a rule
//! withdrawal, the reaction queue drops the pending entry. The cascade only
//! removes local derived state; it never re-validates against the
//! transport's authoritative log.

use warden_core::EventId;

/// A component holding state derived from room events.
pub trait DerivedState {
    /// Invalidate any state derived from `event`.
    ///
    /// Returns whether anything was removed.
    fn retract(&mut self, event: &EventId) -> bool;
}

/// Propagate retraction of `event` to every target.
///
/// Returns how many targets removed state.
pub fn cascade(event: &EventId, targets: &mut [&mut dyn DerivedState]) -> usize {
    targets
        .iter_mut()
        .map(|target| target.retract(event))
        .filter(|removed| *removed)
        .count()
}
