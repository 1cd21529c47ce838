//! Event router: exhaustive dispatch over the closed event model
//!
//! One inbound event is handled at a time per logical stream. Derived
//! state (policy tables, blacklist, reaction queue) is always mutated
//! synchronously and fully before any suspension point; only the
//! best-effort transport calls are awaited.

use crate::context::ModerationContext;
use crate::enforcement::{bancheck, Decision};
use tracing::{debug, warn};
use warden_core::{ConfigEffects, EventKind, MembershipChange, RoomEffects, RoomEvent};
use warden_policy::{cascade, PendingAction, RemovalCause};

/// Dispatch one inbound event.
///
/// Self-sent events are dropped unless they are policy updates, and events
/// from blacklisted rooms are suppressed — except that membership events
/// removing the assistant always update the recorded removal cause first.
/// Every dispatched event runs the ban check before its kind-specific
/// handling, mirroring the enforcement-first processing order of the event
/// stream.
///
/// Returns the enforcement decision for the event, if one was made.
pub async fn dispatch<E>(ctx: &mut ModerationContext<E>, event: &RoomEvent) -> Option<Decision>
where
    E: RoomEffects + ConfigEffects,
{
    if &event.sender == ctx.assistant() && !event.is_policy_update() {
        return None;
    }

    // Removal causes are recorded ahead of the suppression gate so a room
    // already flagged for a kick still upgrades to the ban cause.
    if let EventKind::Membership { member, change } = &event.kind {
        if member == ctx.assistant() {
            match change {
                MembershipChange::Leave => {
                    ctx.blacklist
                        .add(event.room_id.clone(), RemovalCause::Kicked);
                }
                MembershipChange::Ban => {
                    ctx.blacklist
                        .add(event.room_id.clone(), RemovalCause::Banned);
                }
                MembershipChange::Join | MembershipChange::Invite => {}
            }
        }
    }

    if ctx.blacklist.has(&event.room_id) {
        debug!(room = %event.room_id, "suppressed event in blacklisted room");
        return None;
    }

    let decision = bancheck(ctx, event).await;

    match &event.kind {
        EventKind::Message { .. } => {
            // Command parsing lives outside the moderation core.
        }
        EventKind::PolicyRule { state_key, content } => {
            match ctx.policies.ingest(
                event.room_id.clone(),
                event.event_id.clone(),
                state_key.clone(),
                content.clone(),
            ) {
                Ok(outcome) => {
                    debug!(room = %event.room_id, state_key = %state_key, ?outcome, "policy rule ingested");
                }
                Err(err) => {
                    warn!(room = %event.room_id, state_key = %state_key, error = %err, "discarded unparseable policy rule");
                }
            }
        }
        EventKind::Reaction { relates_to, .. } => {
            // Consume before awaiting anything so the entry can never
            // execute twice.
            if let Some(action) = ctx.reactions.resolve(relates_to) {
                execute_pending(ctx, action).await;
            }
        }
        EventKind::Redaction { redacts } => {
            let removed = cascade(redacts, &mut [&mut ctx.policies, &mut ctx.reactions]);
            if removed > 0 {
                debug!(redacts = %redacts, removed, "redaction cascade removed derived state");
            }
        }
        EventKind::Membership { .. } => {
            // Self-removal causes were already recorded above the gate.
        }
    }

    Some(decision)
}

/// Execute a confirmed pending action, best-effort.
async fn execute_pending<E: RoomEffects>(ctx: &ModerationContext<E>, action: PendingAction) {
    match action {
        PendingAction::BanUser { room, user, reason } => {
            if let Err(err) = ctx.effects().ban_user(&user, &room, &reason).await {
                warn!(room = %room, user = %user, error = %err, "confirmed ban rejected by transport");
            }
        }
        PendingAction::RedactEvent { room, event } => {
            if let Err(err) = ctx.effects().redact_event(&room, &event).await {
                warn!(room = %room, event = %event, error = %err, "confirmed redaction rejected by transport");
            }
        }
    }
}
