//! Ban enforcement engine
//!
//! Per inbound event the engine walks a fixed decision sequence:
//! capability check, banlist resolution, policy lookup per banlist room,
//! then a single decision. The decision is an explicit value so the
//! evaluation can be tested without its side effect; the side effect is
//! executed exactly once, best-effort, and its failure is logged and
//! swallowed here and nowhere else.
//!
//! The engine does not re-verify ban authority after the capability
//! check's round-trip completes; a race where authority is revoked between
//! check and action is accepted.

use crate::context::ModerationContext;
use tracing::{debug, warn};
use warden_core::{
    ConfigEffects, PowerAction, RoomEffects, RoomEvent, RoomId, StateEvent,
};

/// Why the engine decided not to ban.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The assistant holds no ban authority in the target room
    NoBanAuthority,
    /// No configured banlist recommends an action against the sender
    NoRecommendation,
}

/// Terminal state of the enforcement sequence for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No action taken
    Skip(SkipReason),
    /// Ban the sender, citing the formatted reason
    Ban {
        /// `"<rule reason> (<banlist identity>)"`
        reason: String,
    },
}

/// Evaluate the enforcement decision for `event` without side effects.
///
/// Banlist rooms are consulted in configured order, the room itself last.
/// When several banlists recommend a ban, the reason of the last-iterated
/// match wins; earlier reasons are overwritten, not accumulated.
pub async fn evaluate<E>(ctx: &ModerationContext<E>, event: &RoomEvent) -> Decision
where
    E: RoomEffects + ConfigEffects,
{
    match ctx
        .effects()
        .has_power(ctx.assistant(), &event.room_id, PowerAction::Ban)
        .await
    {
        Ok(true) => {}
        Ok(false) => return Decision::Skip(SkipReason::NoBanAuthority),
        Err(err) => {
            // Treated like a denial: evaluation without authority is wasted.
            debug!(room = %event.room_id, error = %err, "capability check failed");
            return Decision::Skip(SkipReason::NoBanAuthority);
        }
    }

    let banlists = ctx.effects().banlists_or_self(&event.room_id);

    let mut reason: Option<String> = None;
    for list_room in &banlists {
        let Some(rule) = ctx.policies.recommendation(list_room, &event.sender) else {
            continue;
        };
        let identity = resolve_identity(ctx.effects(), list_room).await;
        // Later banlists overwrite the reason rather than accumulate.
        reason = Some(format!("{} ({})", rule.reason, identity));
    }

    match reason {
        Some(reason) => Decision::Ban { reason },
        None => Decision::Skip(SkipReason::NoRecommendation),
    }
}

/// Human-readable identity of a banlist room.
///
/// Published alias if set, else the `name` field of the room's current
/// state, else the raw room id. Lookup failures fall through to the next
/// fallback.
async fn resolve_identity<E: RoomEffects>(effects: &E, room: &RoomId) -> String {
    match effects.published_alias(room).await {
        Ok(Some(alias)) => return alias.to_string(),
        Ok(None) => {}
        Err(err) => {
            debug!(room = %room, error = %err, "alias lookup failed");
        }
    }

    match effects.room_state(room).await {
        Ok(state) => {
            if let Some(name) = state.iter().find_map(StateEvent::room_name) {
                return name.to_string();
            }
        }
        Err(err) => {
            debug!(room = %room, error = %err, "room state lookup failed");
        }
    }

    room.to_string()
}

/// Evaluate `event` and execute the ban side effect at most once.
///
/// A rejected ban call is logged and swallowed; it is never retried and
/// never escalated. Returns the decision for observability and tests.
pub async fn bancheck<E>(ctx: &ModerationContext<E>, event: &RoomEvent) -> Decision
where
    E: RoomEffects + ConfigEffects,
{
    let decision = evaluate(ctx, event).await;

    if let Decision::Ban { reason } = &decision {
        match ctx
            .effects()
            .ban_user(&event.sender, &event.room_id, reason)
            .await
        {
            Ok(()) => {
                debug!(room = %event.room_id, sender = %event.sender, reason = %reason, "banned sender");
            }
            Err(err) => {
                warn!(room = %event.room_id, sender = %event.sender, error = %err, "ban rejected by transport");
            }
        }
    }

    decision
}
