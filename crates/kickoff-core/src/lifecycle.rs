//! Per-state behavior of the match lifecycle.
//!
//! Each operation is one exhaustive `match` over [`MatchState`]. The
//! functions mutate the roster when the state allows it and return the
//! state to install next, if any. They never install it themselves: the
//! [`Match`](crate::Match) aggregate does that, so every transition goes
//! through its single notification point.

use chrono::{DateTime, Utc};
use kickoff_types::{KickoffError, LifecyclePolicy, MatchState, Player, PlayerId, Result};

use crate::Roster;

/// The fixed inputs every state decision needs.
#[derive(Debug, Clone, Copy)]
pub struct Rules {
    /// Required roster size.
    pub capacity: usize,
    pub policy: LifecyclePolicy,
}

fn illegal(operation: &'static str, state: MatchState) -> KickoffError {
    KickoffError::IllegalTransition { operation, state }
}

/// Enroll `player`. Caller has already checked that `player` is not enrolled.
///
/// Searching forms the match once the roster reaches capacity.
pub fn add_player(
    state: MatchState,
    roster: &mut Roster,
    rules: Rules,
    player: Player,
) -> Result<Option<MatchState>> {
    match state {
        MatchState::Searching => {
            roster.enroll(player);
            Ok(roster
                .is_full(rules.capacity)
                .then_some(MatchState::Formed))
        }
        MatchState::Formed if rules.policy.formed_accepts_enrollment => {
            roster.enroll(player);
            Ok(None)
        }
        MatchState::Formed => Err(KickoffError::RosterFull {
            capacity: rules.capacity,
        }),
        MatchState::Confirmed
        | MatchState::InPlay
        | MatchState::Finished
        | MatchState::Cancelled => Err(illegal("enroll", state)),
    }
}

/// Withdraw `id` (and its confirmation). Caller has already checked membership.
///
/// A Formed or Confirmed match left short of capacity falls back to
/// Searching when the policy says so.
pub fn remove_player(
    state: MatchState,
    roster: &mut Roster,
    rules: Rules,
    id: &PlayerId,
) -> Result<Option<MatchState>> {
    match state {
        MatchState::Searching => {
            roster.withdraw(id);
            Ok(None)
        }
        MatchState::Formed | MatchState::Confirmed => {
            roster.withdraw(id);
            let short = !roster.is_full(rules.capacity);
            Ok((short && rules.policy.revert_when_short).then_some(MatchState::Searching))
        }
        MatchState::InPlay | MatchState::Finished | MatchState::Cancelled => {
            Err(illegal("withdraw", state))
        }
    }
}

/// Advance past the confirmation gate. Only Formed can.
///
/// The aggregate calls this after checking that the roster is full and
/// fully confirmed; this function does not re-check.
pub fn confirm_players(state: MatchState) -> Result<MatchState> {
    match state {
        MatchState::Formed => Ok(MatchState::Confirmed),
        MatchState::Searching
        | MatchState::Confirmed
        | MatchState::InPlay
        | MatchState::Finished
        | MatchState::Cancelled => Err(illegal("confirm players", state)),
    }
}

/// Call the match off.
pub fn cancel(state: MatchState, rules: Rules) -> Result<MatchState> {
    match state {
        MatchState::Searching | MatchState::Formed | MatchState::Confirmed => {
            Ok(MatchState::Cancelled)
        }
        MatchState::InPlay if rules.policy.cancel_in_play => Ok(MatchState::Cancelled),
        MatchState::InPlay | MatchState::Finished | MatchState::Cancelled => {
            Err(illegal("cancel", state))
        }
    }
}

/// Confirmed → InPlay once `now` reaches the scheduled start.
pub fn start_due(state: MatchState, now: DateTime<Utc>, starts_at: DateTime<Utc>) -> Option<MatchState> {
    (state == MatchState::Confirmed && now >= starts_at).then_some(MatchState::InPlay)
}

/// InPlay → Finished once `now` reaches the scheduled end.
///
/// `ends_at` is `None` when the end is not representable; such a match is
/// never due.
pub fn finish_due(
    state: MatchState,
    now: DateTime<Utc>,
    ends_at: Option<DateTime<Utc>>,
) -> Option<MatchState> {
    (state == MatchState::InPlay && ends_at.is_some_and(|end| now >= end))
        .then_some(MatchState::Finished)
}

/// Roster and policy conditions on an edge, checked on top of
/// [`MatchState::can_transition_to`].
///
/// - Searching → Formed needs a full roster.
/// - Formed → Confirmed needs a full, fully confirmed roster.
/// - Formed or Confirmed → Searching needs a short roster and `revert_when_short`.
/// - InPlay → Cancelled needs `cancel_in_play`.
///
/// Every other edge carries no extra condition.
pub fn permits(from: MatchState, to: MatchState, roster: &Roster, rules: Rules) -> bool {
    let full = roster.is_full(rules.capacity);
    match (from, to) {
        (MatchState::Searching, MatchState::Formed) => full,
        (MatchState::Formed, MatchState::Confirmed) => full && roster.all_confirmed(),
        (MatchState::Formed | MatchState::Confirmed, MatchState::Searching) => {
            !full && rules.policy.revert_when_short
        }
        (MatchState::InPlay, MatchState::Cancelled) => rules.policy.cancel_in_play,
        _ => true,
    }
}
