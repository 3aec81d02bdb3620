//! Read-only projection of a match for callers outside the core.

use serde::{Deserialize, Serialize};

use crate::{Location, MatchId, MatchState};

/// Flat snapshot of a match. Building one has no side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub id: MatchId,
    pub sport: String,
    pub state: MatchState,
    pub location: Option<Location>,
    /// Scheduled start in RFC 3339 text form.
    pub starts_at: String,
    pub enrolled_players: usize,
    pub required_players: usize,
    pub duration_minutes: u32,
}
