//! Pluggable player-matching strategy.
//!
//! The match only holds a reference to its strategy; recommending players
//! is a caller-side feature. The lifecycle operations never consult it.

use kickoff_types::{EligibilityCriteria, Player};

/// Picks and ranks candidate players for a match.
pub trait MatchingStrategy: Send + Sync {
    /// Short identifier, used in logs.
    fn name(&self) -> &str;

    /// Candidates from `pool` for a match advertising `criteria`, best first.
    fn candidates(&self, criteria: &EligibilityCriteria, pool: &[Player]) -> Vec<Player>;
}
