//! Configuration types: how a match is set up and which lifecycle rules apply.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{KickoffError, Location, Result, Sport, constants};

/// Parameters a match is created with.
///
/// `required_players` is fixed for the life of the match. Location, start
/// and duration can later be changed through the schedule edit operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSetup {
    pub sport: Sport,
    /// Venue, if already booked.
    #[serde(default)]
    pub location: Option<Location>,
    /// Roster size that forms the match (the match's capacity).
    pub required_players: usize,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    pub starts_at: DateTime<Utc>,
}

fn default_duration() -> u32 {
    constants::DEFAULT_DURATION_MINUTES
}

impl MatchSetup {
    /// Reject setups no match could be built from.
    ///
    /// # Errors
    /// Returns [`KickoffError::InvalidSetup`] when the required player count
    /// is outside [`constants::MIN_REQUIRED_PLAYERS`]..=[`constants::MAX_REQUIRED_PLAYERS`],
    /// when the duration is zero, or when the match would end past the
    /// latest representable time.
    pub fn validate(&self) -> Result<()> {
        // The organizer alone already fills a one-player roster, so such a
        // match could never form.
        if self.required_players < constants::MIN_REQUIRED_PLAYERS {
            return Err(KickoffError::InvalidSetup {
                reason: format!(
                    "required_players {} below minimum {}",
                    self.required_players,
                    constants::MIN_REQUIRED_PLAYERS
                ),
            });
        }
        if self.required_players > constants::MAX_REQUIRED_PLAYERS {
            return Err(KickoffError::InvalidSetup {
                reason: format!(
                    "required_players {} exceeds maximum {}",
                    self.required_players,
                    constants::MAX_REQUIRED_PLAYERS
                ),
            });
        }
        if self.duration_minutes == 0 {
            return Err(KickoffError::InvalidSetup {
                reason: "duration_minutes must be positive".to_string(),
            });
        }
        let duration = Duration::minutes(i64::from(self.duration_minutes));
        if self.starts_at.checked_add_signed(duration).is_none() {
            return Err(KickoffError::InvalidSetup {
                reason: format!("match starting at {} cannot end", self.starts_at),
            });
        }
        Ok(())
    }
}

/// Setup fixture for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl MatchSetup {
    /// Football match at a fixed venue, 60 minutes long.
    pub fn dummy(required_players: usize, starts_at: DateTime<Utc>) -> Self {
        Self {
            sport: Sport::new("Football"),
            location: Some(Location::new("Parque Centenario, Field 2")),
            required_players,
            duration_minutes: constants::DEFAULT_DURATION_MINUTES,
            starts_at,
        }
    }
}

/// Lifecycle rules that the domain leaves open, made explicit.
///
/// Defaults are the conservative choice for each rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecyclePolicy {
    /// Whether a Formed match keeps taking enrollments beyond capacity.
    /// When `false`, enrolling into a Formed match fails with `RosterFull`.
    pub formed_accepts_enrollment: bool,
    /// Whether a Formed or Confirmed match that drops below capacity goes
    /// back to Searching. When `false` it keeps its state, and the
    /// confirmation gate stays shut until the roster is full again.
    pub revert_when_short: bool,
    /// Whether a match that already started can still be cancelled.
    pub cancel_in_play: bool,
    /// Whether eligibility updates must keep `min_skill <= max_skill`.
    pub enforce_skill_bounds: bool,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            formed_accepts_enrollment: false,
            revert_when_short: true,
            cancel_in_play: false,
            enforce_skill_bounds: true,
        }
    }
}

impl LifecyclePolicy {
    /// Parse a policy from a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    /// Returns [`KickoffError::Configuration`] if the document is malformed.
    pub fn from_json(doc: &str) -> Result<Self> {
        serde_json::from_str(doc).map_err(|e| KickoffError::Configuration(e.to_string()))
    }
}
