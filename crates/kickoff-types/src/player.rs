//! Player model and the eligibility bounds a match advertises.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{KickoffError, PlayerId, Result};

/// Self-reported playing level. Ordered: `Beginner < Intermediate < Advanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "BEGINNER"),
            Self::Intermediate => write!(f, "INTERMEDIATE"),
            Self::Advanced => write!(f, "ADVANCED"),
        }
    }
}

/// A player as seen by the lifecycle core.
///
/// Equality and hashing go through [`PlayerId`] only: two values carrying
/// the same id are the same player even if the display name was edited in
/// between.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub skill: SkillLevel,
    /// Number of matches this player has already played.
    pub matches_played: u32,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, display_name: impl Into<String>, skill: SkillLevel) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            skill,
            matches_played: 0,
        }
    }

    #[must_use]
    pub fn with_matches_played(mut self, matches_played: u32) -> Self {
        self.matches_played = matches_played;
        self
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl std::hash::Hash for Player {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

/// Dummy players for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl Player {
    /// Fresh intermediate player with a new id.
    pub fn dummy(display_name: &str) -> Self {
        Self::new(PlayerId::new(), display_name, SkillLevel::Intermediate)
    }
}

// ---------------------------------------------------------------------------
// EligibilityCriteria
// ---------------------------------------------------------------------------

/// Who a match is looking for: a skill window and a minimum track record.
///
/// Advisory only. Enrollment does not consult it; a matching strategy
/// on the caller side does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityCriteria {
    pub min_skill: SkillLevel,
    pub max_skill: SkillLevel,
    pub min_matches_played: u32,
}

impl Default for EligibilityCriteria {
    fn default() -> Self {
        Self {
            min_skill: SkillLevel::Beginner,
            max_skill: SkillLevel::Advanced,
            min_matches_played: 0,
        }
    }
}

impl EligibilityCriteria {
    /// Whether `player` falls inside the skill window and has played enough.
    #[must_use]
    pub fn admits(&self, player: &Player) -> bool {
        player.skill >= self.min_skill
            && player.skill <= self.max_skill
            && player.matches_played >= self.min_matches_played
    }

    /// Check that the skill window is not inverted.
    ///
    /// # Errors
    /// Returns [`KickoffError::InvalidSkillBounds`] when `min_skill > max_skill`.
    pub fn validate(&self) -> Result<()> {
        if self.min_skill > self.max_skill {
            return Err(KickoffError::InvalidSkillBounds {
                min: self.min_skill,
                max: self.max_skill,
            });
        }
        Ok(())
    }
}
