//! Lifecycle tag for a match.
//!
//! ## State Machine
//!
//! ```text
//!                 roster full          all confirmed        start time       start + duration
//!  ┌───────────┐ ───────────▶ ┌────────┐ ──────────▶ ┌───────────┐ ───────▶ ┌─────────┐ ───────▶ ┌──────────┐
//!  │ SEARCHING │              │ FORMED │             │ CONFIRMED │          │ IN_PLAY │          │ FINISHED │
//!  └─────┬─────┘ ◀─────────── └───┬────┘             └─────┬─────┘          └────┬────┘          └──────────┘
//!        │        player left     │                        │                     ╎ (policy)
//!        │                        │  cancel                │                     ╎
//!        ▼                        ▼                        ▼                     ▼
//!  ┌─────────────────────────────────────────────────────────────────────────────────┐
//!  │                                   CANCELLED                                     │
//!  └─────────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A Confirmed match that loses a player can also fall back to Searching.
//! FINISHED and CANCELLED are terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The phase a match is in. Exactly one is active per match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchState {
    /// Initial phase: collecting enrollments until the roster is full.
    Searching,
    /// Roster is full; waiting for every enrolled player to confirm.
    Formed,
    /// Everyone confirmed; waiting for the scheduled start.
    Confirmed,
    /// Scheduled start has passed; waiting for the scheduled end.
    InPlay,
    /// Played to the end. Terminal.
    Finished,
    /// Called off before being played. Terminal.
    Cancelled,
}

impl MatchState {
    /// No transition leaves a terminal state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }

    /// Whether `self → target` is an edge of the lifecycle graph.
    ///
    /// Self-loops are not edges.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Searching, Self::Formed | Self::Cancelled)
                | (Self::Formed, Self::Searching | Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Searching | Self::InPlay | Self::Cancelled)
                | (Self::InPlay, Self::Finished | Self::Cancelled)
        )
    }

    /// States in which players may still confirm attendance.
    #[must_use]
    pub fn accepts_confirmations(self) -> bool {
        matches!(self, Self::Searching | Self::Formed | Self::Confirmed)
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Searching => write!(f, "SEARCHING"),
            Self::Formed => write!(f, "FORMED"),
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::InPlay => write!(f, "IN_PLAY"),
            Self::Finished => write!(f, "FINISHED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A state change that was installed on a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: MatchState,
    pub to: MatchState,
}

impl fmt::Display for StateTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
