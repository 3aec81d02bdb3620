//! Error types for the Kickoff lifecycle core.
//!
//! All errors use the `KO_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Roster membership errors
//! - 2xx: Lifecycle errors
//! - 3xx: Match setup / parameter errors
//! - 9xx: General errors
//!
//! Every error is local to one operation: the match is left exactly as it
//! was and no notification is sent.

use thiserror::Error;

use crate::{MatchState, PlayerId, SkillLevel};

/// Central error enum for all Kickoff operations.
#[derive(Debug, Error)]
pub enum KickoffError {
    // =================================================================
    // Membership Errors (1xx)
    // =================================================================
    /// The player is already on the roster.
    #[error("KO_ERR_100: Player already enrolled: {0}")]
    AlreadyEnrolled(PlayerId),

    /// The player is not on the roster.
    #[error("KO_ERR_101: Player not enrolled: {0}")]
    NotEnrolled(PlayerId),

    // =================================================================
    // Lifecycle Errors (2xx)
    // =================================================================
    /// The operation is not valid in the match's current state.
    #[error("KO_ERR_200: Cannot {operation} while match is {state}")]
    IllegalTransition {
        operation: &'static str,
        state: MatchState,
    },

    /// The roster already holds the required number of players.
    #[error("KO_ERR_201: Roster full ({capacity} players)")]
    RosterFull { capacity: usize },

    // =================================================================
    // Setup Errors (3xx)
    // =================================================================
    /// Match parameters failed validation.
    #[error("KO_ERR_300: Invalid match setup: {reason}")]
    InvalidSetup { reason: String },

    /// Minimum skill above maximum skill.
    #[error("KO_ERR_301: Invalid skill bounds: min {min} above max {max}")]
    InvalidSkillBounds { min: SkillLevel, max: SkillLevel },

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Configuration error (invalid policy document, missing fields, etc.).
    #[error("KO_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, KickoffError>;
