//! System-wide constants for the Kickoff lifecycle core.

/// Smallest roster that makes a group match.
pub const MIN_REQUIRED_PLAYERS: usize = 2;

/// Upper bound on the number of players a single match may require.
pub const MAX_REQUIRED_PLAYERS: usize = 64;

/// Default match length in minutes when a setup omits it.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Address used in status messages for a match without a venue yet.
pub const UNASSIGNED_LOCATION: &str = "location to be confirmed";

