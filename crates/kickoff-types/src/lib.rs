//! # kickoff-types
//!
//! Shared types, errors, and configuration for the **Kickoff** match
//! lifecycle core.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`MatchId`], [`PlayerId`]
//! - **Player model**: [`Player`], [`SkillLevel`], [`EligibilityCriteria`]
//! - **Venue model**: [`Sport`], [`Location`]
//! - **Lifecycle tag**: [`MatchState`], [`StateTransition`]
//! - **Projection**: [`MatchSnapshot`]
//! - **Configuration**: [`MatchSetup`], [`LifecyclePolicy`]
//! - **Errors**: [`KickoffError`] with `KO_ERR_` prefix codes
//! - **Constants**: limits and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod player;
pub mod snapshot;
pub mod venue;

pub use config::*;
pub use error::*;
pub use ids::*;
pub use lifecycle::*;
pub use player::*;
pub use snapshot::*;
pub use venue::*;

// Constants are accessed via `kickoff_types::constants::FOO`.
