//! # kickoff-core
//!
//! **Lifecycle core for scheduled group matches.**
//!
//! Players enroll and confirm; the match moves through
//! SEARCHING → FORMED → CONFIRMED → IN_PLAY → FINISHED (or CANCELLED)
//! and every move is broadcast to the registered observers.
//!
//! - **Synchronous and in-memory**: no I/O, no timers, no threads. Time only
//!   advances when the caller passes `now` to [`Match::review_timing`].
//! - **Single choke point**: every state change goes through
//!   [`Match::change_state`], which validates the edge and runs the fan-out.
//! - **Closed state set**: per-state behavior lives in [`lifecycle`] as
//!   exhaustive matches over [`MatchState`](kickoff_types::MatchState).

pub mod aggregate;
pub mod lifecycle;
pub mod notify;
pub mod roster;
pub mod strategy;

pub use aggregate::Match;
pub use notify::{Delivery, MemorySink, NotificationSink, TracingSink};
pub use roster::Roster;
pub use strategy::MatchingStrategy;
