//! The `Match` aggregate: roster, active lifecycle state, schedule, and
//! observers of one match.
//!
//! ## Operation Flow
//!
//! ```text
//! caller → Match::{enroll, withdraw, confirm, cancel, review_timing}
//!        → lifecycle::<operation>(state, roster, rules)   (is it legal? what comes next?)
//!        → Match::change_state(next)                      (install + fan-out)
//! ```
//!
//! `change_state` is the only place the active state is replaced, so no
//! state change reaches observers any other way.
//!
//! The aggregate is plain single-writer data. A host that shares a match
//! between tasks must serialize mutating calls per match (a mutex or one
//! actor per match); roster, confirmations, and state are updated together
//! inside each call.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use kickoff_types::{
    EligibilityCriteria, KickoffError, LifecyclePolicy, Location, MatchId, MatchSetup,
    MatchSnapshot, MatchState, Player, PlayerId, Result, Sport, StateTransition,
};

use crate::{
    MatchingStrategy, NotificationSink, Roster,
    lifecycle::{self, Rules},
    notify,
};

/// A scheduled group match and everything that drives its lifecycle.
pub struct Match {
    id: MatchId,
    sport: Sport,
    location: Option<Location>,
    /// Required roster size. Fixed at creation.
    capacity: usize,
    duration_minutes: u32,
    starts_at: DateTime<Utc>,
    organizer: PlayerId,
    eligibility: EligibilityCriteria,
    roster: Roster,
    state: MatchState,
    /// Distinct sinks, compared by allocation.
    observers: Vec<Arc<dyn NotificationSink>>,
    strategy: Option<Arc<dyn MatchingStrategy>>,
    policy: LifecyclePolicy,
}

impl Match {
    /// Create a match in Searching with `organizer` enrolled and confirmed.
    ///
    /// # Errors
    /// Returns [`KickoffError::InvalidSetup`] if `setup` fails validation.
    pub fn new(id: MatchId, setup: MatchSetup, organizer: Player) -> Result<Self> {
        setup.validate()?;
        tracing::debug!(
            match_id = %id,
            sport = %setup.sport,
            organizer = %organizer.id,
            required = setup.required_players,
            "Match created"
        );
        Ok(Self {
            id,
            sport: setup.sport,
            location: setup.location,
            capacity: setup.required_players,
            duration_minutes: setup.duration_minutes,
            starts_at: setup.starts_at,
            organizer: organizer.id,
            eligibility: EligibilityCriteria::default(),
            roster: Roster::with_organizer(organizer),
            state: MatchState::Searching,
            observers: Vec::new(),
            strategy: None,
            policy: LifecyclePolicy::default(),
        })
    }

    #[must_use]
    pub fn with_policy(mut self, policy: LifecyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Arc<dyn MatchingStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    // -----------------------------------------------------------------------
    // Roster operations
    // -----------------------------------------------------------------------

    /// Enroll a player. May form the match.
    ///
    /// # Errors
    /// - `AlreadyEnrolled` if the player is on the roster
    /// - `RosterFull` / `IllegalTransition` if the current state refuses enrollments
    pub fn enroll(&mut self, player: Player) -> Result<Option<StateTransition>> {
        let player_id = player.id;
        if self.roster.contains(&player_id) {
            tracing::warn!(match_id = %self.id, player = %player_id, "Player already enrolled");
            return Err(KickoffError::AlreadyEnrolled(player_id));
        }

        let rules = self.rules();
        let next = lifecycle::add_player(self.state, &mut self.roster, rules, player)
            .inspect_err(|e| self.log_rejected(e))?;
        tracing::debug!(
            match_id = %self.id,
            player = %player_id,
            enrolled = self.roster.len(),
            "Player enrolled"
        );
        self.advance(next)
    }

    /// Withdraw a player and drop their confirmation. May revert a formed match.
    ///
    /// # Errors
    /// - `NotEnrolled` if the player is not on the roster
    /// - `IllegalTransition` once the match has started or ended
    pub fn withdraw(&mut self, player_id: &PlayerId) -> Result<Option<StateTransition>> {
        if !self.roster.contains(player_id) {
            tracing::warn!(match_id = %self.id, player = %player_id, "Player not enrolled");
            return Err(KickoffError::NotEnrolled(*player_id));
        }

        let rules = self.rules();
        let next = lifecycle::remove_player(self.state, &mut self.roster, rules, player_id)
            .inspect_err(|e| self.log_rejected(e))?;
        tracing::debug!(
            match_id = %self.id,
            player = %player_id,
            enrolled = self.roster.len(),
            "Player withdrawn"
        );
        self.advance(next)
    }

    /// Record a player's confirmation, then run the confirmation gate.
    ///
    /// # Errors
    /// - `IllegalTransition` if the match has started or ended
    /// - `NotEnrolled` if the player is not on the roster
    pub fn confirm(&mut self, player_id: PlayerId) -> Result<Option<StateTransition>> {
        self.ensure_confirmable("confirm")?;
        self.roster.confirm(player_id).inspect_err(|_| {
            tracing::warn!(
                match_id = %self.id,
                player = %player_id,
                "Cannot confirm a player who is not enrolled"
            );
        })?;
        tracing::debug!(
            match_id = %self.id,
            player = %player_id,
            confirmed = self.roster.confirmed_count(),
            enrolled = self.roster.len(),
            "Player confirmed"
        );
        self.check_confirmations()
    }

    /// Confirm every enrolled player on their behalf, then run the gate.
    ///
    /// # Errors
    /// Returns `IllegalTransition` if the match has started or ended.
    pub fn confirm_roster(&mut self) -> Result<Option<StateTransition>> {
        self.ensure_confirmable("confirm roster")?;
        self.roster.confirm_all();
        self.check_confirmations()
    }

    /// Formed → Confirmed once the roster is full and everyone confirmed.
    fn check_confirmations(&mut self) -> Result<Option<StateTransition>> {
        if self.state != MatchState::Formed {
            return Ok(None);
        }
        if !(self.roster.all_confirmed() && self.roster.is_full(self.capacity)) {
            return Ok(None);
        }
        let next = lifecycle::confirm_players(self.state)?;
        self.change_state(next).map(Some)
    }

    fn ensure_confirmable(&self, operation: &'static str) -> Result<()> {
        if self.state.accepts_confirmations() {
            return Ok(());
        }
        let err = KickoffError::IllegalTransition {
            operation,
            state: self.state,
        };
        self.log_rejected(&err);
        Err(err)
    }

    // -----------------------------------------------------------------------
    // Lifecycle operations
    // -----------------------------------------------------------------------

    /// Call the match off.
    ///
    /// # Errors
    /// Returns `IllegalTransition` for finished or cancelled matches, and for
    /// matches in play unless the policy allows it.
    pub fn cancel(&mut self) -> Result<StateTransition> {
        let next = lifecycle::cancel(self.state, self.rules()).inspect_err(|e| self.log_rejected(e))?;
        self.change_state(next)
    }

    /// Apply time-driven transitions for the caller-supplied `now`.
    ///
    /// Checks Confirmed → InPlay, then InPlay → Finished, so a single call
    /// can fire both. Calling again with the same `now` fires nothing.
    pub fn review_timing(&mut self, now: DateTime<Utc>) -> Vec<StateTransition> {
        let mut fired = Vec::new();
        if let Some(next) = lifecycle::start_due(self.state, now, self.starts_at) {
            fired.extend(self.change_state(next).ok());
        }
        let ends_at = if self.state == MatchState::InPlay {
            self.ends_at()
        } else {
            None
        };
        if let Some(next) = lifecycle::finish_due(self.state, now, ends_at) {
            fired.extend(self.change_state(next).ok());
        }
        fired
    }

    /// Install `next` as the active state and notify observers.
    ///
    /// The edge must exist in the state graph and satisfy the same roster
    /// and policy conditions the operations enforce (see
    /// [`lifecycle::permits`]), so a direct call cannot skip the
    /// confirmation gate or the policy.
    ///
    /// # Errors
    /// Returns `IllegalTransition` if the edge is missing or its conditions
    /// do not hold; nothing changes and nobody is notified.
    pub fn change_state(&mut self, next: MatchState) -> Result<StateTransition> {
        let allowed = self.state.can_transition_to(next)
            && lifecycle::permits(self.state, next, &self.roster, self.rules());
        if !allowed {
            let err = KickoffError::IllegalTransition {
                operation: "change state",
                state: self.state,
            };
            self.log_rejected(&err);
            return Err(err);
        }

        let from = std::mem::replace(&mut self.state, next);
        tracing::info!(match_id = %self.id, %from, to = %next, "Match state changed");
        self.notify();
        Ok(StateTransition { from, to: next })
    }

    fn advance(&mut self, next: Option<MatchState>) -> Result<Option<StateTransition>> {
        next.map(|state| self.change_state(state)).transpose()
    }

    fn notify(&self) -> usize {
        let message = notify::status_message(&self.sport, self.location.as_ref(), self.state);
        let delivered = notify::fan_out(&self.observers, self.roster.enrolled(), &message);
        tracing::debug!(
            match_id = %self.id,
            observers = self.observers.len(),
            recipients = self.roster.len(),
            delivered,
            "Status fan-out"
        );
        delivered
    }

    fn rules(&self) -> Rules {
        Rules {
            capacity: self.capacity,
            policy: self.policy,
        }
    }

    fn log_rejected(&self, err: &KickoffError) {
        tracing::warn!(match_id = %self.id, state = %self.state, error = %err, "Operation rejected");
    }

    // -----------------------------------------------------------------------
    // Parameters
    // -----------------------------------------------------------------------

    /// Replace venue, length, and start. Leaves roster and state alone.
    pub fn edit_schedule(
        &mut self,
        location: Option<Location>,
        duration_minutes: u32,
        starts_at: DateTime<Utc>,
    ) {
        self.location = location;
        self.duration_minutes = duration_minutes;
        self.starts_at = starts_at;
        tracing::debug!(
            match_id = %self.id,
            %starts_at,
            duration_minutes,
            "Schedule edited"
        );
    }

    /// Replace the eligibility window.
    ///
    /// # Errors
    /// Returns `InvalidSkillBounds` for an inverted window when the policy
    /// enforces skill bounds.
    pub fn set_eligibility(&mut self, criteria: EligibilityCriteria) -> Result<()> {
        if self.policy.enforce_skill_bounds {
            criteria.validate()?;
        }
        self.eligibility = criteria;
        Ok(())
    }

    pub fn set_strategy(&mut self, strategy: Arc<dyn MatchingStrategy>) {
        tracing::debug!(match_id = %self.id, strategy = strategy.name(), "Strategy set");
        self.strategy = Some(strategy);
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Register a sink. Returns `false` if it was already registered.
    pub fn add_observer(&mut self, sink: Arc<dyn NotificationSink>) -> bool {
        if self.observers.iter().any(|o| Arc::ptr_eq(o, &sink)) {
            return false;
        }
        self.observers.push(sink);
        true
    }

    /// Unregister a sink. Returns `false` if it was not registered.
    pub fn remove_observer(&mut self, sink: &Arc<dyn NotificationSink>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !Arc::ptr_eq(o, sink));
        self.observers.len() != before
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// Flat snapshot for callers outside the core.
    #[must_use]
    pub fn project(&self) -> MatchSnapshot {
        MatchSnapshot {
            id: self.id,
            sport: self.sport.name.clone(),
            state: self.state,
            location: self.location.clone(),
            starts_at: self.starts_at.to_rfc3339(),
            enrolled_players: self.roster.len(),
            required_players: self.capacity,
            duration_minutes: self.duration_minutes,
        }
    }

    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> MatchState {
        self.state
    }

    #[must_use]
    pub fn sport(&self) -> &Sport {
        &self.sport
    }

    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Scheduled end: start plus duration. `None` if that lies past the
    /// latest representable time.
    #[must_use]
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at
            .checked_add_signed(Duration::minutes(i64::from(self.duration_minutes)))
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn organizer(&self) -> PlayerId {
        self.organizer
    }

    #[must_use]
    pub fn eligibility(&self) -> &EligibilityCriteria {
        &self.eligibility
    }

    #[must_use]
    pub fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    #[must_use]
    pub fn strategy(&self) -> Option<&Arc<dyn MatchingStrategy>> {
        self.strategy.as_ref()
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn enrolled(&self) -> &[Player] {
        self.roster.enrolled()
    }

    #[must_use]
    pub fn is_enrolled(&self, player_id: &PlayerId) -> bool {
        self.roster.contains(player_id)
    }

    #[must_use]
    pub fn is_confirmed(&self, player_id: &PlayerId) -> bool {
        self.roster.is_confirmed(player_id)
    }

    #[must_use]
    pub fn confirmed_count(&self) -> usize {
        self.roster.confirmed_count()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("id", &self.id)
            .field("sport", &self.sport)
            .field("state", &self.state)
            .field("starts_at", &self.starts_at)
            .field("capacity", &self.capacity)
            .field("roster", &self.roster)
            .field("observers", &self.observers.len())
            .field("strategy", &self.strategy.as_ref().map(|s| s.name().to_string()))
            .finish_non_exhaustive()
    }
}
