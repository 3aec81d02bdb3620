//! Enrollment list with a confirmation set layered on top.
//!
//! Invariant: every confirmed id belongs to an enrolled player. Removal
//! drops the confirmation in the same call, so the invariant cannot be
//! observed broken between two operations.

use std::collections::HashSet;

use kickoff_types::{KickoffError, Player, PlayerId, Result};

/// Ordered roster of enrolled players plus who has confirmed.
#[derive(Debug, Clone)]
pub struct Roster {
    /// Enrolled players in enrollment order. No duplicates.
    enrolled: Vec<Player>,
    /// Ids of enrolled players who confirmed attendance.
    confirmed: HashSet<PlayerId>,
}

impl Roster {
    /// Roster with `organizer` enrolled and already confirmed.
    #[must_use]
    pub fn with_organizer(organizer: Player) -> Self {
        let mut confirmed = HashSet::new();
        confirmed.insert(organizer.id);
        Self {
            enrolled: vec![organizer],
            confirmed,
        }
    }

    #[must_use]
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.enrolled.iter().any(|p| p.id == *id)
    }

    /// Append a player. Returns `false` (and changes nothing) if already enrolled.
    pub fn enroll(&mut self, player: Player) -> bool {
        if self.contains(&player.id) {
            return false;
        }
        self.enrolled.push(player);
        true
    }

    /// Remove a player and their confirmation. Returns the removed player.
    pub fn withdraw(&mut self, id: &PlayerId) -> Option<Player> {
        let idx = self.enrolled.iter().position(|p| p.id == *id)?;
        self.confirmed.remove(id);
        Some(self.enrolled.remove(idx))
    }

    /// Mark an enrolled player as confirmed. Confirming twice is harmless.
    ///
    /// # Errors
    /// Returns [`KickoffError::NotEnrolled`] if `id` is not on the roster.
    pub fn confirm(&mut self, id: PlayerId) -> Result<()> {
        if !self.contains(&id) {
            return Err(KickoffError::NotEnrolled(id));
        }
        self.confirmed.insert(id);
        Ok(())
    }

    /// Confirm every enrolled player at once.
    pub fn confirm_all(&mut self) {
        self.confirmed.extend(self.enrolled.iter().map(|p| p.id));
    }

    #[must_use]
    pub fn is_confirmed(&self, id: &PlayerId) -> bool {
        self.confirmed.contains(id)
    }

    /// Every enrolled player has confirmed.
    #[must_use]
    pub fn all_confirmed(&self) -> bool {
        self.confirmed.len() == self.enrolled.len()
    }

    /// At least `capacity` players are enrolled.
    #[must_use]
    pub fn is_full(&self, capacity: usize) -> bool {
        self.enrolled.len() >= capacity
    }

    #[must_use]
    pub fn enrolled(&self) -> &[Player] {
        &self.enrolled
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.enrolled.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enrolled.is_empty()
    }

    #[must_use]
    pub fn confirmed_count(&self) -> usize {
        self.confirmed.len()
    }
}
