//! Status-change fan-out.
//!
//! On every state change the match renders one status line and hands it to
//! every observer once per enrolled player: observers outer, players inner.
//! With `o` observers and `n` enrolled players a change produces exactly
//! `o × n` deliveries. The text is the same for every recipient; the
//! per-recipient call is what lets a sink address each player separately.

use std::sync::{Arc, Mutex, PoisonError};

use kickoff_types::{Location, MatchState, Player, PlayerId, Sport, constants};

/// Something that can deliver a status line to a player.
///
/// Fire-and-forget: the core does not wait for, retry, or inspect delivery.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, recipient: &Player, message: &str);
}

/// Render the status line for a match that just entered `state`.
#[must_use]
pub fn status_message(sport: &Sport, location: Option<&Location>, state: MatchState) -> String {
    let address = location.map_or(constants::UNASSIGNED_LOCATION, |l| l.address.as_str());
    format!("Match update: {sport} at {address}. State: {state}")
}

/// Deliver `message` to every (observer, recipient) pair. Returns the
/// number of deliveries made.
pub fn fan_out(
    observers: &[Arc<dyn NotificationSink>],
    recipients: &[Player],
    message: &str,
) -> usize {
    let mut delivered = 0;
    for observer in observers {
        for recipient in recipients {
            observer.deliver(recipient, message);
            delivered += 1;
        }
    }
    delivered
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Emits each delivery as a `tracing` event.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn deliver(&self, recipient: &Player, message: &str) {
        tracing::info!(recipient = %recipient.id, name = %recipient.display_name, "{message}");
    }
}

/// A delivery captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: PlayerId,
    pub message: String,
}

/// Keeps every delivery in memory, in arrival order.
///
/// Useful as an outbox a host drains on its own schedule, and in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    deliveries: Mutex<Vec<Delivery>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything delivered so far.
    #[must_use]
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Take everything delivered so far, leaving the sink empty.
    pub fn drain(&self) -> Vec<Delivery> {
        std::mem::take(&mut *self.deliveries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for MemorySink {
    fn deliver(&self, recipient: &Player, message: &str) {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Delivery {
                recipient: recipient.id,
                message: message.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_sport_location_and_state() {
        let msg = status_message(
            &Sport::new("Football"),
            Some(&Location::new("Club Atletico, Field 1")),
            MatchState::Formed,
        );
        assert_eq!(msg, "Match update: Football at Club Atletico, Field 1. State: FORMED");
    }

    #[test]
    fn message_without_location() {
        let msg = status_message(&Sport::new("Padel"), None, MatchState::Cancelled);
        assert!(msg.contains(constants::UNASSIGNED_LOCATION));
        assert!(msg.ends_with("State: CANCELLED"));
    }

    #[test]
    fn fan_out_is_observers_times_recipients() {
        let a = Arc::new(MemorySink::new());
        let b = Arc::new(MemorySink::new());
        let observers: Vec<Arc<dyn NotificationSink>> = vec![a.clone(), b.clone()];
        let players = vec![Player::dummy("p1"), Player::dummy("p2"), Player::dummy("p3")];

        let delivered = fan_out(&observers, &players, "hello");

        assert_eq!(delivered, 6);
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn each_observer_sees_players_in_roster_order() {
        let sink = Arc::new(MemorySink::new());
        let observers: Vec<Arc<dyn NotificationSink>> = vec![sink.clone()];
        let players = vec![Player::dummy("first"), Player::dummy("second")];

        fan_out(&observers, &players, "msg");

        let recipients: Vec<_> = sink.deliveries().into_iter().map(|d| d.recipient).collect();
        assert_eq!(recipients, vec![players[0].id, players[1].id]);
    }

    #[test]
    fn no_observers_no_deliveries() {
        assert_eq!(fan_out(&[], &[Player::dummy("p")], "msg"), 0);
    }

    #[test]
    fn drain_empties_sink() {
        let sink = MemorySink::new();
        sink.deliver(&Player::dummy("p"), "one");
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn tracing_sink_accepts_deliveries() {
        TracingSink.deliver(&Player::dummy("p"), "logged");
    }
}
