//! Integration tests: full match lifecycle
//!
//! SEARCHING → FORMED → CONFIRMED → IN_PLAY → FINISHED, plus cancellation.
//!
//! Drives the `Match` aggregate only through its public operations and
//! checks the resulting state, roster, and notifications.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use kickoff_core::{Match, MemorySink};
use kickoff_types::*;

fn at(minutes_from_now: i64) -> DateTime<Utc> {
    Utc::now() + Duration::minutes(minutes_from_now)
}

fn make_match(capacity: usize, starts_at: DateTime<Utc>) -> (Match, Player) {
    let organizer = Player::dummy("U1");
    let m = Match::new(
        MatchId(100),
        MatchSetup::dummy(capacity, starts_at),
        organizer.clone(),
    )
    .expect("valid setup");
    (m, organizer)
}

/// A two-player match driven all the way to CONFIRMED.
fn confirmed_match(starts_at: DateTime<Utc>) -> (Match, Player, Player) {
    let (mut m, u1) = make_match(2, starts_at);
    let u2 = Player::dummy("U2");
    m.enroll(u2.clone()).unwrap();
    m.confirm(u2.id).unwrap();
    assert_eq!(m.state(), MatchState::Confirmed);
    (m, u1, u2)
}

fn assert_confirmed_subset(m: &Match) {
    let confirmed_enrolled = m.enrolled().iter().filter(|p| m.is_confirmed(&p.id)).count();
    assert_eq!(
        confirmed_enrolled,
        m.confirmed_count(),
        "confirmed set contains players who are not enrolled"
    );
}

// =============================================================================
// Scenario A: two-player match forms and confirms
// =============================================================================
#[test]
fn scenario_a_form_then_confirm() {
    let (mut m, u1) = make_match(2, at(120));
    let u2 = Player::dummy("U2");

    let formed = m.enroll(u2.clone()).unwrap();
    assert_eq!(
        formed,
        Some(StateTransition {
            from: MatchState::Searching,
            to: MatchState::Formed
        })
    );

    let confirmed = m.confirm(u2.id).unwrap();
    assert_eq!(
        confirmed,
        Some(StateTransition {
            from: MatchState::Formed,
            to: MatchState::Confirmed
        })
    );
    assert!(m.is_confirmed(&u1.id));
    assert!(m.is_confirmed(&u2.id));
    assert_eq!(m.confirmed_count(), m.enrolled().len());
}

// =============================================================================
// Scenario B: confirmation below capacity does not advance
// =============================================================================
#[test]
fn scenario_b_confirm_below_capacity() {
    let (mut m, _) = make_match(3, at(120));
    let u2 = Player::dummy("U2");
    m.enroll(u2.clone()).unwrap();
    assert_eq!(m.state(), MatchState::Searching);

    assert_eq!(m.confirm(u2.id).unwrap(), None);
    assert_eq!(m.state(), MatchState::Searching);
    assert!(m.is_confirmed(&u2.id));
}

#[test]
fn formed_waits_for_last_confirmation() {
    let (mut m, _) = make_match(3, at(120));
    let u2 = Player::dummy("U2");
    let u3 = Player::dummy("U3");
    m.enroll(u2.clone()).unwrap();
    m.enroll(u3.clone()).unwrap();
    assert_eq!(m.state(), MatchState::Formed);

    assert_eq!(m.confirm(u2.id).unwrap(), None);
    assert_eq!(m.state(), MatchState::Formed);
    // Re-confirming is harmless and still does not advance.
    assert_eq!(m.confirm(u2.id).unwrap(), None);

    let t = m.confirm(u3.id).unwrap().unwrap();
    assert_eq!(t.to, MatchState::Confirmed);
}

// =============================================================================
// Scenario C: start time passed → IN_PLAY exactly once
// =============================================================================
#[test]
fn scenario_c_start_fires_once() {
    let (mut m, _, _) = confirmed_match(at(-10));
    let now = Utc::now();

    let fired = m.review_timing(now);
    assert_eq!(
        fired,
        vec![StateTransition {
            from: MatchState::Confirmed,
            to: MatchState::InPlay
        }]
    );

    assert!(m.review_timing(now).is_empty());
    assert_eq!(m.state(), MatchState::InPlay);
}

#[test]
fn review_before_start_does_nothing() {
    let (mut m, _, _) = confirmed_match(at(30));
    assert!(m.review_timing(Utc::now()).is_empty());
    assert_eq!(m.state(), MatchState::Confirmed);
}

#[test]
fn review_ignores_matches_that_never_confirmed() {
    let (mut m, _) = make_match(2, at(-120));
    m.enroll(Player::dummy("U2")).unwrap();
    assert_eq!(m.state(), MatchState::Formed);
    assert!(m.review_timing(Utc::now()).is_empty());
    assert_eq!(m.state(), MatchState::Formed);
}

// =============================================================================
// Scenario D: end time passed → FINISHED, then everything is rejected
// =============================================================================
#[test]
fn scenario_d_finish_then_reject() {
    let start = at(-10);
    let (mut m, _, u2) = confirmed_match(start);
    m.review_timing(Utc::now());
    assert_eq!(m.state(), MatchState::InPlay);

    let after_end = m.ends_at().unwrap() + Duration::minutes(1);
    let fired = m.review_timing(after_end);
    assert_eq!(
        fired,
        vec![StateTransition {
            from: MatchState::InPlay,
            to: MatchState::Finished
        }]
    );

    let err = m.enroll(Player::dummy("late")).unwrap_err();
    assert!(matches!(
        err,
        KickoffError::IllegalTransition {
            state: MatchState::Finished,
            ..
        }
    ));
    let err = m.confirm(u2.id).unwrap_err();
    assert!(matches!(err, KickoffError::IllegalTransition { .. }));
    assert_eq!(m.state(), MatchState::Finished);
}

#[test]
fn overdue_confirmed_match_plays_and_finishes_in_one_review() {
    let (mut m, _, _) = confirmed_match(at(-180));
    let fired = m.review_timing(Utc::now());
    let path: Vec<_> = fired.iter().map(|t| t.to).collect();
    assert_eq!(path, vec![MatchState::InPlay, MatchState::Finished]);
    assert!(m.review_timing(Utc::now()).is_empty());
}

#[test]
fn rescheduling_moves_the_time_gates() {
    let (mut m, _, _) = confirmed_match(at(-10));
    let location = m.location().cloned();
    m.edit_schedule(location, 90, at(60));

    assert!(m.review_timing(Utc::now()).is_empty());
    assert_eq!(m.state(), MatchState::Confirmed);

    let fired = m.review_timing(at(61));
    assert_eq!(fired.len(), 1);
    assert_eq!(m.state(), MatchState::InPlay);
}

// =============================================================================
// Scenario E: cancelled matches reject enrollment
// =============================================================================
#[test]
fn scenario_e_cancel_then_enroll() {
    let (mut m, _) = make_match(4, at(120));
    let t = m.cancel().unwrap();
    assert_eq!(t.from, MatchState::Searching);
    assert_eq!(t.to, MatchState::Cancelled);

    let err = m.enroll(Player::dummy("U2")).unwrap_err();
    assert!(matches!(
        err,
        KickoffError::IllegalTransition {
            operation: "enroll",
            state: MatchState::Cancelled
        }
    ));
}

#[test]
fn cancel_in_play_follows_policy() {
    let (mut strict, _, _) = confirmed_match(at(-10));
    strict.review_timing(Utc::now());
    assert!(strict.cancel().is_err());
    assert_eq!(strict.state(), MatchState::InPlay);

    let (lenient, _, _) = confirmed_match(at(-10));
    let mut lenient = lenient.with_policy(LifecyclePolicy {
        cancel_in_play: true,
        ..LifecyclePolicy::default()
    });
    lenient.review_timing(Utc::now());
    assert_eq!(lenient.cancel().unwrap().to, MatchState::Cancelled);
}

// =============================================================================
// Monotonicity: terminal states never move
// =============================================================================
#[test]
fn terminal_states_are_final() {
    let (mut finished, _, _) = confirmed_match(at(-180));
    finished.review_timing(Utc::now());
    let (mut cancelled, _) = make_match(2, at(120));
    cancelled.cancel().unwrap();

    for m in [&mut finished, &mut cancelled] {
        let terminal = m.state();
        assert!(terminal.is_terminal());
        let sink = Arc::new(MemorySink::new());
        m.add_observer(sink.clone());
        let member = m.enrolled()[0].id;

        assert!(m.enroll(Player::dummy("x")).is_err());
        assert!(m.withdraw(&member).is_err());
        assert!(m.confirm(member).is_err());
        assert!(m.confirm_roster().is_err());
        assert!(m.cancel().is_err());
        assert!(m.review_timing(at(10_000)).is_empty());
        for target in [
            MatchState::Searching,
            MatchState::Formed,
            MatchState::Confirmed,
            MatchState::InPlay,
            MatchState::Finished,
            MatchState::Cancelled,
        ] {
            assert!(m.change_state(target).is_err());
        }

        assert_eq!(m.state(), terminal);
        assert!(m.is_enrolled(&member));
        assert!(sink.is_empty(), "{terminal}: rejected operations must not notify");
    }
}

// =============================================================================
// Invariant: confirmed ⊆ enrolled across a churny sequence
// =============================================================================
#[test]
fn confirmed_stays_within_enrolled() {
    let (mut m, u1) = make_match(4, at(120));
    assert!(m.is_enrolled(&u1.id) && m.is_confirmed(&u1.id));
    let players: Vec<_> = (0..5).map(|i| Player::dummy(&format!("p{i}"))).collect();

    m.enroll(players[0].clone()).unwrap();
    m.confirm(players[0].id).unwrap();
    assert_confirmed_subset(&m);

    m.enroll(players[1].clone()).unwrap();
    m.enroll(players[2].clone()).unwrap();
    assert_eq!(m.state(), MatchState::Formed);
    m.confirm(players[2].id).unwrap();
    assert_confirmed_subset(&m);

    // Formed is full: the fifth player is turned away.
    assert!(matches!(
        m.enroll(players[3].clone()).unwrap_err(),
        KickoffError::RosterFull { capacity: 4 }
    ));

    // A confirmed player leaves; match reverts.
    let t = m.withdraw(&players[2].id).unwrap().unwrap();
    assert_eq!(t.to, MatchState::Searching);
    assert!(!m.is_confirmed(&players[2].id));
    assert_confirmed_subset(&m);

    m.enroll(players[4].clone()).unwrap();
    assert_eq!(m.state(), MatchState::Formed);
    m.confirm_roster().unwrap();
    assert_eq!(m.state(), MatchState::Confirmed);
    assert_confirmed_subset(&m);

    // Dropping out of a confirmed match also reverts it.
    m.withdraw(&players[0].id).unwrap();
    assert_eq!(m.state(), MatchState::Searching);
    assert_confirmed_subset(&m);
}

#[test]
fn organizer_may_withdraw() {
    let (mut m, u1) = make_match(3, at(120));
    m.withdraw(&u1.id).unwrap();
    assert!(!m.is_enrolled(&u1.id));
    assert!(!m.is_confirmed(&u1.id));
    assert_eq!(m.organizer(), u1.id);
    assert_eq!(m.confirmed_count(), 0);
}

// =============================================================================
// Projection
// =============================================================================
#[test]
fn projection_tracks_lifecycle() {
    let (mut m, _, _) = confirmed_match(at(-10));
    assert_eq!(m.project().state, MatchState::Confirmed);
    m.review_timing(Utc::now());

    let snap = m.project();
    assert_eq!(snap.state, MatchState::InPlay);
    assert_eq!(snap.enrolled_players, 2);

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["state"], "IN_PLAY");
    assert_eq!(json["id"], 100);
    assert_eq!(json["sport"], "Football");
}
