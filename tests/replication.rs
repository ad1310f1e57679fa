//! Replication integration tests.
//!
//! Client mirrors fed only the events addressed to them must agree with the
//! authoritative session.

use lane_ccg::cards::CardCatalog;
use lane_ccg::core::{MatchConfig, Side, SideMap};
use lane_ccg::error::CommandError;
use lane_ccg::session::{Command, MatchSession, Mirror, Outbound};

const LOG_CAPACITY: usize = 30;

fn deliver(mirrors: &mut SideMap<Mirror>, out: &[Outbound]) {
    for outbound in out {
        for (side, mirror) in mirrors.iter_mut() {
            if outbound.to.includes(side) {
                mirror.apply(&outbound.event);
            }
        }
    }
}

fn assert_in_sync(session: &MatchSession, mirrors: &SideMap<Mirror>) {
    for (side, mirror) in mirrors.iter() {
        assert_eq!(mirror.view(), &session.snapshot(), "{side} view diverged");
        assert_eq!(mirror.hand(), session.hand_snapshot(side).as_slice(), "{side} hand diverged");
        assert_eq!(mirror.log().lines(), session.log().lines(), "{side} log diverged");
    }
}

fn starter_deck() -> Vec<std::sync::Arc<lane_ccg::cards::CardDefinition>> {
    let catalog = CardCatalog::starter();
    catalog
        .iter_sorted()
        .flat_map(|card| [card.clone(), card.clone()])
        .collect()
}

#[test]
fn test_mirrors_follow_scripted_match() {
    let mut session = MatchSession::new(MatchConfig::default().with_seed(9));
    let mut mirrors = SideMap::new(|side| Mirror::new(side, LOG_CAPACITY));

    let deck = starter_deck();
    for side in Side::ALL {
        let out = session.handle(side, Command::Connect);
        deliver(&mut mirrors, &out);
        let out = session.handle(side, Command::SubmitDeck { cards: deck.clone() });
        deliver(&mut mirrors, &out);
    }
    assert_in_sync(&session, &mirrors);

    for round in 0..6 {
        for side in Side::ALL {
            let lane = round % 5;
            let out = session.handle(side, Command::play(side, 0, lane));
            deliver(&mut mirrors, &out);
            let out = session.handle(side, Command::EndTurn);
            deliver(&mut mirrors, &out);
            assert_in_sync(&session, &mirrors);
        }
    }
}

#[test]
fn test_rejection_reaches_only_sender_mirror() {
    let mut session = MatchSession::new(MatchConfig::default());
    let mut mirrors = SideMap::new(|side| Mirror::new(side, LOG_CAPACITY));

    let out = session.handle(Side::B, Command::EndTurn);
    deliver(&mut mirrors, &out);

    assert!(mirrors[Side::A].last_error().is_none());
    assert!(matches!(
        mirrors[Side::B].last_error(),
        Some(CommandError::NotActive(_))
    ));
}

#[test]
fn test_reconnecting_client_rebuilds_view() {
    let mut session = MatchSession::new(MatchConfig::default().with_seed(4));
    let deck = starter_deck();
    for side in Side::ALL {
        session.handle(side, Command::Connect);
        session.handle(side, Command::SubmitDeck { cards: deck.clone() });
    }
    session.handle(Side::A, Command::play(Side::A, 0, 2));
    session.handle(Side::A, Command::EndTurn);
    session.handle(Side::B, Command::Disconnect);

    let mut fresh = Mirror::new(Side::B, LOG_CAPACITY);
    let out = session.handle(Side::B, Command::Connect);
    for outbound in out.iter().filter(|o| o.to.includes(Side::B)) {
        fresh.apply(&outbound.event);
    }

    assert_eq!(fresh.view(), &session.snapshot());
    assert_eq!(fresh.hand(), session.hand_snapshot(Side::B).as_slice());
    assert!(fresh.is_my_turn());
    assert_eq!(fresh.log().last(), Some("Side B reconnected."));
}
