//! Determinism tests.
//!
//! The same seed and the same command stream must produce byte-identical
//! match state.

use lane_ccg::cards::CardCatalog;
use lane_ccg::core::{MatchConfig, Side};
use lane_ccg::session::{Command, MatchSession};

fn starter_deck() -> Vec<std::sync::Arc<lane_ccg::cards::CardDefinition>> {
    CardCatalog::starter()
        .iter_sorted()
        .flat_map(|card| [card.clone(), card.clone()])
        .collect()
}

fn scripted(seed: u64) -> MatchSession {
    let mut session = MatchSession::new(MatchConfig::default().with_seed(seed));
    let deck = starter_deck();
    for side in Side::ALL {
        session.handle(side, Command::Connect);
        session.handle(side, Command::SubmitDeck { cards: deck.clone() });
    }
    for round in 0..10 {
        for side in Side::ALL {
            for hand_index in 0..3 {
                let target = if hand_index % 2 == 0 { side.opponent() } else { side };
                session.handle(side, Command::play_at(side, hand_index, round % 5, target));
            }
            session.handle(side, Command::EndTurn);
        }
    }
    session
}

fn deck_order(session: &MatchSession, side: Side) -> Vec<String> {
    session
        .hand(side)
        .iter()
        .chain(session.deck(side).iter())
        .map(|card| card.uid.to_string())
        .collect()
}

#[test]
fn test_same_seed_same_bytes() {
    let first = scripted(1234);
    let second = scripted(1234);

    let a = bincode::serialize(&first.snapshot()).unwrap();
    let b = bincode::serialize(&second.snapshot()).unwrap();
    assert_eq!(a, b);
    assert_eq!(first.log().lines(), second.log().lines());
    for side in Side::ALL {
        assert_eq!(first.hand_snapshot(side), second.hand_snapshot(side));
    }
}

#[test]
fn test_seed_changes_shuffle() {
    let first = scripted(1);
    let second = scripted(2);
    assert_ne!(deck_order(&first, Side::A), deck_order(&second, Side::A));
}

#[test]
fn test_sides_shuffle_independently() {
    let mut session = MatchSession::new(MatchConfig::default().with_seed(77));
    let deck = starter_deck();
    for side in Side::ALL {
        session.handle(side, Command::SubmitDeck { cards: deck.clone() });
    }
    assert_ne!(
        session.deck(Side::A).iter().map(|c| c.uid.to_string()).collect::<Vec<_>>(),
        session.deck(Side::B).iter().map(|c| c.uid.to_string()).collect::<Vec<_>>()
    );
}

#[test]
fn test_unshuffled_deck_keeps_order() {
    let mut session = MatchSession::new(MatchConfig::default().without_shuffle());
    let deck = starter_deck();
    session.handle(Side::A, Command::SubmitDeck { cards: deck.clone() });
    let expected: Vec<_> = deck.iter().map(|c| c.uid.to_string()).collect();
    assert_eq!(deck_order(&session, Side::A), expected);
}
