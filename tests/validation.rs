//! Command validation integration tests.
//!
//! A refused command must leave the match exactly as it was and reach only
//! its sender.

use std::sync::Arc;

use lane_ccg::cards::{CardDefinition, CardType};
use lane_ccg::core::{MatchConfig, Phase, Side};
use lane_ccg::error::{CommandError, LedgerError};
use lane_ccg::session::{Command, Event, MatchSession, Outbound, Recipient};

fn creature(uid: &str, cost: i32) -> Arc<CardDefinition> {
    CardDefinition::new(uid, uid, CardType::Creature)
        .with_cost(cost)
        .with_stats(1, 1)
        .shared()
}

fn start(cards: Vec<Arc<CardDefinition>>) -> MatchSession {
    let mut session = MatchSession::new(MatchConfig::default().without_shuffle());
    for side in Side::ALL {
        session.handle(side, Command::Connect);
        session.handle(side, Command::SubmitDeck { cards: cards.clone() });
    }
    session
}

fn single_rejection(out: &[Outbound], sender: Side) -> CommandError {
    match out {
        [Outbound {
            to,
            event: Event::Rejected { side, error },
        }] => {
            assert_eq!(*to, Recipient::Side(sender));
            assert_eq!(*side, sender);
            error.clone()
        }
        other => panic!("expected a single rejection, got {other:?}"),
    }
}

/// 2-cost creature with 1 mana available is refused; nothing changes.
#[test]
fn test_insufficient_mana_rejected() {
    let mut session = start(vec![creature("OGRE", 2); 10]);
    assert_eq!(session.ledger().current(Side::A), 1);

    let before = session.snapshot();
    let hand_before = session.hand_snapshot(Side::A);
    let log_before = session.log().len();

    let out = session.handle(Side::A, Command::play(Side::A, 0, 0));
    assert_eq!(
        single_rejection(&out, Side::A),
        CommandError::Mana(LedgerError::Insufficient {
            required: 2,
            available: 1
        })
    );
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.hand_snapshot(Side::A), hand_before);
    assert_eq!(session.log().len(), log_before);
    assert_eq!(session.ledger().current(Side::A), 1);
}

#[test]
fn test_creature_on_enemy_row_rejected() {
    let mut session = start(vec![creature("IMP", 0); 10]);
    let before = session.snapshot();

    let out = session.handle(Side::A, Command::play_at(Side::A, 0, 0, Side::B));
    assert_eq!(single_rejection(&out, Side::A), CommandError::WrongRow);
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_wrong_row_checked_before_mana() {
    let mut session = start(vec![creature("GIANT", 9); 10]);
    let out = session.handle(Side::A, Command::play_at(Side::A, 0, 0, Side::B));
    assert_eq!(single_rejection(&out, Side::A), CommandError::WrongRow);
}

#[test]
fn test_commands_before_start_rejected() {
    let mut session = MatchSession::new(MatchConfig::default());

    let out = session.handle(Side::A, Command::EndTurn);
    assert_eq!(
        single_rejection(&out, Side::A),
        CommandError::NotActive(Phase::AwaitingPlayers)
    );

    let out = session.handle(Side::B, Command::play(Side::B, 0, 0));
    assert_eq!(
        single_rejection(&out, Side::B),
        CommandError::NotActive(Phase::AwaitingPlayers)
    );
}

#[test]
fn test_out_of_turn_play_rejected() {
    let mut session = start(vec![creature("IMP", 0); 10]);
    let out = session.handle(Side::B, Command::play(Side::B, 0, 0));
    assert_eq!(
        single_rejection(&out, Side::B),
        CommandError::NotYourTurn {
            side: Side::B,
            current: Side::A
        }
    );
    assert!(session.board().get(Side::B, 0).is_none());
}

#[test]
fn test_rejection_message_is_readable() {
    let mut session = start(vec![creature("IMP", 0); 10]);
    session.handle(Side::A, Command::play(Side::A, 0, 3));

    let out = session.handle(Side::A, Command::play(Side::A, 0, 3));
    let error = single_rejection(&out, Side::A);
    assert_eq!(error.to_string(), "Lane 3 is already occupied");
}
