//! Match progression state: phase, turn, round, HP.
//!
//! Owned and mutated only by the match controller.

use serde::{Deserialize, Serialize};

use super::side::{Side, SideMap};

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Fewer than two participants connected.
    AwaitingPlayers,
    /// Both connected; at least one deck missing.
    AwaitingDecks,
    /// Turns are being played.
    Active,
    /// A winner has been declared. Terminal.
    GameOver,
}

impl Phase {
    /// Whether decks may still be (re)submitted.
    #[must_use]
    pub fn is_assembly(self) -> bool {
        matches!(self, Phase::AwaitingPlayers | Phase::AwaitingDecks)
    }
}

/// Turn, round, and player HP.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchState {
    /// Lifecycle phase.
    pub phase: Phase,

    /// Side allowed to act. Meaningful only while `Active`.
    pub current_turn: Side,

    /// Round number, starting at 1. A round is A's turn then B's turn.
    pub round: u32,

    /// Player HP. Can dip below zero until the next win check.
    pub hp: SideMap<i32>,

    /// Set once the match is decided.
    pub winner: Option<Side>,
}

impl MatchState {
    /// Fresh state waiting for players.
    #[must_use]
    pub fn new(starting_hp: i32) -> Self {
        Self {
            phase: Phase::AwaitingPlayers,
            current_turn: Side::A,
            round: 1,
            hp: SideMap::with_value(starting_hp),
            winner: None,
        }
    }

    /// Whether `side` may issue turn commands right now.
    #[must_use]
    pub fn is_turn_of(&self, side: Side) -> bool {
        self.phase == Phase::Active && self.current_turn == side
    }
}
