//! Win evaluation.
//!
//! Checked after the combat pass, after every spell, and after an on-play
//! ambush. A simultaneous knockout is awarded to Side A.

use serde::{Deserialize, Serialize};

use crate::core::{Side, SideMap};

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// One side dropped to 0 HP.
    Knockout {
        /// Surviving side.
        winner: Side,
    },
    /// Both sides dropped to 0 HP in the same step. Side A takes the tie.
    DoubleKnockout {
        /// Tie-break winner.
        winner: Side,
    },
}

impl GameResult {
    /// The winning side.
    #[must_use]
    pub fn winner(&self) -> Side {
        match *self {
            GameResult::Knockout { winner } | GameResult::DoubleKnockout { winner } => winner,
        }
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        self.winner() == side
    }

    /// Human-readable summary for the action log.
    #[must_use]
    pub fn describe(&self) -> String {
        match *self {
            GameResult::Knockout { winner } => {
                format!("{} reached 0 HP. {winner} wins.", winner.opponent())
            }
            GameResult::DoubleKnockout { winner } => {
                format!("Both players reached 0 HP. Tie-breaker: {winner} wins.")
            }
        }
    }
}

/// Stateless win evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct WinEvaluator;

impl WinEvaluator {
    /// Side favoured when both players fall together.
    pub const TIE_BREAK: Side = Side::A;

    /// Decide the match from current HP, or `None` if both are still alive.
    #[must_use]
    pub fn evaluate(hp: &SideMap<i32>) -> Option<GameResult> {
        match (hp[Side::A] <= 0, hp[Side::B] <= 0) {
            (true, true) => Some(GameResult::DoubleKnockout {
                winner: Self::TIE_BREAK,
            }),
            (true, false) => Some(GameResult::Knockout { winner: Side::B }),
            (false, true) => Some(GameResult::Knockout { winner: Side::A }),
            (false, false) => None,
        }
    }
}
