//! Error types for the match simulation.
//!
//! `CommandError` is plain data: it travels back to the offending client
//! inside `Event::Rejected`, so it is serializable and comparable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Phase, Side};

/// Result type alias using [`CommandError`].
pub type Result<T> = std::result::Result<T, CommandError>;

/// A command was refused. The match state is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CommandError {
    /// The sender does not hold the turn.
    #[error("It's not your turn ({current} is acting)")]
    NotYourTurn {
        /// Side that sent the command.
        side: Side,
        /// Side currently holding the turn.
        current: Side,
    },

    /// Turn commands are only valid while the match is active.
    #[error("Match is not active (phase: {0:?})")]
    NotActive(Phase),

    /// The command names a different side than the one that sent it.
    #[error("Command claims {claimed} but was sent by {sender}")]
    SideMismatch {
        /// Side written in the command.
        claimed: Side,
        /// Side that sent the command.
        sender: Side,
    },

    /// Deck submissions are closed once the match has started.
    #[error("Match has already started")]
    AlreadyStarted,

    /// A submitted deck contained no cards.
    #[error("Deck is empty")]
    EmptyDeck,

    /// The selected hand slot does not exist.
    #[error("Invalid hand index {index} (hand holds {hand_size} cards)")]
    HandIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current hand size.
        hand_size: usize,
    },

    /// Creatures and buildings may only be placed on the owner's row.
    #[error("You can only play creatures/buildings on your own row")]
    WrongRow,

    /// The lane does not exist on this board.
    #[error("Lane {lane} does not exist (board has {lane_count} lanes)")]
    LaneOutOfRange {
        /// Requested lane.
        lane: usize,
        /// Lanes per row.
        lane_count: usize,
    },

    /// The lane already holds a card.
    #[error("Lane {0} is already occupied")]
    LaneOccupied(usize),

    /// Not enough mana for the card's cost.
    #[error(transparent)]
    Mana(#[from] LedgerError),
}

/// Ledger operation failed; nothing was spent.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LedgerError {
    /// `spend` asked for more than the current pool.
    #[error("Not enough mana: need {required}, have {available}")]
    Insufficient {
        /// Amount requested.
        required: i32,
        /// Current mana.
        available: i32,
    },

    /// Amounts are never negative.
    #[error("Negative mana amount {0}")]
    NegativeAmount(i32),
}

/// Upstream deck data could not be turned into a playable deck.
///
/// Fatal to match assembly only: the match stays in `AwaitingDecks`.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The external fetch failed (network, auth, HTTP status).
    #[error("Deck fetch failed: {0}")]
    Fetch(String),

    /// The payload was not valid deck JSON.
    #[error("Malformed deck payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service answered with a non-ok status.
    #[error("Deck service returned status '{0}'")]
    Status(String),

    /// The payload parsed but held no cards.
    #[error("Deck payload contained no cards")]
    Empty,
}

/// The match task is gone; commands can no longer be delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum HostError {
    /// The inbox was closed.
    #[error("match host has shut down")]
    Closed,
}

/// Match configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// RON syntax or schema error.
    #[error("Failed to parse match config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The values parse but describe an impossible match.
    #[error("Invalid match config: {0}")]
    Invalid(String),
}
