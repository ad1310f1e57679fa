//! Inbound commands.
//!
//! Commands are plain data. The sending side is not part of the command; the
//! inbox stamps it from the client link the command arrived on.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cards::CardDefinition;
use crate::core::Side;

/// A request from a client to the match authority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// The transport established the sender's session.
    Connect,

    /// The transport lost the sender's session.
    Disconnect,

    /// Provide (or replace, before the match starts) the sender's deck.
    SubmitDeck {
        /// Cards in submission order. Shuffled on receipt.
        cards: Vec<Arc<CardDefinition>>,
    },

    /// Play a card from hand.
    PlayCard {
        /// Lane to place into, or to aim a spell at.
        lane: usize,
        /// Side playing the card. Must match the sender.
        side: Side,
        /// Index into the sender's hand.
        hand_index: usize,
        /// Row the client clicked on.
        target_side: Side,
    },

    /// Pass the turn.
    EndTurn,
}

impl Command {
    /// Play `hand_index` into the sender's own row.
    #[must_use]
    pub fn play(side: Side, hand_index: usize, lane: usize) -> Self {
        Command::PlayCard {
            lane,
            side,
            hand_index,
            target_side: side,
        }
    }

    /// Play `hand_index` aimed at `target_side`'s row.
    #[must_use]
    pub fn play_at(side: Side, hand_index: usize, lane: usize, target_side: Side) -> Self {
        Command::PlayCard {
            lane,
            side,
            hand_index,
            target_side,
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Connect => "connect",
            Command::Disconnect => "disconnect",
            Command::SubmitDeck { .. } => "submit_deck",
            Command::PlayCard { .. } => "play_card",
            Command::EndTurn => "end_turn",
        }
    }
}
