//! Outbound events.
//!
//! Every event is plain data addressed either to both clients or to one side.
//! State changes are sent as deltas computed after the authoritative mutation
//! has been applied.

use serde::{Deserialize, Serialize};

use crate::cards::CardDefinition;
use crate::core::{ManaPool, Phase, Side};
use crate::error::CommandError;
use crate::rules::GameResult;
use crate::session::snapshot::CardView;

/// A change to the public match view.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateDelta {
    /// Phase changed.
    Phase(Phase),
    /// Turn or round changed.
    Turn {
        /// Side now acting.
        current: Side,
        /// Round number.
        round: u32,
    },
    /// A player's HP changed.
    Hp {
        /// Player.
        side: Side,
        /// New HP.
        value: i32,
    },
    /// A mana pool changed.
    Mana {
        /// Player.
        side: Side,
        /// New pool.
        pool: ManaPool,
    },
    /// Deck or hand size changed.
    Counts {
        /// Player.
        side: Side,
        /// Cards in deck.
        deck: usize,
        /// Cards in hand.
        hand: usize,
    },
    /// A lane's occupant or its stats changed.
    Lane {
        /// Row.
        side: Side,
        /// Lane index.
        lane: usize,
        /// New occupant, `None` when emptied.
        card: Option<CardView>,
    },
    /// The match was decided.
    Winner(Side),
}

/// A message from the match authority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Public state change.
    State(StateDelta),
    /// Full hand contents, sent only to the owner.
    Hand {
        /// Hand owner.
        side: Side,
        /// Cards in hand order.
        cards: Vec<CardDefinition>,
    },
    /// A command was refused, sent only to the sender.
    Rejected {
        /// Sender.
        side: Side,
        /// Reason.
        error: CommandError,
    },
    /// Action log line.
    Log(String),
    /// Match decided.
    GameOver {
        /// Winning side.
        winner: Side,
        /// How it was decided.
        result: GameResult,
    },
}

/// Who receives an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recipient {
    /// Both clients.
    All,
    /// One client.
    Side(Side),
}

impl Recipient {
    /// Whether `side` receives events sent to this recipient.
    #[must_use]
    pub fn includes(self, side: Side) -> bool {
        match self {
            Recipient::All => true,
            Recipient::Side(target) => target == side,
        }
    }
}

/// An addressed event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outbound {
    /// Recipient.
    pub to: Recipient,
    /// Payload.
    pub event: Event,
}

impl Outbound {
    /// Address to both clients.
    #[must_use]
    pub fn all(event: Event) -> Self {
        Self {
            to: Recipient::All,
            event,
        }
    }

    /// Address to one side.
    #[must_use]
    pub fn to(side: Side, event: Event) -> Self {
        Self {
            to: Recipient::Side(side),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_includes() {
        assert!(Recipient::All.includes(Side::A));
        assert!(Recipient::All.includes(Side::B));
        assert!(Recipient::Side(Side::B).includes(Side::B));
        assert!(!Recipient::Side(Side::B).includes(Side::A));
    }

    #[test]
    fn test_event_json_shape() {
        let event = Outbound::to(
            Side::A,
            Event::Rejected {
                side: Side::A,
                error: CommandError::WrongRow,
            },
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["to"]["Side"], "A");
        assert_eq!(json["event"]["Rejected"]["error"], "WrongRow");
    }
}
