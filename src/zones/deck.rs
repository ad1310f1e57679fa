//! Deck and hand storage.
//!
//! Both are ordered sequences of shared definitions backed by `im::Vector`,
//! so cloning a match for a snapshot or a what-if check is cheap. Decks are
//! drawn from the front. Hands are mutated only by the match controller.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cards::CardDefinition;
use crate::core::GameRng;

/// A side's draw pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Arc<CardDefinition>>,
}

impl Deck {
    /// Create a deck in the given order.
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = Arc<CardDefinition>>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Create a deck and shuffle it once.
    #[must_use]
    pub fn shuffled(cards: Vec<Arc<CardDefinition>>, rng: &mut GameRng) -> Self {
        let mut cards = cards;
        rng.shuffle(&mut cards);
        Self::new(cards)
    }

    /// Remove and return the front card.
    pub fn draw(&mut self) -> Option<Arc<CardDefinition>> {
        self.cards.pop_front()
    }

    /// Cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The next card without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Arc<CardDefinition>> {
        self.cards.front()
    }

    /// Iterate in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.iter()
    }
}

/// A side's hand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vector<Arc<CardDefinition>>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card to the end.
    pub fn push(&mut self, card: Arc<CardDefinition>) {
        self.cards.push_back(card);
    }

    /// Card at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<CardDefinition>> {
        self.cards.get(index)
    }

    /// Remove the card at `index`, shifting later cards down.
    pub fn remove(&mut self, index: usize) -> Option<Arc<CardDefinition>> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate in hand order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.iter()
    }
}
