//! Card instances - runtime state of a card in a lane.
//!
//! A `CardInstance` is created when a creature or building is played and is
//! owned by the board slot holding it. Its `owner` and `lane` always match
//! that slot.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardUid};
use crate::core::Side;

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Definition uid; abilities are looked up by it.
    pub uid: CardUid,

    /// Display name copied from the definition.
    pub name: String,

    /// Row the card sits on.
    pub owner: Side,

    /// Lane index within the row.
    pub lane: usize,

    /// Current attack.
    pub attack: i32,

    /// Current health. The card leaves play at 0 or below.
    pub health: i32,

    /// Healing ceiling.
    pub max_health: i32,

    /// Rounds left during which the card deals no damage.
    pub frozen_rounds: i32,
}

impl CardInstance {
    /// Instantiate a definition at base stats.
    #[must_use]
    pub fn from_definition(def: &CardDefinition, owner: Side, lane: usize) -> Self {
        Self {
            uid: def.uid.clone(),
            name: def.display_name().to_string(),
            owner,
            lane,
            attack: def.attack,
            health: def.health,
            max_health: def.health,
            frozen_rounds: 0,
        }
    }

    /// Whether frost currently suppresses this card's attack.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen_rounds > 0
    }

    /// Attack this card contributes right now (0 while frozen).
    #[must_use]
    pub fn effective_attack(&self) -> i32 {
        if self.is_frozen() {
            0
        } else {
            self.attack.max(0)
        }
    }

    /// Whether health has reached 0.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Subtract damage. Negative amounts are ignored.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount.max(0));
    }

    /// Restore health up to `max_health`. Returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let ceiling = if self.max_health > 0 {
            self.max_health
        } else {
            self.health
        };
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(ceiling).max(before);
        self.health - before
    }

    /// Raise attack, health, and max health together.
    pub fn empower(&mut self, amount: i32) {
        let amount = amount.max(0);
        self.attack = self.attack.saturating_add(amount);
        self.health = self.health.saturating_add(amount);
        self.max_health = self.max_health.saturating_add(amount);
    }

    /// Freeze for `rounds`, never shortening an existing freeze.
    pub fn freeze(&mut self, rounds: i32) {
        if rounds > self.frozen_rounds {
            self.frozen_rounds = rounds;
        }
    }

    /// Count frost down by one round, stopping at 0.
    pub fn tick_frost(&mut self) {
        if self.frozen_rounds > 0 {
            self.frozen_rounds -= 1;
        }
    }
}
