//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type, as served
//! by the deck service. Definitions are shared behind `Arc` between the
//! catalog, decks, and hands; they are never mutated during a match.
//!
//! Instance-specific data (damage taken, buffs, frost) lives in
//! `CardInstance`.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::sync::Arc;

/// Stable card identifier, e.g. `"LIGHTNING_BOLT"`.
///
/// Abilities are keyed by uid, not by display name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardUid(String);

impl CardUid {
    /// Create a uid.
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    /// The raw uid string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CardUid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardUid {
    fn from(uid: &str) -> Self {
        Self::new(uid)
    }
}

impl std::fmt::Display for CardUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card category. Determines how a card is played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// Occupies a lane and fights.
    #[default]
    Creature,
    /// Occupies a lane; usually carries a passive.
    Building,
    /// Resolves immediately and is discarded.
    Spell,
}

impl CardType {
    /// Parse the deck service's free-form type string.
    ///
    /// Matching is case-insensitive. `"Spell"` and `"Building"` are
    /// recognized; everything else (`"Monster"`, `"Creature"`, missing) is a
    /// creature.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("spell") {
            CardType::Spell
        } else if raw.eq_ignore_ascii_case("building") {
            CardType::Building
        } else {
            CardType::Creature
        }
    }

    /// Creatures and buildings are placed into lanes.
    #[must_use]
    pub fn occupies_lane(self) -> bool {
        !matches!(self, CardType::Spell)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use lane_ccg::cards::{CardDefinition, CardType};
///
/// let wolf = CardDefinition::new("FOREST_WOLF", "Forest Wolf", CardType::Creature)
///     .with_cost(2)
///     .with_stats(3, 4);
///
/// assert_eq!(wolf.attack, 3);
/// assert_eq!(wolf.health, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Stable identifier; abilities are looked up by it.
    pub uid: CardUid,

    /// Display name.
    pub name: String,

    /// How the card is played.
    pub card_type: CardType,

    /// Mana cost.
    pub cost: i32,

    /// Base attack.
    pub attack: i32,

    /// Base health.
    pub health: i32,

    /// Display rarity.
    pub rarity: String,

    /// Display rules text.
    pub rules_text: String,
}

impl CardDefinition {
    /// Create a definition with zero cost and stats.
    #[must_use]
    pub fn new(uid: impl Into<CardUid>, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            card_type,
            cost: 0,
            attack: 0,
            health: 0,
            rarity: String::new(),
            rules_text: String::new(),
        }
    }

    /// Set cost (builder pattern). Negative values clamp to 0.
    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost.max(0);
        self
    }

    /// Set attack and health (builder pattern). Negative values clamp to 0.
    #[must_use]
    pub fn with_stats(mut self, attack: i32, health: i32) -> Self {
        self.attack = attack.max(0);
        self.health = health.max(0);
        self
    }

    /// Set rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    /// Set rules text (builder pattern).
    #[must_use]
    pub fn with_rules_text(mut self, text: impl Into<String>) -> Self {
        self.rules_text = text.into();
        self
    }

    /// Wrap for sharing.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Whether this card is a spell.
    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.card_type == CardType::Spell
    }

    /// Display name, falling back to the uid when the name is blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.uid.as_str()
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_type_parse() {
        assert_eq!(CardType::parse("Spell"), CardType::Spell);
        assert_eq!(CardType::parse("SPELL"), CardType::Spell);
        assert_eq!(CardType::parse(" building "), CardType::Building);
        assert_eq!(CardType::parse("Monster"), CardType::Creature);
        assert_eq!(CardType::parse(""), CardType::Creature);
    }

    #[test]
    fn test_occupies_lane() {
        assert!(CardType::Creature.occupies_lane());
        assert!(CardType::Building.occupies_lane());
        assert!(!CardType::Spell.occupies_lane());
    }

    #[test]
    fn test_builder_clamps_negatives() {
        let card = CardDefinition::new("X", "X", CardType::Creature)
            .with_cost(-2)
            .with_stats(-1, 5);
        assert_eq!(card.cost, 0);
        assert_eq!(card.attack, 0);
        assert_eq!(card.health, 5);
    }

    #[test]
    fn test_display_name_fallback() {
        let named = CardDefinition::new("ICE_GRIP", "Ice Grip", CardType::Spell);
        let blank = CardDefinition::new("ICE_GRIP", "  ", CardType::Spell);
        assert_eq!(named.display_name(), "Ice Grip");
        assert_eq!(blank.display_name(), "ICE_GRIP");
    }

    #[test]
    fn test_uid_serializes_as_string() {
        let uid = CardUid::new("RUNE_STONE");
        assert_eq!(serde_json::to_string(&uid).unwrap(), "\"RUNE_STONE\"");
    }
}
