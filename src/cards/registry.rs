//! Card catalog for definition lookup.
//!
//! The catalog maps card uids to shared definitions. Live matches receive
//! their cards from the deck service; the starter catalog bundles a playable
//! set for tools, tests, and the headless runner.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::definition::{CardDefinition, CardType, CardUid};

/// Uid of the token generated by Wolf Den.
pub const FOREST_WOLF: &str = "FOREST_WOLF";

/// Registry of card definitions keyed by uid.
///
/// ## Example
///
/// ```
/// use lane_ccg::cards::{CardCatalog, CardDefinition, CardType};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::new("SQUIRE", "Squire", CardType::Creature).with_stats(1, 2));
///
/// assert_eq!(catalog.get("SQUIRE").unwrap().health, 2);
/// assert!(catalog.get("NOPE").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardUid, Arc<CardDefinition>>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one with the same uid.
    ///
    /// Returns the replaced definition.
    pub fn register(&mut self, card: CardDefinition) -> Option<Arc<CardDefinition>> {
        self.cards.insert(card.uid.clone(), Arc::new(card))
    }

    /// Look up a definition.
    #[must_use]
    pub fn get(&self, uid: &str) -> Option<Arc<CardDefinition>> {
        self.cards.get(uid).cloned()
    }

    /// Check if a uid is registered.
    #[must_use]
    pub fn contains(&self, uid: &str) -> bool {
        self.cards.contains_key(uid)
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in uid order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_by(|a, b| a.uid.cmp(&b.uid));
        cards.into_iter()
    }

    /// Build a deck from uids, skipping unknown entries.
    pub fn deck_of<'a>(&self, uids: impl IntoIterator<Item = &'a str>) -> Vec<Arc<CardDefinition>> {
        uids.into_iter().filter_map(|uid| self.get(uid)).collect()
    }

    /// The bundled card set, one definition per ability in the standard
    /// ability table plus a vanilla one-drop.
    #[must_use]
    pub fn starter() -> Self {
        let mut catalog = Self::new();
        let creature = |uid: &str, name: &str, cost, atk, hp| {
            CardDefinition::new(uid, name, CardType::Creature)
                .with_cost(cost)
                .with_stats(atk, hp)
                .with_rarity("Common")
        };
        let building = |uid: &str, name: &str, cost, hp| {
            CardDefinition::new(uid, name, CardType::Building)
                .with_cost(cost)
                .with_stats(0, hp)
                .with_rarity("Rare")
        };
        let spell = |uid: &str, name: &str, cost, text: &str| {
            CardDefinition::new(uid, name, CardType::Spell)
                .with_cost(cost)
                .with_rarity("Common")
                .with_rules_text(text)
        };

        for card in [
            creature("SQUIRE", "Squire", 1, 1, 2),
            forest_wolf(),
            creature("SNEAKY_FOX", "Sneaky Fox", 2, 2, 2)
                .with_rules_text("Attacks immediately when summoned."),
            creature("SWAMP_WITCH", "Swamp Witch", 3, 2, 3)
                .with_rules_text("Start of turn: drain 1 Ziel from the enemy."),
            creature("RUNE_GUARDIAN", "Rune Guardian", 3, 2, 4)
                .with_rules_text("Your damage spells deal +1."),
            creature("STORM_GRIFFIN", "Storm Griffin", 5, 4, 4)
                .with_rules_text("End of turn: 1 damage to all enemy cards."),
            creature("SILVER_DRAGON", "Silver Dragon", 7, 6, 7)
                .with_rarity("Legendary")
                .with_rules_text("Immune to spells."),
            building("CRYSTAL_TOWER", "Crystal Tower", 2, 5)
                .with_rules_text("Start of turn: +1 Ziel."),
            building("RUNE_STONE", "Rune Stone", 3, 3)
                .with_rules_text("Your spell effects are doubled."),
            building("WOLF_DEN", "Wolf Den", 4, 6)
                .with_rules_text("Start of turn: add a Forest Wolf to your hand."),
            spell("HEALING_MIST", "Healing Mist", 2, "Heal all friendly monsters for 3."),
            spell("ICE_GRIP", "Ice Grip", 1, "Freeze an enemy monster."),
            spell("SWEET_TREAT", "Sweet Treat", 1, "Give an allied creature +2/+2."),
            spell("LIGHTNING_BOLT", "Lightning Bolt", 2, "Deal 4 damage to an enemy."),
            spell("MANA_SURGE", "Mana Surge", 2, "+3 Ziel for your next 3 turns."),
            spell("RAIN_OF_FIRE", "Rain of Fire", 4, "Deal 3 damage to all enemy monsters."),
            spell("CLOAK_TRICK", "Cloak Trick", 5, "Remove an enemy monster from play."),
        ] {
            catalog.register(card);
        }
        catalog
    }
}

/// The Forest Wolf token added to hand by Wolf Den.
#[must_use]
pub fn forest_wolf() -> CardDefinition {
    CardDefinition::new(FOREST_WOLF, "Forest Wolf", CardType::Creature)
        .with_cost(2)
        .with_stats(3, 4)
        .with_rarity("Common")
        .with_rules_text("Target: Single Enemy")
}
