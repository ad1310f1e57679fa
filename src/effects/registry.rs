//! Ability registry: card uid to abilities and spell behavior.
//!
//! New card effects are new table entries; the resolver never branches on
//! uids.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::effect::{Ability, PassiveEffect, Spell, SpellEffect, SpellTarget, TargetRow, TriggerTiming};
use crate::cards::{forest_wolf, CardUid};

/// Uid-keyed ability and spell tables.
///
/// ## Example
///
/// ```
/// use lane_ccg::effects::{Ability, AbilityRegistry};
///
/// let registry = AbilityRegistry::standard();
/// assert!(registry.is_spell_immune("SILVER_DRAGON"));
/// assert!(registry.spell("LIGHTNING_BOLT").is_some());
/// assert!(registry.abilities("SQUIRE").is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AbilityRegistry {
    abilities: FxHashMap<CardUid, Vec<Ability>>,
    spells: FxHashMap<CardUid, Spell>,
}

impl AbilityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an ability to a uid (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, uid: impl Into<CardUid>, ability: Ability) -> Self {
        self.register_ability(uid, ability);
        self
    }

    /// Define a spell (builder pattern).
    #[must_use]
    pub fn with_spell(mut self, uid: impl Into<CardUid>, spell: Spell) -> Self {
        self.register_spell(uid, spell);
        self
    }

    /// Attach an ability to a uid. A uid may carry several.
    pub fn register_ability(&mut self, uid: impl Into<CardUid>, ability: Ability) {
        self.abilities.entry(uid.into()).or_default().push(ability);
    }

    /// Define or replace a spell.
    pub fn register_spell(&mut self, uid: impl Into<CardUid>, spell: Spell) {
        self.spells.insert(uid.into(), spell);
    }

    /// Abilities of a uid, empty if none.
    #[must_use]
    pub fn abilities(&self, uid: &str) -> &[Ability] {
        self.abilities.get(uid).map(Vec::as_slice).unwrap_or_default()
    }

    /// Spell behavior of a uid.
    #[must_use]
    pub fn spell(&self, uid: &str) -> Option<&Spell> {
        self.spells.get(uid)
    }

    /// Whether cards with this uid ignore spells.
    #[must_use]
    pub fn is_spell_immune(&self, uid: &str) -> bool {
        self.abilities(uid)
            .iter()
            .any(|ability| matches!(ability, Ability::SpellImmune))
    }

    /// Triggered effects of a uid at `timing`.
    pub fn effects_at<'a>(
        &'a self,
        uid: &str,
        timing: TriggerTiming,
    ) -> impl Iterator<Item = &'a PassiveEffect> + 'a {
        self.abilities(uid)
            .iter()
            .filter_map(move |ability| ability.effect_at(timing))
    }

    /// The live game's card abilities.
    #[must_use]
    pub fn standard() -> Self {
        use PassiveEffect::*;
        use TriggerTiming::*;

        Self::new()
            .with_ability("SWAMP_WITCH", Ability::triggered(StartOfTurn, DrainMana(1)))
            .with_ability("CRYSTAL_TOWER", Ability::triggered(StartOfTurn, GainMana(1)))
            .with_ability(
                "WOLF_DEN",
                Ability::triggered(StartOfTurn, AddToHand(Arc::new(forest_wolf()))),
            )
            .with_ability("STORM_GRIFFIN", Ability::triggered(EndOfTurn, DamageEnemyRow(1)))
            .with_ability("SNEAKY_FOX", Ability::triggered(OnPlay, LaneCombat))
            .with_ability("SILVER_DRAGON", Ability::SpellImmune)
            .with_ability("RUNE_GUARDIAN", Ability::SpellDamageBonus(1))
            .with_ability("RUNE_STONE", Ability::SpellMultiplier(2))
            .with_spell(
                "HEALING_MIST",
                Spell::new(SpellTarget::Row(TargetRow::Own), SpellEffect::Heal(3)),
            )
            .with_spell(
                "ICE_GRIP",
                Spell::new(SpellTarget::Single(TargetRow::Enemy), SpellEffect::Freeze(1)),
            )
            .with_spell(
                "SWEET_TREAT",
                Spell::new(SpellTarget::Single(TargetRow::Own), SpellEffect::Empower(2)),
            )
            .with_spell(
                "LIGHTNING_BOLT",
                Spell::new(SpellTarget::Single(TargetRow::Enemy), SpellEffect::Damage(4)),
            )
            .with_spell(
                "MANA_SURGE",
                Spell::new(
                    SpellTarget::None,
                    SpellEffect::ManaSurge {
                        amount_per_turn: 3,
                        turns: 3,
                    },
                ),
            )
            .with_spell(
                "RAIN_OF_FIRE",
                Spell::new(SpellTarget::Row(TargetRow::Enemy), SpellEffect::Damage(3)),
            )
            .with_spell(
                "CLOAK_TRICK",
                Spell::new(SpellTarget::Single(TargetRow::Enemy), SpellEffect::Damage(999)),
            )
    }
}
