//! Spell modifier pipeline.
//!
//! Static board abilities of the caster's row adjust every spell amount:
//! `amount = base (+ flat_bonus for damage)`, then `amount *= multiplier`,
//! then floor at 0.

use serde::{Deserialize, Serialize};

use super::effect::Ability;
use super::registry::AbilityRegistry;
use crate::core::Side;
use crate::zones::Board;

/// Aggregated spell modifiers for one caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpellModifiers {
    /// Added to damage amounts before multiplying.
    pub flat_bonus: i32,
    /// Applied to every amount.
    pub multiplier: i32,
}

impl Default for SpellModifiers {
    fn default() -> Self {
        Self {
            flat_bonus: 0,
            multiplier: 1,
        }
    }
}

impl SpellModifiers {
    /// Collect modifiers from every card on `caster`'s row.
    #[must_use]
    pub fn for_caster(board: &Board, registry: &AbilityRegistry, caster: Side) -> Self {
        let mut modifiers = Self::default();
        for card in board.occupied(caster) {
            for ability in registry.abilities(card.uid.as_str()) {
                match *ability {
                    Ability::SpellDamageBonus(bonus) => {
                        modifiers.flat_bonus = modifiers.flat_bonus.saturating_add(bonus);
                    }
                    Ability::SpellMultiplier(factor) => {
                        modifiers.multiplier = modifiers.multiplier.saturating_mul(factor);
                    }
                    _ => {}
                }
            }
        }
        modifiers
    }

    /// Run `base` through the pipeline.
    #[must_use]
    pub fn apply(&self, base: i32, is_damage: bool) -> i32 {
        let mut amount = base;
        if is_damage {
            amount = amount.saturating_add(self.flat_bonus);
        }
        amount.saturating_mul(self.multiplier).max(0)
    }
}
