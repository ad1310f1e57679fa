//! Ability and spell definitions.
//!
//! Abilities are attached to cards on the board and fire at fixed points in a
//! turn (or act statically while the card is in play). Spells resolve once
//! when played. Both are plain data; the resolver gives them meaning.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cards::CardDefinition;
use crate::core::Side;

/// When a triggered ability fires.
///
/// Start-of-turn abilities fire once per copy on the board. End-of-turn
/// abilities fire once if at least one copy is present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerTiming {
    /// Owner's turn begins.
    StartOfTurn,
    /// Owner ends their turn.
    EndOfTurn,
    /// The card itself is played.
    OnPlay,
}

/// What a triggered ability does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassiveEffect {
    /// Move mana from the opponent's current pool to the owner's.
    DrainMana(i32),
    /// Add mana to the owner's current pool.
    GainMana(i32),
    /// Put a copy of a card into the owner's hand.
    AddToHand(Arc<CardDefinition>),
    /// Damage every card on the opposing row.
    DamageEnemyRow(i32),
    /// Fight the opposing card in the same lane immediately.
    LaneCombat,
}

/// A card ability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    /// Fires at `timing`.
    Triggered {
        /// Trigger point.
        timing: TriggerTiming,
        /// Effect applied.
        effect: PassiveEffect,
    },
    /// Spells never affect this card.
    SpellImmune,
    /// Owner's damage spells deal this much more, per copy.
    SpellDamageBonus(i32),
    /// Owner's spell amounts are multiplied by this, per copy.
    SpellMultiplier(i32),
}

impl Ability {
    /// Create a triggered ability.
    #[must_use]
    pub fn triggered(timing: TriggerTiming, effect: PassiveEffect) -> Self {
        Ability::Triggered { timing, effect }
    }

    /// The effect if this ability fires at `timing`.
    #[must_use]
    pub fn effect_at(&self, timing: TriggerTiming) -> Option<&PassiveEffect> {
        match self {
            Ability::Triggered { timing: t, effect } if *t == timing => Some(effect),
            _ => None,
        }
    }
}

/// Row a spell target is read from, relative to the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRow {
    /// Caster's own row.
    Own,
    /// Opponent's row.
    Enemy,
}

impl TargetRow {
    /// The board side this row belongs to for `caster`.
    #[must_use]
    pub fn side_for(self, caster: Side) -> Side {
        match self {
            TargetRow::Own => caster,
            TargetRow::Enemy => caster.opponent(),
        }
    }
}

/// What a spell hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellTarget {
    /// No card target.
    None,
    /// The card in the chosen lane, which must be on this row.
    Single(TargetRow),
    /// Every card on this row.
    Row(TargetRow),
}

/// What a spell does to each target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellEffect {
    /// Reduce health.
    Damage(i32),
    /// Restore health up to max.
    Heal(i32),
    /// Suppress attack for this many rounds.
    Freeze(i32),
    /// Raise attack, health and max health.
    Empower(i32),
    /// Bonus income at the start of the caster's next turns.
    ManaSurge {
        /// Mana per turn.
        amount_per_turn: i32,
        /// Number of turns. Not scaled by modifiers.
        turns: i32,
    },
}

impl SpellEffect {
    /// Whether flat damage bonuses apply.
    #[must_use]
    pub fn is_damage(&self) -> bool {
        matches!(self, SpellEffect::Damage(_))
    }

    /// The amount fed through the modifier pipeline.
    #[must_use]
    pub fn base_amount(&self) -> i32 {
        match *self {
            SpellEffect::Damage(n)
            | SpellEffect::Heal(n)
            | SpellEffect::Freeze(n)
            | SpellEffect::Empower(n) => n,
            SpellEffect::ManaSurge {
                amount_per_turn, ..
            } => amount_per_turn,
        }
    }
}

/// A spell's full behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spell {
    /// Target selection.
    pub target: SpellTarget,
    /// Effect per target.
    pub effect: SpellEffect,
}

impl Spell {
    /// Create a spell.
    #[must_use]
    pub fn new(target: SpellTarget, effect: SpellEffect) -> Self {
        Self { target, effect }
    }
}
