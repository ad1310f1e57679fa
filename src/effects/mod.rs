//! Card abilities and spells.
//!
//! - `Ability` / `Spell`: plain-data behavior attached to card uids
//! - `AbilityRegistry`: the uid table, including the live card set
//! - `SpellModifiers`: flat bonus and multiplier from the caster's row
//! - `EffectResolver`: applies triggered abilities and spells to a match
//!
//! Adding a card effect means adding a registry entry. The session and the
//! resolver never branch on card uids.

mod effect;
mod modifiers;
mod registry;
mod resolver;

pub use effect::{Ability, PassiveEffect, Spell, SpellEffect, SpellTarget, TargetRow, TriggerTiming};
pub use modifiers::SpellModifiers;
pub use registry::AbilityRegistry;
pub use resolver::{EffectContext, EffectResolver, Fizzle, SpellOutcome};
