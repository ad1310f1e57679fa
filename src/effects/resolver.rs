//! Effect resolution - applying abilities and spells to a match.
//!
//! The `EffectResolver` looks abilities up in an [`AbilityRegistry`] and
//! applies them through an [`EffectContext`], which borrows exactly the parts
//! of the match an effect may touch. Human-readable lines for the action log
//! are collected on the context; the session decides where they go.
//!
//! Nothing here can fail. A spell without a legal target fizzles, an unknown
//! spell is a logged no-op.

use rustc_hash::FxHashMap;

use super::effect::{PassiveEffect, SpellEffect, SpellTarget, TargetRow, TriggerTiming};
use super::modifiers::SpellModifiers;
use super::registry::AbilityRegistry;
use crate::cards::{CardDefinition, CardInstance, CardUid};
use crate::core::{ManaSurge, ResourceLedger, Side, SideMap};
use crate::rules::CombatResolver;
use crate::zones::{Board, Hand};

/// Mutable view of the match for effect resolution.
pub struct EffectContext<'a> {
    /// Lane board.
    pub board: &'a mut Board,
    /// Mana pools and surges.
    pub ledger: &'a mut ResourceLedger,
    /// Both hands.
    pub hands: &'a mut SideMap<Hand>,
    lines: Vec<String>,
}

impl<'a> EffectContext<'a> {
    /// Borrow the match state effects operate on.
    pub fn new(
        board: &'a mut Board,
        ledger: &'a mut ResourceLedger,
        hands: &'a mut SideMap<Hand>,
    ) -> Self {
        Self {
            board,
            ledger,
            hands,
            lines: Vec::new(),
        }
    }

    /// Record an action log line.
    pub fn log(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Lines recorded so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the context, returning its log lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn log_removed(&mut self, removed: &[CardInstance]) {
        for card in removed {
            self.log(format!(
                "{}'s {} in lane {} is destroyed.",
                card.owner, card.name, card.lane
            ));
        }
    }
}

/// Why a targeted spell did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fizzle {
    /// The chosen lane is empty or does not exist.
    NoTarget,
    /// The chosen card is on the wrong row for this spell.
    WrongRow,
    /// The chosen card ignores spells.
    Immune,
}

/// Result of casting a spell. Mana is spent in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpellOutcome {
    /// The spell took effect on this many cards (0 for untargeted spells).
    Resolved {
        /// Cards affected.
        targets: usize,
    },
    /// A targeted spell found no legal target.
    Fizzled(Fizzle),
    /// The uid has no spell behavior.
    Unknown,
}

/// The card a triggered ability belongs to.
struct Source<'s> {
    name: &'s str,
    lane: usize,
}

/// Applies registered abilities and spells.
pub struct EffectResolver<'r> {
    registry: &'r AbilityRegistry,
}

impl<'r> EffectResolver<'r> {
    /// Create a resolver over a registry.
    #[must_use]
    pub fn new(registry: &'r AbilityRegistry) -> Self {
        Self { registry }
    }

    /// Fire start-of-turn abilities on `side`'s row, once per copy.
    pub fn start_of_turn(&self, ctx: &mut EffectContext<'_>, side: Side) {
        for (source, effect, copies) in self.collect(ctx.board, side, TriggerTiming::StartOfTurn) {
            let source = Source {
                name: &source.0,
                lane: source.1,
            };
            self.apply_passive(ctx, side, &source, &effect, copies);
        }
    }

    /// Fire end-of-turn abilities on `side`'s row, once per ability present.
    pub fn end_of_turn(&self, ctx: &mut EffectContext<'_>, side: Side) {
        for (source, effect, _copies) in self.collect(ctx.board, side, TriggerTiming::EndOfTurn) {
            let source = Source {
                name: &source.0,
                lane: source.1,
            };
            self.apply_passive(ctx, side, &source, &effect, 1);
        }
    }

    /// Fire on-play abilities of the card just placed at `lane`.
    ///
    /// Returns whether anything fired, so the caller can run a win check.
    pub fn on_play(&self, ctx: &mut EffectContext<'_>, side: Side, lane: usize) -> bool {
        let Some(card) = ctx.board.get(side, lane) else {
            return false;
        };
        let name = card.name.clone();
        let effects: Vec<_> = self
            .registry
            .effects_at(card.uid.as_str(), TriggerTiming::OnPlay)
            .cloned()
            .collect();

        let source = Source { name: &name, lane };
        for effect in &effects {
            self.apply_passive(ctx, side, &source, effect, 1);
        }
        !effects.is_empty()
    }

    /// Group triggered effects on a row by uid, in lane order of first copy.
    fn collect(
        &self,
        board: &Board,
        side: Side,
        timing: TriggerTiming,
    ) -> Vec<((String, usize), PassiveEffect, i32)> {
        let mut order: Vec<CardUid> = Vec::new();
        let mut groups: FxHashMap<CardUid, ((String, usize), i32)> = FxHashMap::default();

        for card in board.occupied(side) {
            if self.registry.effects_at(card.uid.as_str(), timing).next().is_none() {
                continue;
            }
            groups
                .entry(card.uid.clone())
                .and_modify(|(_, copies)| *copies += 1)
                .or_insert_with(|| {
                    order.push(card.uid.clone());
                    ((card.name.clone(), card.lane), 1)
                });
        }

        let mut triggered = Vec::new();
        for uid in order {
            let Some((source, copies)) = groups.remove(&uid) else {
                continue;
            };
            for effect in self.registry.effects_at(uid.as_str(), timing) {
                triggered.push((source.clone(), effect.clone(), copies));
            }
        }
        triggered
    }

    fn apply_passive(
        &self,
        ctx: &mut EffectContext<'_>,
        owner: Side,
        source: &Source<'_>,
        effect: &PassiveEffect,
        copies: i32,
    ) {
        let name = source.name;
        match effect {
            PassiveEffect::DrainMana(amount) => {
                let (drained, gained) = ctx.ledger.drain(owner, amount.saturating_mul(copies));
                tracing::debug!(side = ?owner, drained, gained, "mana drain");
                if drained > 0 {
                    ctx.log(format!(
                        "{owner}'s {name} drains {drained} Ziel from the enemy (gains {gained})."
                    ));
                }
            }
            PassiveEffect::GainMana(amount) => {
                let gained = ctx.ledger.gain(owner, amount.saturating_mul(copies));
                tracing::debug!(side = ?owner, gained, "mana income");
                if gained > 0 {
                    ctx.log(format!("{owner}'s {name} generates {gained} extra Ziel."));
                }
            }
            PassiveEffect::AddToHand(card) => {
                for _ in 0..copies {
                    ctx.hands[owner].push(card.clone());
                }
                tracing::debug!(side = ?owner, uid = %card.uid, copies, "card added to hand");
                ctx.log(format!(
                    "{owner}'s {name} adds {copies} {} card(s) to hand.",
                    card.display_name()
                ));
            }
            PassiveEffect::DamageEnemyRow(amount) => {
                let amount = amount.saturating_mul(copies);
                let enemy = owner.opponent();
                let removed: Vec<_> = ctx
                    .board
                    .occupied_lanes(enemy)
                    .into_iter()
                    .filter_map(|lane| ctx.board.damage(enemy, lane, amount))
                    .collect();
                tracing::debug!(side = ?owner, amount, removed = removed.len(), "row damage");
                ctx.log(format!(
                    "{owner}'s {name} deals {amount} damage to all enemy cards."
                ));
                ctx.log_removed(&removed);
            }
            PassiveEffect::LaneCombat => {
                let lane = source.lane;
                ctx.log(format!(
                    "{owner}'s {name} attacks immediately in lane {lane}."
                ));
                if let Some(clash) = CombatResolver::resolve_lane(ctx.board, lane) {
                    ctx.log(format!(
                        "Lane {lane}: {} ({} ATK) and {} ({} ATK) trade damage.",
                        Side::A,
                        clash.dealt[Side::A],
                        Side::B,
                        clash.dealt[Side::B]
                    ));
                    ctx.log_removed(&clash.removed);
                }
            }
        }
    }

    /// Resolve a spell cast by `caster`, aimed at `lane` on `target_side`'s row.
    ///
    /// The caller has already paid the cost and removed the card from hand.
    pub fn cast(
        &self,
        ctx: &mut EffectContext<'_>,
        caster: Side,
        card: &CardDefinition,
        lane: usize,
        target_side: Side,
    ) -> SpellOutcome {
        let name = card.display_name();
        let Some(spell) = self.registry.spell(card.uid.as_str()).copied() else {
            tracing::warn!(side = ?caster, uid = %card.uid, "no behavior registered for spell");
            ctx.log(format!(
                "{caster} casts {name}, but its effect is not yet implemented."
            ));
            return SpellOutcome::Unknown;
        };

        let modifiers = SpellModifiers::for_caster(ctx.board, self.registry, caster);
        let amount = modifiers.apply(spell.effect.base_amount(), spell.effect.is_damage());
        tracing::debug!(
            side = ?caster,
            uid = %card.uid,
            lane,
            target = ?target_side,
            amount,
            "casting spell"
        );

        match spell.target {
            SpellTarget::None => {
                if let SpellEffect::ManaSurge { turns, .. } = spell.effect {
                    ctx.ledger.set_surge(
                        caster,
                        ManaSurge {
                            turns_remaining: turns,
                            amount_per_turn: amount,
                        },
                    );
                }
                let phrase = describe(spell.effect, amount, "");
                ctx.log(format!("{caster} casts {name}, {phrase}."));
                SpellOutcome::Resolved { targets: 0 }
            }
            SpellTarget::Row(row) => {
                let side = row.side_for(caster);
                let lanes: Vec<_> = ctx
                    .board
                    .occupied(side)
                    .filter(|target| !self.registry.is_spell_immune(target.uid.as_str()))
                    .map(|target| target.lane)
                    .collect();

                let mut removed = Vec::new();
                for &lane in &lanes {
                    removed.extend(apply_to_card(ctx.board, side, lane, spell.effect, amount));
                }

                let target = match row {
                    TargetRow::Own => "all friendly cards",
                    TargetRow::Enemy => "all enemy cards",
                };
                let phrase = describe(spell.effect, amount, target);
                ctx.log(format!("{caster} casts {name}, {phrase}."));
                ctx.log_removed(&removed);
                SpellOutcome::Resolved {
                    targets: lanes.len(),
                }
            }
            SpellTarget::Single(row) => {
                let Some(target) = ctx.board.get(target_side, lane) else {
                    ctx.log(format!(
                        "{caster} casts {name}, but no target was selected."
                    ));
                    return SpellOutcome::Fizzled(Fizzle::NoTarget);
                };

                if target_side != row.side_for(caster) {
                    let line = match row {
                        TargetRow::Own => format!("{caster} casts {name} on an enemy; spell fizzles."),
                        TargetRow::Enemy => {
                            format!("{caster} casts {name} on their own row; spell fizzles.")
                        }
                    };
                    ctx.log(line);
                    return SpellOutcome::Fizzled(Fizzle::WrongRow);
                }

                if self.registry.is_spell_immune(target.uid.as_str()) {
                    ctx.log(format!(
                        "{caster} casts {name}, but the target is immune to spells."
                    ));
                    return SpellOutcome::Fizzled(Fizzle::Immune);
                }

                let target = match row {
                    TargetRow::Own => format!("the allied card in lane {lane}"),
                    TargetRow::Enemy => format!("the enemy card in lane {lane}"),
                };
                let removed: Vec<_> =
                    apply_to_card(ctx.board, target_side, lane, spell.effect, amount)
                        .into_iter()
                        .collect();
                let phrase = describe(spell.effect, amount, &target);
                ctx.log(format!("{caster} casts {name}, {phrase}."));
                ctx.log_removed(&removed);
                SpellOutcome::Resolved { targets: 1 }
            }
        }
    }
}

/// Apply a spell effect to one card. Returns the card if it was destroyed.
fn apply_to_card(
    board: &mut Board,
    side: Side,
    lane: usize,
    effect: SpellEffect,
    amount: i32,
) -> Option<CardInstance> {
    match effect {
        SpellEffect::Damage(_) => board.damage(side, lane, amount),
        SpellEffect::Heal(_) => {
            if let Some(card) = board.get_mut(side, lane) {
                card.heal(amount);
            }
            None
        }
        SpellEffect::Freeze(_) => {
            if let Some(card) = board.get_mut(side, lane) {
                card.freeze(amount);
            }
            None
        }
        SpellEffect::Empower(_) => {
            if let Some(card) = board.get_mut(side, lane) {
                card.empower(amount);
            }
            None
        }
        SpellEffect::ManaSurge { .. } => None,
    }
}

fn describe(effect: SpellEffect, amount: i32, target: &str) -> String {
    match effect {
        SpellEffect::Damage(_) => format!("dealing {amount} damage to {target}"),
        SpellEffect::Heal(_) => format!("restoring {amount} health to {target}"),
        SpellEffect::Freeze(_) => format!("freezing {target} for {amount} round(s)"),
        SpellEffect::Empower(_) => format!("giving +{amount}/+{amount} to {target}"),
        SpellEffect::ManaSurge { turns, .. } => {
            format!("gaining +{amount} Ziel for the next {turns} turns")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, CardType, FOREST_WOLF};

    struct Fixture {
        board: Board,
        ledger: ResourceLedger,
        hands: SideMap<Hand>,
        catalog: CardCatalog,
        registry: AbilityRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let mut ledger = ResourceLedger::new(10);
            ledger.reset(Side::A, 5);
            ledger.reset(Side::B, 5);
            Self {
                board: Board::new(5),
                ledger,
                hands: SideMap::default(),
                catalog: CardCatalog::starter(),
                registry: AbilityRegistry::standard(),
            }
        }

        fn place(&mut self, uid: &str, side: Side, lane: usize) {
            let def = self.catalog.get(uid).unwrap();
            self.board
                .place(CardInstance::from_definition(&def, side, lane))
                .unwrap();
        }

        fn cast(&mut self, caster: Side, uid: &str, lane: usize, target: Side) -> (SpellOutcome, Vec<String>) {
            let def = self.catalog.get(uid).unwrap();
            let resolver = EffectResolver::new(&self.registry);
            let mut ctx = EffectContext::new(&mut self.board, &mut self.ledger, &mut self.hands);
            let outcome = resolver.cast(&mut ctx, caster, &def, lane, target);
            (outcome, ctx.into_lines())
        }
    }

    #[test]
    fn test_lightning_bolt_damages_enemy() {
        let mut fx = Fixture::new();
        fx.place("SILVER_DRAGON", Side::B, 1);
        fx.place("WOLF_DEN", Side::B, 2);

        let (outcome, lines) = fx.cast(Side::A, "LIGHTNING_BOLT", 2, Side::B);

        assert_eq!(outcome, SpellOutcome::Resolved { targets: 1 });
        assert_eq!(fx.board.get(Side::B, 2).unwrap().health, 2);
        assert_eq!(
            lines,
            vec!["Side A casts Lightning Bolt, dealing 4 damage to the enemy card in lane 2."]
        );
    }

    #[test]
    fn test_damage_spell_on_own_row_fizzles() {
        let mut fx = Fixture::new();
        fx.place("FOREST_WOLF", Side::A, 0);

        let (outcome, lines) = fx.cast(Side::A, "LIGHTNING_BOLT", 0, Side::A);

        assert_eq!(outcome, SpellOutcome::Fizzled(Fizzle::WrongRow));
        assert_eq!(fx.board.get(Side::A, 0).unwrap().health, 4);
        assert!(lines[0].ends_with("on their own row; spell fizzles."));
    }

    #[test]
    fn test_empty_and_out_of_range_lane_fizzle() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.cast(Side::A, "ICE_GRIP", 3, Side::B).0,
            SpellOutcome::Fizzled(Fizzle::NoTarget)
        );
        assert_eq!(
            fx.cast(Side::A, "CLOAK_TRICK", 17, Side::B).0,
            SpellOutcome::Fizzled(Fizzle::NoTarget)
        );
    }

    #[test]
    fn test_immune_target_untouched() {
        let mut fx = Fixture::new();
        fx.place("SILVER_DRAGON", Side::B, 0);
        fx.place("SQUIRE", Side::B, 1);

        let (outcome, _) = fx.cast(Side::A, "CLOAK_TRICK", 0, Side::B);
        assert_eq!(outcome, SpellOutcome::Fizzled(Fizzle::Immune));
        assert!(fx.board.is_occupied(Side::B, 0));

        let (outcome, lines) = fx.cast(Side::A, "RAIN_OF_FIRE", 0, Side::B);
        assert_eq!(outcome, SpellOutcome::Resolved { targets: 1 });
        assert_eq!(fx.board.get(Side::B, 0).unwrap().health, 7);
        assert!(!fx.board.is_occupied(Side::B, 1));
        assert_eq!(lines[1], "Side B's Squire in lane 1 is destroyed.");
    }

    #[test]
    fn test_modifiers_scale_spells() {
        let mut fx = Fixture::new();
        fx.place("RUNE_GUARDIAN", Side::A, 0);
        fx.place("RUNE_STONE", Side::A, 1);
        fx.place("SILVER_DRAGON", Side::A, 2);
        fx.place("STORM_GRIFFIN", Side::B, 0);

        // (4 + 1) * 2 = 10
        fx.cast(Side::A, "LIGHTNING_BOLT", 0, Side::B);
        assert!(!fx.board.is_occupied(Side::B, 0));

        // Freeze rounds are multiplied, not bonused.
        fx.place("STORM_GRIFFIN", Side::B, 0);
        fx.cast(Side::A, "ICE_GRIP", 0, Side::B);
        assert_eq!(fx.board.get(Side::B, 0).unwrap().frozen_rounds, 2);
    }

    #[test]
    fn test_sweet_treat_and_healing_mist() {
        let mut fx = Fixture::new();
        fx.place("FOREST_WOLF", Side::A, 0);

        let (outcome, _) = fx.cast(Side::A, "SWEET_TREAT", 0, Side::B);
        assert_eq!(outcome, SpellOutcome::Fizzled(Fizzle::NoTarget));

        fx.cast(Side::A, "SWEET_TREAT", 0, Side::A);
        let wolf = fx.board.get(Side::A, 0).unwrap();
        assert_eq!((wolf.attack, wolf.health, wolf.max_health), (5, 6, 6));

        fx.board.get_mut(Side::A, 0).unwrap().take_damage(5);
        fx.cast(Side::A, "HEALING_MIST", 0, Side::A);
        assert_eq!(fx.board.get(Side::A, 0).unwrap().health, 4);
    }

    #[test]
    fn test_mana_surge_installs_surge() {
        let mut fx = Fixture::new();
        fx.place("RUNE_STONE", Side::B, 0);

        let (outcome, lines) = fx.cast(Side::B, "MANA_SURGE", 0, Side::A);
        assert_eq!(outcome, SpellOutcome::Resolved { targets: 0 });
        assert_eq!(
            fx.ledger.surge(Side::B),
            ManaSurge {
                turns_remaining: 3,
                amount_per_turn: 6
            }
        );
        assert_eq!(lines, vec!["Side B casts Mana Surge, gaining +6 Ziel for the next 3 turns."]);
    }

    #[test]
    fn test_unknown_spell_is_noop() {
        let mut fx = Fixture::new();
        let def = CardDefinition::new("FIREBALL", "Fireball", CardType::Spell);
        let before = fx.board.clone();
        let resolver = EffectResolver::new(&fx.registry);
        let mut ctx = EffectContext::new(&mut fx.board, &mut fx.ledger, &mut fx.hands);

        assert_eq!(resolver.cast(&mut ctx, Side::A, &def, 0, Side::B), SpellOutcome::Unknown);
        assert_eq!(ctx.lines().len(), 1);
        drop(ctx);
        assert_eq!(fx.board, before);
    }

    #[test]
    fn test_start_of_turn_per_copy() {
        let mut fx = Fixture::new();
        fx.place("WOLF_DEN", Side::A, 0);
        fx.place("WOLF_DEN", Side::A, 3);
        fx.place("SWAMP_WITCH", Side::A, 1);
        fx.place("SWAMP_WITCH", Side::B, 1);
        fx.ledger.spend(Side::A, 2).unwrap();

        let resolver = EffectResolver::new(&fx.registry);
        let mut ctx = EffectContext::new(&mut fx.board, &mut fx.ledger, &mut fx.hands);
        resolver.start_of_turn(&mut ctx, Side::A);
        let lines = ctx.into_lines();

        assert_eq!(fx.hands[Side::A].len(), 2);
        assert!(fx.hands[Side::A].iter().all(|c| c.uid.as_str() == FOREST_WOLF));
        assert!(fx.hands[Side::B].is_empty());
        assert_eq!(fx.ledger.current(Side::B), 4);
        assert_eq!(fx.ledger.current(Side::A), 4);
        assert_eq!(lines[0], "Side A's Wolf Den adds 2 Forest Wolf card(s) to hand.");
    }

    #[test]
    fn test_end_of_turn_presence_only() {
        let mut fx = Fixture::new();
        fx.place("STORM_GRIFFIN", Side::A, 0);
        fx.place("STORM_GRIFFIN", Side::A, 1);
        fx.place("SQUIRE", Side::B, 0);
        fx.place("SILVER_DRAGON", Side::B, 4);

        let resolver = EffectResolver::new(&fx.registry);
        let mut ctx = EffectContext::new(&mut fx.board, &mut fx.ledger, &mut fx.hands);
        resolver.end_of_turn(&mut ctx, Side::A);
        resolver.end_of_turn(&mut ctx, Side::B);

        assert_eq!(fx.board.get(Side::B, 0).unwrap().health, 1);
        assert_eq!(fx.board.get(Side::B, 4).unwrap().health, 6);
        assert_eq!(fx.board.get(Side::A, 0).unwrap().health, 4);
    }

    #[test]
    fn test_on_play_lane_combat() {
        let mut fx = Fixture::new();
        fx.place("SQUIRE", Side::B, 2);
        fx.place("SNEAKY_FOX", Side::A, 2);
        fx.place("FOREST_WOLF", Side::A, 3);

        let resolver = EffectResolver::new(&fx.registry);
        let mut ctx = EffectContext::new(&mut fx.board, &mut fx.ledger, &mut fx.hands);
        assert!(resolver.on_play(&mut ctx, Side::A, 2));
        assert!(!resolver.on_play(&mut ctx, Side::A, 3));

        assert!(!fx.board.is_occupied(Side::B, 2));
        assert_eq!(fx.board.get(Side::A, 2).unwrap().health, 1);
    }
}
