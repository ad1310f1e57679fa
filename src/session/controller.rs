//! The match controller.
//!
//! `MatchSession` owns one match: state machine, ledger, decks, hands, board,
//! and the action log. `handle` is the only entry point that mutates it. Each
//! command is validated completely before anything changes; a refused command
//! produces a single `Rejected` event for its sender and leaves the match
//! untouched.
//!
//! ## Turn structure
//!
//! ```text
//! A: start of turn -> plays -> EndTurn (end-of-turn passives)
//! B: start of turn -> plays -> EndTurn (end-of-turn passives)
//!    -> combat -> win check -> next round
//! ```

use std::sync::Arc;

use crate::cards::{CardDefinition, CardInstance};
use crate::core::{GameRng, MatchConfig, MatchState, Phase, ResourceLedger, Side, SideMap};
use crate::effects::{AbilityRegistry, EffectContext, EffectResolver, SpellOutcome};
use crate::error::{CommandError, Result};
use crate::rules::{CombatReport, CombatResolver, GameResult, WinEvaluator};
use crate::session::command::Command;
use crate::session::event::{Event, Outbound};
use crate::session::log::ActionLog;
use crate::session::replication::Replicator;
use crate::session::snapshot::{CardView, MatchSnapshot};
use crate::zones::{Board, Deck, Hand};

/// Authoritative state of one match.
///
/// ## Example
///
/// ```
/// use lane_ccg::cards::CardCatalog;
/// use lane_ccg::core::{MatchConfig, Phase, Side};
/// use lane_ccg::session::{Command, MatchSession};
///
/// let catalog = CardCatalog::starter();
/// let deck = catalog.deck_of(["SQUIRE"; 10]);
/// let mut session = MatchSession::new(MatchConfig::default());
///
/// for side in Side::ALL {
///     session.handle(side, Command::Connect);
///     session.handle(side, Command::SubmitDeck { cards: deck.clone() });
/// }
///
/// assert_eq!(session.phase(), Phase::Active);
/// assert_eq!(session.hand(Side::A).len(), 6);
/// assert_eq!(session.hand(Side::B).len(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct MatchSession {
    config: MatchConfig,
    registry: Arc<AbilityRegistry>,
    rng: GameRng,
    state: MatchState,
    ledger: ResourceLedger,
    board: Board,
    decks: SideMap<Deck>,
    hands: SideMap<Hand>,
    connected: SideMap<bool>,
    log: ActionLog,
    result: Option<GameResult>,
    announced: bool,
    replicator: Replicator,
    pending: Vec<String>,
}

impl MatchSession {
    /// New match with the standard card abilities.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self::with_registry(config, Arc::new(AbilityRegistry::standard()))
    }

    /// New match with a custom ability table.
    #[must_use]
    pub fn with_registry(config: MatchConfig, registry: Arc<AbilityRegistry>) -> Self {
        Self {
            rng: GameRng::new(config.seed),
            state: MatchState::new(config.starting_hp),
            ledger: ResourceLedger::new(config.mana_cap),
            board: Board::new(config.lane_count),
            decks: SideMap::default(),
            hands: SideMap::default(),
            connected: SideMap::default(),
            log: ActionLog::new(config.log_capacity),
            result: None,
            announced: false,
            replicator: Replicator::new(),
            pending: Vec::new(),
            registry,
            config,
        }
    }

    // === Accessors ===

    /// Match configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Ability table in use.
    #[must_use]
    pub fn registry(&self) -> &AbilityRegistry {
        &self.registry
    }

    /// Phase, turn, round, and HP.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Mana pools.
    #[must_use]
    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// Lane board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// A side's hand.
    #[must_use]
    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side]
    }

    /// A side's draw pile.
    #[must_use]
    pub fn deck(&self, side: Side) -> &Deck {
        &self.decks[side]
    }

    /// Action log.
    #[must_use]
    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Result once the match is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Winner once the match is over.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.state.winner
    }

    /// Whether a side is connected.
    #[must_use]
    pub fn is_connected(&self, side: Side) -> bool {
        self.connected[side]
    }

    /// Public view of the match as it is right now.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.state.phase,
            current_turn: self.state.current_turn,
            round: self.state.round,
            hp: self.state.hp,
            mana: *self.ledger.pools(),
            board: SideMap::new(|side| {
                self.board
                    .row(side)
                    .iter()
                    .map(|slot| slot.as_ref().map(CardView::from))
                    .collect()
            }),
            deck_sizes: self.decks.map(|_, deck| deck.len()),
            hand_sizes: self.hands.map(|_, hand| hand.len()),
            winner: self.state.winner,
        }
    }

    /// Hand contents as sent to the owner.
    #[must_use]
    pub fn hand_snapshot(&self, side: Side) -> Vec<CardDefinition> {
        self.hands[side].iter().map(|card| (**card).clone()).collect()
    }

    // === Command handling ===

    /// Process one command from `sender` and return the events it produced.
    pub fn handle(&mut self, sender: Side, command: Command) -> Vec<Outbound> {
        tracing::debug!(side = ?sender, command = command.kind(), "handling command");
        let hands_before = self.hands.clone();
        let is_connect = matches!(command, Command::Connect);

        let outcome = match command {
            Command::Connect => self.connect(sender),
            Command::Disconnect => self.disconnect(sender),
            Command::SubmitDeck { cards } => self.submit_deck(sender, cards),
            Command::PlayCard {
                lane,
                side,
                hand_index,
                target_side,
            } => self.play_card(sender, side, hand_index, lane, target_side),
            Command::EndTurn => self.end_turn(sender),
        };

        if let Err(error) = outcome {
            tracing::warn!(side = ?sender, %error, "command rejected");
            self.pending.clear();
            return vec![Outbound::to(
                sender,
                Event::Rejected {
                    side: sender,
                    error,
                },
            )];
        }

        self.flush(sender, is_connect, &hands_before)
    }

    /// Turn what the last command changed into events.
    fn flush(&mut self, sender: Side, full_sync: bool, hands_before: &SideMap<Hand>) -> Vec<Outbound> {
        let snapshot = self.snapshot();
        let mut out: Vec<Outbound> = self
            .replicator
            .observe(&snapshot)
            .into_iter()
            .map(|delta| Outbound::all(Event::State(delta)))
            .collect();

        if full_sync {
            out.extend(
                self.replicator
                    .full_sync()
                    .into_iter()
                    .map(|delta| Outbound::to(sender, Event::State(delta))),
            );
        }

        for side in Side::ALL {
            if hands_before[side] != self.hands[side] || (full_sync && side == sender) {
                out.push(Outbound::to(
                    side,
                    Event::Hand {
                        side,
                        cards: self.hand_snapshot(side),
                    },
                ));
            }
        }

        for line in std::mem::take(&mut self.pending) {
            self.log.push(line.clone());
            out.push(Outbound::all(Event::Log(line)));
        }

        if let (Some(result), false) = (self.result, self.announced) {
            self.announced = true;
            out.push(Outbound::all(Event::GameOver {
                winner: result.winner(),
                result,
            }));
        }
        out
    }

    fn note(&mut self, line: impl Into<String>) {
        self.pending.push(line.into());
    }

    // === Assembly ===

    fn connect(&mut self, side: Side) -> Result<()> {
        if self.connected[side] {
            return Ok(());
        }
        self.connected[side] = true;
        tracing::info!(side = ?side, "participant connected");

        if self.state.phase.is_assembly() {
            self.update_assembly_phase();
            self.try_start();
        } else {
            self.note(format!("{side} reconnected."));
        }
        Ok(())
    }

    fn disconnect(&mut self, side: Side) -> Result<()> {
        if !self.connected[side] {
            return Ok(());
        }
        self.connected[side] = false;
        tracing::info!(side = ?side, "participant disconnected");

        if self.state.phase.is_assembly() {
            self.update_assembly_phase();
        } else {
            self.note(format!("{side} disconnected."));
        }
        Ok(())
    }

    fn submit_deck(&mut self, side: Side, cards: Vec<Arc<CardDefinition>>) -> Result<()> {
        if !self.state.phase.is_assembly() {
            return Err(CommandError::AlreadyStarted);
        }
        if cards.is_empty() {
            return Err(CommandError::EmptyDeck);
        }

        let count = cards.len();
        self.decks[side] = if self.config.shuffle_decks {
            let mut rng = self.rng.for_context(match side {
                Side::A => "deck:A",
                Side::B => "deck:B",
            });
            Deck::shuffled(cards, &mut rng)
        } else {
            Deck::new(cards)
        };
        tracing::debug!(side = ?side, cards = count, "deck submitted");
        self.note(format!("{side} submitted a deck of {count} cards."));

        self.try_start();
        Ok(())
    }

    fn update_assembly_phase(&mut self) {
        self.state.phase = if self.connected[Side::A] && self.connected[Side::B] {
            Phase::AwaitingDecks
        } else {
            Phase::AwaitingPlayers
        };
    }

    fn try_start(&mut self) {
        let ready = self.state.phase == Phase::AwaitingDecks
            && Side::ALL.iter().all(|&side| !self.decks[side].is_empty());
        if !ready {
            return;
        }

        self.state.hp = SideMap::with_value(self.config.starting_hp);
        for side in Side::ALL {
            self.ledger.reset(side, 1);
            self.draw(side, self.config.opening_hand);
        }
        self.state.phase = Phase::Active;
        self.state.current_turn = Side::A;
        self.state.round = 1;

        tracing::info!(seed = self.config.seed, "match started");
        self.note("Match started. Round 1 begins. Side A's turn.");
        self.start_turn(Side::A);
    }

    // === Turn flow ===

    fn draw(&mut self, side: Side, count: usize) {
        for _ in 0..count {
            match self.decks[side].draw() {
                Some(card) => {
                    tracing::debug!(side = ?side, uid = %card.uid, "draw");
                    self.hands[side].push(card);
                }
                None => {
                    tracing::debug!(side = ?side, "deck empty, draw skipped");
                    break;
                }
            }
        }
    }

    fn start_turn(&mut self, side: Side) {
        if self.state.round > 1 {
            self.ledger.grow_max(side);
        }
        self.ledger.refill(side);
        self.draw(side, self.config.cards_per_turn);

        let resolver = EffectResolver::new(&self.registry);
        let mut ctx = EffectContext::new(&mut self.board, &mut self.ledger, &mut self.hands);
        resolver.start_of_turn(&mut ctx, side);
        let lines = ctx.into_lines();
        self.pending.extend(lines);

        let surged = self.ledger.apply_surge(side);
        if surged > 0 {
            self.note(format!("{side}'s Mana Surge grants {surged} extra Ziel this turn."));
        }

        let pool = self.ledger.pool(side);
        tracing::debug!(
            side = ?side,
            round = self.state.round,
            current = pool.current,
            max = pool.max,
            "turn started"
        );
        self.note(format!(
            "{side} turn begins. Ziel = {}/{}.",
            pool.current, pool.max
        ));
    }

    fn require_turn(&self, sender: Side) -> Result<()> {
        if self.state.phase != Phase::Active {
            return Err(CommandError::NotActive(self.state.phase));
        }
        if self.state.current_turn != sender {
            return Err(CommandError::NotYourTurn {
                side: sender,
                current: self.state.current_turn,
            });
        }
        Ok(())
    }

    fn end_turn(&mut self, sender: Side) -> Result<()> {
        self.require_turn(sender)?;
        self.note(format!("{sender} ends their turn."));

        let resolver = EffectResolver::new(&self.registry);
        let mut ctx = EffectContext::new(&mut self.board, &mut self.ledger, &mut self.hands);
        resolver.end_of_turn(&mut ctx, sender);
        let lines = ctx.into_lines();
        self.pending.extend(lines);

        match sender {
            Side::A => {
                self.state.current_turn = Side::B;
                self.start_turn(Side::B);
            }
            Side::B => {
                let report = CombatResolver::resolve_round(&mut self.board, &mut self.state.hp);
                self.log_combat(&report);
                if self.check_winner() {
                    return Ok(());
                }
                self.state.round += 1;
                self.state.current_turn = Side::A;
                self.note(format!("Round {} begins. Side A's turn.", self.state.round));
                self.start_turn(Side::A);
            }
        }
        Ok(())
    }

    fn log_combat(&mut self, report: &CombatReport) {
        for clash in &report.clashes {
            self.note(format!(
                "Lane {}: Side A ({} ATK) and Side B ({} ATK) trade damage.",
                clash.lane,
                clash.dealt[Side::A],
                clash.dealt[Side::B]
            ));
            for card in &clash.removed {
                self.note(format!(
                    "{}'s {} in lane {} is destroyed.",
                    card.owner, card.name, card.lane
                ));
            }
        }
        for hit in &report.direct_hits {
            self.note(format!(
                "{}'s card in lane {} deals {} damage to {}.",
                hit.attacker,
                hit.lane,
                hit.damage,
                hit.attacker.opponent()
            ));
        }
        tracing::debug!(
            clashes = report.clashes.len(),
            damage_to_a = report.damage_to(Side::A),
            damage_to_b = report.damage_to(Side::B),
            "combat resolved"
        );
    }

    fn check_winner(&mut self) -> bool {
        let Some(result) = WinEvaluator::evaluate(&self.state.hp) else {
            return false;
        };
        self.state.phase = Phase::GameOver;
        self.state.winner = Some(result.winner());
        self.result = Some(result);

        tracing::info!(winner = ?result.winner(), ?result, "match over");
        self.note(result.describe());
        true
    }

    // === Card play ===

    fn play_card(
        &mut self,
        sender: Side,
        claimed: Side,
        hand_index: usize,
        lane: usize,
        target_side: Side,
    ) -> Result<()> {
        self.require_turn(sender)?;
        if claimed != sender {
            return Err(CommandError::SideMismatch { claimed, sender });
        }

        let card = self.hands[sender]
            .get(hand_index)
            .cloned()
            .ok_or(CommandError::HandIndexOutOfRange {
                index: hand_index,
                hand_size: self.hands[sender].len(),
            })?;

        let places = card.card_type.occupies_lane();
        if places {
            if target_side != sender {
                return Err(CommandError::WrongRow);
            }
            self.board.check_free(sender, lane)?;
        }
        self.ledger.can_spend(sender, card.cost)?;

        // Validation complete.
        self.ledger.spend(sender, card.cost)?;
        self.hands[sender].remove(hand_index);
        tracing::debug!(
            side = ?sender,
            uid = %card.uid,
            lane,
            target = ?target_side,
            cost = card.cost,
            "card played"
        );

        if places {
            self.board
                .place(CardInstance::from_definition(&card, sender, lane))?;
            self.note(format!(
                "{sender} played {} into lane {lane}.",
                card.display_name()
            ));

            let resolver = EffectResolver::new(&self.registry);
            let mut ctx = EffectContext::new(&mut self.board, &mut self.ledger, &mut self.hands);
            let fired = resolver.on_play(&mut ctx, sender, lane);
            let lines = ctx.into_lines();
            self.pending.extend(lines);
            if fired {
                self.check_winner();
            }
        } else {
            let resolver = EffectResolver::new(&self.registry);
            let mut ctx = EffectContext::new(&mut self.board, &mut self.ledger, &mut self.hands);
            let outcome = resolver.cast(&mut ctx, sender, &card, lane, target_side);
            let lines = ctx.into_lines();
            self.pending.extend(lines);
            if let SpellOutcome::Fizzled(reason) = outcome {
                tracing::debug!(side = ?sender, uid = %card.uid, ?reason, "spell fizzled");
            }
            self.check_winner();
        }
        Ok(())
    }
}
