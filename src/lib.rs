//! # lane-ccg
//!
//! Authoritative simulation core for a two-player, lane-based, turn-based
//! card battler.
//!
//! ## Design Principles
//!
//! 1. **Single Authority**: One `MatchSession` owns every piece of match
//!    state. Clients only send commands and apply the events they get back.
//!
//! 2. **Validate, Then Mutate**: A command is checked completely before
//!    anything changes. Refusals reach only the sender.
//!
//! 3. **Data-Driven Cards**: Card behavior lives in an `AbilityRegistry`
//!    keyed by card uid. Adding a card never touches the turn flow.
//!
//! ## Modules
//!
//! - `core`: Sides, configuration, RNG, mana ledger, match state
//! - `cards`: Card definitions, instances, catalog, deck loading
//! - `zones`: Decks, hands, and the lane board
//! - `rules`: Lane combat and the win check
//! - `effects`: Passive abilities, spells, and the modifier pipeline
//! - `session`: Match controller, events, replication, per-match host

pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod rules;
pub mod session;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{GameRng, MatchConfig, MatchState, Phase, ResourceLedger, Side, SideMap};

pub use crate::cards::{CardCatalog, CardDefinition, CardInstance, CardType, CardUid};

pub use crate::zones::{Board, Deck, Hand};

pub use crate::rules::{CombatResolver, GameResult, WinEvaluator};

pub use crate::effects::{AbilityRegistry, EffectResolver, SpellModifiers};

pub use crate::session::{
    spawn_match, ClientLink, Command, Event, MatchSession, MatchSnapshot, Mirror, Outbound,
    Recipient, StateDelta,
};

pub use crate::error::{CommandError, DeckError, HostError, LedgerError};
