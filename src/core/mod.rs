//! Core match types: sides, configuration, RNG, mana ledger, match state.

pub mod config;
pub mod ledger;
pub mod rng;
pub mod side;
pub mod state;

pub use config::MatchConfig;
pub use ledger::{ManaPool, ManaSurge, ResourceLedger};
pub use rng::GameRng;
pub use side::{Side, SideMap};
pub use state::{MatchState, Phase};
