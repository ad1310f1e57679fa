//! Match sessions: the authoritative controller and its messaging.
//!
//! ## Key Types
//!
//! - `Command`: client intents, validated by the session
//! - `MatchSession`: the state machine; `handle` is its only mutator
//! - `Event` / `Outbound`: what the session tells clients, and to whom
//! - `Replicator` / `Mirror`: delta broadcast and client-side copies
//! - `ClientLink`: a client's handle to a match running on its own task

pub mod command;
pub mod controller;
pub mod event;
pub mod host;
pub mod log;
pub mod replication;
pub mod snapshot;

pub use command::Command;
pub use controller::MatchSession;
pub use event::{Event, Outbound, Recipient, StateDelta};
pub use host::{spawn_match, ClientLink};
pub use log::ActionLog;
pub use replication::{Mirror, Replicator};
pub use snapshot::{CardView, MatchSnapshot};
