//! Round-level rules: lane combat and the win check.
//!
//! Both resolvers are stateless. They operate on the board and HP owned by
//! the match session and report what happened so the session can log and
//! replicate it.

pub mod combat;
pub mod victory;

pub use combat::{CombatReport, CombatResolver, DirectHit, LaneClash};
pub use victory::{GameResult, WinEvaluator};
