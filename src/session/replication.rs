//! Replication: authority-side diffing and client-side mirrors.
//!
//! The authority keeps the last snapshot it broadcast. After each command it
//! diffs the new snapshot against it and sends only the changes. A client
//! `Mirror` applies events to its own read-only copy and never edits it any
//! other way.

use crate::cards::CardDefinition;
use crate::core::Side;
use crate::error::CommandError;
use crate::session::event::{Event, StateDelta};
use crate::session::log::ActionLog;
use crate::session::snapshot::MatchSnapshot;

/// Authority-side delta producer.
#[derive(Clone, Debug, Default)]
pub struct Replicator {
    last: MatchSnapshot,
}

impl Replicator {
    /// Start from an empty view, so the first observation sends everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `next` as broadcast and return what changed since the last call.
    pub fn observe(&mut self, next: &MatchSnapshot) -> Vec<StateDelta> {
        let deltas = self.last.diff(next);
        if !deltas.is_empty() {
            self.last = next.clone();
        }
        deltas
    }

    /// The snapshot observers currently hold.
    #[must_use]
    pub fn last(&self) -> &MatchSnapshot {
        &self.last
    }

    /// Deltas bringing an empty view up to the last broadcast state.
    #[must_use]
    pub fn full_sync(&self) -> Vec<StateDelta> {
        MatchSnapshot::default().diff(&self.last)
    }
}

/// A client's read-only copy of the match.
#[derive(Clone, Debug)]
pub struct Mirror {
    side: Side,
    view: MatchSnapshot,
    hand: Vec<CardDefinition>,
    log: ActionLog,
    last_error: Option<CommandError>,
}

impl Mirror {
    /// Empty mirror for `side`.
    #[must_use]
    pub fn new(side: Side, log_capacity: usize) -> Self {
        Self {
            side,
            view: MatchSnapshot::default(),
            hand: Vec::new(),
            log: ActionLog::new(log_capacity),
            last_error: None,
        }
    }

    /// Apply one event from the authority.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::State(delta) => self.view.apply(delta),
            Event::Hand { side, cards } if *side == self.side => {
                self.hand = cards.clone();
            }
            Event::Hand { .. } => {}
            Event::Rejected { side, error } if *side == self.side => {
                self.last_error = Some(error.clone());
            }
            Event::Rejected { .. } => {}
            Event::Log(line) => self.log.push(line.clone()),
            Event::GameOver { winner, .. } => self.view.winner = Some(*winner),
        }
    }

    /// Side this mirror belongs to.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Public view.
    #[must_use]
    pub fn view(&self) -> &MatchSnapshot {
        &self.view
    }

    /// Own hand.
    #[must_use]
    pub fn hand(&self) -> &[CardDefinition] {
        &self.hand
    }

    /// Action log as received.
    #[must_use]
    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Most recent rejection.
    #[must_use]
    pub fn last_error(&self) -> Option<&CommandError> {
        self.last_error.as_ref()
    }

    /// Whether this side may act.
    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.view.phase == crate::core::Phase::Active && self.view.current_turn == self.side
    }
}
