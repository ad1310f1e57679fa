//! Per-match inbox and client outboxes.
//!
//! [`spawn_match`] moves a `MatchSession` onto its own task. Clients talk to
//! it through a [`ClientLink`]: commands go into one shared inbox and are
//! handled strictly in arrival order, events come back on the client's own
//! outbox. Each link stamps its side onto every command, so a client cannot
//! act for its opponent.
//!
//! The task ends when every link has been dropped and hands the final session
//! back through its join handle.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{Side, SideMap};
use crate::error::HostError;
use crate::session::command::Command;
use crate::session::controller::MatchSession;
use crate::session::event::{Event, Outbound};

type Envelope = (Side, Command);

/// A client's connection to a running match.
#[derive(Debug)]
pub struct ClientLink {
    side: Side,
    inbox: mpsc::UnboundedSender<Envelope>,
    outbox: mpsc::UnboundedReceiver<Event>,
}

impl ClientLink {
    /// Side this link acts for.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Queue a command.
    pub fn send(&self, command: Command) -> Result<(), HostError> {
        self.inbox
            .send((self.side, command))
            .map_err(|_| HostError::Closed)
    }

    /// Wait for the next event. `None` once the match task has ended.
    pub async fn recv(&mut self) -> Option<Event> {
        self.outbox.recv().await
    }

    /// Take an event if one is already queued.
    pub fn try_recv(&mut self) -> Option<Event> {
        self.outbox.try_recv().ok()
    }

    /// Take every event already queued.
    pub fn drain(&mut self) -> Vec<Event> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

/// Start a match task on the current tokio runtime.
///
/// Returns the task handle (resolving to the final session) and one link per
/// side.
pub fn spawn_match(session: MatchSession) -> (JoinHandle<MatchSession>, SideMap<ClientLink>) {
    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
    let (a_tx, a_rx) = mpsc::unbounded_channel();
    let (b_tx, b_rx) = mpsc::unbounded_channel();

    let outboxes = SideMap::new(|side| match side {
        Side::A => a_tx.clone(),
        Side::B => b_tx.clone(),
    });
    let mut receivers = [Some(a_rx), Some(b_rx)];
    let links = SideMap::new(|side| ClientLink {
        side,
        inbox: inbox_tx.clone(),
        outbox: receivers[side.index()]
            .take()
            .unwrap_or_else(|| mpsc::unbounded_channel().1),
    });
    drop(inbox_tx);

    let handle = tokio::spawn(run_match(session, inbox_rx, outboxes));
    (handle, links)
}

async fn run_match(
    mut session: MatchSession,
    mut inbox: mpsc::UnboundedReceiver<Envelope>,
    outboxes: SideMap<mpsc::UnboundedSender<Event>>,
) -> MatchSession {
    tracing::info!("match task started");
    while let Some((side, command)) = inbox.recv().await {
        for Outbound { to, event } in session.handle(side, command) {
            for (target, outbox) in outboxes.iter() {
                if to.includes(target) {
                    // A client that hung up just misses the event.
                    let _ = outbox.send(event.clone());
                }
            }
        }
    }
    tracing::info!(winner = ?session.winner(), "match task finished");
    session
}
