//! Bounded action log.
//!
//! Human-readable history shown next to the board. This is gameplay output,
//! separate from `tracing` diagnostics.

use im::Vector;
use serde::{Deserialize, Serialize};

/// The most recent `capacity` log lines, oldest first.
///
/// ```
/// use lane_ccg::session::ActionLog;
///
/// let mut log = ActionLog::new(2);
/// log.push("one");
/// log.push("two");
/// log.push("three");
/// assert_eq!(log.lines(), vec!["two", "three"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    lines: Vector<String>,
    capacity: usize,
}

impl ActionLog {
    /// Empty log keeping at most `capacity` lines.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Vector::new(),
            capacity,
        }
    }

    /// Append a line, dropping the oldest when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        self.lines.push_back(line.into());
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    /// Lines currently kept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Most recent line.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// Iterate oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Copy of the kept lines.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        self.iter().collect()
    }
}
