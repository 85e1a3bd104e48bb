//! Status payload broadcast to subscribers after every mutation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A display view of one recorded entry
///
/// Entries cross the library boundary only in this form: the label and
/// timestamp are copied and the snapshot is detached through the timeline's
/// codec, so holding a `LogEntry` can never alias the stored history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry<S> {
    /// Human-readable description of the action that produced this entry
    pub label: String,
    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
    /// The state captured with the entry
    pub snapshot: S,
}

/// Snapshot of a timeline's navigable state
///
/// Delivered synchronously to every subscriber after each mutating
/// operation, and available on demand from [`Timeline::status`].
///
/// [`Timeline::status`]: crate::Timeline::status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineStatus<S> {
    /// Whether a step backward is currently possible
    pub can_undo: bool,
    /// Whether a step forward is currently possible
    pub can_redo: bool,
    /// All entries in reverse-chronological order (most recent first)
    pub history: Vec<LogEntry<S>>,
    /// Index of the active entry, in chronological order
    ///
    /// This indexes the timeline's own sequence, not `history`; the active
    /// row of the reversed list is `history.len() - 1 - cursor`.
    pub cursor: usize,
    /// Detached copy of the active entry's state
    pub active_state: S,
}

impl<S> TimelineStatus<S> {
    /// Position of the active entry within `history` (the reversed list)
    pub fn active_history_row(&self) -> usize {
        self.history.len().saturating_sub(1).saturating_sub(self.cursor)
    }
}
