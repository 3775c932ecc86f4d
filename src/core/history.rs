//! Action history tracking.
//!
//! History is an immutable, most-recent-first list of [`Entry`] values capped
//! at [`HISTORY_CAP`]. `record` returns a new history rather than mutating.

use super::model::{Action, Entry};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept.
pub const HISTORY_CAP: usize = 10;

/// Ordered history of count-changing actions, newest first.
///
/// Serializes as a plain JSON array so the persisted record is just the list
/// of entries.
///
/// # Example
///
/// ```rust
/// use tally::core::{Action, Entry, History};
///
/// let history = History::new();
/// let history = history.record(Entry {
///     action: Action::Increment,
///     value: 1,
///     timestamp: "now".to_string(),
/// });
/// let history = history.record(Entry {
///     action: Action::Reset,
///     value: 0,
///     timestamp: "later".to_string(),
/// });
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.latest().map(|e| e.action), Some(Action::Reset));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<Entry>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a history from entries already ordered newest first, dropping
    /// anything past the cap.
    pub fn from_entries(mut entries: Vec<Entry>) -> Self {
        entries.truncate(HISTORY_CAP);
        Self { entries }
    }

    /// Record an entry, returning a new history.
    ///
    /// The entry goes to the front; the oldest entry falls off once the cap
    /// is exceeded. The original history is left untouched.
    pub fn record(&self, entry: Entry) -> Self {
        let mut entries = Vec::with_capacity(HISTORY_CAP);
        entries.push(entry);
        entries.extend(self.entries.iter().take(HISTORY_CAP - 1).cloned());
        Self { entries }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&Entry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded entries for one action.
    pub fn count_of(&self, action: Action) -> usize {
        self.entries.iter().filter(|e| e.action == action).count()
    }
}
