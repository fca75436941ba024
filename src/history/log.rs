use chrono::{DateTime, Utc};
use serde::Serialize;

use super::cursor::Cursor;
use crate::protocol::ProtocolMessage;

/// A committed message and the time it was committed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    timestamp: DateTime<Utc>,
    message: ProtocolMessage,
}

impl HistoryEntry {
    pub fn new(message: ProtocolMessage) -> Self {
        Self::with_timestamp(Utc::now(), message)
    }

    pub fn with_timestamp(timestamp: DateTime<Utc>, message: ProtocolMessage) -> Self {
        Self { timestamp, message }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn message(&self) -> &ProtocolMessage {
        &self.message
    }
}

/// Ordered, gap-free message history.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Entries applied at `cursor`.
    pub fn upto(&self, cursor: Cursor) -> &[HistoryEntry] {
        &self.entries[..cursor.applied_len().min(self.entries.len())]
    }

    /// Drop every entry after `cursor`, returning how many were dropped.
    pub fn truncate_after(&mut self, cursor: Cursor) -> usize {
        let keep = cursor.applied_len();
        let dropped = self.entries.len().saturating_sub(keep);
        self.entries.truncate(keep);
        dropped
    }

    /// Append an entry and return its index.
    pub fn push(&mut self, entry: HistoryEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
