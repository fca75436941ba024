//! The time-travel session: history, playhead and derived state together.

use std::collections::BTreeMap;

use thiserror::Error;
use tokio::sync::watch;

use super::cursor::Cursor;
use super::log::{HistoryEntry, HistoryLog};
use super::notifier::ChangeNotifier;
use super::replay::{replay, ReplayError};
use crate::processor::{ProcessorError, StateProcessor};
use crate::protocol::ProtocolMessage;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Message {index} was rejected by the processor: {source}")]
    Apply {
        index: usize,
        #[source]
        source: ProcessorError,
    },
    #[error(transparent)]
    Replay(#[from] ReplayError),
}

/// Owns the history log, the cursor and the processor.
///
/// The processor always holds the state produced by `history[0..=cursor]`,
/// either because messages were applied incrementally as they were
/// committed at the tail, or because a jump replayed them from scratch.
///
/// History is linear. Committing while rewound discards every entry after
/// the cursor before appending.
#[derive(Debug)]
pub struct DebugSession<P> {
    log: HistoryLog,
    cursor: Cursor,
    processor: P,
    notifier: ChangeNotifier,
}

impl<P: StateProcessor> DebugSession<P> {
    pub fn new(mut processor: P) -> Self {
        processor.reset();
        Self {
            log: HistoryLog::new(),
            cursor: Cursor::START,
            processor,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Record a message at the playhead and apply it.
    ///
    /// Returns the index of the new entry. If the processor rejects the
    /// message the entry stays in the history, the cursor stays on it and
    /// the error is returned.
    pub fn commit(&mut self, message: ProtocolMessage) -> Result<usize, SessionError> {
        let discarded = self.log.truncate_after(self.cursor);
        if discarded > 0 {
            tracing::debug!(
                discarded,
                cursor = %self.cursor,
                "Commit after rewind discarded later history"
            );
        }

        let index = self.log.push(HistoryEntry::new(message));
        self.cursor = Cursor::at(index);

        let result = self
            .processor
            .apply_messages(std::slice::from_ref(self.log.entries()[index].message()));
        self.notifier.notify();

        result.map(|()| index).map_err(|source| {
            tracing::warn!(index, error = %source, "Processor rejected committed message");
            SessionError::Apply { index, source }
        })
    }

    /// Move the playhead to `position` (`-1` is before the first message).
    ///
    /// Out-of-range positions are ignored and return `Ok(false)`. If replay
    /// fails the cursor lands on the last entry that applied and the error
    /// is returned.
    pub fn jump_to(&mut self, position: isize) -> Result<bool, SessionError> {
        let Some(target) = Cursor::from_position(position, self.log.len()) else {
            tracing::trace!(position, len = self.log.len(), "Ignoring out-of-range jump");
            return Ok(false);
        };

        let result = replay(self.log.entries(), target, &mut self.processor);
        self.cursor = match &result {
            Ok(()) => target,
            Err(err) => Cursor::preceding(err.index),
        };
        self.notifier.notify();

        result?;
        Ok(true)
    }

    pub fn step_back(&mut self) -> Result<bool, SessionError> {
        self.jump_to(self.cursor.position() - 1)
    }

    pub fn step_forward(&mut self) -> Result<bool, SessionError> {
        self.jump_to(self.cursor.position() + 1)
    }

    pub fn jump_to_start(&mut self) -> Result<bool, SessionError> {
        self.jump_to(Cursor::START.position())
    }

    pub fn jump_to_latest(&mut self) -> Result<bool, SessionError> {
        self.jump_to(Cursor::last(self.log.len()).position())
    }

    /// Drop all history and derived state.
    pub fn reset(&mut self) {
        self.log.clear();
        self.cursor = Cursor::START;
        self.processor.reset();
        self.notifier.notify();
    }

    /// Replace the whole session with `messages`, committed in order.
    pub fn load_history<I>(&mut self, messages: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = ProtocolMessage>,
    {
        self.reset();
        for message in messages {
            self.commit(message)?;
        }
        Ok(())
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.log.entries()
    }

    /// The entries reflected in the current state.
    pub fn applied(&self) -> &[HistoryEntry] {
        self.log.upto(self.cursor)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn is_at_latest(&self) -> bool {
        self.cursor == Cursor::last(self.log.len())
    }

    pub fn surfaces(&self) -> &BTreeMap<String, P::Surface> {
        self.processor.surfaces()
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn version(&self) -> u64 {
        self.notifier.version()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }
}

impl<P: StateProcessor + Default> Default for DebugSession<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}
