use thiserror::Error;

use super::cursor::Cursor;
use super::log::HistoryEntry;
use crate::processor::{ProcessorError, StateProcessor};

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Replay failed at entry {index}: {source}")]
pub struct ReplayError {
    pub index: usize,
    #[source]
    pub source: ProcessorError,
}

/// Rebuild `processor` from scratch with `log[0..=upto]`.
///
/// Entries are applied one at a time so a failure names the entry that
/// caused it. The first failure is returned as-is; entries before it stay
/// applied.
pub fn replay<P: StateProcessor>(
    log: &[HistoryEntry],
    upto: Cursor,
    processor: &mut P,
) -> Result<(), ReplayError> {
    debug_assert!(upto.applied_len() <= log.len());

    processor.reset();
    for (index, entry) in log.iter().take(upto.applied_len()).enumerate() {
        processor
            .apply_messages(std::slice::from_ref(entry.message()))
            .map_err(|source| ReplayError { index, source })?;
    }
    Ok(())
}
