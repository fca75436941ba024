//! Message history, playhead and replay.

pub mod cursor;
pub mod log;
pub mod notifier;
pub mod replay;
pub mod session;

pub use cursor::Cursor;
pub use log::{HistoryEntry, HistoryLog};
pub use notifier::ChangeNotifier;
pub use replay::{replay, ReplayError};
pub use session::{DebugSession, SessionError};
