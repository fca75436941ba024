pub mod config;
pub mod console;
pub mod demo;
pub mod history;
pub mod input;
pub mod inspect;
pub mod processor;
pub mod protocol;
pub mod stream;
pub mod ui;
pub mod util;

pub use config::Config;
pub use console::{Console, SubmitOutcome};
pub use history::{Cursor, DebugSession, HistoryEntry, SessionError};
pub use processor::{StateProcessor, SurfaceProcessor};
pub use protocol::ProtocolMessage;
pub use stream::{ConnectionState, StreamReconciler};
pub use ui::App;
