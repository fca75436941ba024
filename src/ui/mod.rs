pub mod app;
pub mod components;
pub mod events;
pub mod terminal_guard;

pub use app::{App, RenderStats};
pub use events::{action_for_key, Action, Focus};
pub use terminal_guard::{install_panic_hook, TerminalGuard};
