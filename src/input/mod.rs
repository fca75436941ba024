//! Manual message entry.

pub mod editor;
pub mod payload;

pub use editor::EditorBuffer;
pub use payload::{parse_payload, validate, InputError, ParsedInput};
