//! The derived-state processor contract and a reference A2UI implementation.
//!
//! The history engine only depends on [`StateProcessor`]. It never looks at
//! the surfaces a processor produces; consumers read them through
//! [`StateProcessor::surfaces`] after the session's change notifier ticks.

pub mod data_model;
pub mod surface;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::protocol::{MessageKind, ProtocolMessage};

pub use surface::{Component, ResolvedNode, Surface, SurfaceProcessor};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessorError {
    #[error("Malformed {kind} message: {reason}")]
    Malformed { kind: MessageKind, reason: String },
    #[error("Invalid component `{id}` on surface `{surface_id}`: {reason}")]
    InvalidComponent {
        surface_id: String,
        id: String,
        reason: String,
    },
    #[error("Invalid data model path `{path}` on surface `{surface_id}`: {reason}")]
    InvalidPath {
        surface_id: String,
        path: String,
        reason: String,
    },
    #[error("Invalid data model entry on surface `{surface_id}`: {reason}")]
    InvalidDataEntry { surface_id: String, reason: String },
}

/// Folds protocol messages into surface state.
///
/// Implementations mutate internal state and do not announce changes
/// themselves; the owning session does that.
pub trait StateProcessor {
    type Surface: Clone + std::fmt::Debug;

    /// Apply messages in order. Stops at the first rejected message.
    fn apply_messages(&mut self, messages: &[ProtocolMessage]) -> Result<(), ProcessorError>;

    /// Drop all derived state.
    fn reset(&mut self);

    /// Current surfaces keyed by surface id.
    fn surfaces(&self) -> &BTreeMap<String, Self::Surface>;
}
