//! Live stream ingress and reconciliation with the history.

pub mod client;
pub mod reconciler;

pub use client::{decode_event_data, LiveStream, StreamError, StreamEvent};
pub use reconciler::{ConnectionState, StreamReconciler};
