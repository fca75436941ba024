//! A2UI v0.8 server-to-client message types.

pub mod message;

pub use message::{
    BeginRendering, ComponentInstance, DataModelUpdate, DeleteSurface, MessageKind,
    ProtocolMessage, SurfaceUpdate,
};
