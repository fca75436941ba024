//! Protocol message fixtures

use a2ui_debugger::ProtocolMessage;
use serde_json::json;

pub fn begin_rendering(surface_id: &str, root: &str) -> ProtocolMessage {
    ProtocolMessage::from_value(json!({
        "beginRendering": { "surfaceId": surface_id, "root": root }
    }))
}

pub fn text_update(surface_id: &str, id: &str, text: &str) -> ProtocolMessage {
    ProtocolMessage::from_value(json!({
        "surfaceUpdate": {
            "surfaceId": surface_id,
            "components": [
                { "id": id, "component": { "Text": { "text": { "literalString": text } } } }
            ]
        }
    }))
}

pub fn data_update(surface_id: &str, key: &str, value: i64) -> ProtocolMessage {
    ProtocolMessage::from_value(json!({
        "dataModelUpdate": { "surfaceId": surface_id, "contents": { key: value } }
    }))
}

pub fn delete_surface(surface_id: &str) -> ProtocolMessage {
    ProtocolMessage::from_value(json!({ "deleteSurface": { "surfaceId": surface_id } }))
}

/// A message the reference processor rejects.
pub fn malformed() -> ProtocolMessage {
    ProtocolMessage::from_value(json!({ "beginRendering": { "surfaceId": 7 } }))
}

/// Surface `main` with root `r1` showing "Hi"
pub fn hello_surface() -> Vec<ProtocolMessage> {
    vec![begin_rendering("main", "r1"), text_update("main", "r1", "Hi")]
}
