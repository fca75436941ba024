use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// The message kinds defined by the protocol, in the order decoding tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    SurfaceUpdate,
    DataModelUpdate,
    BeginRendering,
    DeleteSurface,
}

impl MessageKind {
    pub const ALL: [MessageKind; 4] = [
        MessageKind::SurfaceUpdate,
        MessageKind::DataModelUpdate,
        MessageKind::BeginRendering,
        MessageKind::DeleteSurface,
    ];

    /// The JSON key that carries this kind's body.
    pub fn key(self) -> &'static str {
        match self {
            MessageKind::SurfaceUpdate => "surfaceUpdate",
            MessageKind::DataModelUpdate => "dataModelUpdate",
            MessageKind::BeginRendering => "beginRendering",
            MessageKind::DeleteSurface => "deleteSurface",
        }
    }

    /// Human-readable name for the log panel.
    pub fn label(self) -> &'static str {
        match self {
            MessageKind::SurfaceUpdate => "Surface Update",
            MessageKind::DataModelUpdate => "Data Model Update",
            MessageKind::BeginRendering => "Begin Rendering",
            MessageKind::DeleteSurface => "Delete Surface",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginRendering {
    pub surface_id: String,
    pub root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceUpdate {
    pub surface_id: String,
    pub components: Vec<ComponentInstance>,
}

/// One entry of a `surfaceUpdate` component list.
///
/// `component` maps a single component type name (`Text`, `Button`, ...) to
/// its properties. The processor enforces the single-type rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstance {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub component: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelUpdate {
    pub surface_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub contents: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSurface {
    pub surface_id: String,
}

/// A single server-to-client message.
///
/// Decoding never fails for well-formed JSON: a recognised kind with a body
/// that does not match the protocol becomes [`ProtocolMessage::Malformed`],
/// and anything without a recognised kind becomes
/// [`ProtocolMessage::Unknown`]. Both keep the raw JSON so the message can be
/// shown and re-serialized exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolMessage {
    BeginRendering(BeginRendering),
    SurfaceUpdate(SurfaceUpdate),
    DataModelUpdate(DataModelUpdate),
    DeleteSurface(DeleteSurface),
    Malformed {
        kind: MessageKind,
        raw: Value,
        reason: String,
    },
    Unknown(Value),
}

impl ProtocolMessage {
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return ProtocolMessage::Unknown(value);
        }

        let kinds: Vec<MessageKind> = MessageKind::ALL
            .into_iter()
            .filter(|kind| value.get(kind.key()).is_some())
            .collect();

        let kind = match kinds.as_slice() {
            [] => return ProtocolMessage::Unknown(value),
            [kind] => *kind,
            [first, ..] => {
                return ProtocolMessage::Malformed {
                    kind: *first,
                    reason: format!("message declares {} kinds, expected one", kinds.len()),
                    raw: value,
                }
            }
        };

        let body = value.get(kind.key()).cloned().unwrap_or(Value::Null);
        let decoded = match kind {
            MessageKind::BeginRendering => {
                serde_json::from_value(body).map(ProtocolMessage::BeginRendering)
            }
            MessageKind::SurfaceUpdate => {
                serde_json::from_value(body).map(ProtocolMessage::SurfaceUpdate)
            }
            MessageKind::DataModelUpdate => {
                serde_json::from_value(body).map(ProtocolMessage::DataModelUpdate)
            }
            MessageKind::DeleteSurface => {
                serde_json::from_value(body).map(ProtocolMessage::DeleteSurface)
            }
        };

        decoded.unwrap_or_else(|err| ProtocolMessage::Malformed {
            kind,
            reason: err.to_string(),
            raw: value,
        })
    }

    /// The declared kind, if any. `Malformed` messages still report theirs.
    pub fn kind(&self) -> Option<MessageKind> {
        match self {
            ProtocolMessage::BeginRendering(_) => Some(MessageKind::BeginRendering),
            ProtocolMessage::SurfaceUpdate(_) => Some(MessageKind::SurfaceUpdate),
            ProtocolMessage::DataModelUpdate(_) => Some(MessageKind::DataModelUpdate),
            ProtocolMessage::DeleteSurface(_) => Some(MessageKind::DeleteSurface),
            ProtocolMessage::Malformed { kind, .. } => Some(*kind),
            ProtocolMessage::Unknown(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProtocolMessage::Malformed { .. } => "Malformed",
            ProtocolMessage::Unknown(_) => "Unknown",
            other => other.kind().map(MessageKind::label).unwrap_or("Unknown"),
        }
    }

    pub fn surface_id(&self) -> Option<&str> {
        match self {
            ProtocolMessage::BeginRendering(body) => Some(&body.surface_id),
            ProtocolMessage::SurfaceUpdate(body) => Some(&body.surface_id),
            ProtocolMessage::DataModelUpdate(body) => Some(&body.surface_id),
            ProtocolMessage::DeleteSurface(body) => Some(&body.surface_id),
            ProtocolMessage::Malformed { .. } | ProtocolMessage::Unknown(_) => None,
        }
    }

    /// Two-space indented JSON, the format used when echoing messages into
    /// the editor.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "null".to_string())
    }
}

fn serialize_single<S, T>(serializer: S, kind: MessageKind, body: &T) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(kind.key(), body)?;
    map.end()
}

impl Serialize for ProtocolMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProtocolMessage::BeginRendering(body) => {
                serialize_single(serializer, MessageKind::BeginRendering, body)
            }
            ProtocolMessage::SurfaceUpdate(body) => {
                serialize_single(serializer, MessageKind::SurfaceUpdate, body)
            }
            ProtocolMessage::DataModelUpdate(body) => {
                serialize_single(serializer, MessageKind::DataModelUpdate, body)
            }
            ProtocolMessage::DeleteSurface(body) => {
                serialize_single(serializer, MessageKind::DeleteSurface, body)
            }
            ProtocolMessage::Malformed { raw, .. } | ProtocolMessage::Unknown(raw) => {
                raw.serialize(serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for ProtocolMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ProtocolMessage::from_value)
    }
}
