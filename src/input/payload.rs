//! Parsing hand-written payloads into messages.
//!
//! A payload is a single JSON object, a JSON array of objects, or one JSON
//! object per line. The whole-document attempt is lenient (JSON5, so
//! comments and trailing commas are fine); the per-line fallback is strict
//! JSON.

use serde_json::Value;
use thiserror::Error;

use crate::protocol::ProtocolMessage;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Syntax error at line {line}: {message}")]
    Line { line: usize, message: String },
}

/// Messages recovered from a payload, in payload order.
///
/// With line-by-line parsing the lines before the first bad one are kept,
/// so `messages` can be non-empty alongside an `error`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedInput {
    pub messages: Vec<ProtocolMessage>,
    pub error: Option<InputError>,
}

impl ParsedInput {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.error.is_none()
    }
}

pub fn parse_payload(text: &str) -> ParsedInput {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParsedInput::default();
    }

    match json5::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => {
            return ParsedInput {
                messages: items.into_iter().map(ProtocolMessage::from_value).collect(),
                error: None,
            };
        }
        Ok(value) => {
            return ParsedInput {
                messages: vec![ProtocolMessage::from_value(value)],
                error: None,
            };
        }
        Err(err) => {
            tracing::debug!(error = %err, "Payload is not one JSON document, trying JSONL");
        }
    }

    let mut messages = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(value) => messages.push(ProtocolMessage::from_value(value)),
            Err(err) => {
                return ParsedInput {
                    messages,
                    error: Some(InputError::Line {
                        line: idx + 1,
                        message: err.to_string(),
                    }),
                };
            }
        }
    }

    ParsedInput {
        messages,
        error: None,
    }
}

/// The inline diagnostic for the editor: the error submitting `text` would
/// produce, if any.
pub fn validate(text: &str) -> Option<InputError> {
    parse_payload(text).error
}
