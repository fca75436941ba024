//! Server-Sent Events client for live message streams.

use futures::StreamExt;
use reqwest::Client;
use reqwest_eventsource::{Event, EventSource, RequestBuilderExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::protocol::ProtocolMessage;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Invalid stream URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Failed to open event stream: {0}")]
    Request(String),
}

/// What the stream task reports back to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Opened,
    Message(ProtocolMessage),
    /// A `data:` payload that was not JSON. It is never committed.
    Rejected { data: String, error: String },
    Failed(String),
    Closed,
}

/// Decode one SSE `data:` payload.
pub fn decode_event_data(data: &str) -> StreamEvent {
    match serde_json::from_str::<ProtocolMessage>(data) {
        Ok(message) => StreamEvent::Message(message),
        Err(err) => StreamEvent::Rejected {
            data: data.to_string(),
            error: err.to_string(),
        },
    }
}

/// A running subscription. Dropping it stops the stream.
#[derive(Debug)]
pub struct LiveStream {
    url: String,
    task: JoinHandle<()>,
}

impl LiveStream {
    /// Open `url` and forward its events to `events`. Must be called from
    /// within a tokio runtime.
    pub fn connect(
        url: &str,
        events: mpsc::UnboundedSender<StreamEvent>,
    ) -> Result<Self, StreamError> {
        let parsed = reqwest::Url::parse(url).map_err(|err| StreamError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        let source = Client::new()
            .get(parsed)
            .eventsource()
            .map_err(|err| StreamError::Request(err.to_string()))?;

        tracing::info!(url, "Connecting to live stream");
        let task = tokio::spawn(pump(source, events));
        Ok(Self {
            url: url.to_string(),
            task,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn disconnect(self) {
        tracing::info!(url = %self.url, "Disconnecting live stream");
    }
}

impl Drop for LiveStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn pump(mut source: EventSource, events: mpsc::UnboundedSender<StreamEvent>) {
    while let Some(event) = source.next().await {
        let forwarded = match event {
            Ok(Event::Open) => StreamEvent::Opened,
            Ok(Event::Message(message)) => decode_event_data(&message.data),
            Err(err) => {
                tracing::warn!(error = %err, "Live stream failed");
                source.close();
                StreamEvent::Failed(err.to_string())
            }
        };
        if events.send(forwarded).is_err() {
            source.close();
            return;
        }
    }
    let _ = events.send(StreamEvent::Closed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_json_payloads() {
        let event = decode_event_data(r#"{"deleteSurface":{"surfaceId":"main"}}"#);
        assert_eq!(
            event,
            StreamEvent::Message(ProtocolMessage::from_value(json!({
                "deleteSurface": { "surfaceId": "main" }
            })))
        );
    }

    #[test]
    fn rejects_non_json_payloads() {
        assert!(matches!(
            decode_event_data("hello"),
            StreamEvent::Rejected { ref data, .. } if data == "hello"
        ));
    }

    #[tokio::test]
    async fn connect_rejects_bad_urls() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let err = LiveStream::connect("not a url", tx).unwrap_err();
        assert!(matches!(err, StreamError::InvalidUrl { .. }));
    }
}
