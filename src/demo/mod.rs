//! A local SSE server that streams a short scripted surface session.
//!
//! `GET /stream` emits one message per interval: a `beginRendering` for
//! surface `main`, a `surfaceUpdate` with a small card, then a timestamp
//! update of the body text forever.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    http::{header, Method},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::stream::{self, Stream};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::time::{interval_at, Instant, Interval};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::DemoConfig;

pub const SURFACE_ID: &str = "main";

/// The scripted message for `step` (0-based).
pub fn message_at(step: u64) -> Value {
    match step {
        0 => json!({
            "beginRendering": {
                "surfaceId": SURFACE_ID,
                "root": "root-card",
                "styles": { "font": "Inter, sans-serif", "primaryColor": "#3498db" }
            }
        }),
        1 => json!({
            "surfaceUpdate": {
                "surfaceId": SURFACE_ID,
                "components": [
                    { "id": "root-card", "component": { "Card": { "child": "col-1" } } },
                    { "id": "col-1", "component": { "Column": {
                        "children": { "explicitList": ["header-text", "body-text", "action-row"] }
                    } } },
                    { "id": "header-text", "component": { "Text": {
                        "text": { "literalString": "Hello SSE World!" }, "usageHint": "h1"
                    } } },
                    { "id": "body-text", "component": { "Text": {
                        "text": { "literalString": "This content is streaming from a Node.js server." },
                        "usageHint": "body"
                    } } },
                    { "id": "action-row", "component": { "Row": {
                        "children": { "explicitList": ["btn-1", "btn-2"] }
                    } } },
                    { "id": "btn-1", "component": { "Button": {
                        "child": "btn-1-txt", "action": { "name": "approve", "context": [] }
                    } } },
                    { "id": "btn-1-txt", "component": { "Text": {
                        "text": { "literalString": "Approve" }, "usageHint": "body"
                    } } },
                    { "id": "btn-2", "component": { "Button": {
                        "child": "btn-2-txt", "action": { "name": "reject", "context": [] }
                    } } },
                    { "id": "btn-2-txt", "component": { "Text": {
                        "text": { "literalString": "Reject" }, "usageHint": "body"
                    } } }
                ]
            }
        }),
        _ => body_update(&chrono::Local::now().format("%H:%M:%S").to_string()),
    }
}

fn body_update(time: &str) -> Value {
    json!({
        "surfaceUpdate": {
            "surfaceId": SURFACE_ID,
            "components": [
                { "id": "body-text", "component": { "Text": {
                    "text": { "literalString": format!("Updated at {time}") },
                    "usageHint": "body"
                } } }
            ]
        }
    })
}

fn script(period: Duration) -> impl Stream<Item = Result<Event, Infallible>> {
    let ticker = interval_at(Instant::now() + period, period);
    stream::unfold((0u64, ticker), |(step, mut ticker): (u64, Interval)| async move {
        ticker.tick().await;
        tracing::debug!(step, "Sending demo message");
        let event = Event::default().data(message_at(step).to_string());
        Some((Ok(event), (step + 1, ticker)))
    })
}

/// Build the router serving the demo stream.
pub fn build_router(period: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/stream",
            get(move || async move {
                tracing::info!("Demo client connected");
                Sse::new(script(period)).keep_alive(KeepAlive::default())
            }),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serve on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, period: Duration) -> anyhow::Result<()> {
    axum::serve(listener, build_router(period)).await?;
    Ok(())
}

/// Run the demo server.
///
/// This binds `host:port` and blocks until shutdown.
pub async fn run_server(config: &DemoConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Demo SSE server running at http://{}/stream", addr);
    serve(listener, config.interval).await
}
