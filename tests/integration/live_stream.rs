//! End-to-end tests of the SSE client against the demo server

use std::time::Duration;

use a2ui_debugger::demo;
use a2ui_debugger::stream::{LiveStream, StreamEvent};
use a2ui_debugger::{ConnectionState, Console, SurfaceProcessor};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;

async fn start_demo(interval: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(demo::serve(listener, interval));
    format!("http://{addr}/stream")
}

async fn next_event(rx: &mut mpsc::UnboundedReceiver<StreamEvent>) -> StreamEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for stream event")
        .expect("stream channel closed")
}

#[tokio::test]
async fn test_streamed_messages_are_committed_in_order() {
    let url = start_demo(Duration::from_millis(20)).await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut console = Console::<SurfaceProcessor>::default();

    assert!(console.begin_connect());
    let stream = LiveStream::connect(&url, tx).unwrap();
    assert_eq!(stream.url(), url);

    while console.session().len() < 3 {
        let event = next_event(&mut rx).await;
        console.on_stream_event(event);
    }
    assert_eq!(console.connection(), ConnectionState::Connected);

    let labels: Vec<_> = console
        .session()
        .history()
        .iter()
        .take(3)
        .map(|entry| entry.message().label())
        .collect();
    assert_eq!(labels, vec!["Begin Rendering", "Surface Update", "Surface Update"]);

    let surface = &console.session().surfaces()[demo::SURFACE_ID];
    assert_eq!(surface.components.len(), 9);

    let echoed: Value = serde_json::from_str(console.editor().text()).unwrap();
    assert_eq!(
        echoed.as_array().unwrap().len(),
        console.session().len()
    );

    stream.disconnect();
    console.disconnected();
    assert_eq!(console.connection(), ConnectionState::Disconnected);
    assert!(console.session().len() >= 3);
}

#[tokio::test]
async fn test_unreachable_server_reports_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut console = Console::<SurfaceProcessor>::default();
    console.begin_connect();
    let _stream = LiveStream::connect(&format!("http://{addr}/stream"), tx).unwrap();

    loop {
        let event = next_event(&mut rx).await;
        let done = matches!(event, StreamEvent::Failed(_));
        console.on_stream_event(event);
        if done {
            break;
        }
    }
    assert_eq!(console.connection(), ConnectionState::Disconnected);
    assert!(console.session().is_empty());
}
