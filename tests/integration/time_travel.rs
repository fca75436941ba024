//! Integration tests for committing, rewinding and replaying history

use super::common::fixtures::{
    begin_rendering, data_update, delete_surface, hello_surface, malformed, text_update,
};
use a2ui_debugger::inspect::{self, ResolvedNode};
use a2ui_debugger::{Console, Cursor, DebugSession, SessionError, SurfaceProcessor};
use serde_json::json;

fn hello_session() -> DebugSession<SurfaceProcessor> {
    let mut session = DebugSession::new(SurfaceProcessor::new());
    for message in hello_surface() {
        session.commit(message).unwrap();
    }
    session
}

/// Surface `main` renders its root text after both messages
#[test]
fn test_scenario_commit_builds_surface() {
    let session = hello_session();

    let surface = &session.surfaces()["main"];
    assert_eq!(surface.root_component_id.as_deref(), Some("r1"));
    let root = surface.resolve_root().expect("root should resolve");
    assert!(matches!(root, ResolvedNode::Component { .. }));
    assert_eq!(root.text(), Some("Hi"));
}

/// Rewinding to the first entry shows the surface before its update
#[test]
fn test_scenario_rewind_shows_pre_update_state() {
    let mut session = hello_session();
    assert!(session.jump_to(0).unwrap());

    let surface = &session.surfaces()["main"];
    assert_eq!(surface.root_component_id.as_deref(), Some("r1"));
    assert!(surface.components.is_empty());
    assert_eq!(
        surface.resolve_root(),
        Some(ResolvedNode::Missing { id: "r1".into() })
    );
    assert_eq!(session.len(), 2);
}

/// Committing after a rewind overwrites the rest of the history
#[test]
fn test_scenario_commit_after_rewind_rewrites_history() {
    let mut session = hello_session();
    session.jump_to(0).unwrap();
    session.commit(delete_surface("main")).unwrap();

    assert_eq!(session.len(), 2);
    assert_eq!(session.history()[1].message(), &delete_surface("main"));
    assert!(!session
        .history()
        .iter()
        .any(|entry| entry.message() == &hello_surface()[1]));
    assert!(session.surfaces().is_empty());
}

/// Five entries, rewind to index 2, commit: three entries remain
#[test]
fn test_branch_overwrite_keeps_prefix() {
    let mut session = DebugSession::new(SurfaceProcessor::new());
    for n in 0..5 {
        session.commit(data_update("main", "n", n)).unwrap();
    }
    session.jump_to(1).unwrap();
    let m = text_update("main", "t", "new");
    session.commit(m.clone()).unwrap();

    assert_eq!(session.len(), 3);
    assert_eq!(session.history()[2].message(), &m);
    assert_eq!(session.cursor(), Cursor::at(2));
}

#[test]
fn test_reset_clears_state() {
    let mut session = hello_session();
    session.reset();
    assert_eq!(session.len(), 0);
    assert_eq!(session.cursor().position(), -1);
    assert!(session.surfaces().is_empty());
}

/// Data model merges replay in order
#[test]
fn test_replay_restores_data_model_at_each_step() {
    let mut session = DebugSession::new(SurfaceProcessor::new());
    session.commit(begin_rendering("main", "r")).unwrap();
    session.commit(data_update("main", "a", 1)).unwrap();
    session.commit(data_update("main", "b", 2)).unwrap();
    session.commit(data_update("main", "a", 3)).unwrap();

    session.jump_to(2).unwrap();
    let snapshot = inspect::snapshot(session.surfaces());
    assert_eq!(
        serde_json::to_value(&snapshot["main"].data_model).unwrap(),
        json!({ "a": 1, "b": 2 })
    );

    session.jump_to_latest().unwrap();
    let snapshot = inspect::snapshot(session.surfaces());
    assert_eq!(
        serde_json::to_value(&snapshot["main"].data_model).unwrap(),
        json!({ "a": 3, "b": 2 })
    );
}

/// A rejected entry in the middle of history stops replay before it
#[test]
fn test_failed_replay_keeps_cursor_consistent() {
    let mut session = DebugSession::new(SurfaceProcessor::new());
    session.commit(begin_rendering("a", "r")).unwrap();
    assert!(matches!(
        session.commit(malformed()),
        Err(SessionError::Apply { index: 1, .. })
    ));
    session.commit(begin_rendering("b", "r")).unwrap();
    assert_eq!(session.surfaces().len(), 2);

    session.jump_to(-1).unwrap();
    let err = session.jump_to(2).unwrap_err();
    assert!(matches!(err, SessionError::Replay(ref e) if e.index == 1));
    assert_eq!(session.cursor(), Cursor::at(0));

    let mut fresh = DebugSession::new(SurfaceProcessor::new());
    fresh.commit(begin_rendering("a", "r")).unwrap();
    assert_eq!(
        inspect::snapshot(session.surfaces()),
        inspect::snapshot(fresh.surfaces())
    );
}

/// Two empty objects on separate lines commit through the line fallback
#[test]
fn test_two_objects_on_separate_lines_commit_twice() {
    let mut console = Console::<SurfaceProcessor>::default();
    console.editor_mut().set_text("{}\n{}");
    let outcome = console.submit_input();

    assert_eq!(outcome.committed, 2);
    assert!(outcome.cleared);
    assert_eq!(console.session().len(), 2);
    assert!(console.session().surfaces().is_empty());
}

/// Async consumers see every accepted operation
#[tokio::test]
async fn test_notifier_wakes_subscribers() {
    let mut session = DebugSession::new(SurfaceProcessor::new());
    let mut rx = session.subscribe();

    session.commit(begin_rendering("main", "r")).unwrap();
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 1);

    assert!(!session.jump_to(9).unwrap());
    session.jump_to(-1).unwrap();
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 2);
}
