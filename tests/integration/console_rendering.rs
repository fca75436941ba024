//! Rendering tests for the full console layout

use super::common::terminal::render_app;
use a2ui_debugger::ui::Focus;
use a2ui_debugger::{App, Config};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const PAYLOAD: &str = r#"[
  {"beginRendering": {"surfaceId": "main", "root": "r1"}},
  {"surfaceUpdate": {"surfaceId": "main", "components": [
    {"id": "r1", "component": {"Text": {"text": {"literalString": "Hi"}}}}
  ]}}
]"#;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_empty_console_shows_placeholders() {
    let mut app = App::new(Config::default());
    let screen = render_app(&mut app, 120, 32);

    assert!(screen.contains("A2UI Debugger"));
    assert!(screen.contains("Disconnected"));
    assert!(screen.contains("No surfaces to render. Send a payload to start."));
    assert!(screen.contains("0 / 0"));
    assert!(screen.contains("quit"));
}

#[test]
fn test_loaded_history_renders_tree_and_state() {
    let mut app = App::new(Config::default());
    assert_eq!(app.load_history(PAYLOAD), Ok(2));
    let screen = render_app(&mut app, 120, 32);

    assert!(screen.contains("Surface: main"));
    assert!(screen.contains("Text #r1 \"Hi\""));
    assert!(screen.contains("\"rootComponentId\": \"r1\""));
    assert!(screen.contains("2 / 2"));
    assert!(screen.contains("Begin Rendering"));
}

#[test]
fn test_stepping_back_updates_timeline() {
    let mut app = App::new(Config::default());
    app.load_history(PAYLOAD).unwrap();

    app.handle_key_event(key(KeyCode::Left));
    let screen = render_app(&mut app, 120, 32);
    assert!(screen.contains("1 / 2"));
    assert!(screen.contains("#r1 (missing)"));

    app.handle_key_event(key(KeyCode::Home));
    let screen = render_app(&mut app, 120, 32);
    assert!(screen.contains("0 / 2"));
    assert!(screen.contains("No surfaces to render"));

    app.handle_key_event(key(KeyCode::End));
    assert!(render_app(&mut app, 120, 32).contains("2 / 2"));
}

#[test]
fn test_typing_and_submitting_in_editor() {
    let mut app = App::new(Config::default());
    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focus(), Focus::Editor);

    for c in r#"{"deleteSurface":{"surfaceId":"x"}}"#.chars() {
        app.handle_key_event(key(KeyCode::Char(c)));
    }
    assert!(render_app(&mut app, 120, 32).contains("deleteSurface"));

    app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert_eq!(app.console().session().len(), 1);
    assert!(app.console().editor().is_blank());

    app.handle_key_event(key(KeyCode::Esc));
    assert_eq!(app.focus(), Focus::Timeline);
    app.handle_key_event(key(KeyCode::Char('q')));
    assert!(app.should_quit());
}

#[test]
fn test_invalid_input_shows_inline_error() {
    let mut app = App::new(Config::default());
    app.handle_paste("{not json");
    assert_eq!(app.focus(), Focus::Editor);

    let screen = render_app(&mut app, 120, 32);
    assert!(screen.contains("Syntax error at line 1"));

    app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert!(app.console().session().is_empty());
    assert_eq!(app.console().editor().text(), "{not json");
}

#[test]
fn test_reset_key_clears_history() {
    let mut app = App::new(Config::default());
    app.load_history(PAYLOAD).unwrap();
    app.handle_key_event(key(KeyCode::Char('x')));

    assert!(app.console().session().is_empty());
    let screen = render_app(&mut app, 120, 32);
    assert!(screen.contains("History cleared"));
    assert!(screen.contains("0 / 0"));
}

#[test]
fn test_unchanged_frames_reuse_derived_panes() {
    let mut app = App::new(Config::default());
    app.load_history(PAYLOAD).unwrap();

    let first = render_app(&mut app, 120, 32);
    let stats = app.render_stats();
    assert_eq!(stats.state_refreshes, 1);
    assert_eq!(stats.diagnostic_refreshes, 1);

    let second = render_app(&mut app, 120, 32);
    assert_eq!(first, second);
    assert_eq!(app.render_stats(), stats);

    app.handle_key_event(key(KeyCode::Tab));
    app.handle_key_event(key(KeyCode::Char('{')));
    render_app(&mut app, 120, 32);
    assert_eq!(app.render_stats().state_refreshes, 1);
    assert_eq!(app.render_stats().diagnostic_refreshes, 2);

    app.handle_key_event(key(KeyCode::Esc));
    app.handle_key_event(key(KeyCode::Left));
    let screen = render_app(&mut app, 120, 32);
    assert!(screen.contains("#r1 (missing)"));
    assert_eq!(app.render_stats().state_refreshes, 2);
    assert_eq!(app.render_stats().diagnostic_refreshes, 2);
}

#[test]
fn test_selected_log_row_jumps_and_expands() {
    let mut app = App::new(Config::default());
    app.load_history(PAYLOAD).unwrap();

    app.handle_key_event(key(KeyCode::Up));
    assert_eq!(app.selected(), Some(1));
    app.handle_key_event(key(KeyCode::Up));
    app.handle_key_event(key(KeyCode::Up));
    assert_eq!(app.selected(), Some(0));

    app.handle_key_event(key(KeyCode::Enter));
    assert_eq!(app.console().session().cursor().position(), 0);
    assert_eq!(app.focus(), Focus::Timeline);

    app.handle_key_event(key(KeyCode::Char('d')));
    assert!(app.detail());
    let screen = render_app(&mut app, 120, 40);
    assert!(screen.contains("1 / 2"));
    assert!(screen.contains("Messages 1/2"));
    assert!(screen.contains("#0 Begin Rendering"));
    assert!(screen.contains("\"beginRendering\": {"));

    for _ in 0..5 {
        app.handle_key_event(key(KeyCode::Down));
    }
    assert_eq!(app.selected(), Some(1));
    app.handle_key_event(key(KeyCode::Enter));
    assert!(render_app(&mut app, 120, 40).contains("2 / 2"));
}

#[test]
fn test_selection_is_dropped_when_history_is_cleared() {
    let mut app = App::new(Config::default());
    app.load_history(PAYLOAD).unwrap();
    app.handle_key_event(key(KeyCode::Up));
    assert_eq!(app.selected(), Some(1));

    app.handle_key_event(key(KeyCode::Char('x')));
    render_app(&mut app, 120, 32);
    assert_eq!(app.selected(), None);

    app.handle_key_event(key(KeyCode::Enter));
    assert!(app.console().session().is_empty());
}
