//! Tests for the non-interactive `replay` command

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

const HISTORY: &str = r#"{"beginRendering":{"surfaceId":"main","root":"r1"}}
{"surfaceUpdate":{"surfaceId":"main","components":[{"id":"r1","component":{"Text":{"text":{"literalString":"Hi"}}}}]}}
{"dataModelUpdate":{"surfaceId":"main","contents":{"user":{"name":"Ada"}}}}
"#;

fn write_history(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("history.jsonl");
    std::fs::write(&path, contents).unwrap();
    path
}

fn replay(dir: &TempDir, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("a2ui-debugger").unwrap();
    cmd.arg("--data-dir").arg(dir.path()).arg("replay").args(args);
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_replay_prints_latest_state() {
    let dir = TempDir::new().unwrap();
    let path = write_history(&dir, HISTORY);
    let state = stdout_json(&mut replay(&dir, &[path.to_str().unwrap()]));

    assert_eq!(
        state,
        json!({
            "main": {
                "rootComponentId": "r1",
                "dataModel": { "user": { "name": "Ada" } },
                "componentsCount": 1,
                "componentIds": ["r1"]
            }
        })
    );
}

#[test]
fn test_replay_at_index() {
    let dir = TempDir::new().unwrap();
    let path = write_history(&dir, HISTORY);

    let state = stdout_json(&mut replay(&dir, &[path.to_str().unwrap(), "--at", "0"]));
    assert_eq!(state["main"]["componentsCount"], 0);

    let state = stdout_json(&mut replay(&dir, &[path.to_str().unwrap(), "--at", "-1"]));
    assert_eq!(state, json!({}));
}

#[test]
fn test_replay_rejects_out_of_range_index() {
    let dir = TempDir::new().unwrap();
    let path = write_history(&dir, HISTORY);
    replay(&dir, &[path.to_str().unwrap(), "--at", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_replay_reports_syntax_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_history(&dir, "{\"deleteSurface\":{\"surfaceId\":\"a\"}}\n{broken\n");
    replay(&dir, &[path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Syntax error at line 2"));
}
