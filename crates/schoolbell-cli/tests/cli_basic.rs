//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Mutating and
//! audio-dependent commands are left to unit tests; these only exercise the
//! read-only surface.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "schoolbell-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "help failed");
    assert!(stdout.contains("schedule"));
    assert!(stdout.contains("run"));
}

#[test]
fn test_schedule_list_is_json_array() {
    let (stdout, _, code) = run_cli(&["schedule", "list"]);
    assert_eq!(code, 0, "schedule list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("schedule list did not print JSON");
    assert!(parsed.is_array());
}

#[test]
fn test_sound_status_is_json() {
    let (stdout, _, code) = run_cli(&["sound", "status"]);
    assert_eq!(code, 0, "sound status failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("sound status did not print JSON");
    assert!(parsed["enabled"].is_boolean());
}
