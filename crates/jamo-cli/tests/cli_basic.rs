//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. HOME is
//! pointed at a temp directory so each test gets a fresh store.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against a store rooted at `home`.
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "jamo-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env("JAMO_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("review"));
    assert!(stdout.contains("due"));
}

#[test]
fn test_due_lists_full_catalog_when_unreviewed() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["due"]);
    assert_eq!(code, 0);
    let ids: Vec<String> = serde_json::from_str(&stdout).expect("due output should be JSON");
    assert_eq!(ids.len(), 24);
    assert_eq!(ids[0], "giyeok");
}

#[test]
fn test_stats_show_defaults() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["stats", "show"]);
    assert_eq!(code, 0);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["total_reviews"], 0);
}

#[test]
fn test_settings_set_persists() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["settings", "set", "--auto-flip", "true", "--stroke-width", "5"],
    );
    assert_eq!(code, 0);
    let settings: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(settings["auto_flip"], true);

    let (stdout, _, code) = run_cli(home.path(), &["settings", "show"]);
    assert_eq!(code, 0);
    let settings: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(settings["stroke_width"], 5);
}
