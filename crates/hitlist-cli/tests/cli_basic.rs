//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_hitlist"))
        .args(args)
        .env("HITLIST_DATA_DIR", data_dir)
        .env_remove("HITLIST_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed {:?}: {}", args, stderr);
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn add_habit(data_dir: &Path, name: &str) -> String {
    let habit = run_json(
        data_dir,
        &["habit", "add", name, "--month", "2024-06", "--goal", "10"],
    );
    habit["id"].as_str().unwrap().to_string()
}

#[test]
fn test_streak_compute() {
    let dir = TempDir::new().unwrap();
    let out = run_json(dir.path(), &["streak", "compute", "1,2,3,10,11", "--today", "11"]);
    assert_eq!(out["current_streak"], 2);
    assert_eq!(out["longest_streak"], 3);
    assert_eq!(out["last_completed_day"], 11);
}

#[test]
fn test_streak_milestone() {
    let dir = TempDir::new().unwrap();
    let out = run_json(dir.path(), &["streak", "milestone", "6", "8"]);
    assert_eq!(out["milestone"], 7);
    assert_eq!(out["next_milestone"], 14);

    let out = run_json(dir.path(), &["streak", "milestone", "3", "3"]);
    assert!(out["milestone"].is_null());
}

#[test]
fn test_habit_add_and_list() {
    let dir = TempDir::new().unwrap();
    add_habit(dir.path(), "Read");
    let rows = run_json(
        dir.path(),
        &["habit", "list", "--month", "2024-06", "--today", "2024-06-15"],
    );
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Read");
    assert_eq!(rows[0]["category"], "Health");
}

#[test]
fn test_habit_add_rejects_blank_name() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["habit", "add", "  ", "--month", "2024-06"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_toggle_celebrates_milestone() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(dir.path(), "Stretch");
    for day in ["1", "2"] {
        let today = format!("2024-06-0{day}");
        run_json(dir.path(), &["habit", "toggle", &id, day, "--today", &today]);
    }
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["habit", "toggle", &id, "3", "--today", "2024-06-03"],
    );
    assert_eq!(code, 0);
    let outcome: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(outcome["marked"], true);
    assert_eq!(outcome["after"]["current_streak"], 3);
    assert_eq!(outcome["celebration"]["kind"]["type"], "milestone");
    assert_eq!(outcome["celebration"]["kind"]["milestone"], 3);
    assert!(stderr.contains("3 Days Strong!"));
}

#[test]
fn test_toggle_off_keeps_longest() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(dir.path(), "Walk");
    run_json(dir.path(), &["habit", "toggle", &id, "4", "--today", "2024-06-04"]);
    let off = run_json(dir.path(), &["habit", "toggle", &id, "4", "--today", "2024-06-04"]);
    assert_eq!(off["marked"], false);
    assert!(off["celebration"].is_null());
    assert_eq!(off["longest_streak"], 1);
}

#[test]
fn test_celebrations_can_be_silenced() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "celebrations.enabled", "false"]);
    assert_eq!(code, 0);
    let id = add_habit(dir.path(), "Floss");
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["habit", "toggle", &id, "1", "--today", "2024-06-01"],
    );
    assert_eq!(code, 0);
    assert!(!stderr.contains("New Record!"));
}

#[test]
fn test_month_reuse_and_show() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(dir.path(), "Run");
    run_json(dir.path(), &["habit", "toggle", &id, "1", "--today", "2024-06-01"]);

    let copies = run_json(dir.path(), &["month", "reuse", "2024-07"]);
    assert_eq!(copies.as_array().unwrap().len(), 1);

    let summary = run_json(
        dir.path(),
        &["month", "show", "--month", "2024-07", "--today", "2024-07-02"],
    );
    assert_eq!(summary["habits"][0]["name"], "Run");
    assert_eq!(summary["habits"][0]["completed"], 0);
    assert_eq!(summary["consistency"].as_array().unwrap().len(), 2);

    let (_, _, code) = run_cli(dir.path(), &["month", "reuse", "2024-07"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_get_unknown_key() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "nope.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: unknown config key: nope.key"));
}

#[test]
fn test_config_clears_default_goal() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "habits.default_goal", "12"]);
    assert_eq!(code, 0);
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "habits.default_goal", "none"]);
    assert_eq!(code, 0, "{stderr}");
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "habits.default_goal"]);
    assert_eq!(stdout.trim(), "null");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "habits.default_category", "mindset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "habits.default_category"]);
    assert_eq!(stdout.trim(), "Mindset");
}

#[test]
fn test_month_rejects_huge_year() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["habit", "list", "--month", "2147483647-12"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}
