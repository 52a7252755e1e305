//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against an isolated HOME so
//! nothing touches the real data directory. Each test seeds its own demo
//! team, which keeps them independent under parallel execution.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command with HOME pointed at `home` and return
/// (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "planfit-cli", "--"])
        .args(args)
        .env("HOME", home)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn seed_demo(home: &Path) {
    let (stdout, stderr, code) = run_cli(home, &["demo", "seed", "--set-default"]);
    assert_eq!(code, 0, "demo seed failed: {stderr}");
    assert!(stdout.contains("Demo team seeded"), "unexpected output: {stdout}");
}

#[test]
fn test_team_list() {
    let home = TempDir::new().unwrap();
    seed_demo(home.path());

    let (stdout, _, code) = run_cli(home.path(), &["team", "list"]);
    assert_eq!(code, 0, "team list failed");
    let teams: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(teams.as_array().unwrap().len(), 1);
    assert_eq!(teams[0]["name"], "Rocket Squad");
}

#[test]
fn test_epic_list_after_seed() {
    let home = TempDir::new().unwrap();
    seed_demo(home.path());

    let (stdout, _, code) = run_cli(home.path(), &["epic", "list"]);
    assert_eq!(code, 0, "epic list failed");
    let epics: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(epics.as_array().unwrap().len(), 7);
    assert_eq!(epics[0]["title"], "SSO Implementation");
}

#[test]
fn test_epic_add_and_delete() {
    let home = TempDir::new().unwrap();
    seed_demo(home.path());

    let (stdout, _, code) = run_cli(
        home.path(),
        &["epic", "add", "Billing Revamp", "--size", "L"],
    );
    assert_eq!(code, 0, "epic add failed");
    assert!(stdout.contains("Epic created:"));

    let (stdout, _, _) = run_cli(home.path(), &["epic", "list"]);
    let epics: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let added = epics
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["title"] == "Billing Revamp")
        .expect("added epic missing from list");
    let id = added["id"].as_str().unwrap();

    let (_, _, code) = run_cli(home.path(), &["epic", "delete", id]);
    assert_eq!(code, 0, "epic delete failed");
}

#[test]
fn test_forecast_json() {
    let home = TempDir::new().unwrap();
    seed_demo(home.path());

    let (stdout, _, code) = run_cli(home.path(), &["forecast", "--json"]);
    assert_eq!(code, 0, "forecast failed");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["capacity"], 288);
    assert_eq!(report["allocation"]["total_points"], 461);
}

#[test]
fn test_forecast_two_windows() {
    let home = TempDir::new().unwrap();
    seed_demo(home.path());

    let (stdout, _, code) = run_cli(
        home.path(),
        &["forecast", "--windows", "2", "--start-label", "Q3 2026", "--json"],
    );
    assert_eq!(code, 0, "windowed forecast failed");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let windows = report["windows"]["windows"].as_array().unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0]["label"], "Q3 2026");
    assert_eq!(windows[1]["label"], "Q4 2026");
}

#[test]
fn test_scenario_without_save_leaves_team_untouched() {
    let home = TempDir::new().unwrap();
    seed_demo(home.path());

    let (stdout, _, code) = run_cli(home.path(), &["scenario", "--engineers", "8"]);
    assert_eq!(code, 0, "scenario failed");
    assert!(stdout.contains("384"), "scenario capacity missing: {stdout}");

    let (stdout, _, _) = run_cli(home.path(), &["team", "list"]);
    let teams: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(teams[0]["engineer_count"], 6);
}

#[test]
fn test_config_show() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set-windows", "3"]);
    assert_eq!(code, 0, "config set-windows failed");

    let (stdout, _, code) = run_cli(home.path(), &["config", "show"]);
    assert_eq!(code, 0, "config show failed");
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["forecast"]["window_count"], 3);
}

#[test]
fn test_mapping_set_changes_forecast() {
    let home = TempDir::new().unwrap();
    seed_demo(home.path());

    let (_, _, code) = run_cli(home.path(), &["mapping", "set", "M", "50"]);
    assert_eq!(code, 0, "mapping set failed");

    let (stdout, _, _) = run_cli(home.path(), &["forecast", "--json"]);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    // Two M epics in the seed backlog gained 10 points each.
    assert_eq!(report["allocation"]["total_points"], 481);
}

#[test]
fn test_snapshot_save_and_list() {
    let home = TempDir::new().unwrap();
    seed_demo(home.path());

    let (stdout, _, code) = run_cli(
        home.path(),
        &["snapshot", "save", "Final plan", "--increment", "Q3 2026"],
    );
    assert_eq!(code, 0, "snapshot save failed");
    assert!(stdout.contains("Snapshot saved:"));

    let (stdout, _, code) = run_cli(home.path(), &["snapshot", "list"]);
    assert_eq!(code, 0, "snapshot list failed");
    let snapshots: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshots.as_array().unwrap().len(), 1);
    assert_eq!(snapshots[0]["name"], "Final plan");
}
