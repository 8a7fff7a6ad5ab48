//! Integration tests for the `trip` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the balances,
//! settle, split, and feed subcommands through the actual binary.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to a fixture file.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: run a command and parse its stdout as JSON.
fn json_output(args: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("trip")
        .unwrap()
        .args(args)
        .output()
        .expect("binary must run");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// balances / settle
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn balances_from_file() {
    let value = json_output(&["balances", "-i", fixture("ledger.json").as_str()]);

    assert_eq!(value["ana"], "60.00");
    assert_eq!(value["ben"], "-30.00");
    assert_eq!(value["caz"], "-30.00");
}

#[test]
fn settle_from_stdin() {
    let input = r#"[{"payer": "a", "amount": 90, "splits": [
        {"participant": "a", "owed_amount": 30},
        {"participant": "b", "owed_amount": 30},
        {"participant": "c", "owed_amount": 30}]}]"#;

    Command::cargo_bin("trip")
        .unwrap()
        .arg("settle")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"transfers\""))
        .stdout(predicate::str::contains("\"from\": \"b\""))
        .stdout(predicate::str::contains("\"from\": \"c\""));
}

#[test]
fn settle_file_to_file() {
    let output_path = std::env::temp_dir().join("trip-test-settlement.json");
    let _ = std::fs::remove_file(&output_path);

    Command::cargo_bin("trip")
        .unwrap()
        .args(["settle", "-i", fixture("ledger.json").as_str(), "-o"])
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["transfers"].as_array().unwrap().len(), 2);
    assert_eq!(value["transfers"][0]["to"], "ana");
    assert_eq!(value["residual"], "0.00");

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn settle_rejects_malformed_ledger() {
    Command::cargo_bin("trip")
        .unwrap()
        .arg("settle")
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse ledger"));
}

#[test]
fn settle_missing_file_fails() {
    Command::cargo_bin("trip")
        .unwrap()
        .args(["settle", "-i", "/nonexistent/ledger.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// split
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn split_remainder_on_first() {
    let value = json_output(&["split", "--total", "100.00", "ana", "ben", "caz"]);

    assert_eq!(value[0]["participant"], "ana");
    assert_eq!(value[0]["amount"], "33.34");
    assert_eq!(value[1]["amount"], "33.33");
    assert_eq!(value[2]["amount"], "33.33");
}

#[test]
fn split_requires_participants() {
    Command::cargo_bin("trip")
        .unwrap()
        .args(["split", "--total", "10"])
        .assert()
        .failure();
}

#[test]
fn split_rejects_non_numeric_total() {
    Command::cargo_bin("trip")
        .unwrap()
        .args(["split", "--total", "lots", "ana"])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// feed
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn feed_orders_in_progress_then_today() {
    let value = json_output(&[
        "feed",
        "-i",
        fixture("schedule.json").as_str(),
        "--now",
        "2026-03-16T14:30:00Z",
    ]);

    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["tram-28", "ben-flight", "arrival:ben"]);
    assert_eq!(value[1]["flight"]["status"], "en_route");
    assert_eq!(value[1]["flight"]["percent_complete"], 50);
    assert_eq!(value[1]["participants"][0]["name"], "Ben");
}

#[test]
fn feed_outside_trip_is_empty() {
    let value = json_output(&[
        "feed",
        "-i",
        fixture("schedule.json").as_str(),
        "--now",
        "2026-04-01T12:00:00Z",
    ]);
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn feed_lookahead_from_env() {
    let output = Command::cargo_bin("trip")
        .unwrap()
        .args([
            "feed",
            "-i",
            fixture("schedule.json").as_str(),
            "--now",
            "2026-03-16T18:30:00Z",
        ])
        .env("TRIP_EVENT_LOOKAHEAD_MINUTES", "180")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["fado", "arrival:ben"]);
}

#[test]
fn feed_applies_flight_status_overrides() {
    let value = json_output(&[
        "feed",
        "-i",
        fixture("schedule.json").as_str(),
        "--now",
        "2026-03-16T14:30:00Z",
        "--flight-status",
        fixture("live.json").as_str(),
    ]);

    let flight = &value[1]["flight"];
    assert_eq!(flight["status"], "delayed");
    assert_eq!(flight["delay_minutes"], 35);
    assert_eq!(flight["gate"], "12");
}

#[test]
fn feed_grouped_sections() {
    let value = json_output(&[
        "feed",
        "-i",
        fixture("schedule.json").as_str(),
        "--now",
        "2026-03-16T14:30:00Z",
        "--grouped",
    ]);

    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[0]["bucket"], "in_progress");
    assert_eq!(value[0]["items"].as_array().unwrap().len(), 2);
    assert_eq!(value[1]["bucket"], "today");
}

#[test]
fn feed_rejects_unknown_timezone() {
    Command::cargo_bin("trip")
        .unwrap()
        .args([
            "feed",
            "-i",
            fixture("schedule.json").as_str(),
            "--timezone",
            "Nowhere/Special",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}
