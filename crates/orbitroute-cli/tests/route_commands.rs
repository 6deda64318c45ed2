use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture scenario present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("orbitroute");
    cmd.env_remove("ORBITROUTE_DATA").env("RUST_LOG", "error");
    cmd
}

fn prepare_command(fixture: &str) -> Command {
    let mut cmd = cli();
    cmd.arg("--data").arg(fixture_path(fixture));
    cmd
}

#[test]
fn route_prints_relay_chain() {
    let mut cmd = prepare_command("satellite_data.csv");
    cmd.arg("route");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Route: A -> B (4 hops"))
        .stdout(predicate::str::contains("selection: fewest_hops"))
        .stdout(predicate::str::contains("Relays: SAT7,SAT8,SAT15"));
}

#[test]
fn basic_format_outputs_minimal_path() {
    let mut cmd = prepare_command("satellite_data.csv");
    cmd.arg("--format").arg("basic").arg("route");

    cmd.assert()
        .success()
        .stdout("+ A\n| SAT7\n| SAT8\n| SAT15\n- B\nvia 4 hops\n");
}

#[test]
fn json_format_is_machine_readable() {
    let mut cmd = prepare_command("satellite_data.csv");
    cmd.arg("--format").arg("json").arg("route");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(value["hops"], 4);
    assert_eq!(value["selection"], "fewest_hops");
    assert_eq!(value["candidates"], 15);
    assert_eq!(
        value["relays"],
        serde_json::json!(["SAT7", "SAT8", "SAT15"])
    );
    assert_eq!(value["steps"].as_array().map(Vec::len), Some(5));
}

#[test]
fn legacy_selection_is_supported() {
    let mut cmd = prepare_command("satellite_data.csv");
    cmd.arg("route").arg("--selection").arg("legacy");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("selection: legacy"))
        .stdout(predicate::str::contains("Relays: SAT7,SAT8,SAT15"));
}

#[test]
fn unknown_selection_is_rejected() {
    let mut cmd = prepare_command("satellite_data.csv");
    cmd.arg("route").arg("--selection").arg("shortest");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("shortest"));
}

#[test]
fn route_between_named_nodes() {
    let mut cmd = prepare_command("satellite_data.csv");
    cmd.arg("--format")
        .arg("basic")
        .arg("route")
        .arg("--from")
        .arg("SAT7")
        .arg("--to")
        .arg("SAT0");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("+ SAT7\n"))
        .stdout(predicate::str::contains("- SAT0\n"));
}

#[test]
fn unknown_node_error_is_friendly() {
    let mut cmd = prepare_command("satellite_data.csv");
    cmd.arg("route").arg("--to").arg("SAT77");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown node name: SAT77"))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn unreachable_goal_fails_with_message() {
    let mut cmd = prepare_command("unreachable.csv");
    cmd.arg("route");

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No route found between A and B"));
}

#[test]
fn data_path_can_come_from_environment() {
    let mut cmd = cli();
    cmd.env("ORBITROUTE_DATA", fixture_path("satellite_data.csv"))
        .arg("--format")
        .arg("basic")
        .arg("route");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("via 4 hops"));
}

#[test]
fn missing_data_argument_is_an_error() {
    let mut cmd = cli();
    cmd.arg("route");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--data"));
}

#[test]
fn missing_scenario_file_is_reported() {
    let temp_dir = tempdir().expect("create temp dir");
    let mut cmd = cli();
    cmd.arg("--data")
        .arg(temp_dir.path().join("absent.csv"))
        .arg("route");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load scenario"));
}

#[test]
fn malformed_scenario_is_reported() {
    let temp_dir = tempdir().expect("create temp dir");
    let path = temp_dir.path().join("broken.csv");
    fs::write(&path, "SAT0,1.0,2.0\nROUTE,0.0,0.0,1.0,1.0\n").expect("write scenario");

    let mut cmd = cli();
    cmd.arg("--data").arg(&path).arg("route");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("malformed scenario record on line 1"));
}
