use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/constellations.json")
        .canonicalize()
        .expect("fixture document present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("starwander");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .arg("--file")
        .arg(fixture_path());
    cmd
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("starwander");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("stars"))
        .stdout(predicate::str::contains("route"))
        .stdout(predicate::str::contains("simulate"));
}

#[test]
fn stars_lists_every_star() {
    let mut cmd = cli();
    cmd.arg("stars");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Polaris (8) home"))
        .stdout(predicate::str::contains("8 stars"));
}

#[test]
fn stars_filters_hypergiants_by_galaxy() {
    let mut cmd = cli();
    cmd.arg("stars")
        .arg("--galaxy")
        .arg("Andromeda")
        .arg("--hypergiants");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Mirach (6) Andromeda"))
        .stdout(predicate::str::contains("[hypergiant]"))
        .stdout(predicate::str::contains("1 stars"));
}

#[test]
fn stars_json_output() {
    let mut cmd = cli();
    cmd.arg("--format").arg("json").arg("stars").arg("--galaxy").arg("home");
    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    let stars = value.as_array().expect("array of stars");
    assert_eq!(stars.len(), 6);
    assert_eq!(stars[0]["label"], "Betelgeuse");
}

#[test]
fn simulate_reports_each_step() {
    let mut cmd = cli();
    cmd.arg("simulate")
        .arg("--from")
        .arg("1")
        .arg("--to")
        .arg("7")
        .arg("--algorithm")
        .arg("shortest");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Journey completed: 6 of 6 stars reached"))
        .stdout(predicate::str::contains("Alpheratz (7)"))
        .stdout(predicate::str::contains("Final health: Excellent"));
}

#[test]
fn simulate_json_includes_final_status() {
    let mut cmd = cli();
    cmd.arg("--format")
        .arg("json")
        .arg("simulate")
        .arg("--from")
        .arg("1")
        .arg("--algorithm")
        .arg("optimal");
    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["completed"], true);
    assert_eq!(value["final_status"]["total_distance"], 90.0);
    assert_eq!(value["steps"].as_array().map(Vec::len), Some(5));
}
