//! Integration tests for the CLI commands

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn scratch_settings(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("quizsnap-cli-{}-{}.json", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn test_version_command() {
    let mut cmd = cargo_bin_cmd!("quizsnap");
    cmd.arg("version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("quizsnap "));
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("quizsnap");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("quizsnap "));
}

#[test]
fn test_classify_multiple_choice() {
    let mut cmd = cargo_bin_cmd!("quizsnap");
    cmd.args(["classify", "• Paris\n• London\nExplanation: both are capitals"]);

    cmd.assert()
        .success()
        .stdout("multiple_choice\nParis\nLondon\n");
}

#[test]
fn test_classify_reads_stdin() {
    let mut cmd = cargo_bin_cmd!("quizsnap");
    cmd.arg("classify").write_stdin("A → 2\nB → 1\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("match\nA → 2\nB → 1"));
}

#[test]
fn test_select_dry_run() {
    let settings = scratch_settings("select");
    let mut cmd = cargo_bin_cmd!("quizsnap");
    cmd.arg("select")
        .arg("--tokens")
        .arg(fixture("capitals.json"))
        .arg("--settings")
        .arg(&settings)
        .args(["--force", "--no-pacing", "• Paris\n• London"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("clicked (210, 210)"))
        .stdout(predicate::str::contains("clicked (210, 290)"))
        .stdout(predicate::str::contains("selected 2 of 2 answer(s)"));
    let _ = std::fs::remove_file(&settings);
}

#[test]
fn test_select_respects_switch() {
    let settings = scratch_settings("switch-off");
    let mut cmd = cargo_bin_cmd!("quizsnap");
    cmd.arg("select")
        .arg("--tokens")
        .arg(fixture("capitals.json"))
        .arg("--settings")
        .arg(&settings)
        .arg("Paris");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("nothing clicked"));
    let _ = std::fs::remove_file(&settings);
}

#[test]
fn test_auto_select_toggle_persists() {
    let settings = scratch_settings("toggle");
    let mut cmd = cargo_bin_cmd!("quizsnap");
    cmd.arg("auto-select").arg("on").arg("--settings").arg(&settings);
    cmd.assert().success().stdout(predicate::str::starts_with("auto-select on"));

    let saved = std::fs::read_to_string(&settings).unwrap();
    assert!(saved.contains("\"auto_select_enabled\": true"), "{}", saved);

    let mut cmd = cargo_bin_cmd!("quizsnap");
    cmd.arg("select")
        .arg("--tokens")
        .arg(fixture("capitals.json"))
        .arg("--settings")
        .arg(&settings)
        .args(["--no-pacing", "Milan"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("clicked (210, 330)"));
    let _ = std::fs::remove_file(&settings);
}

#[test]
fn test_select_requires_a_screen() {
    let mut cmd = cargo_bin_cmd!("quizsnap");
    cmd.args(["select", "Paris"]);
    cmd.assert().failure();
}

#[cfg(not(feature = "live"))]
#[test]
fn test_live_select_needs_feature() {
    let settings = scratch_settings("live");
    let mut cmd = cargo_bin_cmd!("quizsnap");
    cmd.arg("select")
        .arg("--live")
        .arg("--settings")
        .arg(&settings)
        .args(["--force", "Paris"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("`live` feature"));
    let _ = std::fs::remove_file(&settings);
}

#[test]
fn test_live_conflicts_with_recorded_tokens() {
    let mut cmd = cargo_bin_cmd!("quizsnap");
    cmd.arg("select")
        .arg("--live")
        .arg("--tokens")
        .arg(fixture("capitals.json"))
        .arg("Paris");
    cmd.assert().failure();
}
