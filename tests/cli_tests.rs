//! CLI integration tests.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's real config and preferences.
fn maxbid(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("maxbid");
    cmd.arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("--preferences")
        .arg(dir.path().join("preferences.json"))
        .arg("--color")
        .arg("never")
        .env_remove("RUST_LOG");
    cmd
}

fn tempdir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

#[test]
fn test_help() {
    let dir = tempdir();
    maxbid(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("calc"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("fees"));
}

#[test]
fn calc_prints_max_bid() {
    let dir = tempdir();
    maxbid(&dir)
        .args([
            "calc", "--sell", "10000", "--repairs", "500", "--towing", "200", "-a", "iaa",
            "--no-save",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("$5,895.00"))
        .stdout(predicate::str::contains("IAA Fees: $905"));
}

#[test]
fn calc_json_reports_copart_breakdown() {
    let dir = tempdir();
    let output = maxbid(&dir)
        .args([
            "calc", "--sell", "10000", "--repairs", "500", "--towing", "200", "-a", "copart",
            "--no-save", "--json",
        ])
        .output()
        .expect("run maxbid");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(value["command"], "calc");
    assert_eq!(value["status"], "ok");
    assert_eq!(value["result"]["fee_info"]["breakdown"]["gate"], "79");
    let max_bid: f64 = value["result"]["max_bid"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("max_bid");
    assert!((max_bid - 5987.0).abs() < 0.01);
}

#[test]
fn calc_without_sell_price_asks_for_one() {
    let dir = tempdir();
    maxbid(&dir)
        .args(["calc", "--no-save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter an expected sell price"));
}

#[test]
fn calc_saves_inputs_for_next_run() {
    let dir = tempdir();
    maxbid(&dir)
        .args(["calc", "--sell", "10000", "--repairs", "500", "--towing", "200", "-a", "copart"])
        .assert()
        .success();

    let saved = fs::read_to_string(dir.path().join("preferences.json")).expect("saved prefs");
    assert!(saved.contains("copart"));
    assert!(saved.contains("10000"));

    maxbid(&dir)
        .args(["calc", "--no-save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("COPART"))
        .stdout(predicate::str::contains("$5,98"));
}

#[test]
fn calc_reports_outcome_at_your_bid() {
    let dir = tempdir();
    maxbid(&dir)
        .args(["calc", "--sell", "10000", "-a", "iaa", "--bid", "8000", "--no-save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("At your bid ($8,000.00)"));
}

#[test]
fn unknown_auction_is_rejected() {
    let dir = tempdir();
    maxbid(&dir)
        .args(["calc", "--sell", "10000", "-a", "manheim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown auction"));
}

#[test]
fn compare_lists_both_auctions() {
    let dir = tempdir();
    maxbid(&dir)
        .args(["compare", "--sell", "10000", "--repairs", "500", "--towing", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IAA"))
        .stdout(predicate::str::contains("COPART"))
        .stdout(predicate::str::contains("$5,895.00"));
}

#[test]
fn fees_at_hammer_price() {
    let dir = tempdir();
    maxbid(&dir)
        .args(["fees", "2000", "-a", "iaa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$840.00"));
}

#[test]
fn fees_table_lists_copart_steps() {
    let dir = tempdir();
    maxbid(&dir)
        .args(["fees", "-a", "copart"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copart bidding fee"))
        .stdout(predicate::str::contains("5.75% of hammer"));
}

#[test]
fn margins_lists_presets() {
    let dir = tempdir();
    maxbid(&dir)
        .arg("margins")
        .assert()
        .success()
        .stdout(predicate::str::contains("10%"))
        .stdout(predicate::str::contains("30%"))
        .stdout(predicate::str::contains("default"));
}

#[test]
fn prefs_set_show_reset() {
    let dir = tempdir();
    maxbid(&dir)
        .args(["prefs", "set", "-a", "copart", "-m", "15%"])
        .assert()
        .success();

    maxbid(&dir)
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("COPART"))
        .stdout(predicate::str::contains("15%"));

    maxbid(&dir)
        .args(["prefs", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preferences cleared"));
    assert!(!dir.path().join("preferences.json").exists());
}

#[test]
fn config_init_then_validate() {
    let dir = tempdir();
    maxbid(&dir).args(["config", "init"]).assert().success();
    maxbid(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file is valid"));
    maxbid(&dir).args(["config", "init"]).assert().failure();
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let dir = tempdir();
    fs::write(
        dir.path().join("config.toml"),
        "[defaults]\ntarget_margin = 1.5\n",
    )
    .expect("write config");

    let output = maxbid(&dir)
        .args(["calc", "--sell", "10000", "--no-save"])
        .output()
        .expect("run maxbid");
    assert!(!output.status.success(), "Expected nonzero exit code");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("target_margin"),
        "Expected error message about invalid config.\nstderr: {stderr}"
    );
}

#[test]
fn config_syntax_error_shows_diagnostic() {
    let dir = tempdir();
    fs::write(dir.path().join("config.toml"), "[defaults\nauction = \"iaa\"\n")
        .expect("write config");

    maxbid(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn verbose_run_logs_loaded_config() {
    let dir = tempdir();
    fs::write(dir.path().join("config.toml"), "[defaults]\nauction = \"iaa\"\n")
        .expect("write config");

    maxbid(&dir)
        .args(["-v", "calc", "--sell", "10000", "--no-save"])
        .assert()
        .success()
        .stderr(predicate::str::contains("configuration loaded"));
}

#[test]
fn oversized_bid_does_not_abort() {
    let dir = tempdir();
    maxbid(&dir)
        .args([
            "calc",
            "--sell",
            "1000",
            "--bid",
            "79000000000000000000000000000",
            "-a",
            "copart",
            "--no-save",
        ])
        .assert()
        .success();
}
