//! Basic CLI tests for dv
//!
//! Tests for command-line argument parsing, help output, version display,
//! and error handling for invalid inputs.

use predicates::prelude::*;

use super::{dv, write_deck, COMPLETE_DECK};

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    dv().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("dv [OPTIONS] DECK"))
        .stdout(predicate::str::contains("--references"));
}

#[test]
fn help_short_flag_shows_usage() {
    dv().arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"));
}

#[test]
fn version_flag_shows_version() {
    dv().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_short_flag_shows_version() {
    dv().arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Invalid Options (Exit Code 3)
// =============================================================================

#[test]
fn unknown_option_returns_exit_code_3() {
    dv().arg("--unknown-option")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown option"));
}

#[test]
fn missing_deck_returns_exit_code_3() {
    dv().assert()
        .code(3)
        .stderr(predicate::str::contains("No deck file"));
}

#[test]
fn invalid_policy_returns_exit_code_3() {
    dv().args(["--policy", "bounce", "deck.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("policy"));
}

#[test]
fn invalid_policy_env_returns_exit_code_3() {
    dv().env("DECKVIEW_POLICY", "sideways")
        .arg("deck.toml")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("DECKVIEW_POLICY"));
}

#[test]
fn slide_without_value_returns_exit_code_3() {
    dv().args(["deck.toml", "--slide"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn invalid_format_value_returns_exit_code_3() {
    dv().args(["--references", "--format", "yaml", "deck.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("format"));
}

// =============================================================================
// Runtime Errors (Exit Code 2)
// =============================================================================

#[test]
fn nonexistent_deck_returns_exit_code_2() {
    dv().arg("/nonexistent/deck/that/does/not/exist.toml")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exist.toml"));
}

#[test]
fn empty_deck_returns_exit_code_2() {
    let (_temp, path) = write_deck("case_medium = \"HUD\"\n");
    dv().arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no slides"));
}

#[test]
fn malformed_deck_returns_exit_code_2() {
    let (_temp, path) = write_deck("[[slides]\ntitle = ");
    dv().arg("--check")
        .arg(&path)
        .assert()
        .code(2);
}

// =============================================================================
// Logging
// =============================================================================

#[test]
fn log_file_receives_output() {
    let (temp, path) = write_deck(COMPLETE_DECK);
    let log = temp.path().join("dv.log");
    dv().arg("--check")
        .arg(&path)
        .arg("--log-file")
        .arg(&log)
        .assert()
        .success();
    assert!(log.exists());
}

#[test]
fn broken_config_is_reported_on_stderr_and_in_log() {
    let (temp, path) = write_deck(COMPLETE_DECK);
    let config_home = temp.path().join("config");
    std::fs::create_dir_all(config_home.join("deckview")).unwrap();
    std::fs::write(config_home.join("deckview/config.toml"), "[ui\nbroken").unwrap();
    let log = temp.path().join("dv.log");

    dv().env("XDG_CONFIG_HOME", &config_home)
        .arg("--check")
        .arg(&path)
        .arg("--log-file")
        .arg(&log)
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring config file"));

    let logged = std::fs::read_to_string(&log).unwrap();
    assert!(logged.contains("ignoring config file"));
}
