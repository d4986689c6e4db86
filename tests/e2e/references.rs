//! Tests for the non-interactive modes: --references and --check

use predicates::prelude::*;

use super::{dv, write_deck, COMPLETE_DECK};

// =============================================================================
// Reference Export
// =============================================================================

#[test]
fn references_prints_exact_list() {
    let (_temp, path) = write_deck(COMPLETE_DECK);
    dv().arg("--references")
        .arg(&path)
        .assert()
        .success()
        .stdout("References:\n\nA. W. 1999. p.1.\nB. X. 2000. p.2.\n");
}

#[test]
fn references_json_format() {
    let (_temp, path) = write_deck(COMPLETE_DECK);
    let output = dv()
        .args(["--references", "--format", "json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    assert_eq!(parsed[1]["author"], "B");
    assert_eq!(parsed[1]["cite"], "p.2");
}

#[test]
fn references_on_missing_deck_fails() {
    dv().args(["--references", "/nonexistent/deck.toml"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

// =============================================================================
// Deck Check
// =============================================================================

#[test]
fn check_complete_deck_succeeds() {
    let (_temp, path) = write_deck(COMPLETE_DECK);
    dv().arg("--check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 2 slides, 2 quotes"));
}

#[test]
fn check_reports_missing_fields_with_exit_code_1() {
    let (_temp, path) = write_deck(
        r#"
[[slides]]
title = "Only"

[[slides.chips]]
label = "dangling"
quote = 3
"#,
    );
    dv().arg("--check")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing: case_medium"))
        .stdout(predicate::str::contains("missing: quotes"))
        .stdout(predicate::str::contains("missing: slides[0].chips[0].quote"));
}

#[test]
fn sample_deck_is_complete() {
    let deck = concat!(env!("CARGO_MANIFEST_DIR"), "/decks/remediation.toml");
    dv().args(["--check", deck])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 12 slides, 6 quotes"));
}
