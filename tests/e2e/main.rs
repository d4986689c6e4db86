//! End-to-end tests for the dv binary

mod cli_basic;
mod references;

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

pub fn dv() -> Command {
    let mut cmd = Command::cargo_bin("dv").unwrap();
    // Keep the user's own config.toml out of the tests
    cmd.env_remove("DECKVIEW_POLICY")
        .env_remove("DECKVIEW_LOG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", std::env::temp_dir().join("deckview-e2e-no-config"));
    cmd
}

pub const COMPLETE_DECK: &str = r#"
case_medium = "Instagram Stories HUD"
micro_evidence = ["Tap-to-advance removes chrome"]

[key_arguments]
bg_throughline = "Immediacy requires hypermediacy"

[[quotes]]
author = "A"
work = "W"
year = 1999
cite = "p.1"
text = "first"

[[quotes]]
author = "B"
work = "X"
year = 2000
cite = "p.2"
text = "second"

[[slides]]
title = "Opening"

[[slides]]
title = "References"
kind = "references"
"#;

/// Write `content` as deck.toml in a fresh temp dir
pub fn write_deck(content: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("deck.toml");
    std::fs::write(&path, content).unwrap();
    (temp, path)
}
