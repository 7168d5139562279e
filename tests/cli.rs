use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn gramfix() -> Command {
    Command::cargo_bin("gramfix").unwrap()
}

#[test]
fn fails_without_input() {
    gramfix()
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input specified"));
}

#[test]
fn langs_lists_translation_targets() {
    gramfix()
        .arg("langs")
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("de  German"))
        .stdout(predicate::str::contains("ja  Japanese"))
        .stdout(predicate::str::contains("none"));
}

#[test]
fn rejects_unknown_translation_target() {
    gramfix()
        .args(["--translate", "tlh", "--text", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown translation target"));
}

#[test]
fn interactive_requires_fix() {
    gramfix()
        .args(["--interactive", "somefile.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--fix"));
}

#[test]
fn generates_shell_completions() {
    gramfix()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gramfix"));
}

#[test]
fn missing_file_is_reported_but_not_fatal() {
    gramfix()
        .args(["--no-color", "definitely-not-here.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("File not found"))
        .stdout(predicate::str::contains("No grammar issues found"));
}

// The endpoint is unroutable so any path that slips past the enabled gate
// errors out instead of silently reaching the public service.
const DISABLED_CONFIG: &str =
    "enabled = false\ngrammar_endpoint = \"http://127.0.0.1:9/v2/check\"\n";

#[test]
fn disabled_config_skips_checking() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".gramfix.toml"), DISABLED_CONFIG).unwrap();
    fs::write(dir.path().join("note.txt"), "Helo wrld\n").unwrap();

    gramfix()
        .current_dir(dir.path())
        .args(["--no-color", "note.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No grammar issues found"));
}

#[test]
fn disabled_config_echoes_text_mode_input() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".gramfix.toml"), DISABLED_CONFIG).unwrap();

    gramfix()
        .current_dir(dir.path())
        .args(["--no-color", "--text", "Helo wrld"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Helo wrld"));
}

#[test]
fn disabled_config_passes_stdin_through() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".gramfix.toml"), DISABLED_CONFIG).unwrap();

    gramfix()
        .current_dir(dir.path())
        .arg("-")
        .write_stdin("Helo wrld\n")
        .assert()
        .success()
        .stdout(predicate::str::diff("Helo wrld\n"));
}
