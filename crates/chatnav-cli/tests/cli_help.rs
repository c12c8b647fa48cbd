use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_commands_and_options() {
    cargo_bin_cmd!("chatnav")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--sessions"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("chatnav")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_navigator_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("chatnav")
        .env("CHATNAV_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));

    assert!(dir.path().join("logs").is_dir());
}
