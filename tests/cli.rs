use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_usage_and_keys() {
    let mut cmd = Command::cargo_bin("sqed").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE"))
        .stdout(predicate::str::contains("Visual mode"))
        .stdout(predicate::str::contains("--line-numbers"));
}

#[test]
fn test_version_prints_package_version() {
    let mut cmd = Command::cargo_bin("sqed").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_file_fails_with_message() {
    let mut cmd = Command::cargo_bin("sqed").unwrap();
    cmd.arg("/no/such/file.sql")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
