//! CLI surface tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn tradelog() -> Command {
    Command::cargo_bin("tradelog").unwrap()
}

#[test]
fn help_lists_subcommands() {
    tradelog()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("login")
                .and(predicate::str::contains("logout"))
                .and(predicate::str::contains("trades"))
                .and(predicate::str::contains("stats")),
        );
}

#[test]
fn version_prints_package_name() {
    tradelog()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tradelog"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    tradelog()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized"));
}

#[test]
fn stats_against_unreachable_backend_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("tradelog.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
            [api]
            base_url = "http://127.0.0.1:1/api"

            [auth]
            credentials_file = "{}"
            "#,
            dir.path().join("credentials.json").display()
        ),
    )
    .unwrap();

    tradelog()
        .arg("--config")
        .arg(&config_path)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("tradelog.toml");
    std::fs::write(&config_path, "this is not toml = [").unwrap();

    tradelog()
        .arg("--config")
        .arg(&config_path)
        .arg("logout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
