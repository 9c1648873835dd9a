use assert_cmd::Command;
use predicates::prelude::*;

fn mala_counter() -> Command {
    let mut cmd = Command::cargo_bin("mala-counter").unwrap();
    cmd.env_remove("MALA_COUNTER_ENDPOINT");
    cmd
}

#[test]
fn test_cli_help() {
    mala_counter()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mantra recitation counter"));
}

#[test]
fn test_cli_serve_help() {
    mala_counter().arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_items_lists_every_deity() {
    mala_counter()
        .arg("items")
        .assert()
        .success()
        .stdout(predicate::str::contains("amitabha"))
        .stdout(predicate::str::contains("Green Tara Mantra"))
        .stdout(predicate::str::contains("35 Confessions Mantra"));
}

#[test]
fn test_cli_rejects_unknown_deity() {
    mala_counter()
        .args(["add", "ganesha", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid deity ID"));
}

#[test]
fn test_cli_rejects_unknown_export_format() {
    mala_counter().args(["export", "csv"]).assert().failure();
}

#[test]
fn test_cli_reset_all_requires_confirmation() {
    mala_counter()
        .args(["reset-all", "--endpoint", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_cli_reports_unreachable_server() {
    mala_counter()
        .args(["show", "--endpoint", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("backend unavailable"));
}
