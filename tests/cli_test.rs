mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const FIXTURES: &str = "tests/fixtures/emulator";

fn emulated() -> Command {
    let mut cmd = Command::new(cargo_bin!("tjleasing"));
    cmd.env_remove("RUST_LOG")
        .arg("--url")
        .arg("http://emulated.invalid")
        .arg("--user")
        .arg("user")
        .arg("--password")
        .arg("secret")
        .arg("--emulator-root")
        .arg(FIXTURES);
    cmd
}

#[test]
fn test_cli_online_check_end_to_end() {
    let mut cmd = emulated();
    cmd.arg("online-check").arg("10 01");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("account=1001"))
        .stdout(predicate::str::contains("error_code=0"))
        .stdout(predicate::str::contains("debt=150.00"))
        .stdout(predicate::str::contains("name=Иванов"))
        .stderr(predicate::str::contains("EMULATION MODE"));
}

#[test]
fn test_cli_online_check_with_template() {
    let mut cmd = emulated();
    cmd.arg("online-check")
        .arg("--template")
        .arg("SUM={1};ID={0}")
        .arg("777")
        .arg("10");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("account=777"))
        .stdout(predicate::str::contains("error_code=711"))
        .stdout(predicate::str::contains("debt=").not());
}

#[test]
fn test_cli_pay_completed() {
    let mut cmd = emulated();
    cmd.arg("pay").arg("1001").arg("150.00");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("amount=150.00"))
        .stdout(predicate::str::contains("state=Completed"));
}

#[test]
fn test_cli_pay_rejected_by_check() {
    let mut cmd = emulated();
    cmd.arg("pay").arg("42").arg("5");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("error_code=711"))
        .stdout(predicate::str::contains("state=Initialized"));
}

#[test]
fn test_cli_pay_unknown_outcome() {
    let dir = tempfile::tempdir().unwrap();
    common::write_canned(dir.path(), "GetToken.txt", 200, r#"{"access_token":"t"}"#);
    common::write_canned(
        dir.path(),
        "GetClient.txt",
        200,
        r#"{"debt":{"debt":10},"result":{"name":"Petrov"}}"#,
    );
    common::write_canned(dir.path(), "Payment.txt", 503, "Service Unavailable");

    let mut cmd = Command::new(cargo_bin!("tjleasing"));
    cmd.arg("--url")
        .arg("http://emulated.invalid")
        .arg("--emulator-root")
        .arg(dir.path())
        .arg("pay")
        .arg("55")
        .arg("10");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("state=Unknown"));
}

#[test]
fn test_cli_check_settings_without_test_account() {
    let mut cmd = emulated();
    cmd.arg("check-settings");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("settings=failed"));
}

#[test]
fn test_cli_check_settings_with_test_account() {
    let mut cmd = emulated();
    cmd.arg("--test-account").arg("1001").arg("check-settings");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("settings=ok"));
}

#[test]
fn test_cli_rejects_negative_amount() {
    let mut cmd = emulated();
    cmd.arg("pay").arg("1001").arg("-5");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("must not be negative"));
}

#[test]
fn test_cli_pay_rejects_smuggled_parameters() {
    let mut cmd = emulated();
    cmd.arg("pay").arg("1;ID=1001").arg("5");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("state=").not())
        .stderr(predicate::str::contains("must not contain"));
}

#[test]
fn test_cli_rejects_invalid_url() {
    let mut cmd = Command::new(cargo_bin!("tjleasing"));
    cmd.arg("--url").arg("lizing.local").arg("check-settings");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("http or https"));
}
