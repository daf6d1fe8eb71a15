//! Offline CLI behavior: help text, local validation, session state.

mod support;

use predicates::prelude::*;
use serde_json::Value;

use support::td_cmd;

const OFFLINE_API: &str = "http://127.0.0.1:1/api";

#[test]
fn help_describes_the_tool() {
    let dir = tempfile::tempdir().expect("tempdir");
    td_cmd(dir.path(), OFFLINE_API)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Task Dashboard"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("task"));
}

#[test]
fn task_help_lists_subcommands() {
    let dir = tempfile::tempdir().expect("tempdir");
    td_cmd(dir.path(), OFFLINE_API)
        .args(["task", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ls"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("toggle"))
        .stdout(predicate::str::contains("rm"));
}

#[test]
fn register_with_invalid_email_fails_locally() {
    let dir = tempfile::tempdir().expect("tempdir");
    td_cmd(dir.path(), OFFLINE_API)
        .args(["register", "Alice", "not-an-email", "secret1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Please enter a valid email address"));
}

#[test]
fn login_with_short_password_fails_locally() {
    let dir = tempfile::tempdir().expect("tempdir");
    td_cmd(dir.path(), OFFLINE_API)
        .args(["login", "a@x.com", "short"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains(
            "Password must be at least 6 characters",
        ));
}

#[test]
fn task_commands_require_a_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    td_cmd(dir.path(), OFFLINE_API)
        .args(["task", "ls"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn whoami_reports_session_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    td_cmd(dir.path(), OFFLINE_API)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("not logged in"));

    std::fs::write(dir.path().join("session"), "tok-1\n").expect("seed session");
    td_cmd(dir.path(), OFFLINE_API)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("logged in"));
}

#[test]
fn whoami_json_envelope_has_schema_and_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = td_cmd(dir.path(), OFFLINE_API)
        .args(["whoami", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("whoami json");
    assert_eq!(value["schema_version"], "td.v1");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["logged_in"], false);
}

#[test]
fn logout_without_session_succeeds() {
    let dir = tempfile::tempdir().expect("tempdir");
    td_cmd(dir.path(), OFFLINE_API)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("no active session"));
}

#[test]
fn unreachable_backend_is_an_operation_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("session"), "tok-1\n").expect("seed session");
    td_cmd(dir.path(), OFFLINE_API)
        .args(["task", "ls"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains(
            "Network error. Please check your connection.",
        ));
}

#[test]
fn error_json_carries_message_and_kind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = td_cmd(dir.path(), OFFLINE_API)
        .args(["task", "ls", "--json"])
        .assert()
        .failure()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("error json");
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["kind"], "user_error");
    assert_eq!(
        value["error"]["message"],
        "Not logged in. Run `td login` first."
    );
}
