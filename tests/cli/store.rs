//! Tests for commands that talk to the store directly.

use crate::support::*;

#[test]
fn test_status_unreachable_fails() {
    let t = Test::new();

    let output = t.unreachable(&["--token", "t", "status"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "vault not ready after 1 attempt(s)");
    assert_stdout_contains(&output, "addr:  http://127.0.0.1:1");
}

#[test]
fn test_status_without_token_fails() {
    let t = Test::new();

    let output = t.cmd().arg("status").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "no vault credential");
    assert_stdout_contains(&output, "VAULT_ROOT_TOKEN");
}

#[test]
fn test_get_unreachable_fails() {
    let t = Test::new();

    let output = t.unreachable(&["--token", "t", "get", "database"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "vault unreachable during read secret");
}

#[test]
fn test_invalid_address_is_rejected() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--addr", "localhost:8200", "--token", "t", "status"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid vault address");
}
