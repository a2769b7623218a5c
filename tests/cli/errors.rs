//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    for command in ["sync", "init", "sections", "get", "status", "cleanup"] {
        assert_stdout_contains(&output, command);
    }
}

#[test]
fn test_no_command_fails() {
    let t = Test::new();

    let output = t.cmd().output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.cmd().args(["--verbose", "sections"]).output().unwrap();
    assert_success(&output);
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t
        .cmd()
        .args(["--verbose", "sync", "--dry-run"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "section written");
    // Secret values never reach the log.
    let err = stderr(&output);
    assert!(!err.contains("s3cr3t-pa55"), "value leaked into logs: {}", err);
}

#[test]
fn test_completions() {
    let t = Test::new();

    for shell in ["bash", "zsh", "fish", "power-shell"] {
        let output = t.cmd().args(["completions", shell]).output().unwrap();
        assert_success(&output);
        assert_stdout_contains(&output, "thothix-vault");
    }
}

#[test]
fn test_json_logs() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t
        .cmd()
        .args(["--verbose", "--log-json", "sync", "--dry-run"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "\"level\":\"INFO\"");
    assert_stderr_contains(&output, "section written");
}
