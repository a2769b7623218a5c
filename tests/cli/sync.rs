//! Tests for sync.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_dry_run_writes_every_section() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.sync_dry_run(&[]);
    assert_success(&output);

    assert_stdout_contains(&output, "in-memory (dry run)");
    assert_stdout_contains(&output, "database (3 fields), version 1");
    assert_stdout_contains(&output, "redis (1 field), version 1");
    assert_stdout_contains(&output, "jwt (1 field), version 1");
    assert_stdout_contains(&output, "3 written, 0 failed, 0 unverified");
}

#[test]
fn test_dry_run_masks_values() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.sync_dry_run(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "db_password = ");
    assert_stdout_contains(&output, "fingerprint ");
    assert_stdout_excludes(&output, "s3cr3t-pa55");
}

#[test]
fn test_show_values_prints_normalized_values() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.sync_dry_run(&["--show-values"]);
    assert_success(&output);
    assert_stdout_contains(&output, "db_password = s3cr3t-pa55");
    assert_stdout_contains(&output, "redis_url = redis://localhost:6379");
    // Later duplicate wins.
    assert_stdout_contains(&output, "jwt_secret = super-secret-jwt-token");
    assert_stdout_excludes(&output, "jwt_secret = first");
}

#[test]
fn test_dry_run_needs_no_token() {
    let t = Test::with_env("# :app - App\nNAME=thothix\n");

    t.cmd()
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 written"));
}

#[test]
fn test_mount_flag_is_used() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.sync_dry_run(&["--mount", "apps"]);
    assert_success(&output);
    assert_stdout_contains(&output, "mount:  apps");
}

#[test]
fn test_no_sections_is_not_an_error() {
    let t = Test::with_env(FLAT_ENV);

    let output = t.sync_dry_run(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "no sections found");
}

#[test]
fn test_sync_without_token_fails() {
    let t = Test::with_env("# :app - App\nNAME=thothix\n");

    t.cmd()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no vault credential"));
}

#[test]
fn test_sync_unreachable_store_fails() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.unreachable(&["--token", "test-token", "sync"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "vault not ready after 1 attempt(s)");
    assert_stdout_excludes(&output, "written");
}

#[test]
fn test_root_token_from_env_file_is_used() {
    // Credential and address both come from the .env file; the probe fails,
    // proving a real store was opened rather than a missing-token error.
    let t = Test::with_env(
        "VAULT_ADDR=http://127.0.0.1:1\nVAULT_ROOT_TOKEN=root\n# :app - App\nNAME=x\n",
    );

    let output = t
        .cmd()
        .args(["--retries", "1", "--retry-interval-ms", "0", "sync"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "vault not ready");
}

#[test]
fn test_invalid_mount_is_rejected() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.sync_dry_run(&["--mount", "bad mount"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid mount");
}
