//! Tests for init.

use crate::support::*;

#[test]
fn test_init_dry_run_prints_tokens() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.init_dry_run(&[]);
    assert_success(&output);

    assert_stdout_contains(&output, "Initializing Vault");
    assert_stdout_contains(&output, "Tokens");
    assert_stdout_contains(&output, "thothix-app-token-development");
    assert_stdout_contains(&output, "thothix-readonly-token-development");
    assert_stdout_contains(&output, "VAULT_APP_TOKEN=mem.thothix-app.1");
    assert_stdout_contains(&output, "3 written");
}

#[test]
fn test_init_warns_about_new_tokens() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.init_dry_run(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "each init mints new tokens");
}

#[test]
fn test_environment_label_in_token_names() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.init_dry_run(&["--environment", "staging"]);
    assert_success(&output);
    assert_stdout_contains(&output, "thothix-app-token-staging");
    assert_stdout_contains(&output, "environment:  staging");
}

#[test]
fn test_node_env_fallback() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t
        .cmd()
        .env("NODE_ENV", "production")
        .args(["init", "--dry-run"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "thothix-app-token-production");
}

#[test]
fn test_mount_names_policies() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.init_dry_run(&["--mount", "acme"]);
    assert_success(&output);
    assert_stdout_contains(&output, "policy acme-app");
    assert_stdout_contains(&output, "policy acme-readonly");
}

#[test]
fn test_init_unreachable_store_fails() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.unreachable(&["--token", "root", "init"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "vault not ready after 1 attempt(s)");
    assert_stdout_excludes(&output, "Tokens");
}
