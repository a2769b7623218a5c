//! Tests for the sections preview.

use crate::support::*;

#[test]
fn test_sections_lists_keys_in_file_order() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.sections();
    assert_success(&output);

    let out = stdout(&output);
    let db = out.find("database (3 fields)").expect("database missing");
    let redis = out.find("redis (1 field)").expect("redis missing");
    let jwt = out.find("jwt (1 field)").expect("jwt missing");
    assert!(db < redis && redis < jwt);

    assert_stdout_contains(&output, "Database settings");
    assert_stdout_contains(&output, "db_password");
}

#[test]
fn test_sections_never_prints_values() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.sections();
    assert_success(&output);
    assert_stdout_excludes(&output, "s3cr3t-pa55");
    assert_stdout_excludes(&output, "super-secret-jwt-token");
}

#[test]
fn test_sections_reports_skipped_lines() {
    let t = Test::with_env(NOISY_ENV);

    let output = t.sections();
    assert_success(&output);

    assert_stdout_contains(&output, "app (1 field)");
    assert_stdout_contains(&output, "Skipped lines");
    assert_stdout_contains(&output, "line 1: ORPHAN is outside any section");
    assert_stdout_contains(&output, "line 4: not a key=value line: not a pair");
    assert_stdout_contains(&output, "line 5: looks like a section header");
    assert_stdout_contains(&output, "line 6: LOST is outside any section");
}

#[test]
fn test_sections_without_headers() {
    let t = Test::with_env(FLAT_ENV);

    let output = t.sections();
    assert_success(&output);
    assert_stdout_contains(&output, "no sections found");
    assert_stdout_contains(&output, "# :database - Database settings");
}

#[test]
fn test_sections_custom_env_file() {
    let t = Test::new();
    t.write("prod.env", "# :api - API\nAPI_KEY=abc\n");

    let output = t
        .cmd()
        .args(["--env-file", "prod.env", "sections"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "api (1 field)");
}

#[test]
fn test_sections_missing_file_fails() {
    let t = Test::new();

    let output = t.sections();
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot read .env");
}
