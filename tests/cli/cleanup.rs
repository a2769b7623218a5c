//! Tests for cleanup.

use crate::support::*;

#[test]
fn test_cleanup_removes_artifacts() {
    let t = Test::with_env(SAMPLE_ENV);
    t.write("tmp-database-secrets.json", "{}");
    t.write("tmp-thothix-app-policy.hcl", "path \"x\" {}");

    let output = t.cleanup();
    assert_success(&output);
    assert_stdout_contains(&output, "removed");

    assert!(!t.exists("tmp-database-secrets.json"));
    assert!(!t.exists("tmp-thothix-app-policy.hcl"));
    assert!(t.exists(".env"));
}

#[test]
fn test_cleanup_leaves_other_files() {
    let t = Test::new();
    t.write("secrets.json", "{}");
    t.write("tmp-notes.txt", "");

    let output = t.cleanup();
    assert_success(&output);
    assert_stdout_contains(&output, "nothing to clean");
    assert!(t.exists("secrets.json"));
    assert!(t.exists("tmp-notes.txt"));
}

#[test]
fn test_cleanup_other_directory() {
    let t = Test::new();
    std::fs::create_dir(t.dir.path().join("build")).unwrap();
    t.write("build/tmp-redis-secrets.json", "{}");

    let output = t
        .cmd()
        .args(["cleanup", "--yes", "--dir", "build"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(!t.exists("build/tmp-redis-secrets.json"));
}
