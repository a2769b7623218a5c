//! Test support utilities for thothix-vault integration tests.
//!
//! Provides an isolated working directory per test and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated working directory.
///
/// Child processes run with `.current_dir()` set to the temp dir and with
/// every `VAULT_*` variable cleared, so tests can run in parallel and never
/// reach a real Vault by accident.
pub struct Test {
    /// Temporary directory holding the `.env` file
    pub dir: TempDir,
}

impl Test {
    /// Create an empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment with `.env` set to `contents`.
    pub fn with_env(contents: &str) -> Self {
        let t = Self::new();
        t.write_env(contents);
        t
    }

    /// Overwrite `.env`.
    pub fn write_env(&self, contents: &str) {
        self.write(".env", contents);
    }

    /// Write a file relative to the test directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write test file");
        path
    }

    /// Whether a file exists relative to the test directory.
    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }
}
