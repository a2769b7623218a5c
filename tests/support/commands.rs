//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Address where nothing listens; port 1 refuses connections.
pub const UNREACHABLE_ADDR: &str = "http://127.0.0.1:1";

impl Test {
    /// Create a thothix-vault command isolated from the caller's environment.
    ///
    /// Returns a Command configured with:
    /// - Current directory set to the test directory
    /// - `VAULT_*`, `ENVIRONMENT`, `NODE_ENV` and the log filter cleared
    /// - `NO_COLOR` set so output can be matched as plain text
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd =
            Command::cargo_bin("thothix-vault").expect("failed to find thothix-vault binary");
        for var in [
            "VAULT_ADDR",
            "VAULT_TOKEN",
            "VAULT_MOUNT",
            "ENVIRONMENT",
            "NODE_ENV",
            "THOTHIX_VAULT_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `thothix-vault sections`.
    pub fn sections(&self) -> Output {
        self.cmd()
            .arg("sections")
            .output()
            .expect("failed to run thothix-vault sections")
    }

    /// Shortcut for `thothix-vault sync --dry-run` with extra args.
    pub fn sync_dry_run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(["sync", "--dry-run"])
            .args(args)
            .output()
            .expect("failed to run thothix-vault sync --dry-run")
    }

    /// Shortcut for `thothix-vault init --dry-run` with extra args.
    pub fn init_dry_run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(["init", "--dry-run"])
            .args(args)
            .output()
            .expect("failed to run thothix-vault init --dry-run")
    }

    /// Run `args` against an address with nothing listening, one quick probe.
    pub fn unreachable(&self, args: &[&str]) -> Output {
        self.cmd()
            .args([
                "--addr",
                UNREACHABLE_ADDR,
                "--retries",
                "1",
                "--retry-interval-ms",
                "0",
            ])
            .args(args)
            .output()
            .expect("failed to run thothix-vault")
    }

    /// Shortcut for `thothix-vault cleanup --yes`.
    pub fn cleanup(&self) -> Output {
        self.cmd()
            .args(["cleanup", "--yes"])
            .output()
            .expect("failed to run thothix-vault cleanup")
    }
}
