//! Constants used throughout thothix-vault.
//!
//! Centralizes defaults, file names and fixed bootstrap parameters.

use std::time::Duration;

/// Environment variables file name (.env).
pub const ENV_FILE: &str = ".env";

/// Vault address used when none is configured.
pub const DEFAULT_ADDR: &str = "http://localhost:8200";

/// KV v2 mount that sections are published under.
pub const DEFAULT_MOUNT: &str = "thothix";

/// Environment label used when neither ENVIRONMENT nor NODE_ENV is set.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Per-request timeout for the HTTP gateway.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Readiness attempts for a plain sync.
pub const SYNC_READY_ATTEMPTS: u32 = 3;

/// Spacing between readiness attempts for a plain sync.
pub const SYNC_READY_INTERVAL: Duration = Duration::from_secs(1);

/// Readiness attempts for init; the store may still be starting.
pub const INIT_READY_ATTEMPTS: u32 = 30;

/// Spacing between readiness attempts for init.
pub const INIT_READY_INTERVAL: Duration = Duration::from_secs(5);

/// App token lifetime (one year).
pub const APP_TOKEN_TTL: Duration = Duration::from_secs(8760 * 3600);

/// Readonly token lifetime (one week).
pub const READONLY_TOKEN_TTL: Duration = Duration::from_secs(168 * 3600);

/// Leftover file patterns removed by `cleanup`, as (prefix, suffix) pairs.
pub const TEMP_ARTIFACT_PATTERNS: &[(&str, &str)] =
    &[("tmp-", "-secrets.json"), ("tmp-", "-policy.hcl")];

/// Settings keys read from the .env file.
pub mod keys {
    pub const ADDR: &str = "VAULT_ADDR";
    pub const ROOT_TOKEN: &str = "VAULT_ROOT_TOKEN";
    pub const APP_TOKEN: &str = "VAULT_APP_TOKEN";
    pub const MOUNT: &str = "VAULT_MOUNT";
}
