//! Error types.
//!
//! Errors are grouped by the layer that raises them and folded into a single
//! top-level [`Error`] through `#[from]` conversions, so `?` works across
//! layers while callers can still match on the specific failure.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("no secret stored at {mount}/{key}")]
    SectionNotFound { mount: String, key: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    ReadEnv {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no vault credential: set VAULT_ROOT_TOKEN or VAULT_APP_TOKEN")]
    MissingToken,

    #[error("invalid vault address '{0}': expected http:// or https://")]
    InvalidAddress(String),

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Secret store errors.
///
/// Every variant names the operation that failed so reports can say which
/// call went wrong without extra context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("vault unreachable during {operation}: {reason}")]
    Unreachable {
        operation: &'static str,
        reason: String,
    },

    #[error("vault rejected the credential during {operation} on {path}")]
    Auth {
        operation: &'static str,
        path: String,
    },

    #[error("{operation} failed on {path} (status {status}): {message}")]
    OperationFailed {
        operation: &'static str,
        path: String,
        status: u16,
        message: String,
    },

    #[error("unexpected response for {operation} on {path}: {reason}")]
    Decode {
        operation: &'static str,
        path: String,
        reason: String,
    },
}

/// Bootstrap errors.
///
/// Steps completed before the failure are left in place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    #[error("cannot enable mount '{mount}': {source}")]
    Mount {
        mount: String,
        #[source]
        source: StoreError,
    },

    #[error("cannot write policy '{name}': {source}")]
    PolicyWrite {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("cannot create token for policy '{policy}': {source}")]
    TokenCreate {
        policy: String,
        #[source]
        source: StoreError,
    },
}

/// Sync errors that abort the whole run or mark it failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("vault not ready after {attempts} attempt(s)")]
    Unreachable { attempts: u32 },

    #[error("bootstrap failed: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("writing section '{section}' failed: {source}")]
    Auth {
        section: String,
        #[source]
        source: StoreError,
    },

    #[error("{failed} of {total} section(s) failed to write")]
    SectionsFailed { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
