//! Secret store access.
//!
//! Everything the sync engine needs from the secret store goes through the
//! [`SecretStore`] trait. Two implementations ship with the crate:
//!
//! - [`HttpStore`]: talks to a running Vault over its HTTP API
//! - [`MemoryStore`]: in-process store used for dry runs and tests
//!
//! ## Adding a New Store
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module and wire it into [`open`]

use std::fmt;

use crate::core::domain::{IssuedToken, Policy, SecretDocument, TokenRequest};
use crate::error::StoreError;

mod backend;
mod http;
mod memory;

pub use backend::open;
pub use http::HttpStore;
pub use memory::{Call, MemoryStore};

/// Result type for store calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Secrets engine kinds that can be mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountKind {
    /// Versioned key/value engine
    KvV2,
}

impl MountKind {
    /// Engine type as the store names it.
    pub fn engine_type(self) -> &'static str {
        match self {
            Self::KvV2 => "kv",
        }
    }

    /// Engine version option, if any.
    pub fn version(self) -> Option<&'static str> {
        match self {
            Self::KvV2 => Some("2"),
        }
    }
}

impl fmt::Display for MountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KvV2 => f.write_str("kv-v2"),
        }
    }
}

/// Operations against a secret store.
///
/// Implementations hold their own address and credential. `is_ready` and
/// `mount_exists` swallow errors and answer `false`, because callers poll
/// them; every other call reports failures.
pub trait SecretStore {
    /// Probe whether the store is reachable, unsealed and serving.
    fn is_ready(&self) -> bool;

    /// Whether a secrets engine is mounted at `mount`.
    fn mount_exists(&self, mount: &str) -> bool;

    /// Mount a secrets engine.
    ///
    /// Not idempotent: the store rejects an already-used path, so callers
    /// check [`SecretStore::mount_exists`] first.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store rejects the mount.
    fn enable_mount(&self, mount: &str, kind: MountKind) -> StoreResult<()>;

    /// Create or overwrite a policy.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the write fails.
    fn write_policy(&self, policy: &Policy) -> StoreResult<()>;

    /// Mint a new token. Never reuses an existing one.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if creation fails or the response carries no
    /// credential.
    fn create_token(&self, request: &TokenRequest) -> StoreResult<IssuedToken>;

    /// Write a new version of `mount/key`.
    ///
    /// # Returns
    ///
    /// The version number assigned by the store, when it reports one.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the write fails.
    fn put_secret(&self, mount: &str, key: &str, document: &SecretDocument)
        -> StoreResult<Option<u64>>;

    /// Read the current version of `mount/key`.
    ///
    /// # Returns
    ///
    /// `None` if nothing is stored at the path.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the read fails for any other reason.
    fn get_secret(&self, mount: &str, key: &str) -> StoreResult<Option<SecretDocument>>;
}
