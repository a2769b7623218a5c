//! Store selection.
//!
//! A dry run gets an in-memory store with the configured mount already in
//! place; everything else talks to Vault over HTTP and needs a credential.

use tracing::info;

use super::{HttpStore, MemoryStore, SecretStore};
use crate::core::config::Settings;
use crate::error::Result;

/// Open the store for this run.
///
/// # Errors
///
/// Returns `ConfigError::MissingToken` when a real store is requested
/// without a credential, or a `StoreError` if the client cannot be built.
pub fn open(settings: &Settings, dry_run: bool) -> Result<Box<dyn SecretStore>> {
    if dry_run {
        info!(mount = %settings.mount, "using in-memory store (dry run)");
        return Ok(Box::new(MemoryStore::new().with_mount(&settings.mount)));
    }

    let token = settings.token()?;
    info!(addr = %settings.addr, source = ?settings.token_source(), "using vault http store");
    Ok(Box::new(HttpStore::new(&settings.addr, token)?))
}
