//! Runtime settings.
//!
//! Settings come from three layers, highest precedence first:
//!
//! 1. Command-line flags and process environment ([`Overrides`])
//! 2. `VAULT_*` keys in the `.env` file
//! 3. Built-in defaults
//!
//! For the credential, `VAULT_ROOT_TOKEN` is preferred over
//! `VAULT_APP_TOKEN` because bootstrap needs the elevated one.

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::{self, keys};
use crate::core::env::EnvFile;
use crate::error::{ConfigError, Result};

/// Values supplied on the command line or via process environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub addr: Option<String>,
    pub token: Option<String>,
    pub mount: Option<String>,
    pub environment: Option<String>,
}

/// Where the credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `--token` or `VAULT_TOKEN`
    Explicit,
    /// `VAULT_ROOT_TOKEN` in the .env file
    Root,
    /// `VAULT_APP_TOKEN` in the .env file
    App,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explicit => "explicit token",
            Self::Root => keys::ROOT_TOKEN,
            Self::App => keys::APP_TOKEN,
        })
    }
}

/// Resolved settings for one run.
#[derive(Clone)]
pub struct Settings {
    /// Base address, without trailing slash
    pub addr: String,
    /// KV v2 mount path, without surrounding slashes
    pub mount: String,
    /// Label shown to operators and embedded in token names
    pub environment: String,
    token: Option<(Zeroizing<String>, TokenSource)>,
}

impl Settings {
    /// Merge overrides, .env values and defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAddress` or `ConfigError::InvalidValue`
    /// when a resolved value is unusable. A missing credential is not an
    /// error here; see [`Settings::token`].
    pub fn resolve(overrides: &Overrides, env: Option<&EnvFile>) -> Result<Self> {
        let from_env = |key: &str| env.and_then(|e| e.get_non_empty(key)).map(str::to_string);

        let addr = non_empty(overrides.addr.clone())
            .or_else(|| from_env(keys::ADDR))
            .unwrap_or_else(|| constants::DEFAULT_ADDR.to_string());
        let addr = validate_addr(&addr)?;

        let mount = non_empty(overrides.mount.clone())
            .or_else(|| from_env(keys::MOUNT))
            .unwrap_or_else(|| constants::DEFAULT_MOUNT.to_string());
        let mount = validate_mount(&mount)?;

        let environment = non_empty(overrides.environment.clone())
            .unwrap_or_else(|| constants::DEFAULT_ENVIRONMENT.to_string());

        let token = non_empty(overrides.token.clone())
            .map(|t| (t, TokenSource::Explicit))
            .or_else(|| from_env(keys::ROOT_TOKEN).map(|t| (t, TokenSource::Root)))
            .or_else(|| from_env(keys::APP_TOKEN).map(|t| (t, TokenSource::App)))
            .map(|(t, source)| (Zeroizing::new(t), source));

        let settings = Self {
            addr,
            mount,
            environment,
            token,
        };
        debug!(?settings, "resolved settings");
        Ok(settings)
    }

    /// The bearer credential.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` when no credential was found.
    pub fn token(&self) -> Result<&str> {
        self.token
            .as_ref()
            .map(|(t, _)| t.as_str())
            .ok_or_else(|| ConfigError::MissingToken.into())
    }

    pub fn token_source(&self) -> Option<TokenSource> {
        self.token.as_ref().map(|(_, source)| *source)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("addr", &self.addr)
            .field("mount", &self.mount)
            .field("environment", &self.environment)
            .field("token", &self.token_source())
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_addr(addr: &str) -> Result<String> {
    let addr = addr.trim();
    if !(addr.starts_with("http://") || addr.starts_with("https://")) {
        return Err(ConfigError::InvalidAddress(addr.to_string()).into());
    }
    Ok(addr.trim_end_matches('/').to_string())
}

fn validate_mount(mount: &str) -> Result<String> {
    let mount = mount.trim().trim_matches('/');
    if mount.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "mount",
            reason: "must not be empty".to_string(),
        }
        .into());
    }
    if let Some(bad) = mount
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/' | '.')))
    {
        return Err(ConfigError::InvalidValue {
            field: "mount",
            reason: format!("unexpected character '{}' in '{}'", bad, mount),
        }
        .into());
    }
    if let Some(bad) = mount
        .split('/')
        .find(|segment| matches!(*segment, "" | "." | ".."))
    {
        return Err(ConfigError::InvalidValue {
            field: "mount",
            reason: format!("path segment '{}' not allowed in '{}'", bad, mount),
        }
        .into());
    }
    Ok(mount.to_string())
}
