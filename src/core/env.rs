//! Flat `.env` reading.
//!
//! Reads every `KEY=value` line regardless of sections. Used to pick up
//! `VAULT_*` settings that live in the same file as the secrets.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// A parsed .env file
#[derive(Debug, Clone)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
    path: PathBuf,
}

impl EnvFile {
    /// Read and parse an .env file from disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadEnv` if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading env file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadEnv {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(&contents, path))
    }

    /// Parse text as an .env file.
    ///
    /// Skips empty lines and comments (lines starting with #).
    pub fn parse(contents: &str, path: impl Into<PathBuf>) -> Self {
        let entries = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .filter(|(key, _)| !key.trim().is_empty())
            .map(|(key, value)| (key.trim().to_string(), normalize_value(value)))
            .collect();

        Self {
            entries,
            path: path.into(),
        }
    }

    /// Get a value by key. The last occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get a value by key, treating an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Normalize a raw value: trim, then drop one leading and one trailing quote.
///
/// The two quotes are stripped independently and need not match, so
/// `"abc'` becomes `abc`. No escape sequences are interpreted.
pub(crate) fn normalize_value(raw: &str) -> String {
    let value = raw.trim();
    let value = value
        .strip_prefix(|c: char| c == '"' || c == '\'')
        .unwrap_or(value);
    let value = value
        .strip_suffix(|c: char| c == '"' || c == '\'')
        .unwrap_or(value);
    value.to_string()
}
