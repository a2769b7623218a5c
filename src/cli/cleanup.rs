//! Cleanup command.
//!
//! Removes `tmp-*-secrets.json` and `tmp-*-policy.hcl` files that older
//! tooling staged next to the configuration. Only the top level of the
//! directory is searched.

use std::io;
use std::path::{Path, PathBuf};

use dialoguer::Confirm;
use tracing::debug;

use crate::cli::output;
use crate::core::constants::TEMP_ARTIFACT_PATTERNS;
use crate::error::{Error, Result};

/// Remove leftover temporary files from `dir`.
pub fn execute(dir: &Path, yes: bool) -> Result<()> {
    let artifacts = find_artifacts(dir)?;

    if artifacts.is_empty() {
        output::dimmed("nothing to clean");
        return Ok(());
    }

    if !yes && !confirm(&artifacts)? {
        output::hint("Cancelled");
        return Ok(());
    }

    let mut failed = 0;
    for path in &artifacts {
        let shown = output::path(&path.display().to_string());
        match std::fs::remove_file(path) {
            Ok(()) => output::success(&format!("removed {}", shown)),
            Err(e) => {
                failed += 1;
                output::error(&format!("cannot remove {}: {}", shown, e));
            }
        }
    }

    if failed > 0 {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::Other,
            format!("{} file(s) could not be removed", failed),
        )));
    }
    Ok(())
}

/// Matching files directly under `dir`, sorted by name.
pub fn find_artifacts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if is_artifact(&name.to_string_lossy()) {
            debug!(file = %name.to_string_lossy(), "temporary artifact");
            found.push(entry.path());
        }
    }
    found.sort();
    Ok(found)
}

/// Whether a file name matches one of the temporary artifact patterns.
pub fn is_artifact(name: &str) -> bool {
    TEMP_ARTIFACT_PATTERNS.iter().any(|(prefix, suffix)| {
        name.len() >= prefix.len() + suffix.len()
            && name.starts_with(prefix)
            && name.ends_with(suffix)
    })
}

fn confirm(artifacts: &[PathBuf]) -> Result<bool> {
    println!("The following files will be removed:");
    for path in artifacts {
        output::list_item(&path.display().to_string());
    }
    println!();

    Confirm::new()
        .with_prompt(format!(
            "Remove {} file{}?",
            artifacts.len(),
            if artifacts.len() == 1 { "" } else { "s" }
        ))
        .default(false)
        .interact()
        .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::Other, e.to_string())))
}
