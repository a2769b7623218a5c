//! End-to-end publishing of `.env` sections.
//!
//! A run waits for the store to become ready, optionally bootstraps it,
//! writes every section, then reads each written section back. Sections are
//! isolated from each other: a failed write is recorded and the loop moves on.
//! A rejected credential is the exception and aborts the run.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::bootstrap;
use crate::core::constants;
use crate::core::domain::{SectionOutcome, SectionReport, SyncReport};
use crate::core::parser;
use crate::core::store::SecretStore;
use crate::error::{StoreError, SyncError};

/// How long to wait for the store before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    /// Total probes, at least one
    pub attempts: u32,
    /// Pause between probes
    pub interval: Duration,
}

impl Readiness {
    /// Short budget for a plain sync against a running store.
    pub fn for_sync() -> Self {
        Self {
            attempts: constants::SYNC_READY_ATTEMPTS,
            interval: constants::SYNC_READY_INTERVAL,
        }
    }

    /// Long budget for init, which often races the store's startup.
    pub fn for_init() -> Self {
        Self {
            attempts: constants::INIT_READY_ATTEMPTS,
            interval: constants::INIT_READY_INTERVAL,
        }
    }

    /// Probe until ready or out of attempts. Sleeps between probes, never
    /// after the last one.
    pub fn wait<S: SecretStore + ?Sized>(&self, store: &S) -> bool {
        let attempts = self.attempts.max(1);
        for attempt in 1..=attempts {
            if store.is_ready() {
                debug!(attempt, "store ready");
                return true;
            }
            info!(attempt, attempts, "store not ready");
            if attempt < attempts {
                thread::sleep(self.interval);
            }
        }
        false
    }
}

/// Options for one sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Run the bootstrap sequence before writing sections
    pub bootstrap: bool,
    /// Label used in token display names
    pub environment: String,
    pub readiness: Readiness,
}

impl SyncOptions {
    /// Plain sync with the short readiness budget.
    pub fn sync(environment: impl Into<String>) -> Self {
        Self {
            bootstrap: false,
            environment: environment.into(),
            readiness: Readiness::for_sync(),
        }
    }

    /// Bootstrap followed by sync, with the long readiness budget.
    pub fn init(environment: impl Into<String>) -> Self {
        Self {
            bootstrap: true,
            environment: environment.into(),
            readiness: Readiness::for_init(),
        }
    }

    pub fn with_readiness(mut self, readiness: Readiness) -> Self {
        self.readiness = readiness;
        self
    }
}

/// Publish every section of `text` under `mount`.
///
/// # Errors
///
/// Returns `SyncError::Unreachable` if the store never became ready, in
/// which case nothing was written, and `SyncError::Bootstrap` if bootstrap
/// was requested and failed. A rejected credential while writing stops the
/// loop with `SyncError::Auth`. Other per-section failures are not errors;
/// they are recorded in the returned report.
pub fn sync<S: SecretStore + ?Sized>(
    store: &S,
    text: &str,
    mount: &str,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    if !options.readiness.wait(store) {
        warn!(attempts = options.readiness.attempts, "store never became ready");
        return Err(SyncError::Unreachable {
            attempts: options.readiness.attempts.max(1),
        });
    }

    let tokens = if options.bootstrap {
        Some(bootstrap::bootstrap(store, mount, &options.environment)?)
    } else {
        None
    };

    let sections = parser::parse(text);
    info!(sections = sections.len(), mount, "publishing sections");

    let mut reports = Vec::with_capacity(sections.len());
    for section in &sections {
        let document = section.document();
        let outcome = match store.put_secret(mount, &section.key, &document) {
            Ok(version) => {
                info!(section = %section.key, fields = document.len(), ?version, "section written");
                SectionOutcome::Written { version }
            }
            Err(source @ StoreError::Auth { .. }) => {
                warn!(section = %section.key, "credential rejected, aborting");
                return Err(SyncError::Auth {
                    section: section.key.clone(),
                    source,
                });
            }
            Err(e) => {
                warn!(section = %section.key, error = %e, "section write failed");
                SectionOutcome::WriteFailed(e.to_string())
            }
        };
        reports.push(SectionReport {
            key: section.key.clone(),
            name: section.name.clone(),
            description: section.description.clone(),
            fields: document.len(),
            outcome,
            stored: None,
        });
    }

    for (section, report) in sections.iter().zip(reports.iter_mut()) {
        if !report.outcome.is_written() {
            continue;
        }
        let intended = section.document();
        match store.get_secret(mount, &section.key) {
            Ok(Some(stored)) => {
                if stored != intended {
                    warn!(section = %section.key, "stored content differs from what was written");
                    report.outcome =
                        SectionOutcome::VerifyFailed("stored content does not match".to_string());
                } else {
                    debug!(section = %section.key, fingerprint = %stored.fingerprint(), "section verified");
                }
                report.stored = Some(stored);
            }
            Ok(None) => {
                warn!(section = %section.key, "section not found after write");
                report.outcome = SectionOutcome::VerifyFailed("not found after write".to_string());
            }
            Err(e) => {
                warn!(section = %section.key, error = %e, "section read-back failed");
                report.outcome = SectionOutcome::VerifyFailed(e.to_string());
            }
        }
    }

    let report = SyncReport {
        sections: reports,
        tokens,
    };
    info!(
        written = report.written(),
        write_failures = report.write_failures(),
        verify_failures = report.verify_failures(),
        "sync finished"
    );
    Ok(report)
}
