//! Sync report types.

use super::{BootstrapTokens, SecretDocument};

/// What happened to one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    /// Written and read back with matching content
    Written { version: Option<u64> },
    /// The write call failed; nothing was verified
    WriteFailed(String),
    /// Written, but the read-back failed or did not match
    VerifyFailed(String),
}

impl SectionOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Per-section result.
#[derive(Debug, Clone)]
pub struct SectionReport {
    pub key: String,
    pub name: String,
    pub description: String,
    /// Number of fields in the published document
    pub fields: usize,
    pub outcome: SectionOutcome,
    /// Content read back from the store, when the read succeeded
    pub stored: Option<SecretDocument>,
}

/// Result of a sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub sections: Vec<SectionReport>,
    /// Present only when bootstrap ran
    pub tokens: Option<BootstrapTokens>,
}

impl SyncReport {
    pub fn written(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| s.outcome.is_written())
            .count()
    }

    pub fn write_failures(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| matches!(s.outcome, SectionOutcome::WriteFailed(_)))
            .count()
    }

    pub fn verify_failures(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| matches!(s.outcome, SectionOutcome::VerifyFailed(_)))
            .count()
    }

    /// Look up a section result by key.
    pub fn section(&self, key: &str) -> Option<&SectionReport> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// True when no write failed. Verify failures are warnings.
    pub fn is_success(&self) -> bool {
        self.write_failures() == 0
    }
}
