//! Domain types.

mod document;
mod policy;
mod report;
mod section;
mod token;

pub use document::SecretDocument;
pub use policy::{Capability, Policy, Rule};
pub use report::{SectionOutcome, SectionReport, SyncReport};
pub use section::{ConfigSection, Entry, Sections};
pub use token::{BootstrapTokens, IssuedToken, TokenRequest};
