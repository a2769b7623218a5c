//! Sectioned `.env` parsing.
//!
//! Only lines that follow a section header are collected:
//!
//! ```text
//! # :database - Postgres connection
//! DB_HOST=localhost
//! DB_PASSWORD="s3cret"
//!
//! # any other comment ends the section
//! IGNORED=value
//! ```
//!
//! Parsing never fails. Lines that are dropped are reported as [`Notice`]s
//! so callers can warn about likely typos.

use std::fmt;

use tracing::{debug, trace};

use crate::core::domain::{ConfigSection, Sections};
use crate::core::env::normalize_value;

/// Output of [`parse_sections`].
#[derive(Debug, Clone, Default)]
pub struct ParsedEnv {
    pub sections: Sections,
    pub notices: Vec<Notice>,
}

/// A line that was not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// 1-based line number
    pub line: usize,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    /// A `key=value` line with no active section
    OutsideSection { key: String },
    /// A line inside a section with no `=` or an empty key
    Malformed { text: String },
    /// A comment starting with `:` that is not a valid header
    SuspectHeader { text: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NoticeKind::OutsideSection { key } => {
                write!(f, "line {}: {} is outside any section", self.line, key)
            }
            NoticeKind::Malformed { text } => {
                write!(f, "line {}: not a key=value line: {}", self.line, text)
            }
            NoticeKind::SuspectHeader { text } => write!(
                f,
                "line {}: looks like a section header but does not match '# :name - description': {}",
                self.line, text
            ),
        }
    }
}

/// Parse text into sections, discarding notices.
pub fn parse(text: &str) -> Sections {
    parse_sections(text).sections
}

/// Parse text into sections and skipped-line notices.
pub fn parse_sections(text: &str) -> ParsedEnv {
    let mut parsed = ParsedEnv::default();
    let mut cursor: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.starts_with('#') {
            if let Some((name, description)) = parse_header(line) {
                debug!(section = name, line = line_no, "section header");
                cursor = Some(parsed.sections.insert(ConfigSection::new(name, description)));
            } else {
                if is_suspect_header(line) {
                    parsed.notices.push(Notice {
                        line: line_no,
                        kind: NoticeKind::SuspectHeader {
                            text: line.to_string(),
                        },
                    });
                }
                cursor = None;
            }
            continue;
        }

        // Blank lines leave the cursor alone.
        if line.is_empty() {
            continue;
        }

        let Some(section) = cursor.and_then(|i| parsed.sections.get_index_mut(i)) else {
            let key = line.split('=').next().unwrap_or_default().trim();
            trace!(key, line = line_no, "outside section");
            parsed.notices.push(Notice {
                line: line_no,
                kind: NoticeKind::OutsideSection {
                    key: key.to_string(),
                },
            });
            continue;
        };

        match split_entry(line) {
            Some((key, value)) => {
                trace!(section = %section.key, key, "entry");
                section.push(key, value);
            }
            None => parsed.notices.push(Notice {
                line: line_no,
                kind: NoticeKind::Malformed {
                    text: line.to_string(),
                },
            }),
        }
    }

    debug!(
        sections = parsed.sections.len(),
        notices = parsed.notices.len(),
        "parsed env"
    );
    parsed
}

/// Match `# :<ident> - <description>` on a trimmed line.
fn parse_header(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('#')?.trim_start();
    let rest = rest.strip_prefix(':')?;

    let ident_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if ident_len == 0 {
        return None;
    }
    let (ident, rest) = rest.split_at(ident_len);

    let description = rest.trim_start().strip_prefix('-')?;
    Some((ident, description.trim()))
}

fn is_suspect_header(line: &str) -> bool {
    line.trim_start_matches('#').trim_start().starts_with(':')
}

/// Split on the first `=`. Returns `None` without `=` or with an empty key.
fn split_entry(line: &str) -> Option<(&str, String)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, normalize_value(value)))
}
