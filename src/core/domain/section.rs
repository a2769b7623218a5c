//! Config sections.
//!
//! A section is one `# :name - description` header plus the `key=value`
//! lines that follow it. Each section maps to one path in the secret store.

use super::SecretDocument;

/// A single `key=value` line captured under a section header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Key as written in the file (e.g. `DB_HOST`)
    pub original_key: String,
    /// Lowercased key used as the stored field name (e.g. `db_host`)
    pub key: String,
    /// Value with surrounding whitespace and quotes removed
    pub value: String,
}

impl Entry {
    /// Build an entry, deriving the stored field name from `original_key`.
    pub fn new(original_key: impl Into<String>, value: impl Into<String>) -> Self {
        let original_key = original_key.into();
        Self {
            key: original_key.to_lowercase(),
            original_key,
            value: value.into(),
        }
    }
}

/// A named group of entries destined for one secret path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSection {
    /// Identifier exactly as written in the header, for display
    pub name: String,
    /// Lowercased identifier, used as the secret path segment
    pub key: String,
    /// Free text after the `-` in the header
    pub description: String,
    /// Entries in file order
    pub entries: Vec<Entry>,
}

impl ConfigSection {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: name.to_lowercase(),
            name,
            description: description.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn push(&mut self, original_key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Entry::new(original_key, value));
    }

    /// Number of entries (duplicates included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Payload to publish for this section.
    ///
    /// Later duplicates of the same field win.
    pub fn document(&self) -> SecretDocument {
        SecretDocument::from_entries(&self.entries)
    }
}

/// Sections keyed by [`ConfigSection::key`], in first-seen order.
///
/// Re-inserting an existing key replaces that section in place, so a
/// repeated header keeps its original position but loses earlier entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    items: Vec<ConfigSection>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a section, returning its index.
    pub fn insert(&mut self, section: ConfigSection) -> usize {
        match self.position(&section.key) {
            Some(idx) => {
                self.items[idx] = section;
                idx
            }
            None => {
                self.items.push(section);
                self.items.len() - 1
            }
        }
    }

    /// Look up a section by key.
    pub fn get(&self, key: &str) -> Option<&ConfigSection> {
        self.items.iter().find(|s| s.key == key)
    }

    pub(crate) fn get_index_mut(&mut self, idx: usize) -> Option<&mut ConfigSection> {
        self.items.get_mut(idx)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|s| s.key == key)
    }

    /// Section keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|s| s.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigSection> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Sections {
    type Item = &'a ConfigSection;
    type IntoIter = std::slice::Iter<'a, ConfigSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
