//! Secret document type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::Entry;

/// Hex characters kept from the SHA-256 digest in a fingerprint.
const FINGERPRINT_LEN: usize = 12;

/// The field map written to one secret path.
///
/// Serializes as a flat JSON object, which is the shape the KV v2 engine
/// expects under `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretDocument {
    fields: BTreeMap<String, String>,
}

impl SecretDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from section entries, keyed by the normalized field name.
    pub fn from_entries(entries: &[Entry]) -> Self {
        let fields = entries
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect();
        Self { fields }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Short content hash, stable across field insertion order.
    ///
    /// Lets operators compare stored content without printing values.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (k, v) in &self.fields {
            hasher.update(k.as_bytes());
            hasher.update([0u8]);
            hasher.update(v.as_bytes());
            hasher.update([0u8]);
        }
        let digest = hasher.finalize();
        let mut hex = String::with_capacity(FINGERPRINT_LEN);
        for byte in digest.iter().take(FINGERPRINT_LEN / 2) {
            hex.push_str(&format!("{:02x}", byte));
        }
        hex
    }
}

impl FromIterator<(String, String)> for SecretDocument {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_flat_object() {
        let mut doc = SecretDocument::new();
        doc.insert("host", "localhost");
        doc.insert("port", "5432");

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "host": "localhost", "port": "5432" })
        );
    }

    #[test]
    fn test_fingerprint_ignores_insertion_order() {
        let mut a = SecretDocument::new();
        a.insert("x", "1");
        a.insert("y", "2");
        let mut b = SecretDocument::new();
        b.insert("y", "2");
        b.insert("x", "1");

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), FINGERPRINT_LEN);
    }

    #[test]
    fn test_fingerprint_separates_key_and_value() {
        let mut a = SecretDocument::new();
        a.insert("ab", "c");
        let mut b = SecretDocument::new();
        b.insert("a", "bc");

        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
