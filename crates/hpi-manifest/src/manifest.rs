//! Ordered manifest attributes - insertion, lookup, rendering and parsing
//!
//! Attribute names follow the JAR manifest rules: alphanumerics, `-` and `_`,
//! at most 70 characters, compared case-insensitively.

use crate::errors::ManifestError;
use ahash::AHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

/// Header written before the main section attributes
pub const MANIFEST_VERSION_HEADER: &str = "Manifest-Version";
pub const MANIFEST_VERSION: &str = "1.0";

const MAX_NAME_LEN: usize = 70;

/// Main section of a manifest: attribute names to values, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ManifestAttributes {
    entries: Vec<(Arc<str>, Arc<str>)>,

    /// Lowercased name -> position in `entries`
    index: AHashMap<Arc<str>, usize>,
}

impl PartialEq for ManifestAttributes {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for ManifestAttributes {}

fn validate_name(name: &str) -> Result<(), ManifestError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ManifestError::InvalidAttributeName(name.to_string()))
    }
}

impl ManifestAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute, failing if one with the same name already exists
    pub fn add_attribute_and_check(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), ManifestError> {
        validate_name(name)?;
        let value = value.into();
        if value.contains(['\n', '\r']) {
            return Err(ManifestError::InvalidAttributeValue(name.to_string()));
        }

        let key: Arc<str> = Arc::from(name.to_ascii_lowercase());
        if self.index.contains_key(&key) {
            return Err(ManifestError::DuplicateAttribute(name.to_string()));
        }

        self.index.insert(key, self.entries.len());
        self.entries.push((Arc::from(name), Arc::from(value)));
        Ok(())
    }

    /// O(1) lookup by attribute name, ignoring case
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name.to_ascii_lowercase().as_str())
            .map(|&idx| self.entries[idx].1.as_ref())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_ref()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Manifest text: version header, then one `Name: Value` line per attribute
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(32 + self.entries.len() * 48);
        out.push_str(MANIFEST_VERSION_HEADER);
        out.push_str(": ");
        out.push_str(MANIFEST_VERSION);
        out.push('\n');
        for (name, value) in &self.entries {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Parse the main section of manifest text
    ///
    /// Lines starting with a single space continue the previous value. The
    /// main section ends at the first blank line.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let mut attrs = ManifestAttributes::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.is_empty() {
                break;
            }

            if let Some(rest) = line.strip_prefix(' ') {
                let Some(last) = attrs.entries.last_mut() else {
                    return Err(ManifestError::InvalidManifest {
                        line: line_no,
                        message: "continuation line without a preceding attribute".to_string(),
                    });
                };
                last.1 = Arc::from(format!("{}{}", last.1, rest));
                continue;
            }

            let Some((name, value)) = line.split_once(": ") else {
                return Err(ManifestError::InvalidManifest {
                    line: line_no,
                    message: format!("expected 'Name: Value', found '{}'", line),
                });
            };

            if name.eq_ignore_ascii_case(MANIFEST_VERSION_HEADER) {
                continue;
            }
            attrs
                .add_attribute_and_check(name, value)
                .map_err(|e| ManifestError::InvalidManifest {
                    line: line_no,
                    message: e.to_string(),
                })?;
        }

        Ok(attrs)
    }

    /// Serialize to a JSON object, keys in manifest order
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Serialize for ManifestAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name.as_ref(), value.as_ref())?;
        }
        map.end()
    }
}
