//! Canonical identity for mentor and team names.
//!
//! Names typed into spreadsheets differ in case and spacing ("Bishop O'Dowd"
//! vs "bishop o'dowd "). A [`NameKey`] is computed once per name by dropping
//! all whitespace and lowercasing; all hashing and equality go through it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonicalized name used for identity comparisons.
///
/// # Example
///
/// ```
/// use mentorforge_core::NameKey;
///
/// assert_eq!(NameKey::new("Bishop O'Dowd"), NameKey::new(" bishop o'dowd"));
/// assert_ne!(NameKey::new("Arroyo"), NameKey::new("Albany"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NameKey(String);

impl NameKey {
    /// Canonicalizes a raw name.
    pub fn new(raw: &str) -> Self {
        NameKey(
            raw.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect(),
        )
    }

    /// Returns the canonical form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the canonical form is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for NameKey {
    fn from(raw: String) -> Self {
        NameKey::new(&raw)
    }
}

impl From<NameKey> for String {
    fn from(key: NameKey) -> Self {
        key.0
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A display name paired with its canonical key.
#[derive(Debug, Clone)]
pub struct EntityName {
    display: String,
    key: NameKey,
}

impl EntityName {
    /// Creates a name, trimming surrounding whitespace from the display form.
    pub fn new(raw: &str) -> Self {
        Self {
            display: raw.trim().to_string(),
            key: NameKey::new(raw),
        }
    }

    /// The name as it should be shown to people.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The identity key.
    pub fn key(&self) -> &NameKey {
        &self.key
    }

    /// Returns true if `other` names the same entity.
    pub fn matches(&self, other: &str) -> bool {
        self.key == NameKey::new(other)
    }
}

impl PartialEq for EntityName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for EntityName {}

impl std::hash::Hash for EntityName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}
