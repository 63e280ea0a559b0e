//! Flat key/value mapping with an explicit key-comparison policy.
//!
//! Responsibilities:
//! - Store parsed entries keyed by a configurable key fold.
//! - Preserve the casing of keys as first inserted, for iteration.
//!
//! Does NOT handle:
//! - Key normalization (`__` to `:` rewriting is the parser's job).
//! - Duplicate rejection (the parser decides; `insert` replaces).
//!
//! Invariants:
//! - At most one entry per folded key.
//! - Values are stored verbatim; no coercion, everything is a string.

use std::collections::HashMap;

/// Key comparison policy for an [`EnvMap`].
///
/// Case-insensitivity is a declared property of the map rather than an
/// ambient dictionary default, so tests can assert on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Keys compare equal regardless of case (Unicode lowercase fold).
    #[default]
    CaseInsensitive,
    /// Keys compare byte-for-byte.
    CaseSensitive,
}

impl KeyPolicy {
    /// Fold a key into its comparison form.
    pub fn fold(self, key: &str) -> String {
        match self {
            KeyPolicy::CaseInsensitive => key.to_lowercase(),
            KeyPolicy::CaseSensitive => key.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    value: String,
}

/// A flat configuration mapping from normalized keys to string values.
///
/// Insertion order is not preserved; the mapping is a pure key/value store.
#[derive(Debug, Clone, Default)]
pub struct EnvMap {
    policy: KeyPolicy,
    entries: HashMap<String, Entry>,
}

impl EnvMap {
    /// Create an empty mapping with the case-insensitive policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mapping with an explicit key policy.
    pub fn with_policy(policy: KeyPolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
        }
    }

    /// The key-comparison policy this map was built with.
    pub fn policy(&self) -> KeyPolicy {
        self.policy
    }

    /// Insert a key/value pair, returning the previous value for an
    /// equal-under-the-policy key, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let folded = self.policy.fold(&key);
        self.entries
            .insert(
                folded,
                Entry {
                    key,
                    value: value.into(),
                },
            )
            .map(|entry| entry.value)
    }

    /// Look up a value by key under the map's comparison policy.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&self.policy.fold(key))
            .map(|entry| entry.value.as_str())
    }

    /// Whether a key is present under the map's comparison policy.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&self.policy.fold(key))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs with original key casing.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
    }

    /// Consume the map, yielding owned `(key, value)` pairs.
    pub fn into_entries(self) -> impl Iterator<Item = (String, String)> {
        self.entries
            .into_values()
            .map(|entry| (entry.key, entry.value))
    }
}

impl PartialEq for EnvMap {
    /// Maps are equal when their policies match, their key sets are equal
    /// under the fold, and values compare exactly.
    fn eq(&self, other: &Self) -> bool {
        self.policy == other.policy
            && self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(folded, entry)| {
                other
                    .entries
                    .get(folded)
                    .is_some_and(|theirs| theirs.value == entry.value)
            })
    }
}

impl Eq for EnvMap {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = EnvMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
