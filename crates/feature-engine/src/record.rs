//! Caller Input Records

use std::collections::HashMap;

/// Unordered, possibly partial name → value mapping supplied by one request.
///
/// Repeated names keep their first value; later ones are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRecord {
    entries: HashMap<String, String>,
}

impl InputRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value unless `name` is already present.
    ///
    /// Returns `true` if the value was stored.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let mut stored = false;
        self.entries.entry(name.into()).or_insert_with(|| {
            stored = true;
            value.into()
        });
        stored
    }

    /// Value supplied for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Whether `name` was supplied
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Supplied names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for InputRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = InputRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}
