use std::collections::BTreeMap;

use crate::normalize::normalize;
use crate::store::EntryStore;

/// Normalized key -> entry names, built once and read-only afterwards.
///
/// Every name is kept when several normalize to the same key; the first one
/// registered is the key's primary name.
#[derive(Debug, Clone, Default)]
pub struct EntryIndex {
    keys: BTreeMap<String, Vec<String>>,
}

impl EntryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: &dyn EntryStore) -> Self {
        let mut index = Self::new();
        for name in store.names() {
            index.register(name);
        }
        tracing::debug!("Indexed {} entries under {} keys", store.len(), index.len());
        index
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for name in names {
            index.register(name.as_ref());
        }
        index
    }

    /// Register a name under its key. Names with an empty key are ignored.
    pub fn register(&mut self, name: &str) {
        let key = normalize(name);
        if key.is_empty() {
            return;
        }
        let names = self.keys.entry(key).or_default();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    pub fn names(&self, key: &str) -> &[String] {
        self.keys.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn primary(&self, key: &str) -> Option<&str> {
        self.names(key).first().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Keys in lexicographic order with their names
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collisions_keep_every_name_in_order() {
        let index = EntryIndex::from_names(["Adder (Computing)", "Adder computing", "Dwarf"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.names("addercomputing"), ["Adder (Computing)", "Adder computing"]);
        assert_eq!(index.primary("addercomputing"), Some("Adder (Computing)"));
    }

    #[test]
    fn test_empty_keys_are_skipped() {
        let index = EntryIndex::from_names(["???", "矮人"]);
        assert!(index.is_empty());
        assert!(index.names("").is_empty());
    }

    #[test]
    fn test_duplicate_names_registered_once() {
        let index = EntryIndex::from_names(["Dwarf", "Dwarf"]);
        assert_eq!(index.names("dwarf").len(), 1);
    }
}
