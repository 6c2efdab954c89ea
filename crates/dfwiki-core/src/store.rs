use std::collections::HashMap;

use dfwiki_types::Language;

use crate::entry::Entry;
use crate::normalize::normalize;

/// Read-only collection of entries addressable by name
pub trait EntryStore: Send + Sync {
    /// Look up an entry by name
    fn get(&self, name: &str) -> Option<&Entry>;

    /// Language every entry of this store is written in
    fn language(&self) -> Language;

    /// Number of entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entry names, in load order
    fn names(&self) -> Vec<&str>;
}

/// In-memory store built once at startup.
///
/// Lookups try the exact name first and fall back to the normalized key, so
/// `#REDIRECT [[dwarf]]` still reaches the entry named `Dwarf`. When several
/// names share a key the first one loaded wins the fallback.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    language: Language,
    entries: Vec<Entry>,
    by_name: HashMap<String, usize>,
    by_key: HashMap<String, usize>,
}

impl MemoryStore {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            entries: Vec::new(),
            by_name: HashMap::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn from_entries(language: Language, entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut store = Self::new(language);
        for entry in entries {
            store.insert(entry);
        }
        store
    }

    /// Add an entry. A later entry with an identical name replaces the earlier one.
    pub fn insert(&mut self, entry: Entry) {
        if let Some(&idx) = self.by_name.get(&entry.name) {
            if let Some(slot) = self.entries.get_mut(idx) {
                *slot = entry;
            }
            return;
        }

        let idx = self.entries.len();
        let key = entry.key();
        self.by_name.insert(entry.name.clone(), idx);
        if !key.is_empty() {
            self.by_key.entry(key).or_insert(idx);
        }
        self.entries.push(entry);
    }

    /// Look up by normalized key only
    pub fn get_by_key(&self, key: &str) -> Option<&Entry> {
        self.by_key.get(key).and_then(|&idx| self.entries.get(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

impl EntryStore for MemoryStore {
    fn get(&self, name: &str) -> Option<&Entry> {
        self.by_name
            .get(name)
            .and_then(|&idx| self.entries.get(idx))
            .or_else(|| self.get_by_key(&normalize(name)))
    }

    fn language(&self) -> Language {
        self.language
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}
