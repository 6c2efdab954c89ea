use std::collections::HashMap;

use dfwiki_types::{Language, TitlePair};

use crate::normalize::normalize;

/// Normalized source title -> (source title, target title), for display labels only
#[derive(Debug, Clone, Default)]
pub struct TitleMap {
    titles: HashMap<String, TitlePair>,
}

impl TitleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (source, target) in pairs {
            map.insert(source, target);
        }
        map
    }

    /// Add a pair. Titles with an empty key are ignored.
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let key = normalize(&source);
        if key.is_empty() {
            return;
        }
        self.titles.insert(key, TitlePair::new(source, target));
    }

    pub fn get(&self, name: &str) -> Option<&TitlePair> {
        self.titles.get(&normalize(name))
    }

    /// Title of `name` in `language`, or the name itself with `_` as spaces
    pub fn label(&self, name: &str, language: Language) -> String {
        match self.get(name).map(|pair| pair.get(language)) {
            Some(title) if !title.trim().is_empty() => title.to_string(),
            _ => name.replace('_', " "),
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
