use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use dfwiki_core::dictionary::{
    Definition, Dictionary, DictionaryEntry, DictionaryMetadata, MatchType, SearchOptions,
};
use dfwiki_core::language::Lemmatizer;
use serde::Deserialize;

use crate::lemmatizer::EnglishLemmatizer;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One ECDICT record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EnglishEntry {
    pub word: String,
    pub phonetic: String,
    /// English definitions, one per line
    pub definition: String,
    /// Chinese glosses, one per line
    pub translation: String,
    pub pos: String,
    /// Collins frequency band, 0-5
    pub collins: u8,
    /// Non-zero for Oxford 3000 words
    pub oxford: u8,
    /// Word forms, e.g. `p:walked/d:walked/i:walking/3:walks`
    pub exchange: String,
}

impl EnglishEntry {
    /// `(code, form)` pairs out of `exchange`
    pub fn forms(&self) -> Vec<(&str, &str)> {
        self.exchange
            .split('/')
            .filter_map(|item| item.split_once(':'))
            .filter(|(_, form)| !form.is_empty())
            .collect()
    }
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    // ECDICT escapes newlines as a literal `\n`
    text.split('\n')
        .flat_map(|line| line.split("\\n"))
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

impl DictionaryEntry for EnglishEntry {
    fn headword(&self) -> String {
        self.word.clone()
    }

    fn readings(&self) -> Vec<String> {
        if self.phonetic.is_empty() {
            vec![]
        } else {
            vec![self.phonetic.clone()]
        }
    }

    fn definitions(&self) -> Vec<Definition> {
        let pos: Vec<String> = self
            .pos
            .split('/')
            .filter_map(|p| p.split_once(':').map(|(p, _)| p).or(Some(p)))
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        let glosses = lines(&self.translation).map(|text| Definition {
            text: text.to_string(),
            part_of_speech: pos.clone(),
            tags: vec!["zh".to_string()],
        });
        let english = lines(&self.definition).map(|text| Definition {
            text: text.to_string(),
            part_of_speech: pos.clone(),
            tags: vec!["en".to_string()],
        });
        glosses.chain(english).collect()
    }

    fn tags(&self) -> HashMap<String, String> {
        let mut tags = HashMap::new();
        if !self.pos.is_empty() {
            tags.insert("pos".to_string(), self.pos.clone());
        }
        if self.collins > 0 {
            tags.insert("collins".to_string(), "★".repeat(self.collins.min(5) as usize));
        }
        if self.oxford > 0 {
            tags.insert("oxford".to_string(), "true".to_string());
        }
        if !self.exchange.is_empty() {
            tags.insert("exchange".to_string(), self.exchange.clone());
        }
        tags
    }
}

/// Entry found by [`EnglishDictionary::lookup_with_lemma`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LemmaMatch<'a> {
    pub entry: &'a EnglishEntry,
    /// `None` for an exact hit, else the inflection undone (or `"prefix"`)
    pub rule: Option<&'static str>,
}

/// In-memory English dictionary keyed by lowercase headword
#[derive(Debug, Clone, Default)]
pub struct EnglishDictionary {
    entries: Vec<EnglishEntry>,
    index: BTreeMap<String, Vec<usize>>,
    lemmatizer: EnglishLemmatizer,
}

impl EnglishDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = EnglishEntry>) -> Self {
        let mut dict = Self::new();
        for entry in entries {
            dict.insert(entry);
        }
        dict
    }

    /// Load from a JSON array of ECDICT records
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let entries: Vec<EnglishEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_file(path: &Path) -> Result<Self, DictionaryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Add an entry. Entries without a headword are dropped.
    pub fn insert(&mut self, entry: EnglishEntry) {
        let key = entry.word.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        let idx = self.entries.len();
        self.entries.push(entry);
        self.index.entry(key).or_default().push(idx);
    }

    /// Merge `other` in; its entries replace ours for the same headword
    pub fn merge(self, other: EnglishDictionary) -> Self {
        let kept = self
            .index
            .into_iter()
            .filter(|(key, _)| !other.index.contains_key(key))
            .flat_map(|(_, ids)| ids)
            .collect::<BTreeSet<usize>>();

        let mut merged = Self {
            lemmatizer: self.lemmatizer,
            ..Self::default()
        };
        for (idx, entry) in self.entries.into_iter().enumerate() {
            if kept.contains(&idx) {
                merged.insert(entry);
            }
        }
        for entry in other.entries {
            merged.insert(entry);
        }
        merged
    }

    pub fn entry_count(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// First entry for `word`, ignoring case
    pub fn get(&self, word: &str) -> Option<&EnglishEntry> {
        let key = word.trim().to_lowercase();
        self.index
            .get(&key)
            .and_then(|ids| ids.first())
            .and_then(|&idx| self.entries.get(idx))
    }

    /// Entries whose headword starts with `prefix`, in headword order
    pub fn prefixed(&self, prefix: &str, limit: usize) -> Vec<&EnglishEntry> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return vec![];
        }
        self.index
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .flat_map(|(_, ids)| ids.iter().filter_map(|&idx| self.entries.get(idx)))
            .take(limit)
            .collect()
    }

    /// Exact headword, then lemma candidates, then the closest prefix hit
    /// (`word`, then `word` minus its last letter).
    pub fn lookup_with_lemma(&self, word: &str) -> Option<LemmaMatch<'_>> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return None;
        }

        if let Some(entry) = self.get(&word) {
            return Some(LemmaMatch { entry, rule: None });
        }

        for candidate in self.lemmatizer.candidates(&word) {
            if let Some(entry) = self.get(&candidate.base_form) {
                tracing::debug!("{word} -> {} ({})", entry.word, candidate.rule);
                return Some(LemmaMatch {
                    entry,
                    rule: Some(candidate.rule),
                });
            }
        }

        let mut shorter = word.clone();
        shorter.pop();
        [word.as_str(), shorter.as_str()]
            .into_iter()
            .filter(|prefix| prefix.chars().count() > 1)
            .find_map(|prefix| self.prefixed(prefix, 1).into_iter().next())
            .map(|entry| LemmaMatch {
                entry,
                rule: Some("prefix"),
            })
    }
}

impl Dictionary for EnglishDictionary {
    fn lookup_exact(&self, query: &str) -> Vec<Box<dyn DictionaryEntry>> {
        let key = query.trim().to_lowercase();
        self.index
            .get(&key)
            .into_iter()
            .flatten()
            .filter_map(|&idx| self.entries.get(idx))
            .map(|entry| Box::new(entry.clone()) as Box<dyn DictionaryEntry>)
            .collect()
    }

    fn search(&self, query: &str, options: SearchOptions) -> Vec<Box<dyn DictionaryEntry>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return vec![];
        }

        let hits: Vec<&EnglishEntry> = match options.match_type {
            MatchType::Prefix => self.prefixed(&query, options.max_results),
            match_type => self
                .index
                .iter()
                .filter(|(key, _)| match_type.matches(key, &query))
                .flat_map(|(_, ids)| ids.iter().filter_map(|&idx| self.entries.get(idx)))
                .take(options.max_results)
                .collect(),
        };

        hits.into_iter()
            .map(|entry| Box::new(entry.clone()) as Box<dyn DictionaryEntry>)
            .collect()
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "ECDICT".to_string(),
            version: "json".to_string(),
            language: "en".to_string(),
            entry_count: self.entry_count(),
        }
    }
}
