use std::collections::HashMap;

use crate::language::LookupResult;

/// Word dictionary lookup operations
pub trait Dictionary: Send + Sync {
    /// Entries whose headword equals `query`, ignoring case
    fn lookup_exact(&self, query: &str) -> Vec<Box<dyn DictionaryEntry>>;

    /// Search dictionary with options
    fn search(&self, query: &str, options: SearchOptions) -> Vec<Box<dyn DictionaryEntry>>;

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;
}

/// Individual dictionary entry
pub trait DictionaryEntry: Send + Sync {
    /// Main headword
    fn headword(&self) -> String;

    /// Pronunciations (phonetic transcriptions)
    fn readings(&self) -> Vec<String>;

    /// All definitions, target-language glosses first
    fn definitions(&self) -> Vec<Definition>;

    /// Extra display data (part of speech, ratings, word forms)
    fn tags(&self) -> HashMap<String, String>;

    /// Convert to generic lookup result
    fn to_lookup_result(&self) -> LookupResult {
        LookupResult {
            term: self.headword(),
            readings: self.readings(),
            definitions: self.definitions().into_iter().map(|d| d.text).collect(),
            metadata: self.tags(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub max_results: usize,
    pub match_type: MatchType,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 10,
            match_type: MatchType::Exact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    Exact,
    Prefix,
    Contains,
}

impl MatchType {
    /// Whether `headword` matches `query`; both are expected lowercase
    pub fn matches(self, headword: &str, query: &str) -> bool {
        match self {
            MatchType::Exact => headword == query,
            MatchType::Prefix => headword.starts_with(query),
            MatchType::Contains => headword.contains(query),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    pub name: String,
    pub version: String,
    pub language: String,
    pub entry_count: usize,
}

#[derive(Debug, Clone)]
pub struct Definition {
    pub text: String,
    pub part_of_speech: Vec<String>,
    pub tags: Vec<String>,
}
