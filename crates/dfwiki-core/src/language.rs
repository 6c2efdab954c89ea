use std::collections::HashMap;

/// Word-level processing and lookup for one reader language
pub trait LanguageProcessor: Send + Sync {
    /// ISO 639-1 code ("en", ...)
    fn language_code(&self) -> &str;

    /// Normalize a word for lookup (case, width, surrounding punctuation)
    fn normalize(&self, text: &str) -> String;

    /// Break text into lookup tokens
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Look up a token in the dictionary
    fn lookup(&self, token: &Token) -> Vec<LookupResult>;
}

/// Inflected form -> dictionary form candidates
pub trait Lemmatizer: Send + Sync {
    /// Candidates in the order they should be tried, the word itself excluded
    fn candidates(&self, word: &str) -> Vec<LemmaCandidate>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub normalized: String,
    /// Character offset of `surface` in the tokenized text
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub term: String,
    pub readings: Vec<String>,
    pub definitions: Vec<String>,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LemmaCandidate {
    pub base_form: String,
    /// Inflection that was undone, e.g. "plural"
    pub rule: &'static str,
}

impl LemmaCandidate {
    pub fn new(base_form: impl Into<String>, rule: &'static str) -> Self {
        Self {
            base_form: base_form.into(),
            rule,
        }
    }
}
