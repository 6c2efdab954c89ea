use dfwiki_core::dictionary::Dictionary;
use dfwiki_core::language::{LanguageProcessor, Lemmatizer, LookupResult, Token};
use unicode_normalization::UnicodeNormalization;

use crate::dictionary::EnglishDictionary;
use crate::lemmatizer::EnglishLemmatizer;

/// Apostrophes and hyphens belong to a word (`dwarf's`, `war-axe`)
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '-'
}

/// English language processor
pub struct EnglishProcessor {
    dictionary: EnglishDictionary,
    lemmatizer: EnglishLemmatizer,
}

impl EnglishProcessor {
    pub fn new(dictionary: EnglishDictionary) -> Self {
        Self {
            dictionary,
            lemmatizer: EnglishLemmatizer::new(),
        }
    }

    pub fn dictionary(&self) -> &EnglishDictionary {
        &self.dictionary
    }
}

impl LanguageProcessor for EnglishProcessor {
    fn language_code(&self) -> &str {
        "en"
    }

    fn normalize(&self, text: &str) -> String {
        text.nfkc()
            .collect::<String>()
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase()
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        let text: String = text.nfkc().collect();
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut start = 0;

        for (i, c) in text.chars().chain([' ']).enumerate() {
            if is_word_char(c) {
                if current.is_empty() {
                    start = i;
                }
                current.push(c);
                continue;
            }
            if current.is_empty() {
                continue;
            }

            let surface = std::mem::take(&mut current);
            let normalized = self.normalize(&surface);
            if !normalized.is_empty() {
                tokens.push(Token {
                    surface,
                    normalized,
                    position: start,
                });
            }
        }

        tokens
    }

    fn lookup(&self, token: &Token) -> Vec<LookupResult> {
        let results: Vec<LookupResult> = self
            .dictionary
            .lookup_exact(&token.normalized)
            .into_iter()
            .map(|entry| entry.to_lookup_result())
            .collect();
        if !results.is_empty() {
            return results;
        }

        // Inflected form: first candidate the dictionary knows
        for candidate in self.lemmatizer.candidates(&token.normalized) {
            let entries = self.dictionary.lookup_exact(&candidate.base_form);
            if entries.is_empty() {
                continue;
            }

            return entries
                .into_iter()
                .map(|entry| {
                    let mut result = entry.to_lookup_result();
                    result.metadata.insert(
                        "inflection".to_string(),
                        format!("{} → {} ({})", token.normalized, candidate.base_form, candidate.rule),
                    );
                    result
                        .metadata
                        .insert("base_form".to_string(), candidate.base_form.clone());
                    result
                })
                .collect();
        }

        vec![]
    }
}
