use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the bilingual wiki a piece of content belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// The language the game (and the upstream wiki) is written in
    #[default]
    Source,
    /// The reader's language
    Target,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Source => f.write_str("source"),
            Language::Target => f.write_str("target"),
        }
    }
}

/// Display titles of one entry in both languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePair {
    pub source: String,
    pub target: String,
}

impl TitlePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Source => &self.source,
            Language::Target => &self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_pair_by_language() {
        let pair = TitlePair::new("Dwarf", "矮人");
        assert_eq!(pair.get(Language::Source), "Dwarf");
        assert_eq!(pair.get(Language::Target), "矮人");
    }

    #[test]
    fn test_language_display_and_default() {
        assert_eq!(Language::Target.to_string(), "target");
        assert_eq!(Language::default(), Language::Source);
    }
}
