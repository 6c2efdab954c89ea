use std::collections::HashMap;

use regex::{Captures, Regex, RegexBuilder};

use crate::protect::{SpanKind, protect};

const VOCABULARY_REGEX_SIZE_LIMIT: usize = 256 * (1 << 20);

/// Source term (lowercase) -> target term, matched longest first.
#[derive(Debug, Clone, Default)]
pub struct VocabularyMap {
    terms: HashMap<String, String>,
    /// Terms by descending character length, ties alphabetical
    ordered: Vec<String>,
    pattern: Option<Regex>,
}

impl VocabularyMap {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut terms = HashMap::new();
        for (source, target) in pairs {
            let source = source.as_ref().trim().to_lowercase();
            if !source.is_empty() {
                terms.insert(source, target.into());
            }
        }

        let mut ordered: Vec<String> = terms.keys().cloned().collect();
        ordered.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });

        let pattern = build_pattern(&ordered);
        Self {
            terms,
            ordered,
            pattern,
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, term: &str) -> Option<&str> {
        self.terms.get(&term.to_lowercase()).map(String::as_str)
    }

    /// Terms in substitution priority order
    pub fn terms(&self) -> &[String] {
        &self.ordered
    }

    /// Whole-word, case-insensitive substitution of every known term.
    ///
    /// One left-to-right pass: at each position the longest term wins and
    /// substituted text is never scanned again. No markup protection; see
    /// [`translate_by_vocabulary`] for wiki content.
    pub fn substitute_terms(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &Captures<'_>| {
                let matched = &caps[0];
                self.terms
                    .get(&matched.to_lowercase())
                    .cloned()
                    .unwrap_or_else(|| matched.to_string())
            })
            .into_owned()
    }
}

fn build_pattern(ordered: &[String]) -> Option<Regex> {
    if ordered.is_empty() {
        return None;
    }

    let alternation = ordered
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
        .case_insensitive(true)
        .size_limit(VOCABULARY_REGEX_SIZE_LIMIT)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::error!(
                "Failed to compile vocabulary of {} terms, substitution disabled: {e}",
                ordered.len()
            );
            None
        }
    }
}

/// Word-for-word fallback translation of wiki content.
///
/// Links, file embeds, templates, tags and URLs are protected first and come
/// back untouched; terms absent from the map are left as they are.
pub fn translate_by_vocabulary(content: &str, vocabulary: &VocabularyMap) -> String {
    if vocabulary.is_empty() {
        return content.to_string();
    }

    let protected = protect(content, &SpanKind::ALL);
    let translated = vocabulary.substitute_terms(&protected.text);
    protected.table.restore(&translated)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn vocab(pairs: &[(&str, &str)]) -> VocabularyMap {
        VocabularyMap::new(pairs.iter().copied())
    }

    #[test]
    fn test_links_are_never_substituted() {
        let vocabulary = vocab(&[("dwarf", "矮人")]);
        assert_eq!(
            translate_by_vocabulary("[[dwarf]] is a dwarf", &vocabulary),
            "[[dwarf]] is a 矮人"
        );
    }

    #[test]
    fn test_longer_terms_win() {
        let vocabulary = vocab(&[("dwarf", "矮人"), ("dwarf miner", "矮人矿工")]);
        assert_eq!(translate_by_vocabulary("dwarf miner", &vocabulary), "矮人矿工");
        assert_eq!(
            translate_by_vocabulary("a dwarf and a dwarf miner", &vocabulary),
            "a 矮人 and a 矮人矿工"
        );
    }

    #[test]
    fn test_whole_words_only_and_case_insensitive() {
        let vocabulary = vocab(&[("axe", "斧头"), ("Fortress", "要塞")]);
        assert_eq!(
            translate_by_vocabulary("Axes and an AXE in the fortress", &vocabulary),
            "Axes and an 斧头 in the 要塞"
        );
    }

    #[test]
    fn test_templates_urls_and_embeds_survive() {
        let vocabulary = vocab(&[("dwarf", "矮人"), ("png", "图")]);
        let content = "{{dwarf}} [[File:dwarf.png|dwarf]] http://dwarf.org/dwarf <span title=\"dwarf\">dwarf</span>";
        assert_eq!(
            translate_by_vocabulary(content, &vocabulary),
            "{{dwarf}} [[File:dwarf.png|dwarf]] http://dwarf.org/dwarf <span title=\"dwarf\">矮人</span>"
        );
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let vocabulary = vocab(&[("ale", "beer"), ("beer", "啤酒")]);
        assert_eq!(vocabulary.substitute_terms("ale and beer"), "beer and 啤酒");
    }

    #[test]
    fn test_empty_vocabulary_is_identity() {
        let vocabulary = VocabularyMap::default();
        assert_eq!(translate_by_vocabulary("Some text", &vocabulary), "Some text");
        assert_eq!(vocabulary.substitute_terms("Some text"), "Some text");
    }

    #[test]
    fn test_term_order_and_lookup() {
        let vocabulary = vocab(&[("ox", "牛"), ("dwarf miner", "矮人矿工"), ("axe", "斧头")]);
        assert_eq!(vocabulary.terms(), ["dwarf miner", "axe", "ox"]);
        assert_eq!(vocabulary.get("AXE"), Some("斧头"));
        assert_eq!(vocabulary.len(), 3);
    }

    #[test]
    fn test_regex_metacharacters_in_terms() {
        let vocabulary = vocab(&[("c++", "C加加"), ("a.b", "甲乙")]);
        assert_eq!(vocabulary.substitute_terms("axb a.b"), "axb 甲乙");
    }
}
