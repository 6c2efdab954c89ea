use std::sync::LazyLock;

use dfwiki_core::VocabularyMap;
use regex::Regex;

use crate::{LanguageCode, TranslateError, Translator};

static ASCII_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]+\b").expect("Invalid word regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

// e.g. `(单位:千美元)`, unit annotations the provider sometimes appends
static UNIT_NOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*单位[^)]*\)").expect("Invalid unit note regex"));

/// Only multi-word text is worth a sentence translation; single words go to
/// the dictionary instead.
pub fn should_translate(text: &str) -> bool {
    ASCII_WORD.find_iter(text).nth(1).is_some()
}

pub fn post_process(text: &str) -> String {
    let text = WHITESPACE.replace_all(text, " ");
    let text = UNIT_NOTE.replace_all(&text, "");
    text.trim().to_string()
}

/// Whole-sentence translation of recognized text with game terms fixed up
/// front, so the provider sees `the 矮人 digs` rather than guessing at
/// `dwarf`.
pub struct SentenceTranslator<T> {
    translator: T,
    vocabulary: VocabularyMap,
    from: LanguageCode,
    to: LanguageCode,
}

impl<T: Translator> SentenceTranslator<T> {
    pub fn new(translator: T, from: impl Into<LanguageCode>, to: impl Into<LanguageCode>) -> Self {
        Self {
            translator,
            vocabulary: VocabularyMap::default(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: VocabularyMap) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    pub async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let prepared = self.vocabulary.substitute_terms(text);
        let translation = self
            .translator
            .translate(&prepared, self.from.clone(), self.to.clone())
            .await?;

        let result = post_process(&translation.text);
        if result.is_empty() {
            return Err(TranslateError::EmptyResult);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ProviderMetadata, Translation};

    /// Echoes its input back with a fixed suffix and records what it was sent
    #[derive(Default)]
    struct EchoTranslator {
        suffix: String,
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(
            &self,
            text: &str,
            from: LanguageCode,
            to: LanguageCode,
        ) -> Result<Translation, TranslateError> {
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(text.to_string());
            }
            Ok(Translation {
                text: format!("{text}{}", self.suffix),
                from,
                to,
                provider: "echo".to_string(),
                confidence: None,
            })
        }

        fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
            vec![]
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "echo".to_string(),
                requires_api_key: false,
                free_tier_available: true,
            }
        }
    }

    #[test]
    fn test_should_translate_needs_two_words() {
        assert!(should_translate("The dwarf"));
        assert!(!should_translate("dwarf"));
        assert!(!should_translate("矮人 123"));
        assert!(should_translate("Urist, 2 cats"));
    }

    #[test]
    fn test_post_process() {
        assert_eq!(post_process("  价格\n\t很高 (单位:千美元) "), "价格 很高");
        assert_eq!(post_process("(注意) 好"), "(注意) 好");
    }

    #[tokio::test]
    async fn test_terms_are_substituted_before_the_provider_call() {
        let sentences = SentenceTranslator::new(EchoTranslator::default(), "en", "zh-CN")
            .with_vocabulary(VocabularyMap::new([("dwarf", "矮人"), ("miner", "矿工")]));

        let result = sentences
            .translate("The  Dwarf miner")
            .await
            .expect("echo translates");
        assert_eq!(result, "The 矮人 矿工");

        let sent = sentences.translator().sent.lock().expect("lock").clone();
        assert_eq!(sent, vec!["The  矮人 矿工".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_input_and_empty_output() {
        let sentences = SentenceTranslator::new(EchoTranslator::default(), "en", "zh-CN");
        assert!(matches!(sentences.translate(" \n").await, Err(TranslateError::EmptyInput)));

        assert!(matches!(
            sentences.translate("(单位:x)").await,
            Err(TranslateError::EmptyResult)
        ));
    }
}
