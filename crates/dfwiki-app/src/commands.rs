use anyhow::Context;
use dfwiki_core::{Library, Page, Renderer, VocabularyMap, translate_by_vocabulary};
use dfwiki_core::language::LanguageProcessor;
use dfwiki_lang_english::{EnglishProcessor, format_entry_html};
use dfwiki_translator::{SentenceTranslator, Translator, should_translate};
use dfwiki_types::Language;

/// Match list (`title<TAB>entry`) or, with `render`, the pages as JSON
pub fn lookup(
    library: &Library,
    text: &str,
    render: bool,
    language: Language,
) -> anyhow::Result<String> {
    let hits = library.lookup(text);
    if hits.is_empty() {
        tracing::info!("No entries matched");
    }

    if render {
        let pages: Vec<Page> = hits.iter().map(|hit| library.present(hit, language)).collect();
        return Ok(serde_json::to_string_pretty(&pages)?);
    }

    let lines: Vec<String> = hits
        .iter()
        .map(|hit| {
            let mut line = format!("{}\t{}", library.display_title(hit, language), hit.name);
            if hit.matched != hit.name {
                line.push_str(&format!(" (via {})", hit.matched));
            }
            if hit.translation.is_some() {
                line.push_str(" [translated]");
            }
            line
        })
        .collect();
    Ok(lines.join("\n"))
}

pub fn render_markup(renderer: &Renderer, content: &str) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&renderer.render(content))?)
}

pub fn translate_markup(content: &str, vocabulary: &VocabularyMap) -> String {
    if vocabulary.is_empty() {
        tracing::warn!("Vocabulary is empty, output equals input");
    }
    translate_by_vocabulary(content, vocabulary)
}

pub async fn sentence<T: Translator>(
    translator: &SentenceTranslator<T>,
    text: &str,
) -> anyhow::Result<String> {
    if !should_translate(text) {
        tracing::warn!("Single words translate better with `dfwiki define`");
    }
    translator
        .translate(text)
        .await
        .context("Sentence translation failed")
}

/// One card per word of `text` the dictionary knows, in reading order
pub fn define(processor: &EnglishProcessor, text: &str) -> anyhow::Result<String> {
    let dictionary = processor.dictionary();
    let cards: Vec<String> = processor
        .tokenize(text)
        .iter()
        .filter_map(|token| {
            dictionary
                .lookup_with_lemma(&token.normalized)
                .map(|found| format_entry_html(found.entry, &token.surface))
        })
        .collect();
    if cards.is_empty() {
        anyhow::bail!("No dictionary entry for {text:?}");
    }
    Ok(cards.join("\n"))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use dfwiki_core::{Entry, MemoryStore, TitleMap};
    use dfwiki_lang_english::{EnglishDictionary, EnglishEntry};
    use dfwiki_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation};
    use pretty_assertions::assert_eq;

    use super::*;

    fn library() -> Library {
        let source = MemoryStore::from_entries(
            Language::Source,
            [
                Entry::new("Dwarf", "A '''dwarf''' digs.", Language::Source),
                Entry::new("Dwarves", "#REDIRECT [[Dwarf]]", Language::Source),
                Entry::new("Cave_spider", "Spins [[web]]s.", Language::Source),
            ],
        );
        Library::new(source)
            .with_vocabulary(VocabularyMap::new([("dwarf", "矮人")]))
            .with_titles(TitleMap::from_pairs([("Dwarf", "矮人")]))
    }

    #[test]
    fn test_lookup_lists_matches() {
        let out = lookup(&library(), "dwarves\ncave spider", false, Language::Source)
            .expect("lookup");
        assert_eq!(out, "Dwarf\tDwarf (via Dwarves)\nCave spider\tCave_spider");

        let out = lookup(&library(), "dwarf", false, Language::Target).expect("lookup");
        assert_eq!(out, "矮人\tDwarf");
    }

    #[test]
    fn test_lookup_renders_pages() {
        let out = lookup(&library(), "Dwarf", true, Language::Target).expect("lookup");
        let pages: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(pages[0]["title"], "矮人");
        assert_eq!(pages[0]["machine_translated"], true);
        let html = pages[0]["html"].as_str().expect("html");
        assert!(html.contains("<b>矮人</b>"));
    }

    #[test]
    fn test_render_markup_json() {
        let out = render_markup(&Renderer::default(), "[[Dwarf]] [[File:Ox.png|40px]]")
            .expect("render");
        let page: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert!(page["html"].as_str().expect("html").contains("href=\"wiki:dwarf\""));
        assert_eq!(page["media"].as_object().map(|m| m.len()), Some(1));
    }

    #[test]
    fn test_translate_markup_keeps_links() {
        let vocabulary = VocabularyMap::new([("dwarf", "矮人")]);
        assert_eq!(
            translate_markup("The dwarf met [[Dwarf|a dwarf]].", &vocabulary),
            "The 矮人 met [[Dwarf|a dwarf]]."
        );
    }

    #[test]
    fn test_define_words_in_text() {
        let processor = EnglishProcessor::new(EnglishDictionary::from_entries([
            EnglishEntry {
                word: "mine".to_string(),
                translation: "v. 采矿".to_string(),
                ..Default::default()
            },
            EnglishEntry {
                word: "gold".to_string(),
                translation: "n. 金".to_string(),
                ..Default::default()
            },
        ]));

        let html = define(&processor, "mined").expect("lemma hit");
        assert!(html.contains("v. 采矿"));
        assert!(html.contains("(查询: mined)"));

        let html = define(&processor, "Gold, mined!").expect("two hits");
        assert!(html.find("n. 金") < html.find("v. 采矿"));

        assert!(define(&processor, "xyzzy").is_err());
        assert!(define(&processor, "  ").is_err());
    }

    struct Upper;

    #[async_trait]
    impl Translator for Upper {
        async fn translate(
            &self,
            text: &str,
            from: LanguageCode,
            to: LanguageCode,
        ) -> Result<Translation, TranslateError> {
            Ok(Translation {
                text: text.to_uppercase(),
                from,
                to,
                provider: "upper".to_string(),
                confidence: None,
            })
        }

        fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
            vec![]
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "upper".to_string(),
                requires_api_key: false,
                free_tier_available: true,
            }
        }
    }

    #[tokio::test]
    async fn test_sentence_uses_vocabulary() {
        let translator = SentenceTranslator::new(Upper, "en", "zh-CN")
            .with_vocabulary(VocabularyMap::new([("dwarf", "矮人")]));
        let out = sentence(&translator, "the dwarf digs").await.expect("translated");
        assert_eq!(out, "THE 矮人 DIGS");
    }
}
