use std::collections::{BTreeMap, HashSet};

use dfwiki_types::Language;
use serde::Serialize;

use crate::error::ResolveError;
use crate::index::EntryIndex;
use crate::matcher::match_entries;
use crate::normalize::normalize;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::redirect::Resolver;
use crate::render::Renderer;
use crate::store::MemoryStore;
use crate::titles::TitleMap;
use crate::vocabulary::{VocabularyMap, translate_by_vocabulary};

pub const DEFAULT_MAX_MATCHES: usize = 20;
pub const MACHINE_TRANSLATION_NOTICE: &str = "⚠️ [临时翻译] Word-for-word vocabulary substitution";
pub const TRANSLATION_MISSING_NOTICE: &str = "No translation available, showing the original";

/// Human translation of a resolved entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub name: String,
    pub content: String,
}

/// One resolved match for a piece of recognized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupHit {
    /// Index name that matched
    pub matched: String,
    /// Entry reached after redirects
    pub name: String,
    pub content: String,
    pub hops: usize,
    pub translation: Option<Translation>,
}

/// Rendered entry ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: String,
    pub language: Language,
    pub html: String,
    pub media: BTreeMap<String, String>,
    /// Target content produced by vocabulary substitution
    pub machine_translated: bool,
    /// Target requested but only the source text could be shown
    pub translation_missing: bool,
}

/// Read-only wiki data plus everything needed to go from recognized text
/// to rendered pages. Built once, shared by reference.
#[derive(Debug)]
pub struct Library {
    source: MemoryStore,
    target: Option<MemoryStore>,
    index: EntryIndex,
    vocabulary: VocabularyMap,
    titles: TitleMap,
    resolver: Resolver,
    renderer: Renderer,
    max_matches: usize,
}

impl Library {
    pub fn new(source: MemoryStore) -> Self {
        let index = EntryIndex::from_store(&source);
        Self {
            source,
            target: None,
            index,
            vocabulary: VocabularyMap::default(),
            titles: TitleMap::default(),
            resolver: Resolver::default(),
            renderer: Renderer::default(),
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }

    /// Human-translated entries, linked to source entries by normalized name
    pub fn with_target(mut self, target: MemoryStore) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: VocabularyMap) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_titles(mut self, titles: TitleMap) -> Self {
        self.titles = titles;
        self
    }

    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Cap on hits returned by [`Library::lookup`]; 0 disables the cap
    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    pub fn source(&self) -> &MemoryStore {
        &self.source
    }

    pub fn target(&self) -> Option<&MemoryStore> {
        self.target.as_ref()
    }

    pub fn index(&self) -> &EntryIndex {
        &self.index
    }

    pub fn vocabulary(&self) -> &VocabularyMap {
        &self.vocabulary
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Match recognized text and resolve every match.
    ///
    /// Names that fail to resolve are skipped; two matches that land on the
    /// same entry produce one hit.
    pub fn lookup(&self, recognized_text: &str) -> Vec<LookupHit> {
        let text = DefaultPreprocessor.process(recognized_text);
        let names = match_entries(&text, &self.index);

        let mut reached = HashSet::new();
        let mut hits = Vec::new();
        for name in names {
            if self.max_matches > 0 && hits.len() >= self.max_matches {
                break;
            }

            let resolved = match self.resolver.resolve(&name, &self.source) {
                Ok(resolved) => resolved,
                Err(e) => {
                    tracing::debug!("Skipping match {name}: {e}");
                    continue;
                }
            };
            if !reached.insert(normalize(&resolved.name)) {
                continue;
            }

            let translation = self.translation_of(&resolved.name);
            hits.push(LookupHit {
                matched: name,
                name: resolved.name,
                content: resolved.content,
                hops: resolved.hops,
                translation,
            });
        }

        tracing::debug!("Lookup produced {} hits", hits.len());
        hits
    }

    fn translation_of(&self, name: &str) -> Option<Translation> {
        let target = self.target.as_ref()?;
        let entry = target.get_by_key(&normalize(name))?;
        match self.resolver.resolve(&entry.name, target) {
            Ok(resolved) => Some(Translation {
                name: resolved.name,
                content: resolved.content,
            }),
            Err(e) => {
                tracing::debug!("Translation of {name} unavailable: {e}");
                None
            }
        }
    }

    /// Follow an internal link produced by the renderer
    pub fn follow_link(&self, href: &str) -> Result<LookupHit, ResolveError> {
        let key = href
            .strip_prefix(self.renderer.options().link_scheme.as_str())
            .unwrap_or(href);
        let key = normalize(key);
        let name = self
            .index
            .primary(&key)
            .ok_or_else(|| ResolveError::NotFound(key.clone()))?;

        let resolved = self.resolver.resolve(name, &self.source)?;
        let translation = self.translation_of(&resolved.name);
        Ok(LookupHit {
            matched: name.to_string(),
            name: resolved.name,
            content: resolved.content,
            hops: resolved.hops,
            translation,
        })
    }

    pub fn display_title(&self, hit: &LookupHit, language: Language) -> String {
        self.titles.label(&hit.name, language)
    }

    /// Render a hit in the requested language.
    ///
    /// The target language prefers a human translation that differs from
    /// the source, then vocabulary substitution (flagged and noticed), then
    /// the source text flagged as untranslated.
    pub fn present(&self, hit: &LookupHit, language: Language) -> Page {
        let title = self.display_title(hit, language);
        let page = |content: &str, notice: Option<&str>| self.renderer.render_page(&title, content, notice);

        let (rendered, machine_translated, translation_missing) = match language {
            Language::Source => (page(&hit.content, None), false, false),
            Language::Target => match &hit.translation {
                Some(t) if t.content.trim() != hit.content.trim() => {
                    (page(&t.content, None), false, false)
                }
                _ if !self.vocabulary.is_empty() => {
                    let translated = translate_by_vocabulary(&hit.content, &self.vocabulary);
                    (page(&translated, Some(MACHINE_TRANSLATION_NOTICE)), true, false)
                }
                _ => (page(&hit.content, Some(TRANSLATION_MISSING_NOTICE)), false, true),
            },
        };

        Page {
            title,
            language,
            html: rendered.html,
            media: rendered.media,
            machine_translated,
            translation_missing,
        }
    }
}
