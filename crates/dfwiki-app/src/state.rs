use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use dfwiki_config::Config;
use dfwiki_core::{Library, Renderer};
use dfwiki_lang_english::{EnglishDictionary, EnglishDictionaryLoader};
use dfwiki_store::{LoadError, TranslationMap, load_entries};
use dfwiki_translator::{MyMemoryTranslator, SentenceTranslator};
use dfwiki_types::Language;

/// Config plus loaders for everything a command may need. Data is read on
/// demand so `render` never touches the wiki directories.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.config.render.options())
    }

    pub fn load_translation_map(&self) -> anyhow::Result<TranslationMap> {
        let path = &self.config.wiki.translation_map;
        TranslationMap::from_file(path)
            .with_context(|| format!("Failed to load translation map {}", path.display()))
    }

    /// Source entries are required; translated entries are optional
    pub fn load_library(&self) -> anyhow::Result<Library> {
        let wiki = &self.config.wiki;
        let source = load_entries(&wiki.source_dir, Language::Source, None).with_context(|| {
            format!("Failed to load wiki entries from {}", wiki.source_dir.display())
        })?;

        let library = Library::new(source);
        let target = load_entries(
            &wiki.target_dir,
            Language::Target,
            Some(wiki.target_suffix.as_str()),
        );
        let library = match target {
            Ok(target) => library.with_target(target),
            Err(LoadError::NotFound(dir)) => {
                tracing::warn!("No translated entries at {}", dir.display());
                library
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to load translated entries from {}", wiki.target_dir.display())
                });
            }
        };

        let map = self.load_translation_map()?;
        Ok(library
            .with_vocabulary(map.vocabulary())
            .with_titles(map.titles())
            .with_resolver(self.config.lookup.resolver())
            .with_renderer(self.renderer())
            .with_max_matches(self.config.lookup.max_matches))
    }

    pub fn load_dictionary(&self) -> anyhow::Result<EnglishDictionary> {
        let config = &self.config.dictionary;
        if !config.enabled {
            bail!("Dictionary lookups are disabled in the config");
        }

        let additional: Vec<PathBuf> = config.additional_paths.iter().map(PathBuf::from).collect();
        let dictionary = EnglishDictionaryLoader::load_all(Path::new(&config.path), &additional);
        if dictionary.is_empty() {
            bail!("No dictionary entries loaded from {}", config.path);
        }
        Ok(dictionary)
    }

    pub fn sentence_translator(&self) -> anyhow::Result<SentenceTranslator<MyMemoryTranslator>> {
        let config = &self.config.translator;
        if !config.enabled {
            bail!("Sentence translation is disabled in the config");
        }
        if config.provider != "mymemory" {
            bail!("Unknown translation provider: {}", config.provider);
        }

        let provider = MyMemoryTranslator::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
        .context("Failed to build HTTP client")?;

        let translator =
            SentenceTranslator::new(provider, config.from_lang.clone(), config.to_lang.clone());
        if config.use_vocabulary {
            return Ok(translator.with_vocabulary(self.load_translation_map()?.vocabulary()));
        }
        Ok(translator)
    }
}
