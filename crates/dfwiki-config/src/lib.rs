use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::lookup::LookupConfig;
use self::render::RenderConfig;
use self::translator::TranslatorConfig;
use self::wiki::WikiConfig;

pub mod dictionary;
pub mod lookup;
pub mod render;
pub mod translator;
pub mod wiki;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub wiki: WikiConfig,
    pub render: RenderConfig,
    pub lookup: LookupConfig,
    pub translator: TranslatorConfig,
    pub dictionary: DictionaryConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Load a JSON profile. Missing sections and fields take their defaults;
    /// environment overrides still win.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&data).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply `DFWIKI_*` overrides from `var`. Values that fail to parse are
    /// ignored with a warning.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var("DFWIKI_WIKI_DIR") {
            self.wiki.source_dir = PathBuf::from(dir);
        }
        if let Some(dir) = var("DFWIKI_WIKI_CN_DIR") {
            self.wiki.target_dir = PathBuf::from(dir);
        }
        if let Some(path) = var("DFWIKI_TRANSLATION_MAP") {
            self.wiki.translation_map = PathBuf::from(path);
        }
        if let Some(url) = var("DFWIKI_IMAGE_BASE_URL") {
            // empty defers image resolution
            self.render.image_base_url = Some(url).filter(|u| !u.is_empty());
        }
        if let Some(max) = parsed(&var, "DFWIKI_MAX_MATCHES") {
            self.lookup.max_matches = max;
        }
        if let Some(secs) = parsed(&var, "DFWIKI_TRANSLATOR_TIMEOUT_SECS") {
            self.translator.timeout_secs = secs;
        }
    }
}

fn parsed<T: std::str::FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let value = var(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring {key}={value}: not a valid number");
            None
        }
    }
}
