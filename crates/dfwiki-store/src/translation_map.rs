use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use dfwiki_core::{TitleMap, VocabularyMap};
use serde::Deserialize;

use crate::error::LoadError;

/// On-disk `translation_map.json`:
/// `{"title_map": {"Dwarf": "矮人"}, "vocabulary_map": {"dwarf": "矮人"}}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TranslationMap {
    /// Source title -> target title
    pub title_map: BTreeMap<String, String>,
    /// Source term -> target term
    pub vocabulary_map: BTreeMap<String, String>,
}

impl TranslationMap {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from `path`. A missing file is an empty map.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            tracing::warn!("Translation map {} not found, using an empty one", path.display());
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)?;
        let map = Self::from_json(&json)?;
        tracing::info!(
            "Loaded {} titles and {} vocabulary terms from {}",
            map.title_map.len(),
            map.vocabulary_map.len(),
            path.display()
        );
        Ok(map)
    }

    pub fn titles(&self) -> TitleMap {
        TitleMap::from_pairs(self.title_map.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn vocabulary(&self) -> VocabularyMap {
        VocabularyMap::new(self.vocabulary_map.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}
