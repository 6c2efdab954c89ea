use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_source_dir() -> PathBuf {
    PathBuf::from("wiki")
}

fn default_target_dir() -> PathBuf {
    PathBuf::from("wiki_cn")
}

fn default_target_suffix() -> String {
    "-CN".to_string()
}

fn default_translation_map() -> PathBuf {
    PathBuf::from("translation_map.json")
}

/// Where the wiki dumps and the translation map live
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WikiConfig {
    /// One `<Title>.txt` per source-language entry
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// Human translations, `<Title><suffix>.txt`
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,
    #[serde(default = "default_target_suffix")]
    pub target_suffix: String,
    #[serde(default = "default_translation_map")]
    pub translation_map: PathBuf,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            target_dir: default_target_dir(),
            target_suffix: default_target_suffix(),
            translation_map: default_translation_map(),
        }
    }
}
