use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "dictionary.json".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Main word list (ECDICT-style JSON)
    #[serde(default = "default_path")]
    pub path: String,
    /// Merged over the main list in order; later files win for the same word
    #[serde(default)]
    pub additional_paths: Vec<String>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_path(),
            additional_paths: vec![],
        }
    }
}
