use std::path::{Path, PathBuf};

use crate::dictionary::{DictionaryError, EnglishDictionary};

pub struct EnglishDictionaryLoader;

impl EnglishDictionaryLoader {
    /// Load dictionary from file path
    pub fn load_from_file(path: &Path) -> Result<EnglishDictionary, DictionaryError> {
        tracing::info!("Loading English dictionary from file: {}", path.display());
        let dict = EnglishDictionary::from_file(path)?;
        tracing::info!("Loaded {} dictionary entries from file", dict.entry_count());
        Ok(dict)
    }

    /// Load `primary` and merge every additional dictionary over it, later
    /// files winning. Files that fail to load are logged and skipped.
    pub fn load_all(primary: &Path, additional: &[PathBuf]) -> EnglishDictionary {
        let mut dict = Self::load_from_file(primary).unwrap_or_else(|e| {
            tracing::warn!("Failed to load dictionary {}: {}", primary.display(), e);
            tracing::warn!("Starting with empty dictionary");
            EnglishDictionary::new()
        });

        for path in additional {
            match Self::load_from_file(path) {
                Ok(extra) => {
                    tracing::info!("Merging additional dictionary from: {}", path.display());
                    dict = dict.merge(extra);
                }
                Err(e) => {
                    tracing::warn!("Failed to load dictionary from {}: {}", path.display(), e);
                }
            }
        }

        dict
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dictionary::tests::SAMPLE;

    #[test]
    fn test_load_all_merges_and_skips_bad_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let primary = dir.path().join("dictionary.json");
        let extra = dir.path().join("extra.json");
        let broken = dir.path().join("broken.json");
        fs::write(&primary, SAMPLE).expect("write");
        fs::write(&extra, r#"[{"word": "urist", "translation": "n. 乌里斯特"}]"#).expect("write");
        fs::write(&broken, "not json").expect("write");

        let dict = EnglishDictionaryLoader::load_all(
            &primary,
            &[broken, dir.path().join("missing.json"), extra],
        );
        assert_eq!(dict.entry_count(), 5);
        assert!(dict.get("urist").is_some());
    }

    #[test]
    fn test_missing_primary_is_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let dict = EnglishDictionaryLoader::load_all(&dir.path().join("none.json"), &[]);
        assert!(dict.is_empty());
        assert!(matches!(
            EnglishDictionaryLoader::load_from_file(&dir.path().join("none.json")),
            Err(DictionaryError::Io(_))
        ));
    }
}
