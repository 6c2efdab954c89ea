use std::fs;
use std::path::{Path, PathBuf};

use dfwiki_core::{Entry, EntryStore, MemoryStore};
use dfwiki_types::Language;

use crate::error::LoadError;

/// Load every `<Name><suffix>.txt` in `dir` as an entry named `<Name>`.
///
/// Files are read in file name order. Files without the suffix are ignored;
/// unreadable or non-UTF-8 files are skipped with a warning.
pub fn load_entries(
    dir: &Path,
    language: Language,
    suffix: Option<&str>,
) -> Result<MemoryStore, LoadError> {
    if !dir.exists() {
        return Err(LoadError::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut store = MemoryStore::new(language);
    let mut skipped = 0;
    for path in paths {
        let Some(name) = entry_name(&path, suffix) else {
            continue;
        };

        match fs::read_to_string(&path) {
            Ok(content) => store.insert(Entry::new(name, content, language)),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                skipped += 1;
            }
        }
    }

    tracing::info!(
        "Loaded {} {} entries from {} ({} skipped)",
        store.len(),
        language,
        dir.display(),
        skipped
    );
    Ok(store)
}

fn entry_name(path: &Path, suffix: Option<&str>) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = match suffix {
        Some(suffix) if !suffix.is_empty() => stem.strip_suffix(suffix)?,
        _ => stem,
    };
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_loads_txt_files_in_name_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("Dwarf.txt"), "A dwarf.").expect("write");
        fs::write(dir.path().join("Dwarves.txt"), "#REDIRECT [[Dwarf]]").expect("write");
        fs::write(dir.path().join("notes.md"), "ignored").expect("write");
        fs::write(dir.path().join("Broken.txt"), [0xff, 0xfe, 0x00]).expect("write");

        let store = load_entries(dir.path(), Language::Source, None).expect("loads");
        assert_eq!(store.names(), vec!["Dwarf", "Dwarves"]);
        assert!(store.get("Dwarves").is_some_and(|e| e.is_redirect()));
        assert_eq!(store.language(), Language::Source);
    }

    #[test]
    fn test_suffix_is_required_and_stripped() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("Dwarf-CN.txt"), "矮人。").expect("write");
        fs::write(dir.path().join("Elf.txt"), "not translated").expect("write");

        let store = load_entries(dir.path(), Language::Target, Some("-CN")).expect("loads");
        assert_eq!(store.names(), vec!["Dwarf"]);
        assert_eq!(
            store.get("Dwarf").map(|e| e.raw_content.as_str()),
            Some("矮人。")
        );
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("wiki");
        assert!(matches!(
            load_entries(&missing, Language::Source, None),
            Err(LoadError::NotFound(_))
        ));

        let file = dir.path().join("file.txt");
        fs::write(&file, "x").expect("write");
        assert!(matches!(
            load_entries(&file, Language::Source, None),
            Err(LoadError::NotADirectory(_))
        ));
    }
}
