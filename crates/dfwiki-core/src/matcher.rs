use std::collections::HashSet;

use crate::index::EntryIndex;
use crate::normalize::normalize;

/// Shortest normalized candidate allowed to match by substring
pub const MIN_SUBSTRING_LEN: usize = 3;

/// Candidate strings pulled out of recognized text: each trimmed line first,
/// then each whitespace-separated word. Everything after the first `.` is cut
/// off (OCR likes to glue `.txt` or similar onto real words).
pub fn candidates(recognized_text: &str) -> Vec<String> {
    let lines = recognized_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());
    let words = recognized_text.split_whitespace();

    lines
        .chain(words)
        .map(|raw| {
            let raw = raw.split('.').next().unwrap_or(raw);
            normalize(raw)
        })
        .filter(|key| !key.is_empty())
        .collect()
}

/// Match recognized text against the index.
///
/// Exact key matches come first, then keys that start with or contain a
/// candidate of at least [`MIN_SUBSTRING_LEN`] characters. Names are
/// returned once each, in first-seen order. No match is an empty list.
pub fn match_entries(recognized_text: &str, index: &EntryIndex) -> Vec<String> {
    let candidates = candidates(recognized_text);
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    let mut accept = |names: &[String]| {
        for name in names {
            if seen.insert(name.clone()) {
                matches.push(name.clone());
            }
        }
    };

    for candidate in &candidates {
        accept(index.names(candidate));
    }

    for candidate in candidates.iter().filter(|c| c.len() >= MIN_SUBSTRING_LEN) {
        for (key, names) in index.iter() {
            if key.starts_with(candidate.as_str()) || key.contains(candidate.as_str()) {
                accept(names);
            }
        }
    }

    tracing::debug!(
        "Matched {} entries from {} candidates",
        matches.len(),
        candidates.len()
    );
    matches
}
