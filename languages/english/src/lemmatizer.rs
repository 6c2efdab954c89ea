use dfwiki_core::language::{LemmaCandidate, Lemmatizer};

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Suffix-stripping lemmatizer for regular English inflections.
///
/// Over-generates (`walking` also yields `walke`); callers keep only the
/// candidates their dictionary knows.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLemmatizer;

impl EnglishLemmatizer {
    pub fn new() -> Self {
        Self
    }

    fn plural(word: &str, out: &mut Vec<LemmaCandidate>) {
        let len = word.chars().count();
        if let Some(stem) = word.strip_suffix("ies").filter(|_| len > 4) {
            out.push(LemmaCandidate::new(format!("{stem}y"), "plural"));
        } else if let Some(stem) = word.strip_suffix("es").filter(|_| len > 3) {
            // boxes -> box, goes -> go, horses -> horse
            out.push(LemmaCandidate::new(stem, "plural"));
            out.push(LemmaCandidate::new(format!("{stem}e"), "plural"));
        } else if let Some(stem) = word.strip_suffix('s').filter(|_| len > 2) {
            if !stem.ends_with('s') {
                out.push(LemmaCandidate::new(stem, "plural"));
            }
        }
    }

    fn past(word: &str, out: &mut Vec<LemmaCandidate>) {
        let len = word.chars().count();
        if let Some(stem) = word.strip_suffix("ied").filter(|_| len > 4) {
            out.push(LemmaCandidate::new(format!("{stem}y"), "past tense"));
        } else if let Some(stem) = word.strip_suffix("ed").filter(|_| len > 3) {
            // walked -> walk, liked -> like, stopped -> stop
            Self::stems(stem, "past tense", out);
        }
    }

    fn gerund(word: &str, out: &mut Vec<LemmaCandidate>) {
        if let Some(stem) = word.strip_suffix("ing").filter(|_| word.chars().count() > 4) {
            // walking -> walk, making -> make, running -> run
            Self::stems(stem, "gerund", out);
        }
    }

    fn degree(word: &str, out: &mut Vec<LemmaCandidate>) {
        let len = word.chars().count();
        if let Some(stem) = word.strip_suffix("iest").filter(|_| len > 5) {
            out.push(LemmaCandidate::new(format!("{stem}y"), "superlative"));
        } else if let Some(stem) = word.strip_suffix("est").filter(|_| len > 4) {
            Self::stems(stem, "superlative", out);
        } else if let Some(stem) = word.strip_suffix("ier").filter(|_| len > 4) {
            out.push(LemmaCandidate::new(format!("{stem}y"), "comparative"));
        } else if let Some(stem) = word.strip_suffix("er").filter(|_| len > 3) {
            Self::stems(stem, "comparative", out);
        }
    }

    /// `stem`, `stem + e` and the undoubled stem (`runn` -> `run`)
    fn stems(stem: &str, rule: &'static str, out: &mut Vec<LemmaCandidate>) {
        out.push(LemmaCandidate::new(stem, rule));

        let mut chars = stem.chars().rev();
        let (Some(last), Some(before)) = (chars.next(), chars.next()) else {
            return;
        };
        if !VOWELS.contains(&last) {
            out.push(LemmaCandidate::new(format!("{stem}e"), rule));
        }
        if last == before && !VOWELS.contains(&last) {
            let undoubled = &stem[..stem.len() - last.len_utf8()];
            out.push(LemmaCandidate::new(undoubled, rule));
        }
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn candidates(&self, word: &str) -> Vec<LemmaCandidate> {
        let word = word.trim().to_lowercase();
        let mut out = Vec::new();

        Self::plural(&word, &mut out);
        Self::past(&word, &mut out);
        Self::gerund(&word, &mut out);
        Self::degree(&word, &mut out);

        let mut seen = std::collections::HashSet::new();
        out.retain(|c| c.base_form != word && seen.insert(c.base_form.clone()));
        out
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn forms(word: &str) -> Vec<String> {
        EnglishLemmatizer
            .candidates(word)
            .into_iter()
            .map(|c| c.base_form)
            .collect()
    }

    #[rstest]
    #[case("babies", "baby")]
    #[case("boxes", "box")]
    #[case("horses", "horse")]
    #[case("cats", "cat")]
    #[case("walked", "walk")]
    #[case("liked", "like")]
    #[case("stopped", "stop")]
    #[case("carried", "carry")]
    #[case("walking", "walk")]
    #[case("making", "make")]
    #[case("running", "run")]
    #[case("biggest", "big")]
    #[case("happiest", "happy")]
    #[case("bigger", "big")]
    #[case("Cats", "cat")]
    fn test_candidate_contains_base(#[case] word: &str, #[case] base: &str) {
        assert!(
            forms(word).iter().any(|f| f == base),
            "{word} -> {:?} should contain {base}",
            forms(word)
        );
    }

    #[test]
    fn test_rules_and_exclusions() {
        let candidates = EnglishLemmatizer.candidates("running");
        assert!(candidates.iter().all(|c| c.rule == "gerund"));

        assert!(forms("ox").is_empty());
        assert!(forms("glass").is_empty());
        assert!(!forms("boxes").contains(&"boxes".to_string()));
    }
}
