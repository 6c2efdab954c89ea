/// Canonical lookup key for an entry name or a recognized word.
///
/// Keeps ASCII letters and digits only, lowercased. Anything else (spaces,
/// punctuation, non-ASCII letters) is dropped rather than transliterated, so
/// keys stay compatible with indexes built from older wiki dumps.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Dwarf Fortress", "dwarffortress")]
    #[case("DWARF fortress", "dwarffortress")]
    #[case("Adder(Computing)", "addercomputing")]
    #[case("Your first fortress", "yourfirstfortress")]
    #[case("  ", "")]
    #[case("矮人 Dwarf", "dwarf")]
    #[case("Ürist_McMiner-2", "ristmcminer2")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case("Dwarf Fortress")]
    #[case("ÄÖÜ mixed 42 !!")]
    #[case("")]
    fn is_idempotent(#[case] input: &str) {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }
}
