use unicode_normalization::UnicodeNormalization;

/// Cleanup applied to recognized text before matching
pub trait Preprocessor {
    /// NFKC-fold (full-width OCR glyphs become ASCII), drop `\r`, trim.
    /// Line breaks are kept; the matcher uses each line as a candidate.
    fn process(&self, text: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            return String::new();
        }

        let text: String = text.nfkc().filter(|&c| c != '\r').collect();
        text.trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_width_is_folded() {
        assert_eq!(DefaultPreprocessor.process("  Ｄｗａｒｆ　１２ "), "Dwarf 12");
    }

    #[test]
    fn test_lines_survive() {
        assert_eq!(
            DefaultPreprocessor.process("Your first\r\nfortress\n"),
            "Your first\nfortress"
        );
        assert_eq!(DefaultPreprocessor.process(" \n "), "");
    }
}
