use std::sync::LazyLock;

use dfwiki_types::Language;
use regex::Regex;

use crate::normalize::normalize;

static REDIRECT_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\A\s*#redirect\s*:?\s*\[\[([^\]]+?)\]\]").expect("Invalid redirect regex")
});

/// A named unit of wiki content in one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub raw_content: String,
    pub language: Language,
    redirect_target: Option<String>,
}

impl Entry {
    pub fn new(
        name: impl Into<String>,
        raw_content: impl Into<String>,
        language: Language,
    ) -> Self {
        let raw_content = raw_content.into();
        let redirect_target = parse_redirect(&raw_content);
        Self {
            name: name.into(),
            raw_content,
            language,
            redirect_target,
        }
    }

    pub fn is_redirect(&self) -> bool {
        self.redirect_target.is_some()
    }

    /// Name of the entry this one redirects to, without section or label
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect_target.as_deref()
    }

    pub fn key(&self) -> String {
        normalize(&self.name)
    }
}

/// Extract the target of a leading `#REDIRECT [[Target]]` directive
pub fn parse_redirect(content: &str) -> Option<String> {
    let caps = REDIRECT_DIRECTIVE.captures(content)?;
    let target = caps.get(1)?.as_str();
    // [[Target#Section|label]] -> Target
    let target = target.split('|').next().unwrap_or(target);
    let target = target.split('#').next().unwrap_or(target).trim();
    (!target.is_empty()).then(|| target.to_string())
}
