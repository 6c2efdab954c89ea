//! Placeholder protection for markup that must survive a text rewrite verbatim.
//!
//! A [`PlaceholderTable`] swaps spans (links, embeds, templates, tags, URLs)
//! for opaque tokens, lets the caller transform the remaining text, and then
//! puts the spans back. Tokens are made only of private-use code points:
//!
//! ```text
//! U+E000 <nonce digits> U+E002 <index digits> U+E001
//! ```
//!
//! They contain no ASCII, no word characters and no markup characters, so
//! neither HTML escaping nor any of the renderer/translator regexes can
//! match inside them. The nonce is drawn per table and re-drawn until the
//! token prefix does not already occur in the text being processed.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use uuid::Uuid;

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';
const SEP: char = '\u{E002}';
const DIGIT_BASE: u32 = 0xE010;
const RADIX: u128 = 16;

static FILE_EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\[\s*(?:file|image)\s*:[^\]]+\]\]").expect("Invalid file embed regex")
});

static INTERNAL_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[[^\]]+\]\]").expect("Invalid internal link regex"));

static TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^}]+\}\}").expect("Invalid template regex"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").expect("Invalid tag regex"));

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s\]]+").expect("Invalid url regex"));

/// Class of a protected span, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpanKind {
    /// `[[File:...]]` / `[[Image:...]]`
    FileEmbed,
    /// `[[target]]` and `[[target|label]]`
    InternalLink,
    /// `{{template}}`
    Template,
    /// Literal presentation tags such as `<span style="...">`
    Tag,
    /// Bare `http(s)://` URLs
    Url,
}

impl SpanKind {
    /// Every kind, in the order they are extracted
    pub const ALL: [SpanKind; 5] = [
        SpanKind::FileEmbed,
        SpanKind::InternalLink,
        SpanKind::Template,
        SpanKind::Tag,
        SpanKind::Url,
    ];

    pub fn pattern(self) -> &'static Regex {
        match self {
            SpanKind::FileEmbed => &FILE_EMBED,
            SpanKind::InternalLink => &INTERNAL_LINK,
            SpanKind::Template => &TEMPLATE,
            SpanKind::Tag => &TAG,
            SpanKind::Url => &URL,
        }
    }
}

#[derive(Debug, Clone)]
struct Span {
    kind: SpanKind,
    original: String,
}

/// Per-call mapping from issued tokens back to the spans they replaced
#[derive(Debug, Clone)]
pub struct PlaceholderTable {
    prefix: String,
    spans: Vec<Span>,
}

/// Output of [`protect`]
#[derive(Debug, Clone)]
pub struct Protected {
    pub text: String,
    pub table: PlaceholderTable,
}

/// Replace every span of the given kinds with a placeholder token.
///
/// Kinds are applied in [`SpanKind`] precedence order regardless of the
/// order they are passed in; within a kind the leftmost match wins and
/// matches never overlap. Unmatched text passes through unchanged.
pub fn protect(text: &str, kinds: &[SpanKind]) -> Protected {
    let mut kinds = kinds.to_vec();
    kinds.sort_unstable();
    kinds.dedup();

    let mut table = PlaceholderTable::for_text(text);
    let mut protected = text.to_string();
    for kind in kinds {
        protected = table.shield(&protected, kind, kind.pattern());
    }

    Protected {
        text: protected,
        table,
    }
}

impl PlaceholderTable {
    /// Create an empty table whose tokens cannot collide with `text`
    pub fn for_text(text: &str) -> Self {
        loop {
            let nonce = Uuid::new_v4().as_u128() & u128::from(u64::MAX);
            let mut prefix = String::new();
            prefix.push(OPEN);
            push_digits(&mut prefix, nonce);
            prefix.push(SEP);

            if !text.contains(&prefix) {
                return Self {
                    prefix,
                    spans: Vec::new(),
                };
            }
            tracing::trace!("placeholder nonce collided with input, drawing another");
        }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Register `original` and return the token that stands in for it
    pub fn issue(&mut self, kind: SpanKind, original: impl Into<String>) -> String {
        let index = self.spans.len();
        self.spans.push(Span {
            kind,
            original: original.into(),
        });

        let mut token = self.prefix.clone();
        push_digits(&mut token, index as u128);
        token.push(CLOSE);
        token
    }

    /// Replace every match of `pattern` in `text` with a token of `kind`
    pub fn shield(&mut self, text: &str, kind: SpanKind, pattern: &Regex) -> String {
        pattern
            .replace_all(text, |caps: &Captures<'_>| self.issue(kind, &caps[0]))
            .into_owned()
    }

    /// Put every span back exactly as it was captured
    pub fn restore(&self, text: &str) -> String {
        self.restore_with(text, |_, original| original.to_string())
    }

    /// Put spans back, letting `render` rewrite each one by kind.
    ///
    /// Spans that were captured inside a later span are expanded first, so
    /// `render` always sees fully restored text.
    pub fn restore_with<F>(&self, text: &str, mut render: F) -> String
    where
        F: FnMut(SpanKind, &str) -> String,
    {
        let mut out = String::with_capacity(text.len());
        self.expand_into(text, &mut out, &mut render);
        out
    }

    fn expand_into(
        &self,
        text: &str,
        out: &mut String,
        render: &mut dyn FnMut(SpanKind, &str) -> String,
    ) {
        let mut rest = text;
        while let Some(pos) = rest.find(&self.prefix) {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + self.prefix.len()..];

            match parse_index(after).and_then(|(index, used)| Some((self.spans.get(index)?, used)))
            {
                Some((span, used)) => {
                    let mut inner = String::with_capacity(span.original.len());
                    self.expand_into(&span.original, &mut inner, render);
                    out.push_str(&render(span.kind, &inner));
                    rest = &after[used..];
                }
                None => {
                    out.push_str(&self.prefix);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
    }
}

fn push_digits(out: &mut String, mut value: u128) {
    let mut digits = Vec::new();
    loop {
        digits.push((value % RADIX) as u32);
        value /= RADIX;
        if value == 0 {
            break;
        }
    }
    for digit in digits.into_iter().rev() {
        if let Some(c) = char::from_u32(DIGIT_BASE + digit) {
            out.push(c);
        }
    }
}

/// Parse `<digits>CLOSE` at the start of `text`, returning the index and the
/// number of bytes consumed
fn parse_index(text: &str) -> Option<(usize, usize)> {
    let mut value: usize = 0;
    let mut seen_digit = false;

    for (offset, c) in text.char_indices() {
        if c == CLOSE {
            return seen_digit.then_some((value, offset + c.len_utf8()));
        }
        let digit = (c as u32).checked_sub(DIGIT_BASE).filter(|d| u128::from(*d) < RADIX)?;
        value = value.checked_mul(RADIX as usize)?.checked_add(digit as usize)?;
        seen_digit = true;
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn round_trip(text: &str) {
        let protected = protect(text, &SpanKind::ALL);
        assert_eq!(protected.table.restore(&protected.text), text);
    }

    #[test]
    fn test_round_trip_plain_and_markup() {
        round_trip("");
        round_trip("plain text without markup");
        round_trip("[[File:Dwarf.png|200px]] see [[Dwarf|dwarves]] and {{prettytable}}");
        round_trip("<span style=\"color:green\">ok</span> https://example.com/a_b");
        round_trip("unbalanced [[link and {{template and <b unclosed");
        round_trip("{{quote|see [[Dwarf]] at http://x.org}}");
        round_trip("日本語 [[矮人]] 🙂");
    }

    #[test]
    fn test_spans_are_replaced() {
        let protected = protect("a [[Dwarf]] b {{tpl}} c", &SpanKind::ALL);
        assert!(!protected.text.contains("[["));
        assert!(!protected.text.contains("{{"));
        assert!(protected.text.starts_with("a "));
        assert_eq!(protected.table.len(), 2);
    }

    #[test]
    fn test_only_requested_kinds_are_protected() {
        let protected = protect("[[Dwarf]] http://x.org", &[SpanKind::Url]);
        assert!(protected.text.contains("[[Dwarf]]"));
        assert!(!protected.text.contains("http"));
    }

    #[test]
    fn test_file_embed_takes_precedence_over_link() {
        let protected = protect("[[File:A.png]]", &[SpanKind::InternalLink, SpanKind::FileEmbed]);
        let kinds: Vec<SpanKind> = protected.table.spans.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SpanKind::FileEmbed]);
    }

    #[test]
    fn test_tokens_are_unique_within_a_call() {
        let mut table = PlaceholderTable::for_text("");
        let a = table.issue(SpanKind::Tag, "<b>");
        let b = table.issue(SpanKind::Tag, "<i>");
        assert_ne!(a, b);
        assert!(!a.is_ascii());
        assert!(a.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace()));
    }

    #[test]
    fn test_nonce_avoids_existing_prefix() {
        let first = PlaceholderTable::for_text("");
        let text = format!("{}{}{}", first.prefix, char::from_u32(DIGIT_BASE).unwrap(), CLOSE);
        let second = PlaceholderTable::for_text(&text);
        assert!(!text.contains(&second.prefix));
        let protected = protect(&text, &SpanKind::ALL);
        assert_eq!(protected.table.restore(&protected.text), text);
    }

    #[test]
    fn test_restore_with_rewrites_by_kind() {
        let protected = protect("x [[File:A.png]] [[B]]", &SpanKind::ALL);
        let restored = protected.table.restore_with(&protected.text, |kind, original| match kind {
            SpanKind::FileEmbed => "<img>".to_string(),
            _ => original.to_string(),
        });
        assert_eq!(restored, "x <img> [[B]]");
    }

    #[test]
    fn test_many_spans_restore_exactly() {
        let text: String = (0..40).map(|i| format!("[[Entry {i}]] ")).collect();
        round_trip(&text);
    }
}
