use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::protect::{PlaceholderTable, SpanKind};

const HEADING_STYLE: &str =
    "background-color:#ffffcc;padding:8px 12px;border-left:4px solid #ffcc00;margin:12px 0;";
const PRE_STYLE: &str = "background:#f4f4f4;padding:8px;border-radius:4px;overflow-x:auto;";
const CODE_STYLE: &str =
    "background:#f4f4f4;padding:2px 4px;border-radius:3px;font-family:monospace;";
const RULE: &str = "<hr style=\"border:none;border-top:1px solid #ddd;margin:16px 0;\">";
const QUOTE_STYLE: &str =
    "border-left:4px solid #ddd;margin:8px 0;padding:8px 16px;background:#f9f9f9;color:#666;";
const LIST_STYLE: &str = "margin:8px 0;padding-left:24px;";
const ITEM_STYLE: &str = "margin:4px 0;";

// the escaper emits either form for `'`
const QUOTE: &str = "(?:&#x27;|&#39;)";

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("Invalid fenced code regex"));

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("Invalid inline code regex"));

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[^\s\[\]\x{E000}-\x{F8FF}]+").expect("Invalid bare url regex")
});

static BOLD_ITALIC_QUOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{QUOTE}{{5}}(.+?){QUOTE}{{5}}")).expect("Invalid bold italic regex")
});

static BOLD_QUOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{QUOTE}{{3}}(.+?){QUOTE}{{3}}")).expect("Invalid bold regex")
});

static ITALIC_QUOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{QUOTE}{{2}}(.+?){QUOTE}{{2}}")).expect("Invalid italic regex")
});

static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("Invalid bold regex"));

// no whitespace just inside either star
static ITALIC_STAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*").expect("Invalid italic regex")
});

static BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^&gt;[ \t]+(.+)$").expect("Invalid blockquote regex"));

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\t ]*[-*][\t ]+(.+)$").expect("Invalid list item regex"));

static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\t ]*(?:\d+\.|#)[\t ]+(.+)$").expect("Invalid list item regex")
});

/// Lightweight markup on escaped text whose tags are already shielded.
///
/// Code is converted first and shielded so nothing inside it is read as
/// markup; bare URLs are shielded for the same reason.
pub(super) fn convert(text: &str, shields: &mut PlaceholderTable) -> String {
    let text = code_blocks(text, shields);
    let text = inline_code(&text, shields);
    let text = shields.shield(&text, SpanKind::Url, &BARE_URL);
    let text = map_lines(&text, heading);
    let text = emphasis(&text);
    let text = map_lines(&text, rule);
    let text = BLOCKQUOTE
        .replace_all(&text, |caps: &Captures<'_>| {
            format!("<blockquote style=\"{QUOTE_STYLE}\">{}</blockquote>", &caps[1])
        })
        .into_owned();
    lists(&text)
}

fn code_blocks(text: &str, shields: &mut PlaceholderTable) -> String {
    FENCED_CODE
        .replace_all(text, |caps: &Captures<'_>| {
            let code = caps[1].strip_prefix('\n').unwrap_or(&caps[1]);
            let html = format!("<pre style=\"{PRE_STYLE}\"><code>{code}</code></pre>");
            shields.issue(SpanKind::Tag, html)
        })
        .into_owned()
}

fn inline_code(text: &str, shields: &mut PlaceholderTable) -> String {
    INLINE_CODE
        .replace_all(text, |caps: &Captures<'_>| {
            let html = format!("<code style=\"{CODE_STYLE}\">{}</code>", &caps[1]);
            shields.issue(SpanKind::Tag, html)
        })
        .into_owned()
}

fn map_lines(text: &str, rewrite: fn(&str) -> Option<String>) -> String {
    text.split('\n')
        .map(|line| rewrite(line).unwrap_or_else(|| line.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `==Text==` lines. The level is the shorter run of `=`; a single `=` is
/// the legacy highlighted `h3`.
fn heading(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let leading = trimmed.bytes().take_while(|&b| b == b'=').count();
    let trailing = trimmed.bytes().rev().take_while(|&b| b == b'=').count();
    let level = leading.min(trailing);
    if level == 0 || trimmed.len() <= 2 * level {
        return None;
    }

    let inner = trimmed[level..trimmed.len() - level].trim();
    if inner.is_empty() {
        return None;
    }

    let tag = if level == 1 { 3 } else { level.min(6) };
    Some(format!("<h{tag} style=\"{HEADING_STYLE}\">{inner}</h{tag}>"))
}

fn rule(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let is_rule = trimmed.len() >= 3
        && (trimmed.bytes().all(|b| b == b'-') || trimmed.bytes().all(|b| b == b'*'));
    is_rule.then(|| RULE.to_string())
}

fn emphasis(text: &str) -> String {
    let text = BOLD_ITALIC_QUOTES.replace_all(text, "<b><i>${1}</i></b>");
    let text = BOLD_QUOTES.replace_all(&text, "<b>${1}</b>");
    let text = BOLD_STARS.replace_all(&text, "<b>${1}</b>");
    let text = ITALIC_QUOTES.replace_all(&text, "<i>${1}</i>");
    let text = ITALIC_STAR.replace_all(&text, "<i>${1}</i>");
    underscore_italic(&text)
}

/// `'''''`, `'''` and `''` runs only, for link labels
pub(super) fn quote_emphasis(text: &str) -> String {
    let text = BOLD_ITALIC_QUOTES.replace_all(text, "<b><i>${1}</i></b>");
    let text = BOLD_QUOTES.replace_all(&text, "<b>${1}</b>");
    ITALIC_QUOTES.replace_all(&text, "<i>${1}</i>").into_owned()
}

/// `_text_` where neither outer neighbour is an ASCII letter or digit, so
/// identifiers like `LAND_HOLDER` are left alone.
fn underscore_italic(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search = 0;

    while let Some(offset) = text[search..].find('_') {
        let open = search + offset;
        search = open + 1;

        if let Some(close) = closing_underscore(text, open) {
            out.push_str(&text[copied..open]);
            out.push_str("<i>");
            out.push_str(&text[open + 1..close]);
            out.push_str("</i>");
            copied = close + 1;
            search = close + 1;
        }
    }

    out.push_str(&text[copied..]);
    out
}

fn closing_underscore(text: &str, open: usize) -> Option<usize> {
    let before = text[..open].chars().next_back();
    if before.is_some_and(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let body = &text[open + 1..];
    let first = body.chars().next()?;
    if first.is_whitespace() || first == '_' {
        return None;
    }

    let close = open + 1 + body.find(['_', '\n'])?;
    if !text[close..].starts_with('_') {
        return None;
    }
    if text[..close].chars().next_back().is_some_and(char::is_whitespace) {
        return None;
    }
    let after = text[close + 1..].chars().next();
    if after.is_some_and(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(close)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn open(self) -> String {
        let tag = match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        };
        format!("<{tag} style=\"{LIST_STYLE}\">")
    }

    fn close(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(caps) = UNORDERED_ITEM.captures(line) {
        return Some((ListKind::Unordered, caps.get(1)?.as_str()));
    }
    let caps = ORDERED_ITEM.captures(line)?;
    Some((ListKind::Ordered, caps.get(1)?.as_str()))
}

/// Group consecutive item lines into one list. The line breaks around and
/// inside a list are absorbed by the list element.
fn lists(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut open: Option<ListKind> = None;

    for (i, line) in text.split('\n').enumerate() {
        match (open, list_item(line)) {
            (Some(current), Some((kind, item))) if current == kind => {
                out.push_str(&format!("<li style=\"{ITEM_STYLE}\">{}</li>", item.trim()));
            }
            (current, Some((kind, item))) => {
                if let Some(current) = current {
                    out.push_str(current.close());
                }
                out.push_str(&kind.open());
                out.push_str(&format!("<li style=\"{ITEM_STYLE}\">{}</li>", item.trim()));
                open = Some(kind);
            }
            (Some(current), None) => {
                out.push_str(current.close());
                out.push_str(line);
                open = None;
            }
            (None, None) => {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(line);
            }
        }
    }

    if let Some(current) = open {
        out.push_str(current.close());
    }
    out
}
