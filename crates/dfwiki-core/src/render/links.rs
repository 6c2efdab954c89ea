use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::normalize::normalize;

const LINK_STYLE: &str = "color:#1a73e8;text-decoration:none;";

static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]\n]+)\]\((https?://[^\s)]+)\)").expect("Invalid markdown link regex")
});

static EXTERNAL_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(https?://[^\s\]]+)(?:\s+([^\]]+))?\]").expect("Invalid external link regex")
});

static INTERNAL_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]*))?\]\]").expect("Invalid internal link regex")
});

fn external_anchor(url: &str, text: &str) -> String {
    format!("<a href=\"{url}\" target=\"_blank\" style=\"{LINK_STYLE}\">{text}</a>")
}

/// `[text](url)`, `[url text]` and `[url]`, opened outside the viewer
pub(super) fn external_links(text: &str) -> String {
    let text = MARKDOWN_LINK.replace_all(text, |caps: &Captures<'_>| {
        external_anchor(&caps[2], &caps[1])
    });

    EXTERNAL_LINK
        .replace_all(&text, |caps: &Captures<'_>| {
            let url = &caps[1];
            let label = caps.get(2).map_or(url, |m| m.as_str());
            external_anchor(url, label)
        })
        .into_owned()
}

/// Navigation href for an escaped link target
pub fn link_href(scheme: &str, target: &str) -> String {
    let target = html_escape::decode_html_entities(target);
    let page = match target.split_once('#') {
        Some((page, _)) if !page.trim().is_empty() => page,
        _ => target.as_ref(),
    };
    format!("{scheme}{}", normalize(page))
}

/// `[[target]]` and `[[target|label]]`. The href carries the normalized
/// target; the visible text is the label, or the target, as written.
///
/// Emphasis inside the label is converted here, so quotes around the whole
/// link pair with each other and not with quotes in the label.
pub(super) fn internal_links(text: &str, scheme: &str) -> String {
    INTERNAL_LINK
        .replace_all(text, |caps: &Captures<'_>| {
            let target = &caps[1];
            let label = caps
                .get(2)
                .map(|m| m.as_str())
                .filter(|label| !label.trim().is_empty())
                .unwrap_or(target);
            format!(
                "<a href=\"{}\" style=\"{LINK_STYLE}\">{}</a>",
                link_href(scheme, target),
                super::inline::quote_emphasis(label)
            )
        })
        .into_owned()
}
