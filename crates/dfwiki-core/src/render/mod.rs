//! Wiki markup to HTML.
//!
//! [`Renderer::render`] is a fixed sequence of stages, each taking the
//! previous stage's output:
//!
//! 1. file embeds are set aside
//! 2. literal markup tags are set aside
//! 3. everything else is HTML-escaped, exactly once
//! 4. tags come back
//! 5. embeds come back as images (or file links)
//! 6. external links
//! 7. internal links
//! 8. tables
//! 9. code, headings, bold/italic, rules, quotes, lists
//! 10. newlines become `<br>`
//!
//! Tables are built before emphasis so cell separators and identifiers such
//! as `_LAND_HOLDER_` are never read as italics. Nothing here fails: markup
//! that does not parse stays in the output as escaped text.

mod inline;
mod links;
mod media;
mod table;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::protect::{PlaceholderTable, SpanKind};

pub use links::link_href;
pub use media::{canonical_filename, image_url};

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://dwarffortresswiki.org/images";
pub const DEFAULT_LINK_SCHEME: &str = "wiki:";

const NOTICE_STYLE: &str =
    "color:#b06000;background:#fff4e0;padding:6px 10px;border-left:4px solid #f0a030;";

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid tag regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Where images live. `None` leaves resolution to the caller and renders
    /// embeds as `file:` links.
    pub image_base_url: Option<String>,
    /// Prefix of internal navigation hrefs
    pub link_scheme: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_base_url: Some(DEFAULT_IMAGE_BASE_URL.to_string()),
            link_scheme: DEFAULT_LINK_SCHEME.to_string(),
        }
    }
}

/// HTML plus every media file it references, keyed by URL (or `File:Name`
/// when resolution is deferred) and mapped to the canonical filename
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub html: String,
    pub media: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, content: &str) -> RenderedPage {
        let mut media = BTreeMap::new();
        let text = content.replace("\r\n", "\n");

        let mut embeds = PlaceholderTable::for_text(&text);
        let text = embeds.shield(&text, SpanKind::FileEmbed, SpanKind::FileEmbed.pattern());

        let mut tags = PlaceholderTable::for_text(&text);
        let text = tags.shield(&text, SpanKind::Tag, SpanKind::Tag.pattern());

        let text = html_escape::encode_quoted_attribute(&text).into_owned();

        let text = tags.restore(&text);

        let text = embeds.restore_with(&text, |_, directive| {
            media::embed_html(directive, &self.options, &mut media)
        });

        let text = links::external_links(&text);

        let text = links::internal_links(&text, &self.options.link_scheme);

        // Markup produced so far stays shielded until the very end
        let mut shields = PlaceholderTable::for_text(&text);
        let text = shields.shield(&text, SpanKind::Tag, &ANY_TAG);
        let text = table::convert_tables(&text);
        let text = shields.shield(&text, SpanKind::Tag, &ANY_TAG);

        let text = inline::convert(&text, &mut shields);

        let text = text.replace('\n', "<br>");
        let html = shields.restore(&text);

        tracing::trace!(
            "Rendered {} bytes into {} bytes, {} media",
            content.len(),
            html.len(),
            media.len()
        );
        RenderedPage { html, media }
    }

    /// [`Renderer::render`] under an `<h1>` title, with an optional notice
    /// paragraph (e.g. a machine-translation warning) between the two
    pub fn render_page(&self, title: &str, content: &str, notice: Option<&str>) -> RenderedPage {
        let body = self.render(content);

        let mut html = format!("<h1>{}</h1>", html_escape::encode_text(title));
        if let Some(notice) = notice {
            html.push_str(&format!(
                "<p style=\"{NOTICE_STYLE}\">{}</p>",
                html_escape::encode_text(notice)
            ));
        }
        html.push_str(&body.html);

        RenderedPage {
            html,
            media: body.media,
        }
    }
}

/// Render with default options
pub fn render(content: &str) -> RenderedPage {
    Renderer::default().render(content)
}
