use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::RenderOptions;

/// Characters left as-is in image paths
const FILENAME_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
struct Embed {
    filename: String,
    width: Option<u32>,
}

/// MediaWiki's stored form of a filename: trimmed, spaces as `_`, first letter uppercase
pub fn canonical_filename(filename: &str) -> String {
    let trimmed = filename.trim().replace(' ', "_");
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(trimmed.len());
    out.extend(first.to_uppercase());
    out.push_str(chars.as_str());
    out
}

/// Full-size image URL under `base`: `base/<h1>/<h1h2>/<name>` where the
/// hash directories come from the MD5 of the canonical filename.
pub fn image_url(base: &str, filename: &str) -> String {
    let name = canonical_filename(filename);
    let hex = format!("{:x}", md5::compute(name.as_bytes()));
    format!(
        "{}/{}/{}/{}",
        base.trim_end_matches('/'),
        &hex[..1],
        &hex[..2],
        utf8_percent_encode(&name, FILENAME_ENCODE)
    )
}

fn parse_px(option: &str) -> Option<u32> {
    let digits = option.trim().strip_suffix("px")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|n| *n > 0 && *n <= 4096)
}

/// `[[File:Name|thumb|120px]]` -> name and width
fn parse_embed(directive: &str) -> Option<Embed> {
    let inner = directive.strip_prefix("[[")?.strip_suffix("]]")?;
    let (_, rest) = inner.split_once(':')?;
    let mut options = rest.split('|');
    let filename = canonical_filename(options.next()?);
    if filename.is_empty() {
        return None;
    }

    Some(Embed {
        filename,
        width: options.find_map(parse_px),
    })
}

/// Element for one embed directive, recording the file in `media`.
///
/// Directives that name no file fall back to their escaped source text.
pub(super) fn embed_html(
    directive: &str,
    options: &RenderOptions,
    media: &mut BTreeMap<String, String>,
) -> String {
    let Some(embed) = parse_embed(directive) else {
        return html_escape::encode_quoted_attribute(directive).into_owned();
    };

    match options.image_base_url.as_deref() {
        Some(base) => {
            let url = image_url(base, &embed.filename);
            let width = embed
                .width
                .map(|w| format!(" width=\"{w}\""))
                .unwrap_or_default();
            let html = format!("<br><img src=\"{url}\"{width}><br>");
            media.insert(url, embed.filename);
            html
        }
        None => {
            let name = html_escape::encode_double_quoted_attribute(&embed.filename).into_owned();
            let html = format!("<a href=\"file:{name}\">File:{name}</a>");
            media.insert(format!("File:{}", embed.filename), embed.filename);
            html
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_canonical_filename() {
        assert_eq!(canonical_filename(" dwarf sprite.png "), "Dwarf_sprite.png");
        assert_eq!(canonical_filename("Ä b.png"), "Ä_b.png");
        assert_eq!(canonical_filename("   "), "");
    }

    #[test]
    fn test_image_url_layout() {
        let url = image_url("https://dwarffortresswiki.org/images/", "dwarf sprite.png");
        let hex = format!("{:x}", md5::compute(b"Dwarf_sprite.png"));
        assert_eq!(
            url,
            format!(
                "https://dwarffortresswiki.org/images/{}/{}/Dwarf_sprite.png",
                &hex[..1],
                &hex[..2]
            )
        );
        assert!(image_url("http://x", "a (b).png").ends_with("/A_%28b%29.png"));
    }

    #[test]
    fn test_parse_embed_options() {
        assert_eq!(
            parse_embed("[[File:ox.png|thumb|left|120px|An ox]]"),
            Some(Embed {
                filename: "Ox.png".to_string(),
                width: Some(120)
            })
        );
        assert_eq!(
            parse_embed("[[Image: ox.png]]").map(|e| e.width),
            Some(None)
        );
        assert_eq!(parse_embed("[[File: |120px]]"), None);
        assert_eq!(parse_px("0px"), None);
        assert_eq!(parse_px("abcpx"), None);
    }

    #[test]
    fn test_deferred_resolution_keys_by_file() {
        let options = RenderOptions {
            image_base_url: None,
            ..RenderOptions::default()
        };
        let mut media = BTreeMap::new();
        let html = embed_html("[[File:ox.png]]", &options, &mut media);
        assert_eq!(html, "<a href=\"file:Ox.png\">File:Ox.png</a>");
        assert_eq!(media.get("File:Ox.png").map(String::as_str), Some("Ox.png"));
    }
}
