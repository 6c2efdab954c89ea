use html_escape::encode_text;

use crate::dictionary::EnglishEntry;

const TITLE_STYLE: &str = "color:#2c3e50;margin-bottom:10px;";
const MUTED_STYLE: &str = "color:#7f8c8d;";
const SECTION_STYLE: &str = "margin:15px 0;";
const HEADING_STYLE: &str = "color:#34495e;font-size:1.1em;";

fn exchange_label(code: &str) -> &str {
    match code {
        "p" => "过去式",
        "d" => "过去分词",
        "i" => "现在分词",
        "3" => "第三人称单数",
        "r" => "比较级",
        "t" => "最高级",
        "s" => "复数",
        "0" => "原型",
        "1" => "原型变化",
        other => other,
    }
}

/// Multi-line field as escaped text with `<br>` between lines
fn multiline(text: &str) -> String {
    text.split('\n')
        .flat_map(|line| line.split("\\n"))
        .map(|line| encode_text(line.trim()).into_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("<br>")
}

fn section(html: &mut Vec<String>, heading: &str, body: String) {
    if body.is_empty() {
        return;
    }
    html.push(format!(
        "<div style=\"{SECTION_STYLE}\"><h3 style=\"{HEADING_STYLE}\">{heading}</h3><p style=\"line-height:1.6;\">{body}</p></div>"
    ));
}

/// Dictionary card for `entry`. `query` is what the reader looked up; when it
/// differs from the headword (an inflected form) it is shown next to it.
pub fn format_entry_html(entry: &EnglishEntry, query: &str) -> String {
    let mut html = Vec::new();

    let mut title = format!("<h2 style=\"{TITLE_STYLE}\">{}", encode_text(&entry.word));
    let query = query.trim();
    if !query.is_empty() && !query.eq_ignore_ascii_case(&entry.word) {
        title.push_str(&format!(
            " <span style=\"{MUTED_STYLE}font-size:0.8em;\">(查询: {})</span>",
            encode_text(query)
        ));
    }
    title.push_str("</h2>");
    html.push(title);

    if !entry.phonetic.is_empty() {
        html.push(format!(
            "<p style=\"{MUTED_STYLE}margin:5px 0;\">[{}]</p>",
            encode_text(&entry.phonetic)
        ));
    }

    section(&mut html, "释义", multiline(&entry.translation));
    section(&mut html, "Definition", multiline(&entry.definition));

    if !entry.pos.is_empty() {
        html.push(format!(
            "<p style=\"{MUTED_STYLE}font-size:0.9em;\"><strong>词性:</strong> {}</p>",
            encode_text(&entry.pos)
        ));
    }

    if entry.collins > 0 {
        html.push(format!(
            "<p style=\"color:#f39c12;font-size:0.9em;\">柯林斯: {}</p>",
            "⭐".repeat(entry.collins.min(5) as usize)
        ));
    }

    if entry.oxford > 0 {
        html.push("<p style=\"color:#3498db;font-size:0.9em;\">📚 牛津词汇</p>".to_string());
    }

    let forms: Vec<String> = entry
        .forms()
        .into_iter()
        .map(|(code, form)| {
            format!(
                "<span style=\"margin-right:15px;\"><strong>{}:</strong> {}</span>",
                exchange_label(code),
                encode_text(form)
            )
        })
        .collect();
    section(&mut html, "词形变化", forms.join(" "));

    html.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dictionary::tests::sample;

    #[test]
    fn test_full_card() {
        let dict = sample();
        let walk = dict.get("walk").expect("walk");
        let html = format_entry_html(walk, "walking");

        assert!(html.starts_with("<h2 "));
        assert!(html.contains(">walk <span"));
        assert!(html.contains("(查询: walking)"));
        assert!(html.contains("[wɔ:k]"));
        assert!(html.contains("v. 走<br>n. 散步"));
        assert!(html.contains("柯林斯: ⭐⭐⭐⭐"));
        assert!(html.contains("牛津词汇"));
        assert!(html.contains("<strong>现在分词:</strong> walking"));
        assert!(html.contains("<strong>第三人称单数:</strong> walks"));
    }

    #[test]
    fn test_sparse_entry_and_escaping() {
        let entry = EnglishEntry {
            word: "a<b".to_string(),
            translation: "x & y".to_string(),
            ..Default::default()
        };
        let html = format_entry_html(&entry, "A<B");
        assert_eq!(
            html,
            "<h2 style=\"color:#2c3e50;margin-bottom:10px;\">a&lt;b</h2>\n\
             <div style=\"margin:15px 0;\"><h3 style=\"color:#34495e;font-size:1.1em;\">释义</h3>\
             <p style=\"line-height:1.6;\">x &amp; y</p></div>"
        );
    }
}
