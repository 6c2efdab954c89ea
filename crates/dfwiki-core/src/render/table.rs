use std::sync::LazyLock;

use regex::{Captures, Regex};

const PRETTYTABLE: &str = "{{prettytable}}";
const PRETTYTABLE_ATTRS: &str = " class=\"prettytable\" border=\"1\" cellpadding=\"4\" cellspacing=\"0\" \
     style=\"margin: 1em 1em 1em 0; background: #f9f9f9; border: 1px #aaa solid; border-collapse: collapse;\"";

static TABLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\|(.*?)\|\}").expect("Invalid table regex"));

// `! LAND_HOLDER|-| civilization` starts a new row mid-line
static INLINE_ROW_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|!)([^\n|]+)\|-").expect("Invalid row break regex"));

static INLINE_CELL_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|\|?\s*").expect("Invalid cell separator regex"));

#[derive(Debug)]
struct Cell {
    header: bool,
    attrs: String,
    content: String,
}

impl Cell {
    fn new(header: bool, raw: &str) -> Self {
        let raw = raw.trim();
        let (attrs, content) = match raw.split_once('|') {
            Some((attrs, content)) if !raw.starts_with("[[") => (attrs.trim(), content.trim()),
            _ => ("", raw),
        };

        Self {
            header,
            attrs: attributes(attrs),
            content: content.to_string(),
        }
    }

    fn html(&self) -> String {
        let tag = if self.header { "th" } else { "td" };
        format!("<{tag}{}>{}</{tag}>", self.attrs, self.content)
    }
}

#[derive(Debug, Default)]
struct Row {
    attrs: String,
    cells: Vec<Cell>,
}

#[derive(Debug, Default)]
struct TableBuilder {
    caption: Option<String>,
    rows: Vec<Row>,
    current: Option<Row>,
}

impl TableBuilder {
    fn line(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        if let Some(caption) = line.strip_prefix("|+") {
            self.caption = Some(caption.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("|-") {
            self.start_row(rest.trim());
        } else if let Some(rest) = line.strip_prefix('!') {
            let row = self.current.get_or_insert_with(Row::default);
            row.cells
                .extend(rest.split("!!").map(|cell| Cell::new(true, cell)));
        } else if let Some(rest) = line.strip_prefix('|') {
            let row = self.current.get_or_insert_with(Row::default);
            row.cells
                .extend(rest.split("||").map(|cell| Cell::new(false, cell)));
        } else if let Some(cell) = self.current.as_mut().and_then(|row| row.cells.last_mut()) {
            // continuation of a multi-line cell
            cell.content.push('\n');
            cell.content.push_str(line);
        }
    }

    fn start_row(&mut self, rest: &str) {
        self.flush();

        let mut row = Row::default();
        if let Some(cells) = rest.strip_prefix('|') {
            // `|-| a | b` rows carry their cells inline
            row.cells = INLINE_CELL_SEPARATOR
                .split(cells)
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .map(|cell| Cell {
                    header: false,
                    attrs: String::new(),
                    content: cell.to_string(),
                })
                .collect();
        } else {
            row.attrs = attributes(rest);
        }
        self.current = Some(row);
    }

    fn flush(&mut self) {
        if let Some(row) = self.current.take() {
            self.rows.push(row);
        }
    }

    fn finish(mut self, attrs: &str) -> String {
        self.flush();

        let mut html = format!("<table{attrs}>");
        if let Some(caption) = &self.caption {
            html.push_str(&format!("<caption>{caption}</caption>"));
        }
        html.push_str("<tbody>");
        for row in self.rows.iter().filter(|row| !row.cells.is_empty()) {
            html.push_str(&format!("<tr{}>", row.attrs));
            for cell in &row.cells {
                html.push_str(&cell.html());
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        html
    }
}

/// Escaped attribute text back to markup, with a leading space when non-empty
fn attributes(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let raw = raw
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'");
    format!(" {raw}")
}

fn render_table(body: &str) -> String {
    let (first_line, rest) = body.split_once('\n').unwrap_or((body, ""));

    let first_line = first_line.replace(PRETTYTABLE, "");
    let mut attrs = if first_line.contains("{{") {
        String::new()
    } else {
        attributes(&first_line)
    };
    if body.contains(PRETTYTABLE) {
        attrs.push_str(PRETTYTABLE_ATTRS);
    }

    let rest = rest.replace(PRETTYTABLE, "");
    let rest = INLINE_ROW_BREAK.replace_all(&rest, "${1}${2}\n|-");

    let mut builder = TableBuilder::default();
    for line in rest.split('\n') {
        builder.line(line.trim());
    }
    builder.finish(&attrs)
}

/// Convert every closed `{| ... |}` block. Unterminated tables stay literal.
pub(super) fn convert_tables(text: &str) -> String {
    TABLE_BLOCK
        .replace_all(text, |caps: &Captures<'_>| render_table(&caps[1]))
        .into_owned()
}
