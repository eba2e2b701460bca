//! Panel rendering for API responses.
//!
//! ```text
//! ╭─ Index ─────────────────────────────╮
//! │ uid: movies                         │
//! │ primaryKey: id                      │
//! │ createdAt: 2024-01-02T10:00:00Z     │
//! ╰─────────────────────────────────────╯
//! ```

use colored::Colorize;
use serde_json::{Map, Value};
use unicode_width::UnicodeWidthStr;

const INDENT: usize = 2;

/// Render `value` inside a rounded box titled `title`.
///
/// The result has no trailing newline.
pub fn render_panel(title: &str, value: &Value) -> String {
    frame(title, &body_lines(value))
        .into_iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A rendered line and the columns it takes once printed.
///
/// Widths are measured on the plain text, before any styling is applied.
#[derive(Debug)]
struct Line {
    text: String,
    width: usize,
}

impl Line {
    fn plain(text: String) -> Self {
        let width = text.width();
        Self { text, width }
    }

    fn field(indent: usize, key: &str, rest: &str) -> Self {
        Self {
            text: format!("{}{}{rest}", " ".repeat(indent), key.cyan()),
            width: indent + key.width() + rest.width(),
        }
    }

    fn indented(self, indent: usize) -> Self {
        Self {
            text: format!("{}{}", " ".repeat(indent), self.text),
            width: indent + self.width,
        }
    }
}

fn body_lines(value: &Value) -> Vec<Line> {
    match value {
        Value::Object(map) if !map.is_empty() => object_lines(map, 0),
        Value::Array(items) if inline(value).is_none() => array_lines(items, 0),
        other => inline(other).map_or_else(Vec::new, |text| vec![Line::plain(text)]),
    }
}

fn object_lines(map: &Map<String, Value>, indent: usize) -> Vec<Line> {
    let mut lines = Vec::new();
    for (key, value) in map {
        if let Some(text) = inline(value) {
            lines.push(Line::field(indent, key, &format!(": {text}")));
            continue;
        }
        lines.push(Line::field(indent, key, ":"));
        match value {
            Value::Object(inner) => lines.extend(object_lines(inner, indent + INDENT)),
            Value::Array(items) => lines.extend(array_lines(items, indent + INDENT)),
            _ => {},
        }
    }
    lines
}

/// Each element of an array holding objects becomes its own panel.
fn array_lines(items: &[Value], indent: usize) -> Vec<Line> {
    items
        .iter()
        .flat_map(|item| frame("", &body_lines(item)))
        .map(|line| line.indented(indent))
        .collect()
}

/// Single-line form of a value, or `None` when it needs a block.
fn inline(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("None".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.replace('\n', " ")),
        Value::Object(map) if map.is_empty() => Some("{}".to_string()),
        Value::Object(_) => None,
        Value::Array(items) => {
            let parts = items.iter().map(inline).collect::<Option<Vec<_>>>()?;
            Some(format!("[{}]", parts.join(", ")))
        },
    }
}

fn frame(title: &str, lines: &[Line]) -> Vec<Line> {
    let title_width = if title.is_empty() { 0 } else { title.width() + 2 };
    let content_width = lines
        .iter()
        .map(|line| line.width)
        .max()
        .unwrap_or(0)
        .max(title_width + 1);
    let width = content_width + 4;

    let mut out = Vec::with_capacity(lines.len() + 2);
    let top = if title.is_empty() {
        format!("╭{}╮", "─".repeat(content_width + 2))
    } else {
        let fill = content_width + 2 - title_width - 1;
        format!("╭─ {} {}╮", title.bold(), "─".repeat(fill))
    };
    out.push(Line { text: top, width });
    for line in lines {
        let fill = content_width - line.width;
        out.push(Line {
            text: format!("│ {}{} │", line.text, " ".repeat(fill)),
            width,
        });
    }
    out.push(Line {
        text: format!("╰{}╯", "─".repeat(content_width + 2)),
        width,
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain(title: &str, value: &Value) -> String {
        colored::control::set_override(false);
        render_panel(title, value)
    }

    #[test]
    fn test_object_panel() {
        let out = plain("Index", &json!({"uid": "movies", "primaryKey": null}));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("╭─ Index "));
        assert!(lines[0].ends_with('╮'));
        assert_eq!(lines[1], "│ uid: movies      │");
        assert_eq!(lines[2], "│ primaryKey: None │");
        assert!(lines[3].starts_with('╰'));
    }

    #[test]
    fn test_borders_align() {
        let out = plain(
            "Settings",
            &json!({"stopWords": ["the", "a"], "synonyms": {}, "rankingRules": []}),
        );
        let widths: Vec<usize> = out.lines().map(UnicodeWidthStr::width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{out}");
        assert!(out.contains("stopWords: [the, a]"));
        assert!(out.contains("synonyms: {}"));
        assert!(out.contains("rankingRules: []"));
    }

    #[test]
    fn test_nested_object_indented() {
        let out = plain("Stats", &json!({"fieldDistribution": {"id": 3}}));
        assert!(out.contains("│ fieldDistribution:"));
        assert!(out.contains("│   id: 3"));
    }

    #[test]
    fn test_array_of_objects_nests_panels() {
        let out = plain(
            "Documents",
            &json!([{"id": 1, "title": "Carol"}, {"id": 2, "title": "Wonder Woman"}]),
        );
        assert_eq!(out.matches('╭').count(), 3);
        assert!(out.contains("title: Carol"));
        assert!(out.contains("title: Wonder Woman"));
        let widths: Vec<usize> = out.lines().map(UnicodeWidthStr::width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{out}");
    }

    #[test]
    fn test_plain_string_panel() {
        let out = plain("Delete Index", &json!("Index movies successfully deleted"));
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("│ Index movies successfully deleted │"));
    }

    #[test]
    fn test_wide_characters() {
        let out = plain("Document", &json!({"title": "千と千尋の神隠し"}));
        let widths: Vec<usize> = out.lines().map(UnicodeWidthStr::width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{out}");
    }

    #[test]
    fn test_field_width_ignores_styling() {
        let line = Line::field(2, "uid", ": movies");
        assert_eq!(line.width, 13);
        assert!(line.text.ends_with(": movies"));
        assert_eq!(line.indented(2).width, 15);
        assert_eq!(Line::plain("千と千尋".to_string()).width, 8);
    }
}
