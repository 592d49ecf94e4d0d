//! Note formatting and template interpolation.
//!
//! # Invariants
//! - Every note-derived value is HTML-escaped before embedding.
//! - Unknown placeholders resolve to `""`; malformed ones pass through.

use crate::model::note::Note;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Placeholder name filled with the formatted notes fragment.
pub const NOTES_PLACEHOLDER: &str = "notes";
/// Placeholder name filled with the number of rendered notes.
pub const COUNT_PLACEHOLDER: &str = "count";

/// Page served when no template file is configured on disk.
pub const DEFAULT_TEMPLATE: &str = include_str!("template.html");

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid placeholder regex")
});

/// Escapes `& < > " '` for safe embedding in HTML text and attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Formats notes as `div.note` fragments joined by newlines.
///
/// Returns an empty string for an empty slice.
pub fn format_notes(notes: &[Note]) -> String {
    notes
        .iter()
        .map(format_note)
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_note(note: &Note) -> String {
    let tags = note
        .tags
        .iter()
        .map(|tag| format!("<span class=\"tag\">{}</span>", escape_html(tag)))
        .collect::<Vec<_>>()
        .join("");
    format!(
        "<div class=\"note\">\n  <p>{}</p>\n  <div class=\"tags\">\n    {}\n  </div>\n</div>",
        escape_html(&note.content),
        tags
    )
}

/// Replaces every `{{ name }}` token with `data[name]`, or `""` when absent.
///
/// Values are inserted verbatim; callers escape them beforehand.
pub fn interpolate(template: &str, data: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            data.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Renders a full page: `{{notes}}` gets the formatted notes and
/// `{{count}}` the number of notes.
pub fn render_page(template: &str, notes: &[Note]) -> String {
    let data = HashMap::from([
        (NOTES_PLACEHOLDER.to_string(), format_notes(notes)),
        (COUNT_PLACEHOLDER.to_string(), notes.len().to_string()),
    ]);
    interpolate(template, &data)
}
