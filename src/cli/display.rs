use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::cli::ui::{cell, status, truncate};
use crate::models::Note;

/// Date layout used everywhere a note's creation time is shown.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const TITLE_WIDTH: usize = 24;
const PREVIEW_WIDTH: usize = 40;
const SOURCE_WIDTH: usize = 16;

fn invisible_blocks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(?:head|style|script)\b[^>]*>.*?</(?:head|style|script)\s*>")
            .expect("static regex")
    })
}

fn line_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</(?:p|div|li|h[1-6]|tr)\s*>").expect("static regex")
    })
}

fn tags() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("static regex"))
}

/// Render a rich-text body as plain text: markup dropped, paragraphs on their own lines.
pub fn html_to_text(body: &str) -> String {
    let text = invisible_blocks().replace_all(body, "");
    let text = line_breaks().replace_all(&text, "\n");
    let text = tags().replace_all(&text, "");
    let text = decode_entities(&text);

    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim) {
        // collapse runs of blank lines
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Single-line plain-text preview of a body.
pub fn preview(body: &str, max_chars: usize) -> String {
    let text = html_to_text(body);
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&flat, max_chars)
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub fn format_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    dt.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Creation time in the local timezone.
pub fn format_created_at(note: &Note) -> String {
    format_timestamp(&note.created_at.with_timezone(&Local))
}

/// Print notes as an aligned table, newest first as given.
pub fn print_notes_table(notes: &[Note]) {
    if notes.is_empty() {
        status("No notes.");
        return;
    }

    let id_width = notes
        .iter()
        .map(|n| n.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);

    println!(
        "{:>id_width$}  {}  {}  {}  Created",
        "ID",
        cell("Title", TITLE_WIDTH),
        cell("Note", PREVIEW_WIDTH),
        cell("Source", SOURCE_WIDTH),
    );

    for note in notes {
        println!(
            "{:>id_width$}  {}  {}  {}  {}",
            note.id,
            cell(&note.title, TITLE_WIDTH),
            cell(&preview(&note.body, PREVIEW_WIDTH), PREVIEW_WIDTH),
            cell(note.source_or("-"), SOURCE_WIDTH),
            format_created_at(note),
        );
    }
}

/// Print one note with every field.
pub fn print_note_detail(note: &Note) {
    println!("ID:       {}", note.id);
    println!("Created:  {}", format_created_at(note));
    println!("Title:    {}", note.title);
    println!("Source:   {}", note.source_or("-"));
    println!();
    println!("{}", html_to_text(&note.body));
}

pub fn notes_to_json(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string_pretty(notes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_html_to_text_paragraphs() {
        let body = "<p>Discuss budget</p><p>Q3 &amp; Q4</p>";
        assert_eq!(html_to_text(body), "Discuss budget\nQ3 & Q4");
    }

    #[test]
    fn test_html_to_text_drops_document_head() {
        let body = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.0//EN"><html><head><meta name="qrichtext" content="1" /><style type="text/css">
p, li { white-space: pre-wrap; }
</style></head><body style=" font-size:9pt;">
<p style=" margin-top:0px;">hello<br />world</p></body></html>"#;
        assert_eq!(html_to_text(body), "hello\nworld");
    }

    #[test]
    fn test_html_to_text_plain_passthrough() {
        assert_eq!(html_to_text("just text"), "just text");
        assert_eq!(html_to_text("a\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_preview_is_single_line() {
        let body = "<p>first line</p>\n<p>second   line</p>";
        assert_eq!(preview(body, 80), "first line second line");
        assert_eq!(preview(body, 8), "first l…");
    }

    #[test]
    fn test_format_timestamp() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_timestamp(&dt), "09/03/2024 07:05:01");
    }

    #[test]
    fn test_notes_to_json() {
        let note = Note {
            id: 7,
            title: "Meeting".to_string(),
            body: "<p>x</p>".to_string(),
            source: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };

        let json = notes_to_json(&[note]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], 7);
        assert_eq!(value[0]["title"], "Meeting");
        assert!(value[0]["source"].is_null());
        assert_eq!(value[0]["created_at"], "2024-01-02T03:04:05Z");
    }
}
