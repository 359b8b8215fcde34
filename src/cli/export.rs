use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::cli::search::find_notes;
use crate::cli::ui::status;
use crate::db::{NoteStore, TIMESTAMP_FORMAT};
use crate::models::Note;

const CSV_HEADER: [&str; 5] = ["id", "title", "body", "source", "created_at"];

/// One CSV record. An absent source becomes an empty field.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i64,
    title: &'a str,
    body: &'a str,
    source: &'a str,
    created_at: String,
}

impl<'a> From<&'a Note> for ExportRow<'a> {
    fn from(note: &'a Note) -> Self {
        Self {
            id: note.id,
            title: &note.title,
            body: &note.body,
            source: note.source_or(""),
            created_at: note.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Write notes as CSV, header first, even when there are no notes.
pub fn write_csv<W: Write>(notes: &[Note], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for note in notes {
        wtr.serialize(ExportRow::from(note))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Execute the export command
pub fn run_export(
    store: &NoteStore,
    path: &Path,
    query: Option<&str>,
    literal: bool,
) -> Result<()> {
    let notes = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => find_notes(store, q, literal)?,
        None => store.list_all()?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    write_csv(&notes, file)?;

    status(&format!("Exported {} notes to {}", notes.len(), path.display()));
    Ok(())
}
