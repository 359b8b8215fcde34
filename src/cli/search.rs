use anyhow::Result;

use crate::cli::display::{notes_to_json, print_notes_table};
use crate::cli::ui::status;
use crate::db::NoteStore;
use crate::models::Note;

/// Execute the search command
pub fn run_search(store: &NoteStore, query: &str, literal: bool, json: bool) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        status("Enter a search term.");
        return Ok(());
    }

    let notes = find_notes(store, query, literal)?;

    if json {
        println!("{}", notes_to_json(&notes)?);
    } else if notes.is_empty() {
        status("No matches.");
    } else {
        print_notes_table(&notes);
    }

    Ok(())
}

/// Run a search in the requested matching mode.
pub fn find_notes(store: &NoteStore, query: &str, literal: bool) -> Result<Vec<Note>> {
    let notes = if literal {
        store.search_literal(query)?
    } else {
        store.search(query)?
    };
    Ok(notes)
}
