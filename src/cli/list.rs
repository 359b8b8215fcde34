use anyhow::Result;

use crate::cli::display::{notes_to_json, print_notes_table};
use crate::db::NoteStore;

/// Execute the list command
pub fn run_list(store: &NoteStore, json: bool) -> Result<()> {
    let notes = store.list_all()?;

    if json {
        println!("{}", notes_to_json(&notes)?);
    } else {
        print_notes_table(&notes);
    }

    Ok(())
}
