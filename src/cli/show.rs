use anyhow::Result;

use crate::cli::display::print_note_detail;
use crate::cli::ui::status;
use crate::db::NoteStore;

/// Execute the show command
pub fn run_show(store: &NoteStore, id: i64) -> Result<()> {
    match store.get(id)? {
        Some(note) => print_note_detail(&note),
        None => status(&format!("No note found with ID: {}", id)),
    }
    Ok(())
}
