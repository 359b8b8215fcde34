use anyhow::Result;

use crate::cli::display::format_created_at;
use crate::cli::ui::{confirm, status};
use crate::db::NoteStore;

/// Execute the delete command
pub fn run_delete(store: &NoteStore, id: i64, force: bool) -> Result<()> {
    let Some(note) = store.get(id)? else {
        status(&format!("No note found with ID: {}", id));
        return Ok(());
    };

    println!("{}", note.title);
    println!("  {}", format_created_at(&note));
    println!();

    if !force && !confirm(&format!("Delete note {}?", id))? {
        return Ok(());
    }

    if store.delete(id)? {
        status("Deleted.");
    } else {
        status(&format!("No note found with ID: {}", id));
    }

    Ok(())
}
