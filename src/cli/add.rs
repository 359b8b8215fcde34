use anyhow::Result;

use crate::cli::form::note_form;
use crate::cli::ui::{status, FormResult};
use crate::db::NoteStore;
use crate::models::NoteInput;

/// Execute the add command
pub fn run_add(
    store: &NoteStore,
    title: Option<String>,
    body: Option<String>,
    source: Option<String>,
) -> Result<()> {
    // If neither title nor body was given, run interactive mode
    let input = if title.is_none() && body.is_none() {
        match note_form(None)? {
            FormResult::Value(input) => input,
            FormResult::Cancelled => {
                status("Cancelled.");
                return Ok(());
            }
        }
    } else {
        NoteInput::new(title.unwrap_or_default(), body.unwrap_or_default(), source)
    };

    let input = input.validate()?;
    let id = store.add(&input.title, &input.body, input.source.as_deref())?;

    status(&format!("Created note {}.", id));
    Ok(())
}
