use anyhow::Result;

use crate::cli::ui::{prompt_field, FormResult};
use crate::models::NoteInput;

/// Prompt for every note field in turn, prefilled from `current` when editing.
pub fn note_form(current: Option<&NoteInput>) -> Result<FormResult<NoteInput>> {
    let title = match prompt_field("title", current.map(|c| c.title.as_str()), true)? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(FormResult::Cancelled),
    };

    let body = match prompt_field("note", current.map(|c| c.body.as_str()), false)? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(FormResult::Cancelled),
    };

    let source = match prompt_field("source", current.and_then(|c| c.source.as_deref()), true)? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(FormResult::Cancelled),
    };

    Ok(FormResult::Value(NoteInput::new(title, body, Some(source))))
}
