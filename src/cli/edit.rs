use anyhow::Result;

use crate::cli::form::note_form;
use crate::cli::ui::{status, FormResult};
use crate::db::NoteStore;
use crate::models::NoteInput;

/// Field overrides given on the command line; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct EditFields {
    pub title: Option<String>,
    pub body: Option<String>,
    pub source: Option<String>,
    pub clear_source: bool,
}

impl EditFields {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.source.is_none() && !self.clear_source
    }

    fn apply(self, mut input: NoteInput) -> NoteInput {
        if let Some(title) = self.title {
            input.title = title;
        }
        if let Some(body) = self.body {
            input.body = body;
        }
        if self.clear_source {
            input.source = None;
        } else if let Some(source) = self.source {
            input.source = Some(source);
        }
        input
    }
}

/// Execute the edit command
pub fn run_edit(store: &NoteStore, id: i64, fields: EditFields) -> Result<()> {
    let Some(note) = store.get(id)? else {
        status(&format!("No note found with ID: {}", id));
        return Ok(());
    };

    let current = NoteInput::from_note(&note);
    let input = if fields.is_empty() {
        match note_form(Some(&current))? {
            FormResult::Value(input) => input,
            FormResult::Cancelled => {
                status("Cancelled.");
                return Ok(());
            }
        }
    } else {
        fields.apply(current)
    };

    let input = input.validate()?;

    // The note may have been deleted while the form was open
    if store.update(id, &input.title, &input.body, input.source.as_deref())? {
        status("Saved.");
    } else {
        status(&format!("No note found with ID: {}", id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StoreConfig;
    use tempfile::TempDir;

    fn store_with_note() -> (TempDir, NoteStore, i64) {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::initialize(&StoreConfig::new(dir.path())).unwrap();
        let id = store.add("Meeting", "<p>Discuss budget</p>", Some("Email")).unwrap();
        (dir, store, id)
    }

    #[test]
    fn test_edit_title_only_keeps_other_fields() {
        let (_dir, store, id) = store_with_note();
        let before = store.get(id).unwrap().unwrap();

        let fields = EditFields {
            title: Some("Meeting v2".to_string()),
            ..Default::default()
        };
        run_edit(&store, id, fields).unwrap();

        let after = store.get(id).unwrap().unwrap();
        assert_eq!(after.title, "Meeting v2");
        assert_eq!(after.body, before.body);
        assert_eq!(after.source, before.source);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_edit_clear_source() {
        let (_dir, store, id) = store_with_note();

        let fields = EditFields {
            source: Some("ignored".to_string()),
            clear_source: true,
            ..Default::default()
        };
        run_edit(&store, id, fields).unwrap();

        assert_eq!(store.get(id).unwrap().unwrap().source, None);
    }

    #[test]
    fn test_edit_missing_note_is_not_an_error() {
        let (_dir, store, id) = store_with_note();

        let fields = EditFields {
            title: Some("ghost".to_string()),
            ..Default::default()
        };
        run_edit(&store, id + 100, fields).unwrap();

        assert_eq!(store.get(id).unwrap().unwrap().title, "Meeting");
    }

    #[test]
    fn test_edit_rejects_blank_body() {
        let (_dir, store, id) = store_with_note();

        let fields = EditFields {
            body: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(run_edit(&store, id, fields).is_err());
        assert_eq!(store.get(id).unwrap().unwrap().body, "<p>Discuss budget</p>");
    }
}
