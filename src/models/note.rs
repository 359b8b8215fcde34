use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Source for display, or `fallback` when none was recorded.
    pub fn source_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.source.as_deref().unwrap_or(fallback)
    }
}

/// Values a user entered for a note, before they reach the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub body: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Title cannot be empty.")]
    EmptyTitle,
    #[error("Note body cannot be empty.")]
    EmptyBody,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>, source: Option<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            source,
        }
    }

    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            body: note.body.clone(),
            source: note.source.clone(),
        }
    }

    /// Trim the title, require title and body, and turn a blank source into `None`.
    /// The body is kept verbatim since it may carry markup.
    pub fn validate(self) -> Result<Self, InputError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(InputError::EmptyTitle);
        }
        if self.body.trim().is_empty() {
            return Err(InputError::EmptyBody);
        }

        let source = self
            .source
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            title: title.to_string(),
            body: self.body,
            source,
        })
    }
}
