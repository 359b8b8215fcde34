use std::path::PathBuf;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by [`super::NoteStore`]. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage directory or file could not be created or opened.
    #[error("storage unavailable at {}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: StorageCause,
    },

    #[error("failed to read notes")]
    ReadFailed(#[source] rusqlite::Error),

    #[error("failed to write notes")]
    WriteFailed(#[source] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum StorageCause {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: impl Into<StorageCause>) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            source: source.into(),
        }
    }
}
