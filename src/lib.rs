pub mod cli;
pub mod db;
pub mod models;

pub use db::{NoteStore, StoreConfig, StoreError};
pub use models::{Note, NoteInput};
