use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::db::StoreConfig;

pub mod add;
pub mod backup;
pub mod delete;
pub mod display;
pub mod edit;
pub mod export;
pub mod form;
pub mod list;
pub mod search;
pub mod show;
pub mod ui;

pub use add::run_add;
pub use backup::run_backup;
pub use delete::run_delete;
pub use edit::{run_edit, EditFields};
pub use export::run_export;
pub use list::run_list;
pub use search::run_search;
pub use show::run_show;

#[derive(Parser)]
#[command(name = "catat")]
#[command(about = "Keep notes in a local SQLite file")]
#[command(version)]
pub struct Cli {
    /// Directory holding the notes database [default: .catat-segala]
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Database file name inside the data directory [default: notes.db]
    #[arg(long = "db", global = true, value_name = "FILE")]
    pub db_file: Option<String>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Store location from the defaults plus any command-line overrides.
    pub fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::default();
        if let Some(ref dir) = self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(ref file) = self.db_file {
            config.file_name = file.clone();
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all notes, newest first
    List(ListArgs),
    /// Show one note in full
    Show(ShowArgs),
    /// Add a new note
    Add(AddArgs),
    /// Edit an existing note
    Edit(EditArgs),
    /// Delete a note
    Delete(DeleteArgs),
    /// Search title, note text and source
    Search(SearchArgs),
    /// Export notes to a CSV file
    Export(ExportArgs),
    /// Write a copy of the database to a new file
    Backup(BackupArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Print JSON instead of a table
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: i64,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub title: Option<String>,
    /// Note text; HTML is kept as-is
    #[arg(short, long)]
    pub body: Option<String>,
    #[arg(short, long)]
    pub source: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: i64,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub body: Option<String>,
    #[arg(short, long)]
    pub source: Option<String>,
    /// Remove the source
    #[arg(long, conflicts_with = "source")]
    pub clear_source: bool,
}

impl From<EditArgs> for EditFields {
    fn from(args: EditArgs) -> Self {
        Self {
            title: args.title,
            body: args.body,
            source: args.source,
            clear_source: args.clear_source,
        }
    }
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for; `%` and `_` act as wildcards unless --literal
    pub query: String,
    /// Match `%` and `_` literally
    #[arg(short, long)]
    pub literal: bool,
    /// Print JSON instead of a table
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Destination CSV file
    pub path: PathBuf,
    /// Only export notes matching this search
    #[arg(short, long)]
    pub query: Option<String>,
    /// Match `%` and `_` in the query literally
    #[arg(short, long, requires = "query")]
    pub literal: bool,
}

#[derive(Args)]
pub struct BackupArgs {
    /// Destination file
    pub path: PathBuf,
}
