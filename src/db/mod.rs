use log::{debug, info};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod error;
mod notes;
mod schema;

pub use error::{StorageCause, StoreError, StoreResult};
pub use schema::{SCHEMA_VERSION, TIMESTAMP_FORMAT};

pub const DEFAULT_DATA_DIR: &str = ".catat-segala";
pub const DEFAULT_FILE_NAME: &str = "notes.db";
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the note file lives and how long to wait on a locked database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

/// Handle to the note table.
///
/// Holds no connection: every operation opens the file, runs its statement,
/// commits and closes again, so a handle can be cloned and shared freely.
#[derive(Debug, Clone)]
pub struct NoteStore {
    path: PathBuf,
    busy_timeout: Duration,
}

impl NoteStore {
    /// Create the storage directory and schema if needed. Existing rows are kept.
    pub fn initialize(config: &StoreConfig) -> StoreResult<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| StoreError::unavailable(&config.data_dir, e))?;

        let store = Self {
            path: config.db_path(),
            busy_timeout: config.busy_timeout,
        };

        let mut conn = store
            .open(OpenFlags::SQLITE_OPEN_CREATE)
            .map_err(|e| StoreError::unavailable(&store.path, e))?;
        Self::migrate(&mut conn).map_err(|e| StoreError::unavailable(&store.path, e))?;

        info!("note store ready at {}", store.path.display());
        Ok(store)
    }

    /// Resolved storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a consistent copy of the database to `dest`. SQLite refuses to
    /// overwrite an existing file, the live database included.
    pub fn snapshot_to(&self, dest: &str) -> StoreResult<()> {
        let conn = self.connect().map_err(StoreError::ReadFailed)?;
        conn.execute("VACUUM INTO ?1", [dest])
            .map_err(StoreError::WriteFailed)?;
        debug!("snapshot written to {}", dest);
        Ok(())
    }

    /// Open the existing file. Only `initialize` may create it.
    fn connect(&self) -> rusqlite::Result<Connection> {
        self.open(OpenFlags::empty())
    }

    fn open(&self, extra: OpenFlags) -> rusqlite::Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX | extra;
        let conn = Connection::open_with_flags(&self.path, flags)?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    /// Run `op` inside an immediate transaction on a fresh connection and commit.
    fn write<T>(&self, op: impl FnOnce(&Transaction<'_>) -> rusqlite::Result<T>) -> StoreResult<T> {
        let run = || -> rusqlite::Result<T> {
            let mut conn = self.connect()?;
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let out = op(&tx)?;
            tx.commit()?;
            Ok(out)
        };
        run().map_err(StoreError::WriteFailed)
    }

    fn read<T>(&self, op: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> StoreResult<T> {
        let run = || -> rusqlite::Result<T> {
            let conn = self.connect()?;
            op(&conn)
        };
        run().map_err(StoreError::ReadFailed)
    }

    fn migrate(conn: &mut Connection) -> rusqlite::Result<()> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute_batch(schema::SCHEMA_V1)?;

        if Self::schema_version(&tx)?.is_none() {
            debug!("recording schema version {}", SCHEMA_VERSION);
            tx.execute(
                "INSERT INTO schema_version (id, version) VALUES (1, ?1)",
                [SCHEMA_VERSION],
            )?;
        }

        tx.commit()
    }

    fn schema_version(conn: &Connection) -> rusqlite::Result<Option<i32>> {
        conn.query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| {
            row.get(0)
        })
        .optional()
    }
}
