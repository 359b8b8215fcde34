use anyhow::{anyhow, bail, Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use crate::cli::ui::status;
use crate::db::NoteStore;

/// Resolve `dest` the way the filesystem will, even before the file exists.
fn resolve_destination(dest: &Path) -> Result<PathBuf> {
    if dest.exists() {
        return Ok(dest.canonicalize()?);
    }

    let file_name = dest
        .file_name()
        .ok_or_else(|| anyhow!("Backup destination has no file name: {}", dest.display()))?;
    let parent = match dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent.canonicalize()?,
        None => std::env::current_dir()?,
    };
    Ok(parent.join(file_name))
}

/// Write a consistent copy of the database to `dest`, creating parent directories.
/// An existing file at `dest` is never overwritten.
pub fn backup_to(store: &NoteStore, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }

    let resolved = resolve_destination(dest)
        .with_context(|| format!("Could not resolve {}", dest.display()))?;
    if resolved == store.path().canonicalize()? {
        bail!("Backup destination is the database itself: {}", dest.display());
    }
    if resolved.exists() {
        bail!("Backup destination already exists: {}", dest.display());
    }

    let dest_str = resolved
        .to_str()
        .ok_or_else(|| anyhow!("Backup path is not valid UTF-8: {}", dest.display()))?;
    store
        .snapshot_to(dest_str)
        .with_context(|| format!("Could not back up to {}", dest.display()))?;

    let bytes = std::fs::metadata(&resolved)?.len();
    info!("backed up {} bytes to {}", bytes, resolved.display());
    Ok(bytes)
}

/// Execute the backup command
pub fn run_backup(store: &NoteStore, dest: &Path) -> Result<()> {
    backup_to(store, dest)?;
    status(&format!("Backed up to {}", dest.display()));
    Ok(())
}
