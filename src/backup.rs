//! Backup copies of station files.
//!
//! Before a file is opened for editing, it is copied unmodified into a
//! sibling `backup/` directory as `<file_name>.bak_<YYYYMMDD_HHMMSS>`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::EditorError;

/// Name of the directory created next to the backed up file.
pub const BACKUP_DIR_NAME: &str = "backup";

/// Timestamp format of the backup suffix.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// What happened to the backup of an opened file.
///
/// Backups are best effort: a failure is reported here and the open goes
/// ahead anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A copy was written to this path.
    Created(PathBuf),
    /// The copy failed; holds the reason.
    Failed(String),
    /// Backups were turned off for this open.
    Skipped,
}

/// Path of the backup for `path` taken at `now`.
pub fn backup_path(path: &Path, now: DateTime<Local>) -> Result<PathBuf, EditorError> {
    let file_name = path.file_name().ok_or_else(|| {
        EditorError::InvalidArgument(format!("{} has no file name", path.display()))
    })?;
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let backup_name = format!(
        "{}.bak_{}",
        file_name.to_string_lossy(),
        now.format(BACKUP_TIMESTAMP_FORMAT)
    );
    Ok(parent.join(BACKUP_DIR_NAME).join(backup_name))
}

/// Copies `path` into its `backup/` directory and returns the copy's path.
pub fn create_backup(path: &Path) -> Result<PathBuf, EditorError> {
    let target = backup_path(path, Local::now())?;
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::copy(path, &target)?;
    Ok(target)
}

/// Runs [`create_backup`], logging the result instead of failing.
pub fn try_backup(path: &Path) -> BackupOutcome {
    match create_backup(path) {
        Ok(target) => {
            tracing::info!(backup = %target.display(), "backup created");
            BackupOutcome::Created(target)
        }
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "could not create backup, continuing without one");
            BackupOutcome::Failed(e.to_string())
        }
    }
}
