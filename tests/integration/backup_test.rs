//! Integration tests for backups taken when a file is opened
//!
//! Verifies that opening a station file for editing leaves an unmodified
//! copy in `backup/`, and that a failed copy never blocks the open.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use sii_station_editor::backup::{try_backup, BackupOutcome, BACKUP_DIR_NAME};
use sii_station_editor::session::Session;
use sii_station_editor::sii::StationRecord;

const STATION_FILE: &str = "SiiNunit\n{\nlive_stream_def : _nameless.28a.c076.a0f0 {\n stream_data: 1\n stream_data[0]: \"http://a.example|A|Rock|US|128|1\"\n }\n}\n";

/// Helper: files in the backup directory next to `path`
fn backup_files(path: &Path) -> Vec<PathBuf> {
    let dir = path.parent().unwrap().join(BACKUP_DIR_NAME);
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries.map(|e| e.unwrap().path()).collect();
    files.sort();
    files
}

/// Test that opening creates one backup with identical contents.
///
/// 1. Write a station file in a directory without backup/
/// 2. Open it with backups on
/// 3. Verify backup/ holds exactly one `.bak_` copy equal to the original
#[test]
fn test_open_creates_backup() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("live_streams.sii");
    fs::write(&path, STATION_FILE).unwrap();

    let mut session = Session::new();
    let report = session.open(&path, true).expect("Failed to open file");

    let files = backup_files(&path);
    assert_eq!(files.len(), 1, "expected one backup, found {:?}", files);

    let backup = &files[0];
    assert_eq!(report.backup, BackupOutcome::Created(backup.clone()));

    let name = backup.file_name().unwrap().to_string_lossy().into_owned();
    let stamp = name
        .strip_prefix("live_streams.sii.bak_")
        .expect("backup name starts with the original name");
    assert_eq!(stamp.len(), "YYYYMMDD_HHMMSS".len());
    assert_eq!(stamp.as_bytes()[8], b'_');
    assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));

    assert_eq!(fs::read_to_string(backup).unwrap(), STATION_FILE);
}

/// Test that the backup holds the file as it was before saving.
#[test]
fn test_backup_keeps_pre_edit_contents() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("live_streams.sii");
    fs::write(&path, STATION_FILE).unwrap();

    let mut session = Session::new();
    session.open(&path, true).expect("Failed to open file");
    session.add(StationRecord::new("http://b.example", "B", "Pop", "DE", "64", false));
    session.save().expect("Failed to save");

    let files = backup_files(&path);
    assert_eq!(files.len(), 1);
    assert_eq!(fs::read_to_string(&files[0]).unwrap(), STATION_FILE);
    assert_ne!(fs::read_to_string(&path).unwrap(), STATION_FILE);
}

/// Test that opening with backups off writes nothing.
#[test]
fn test_open_without_backup() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("live_streams.sii");
    fs::write(&path, STATION_FILE).unwrap();

    let mut session = Session::new();
    let report = session.open(&path, false).expect("Failed to open file");

    assert_eq!(report.backup, BackupOutcome::Skipped);
    assert!(!temp_dir.path().join(BACKUP_DIR_NAME).exists());
}

/// Test that a failed backup does not block the open.
///
/// 1. Put a regular file where backup/ would be created
/// 2. Open the station file with backups on
/// 3. Verify the open succeeds and reports the failed backup
#[test]
fn test_backup_failure_does_not_block_open() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("live_streams.sii");
    fs::write(&path, STATION_FILE).unwrap();
    fs::write(temp_dir.path().join(BACKUP_DIR_NAME), "not a directory").unwrap();

    let mut session = Session::new();
    let report = session.open(&path, true).expect("open should succeed");

    assert!(matches!(report.backup, BackupOutcome::Failed(_)));
    assert_eq!(session.len(), 1);
    assert_eq!(session.stations()[0].name, "A");
}

/// Test that backing up a missing file reports the failure.
#[test]
fn test_try_backup_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let outcome = try_backup(&temp_dir.path().join("missing.sii"));
    assert!(matches!(outcome, BackupOutcome::Failed(_)));
}
