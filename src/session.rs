//! Editing session
//!
//! A [`Session`] owns the station list of the open file. Stations are
//! addressed by index, and edits leave the order of untouched stations
//! alone. Display sorting never reorders the list itself: it produces an
//! index permutation through [`Session::sorted_view`].

use std::cmp::Ordering;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::backup::{try_backup, BackupOutcome};
use crate::check::CheckReport;
use crate::error::EditorError;
use crate::sii::reader::{collect_records, parse_lines, read_file};
use crate::sii::writer::save_file;
use crate::sii::{StationRecord, FILE_EXTENSION};

/// Column a station listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Favorite,
    Name,
    Genre,
    Country,
    Bitrate,
}

/// What [`Session::open`] found besides the stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenReport {
    pub path: PathBuf,
    pub backup: BackupOutcome,
    pub check: CheckReport,
}

#[derive(Debug, Default)]
pub struct Session {
    stations: Vec<StationRecord>,
    current_file: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a station file, replacing the current list.
    ///
    /// When `backup` is set, the file is first copied into its `backup/`
    /// directory; a failed copy is reported in the [`OpenReport`] and does
    /// not stop the open. If the file cannot be read the session keeps its
    /// previous contents.
    pub fn open(&mut self, path: &Path, backup: bool) -> Result<OpenReport, EditorError> {
        let backup = if backup {
            try_backup(path)
        } else {
            BackupOutcome::Skipped
        };

        let text = read_file(path)?;
        let outcomes = parse_lines(&text);
        let check = CheckReport::from_lines(&outcomes);
        self.stations = collect_records(outcomes);
        self.current_file = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            stations = self.stations.len(),
            dropped = check.dropped.len(),
            "station file opened"
        );

        Ok(OpenReport {
            path: path.to_path_buf(),
            backup,
            check,
        })
    }

    /// Saves to the current file and returns the path written.
    ///
    /// A `.sii` extension is appended when the current path lacks one. An
    /// empty list is not saved.
    pub fn save(&mut self) -> Result<PathBuf, EditorError> {
        let current = self.current_file.clone().ok_or(EditorError::NoFile)?;
        self.write_to(&current)
    }

    /// Saves to `path`, which becomes the current file once written. On
    /// failure the current file is unchanged.
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf, EditorError> {
        self.write_to(path)
    }

    fn write_to(&mut self, target: &Path) -> Result<PathBuf, EditorError> {
        if self.stations.is_empty() {
            return Err(EditorError::NothingToSave);
        }

        let path = with_sii_extension(target);
        save_file(&path, &self.stations)?;
        tracing::info!(path = %path.display(), stations = self.stations.len(), "station file saved");
        self.current_file = Some(path.clone());
        Ok(path)
    }

    /// Drops the stations and forgets the current file.
    pub fn close(&mut self) {
        self.stations.clear();
        self.current_file = None;
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    pub fn get(&self, index: usize) -> Option<&StationRecord> {
        self.stations.get(index)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Appends a station and returns its index.
    pub fn add(&mut self, station: StationRecord) -> usize {
        self.stations.push(station);
        self.stations.len() - 1
    }

    /// Replaces the station at `index`.
    pub fn edit(&mut self, index: usize, station: StationRecord) -> Result<(), EditorError> {
        let len = self.stations.len();
        let slot = self
            .stations
            .get_mut(index)
            .ok_or(EditorError::IndexOutOfRange { index, len })?;
        *slot = station;
        Ok(())
    }

    /// Removes and returns the station at `index`.
    pub fn remove(&mut self, index: usize) -> Result<StationRecord, EditorError> {
        if index >= self.stations.len() {
            return Err(EditorError::IndexOutOfRange {
                index,
                len: self.stations.len(),
            });
        }
        Ok(self.stations.remove(index))
    }

    /// Indices of the stations in display order.
    ///
    /// Text columns compare case-insensitively as text, so bitrates sort
    /// as strings. Favorites sort after non-favorites when ascending. Ties
    /// keep list order.
    pub fn sorted_view(&self, column: SortColumn, descending: bool) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.stations.len()).collect();
        order.sort_by(|&a, &b| {
            let ordering = compare_by(column, &self.stations[a], &self.stations[b]);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        order
    }
}

fn compare_by(column: SortColumn, a: &StationRecord, b: &StationRecord) -> Ordering {
    let text = |s: &str| s.to_lowercase();
    match column {
        SortColumn::Favorite => a.favorite.cmp(&b.favorite),
        SortColumn::Name => text(&a.name).cmp(&text(&b.name)),
        SortColumn::Genre => text(&a.genre).cmp(&text(&b.genre)),
        SortColumn::Country => text(&a.country).cmp(&text(&b.country)),
        SortColumn::Bitrate => text(&a.bitrate).cmp(&text(&b.bitrate)),
    }
}

/// Appends `.sii` unless the path already ends in it (any case).
pub fn with_sii_extension(path: &Path) -> PathBuf {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(FILE_EXTENSION));
    if has_extension {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(FILE_EXTENSION);
    PathBuf::from(name)
}
