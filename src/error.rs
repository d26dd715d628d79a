//! Error module
//!
//! Defines the crate-wide error type using `thiserror`. Per-line parse
//! problems and escape decoding problems are not errors at this level: they
//! are reported as values by the [`crate::sii`] codec. Only file-level
//! failures and rejected editing operations surface here.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the station editor.
///
/// # Error Categories
///
/// - **File errors**: the station file could not be read or written
/// - **Session errors**: an editing operation was rejected
/// - **Configuration errors**: invalid arguments, settings or language files
///
/// # Example
///
/// ```rust,ignore
/// use sii_station_editor::error::EditorError;
///
/// fn example() -> Result<(), EditorError> {
///     let text = std::fs::read_to_string("settings.json")?;
///     let _value: serde_json::Value = serde_json::from_str(&text)?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum EditorError {
    /// The station file could not be opened or read.
    ///
    /// No partial record list is produced when this happens.
    #[error("Failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The station file could not be written.
    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O error (backup copies, settings files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error for settings or language files.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Save was requested before any file was opened.
    #[error("No file is open")]
    NoFile,

    /// Save was requested for an empty station list.
    #[error("There are no stations to save")]
    NothingToSave,

    /// An edit or removal referenced a station that does not exist.
    #[error("Station index {index} is out of range (list has {len} stations)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A language file could not be loaded, even after falling back.
    #[error("Language error: {0}")]
    Language(String),

    /// `check` found lines that the parser skips.
    ///
    /// The report has already been printed; this error only selects the
    /// exit code.
    #[error("Check failed: {0}")]
    CheckFailed(String),
}
