//! User settings file
//!
//! Persists the chosen interface language in `user_settings.json`:
//!
//! ```json
//! {
//!     "language": "pt_BR"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl UserSettings {
    pub fn from_file(path: &Path) -> Result<Self, EditorError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Writes the settings as JSON indented with four spaces.
    pub fn write_to(&self, path: &Path) -> Result<(), EditorError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        fs::write(path, buf)?;
        Ok(())
    }
}

/// Returns the last used language code.
///
/// A missing settings file is created holding `default_language`. An
/// unreadable one, or one without a `language` entry, yields
/// `default_language` and is left alone.
pub fn load_last_language(path: &Path, default_language: &str) -> String {
    if !path.exists() {
        if let Err(e) = save_language_preference(path, default_language) {
            tracing::warn!(path = %path.display(), error = %e, "could not create settings file");
        }
        return default_language.to_string();
    }

    match UserSettings::from_file(path) {
        Ok(settings) => settings
            .language
            .unwrap_or_else(|| default_language.to_string()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read settings, using default language");
            default_language.to_string()
        }
    }
}

/// Stores `language` as the preferred language.
pub fn save_language_preference(path: &Path, language: &str) -> Result<(), EditorError> {
    UserSettings {
        language: Some(language.to_string()),
    }
    .write_to(path)
}
