//! Language files
//!
//! Interface strings live in `languages/config_<code>.json`. The files are
//! plain JSON objects grouped by category:
//!
//! ```json
//! {
//!     "app_title": "Radio Station Editor",
//!     "buttons": { "open": "Open", "save": "Save" },
//!     "columns": { "name": "Name" },
//!     "messages": { "save_success": "File saved!", "save_error": "Save failed: {error}" },
//!     "languages": { "en": "English", "pt_BR": "Português" }
//! }
//! ```
//!
//! The crate treats them as opaque dictionaries: keys are looked up, never
//! interpreted.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::EditorError;

/// Keys every language file should define, by category.
pub const REQUIRED_KEYS: &[(&str, &[&str])] = &[
    (
        "buttons",
        &["open", "save", "add", "edit", "remove", "language"],
    ),
    (
        "columns",
        &["favorite", "name", "genre", "country", "bitrate"],
    ),
    ("messages", &["save_success", "save_error", "confirm_remove"]),
];

/// The strings of one language.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePack {
    code: String,
    strings: Map<String, Value>,
}

impl LanguagePack {
    /// A pack with no strings; every lookup falls through to its default.
    pub fn empty(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            strings: Map::new(),
        }
    }

    pub fn from_json_str(code: impl Into<String>, text: &str) -> Result<Self, EditorError> {
        let code = code.into();
        match serde_json::from_str(text)? {
            Value::Object(strings) => Ok(Self { code, strings }),
            _ => Err(EditorError::Language(format!(
                "language file for '{}' is not a JSON object",
                code
            ))),
        }
    }

    pub fn from_file(code: impl Into<String>, path: &Path) -> Result<Self, EditorError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(code, &text)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Looks up `category.key`.
    pub fn text(&self, category: &str, key: &str) -> Option<&str> {
        self.strings.get(category)?.get(key)?.as_str()
    }

    pub fn message(&self, key: &str) -> Option<&str> {
        self.text("messages", key)
    }

    pub fn message_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.message(key).unwrap_or(fallback)
    }

    pub fn column_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.text("columns", key).unwrap_or(fallback)
    }

    pub fn app_title(&self) -> Option<&str> {
        self.strings.get("app_title")?.as_str()
    }

    /// Languages offered by this file, as `(code, display name)` pairs.
    pub fn languages(&self) -> Vec<(String, String)> {
        let Some(Value::Object(languages)) = self.strings.get("languages") else {
            return Vec::new();
        };
        languages
            .iter()
            .filter_map(|(code, name)| Some((code.clone(), name.as_str()?.to_string())))
            .collect()
    }

    /// Required keys absent from this file, as `category.key`.
    pub fn missing_keys(&self) -> Vec<String> {
        REQUIRED_KEYS
            .iter()
            .flat_map(|(category, keys)| {
                keys.iter()
                    .filter(move |key| self.text(category, key).is_none())
                    .map(move |key| format!("{}.{}", category, key))
            })
            .collect()
    }

    /// Inserts a visible `[[key]]` placeholder for every missing required key.
    pub fn fill_missing(&mut self) {
        for (category, keys) in REQUIRED_KEYS {
            let entry = self
                .strings
                .entry(category.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(section) = entry {
                for key in *keys {
                    section
                        .entry(key.to_string())
                        .or_insert_with(|| Value::String(format!("[[{}]]", key)));
                }
            }
        }
    }
}

/// Replaces `{name}` in a message template.
///
/// ```
/// use sii_station_editor::language::format_message;
///
/// assert_eq!(
///     format_message("Save failed: {error}", "error", "disk full"),
///     "Save failed: disk full"
/// );
/// ```
pub fn format_message(template: &str, name: &str, value: &str) -> String {
    template.replace(&format!("{{{}}}", name), value)
}

/// The directory of language files.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    dir: PathBuf,
    default_code: String,
}

impl LanguageCatalog {
    pub fn new(dir: impl Into<PathBuf>, default_code: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            default_code: default_code.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    pub fn path_for(&self, code: &str) -> PathBuf {
        self.dir.join(format!("config_{}.json", code))
    }

    /// Loads exactly `code`, without falling back.
    pub fn load_exact(&self, code: &str) -> Result<LanguagePack, EditorError> {
        let path = self.path_for(code);
        LanguagePack::from_file(code, &path).map_err(|e| {
            EditorError::Language(format!(
                "failed to load language '{}' from {}: {}",
                code,
                path.display(),
                e
            ))
        })
    }

    /// Loads `code`, falling back to the default language.
    ///
    /// Fails only when the default language cannot be loaded either.
    pub fn load(&self, code: &str) -> Result<LanguagePack, EditorError> {
        match self.load_exact(code) {
            Ok(pack) => Ok(pack),
            Err(e) if code != self.default_code => {
                tracing::warn!(error = %e, fallback = %self.default_code, "falling back to default language");
                self.load_exact(&self.default_code)
            }
            Err(e) => Err(e),
        }
    }

    /// Codes of all `config_<code>.json` files, sorted.
    pub fn available_codes(&self) -> Result<Vec<String>, EditorError> {
        let mut codes = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();
            if let Some(code) = file_name
                .strip_prefix("config_")
                .and_then(|rest| rest.strip_suffix(".json"))
            {
                if !code.is_empty() {
                    codes.push(code.to_string());
                }
            }
        }
        codes.sort();
        Ok(codes)
    }
}
