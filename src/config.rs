//! Application paths
//!
//! Everything the editor keeps besides the station files themselves lives
//! under one base directory:
//!
//! ```text
//! <base_dir>/
//!     user_settings.json
//!     languages/
//!         config_pt_BR.json
//!         config_en.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EditorError;
use crate::language::LanguageCatalog;

/// Language used when no preference is stored.
pub const DEFAULT_LANGUAGE: &str = "pt_BR";

pub const LANGUAGES_DIR_NAME: &str = "languages";
pub const SETTINGS_FILE_NAME: &str = "user_settings.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub base_dir: PathBuf,
    pub languages_dir: PathBuf,
    pub settings_path: PathBuf,
    pub default_language: String,
}

impl AppPaths {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            languages_dir: base_dir.join(LANGUAGES_DIR_NAME),
            settings_path: base_dir.join(SETTINGS_FILE_NAME),
            default_language: DEFAULT_LANGUAGE.to_string(),
            base_dir,
        }
    }

    /// Paths next to the running executable, or the working directory if
    /// that cannot be determined.
    pub fn from_executable() -> Self {
        let base_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base_dir)
    }

    pub fn catalog(&self) -> LanguageCatalog {
        LanguageCatalog::new(&self.languages_dir, &self.default_language)
    }

    pub fn ensure_languages_dir(&self) -> Result<(), EditorError> {
        fs::create_dir_all(&self.languages_dir)?;
        Ok(())
    }

    /// Problems with the expected layout, one message per problem.
    ///
    /// An empty list means the settings file and the default language file
    /// are both present.
    pub fn verify_structure(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !self.settings_path.exists() {
            problems.push(format!(
                "Settings file {} not found",
                self.settings_path.display()
            ));
        }
        let default_language_path = self.catalog().path_for(&self.default_language);
        if !default_language_path.exists() {
            problems.push(format!(
                "Default language file {} not found",
                default_language_path.display()
            ));
        }
        problems
    }
}
