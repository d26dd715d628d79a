//! Integration tests for language files and user settings
//!
//! Builds an application directory in a temporary location and checks
//! language selection, fallback and the persisted preference.

use std::fs;

use tempfile::TempDir;

use sii_station_editor::config::{AppPaths, DEFAULT_LANGUAGE};
use sii_station_editor::error::EditorError;
use sii_station_editor::language::format_message;
use sii_station_editor::settings::{load_last_language, save_language_preference, UserSettings};

const PT_BR: &str = r#"{
    "app_title": "Editor de Rádios",
    "buttons": {"open": "Abrir", "save": "Salvar", "add": "Adicionar", "edit": "Editar", "remove": "Remover", "language": "Idioma"},
    "columns": {"favorite": "Favorito", "name": "Nome", "genre": "Gênero", "country": "País", "bitrate": "Bitrate"},
    "messages": {"save_success": "Arquivo salvo!", "save_error": "Erro ao salvar: {error}", "confirm_remove": "Remover a rádio?"},
    "languages": {"pt_BR": "Português (Brasil)", "en": "English"}
}"#;

const EN: &str = r#"{
    "app_title": "Radio Station Editor",
    "buttons": {"open": "Open", "save": "Save"},
    "columns": {"name": "Name"},
    "messages": {"save_error": "Save failed: {error}"}
}"#;

/// Helper: an application directory with two language files
fn app_dir() -> (TempDir, AppPaths) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let paths = AppPaths::new(temp_dir.path());
    paths.ensure_languages_dir().expect("Failed to create languages dir");
    let catalog = paths.catalog();
    fs::write(catalog.path_for("pt_BR"), PT_BR).unwrap();
    fs::write(catalog.path_for("en"), EN).unwrap();
    (temp_dir, paths)
}

/// Test that the first run creates the settings file with the default.
///
/// 1. Start with no user_settings.json
/// 2. Load the last language
/// 3. Verify the default is returned and persisted
#[test]
fn test_first_run_creates_settings() {
    let (_temp_dir, paths) = app_dir();
    assert!(!paths.verify_structure().is_empty());

    let language = load_last_language(&paths.settings_path, DEFAULT_LANGUAGE);
    assert_eq!(language, "pt_BR");

    let settings = UserSettings::from_file(&paths.settings_path).unwrap();
    assert_eq!(settings.language.as_deref(), Some("pt_BR"));
    assert!(paths.verify_structure().is_empty());
}

/// Test that a saved preference is picked up on the next run.
#[test]
fn test_language_preference_round_trip() {
    let (_temp_dir, paths) = app_dir();
    save_language_preference(&paths.settings_path, "en").unwrap();

    let text = fs::read_to_string(&paths.settings_path).unwrap();
    assert_eq!(text, "{\n    \"language\": \"en\"\n}");

    let language = load_last_language(&paths.settings_path, DEFAULT_LANGUAGE);
    let pack = paths.catalog().load(&language).unwrap();
    assert_eq!(pack.code(), "en");
    assert_eq!(pack.app_title(), Some("Radio Station Editor"));
}

/// Test that an unknown language falls back to the default one.
#[test]
fn test_unknown_language_falls_back() {
    let (_temp_dir, paths) = app_dir();
    let catalog = paths.catalog();

    let pack = catalog.load("fr").unwrap();
    assert_eq!(pack.code(), "pt_BR");
    assert_eq!(pack.column_or("genre", "Genre"), "Gênero");

    assert!(matches!(catalog.load_exact("fr"), Err(EditorError::Language(_))));
}

/// Test that a corrupt settings file yields the default and is kept.
#[test]
fn test_corrupt_settings_uses_default() {
    let (_temp_dir, paths) = app_dir();
    fs::write(&paths.settings_path, "{ not json").unwrap();

    assert_eq!(load_last_language(&paths.settings_path, DEFAULT_LANGUAGE), "pt_BR");
    assert_eq!(fs::read_to_string(&paths.settings_path).unwrap(), "{ not json");
}

/// Test that incomplete language files are reported and filled.
#[test]
fn test_incomplete_language_file() {
    let (_temp_dir, paths) = app_dir();
    let catalog = paths.catalog();

    assert!(catalog.load_exact("pt_BR").unwrap().missing_keys().is_empty());

    let mut en = catalog.load_exact("en").unwrap();
    let missing = en.missing_keys();
    assert!(missing.contains(&"buttons.add".to_string()));
    assert!(missing.contains(&"messages.confirm_remove".to_string()));

    en.fill_missing();
    assert!(en.missing_keys().is_empty());
    assert_eq!(en.text("buttons", "add"), Some("[[add]]"));
    assert_eq!(en.text("buttons", "open"), Some("Open"));

    let message = format_message(en.message_or("save_error", "{error}"), "error", "disk full");
    assert_eq!(message, "Save failed: disk full");
}

/// Test listing the installed languages.
#[test]
fn test_available_codes() {
    let (_temp_dir, paths) = app_dir();
    fs::write(paths.languages_dir.join("notes.txt"), "ignored").unwrap();

    let codes = paths.catalog().available_codes().unwrap();
    assert_eq!(codes, vec!["en".to_string(), "pt_BR".to_string()]);

    let offered = paths.catalog().load_exact("pt_BR").unwrap().languages();
    assert_eq!(offered.len(), 2);
}
