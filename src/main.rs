//! SII Station Editor - edit the radio stations of live_streams.sii files
//!
//! Every command works on one station file. Commands that change the file
//! copy it into a sibling `backup/` directory first, apply the change and
//! write the file back in the exact format the game expects.
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 3 | File I/O error or failed check |
//! | 4 | Runtime error |

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sii_station_editor::backup::BackupOutcome;
use sii_station_editor::check::check_file;
use sii_station_editor::cli::{Args, Command, SortArg, StationFields};
use sii_station_editor::config::AppPaths;
use sii_station_editor::error::EditorError;
use sii_station_editor::language::{format_message, LanguagePack};
use sii_station_editor::session::{OpenReport, Session, SortColumn};
use sii_station_editor::settings::{load_last_language, save_language_preference};
use sii_station_editor::sii::{self, StationRecord};

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for file I/O errors
const EXIT_IO_ERROR: u8 = 3;
/// Exit code for a check that found dropped lines (same as IO error)
const EXIT_CHECK_FAILURE: u8 = 3;
/// Exit code for runtime errors
const EXIT_RUNTIME_ERROR: u8 = 4;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: Configuration error: {}", e);
        eprintln!("  Hint: Use --help for usage information");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    match run(args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

fn run(args: Args) -> Result<(), EditorError> {
    let paths = match &args.base_dir {
        Some(dir) => AppPaths::new(dir),
        None => AppPaths::from_executable(),
    };

    match args.command {
        Command::Encode { text } => {
            println!("{}", sii::encode(&text));
            Ok(())
        }
        Command::Decode { token } => {
            match sii::escape::try_decode(&token) {
                Ok(decoded) => println!("{}", decoded),
                Err(e) => {
                    eprintln!("Warning: {}; showing the token unchanged", e);
                    println!("{}", token);
                }
            }
            Ok(())
        }
        Command::Check { file } => run_check(&file),
        Command::Language { code } => run_language(&paths, code.as_deref()),
        Command::List { file, sort, desc } => {
            let pack = load_language_pack(&paths, args.language.as_deref());
            run_list(&file, sort, desc, &pack)
        }
        Command::Add {
            file,
            fields,
            favorite,
            no_backup,
        } => {
            let pack = load_language_pack(&paths, args.language.as_deref());
            run_add(&file, &fields, favorite, !no_backup, &pack)
        }
        Command::Edit {
            file,
            index,
            fields,
            favorite,
            no_backup,
        } => {
            let pack = load_language_pack(&paths, args.language.as_deref());
            run_edit(&file, index, &fields, favorite, !no_backup, &pack)
        }
        Command::Remove {
            file,
            index,
            no_backup,
        } => {
            let pack = load_language_pack(&paths, args.language.as_deref());
            run_remove(&file, index, !no_backup, &pack)
        }
    }
}

/// Loads the language used for messages. Missing language files only cost
/// the translations; English defaults are used instead.
fn load_language_pack(paths: &AppPaths, language: Option<&str>) -> LanguagePack {
    let code = match language {
        Some(code) => code.to_string(),
        None => load_last_language(&paths.settings_path, &paths.default_language),
    };
    match paths.catalog().load(&code) {
        Ok(mut pack) => {
            pack.fill_missing();
            pack
        }
        Err(e) => {
            tracing::warn!(error = %e, "using built-in messages");
            LanguagePack::empty(code)
        }
    }
}

fn run_check(file: &Path) -> Result<(), EditorError> {
    let report = check_file(file)?;
    println!("{}", report);
    if report.is_clean() {
        Ok(())
    } else {
        Err(EditorError::CheckFailed(format!(
            "{} dropped lines in {}",
            report.dropped.len(),
            file.display()
        )))
    }
}

fn run_language(paths: &AppPaths, code: Option<&str>) -> Result<(), EditorError> {
    let catalog = paths.catalog();

    let Some(code) = code else {
        for problem in paths.verify_structure() {
            eprintln!("Warning: {}", problem);
        }
        let current = load_last_language(&paths.settings_path, &paths.default_language);
        println!("Current language: {}", current);

        let names = catalog
            .load(&current)
            .map(|pack| pack.languages())
            .unwrap_or_default();
        let codes = catalog.available_codes().unwrap_or_default();
        if codes.is_empty() {
            println!("No language files in {}", catalog.dir().display());
        }
        for code in codes {
            match names.iter().find(|(c, _)| *c == code) {
                Some((_, name)) => println!("  {} ({})", code, name),
                None => println!("  {}", code),
            }
        }
        return Ok(());
    };

    let pack = catalog.load_exact(code)?;
    save_language_preference(&paths.settings_path, code)?;
    match pack.app_title() {
        Some(title) => println!("Language set to {} ({})", code, title),
        None => println!("Language set to {}", code),
    }
    Ok(())
}

fn run_list(
    file: &Path,
    sort: Option<SortArg>,
    desc: bool,
    pack: &LanguagePack,
) -> Result<(), EditorError> {
    let mut session = Session::new();
    let report = session.open(file, false)?;
    print_dropped(&report);

    let order = match sort {
        Some(column) => session.sorted_view(SortColumn::from(column), desc),
        None => (0..session.len()).collect(),
    };

    let headers = [
        "#".to_string(),
        pack.column_or("favorite", "Favorite").to_string(),
        pack.column_or("name", "Name").to_string(),
        pack.column_or("genre", "Genre").to_string(),
        pack.column_or("country", "Country").to_string(),
        pack.column_or("bitrate", "Bitrate").to_string(),
    ];
    let rows: Vec<[String; 6]> = order
        .iter()
        .map(|&i| {
            let station = &session.stations()[i];
            [
                i.to_string(),
                if station.favorite { "★" } else { "" }.to_string(),
                station.name.clone(),
                station.genre.clone(),
                station.country.clone(),
                station.bitrate.clone(),
            ]
        })
        .collect();

    let mut widths = headers.clone().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    print_row(&headers, &widths);
    for row in &rows {
        print_row(row, &widths);
    }
    Ok(())
}

fn print_row(cells: &[String; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect();
    println!("{}", line.join("  ").trim_end());
}

fn run_add(
    file: &Path,
    fields: &StationFields,
    favorite: bool,
    backup: bool,
    pack: &LanguagePack,
) -> Result<(), EditorError> {
    edit_file(file, backup, pack, |session| {
        let mut station = StationRecord::default();
        fields.apply_to(&mut station);
        station.favorite = favorite;
        let index = session.add(station);
        Ok(format!("Added station {}", index))
    })
}

fn run_edit(
    file: &Path,
    index: usize,
    fields: &StationFields,
    favorite: Option<bool>,
    backup: bool,
    pack: &LanguagePack,
) -> Result<(), EditorError> {
    edit_file(file, backup, pack, |session| {
        let mut station = session
            .get(index)
            .cloned()
            .ok_or(EditorError::IndexOutOfRange {
                index,
                len: session.len(),
            })?;
        fields.apply_to(&mut station);
        if let Some(favorite) = favorite {
            station.favorite = favorite;
        }
        session.edit(index, station)?;
        Ok(format!("Updated station {}", index))
    })
}

fn run_remove(
    file: &Path,
    index: usize,
    backup: bool,
    pack: &LanguagePack,
) -> Result<(), EditorError> {
    edit_file(file, backup, pack, |session| {
        let removed = session.remove(index)?;
        Ok(format!("Removed station {} ({})", index, removed.name))
    })
}

/// Opens `file`, applies `change` and saves the result.
fn edit_file<F>(
    file: &Path,
    backup: bool,
    pack: &LanguagePack,
    change: F,
) -> Result<(), EditorError>
where
    F: FnOnce(&mut Session) -> Result<String, EditorError>,
{
    let mut session = Session::new();
    let report = session.open(file, backup)?;
    print_backup(&report, pack);
    print_dropped(&report);

    let summary = change(&mut session)?;
    eprintln!("{}", summary);

    match session.save() {
        Ok(path) => {
            println!(
                "{} ({})",
                pack.message_or("save_success", "File saved successfully!"),
                path.display()
            );
            Ok(())
        }
        Err(EditorError::NothingToSave) => {
            eprintln!(
                "{}",
                pack.message_or("no_stations", "There are no stations to save")
            );
            Err(EditorError::NothingToSave)
        }
        Err(e) => {
            let template = pack.message_or("save_error", "Failed to save file: {error}");
            eprintln!("{}", format_message(template, "error", &e.to_string()));
            Err(e)
        }
    }
}

fn print_backup(report: &OpenReport, pack: &LanguagePack) {
    match &report.backup {
        BackupOutcome::Created(path) => eprintln!(
            "{} {}",
            pack.message_or("backup_success", "Backup created at"),
            path.display()
        ),
        BackupOutcome::Failed(reason) => eprintln!(
            "Warning: {} ({}). Continuing without backup.",
            pack.message_or("backup_warning", "Could not create backup"),
            reason
        ),
        BackupOutcome::Skipped => {}
    }
}

fn print_dropped(report: &OpenReport) {
    for dropped in &report.check.dropped {
        eprintln!("Warning: skipped {}", dropped);
    }
}

/// Maps an error to the process exit code.
fn error_to_exit_code(error: &EditorError) -> u8 {
    match error {
        EditorError::InvalidArgument(_)
        | EditorError::Language(_)
        | EditorError::Json(_)
        | EditorError::IndexOutOfRange { .. } => EXIT_CONFIG_ERROR,
        EditorError::Load { .. } | EditorError::Save { .. } | EditorError::Io(_) => EXIT_IO_ERROR,
        EditorError::CheckFailed(_) => EXIT_CHECK_FAILURE,
        EditorError::NoFile | EditorError::NothingToSave => EXIT_RUNTIME_ERROR,
    }
}
