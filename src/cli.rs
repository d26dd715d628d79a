//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros. Each
//! editing action of the station editor is a subcommand operating on one
//! `.sii` file.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::session::SortColumn;
use crate::sii::StationRecord;

/// Command-line arguments for the station editor.
///
/// Use the `validate()` method after parsing to reject argument
/// combinations clap cannot express.
///
/// # Example
///
/// ```rust,ignore
/// use clap::Parser;
/// use sii_station_editor::cli::Args;
///
/// let args = Args::parse();
/// args.validate()?;
/// ```
#[derive(Parser, Debug)]
#[command(name = "sii-station-editor")]
#[command(about = "Edit the radio stations of a live_streams.sii file")]
#[command(version)]
pub struct Args {
    /// Directory holding languages/ and user_settings.json (default: next to the executable)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Language for messages, overriding the saved preference
    #[arg(long, global = true)]
    pub language: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the stations of a file
    List {
        file: PathBuf,

        /// Sort the listing by a column (the file is not changed)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Sort in descending order
        #[arg(long, default_value = "false")]
        desc: bool,
    },

    /// Append a station
    Add {
        file: PathBuf,

        #[command(flatten)]
        fields: StationFields,

        /// Mark the new station as favorite
        #[arg(long, default_value = "false")]
        favorite: bool,

        /// Do not copy the file to backup/ before changing it
        #[arg(long, default_value = "false")]
        no_backup: bool,
    },

    /// Change fields of the station at INDEX
    Edit {
        file: PathBuf,

        index: usize,

        #[command(flatten)]
        fields: StationFields,

        /// Set or clear the favorite flag
        #[arg(long)]
        favorite: Option<bool>,

        /// Do not copy the file to backup/ before changing it
        #[arg(long, default_value = "false")]
        no_backup: bool,
    },

    /// Remove the station at INDEX
    Remove {
        file: PathBuf,

        index: usize,

        /// Do not copy the file to backup/ before changing it
        #[arg(long, default_value = "false")]
        no_backup: bool,
    },

    /// Report lines the parser drops and count mismatches
    Check { file: PathBuf },

    /// Escape text the way it is stored in a station line
    Encode { text: String },

    /// Unescape a field as stored in a station line
    Decode { token: String },

    /// Show the current language, or set it
    Language { code: Option<String> },
}

/// Column accepted by `list --sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Favorite,
    Name,
    Genre,
    Country,
    Bitrate,
}

impl From<SortArg> for SortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Favorite => SortColumn::Favorite,
            SortArg::Name => SortColumn::Name,
            SortArg::Genre => SortColumn::Genre,
            SortArg::Country => SortColumn::Country,
            SortArg::Bitrate => SortColumn::Bitrate,
        }
    }
}

/// Station fields given on the command line. Unset fields are left as is.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct StationFields {
    /// Stream URL
    #[arg(long)]
    pub url: Option<String>,

    /// Station name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    /// Country code, e.g. US
    #[arg(long)]
    pub country: Option<String>,

    /// Bitrate in kbps
    #[arg(long)]
    pub bitrate: Option<String>,
}

impl StationFields {
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.name.is_none()
            && self.genre.is_none()
            && self.country.is_none()
            && self.bitrate.is_none()
    }

    /// Overwrites the fields of `station` that are set here.
    pub fn apply_to(&self, station: &mut StationRecord) {
        let targets = [
            (&self.url, &mut station.url),
            (&self.name, &mut station.name),
            (&self.genre, &mut station.genre),
            (&self.country, &mut station.country),
            (&self.bitrate, &mut station.bitrate),
        ];
        for (value, target) in targets {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
    }
}

impl Args {
    /// Validate argument combinations.
    ///
    /// - `--desc` needs `--sort`
    /// - `edit` needs at least one field or `--favorite`
    /// - `add` needs a URL
    /// - a language code cannot be empty
    pub fn validate(&self) -> Result<(), String> {
        if let Some(language) = &self.language {
            if language.trim().is_empty() {
                return Err("--language cannot be empty".to_string());
            }
        }

        match &self.command {
            Command::List {
                sort: None,
                desc: true,
                ..
            } => Err("--desc requires --sort".to_string()),
            Command::Add { fields, .. } if fields.url.as_deref().map_or(true, str::is_empty) => {
                Err("add requires a non-empty --url".to_string())
            }
            Command::Edit {
                fields,
                favorite: None,
                ..
            } if fields.is_empty() => {
                Err("edit requires at least one field option or --favorite".to_string())
            }
            Command::Language { code: Some(code) } if code.trim().is_empty() => {
                Err("language code cannot be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}
