//! Station record type.

use serde::{Deserialize, Serialize};

/// Bitrate pre-filled for a newly added station.
pub const DEFAULT_BITRATE: &str = "128";

/// Minimum number of `|`-separated fields in a parseable station line.
pub const MIN_FIELDS: usize = 5;

/// One radio station entry of a `live_streams.sii` file.
///
/// All text fields are stored decoded. `bitrate` stays text because the
/// file stores it as text and hand-edited files do not always hold a number
/// there.
///
/// # Example
///
/// ```
/// use sii_station_editor::sii::StationRecord;
///
/// let station = StationRecord::new(
///     "http://test.com",
///     "Test Station",
///     "Rock",
///     "US",
///     "128",
///     true,
/// );
/// assert!(station.favorite);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct StationRecord {
    /// Stream URL.
    pub url: String,
    pub name: String,
    pub genre: String,
    /// Short country code, e.g. `"US"`.
    pub country: String,
    /// Bitrate in kbps as written in the file.
    pub bitrate: String,
    pub favorite: bool,
}

impl StationRecord {
    /// Creates a new StationRecord with the given values.
    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
        genre: impl Into<String>,
        country: impl Into<String>,
        bitrate: impl Into<String>,
        favorite: bool,
    ) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            genre: genre.into(),
            country: country.into(),
            bitrate: bitrate.into(),
            favorite,
        }
    }

    /// The five text fields in file order.
    pub fn text_fields(&self) -> [&str; MIN_FIELDS] {
        [
            &self.url,
            &self.name,
            &self.genre,
            &self.country,
            &self.bitrate,
        ]
    }

    /// The trailing favorite token as written to the file.
    pub fn favorite_token(&self) -> &'static str {
        if self.favorite {
            "1"
        } else {
            "0"
        }
    }
}

/// The blank station offered when adding a new entry.
impl Default for StationRecord {
    fn default() -> Self {
        Self {
            url: String::new(),
            name: String::new(),
            genre: String::new(),
            country: String::new(),
            bitrate: DEFAULT_BITRATE.to_string(),
            favorite: false,
        }
    }
}
