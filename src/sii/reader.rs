use std::fmt;
use std::fs;
use std::path::Path;

use super::escape::{decode, split_fields};
use super::record::{StationRecord, MIN_FIELDS};
use crate::error::EditorError;

/// Why a line produced no station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The line is empty or whitespace only.
    Blank,
    /// The line has no `"..."` payload. Header, footer and count lines
    /// end up here.
    NoQuotedPayload,
    /// The payload has fewer than five `|`-separated fields.
    TooFewFields { found: usize },
    /// The sixth field is present but not an integer.
    InvalidFavorite { value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Blank => write!(f, "blank line"),
            SkipReason::NoQuotedPayload => write!(f, "no quoted payload"),
            SkipReason::TooFewFields { found } => write!(
                f,
                "expected at least {} fields, found {}",
                MIN_FIELDS, found
            ),
            SkipReason::InvalidFavorite { value } => {
                write!(f, "favorite flag '{}' is not a number", value)
            }
        }
    }
}

/// Result of parsing one line of a station file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Record(StationRecord),
    Skipped(SkipReason),
}

impl ParsedLine {
    /// Returns the station, dropping skip markers.
    pub fn into_record(self) -> Option<StationRecord> {
        match self {
            ParsedLine::Record(record) => Some(record),
            ParsedLine::Skipped(_) => None,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, ParsedLine::Record(_))
    }
}

/// A parsed non-blank line together with its 1-indexed line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome<'a> {
    pub line_number: usize,
    /// The line with surrounding whitespace removed.
    pub text: &'a str,
    pub parsed: ParsedLine,
}

/// Returns the text between the first `"` on the line and the next one.
pub fn quoted_payload(line: &str) -> Option<&str> {
    let start = line.find('"')? + 1;
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}

/// Parses one line of a station file.
///
/// # Example
///
/// ```
/// use sii_station_editor::sii::{parse_line, ParsedLine, StationRecord};
///
/// let parsed = parse_line(r#" stream_data[0]: "http://test.com|Test Station|Rock|US|128|1""#);
/// assert_eq!(
///     parsed,
///     ParsedLine::Record(StationRecord::new(
///         "http://test.com", "Test Station", "Rock", "US", "128", true,
///     ))
/// );
/// ```
pub fn parse_line(line: &str) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Skipped(SkipReason::Blank);
    }

    let Some(payload) = quoted_payload(line) else {
        return ParsedLine::Skipped(SkipReason::NoQuotedPayload);
    };

    let parts = split_fields(payload);
    if parts.len() < MIN_FIELDS {
        return ParsedLine::Skipped(SkipReason::TooFewFields { found: parts.len() });
    }

    let mut decoded: Vec<String> = parts.into_iter().map(decode).collect();

    let favorite = match decoded.get(MIN_FIELDS) {
        Some(token) => match parse_favorite(token) {
            Some(favorite) => favorite,
            None => {
                return ParsedLine::Skipped(SkipReason::InvalidFavorite {
                    value: token.clone(),
                })
            }
        },
        None => false,
    };

    decoded.truncate(MIN_FIELDS);
    let mut fields = decoded.into_iter();
    // truncate/len check above guarantee exactly five fields
    let mut next = || fields.next().unwrap_or_default();

    ParsedLine::Record(StationRecord {
        url: next(),
        name: next(),
        genre: next(),
        country: next(),
        bitrate: next(),
        favorite,
    })
}

/// Integer flag, non-zero meaning favorite. Surrounding whitespace is allowed.
///
/// Integers of any length are accepted, so a flag too large for `i64` still
/// reads as a favorite instead of dropping the station.
fn parse_favorite(token: &str) -> Option<bool> {
    let token = token.trim();
    if let Ok(value) = token.parse::<i64>() {
        return Some(value != 0);
    }
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.bytes().any(|b| b != b'0'))
}

/// Parses every non-blank line, keeping the skip markers.
pub fn parse_lines(text: &str) -> Vec<LineOutcome<'_>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| LineOutcome {
            line_number: i + 1,
            text: line,
            parsed: parse_line(line),
        })
        .collect()
}

/// The stations among `outcomes`, in file order.
pub fn collect_records(outcomes: Vec<LineOutcome<'_>>) -> Vec<StationRecord> {
    outcomes
        .into_iter()
        .filter_map(|outcome| outcome.parsed.into_record())
        .collect()
}

/// Parses a station file's contents into its stations, in file order.
///
/// Lines that are not station lines are dropped. Neither brace nesting nor
/// the declared `stream_data: N` count is checked.
pub fn parse(text: &str) -> Vec<StationRecord> {
    collect_records(parse_lines(text))
}

/// Reads a station file as UTF-8 text.
pub fn read_file(path: &Path) -> Result<String, EditorError> {
    fs::read_to_string(path).map_err(|source| EditorError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a station file.
pub fn load_file(path: &Path) -> Result<Vec<StationRecord>, EditorError> {
    let text = read_file(path)?;
    Ok(parse(&text))
}
