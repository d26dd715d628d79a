//! Station File Check
//!
//! Reports which lines of a station file the parser would drop and whether
//! the declared `stream_data: N` count matches the stations found. Loading
//! never fails on these problems; this module exists so they can be seen.
//!
//! # Example
//!
//! ```rust,ignore
//! use sii_station_editor::check::check_file;
//! use std::path::Path;
//!
//! let report = check_file(Path::new("live_streams.sii"))?;
//! println!("{}", report);
//! ```

use std::fmt;
use std::path::Path;

use crate::error::EditorError;
use crate::sii::reader::{parse_lines, read_file, LineOutcome, ParsedLine, SkipReason};

const COUNT_PREFIX: &str = "stream_data:";
const ENTRY_PREFIX: &str = "stream_data[";

/// A line that looked like a station but produced none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedLine {
    /// 1-indexed line number.
    pub line_number: usize,
    pub reason: SkipReason,
}

impl fmt::Display for DroppedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line_number, self.reason)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Non-blank lines in the file.
    pub total_lines: usize,
    pub stations: usize,
    /// Value of the `stream_data: N` line, if there is one.
    pub declared_count: Option<usize>,
    pub dropped: Vec<DroppedLine>,
}

impl CheckReport {
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(&parse_lines(text))
    }

    /// Builds the report from lines already run through the parser.
    pub fn from_lines(outcomes: &[LineOutcome<'_>]) -> Self {
        let mut report = Self {
            total_lines: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            if report.declared_count.is_none() {
                report.declared_count = parse_declared_count(outcome.text);
            }

            match &outcome.parsed {
                ParsedLine::Record(_) => report.stations += 1,
                ParsedLine::Skipped(reason) => {
                    if is_dropped_station(outcome.text, reason) {
                        report.dropped.push(DroppedLine {
                            line_number: outcome.line_number,
                            reason: reason.clone(),
                        });
                    }
                }
            }
        }

        report
    }

    pub fn count_matches(&self) -> bool {
        self.declared_count == Some(self.stations)
    }

    /// True when nothing is dropped and the declared count is right.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty() && self.count_matches()
    }
}

/// Header, footer and count lines carry no payload. Anything
/// else that fails to parse is a lost station.
fn is_dropped_station(line: &str, reason: &SkipReason) -> bool {
    match reason {
        SkipReason::Blank => false,
        SkipReason::NoQuotedPayload => line.starts_with(ENTRY_PREFIX),
        SkipReason::TooFewFields { .. } | SkipReason::InvalidFavorite { .. } => true,
    }
}

fn parse_declared_count(line: &str) -> Option<usize> {
    line.strip_prefix(COUNT_PREFIX)?.trim().parse().ok()
}

/// Checks the station file at `path`.
pub fn check_file(path: &Path) -> Result<CheckReport, EditorError> {
    let text = read_file(path)?;
    Ok(CheckReport::from_text(&text))
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Station File Check")?;
        writeln!(f, "==================")?;
        writeln!(
            f,
            "Status: {}",
            if self.is_clean() { "PASSED" } else { "FAILED" }
        )?;
        writeln!(f)?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Lines:             {:>10}", self.total_lines)?;
        writeln!(f, "  Stations:          {:>10}", self.stations)?;
        match self.declared_count {
            Some(count) => writeln!(f, "  Declared count:    {:>10}", count)?,
            None => writeln!(f, "  Declared count:    {:>10}", "missing")?,
        }
        writeln!(f, "  Dropped lines:     {:>10}", self.dropped.len())?;

        if !self.dropped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Dropped:")?;
            for dropped in &self.dropped {
                writeln!(f, "  {}", dropped)?;
            }
        }

        if !self.count_matches() {
            writeln!(f)?;
            writeln!(
                f,
                "Declared count does not match the {} stations found",
                self.stations
            )?;
        }

        Ok(())
    }
}
