use std::fs;
use std::path::Path;

use super::escape::{encode, join_fields};
use super::record::StationRecord;
use crate::error::EditorError;

/// Unit name of the stream definition block.
pub const STREAM_DEF_NAME: &str = "_nameless.28a.c076.a0f0";

/// Formats one station as a `stream_data[i]` line, without the newline.
///
/// Every field goes through the escape codec and the favorite flag is
/// always written, so the line carries all six fields.
pub fn format_record_line(index: usize, record: &StationRecord) -> String {
    let mut fields: Vec<String> = record.text_fields().iter().map(|f| encode(f)).collect();
    fields.push(record.favorite_token().to_string());
    format!(" stream_data[{}]: \"{}\"", index, join_fields(&fields))
}

/// Serializes stations into the complete file text.
///
/// # Example
///
/// ```
/// use sii_station_editor::sii::{serialize, StationRecord};
///
/// let text = serialize(&[StationRecord::new("a", "b", "c", "US", "192", false)]);
/// assert!(text.contains(" stream_data: 1\n"));
/// assert!(text.contains("|US|192|0\"\n"));
/// ```
pub fn serialize(records: &[StationRecord]) -> String {
    let mut text = String::new();
    text.push_str("SiiNunit\n");
    text.push_str("{\n");
    text.push_str(&format!("live_stream_def : {} {{\n", STREAM_DEF_NAME));
    text.push_str(&format!(" stream_data: {}\n", records.len()));
    for (i, record) in records.iter().enumerate() {
        text.push_str(&format_record_line(i, record));
        text.push('\n');
    }
    text.push_str(" }\n");
    text.push_str("}\n");
    text
}

/// Writes stations to `path`, replacing its contents.
pub fn save_file(path: &Path, records: &[StationRecord]) -> Result<(), EditorError> {
    fs::write(path, serialize(records)).map_err(|source| EditorError::Save {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), stations = records.len(), "station file written");
    Ok(())
}
