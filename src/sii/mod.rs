//! SII station file codec
//!
//! Reads and writes the `live_stream_def` unit of a `live_streams.sii` file.

pub mod escape;
pub mod reader;
pub mod record;
pub mod writer;

pub use escape::{decode, encode, EscapeError};
pub use reader::{
    collect_records, load_file, parse, parse_line, parse_lines, LineOutcome, ParsedLine, SkipReason,
};
pub use record::StationRecord;
pub use writer::{save_file, serialize};

/// Extension of station files, without the dot.
pub const FILE_EXTENSION: &str = "sii";
