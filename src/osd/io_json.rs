//! JSON serialization for issue documents.
//!
//! Output is pretty-printed with two-space indentation and non-ASCII text
//! written as-is, so re-running on unchanged input yields identical bytes.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::model::Issue;
use crate::error::Page2OsdError;

/// Writes an issue to `path`, replacing any previous file.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_issue_json(path: &Path, issue: &Issue) -> Result<(), Page2OsdError> {
    let file = File::create(path).map_err(Page2OsdError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, issue).map_err(|source| {
        Page2OsdError::JsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(Page2OsdError::Io)
}

/// Reads an issue back from a JSON file.
pub fn read_issue_json(path: &Path) -> Result<Issue, Page2OsdError> {
    let file = File::open(path).map_err(Page2OsdError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| Page2OsdError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes an issue to a JSON string.
///
/// Useful for testing without file I/O.
pub fn to_json_string(issue: &Issue) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(issue)
}
