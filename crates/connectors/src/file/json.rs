use crate::file::{csv::error::FileError, write_whole};
use serde::Serialize;
use std::path::Path;

/// Writes `document` as two-space indented JSON. Field order follows the
/// serialized type, so the output is stable across runs.
pub fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), FileError> {
    let json = serde_json::to_string_pretty(document)?;
    write_whole(path, json.as_bytes()).map_err(|e| FileError::io(path, e))
}
