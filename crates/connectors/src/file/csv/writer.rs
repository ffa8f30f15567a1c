use crate::file::{csv::error::FileError, write_whole};
use csv::{Terminator, WriterBuilder};
use model::records::transformed::TransformedRow;
use std::path::Path;
use tracing::debug;

/// Renders `rows` as CSV and writes them to `path` in one go.
///
/// The header is the column list of the first row; every row is written
/// against it, with empty cells for columns a row lacks. With no rows the
/// header is unknowable, so an empty file is written.
pub fn write_rows(path: &Path, rows: &[TransformedRow]) -> Result<(), FileError> {
    let contents = render(path, rows)?;
    write_whole(path, &contents).map_err(|e| FileError::io(path, e))?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn render(path: &Path, rows: &[TransformedRow]) -> Result<Vec<u8>, FileError> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };

    let headers: Vec<&str> = first.columns().collect();
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(&headers)?;
    for row in rows {
        writer.write_record(headers.iter().map(|h| row.get_value(h).unwrap_or("")))?;
    }

    writer
        .into_inner()
        .map_err(|e| FileError::io(path, e.into_error()))
}
