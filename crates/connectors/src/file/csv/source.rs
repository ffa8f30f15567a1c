use crate::file::csv::error::FileError;
use csv::{ReaderBuilder, StringRecord};
use model::{core::value::FieldValue, records::row::Row};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The full contents of a tabular input: its header line and every data row.
#[derive(Debug, Clone)]
pub struct CsvDataset {
    pub path: PathBuf,
    /// Taken from the header line itself, so they are known even when the
    /// file holds no data rows. A repeated name is listed once, at its first
    /// position, matching the columns of every row.
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl CsvDataset {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Comma-separated input with a mandatory header line.
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Fails with [`FileError::NotFound`] when nothing exists at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FileError::NotFound(path.display().to_string()));
        }
        Ok(CsvDataSource {
            path: path.to_path_buf(),
        })
    }

    /// Reads the whole file. Cells are kept verbatim; short records are
    /// padded with empty cells and surplus cells are dropped.
    pub fn read_all(&self) -> Result<CsvDataset, FileError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(FileError::NoHeaders(self.path.display().to_string()));
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > headers.len() {
                warn!(
                    "Record {} in {} has {} cells but only {} headers; dropping the surplus",
                    index + 1,
                    self.path.display(),
                    record.len(),
                    headers.len()
                );
            }
            rows.push(to_row(&headers, &record));
        }

        debug!("Read {} rows from {}", rows.len(), self.path.display());

        Ok(CsvDataset {
            path: self.path.clone(),
            headers: distinct(&headers),
            rows,
        })
    }
}

fn distinct(headers: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());
    for name in headers {
        if !seen.contains(name) {
            seen.push(name.clone());
        }
    }
    if seen.len() < headers.len() {
        warn!("Header line repeats column names: {headers:?}; later cells win");
    }
    seen
}

fn to_row(headers: &[String], record: &StringRecord) -> Row {
    headers
        .iter()
        .enumerate()
        .map(|(i, name)| FieldValue::new(name.as_str(), record.get(i).unwrap_or("")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let result = CsvDataSource::open(dir.path().join("absent.csv"));
        assert!(matches!(result, Err(FileError::NotFound(_))));
    }

    #[test]
    fn reads_headers_and_rows_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "id,name,age\n1,ada,36\n2,alan,41\n").unwrap();

        let dataset = CsvDataSource::open(&path).unwrap().read_all().unwrap();

        assert_eq!(dataset.headers, vec!["id", "name", "age"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows[1].get_value("name"), Some("alan"));
        assert_eq!(
            dataset.rows[0].columns().collect::<Vec<_>>(),
            vec!["id", "name", "age"]
        );
    }

    #[test]
    fn header_only_file_yields_headers_without_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "id,age\n").unwrap();

        let dataset = CsvDataSource::open(&path).unwrap().read_all().unwrap();

        assert_eq!(dataset.headers, vec!["id", "age"]);
        assert!(dataset.rows.is_empty());
    }

    #[test]
    fn empty_file_has_no_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.csv");
        fs::write(&path, "").unwrap();

        let result = CsvDataSource::open(&path).unwrap().read_all();
        assert!(matches!(result, Err(FileError::NoHeaders(_))));
    }

    #[test]
    fn ragged_records_are_padded_and_truncated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "id,name,age\n1,ada\n2,alan,41,extra\n").unwrap();

        let dataset = CsvDataSource::open(&path).unwrap().read_all().unwrap();

        assert_eq!(dataset.rows[0].get_value("age"), Some(""));
        assert_eq!(dataset.rows[1].len(), 3);
        assert_eq!(dataset.rows[1].get_value("age"), Some("41"));
    }

    #[test]
    fn repeated_header_is_reported_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dupes.csv");
        fs::write(&path, "id,age,id
1,30,2
").unwrap();

        let dataset = CsvDataSource::open(&path).unwrap().read_all().unwrap();

        assert_eq!(dataset.headers, vec!["id", "age"]);
        assert_eq!(
            dataset.rows[0].columns().collect::<Vec<_>>(),
            dataset.headers
        );
        assert_eq!(dataset.rows[0].get_value("id"), Some("2"));
    }

    #[test]
    fn cells_are_kept_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spaces.csv");
        fs::write(&path, "id,age\n1, 30 \n").unwrap();

        let dataset = CsvDataSource::open(&path).unwrap().read_all().unwrap();
        assert_eq!(dataset.rows[0].get_value("age"), Some(" 30 "));
    }
}
