use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("Input file not found: {0}")]
    NotFound(String),
    #[error("No headers found in {0}")]
    NoHeaders(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),
}

impl FileError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        FileError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
