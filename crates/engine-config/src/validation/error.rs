use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// Expected columns absent from the input header under the fail-fast policy.
    #[error("Missing expected columns {missing:?} in {path}. Headers were: {headers:?}")]
    MissingColumns {
        missing: Vec<String>,
        path: String,
        headers: Vec<String>,
    },
}
