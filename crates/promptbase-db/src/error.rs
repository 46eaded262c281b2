use thiserror::Error;

/// Errors produced by the storage layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required field was empty. Recovered at the form boundary; nothing
    /// is persisted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An underlying SQLite failure (statement or connectivity).
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn empty_field(field: &str) -> Self {
        StoreError::Validation(format!("{field} must not be empty"))
    }
}
