use std::path::PathBuf;

/// Errors raised by [`crate::store::ProjectStore`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Duplicate project id: {0}")]
    DuplicateId(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Errors raised while fetching a fresh project snapshot.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Refresh task failed: {0}")]
    Task(String),
}

/// Errors raised by file import/export.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing required columns (found: {0})")]
    MissingColumns(String),

    #[error("{0}")]
    Empty(String),
}

