use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// A required input was missing or blank. Never retried.
    #[error("{0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("export produced invalid UTF-8")]
    ExportEncoding,

    #[error("database lock poisoned: {0}")]
    Lock(String),

    #[error("blocking task failed: {0}")]
    Task(String),
}

impl DbError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// The trend payload coming back from SQLite could not be decoded.
/// Recovered inside the stats engine and never returned to callers.
#[derive(Debug, Error)]
#[error("malformed trend payload: {0}")]
pub struct AggregationParseError(#[from] pub serde_json::Error);

pub type Result<T> = std::result::Result<T, DbError>;
