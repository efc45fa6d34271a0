use thiserror::Error;

/// Failure of a single statement issued for one record
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("statement limiter closed")]
    Closed(#[from] tokio::sync::AcquireError),
}

/// Domain record that cannot be turned into a row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingWarning {
    #[error("world row {key} is missing required field {field}")]
    MissingField { key: u32, field: &'static str },

    #[error("malformed recipe {key}, no ingredients provided")]
    NoIngredients { key: u32 },
}
