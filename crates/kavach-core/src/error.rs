use thiserror::Error;

/// Errors from the I/O edges of the engine. Classification itself never fails.
#[derive(Debug, Error)]
pub enum KavachError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input is missing required column: {0}")]
    MissingColumn(String),

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
}

pub type Result<T> = std::result::Result<T, KavachError>;
