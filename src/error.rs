use thiserror::Error;

#[cfg(feature = "sqlite")]
use rusqlite;

#[derive(Debug, Error)]
pub enum TableGatewayError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Record has no usable columns: {0}")]
    EmptyRecord(String),

    #[error("Other database error: {0}")]
    Other(String),
}
