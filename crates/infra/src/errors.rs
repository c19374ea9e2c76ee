//! Infrastructure error type and conversions into the domain taxonomy.

use loadquote_domain::LoadQuoteError;
use thiserror::Error;

/// Errors raised inside the infrastructure layer before they cross the port
/// boundary as [`LoadQuoteError`]s.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl From<InfraError> for LoadQuoteError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Sqlite(e) => LoadQuoteError::Database(e.to_string()),
            InfraError::Pool(e) => LoadQuoteError::Database(e.to_string()),
            InfraError::Serialization(e) => LoadQuoteError::Internal(e.to_string()),
            InfraError::Io(e) => LoadQuoteError::Config(e.to_string()),
            InfraError::Config(message) => LoadQuoteError::Config(message),
        }
    }
}
