//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for LoadQuote
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum LoadQuoteError {
    /// A referenced entity (route, transport, business, cargo, offer,
    /// settings, breakdown) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A business rule was violated: out-of-bounds rate, unknown rate type,
    /// missing component rate, negative margin, country-coverage violation
    /// or illegal status transition.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An external collaborator (toll calculation, fuel-rate lookup, content
    /// enhancement) failed. Retry policy is the collaborator's concern.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The finalization saga failed AND its compensating rollback also
    /// failed. Highest severity; never swallowed.
    #[error("Saga compensation failed: {0}")]
    SagaCompensation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for LoadQuote operations
pub type Result<T> = std::result::Result<T, LoadQuoteError>;

impl LoadQuoteError {
    /// Shorthand for a `NotFound` error about an entity with an id.
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        LoadQuoteError::NotFound(format!("{entity} {id} not found"))
    }
}
