//! Crate-wide error type and result alias

use thiserror::Error;

use crate::db::schemas::Status;

/// Errors surfaced by the lifecycle engine, resolver, and collaborators
#[derive(Debug, Error)]
pub enum HeuresError {
    /// Referenced declaration does not exist
    #[error("declaration not found: {0}")]
    NotFound(String),

    /// Transition source-state precondition not met (includes lost-update races)
    #[error("declaration {id} is '{current}', expected '{expected}'")]
    InvalidState {
        id: String,
        current: Status,
        expected: Status,
    },

    /// Actor's role, ownership, or department does not authorize the action
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Malformed input (empty rejection reason, negative hours, ...)
    #[error("validation failed: {0}")]
    Validation(String),

    /// Storage infrastructure failure - caller may retry with backoff
    #[error("database error: {0}")]
    Database(String),

    /// Messaging infrastructure failure
    #[error("messaging error: {0}")]
    Nats(String),
}

pub type Result<T> = std::result::Result<T, HeuresError>;
