//! Core error types for the SyncKaro admin dashboard.
//!
//! This module defines database- and transport-agnostic error types. Storage
//! errors (Diesel, SQLite) and HTTP errors (reqwest) are converted to these
//! types by the crates that own those dependencies.

use std::collections::BTreeMap;

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the dashboard.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Authentication required: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// The message shown inline next to the affected view.
    ///
    /// Remote failures surface the backend's own message; everything else
    /// falls back to the display text of the error.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(api) => api.message.clone(),
            Error::Validation(ValidationError::InvalidInput(msg)) => msg.clone(),
            Error::Auth(msg) | Error::NotFound(msg) | Error::Unexpected(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Shortcut for an API error that never reached the backend.
    pub fn api(message: impl Into<String>) -> Self {
        Error::Api(ApiError::new(None, message))
    }
}

/// Database-agnostic error type for cache storage operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// A failed call to the remote admin API.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, if a response was received.
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}

/// Field name to message, in field order.
pub type FormErrors = BTreeMap<String, String>;

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Form has {} invalid field(s)", .0.len())]
    Form(FormErrors),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_message() {
        let err = Error::Api(ApiError::new(Some(500), "Student not found"));
        assert_eq!(err.user_message(), "Student not found");
    }

    #[test]
    fn user_message_uses_plain_text_for_auth() {
        let err = Error::Auth("Please log in".to_string());
        assert_eq!(err.user_message(), "Please log in");
    }

    #[test]
    fn unauthorized_statuses() {
        assert!(ApiError::new(Some(401), "x").is_unauthorized());
        assert!(ApiError::new(Some(403), "x").is_unauthorized());
        assert!(!ApiError::new(Some(500), "x").is_unauthorized());
        assert!(!ApiError::new(None, "x").is_unauthorized());
    }
}
