//! Error types for query operations
//!
//! Malformed user input never produces an error: a bad range bound or an
//! unparseable date simply leaves that constraint out. Errors are reserved
//! for caller contract violations, such as querying a field the record
//! schema never declared.

use thiserror::Error;

use crate::schema::FieldKind;

/// Query error types.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query names a field the schema does not declare.
    #[error("Unknown field `{field}` for {schema} records")]
    UnknownField {
        /// Schema name.
        schema: String,
        /// Requested field.
        field: String,
    },

    /// The field exists but cannot be used this way.
    #[error("Field `{field}` is {kind} and does not support {operation}")]
    KindMismatch {
        /// Requested field.
        field: String,
        /// Declared kind of the field.
        kind: FieldKind,
        /// The attempted operation.
        operation: &'static str,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    Config {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

impl QueryError {
    /// Get a stable error code for logs and API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::UnknownField { .. } => "UNKNOWN_FIELD",
            QueryError::KindMismatch { .. } => "KIND_MISMATCH",
            QueryError::Config { .. } => "CONFIG_ERROR",
        }
    }
}
