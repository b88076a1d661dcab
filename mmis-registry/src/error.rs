//! Error types for registry operations

use mmis_query::QueryError;
use thiserror::Error;

/// Registry error types.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A registry snapshot could not be parsed.
    #[error("Invalid registry data: {0}")]
    InvalidData(#[from] serde_json::Error),

    /// A list query was rejected by the query engine.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

impl RegistryError {
    /// Get a stable error code for logs and API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistryError::InvalidData(_) => "INVALID_DATA",
            RegistryError::Query(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_errors_keep_their_code() {
        let err: RegistryError = QueryError::UnknownField {
            schema: "vendor".to_string(),
            field: "colour".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
        assert_eq!(err.to_string(), "Unknown field `colour` for vendor records");
    }

    #[test]
    fn test_invalid_data() {
        let err: RegistryError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.error_code(), "INVALID_DATA");
    }
}
