//! Error types for access configuration
//!
//! Visibility checks themselves never fail: unknown roles and unmet
//! requirements resolve to "not visible". These errors only arise while
//! building the static configuration the resolver runs on.

use thiserror::Error;

use crate::roles::Role;

/// Access configuration error types.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A capability requirement was built from an empty role set.
    ///
    /// Use `None` for items visible to everyone.
    #[error("Capability requirement must list at least one role")]
    EmptyRequirement,

    /// A configuration source named a role that does not exist.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// A role supervises itself, directly or through other roles.
    #[error("Role hierarchy is cyclic: {role} supervises itself")]
    CyclicHierarchy {
        /// A role on the cycle.
        role: Role,
    },

    /// The role hierarchy document could not be parsed.
    #[error("Invalid role hierarchy: {0}")]
    InvalidHierarchy(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    Config {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Result type for access configuration.
pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Get a stable error code for logs and API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::EmptyRequirement => "EMPTY_REQUIREMENT",
            AccessError::UnknownRole(_) => "UNKNOWN_ROLE",
            AccessError::CyclicHierarchy { .. } => "CYCLIC_HIERARCHY",
            AccessError::InvalidHierarchy(_) => "INVALID_HIERARCHY",
            AccessError::Config { .. } => "CONFIG_ERROR",
        }
    }
}

impl From<serde_json::Error> for AccessError {
    fn from(err: serde_json::Error) -> Self {
        AccessError::InvalidHierarchy(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AccessError::EmptyRequirement.error_code(), "EMPTY_REQUIREMENT");
        assert_eq!(
            AccessError::CyclicHierarchy { role: Role::Vendor }.error_code(),
            "CYCLIC_HIERARCHY"
        );
    }

    #[test]
    fn test_error_display() {
        let err = AccessError::CyclicHierarchy { role: Role::MarketAdmin };
        assert_eq!(
            err.to_string(),
            "Role hierarchy is cyclic: MARKET_ADMIN supervises itself"
        );
    }
}
