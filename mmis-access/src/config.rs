//! Access configuration.
//!
//! Loads the visibility mode, override role and role hierarchy once at
//! startup. Values come from environment variables with defaults that
//! match the standard console setup.

use serde::{Deserialize, Serialize};

use crate::error::{AccessError, AccessResult};
use crate::hierarchy::RoleHierarchy;
use crate::resolver::{AccessResolver, VisibilityMode};
use crate::roles::Role;

/// Environment variable selecting the visibility mode.
pub const ENV_VISIBILITY_MODE: &str = "MMIS_VISIBILITY_MODE";
/// Environment variable naming the universal-override role.
pub const ENV_OVERRIDE_ROLE: &str = "MMIS_OVERRIDE_ROLE";
/// Environment variable holding the role hierarchy as inline JSON.
pub const ENV_ROLE_HIERARCHY: &str = "MMIS_ROLE_HIERARCHY";

/// Configuration for building an [`AccessResolver`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Raw visibility mode name.
    pub mode: String,

    /// Raw override role name.
    pub override_role: String,

    /// Role hierarchy JSON; `None` uses the standard hierarchy.
    pub hierarchy_json: Option<String>,
}

impl Default for AccessConfig {
    /// Returns the standard console configuration.
    fn default() -> Self {
        Self {
            mode: VisibilityMode::Hierarchical.as_str().to_string(),
            override_role: Role::SuperAdmin.as_str().to_string(),
            hierarchy_json: None,
        }
    }
}

impl AccessConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MMIS_VISIBILITY_MODE`: `hierarchical` or `direct` (default: hierarchical)
    /// - `MMIS_OVERRIDE_ROLE`: Universal-override role (default: SUPER_ADMIN)
    /// - `MMIS_ROLE_HIERARCHY`: Hierarchy JSON, e.g. `{"MARKET_ADMIN": ["VENDOR"]}`
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            mode: std::env::var(ENV_VISIBILITY_MODE).unwrap_or(default.mode),
            override_role: std::env::var(ENV_OVERRIDE_ROLE).unwrap_or(default.override_role),
            hierarchy_json: std::env::var(ENV_ROLE_HIERARCHY)
                .ok()
                .filter(|json| !json.trim().is_empty()),
        }
    }

    /// Parse the visibility mode.
    pub fn visibility_mode(&self) -> AccessResult<VisibilityMode> {
        VisibilityMode::parse(&self.mode).ok_or_else(|| AccessError::Config {
            key: ENV_VISIBILITY_MODE.to_string(),
            message: format!("expected `hierarchical` or `direct`, got `{}`", self.mode),
        })
    }

    /// Parse the universal-override role.
    pub fn override_role(&self) -> AccessResult<Role> {
        Role::parse(&self.override_role).ok_or_else(|| AccessError::Config {
            key: ENV_OVERRIDE_ROLE.to_string(),
            message: format!("unknown role `{}`", self.override_role),
        })
    }

    /// Parse and validate the role hierarchy.
    pub fn hierarchy(&self) -> AccessResult<RoleHierarchy> {
        match &self.hierarchy_json {
            Some(json) => RoleHierarchy::from_json(json),
            None => Ok(RoleHierarchy::standard()),
        }
    }

    /// Check every value without building a resolver.
    pub fn validate(&self) -> AccessResult<()> {
        self.visibility_mode()?;
        self.override_role()?;
        self.hierarchy()?;
        Ok(())
    }

    /// Build the resolver described by this configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use mmis_access::{AccessConfig, VisibilityMode};
    ///
    /// let config = AccessConfig {
    ///     mode: "direct".to_string(),
    ///     ..AccessConfig::default()
    /// };
    /// let resolver = config.build_resolver().unwrap();
    /// assert_eq!(resolver.mode(), VisibilityMode::DirectOnly);
    /// ```
    pub fn build_resolver(&self) -> AccessResult<AccessResolver> {
        let resolver = AccessResolver::new(self.hierarchy()?)
            .with_mode(self.visibility_mode()?)
            .with_override_role(self.override_role()?);

        tracing::debug!(
            mode = resolver.mode().as_str(),
            override_role = %resolver.override_role(),
            "Built access resolver"
        );
        Ok(resolver)
    }
}
