//! Search configuration.
//!
//! Tuning for the global command search: how long to wait after the last
//! keystroke, how similar a name must be to count as a fuzzy match, and how
//! many results to return. Loaded from environment variables with defaults
//! matching the console's behaviour.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{QueryError, QueryResult};

/// Environment variable for the search debounce delay in milliseconds.
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "MMIS_SEARCH_DEBOUNCE_MS";
/// Environment variable for the fuzzy similarity threshold.
pub const ENV_FUZZY_MIN_SIMILARITY: &str = "MMIS_FUZZY_MIN_SIMILARITY";
/// Environment variable capping the number of ranked results.
pub const ENV_SEARCH_LIMIT: &str = "MMIS_SEARCH_LIMIT";

/// Ranked search settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Quiet period before a typed query is searched, in milliseconds.
    pub debounce_ms: u64,

    /// A fuzzy match needs similarity strictly above this value.
    pub min_similarity: f64,

    /// Maximum number of results; `None` returns all of them.
    pub limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_similarity: 0.6,
            limit: None,
        }
    }
}

impl SearchConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MMIS_SEARCH_DEBOUNCE_MS`: Debounce delay (default: 300)
    /// - `MMIS_FUZZY_MIN_SIMILARITY`: Fuzzy threshold in `[0, 1)` (default: 0.6)
    /// - `MMIS_SEARCH_LIMIT`: Positive result cap (default: unlimited)
    ///
    /// Unparseable or out-of-range values fall back to the defaults, so the
    /// result always passes [`SearchConfig::validate`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();

        let debounce_ms = parse_var(&lookup, ENV_SEARCH_DEBOUNCE_MS).unwrap_or(default.debounce_ms);

        let min_similarity = match parse_var::<f64>(&lookup, ENV_FUZZY_MIN_SIMILARITY) {
            Some(value) if (0.0..1.0).contains(&value) => value,
            Some(value) => {
                tracing::warn!(key = ENV_FUZZY_MIN_SIMILARITY, value, "Out-of-range value, using default");
                default.min_similarity
            }
            None => default.min_similarity,
        };

        let limit = match parse_var::<usize>(&lookup, ENV_SEARCH_LIMIT) {
            Some(0) => {
                tracing::warn!(key = ENV_SEARCH_LIMIT, "Zero limit, using default");
                default.limit
            }
            Some(value) => Some(value),
            None => default.limit,
        };

        Self {
            debounce_ms,
            min_similarity,
            limit,
        }
    }

    /// Debounce delay as a Duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check that the threshold lies in `[0, 1)` and the limit is positive.
    pub fn validate(&self) -> QueryResult<()> {
        if !(0.0..1.0).contains(&self.min_similarity) {
            return Err(QueryError::Config {
                key: ENV_FUZZY_MIN_SIMILARITY.to_string(),
                message: format!("expected a value in [0, 1), got {}", self.min_similarity),
            });
        }
        if self.limit == Some(0) {
            return Err(QueryError::Config {
                key: ENV_SEARCH_LIMIT.to_string(),
                message: "limit must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranked::{ranked_search_with, EntityKind, SearchableEntity};
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.min_similarity, 0.6);
        assert!(config.limit.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range() {
        for min_similarity in [1.0, -0.1, f64::NAN] {
            let config = SearchConfig {
                min_similarity,
                ..SearchConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(err, QueryError::Config { ref key, .. } if key == ENV_FUZZY_MIN_SIMILARITY));
        }
    }

    #[test]
    fn test_zero_limit() {
        let config = SearchConfig {
            limit: Some(0),
            ..SearchConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_env_values_applied() {
        let config = SearchConfig::from_lookup(lookup(&[
            (ENV_SEARCH_DEBOUNCE_MS, "150"),
            (ENV_FUZZY_MIN_SIMILARITY, " 0.75 "),
            (ENV_SEARCH_LIMIT, "5"),
        ]));
        assert_eq!(config.debounce(), Duration::from_millis(150));
        assert_eq!(config.min_similarity, 0.75);
        assert_eq!(config.limit, Some(5));
    }

    #[test]
    fn test_env_out_of_range_values_fall_back() {
        let config = SearchConfig::from_lookup(lookup(&[
            (ENV_SEARCH_DEBOUNCE_MS, "soon"),
            (ENV_FUZZY_MIN_SIMILARITY, "NaN"),
            (ENV_SEARCH_LIMIT, "0"),
        ]));
        assert_eq!(config, SearchConfig::default());
        assert!(config.validate().is_ok());

        let config = SearchConfig::from_lookup(lookup(&[(ENV_FUZZY_MIN_SIMILARITY, "1.5")]));
        assert_eq!(config.min_similarity, 0.6);

        let index = vec![SearchableEntity::new(EntityKind::Vendor, "V-1", "Nile", "Registry Nodes", "Vendors")];
        let hits = ranked_search_with(&config, "nile", &index);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_from_env_always_valid() {
        assert!(SearchConfig::from_env().validate().is_ok());
    }
}
