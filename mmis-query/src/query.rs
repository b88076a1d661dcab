//! Query specifications.
//!
//! A `QuerySpec` is built per call by the screen issuing the query. Bounds
//! and filter values are kept as the raw strings the user typed so that
//! malformed input can be ignored instead of rejected.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::sort::{SortConfig, SortDirection};

/// Equality filter value that matches every record.
pub const ALL: &str = "ALL";

/// Inclusive bounds for a range filter; an absent bound is unconstrained.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RangeFilter {
    /// Lower bound, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    /// Upper bound, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl RangeFilter {
    /// Create bounds from optional raw values.
    pub fn new(min: Option<&str>, max: Option<&str>) -> Self {
        Self {
            min: min.map(str::to_string),
            max: max.map(str::to_string),
        }
    }
}

/// Everything a list screen asks of the engine in one call.
///
/// # Examples
///
/// ```
/// use mmis_query::{QuerySpec, SortDirection};
///
/// let spec = QuerySpec::new()
///     .text("maize flour")
///     .equals("status", "PENDING")
///     .between("created_at", "2024-05-01", "2024-05-31")
///     .sort_by("created_at", SortDirection::Desc);
///
/// assert_eq!(spec.tokens(), vec!["maize", "flour"]);
/// assert_eq!(spec.equality_filters["status"], "PENDING");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuerySpec {
    /// Free-text query; blank matches everything
    #[serde(default)]
    pub free_text: String,

    /// Field -> exact value, or [`ALL`]
    #[serde(default)]
    pub equality_filters: BTreeMap<String, String>,

    /// Field -> inclusive bounds
    #[serde(default)]
    pub range_filters: BTreeMap<String, RangeFilter>,

    /// Flag fields that must be true
    #[serde(default)]
    pub flags: BTreeSet<String>,

    /// Sort order; `None` keeps input order
    #[serde(default)]
    pub sort: Option<SortConfig>,
}

impl QuerySpec {
    /// An empty query that matches everything in input order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query.
    pub fn text(mut self, query: impl Into<String>) -> Self {
        self.free_text = query.into();
        self
    }

    /// Require `field` to equal `value` (or pass [`ALL`] to lift the filter).
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.equality_filters.insert(field.into(), value.into());
        self
    }

    /// Require `field >= min`.
    pub fn at_least(mut self, field: impl Into<String>, min: impl Into<String>) -> Self {
        self.range_filters.entry(field.into()).or_default().min = Some(min.into());
        self
    }

    /// Require `field <= max`.
    pub fn at_most(mut self, field: impl Into<String>, max: impl Into<String>) -> Self {
        self.range_filters.entry(field.into()).or_default().max = Some(max.into());
        self
    }

    /// Require `min <= field <= max`.
    pub fn between(
        mut self,
        field: impl Into<String>,
        min: impl Into<String>,
        max: impl Into<String>,
    ) -> Self {
        self.range_filters.insert(
            field.into(),
            RangeFilter {
                min: Some(min.into()),
                max: Some(max.into()),
            },
        );
        self
    }

    /// Require the flag field `field` to be true.
    pub fn flag(mut self, field: impl Into<String>) -> Self {
        self.flags.insert(field.into());
        self
    }

    /// Sort by `key` in `direction`.
    pub fn sort_by(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortConfig {
            key: key.into(),
            direction,
        });
        self
    }

    /// Use an existing sort configuration.
    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Drop every filter, keeping the sort order.
    pub fn cleared(self) -> Self {
        Self {
            sort: self.sort,
            ..Self::default()
        }
    }

    /// Lower-cased whitespace-separated tokens of the free-text query.
    pub fn tokens(&self) -> Vec<String> {
        self.free_text
            .split_whitespace()
            .map(str::to_lowercase)
            .collect()
    }
}
