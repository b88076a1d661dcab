//! Sort configuration and type-aware stable sorting.
//!
//! The sort key's kind is resolved once per call. Keys are extracted once
//! per record, then a stable sort orders an index permutation with a
//! comparator chosen for that kind.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::schema::Accessor;
use crate::temporal::parse_timestamp;

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Orient an ascending comparison result.
    ///
    /// Equal stays equal, so ties keep their input order either way.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Which field to sort by and in which direction.
///
/// # Examples
///
/// ```
/// use mmis_query::{SortConfig, SortDirection};
///
/// let sort = SortConfig::ascending("name");
/// let sort = sort.toggle("name");
/// assert_eq!(sort.direction, SortDirection::Desc);
///
/// // Choosing a different column starts ascending again
/// let sort = sort.toggle("city");
/// assert_eq!(sort, SortConfig::ascending("city"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortConfig {
    /// Field name, as declared in the record schema
    pub key: String,
    /// Sort direction
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortConfig {
    /// Sort by `key`, smallest first.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Sort by `key`, largest first.
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// The configuration after the user selects the `key` column.
    ///
    /// Selecting the current key flips the direction; any other key
    /// resets to ascending.
    pub fn toggle(&self, key: &str) -> Self {
        if self.key == key {
            Self {
                key: self.key.clone(),
                direction: self.direction.flipped(),
            }
        } else {
            Self::ascending(key)
        }
    }
}

/// Compare optional timestamps with unparseable values last in either direction.
fn compare_temporal(a: Option<i64>, b: Option<i64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable-sort `records` by the field behind `accessor`.
pub(crate) fn sort_by_accessor<'a, T>(
    records: Vec<&'a T>,
    accessor: &Accessor<T>,
    direction: SortDirection,
) -> Vec<&'a T> {
    let mut order: Vec<usize> = (0..records.len()).collect();

    match accessor {
        Accessor::Text(value) => {
            let keys: Vec<String> = records.iter().map(|r| value(*r).to_lowercase()).collect();
            order.sort_by(|&a, &b| direction.apply(keys[a].cmp(&keys[b])));
        }
        Accessor::Numeric(value) => {
            let keys: Vec<f64> = records.iter().map(|r| value(*r)).collect();
            order.sort_by(|&a, &b| direction.apply(keys[a].total_cmp(&keys[b])));
        }
        Accessor::Temporal(value) => {
            let keys: Vec<Option<i64>> = records.iter().map(|r| parse_timestamp(value(*r))).collect();
            order.sort_by(|&a, &b| compare_temporal(keys[a], keys[b], direction));
        }
        Accessor::Flag(value) => {
            let keys: Vec<bool> = records.iter().map(|r| value(*r)).collect();
            order.sort_by(|&a, &b| direction.apply(keys[a].cmp(&keys[b])));
        }
    }

    order.into_iter().map(|index| records[index]).collect()
}
