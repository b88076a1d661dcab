//! Ranked fuzzy search over the global entity index.
//!
//! Each entity is scored against the query by its display name and id:
//!
//! ```text
//! exact match      100
//! prefix match      80
//! substring match   60
//! fuzzy name match  40 x similarity   (only above the similarity threshold)
//! ```
//!
//! Entities scoring zero are dropped and the rest are returned best first.
//! Ties keep index order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SearchConfig;
use crate::distance::similarity;

/// What an index entry refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    /// Vendor registry entry.
    Vendor,
    /// Catalog product or inventory item.
    Product,
    /// Order manifest.
    Order,
    /// Logistics bridge or requisition.
    Logistics,
    /// Market or hub.
    Market,
    /// Wallet transaction.
    Transaction,
    /// Supplier network entry.
    Supplier,
}

impl EntityKind {
    /// Get string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Vendor => "VENDOR",
            EntityKind::Product => "PRODUCT",
            EntityKind::Order => "ORDER",
            EntityKind::Logistics => "LOGISTICS",
            EntityKind::Market => "MARKET",
            EntityKind::Transaction => "TRANSACTION",
            EntityKind::Supplier => "SUPPLIER",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the global search index.
///
/// Built fresh from live records for every query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchableEntity {
    /// Record identifier, e.g. `V-001`
    pub id: String,
    /// Name shown in results and scored against the query
    pub display_name: String,
    /// Result group label
    pub category: String,
    /// Extra detail shown under the name; not scored
    #[serde(default)]
    pub secondary_fields: Vec<String>,
    /// Navigation target that opens the record
    pub navigation_target: String,
    /// Entity kind
    pub kind: EntityKind,
}

impl SearchableEntity {
    /// Create an index entry without secondary fields.
    pub fn new(
        kind: EntityKind,
        id: impl Into<String>,
        display_name: impl Into<String>,
        category: impl Into<String>,
        navigation_target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            category: category.into(),
            secondary_fields: Vec::new(),
            navigation_target: navigation_target.into(),
            kind,
        }
    }

    /// Append a secondary field.
    pub fn with_secondary(mut self, field: impl Into<String>) -> Self {
        self.secondary_fields.push(field.into());
        self
    }
}

/// Records that can appear in the global search index.
pub trait Searchable {
    /// Project this record into an index entry.
    fn to_searchable(&self) -> SearchableEntity;
}

/// Which rule produced a score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Name or id equals the query.
    Exact,
    /// Name or id starts with the query.
    Prefix,
    /// Name or id contains the query.
    Substring,
    /// Name is close to the query by edit distance.
    Fuzzy,
}

/// A scored borrowed entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntity<'a> {
    /// The matched entity
    pub entity: &'a SearchableEntity,
    /// Score in `(0, 100]`
    pub score: f64,
    /// Rule that produced the score
    pub match_kind: MatchKind,
}

/// A scored entity that owns its entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// The matched entity
    pub entity: SearchableEntity,
    /// Score in `(0, 100]`
    pub score: f64,
    /// Rule that produced the score
    pub match_kind: MatchKind,
}

impl From<RankedEntity<'_>> for SearchHit {
    fn from(ranked: RankedEntity<'_>) -> Self {
        Self {
            entity: ranked.entity.clone(),
            score: ranked.score,
            match_kind: ranked.match_kind,
        }
    }
}

fn score(query: &str, entity: &SearchableEntity, min_similarity: f64) -> Option<(f64, MatchKind)> {
    let name = entity.display_name.to_lowercase();
    let id = entity.id.to_lowercase();

    if name == query || id == query {
        return Some((100.0, MatchKind::Exact));
    }
    if name.starts_with(query) || id.starts_with(query) {
        return Some((80.0, MatchKind::Prefix));
    }
    if name.contains(query) || id.contains(query) {
        return Some((60.0, MatchKind::Substring));
    }

    let similarity = similarity(&name, query);
    if similarity > min_similarity {
        Some((40.0 * similarity, MatchKind::Fuzzy))
    } else {
        None
    }
}

/// Rank `entities` against `query` with the default settings.
///
/// # Example
///
/// ```
/// use mmis_query::{ranked_search, EntityKind, MatchKind, SearchableEntity};
///
/// let index = vec![
///     SearchableEntity::new(EntityKind::Vendor, "V-002", "Nile Agro Ltd", "Registry Nodes", "Vendors"),
///     SearchableEntity::new(EntityKind::Product, "P-101", "Premium Basmati Rice", "Catalog Items", "Inventory Control"),
/// ];
///
/// let results = ranked_search("nile", &index);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].entity.id, "V-002");
/// assert_eq!(results[0].match_kind, MatchKind::Prefix);
///
/// assert!(ranked_search("   ", &index).is_empty());
/// ```
pub fn ranked_search<'a, I>(query: &str, entities: I) -> Vec<RankedEntity<'a>>
where
    I: IntoIterator<Item = &'a SearchableEntity>,
{
    ranked_search_with(&SearchConfig::default(), query, entities)
}

/// Rank `entities` against `query` using `config`'s threshold and limit.
pub fn ranked_search_with<'a, I>(config: &SearchConfig, query: &str, entities: I) -> Vec<RankedEntity<'a>>
where
    I: IntoIterator<Item = &'a SearchableEntity>,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut candidates = 0usize;
    let mut ranked: Vec<RankedEntity<'a>> = entities
        .into_iter()
        .inspect(|_| candidates += 1)
        .filter_map(|entity| {
            score(&query, entity, config.min_similarity).map(|(score, match_kind)| RankedEntity {
                entity,
                score,
                match_kind,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    if let Some(limit) = config.limit {
        ranked.truncate(limit);
    }

    tracing::debug!(
        query = %query,
        candidates,
        results = ranked.len(),
        "Ranked search"
    );
    ranked
}
