//! Market registry records

use mmis_query::{EntityKind, QuerySpec, RecordSchema, Searchable, SearchableEntity};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::record::Record;
use crate::registry::Registry;

static MARKET_SCHEMA: OnceLock<RecordSchema<Market>> = OnceLock::new();

/// Who owns and runs a market.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ownership {
    /// Run by the local authority.
    Public,
    /// Privately owned.
    Private,
    /// Public-private partnership.
    Ppp,
}

impl Ownership {
    /// Get the string representation of the ownership.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ownership::Public => "PUBLIC",
            Ownership::Private => "PRIVATE",
            Ownership::Ppp => "PPP",
        }
    }
}

/// A physical market or hub.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Market {
    /// Market identifier
    pub id: String,

    /// Market name
    pub name: String,

    /// City
    pub city: String,

    /// Market type, e.g. `WHOLESALE`
    #[serde(rename = "type")]
    pub market_type: String,

    /// Ownership model
    pub ownership: Ownership,

    /// Stall capacity
    pub capacity: u32,

    /// Opening date, `YYYY-MM-DD`
    pub established: String,
}

impl Market {
    /// Restrict `spec` to markets established between two years, inclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmis_query::QuerySpec;
    /// use mmis_registry::Market;
    ///
    /// let spec = Market::established_between(QuerySpec::new(), 1990, 2010);
    /// let range = &spec.range_filters["established"];
    /// assert_eq!(range.min.as_deref(), Some("1990-01-01"));
    /// assert_eq!(range.max.as_deref(), Some("2010-12-31"));
    /// ```
    pub fn established_between(spec: QuerySpec, start_year: i32, end_year: i32) -> QuerySpec {
        spec.between(
            "established",
            format!("{:04}-01-01", start_year),
            format!("{:04}-12-31", end_year),
        )
    }
}

impl Searchable for Market {
    fn to_searchable(&self) -> SearchableEntity {
        SearchableEntity::new(
            EntityKind::Market,
            &self.id,
            &self.name,
            Self::SEARCH_CATEGORY,
            Self::NAVIGATION_TARGET,
        )
        .with_secondary(&self.city)
    }
}

impl Record for Market {
    const NAVIGATION_TARGET: &'static str = "Markets";
    const SEARCH_CATEGORY: &'static str = "Market Hubs";

    fn schema() -> &'static RecordSchema<Self> {
        MARKET_SCHEMA.get_or_init(|| {
            RecordSchema::new("market")
                .search_text("name", |m: &Market| m.name.as_str())
                .search_text("city", |m: &Market| m.city.as_str())
                .text("type", |m: &Market| m.market_type.as_str())
                .text("ownership", |m: &Market| m.ownership.as_str())
                .numeric("capacity", |m: &Market| f64::from(m.capacity))
                .temporal("established", |m: &Market| m.established.as_str())
        })
    }

    fn collection(registry: &Registry) -> &[Self] {
        &registry.markets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmis_query::{filter_and_sort, SortDirection};

    fn market(id: &str, name: &str, city: &str, ownership: Ownership, capacity: u32, established: &str) -> Market {
        Market {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            market_type: "WHOLESALE".to_string(),
            ownership,
            capacity,
            established: established.to_string(),
        }
    }

    fn markets() -> Vec<Market> {
        vec![
            market("M-1", "Owino Market", "Kampala", Ownership::Public, 50_000, "1971-03-01"),
            market("M-2", "Nakasero Market", "Kampala", Ownership::Ppp, 8_000, "1927-06-15"),
            market("M-3", "Jinja Main", "Jinja", Ownership::Private, 3_000, "2014-11-20"),
        ]
    }

    #[test]
    fn test_year_range_and_capacity_sort() {
        let markets = markets();
        let spec = Market::established_between(QuerySpec::new(), 1900, 1999)
            .sort_by("capacity", SortDirection::Desc);
        let found = filter_and_sort(&markets, &spec, Market::schema()).unwrap();
        let ids: Vec<&str> = found.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["M-1", "M-2"]);
    }

    #[test]
    fn test_sort_by_established_date() {
        let markets = markets();
        let spec = QuerySpec::new().sort_by("established", SortDirection::Asc);
        let found = filter_and_sort(&markets, &spec, Market::schema()).unwrap();
        assert_eq!(found[0].id, "M-2");
    }

    #[test]
    fn test_ownership_filter() {
        let markets = markets();
        let spec = QuerySpec::new().text("kampala").equals("ownership", "PPP");
        let found = filter_and_sort(&markets, &spec, Market::schema()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Nakasero Market");
    }

    #[test]
    fn test_type_field_name() {
        let json = serde_json::to_value(&markets()[0]).unwrap();
        assert_eq!(json["type"], "WHOLESALE");
        assert_eq!(json["ownership"], "PUBLIC");
    }
}
