//! # MMIS Query
//!
//! In-memory query engine behind the MMIS console's registry screens and
//! global command search.
//!
//! ## Overview
//!
//! The mmis-query crate handles:
//! - **Schemas**: Per record type field declarations with a kind and accessor
//! - **Filtering**: Free text, equality, range and flag predicates, AND-combined
//! - **Sorting**: Type-aware stable sorting with a toggleable key and direction
//! - **Ranked search**: Exact, prefix, substring and fuzzy scoring of index entries
//! - **Debouncing**: Clock-injected settling of typed queries
//!
//! ## Filter & Sort
//!
//! ```rust
//! use mmis_query::{filter_and_sort, QuerySpec, RecordSchema, SortDirection, ALL};
//!
//! struct Vendor {
//!     name: &'static str,
//!     city: &'static str,
//!     status: &'static str,
//!     dues: f64,
//! }
//!
//! let schema = RecordSchema::<Vendor>::new("vendor")
//!     .search_text("name", |v| v.name)
//!     .search_text("city", |v| v.city)
//!     .text("status", |v| v.status)
//!     .numeric("dues", |v| v.dues)
//!     .flag("has_dues", |v| v.dues > 0.0);
//!
//! let vendors = vec![
//!     Vendor { name: "Nile Agro", city: "Jinja", status: "ACTIVE", dues: 0.0 },
//!     Vendor { name: "Jinja Grains", city: "Jinja", status: "ACTIVE", dues: 120_000.0 },
//!     Vendor { name: "Gulu Fresh", city: "Gulu", status: "SUSPENDED", dues: 50_000.0 },
//! ];
//!
//! let spec = QuerySpec::new()
//!     .text("jinja")
//!     .equals("status", ALL)
//!     .flag("has_dues")
//!     .sort_by("dues", SortDirection::Desc);
//!
//! let found = filter_and_sort(&vendors, &spec, &schema).unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].name, "Jinja Grains");
//! ```
//!
//! ## Errors
//!
//! Malformed user input (a non-numeric bound, an unparseable date) never
//! fails a query; the constraint is skipped. Referencing a field the schema
//! does not declare is a [`QueryError`].
//!
//! ## Configuration
//!
//! [`SearchConfig::from_env`] reads `MMIS_SEARCH_DEBOUNCE_MS`,
//! `MMIS_FUZZY_MIN_SIMILARITY` and `MMIS_SEARCH_LIMIT`.

pub mod config;
pub mod debounce;
pub mod distance;
pub mod engine;
pub mod error;
mod filter;
pub mod query;
pub mod ranked;
pub mod schema;
pub mod sort;
pub mod temporal;

// Re-export main types for convenience
pub use config::SearchConfig;
pub use debounce::Debouncer;
pub use distance::{levenshtein, similarity};
pub use engine::{filter_and_sort, filter_records, sort_records};
pub use error::{QueryError, QueryResult};
pub use query::{QuerySpec, RangeFilter, ALL};
pub use ranked::{
    ranked_search, ranked_search_with, EntityKind, MatchKind, RankedEntity, SearchHit, Searchable,
    SearchableEntity,
};
pub use schema::{FieldKind, RecordSchema};
pub use sort::{SortConfig, SortDirection};
