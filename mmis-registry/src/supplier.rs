//! Supplier network records

use mmis_query::{EntityKind, RecordSchema, Searchable, SearchableEntity};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::record::Record;
use crate::registry::Registry;

static SUPPLIER_SCHEMA: OnceLock<RecordSchema<Supplier>> = OnceLock::new();

/// Standing of a supplier in the network.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplierStatus {
    /// Accepting requisitions.
    Active,
    /// Awaiting onboarding.
    Pending,
    /// Removed from the network.
    Suspended,
}

impl SupplierStatus {
    /// Get the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierStatus::Active => "ACTIVE",
            SupplierStatus::Pending => "PENDING",
            SupplierStatus::Suspended => "SUSPENDED",
        }
    }
}

/// A supplier in the network directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    /// Supplier identifier, e.g. `S-8802`
    pub id: String,

    /// Business name
    pub name: String,

    /// Contact email
    #[serde(default)]
    pub email: String,

    /// Supply category
    pub category: String,

    /// Network standing
    pub status: SupplierStatus,

    /// Warehouse location
    pub warehouse_location: String,

    /// Number of items supplied
    #[serde(default)]
    pub supplied_items_count: u32,

    /// Average rating out of 5
    #[serde(default)]
    pub rating: f64,

    /// Number of ratings behind the average
    #[serde(default)]
    pub total_ratings: u32,

    /// Whether KYC checks passed
    #[serde(default)]
    pub kyc_validated: bool,
}

impl Supplier {
    /// Create an active supplier with no ratings.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        warehouse_location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            category: category.into(),
            status: SupplierStatus::Active,
            warehouse_location: warehouse_location.into(),
            supplied_items_count: 0,
            rating: 0.0,
            total_ratings: 0,
            kyc_validated: false,
        }
    }

    /// Fold one rating into the average. Stars are clamped to 1..=5.
    pub fn rate(&mut self, stars: u8) {
        let stars = f64::from(stars.clamp(1, 5));
        let count = f64::from(self.total_ratings);
        self.rating = (self.rating * count + stars) / (count + 1.0);
        self.total_ratings += 1;
    }
}

impl Searchable for Supplier {
    fn to_searchable(&self) -> SearchableEntity {
        SearchableEntity::new(
            EntityKind::Supplier,
            &self.id,
            &self.name,
            Self::SEARCH_CATEGORY,
            Self::NAVIGATION_TARGET,
        )
        .with_secondary(&self.category)
        .with_secondary(&self.warehouse_location)
    }
}

impl Record for Supplier {
    const NAVIGATION_TARGET: &'static str = "Suppliers Network";
    const SEARCH_CATEGORY: &'static str = "Supply Nodes";

    fn schema() -> &'static RecordSchema<Self> {
        SUPPLIER_SCHEMA.get_or_init(|| {
            RecordSchema::new("supplier")
                .search_text("name", |s: &Supplier| s.name.as_str())
                .search_text("id", |s: &Supplier| s.id.as_str())
                .search_text("category", |s: &Supplier| s.category.as_str())
                .search_text("warehouse", |s: &Supplier| s.warehouse_location.as_str())
                .text("status", |s: &Supplier| s.status.as_str())
                .numeric("rating", |s: &Supplier| s.rating)
                .flag("kyc_validated", |s: &Supplier| s.kyc_validated)
        })
    }

    fn collection(registry: &Registry) -> &[Self] {
        &registry.suppliers
    }
}
