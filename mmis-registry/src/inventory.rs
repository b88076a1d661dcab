//! Inventory records and stock levels

use mmis_query::{EntityKind, RecordSchema, Searchable, SearchableEntity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::record::Record;
use crate::registry::Registry;

static INVENTORY_SCHEMA: OnceLock<RecordSchema<InventoryItem>> = OnceLock::new();

/// Stock thresholds a vendor configures in their settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockThresholds {
    /// At or below this count stock is low.
    pub low: u32,
    /// At or below this count stock is critical.
    pub critical: u32,
}

impl Default for StockThresholds {
    fn default() -> Self {
        Self { low: 10, critical: 5 }
    }
}

/// Derived stock health.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockLevel {
    /// At or below the critical threshold.
    Critical,
    /// At or below the low threshold.
    Low,
    /// Above both thresholds.
    Healthy,
}

impl StockLevel {
    /// Classify a stock count.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmis_registry::{StockLevel, StockThresholds};
    ///
    /// let thresholds = StockThresholds::default();
    /// assert_eq!(StockLevel::classify(5, &thresholds), StockLevel::Critical);
    /// assert_eq!(StockLevel::classify(10, &thresholds), StockLevel::Low);
    /// assert_eq!(StockLevel::classify(11, &thresholds), StockLevel::Healthy);
    /// ```
    pub fn classify(stock: u32, thresholds: &StockThresholds) -> Self {
        if stock <= thresholds.critical {
            StockLevel::Critical
        } else if stock <= thresholds.low {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }

    /// Get the string representation of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::Critical => "CRITICAL",
            StockLevel::Low => "LOW",
            StockLevel::Healthy => "HEALTHY",
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product held in a vendor's inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    /// Product identifier, e.g. `PRD-8821`
    pub id: String,

    /// Product name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Owning vendor's name
    #[serde(default)]
    pub vendor: String,

    /// Catalog category
    pub category: String,

    /// Units in stock
    pub stock: u32,

    /// Unit price (UGX)
    pub price: f64,

    /// Stock health at the last update
    pub status: StockLevel,

    /// Shown on the storefront's featured shelf
    #[serde(default)]
    pub is_featured: bool,
}

impl InventoryItem {
    /// Create an item, classifying its stock with the default thresholds.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        stock: u32,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            vendor: String::new(),
            category: category.into(),
            stock,
            price,
            status: StockLevel::classify(stock, &StockThresholds::default()),
            is_featured: false,
        }
    }

    /// Set the owning vendor.
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    /// Record a new stock count and reclassify it.
    pub fn restock(&mut self, stock: u32, thresholds: &StockThresholds) {
        self.stock = stock;
        self.status = StockLevel::classify(stock, thresholds);
        if self.status != StockLevel::Healthy {
            tracing::warn!(item = %self.id, stock, level = %self.status, "Stock below threshold");
        }
    }

    /// Flip the featured flag.
    pub fn toggle_featured(&mut self) {
        self.is_featured = !self.is_featured;
    }
}

impl Searchable for InventoryItem {
    fn to_searchable(&self) -> SearchableEntity {
        SearchableEntity::new(
            EntityKind::Product,
            &self.id,
            &self.name,
            Self::SEARCH_CATEGORY,
            Self::NAVIGATION_TARGET,
        )
        .with_secondary(&self.vendor)
        .with_secondary(&self.category)
    }
}

impl Record for InventoryItem {
    const NAVIGATION_TARGET: &'static str = "Inventory Control";
    const SEARCH_CATEGORY: &'static str = "Catalog Items";

    fn schema() -> &'static RecordSchema<Self> {
        INVENTORY_SCHEMA.get_or_init(|| {
            RecordSchema::new("inventory_item")
                .search_text("name", |i: &InventoryItem| i.name.as_str())
                .search_text("id", |i: &InventoryItem| i.id.as_str())
                .text("category", |i: &InventoryItem| i.category.as_str())
                .text("status", |i: &InventoryItem| i.status.as_str())
                .text("vendor", |i: &InventoryItem| i.vendor.as_str())
                .numeric("stock", |i: &InventoryItem| f64::from(i.stock))
                .numeric("price", |i: &InventoryItem| i.price)
                .flag("featured", |i: &InventoryItem| i.is_featured)
        })
    }

    fn collection(registry: &Registry) -> &[Self] {
        &registry.inventory
    }
}
