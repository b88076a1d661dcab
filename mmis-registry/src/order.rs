//! Order manifests
//!
//! An order is incoming when the current actor sells and outgoing when
//! they buy. The orders screen shows one direction per tab.

use mmis_query::{EntityKind, RecordSchema, Searchable, SearchableEntity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::record::Record;
use crate::registry::Registry;

static ORDER_SCHEMA: OnceLock<RecordSchema<Order>> = OnceLock::new();

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, not yet dispatched.
    Pending,
    /// On its way.
    Dispatched,
    /// Received by the customer.
    Delivered,
    /// Withdrawn.
    Cancelled,
}

impl OrderStatus {
    /// Get the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Dispatched => "DISPATCHED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the actor is selling or buying.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDirection {
    /// Placed with the actor.
    Incoming,
    /// Placed by the actor.
    Outgoing,
}

impl OrderDirection {
    /// Get the string representation of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Incoming => "INCOMING",
            OrderDirection::Outgoing => "OUTGOING",
        }
    }
}

/// One product line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Product identifier
    pub product_id: String,
    /// Product name at order time
    pub name: String,
    /// Units ordered
    pub quantity: u32,
    /// Unit price (UGX)
    pub price: f64,
}

impl OrderLine {
    /// Line subtotal.
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// An order manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Order identifier, e.g. `ORD-1001`
    pub id: String,

    /// Buyer
    pub customer: String,

    /// Seller
    pub vendor: String,

    /// Ordered lines
    #[serde(default)]
    pub items: Vec<OrderLine>,

    /// Order total (UGX)
    pub total: f64,

    /// Fulfilment state
    pub status: OrderStatus,

    /// Placement time, `YYYY-MM-DD HH:MM`
    pub created_at: String,

    /// Incoming or outgoing
    pub direction: OrderDirection,

    /// Free-form labels
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Order {
    /// Create a pending order whose total is the sum of its lines.
    pub fn new(
        id: impl Into<String>,
        customer: impl Into<String>,
        vendor: impl Into<String>,
        direction: OrderDirection,
        created_at: impl Into<String>,
        items: Vec<OrderLine>,
    ) -> Self {
        let total: f64 = items.iter().map(OrderLine::subtotal).sum();
        Self {
            id: id.into(),
            customer: customer.into(),
            vendor: vendor.into(),
            items,
            total,
            status: OrderStatus::Pending,
            created_at: created_at.into(),
            direction,
            tags: Vec::new(),
        }
    }

    /// Set the fulfilment state.
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// Name shown in search results: the id with the first product.
    pub fn headline(&self) -> String {
        match self.items.first() {
            Some(line) => format!("{} ({})", self.id, line.name),
            None => self.id.clone(),
        }
    }
}

impl Searchable for Order {
    fn to_searchable(&self) -> SearchableEntity {
        SearchableEntity::new(
            EntityKind::Order,
            &self.id,
            self.headline(),
            Self::SEARCH_CATEGORY,
            Self::NAVIGATION_TARGET,
        )
        .with_secondary(&self.customer)
        .with_secondary(&self.vendor)
    }
}

impl Record for Order {
    const NAVIGATION_TARGET: &'static str = "Orders";
    const SEARCH_CATEGORY: &'static str = "Order Manifests";

    fn schema() -> &'static RecordSchema<Self> {
        ORDER_SCHEMA.get_or_init(|| {
            RecordSchema::new("order")
                .search_text("id", |o: &Order| o.id.as_str())
                .search_text("customer", |o: &Order| o.customer.as_str())
                .search_text("vendor", |o: &Order| o.vendor.as_str())
                .text("status", |o: &Order| o.status.as_str())
                .text("direction", |o: &Order| o.direction.as_str())
                .numeric("total", |o: &Order| o.total)
                .temporal("created_at", |o: &Order| o.created_at.as_str())
        })
    }

    fn collection(registry: &Registry) -> &[Self] {
        &registry.orders
    }
}
