//! Supply requisitions
//!
//! A vendor broadcasts a requisition for bulk stock; suppliers answer with
//! bids until the vendor awards one. Requisitions show up in the global
//! search under the logistics group.

use mmis_query::{EntityKind, RecordSchema, Searchable, SearchableEntity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::record::Record;
use crate::registry::Registry;

static REQUISITION_SCHEMA: OnceLock<RecordSchema<Requisition>> = OnceLock::new();

/// Bidding state of a requisition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequisitionStatus {
    /// Broadcast, no bids yet.
    #[default]
    Open,
    /// At least one bid received.
    Bidding,
    /// A bid was accepted.
    Awarded,
    /// Withdrawn by the vendor.
    Closed,
}

impl RequisitionStatus {
    /// Get the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequisitionStatus::Open => "OPEN",
            RequisitionStatus::Bidding => "BIDDING",
            RequisitionStatus::Awarded => "AWARDED",
            RequisitionStatus::Closed => "CLOSED",
        }
    }

    /// Whether suppliers may still bid.
    pub fn accepts_bids(&self) -> bool {
        matches!(self, RequisitionStatus::Open | RequisitionStatus::Bidding)
    }
}

impl fmt::Display for RequisitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supplier's offer against a requisition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bid {
    /// Bidding supplier
    pub supplier_id: String,
    /// Supplier name at bid time
    pub supplier_name: String,
    /// Offered price for the whole quantity (UGX)
    pub amount: f64,
}

/// A broadcast request for stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Requisition {
    /// Requisition identifier, e.g. `REQ-8821`
    pub id: String,

    /// Requesting vendor
    pub vendor_id: String,

    /// Vendor name at broadcast time
    pub vendor_name: String,

    /// What is being requested
    pub item_name: String,

    /// Quantity requested, in `unit`
    pub quantity: u32,

    /// Unit of measure, e.g. `Bags`
    pub unit: String,

    /// Budget ceiling (UGX)
    pub budget: f64,

    /// Bidding state
    #[serde(default)]
    pub status: RequisitionStatus,

    /// Broadcast time, `YYYY-MM-DD HH:MM`
    pub created_at: String,

    #[serde(default)]
    pub description: String,

    /// Bids received so far
    #[serde(default)]
    pub bids: Vec<Bid>,
}

impl Requisition {
    /// Create an open requisition with no bids.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        vendor_id: impl Into<String>,
        vendor_name: impl Into<String>,
        item_name: impl Into<String>,
        quantity: u32,
        unit: impl Into<String>,
        budget: f64,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            vendor_id: vendor_id.into(),
            vendor_name: vendor_name.into(),
            item_name: item_name.into(),
            quantity,
            unit: unit.into(),
            budget,
            status: RequisitionStatus::Open,
            created_at: created_at.into(),
            description: String::new(),
            bids: Vec::new(),
        }
    }

    /// Record a bid. Returns `false` once bidding has ended.
    pub fn place_bid(&mut self, bid: Bid) -> bool {
        if !self.status.accepts_bids() {
            return false;
        }
        tracing::debug!(requisition = %self.id, supplier = %bid.supplier_id, amount = bid.amount, "Bid placed");
        self.bids.push(bid);
        self.status = RequisitionStatus::Bidding;
        true
    }

    /// The cheapest bid, earliest first on ties.
    pub fn lowest_bid(&self) -> Option<&Bid> {
        self.bids
            .iter()
            .reduce(|best, bid| if bid.amount < best.amount { bid } else { best })
    }

    /// Award the cheapest bid and stop bidding.
    pub fn award_lowest(&mut self) -> Option<&Bid> {
        if self.status != RequisitionStatus::Bidding {
            return None;
        }
        self.status = RequisitionStatus::Awarded;
        self.lowest_bid()
    }
}

impl Searchable for Requisition {
    fn to_searchable(&self) -> SearchableEntity {
        SearchableEntity::new(
            EntityKind::Logistics,
            &self.id,
            &self.item_name,
            Self::SEARCH_CATEGORY,
            Self::NAVIGATION_TARGET,
        )
        .with_secondary(&self.vendor_name)
        .with_secondary(format!("{} {}", self.quantity, self.unit))
    }
}

impl Record for Requisition {
    const NAVIGATION_TARGET: &'static str = "Supply Requisitions";
    const SEARCH_CATEGORY: &'static str = "Logistics";

    fn schema() -> &'static RecordSchema<Self> {
        REQUISITION_SCHEMA.get_or_init(|| {
            RecordSchema::new("requisition")
                .search_text("id", |r: &Requisition| r.id.as_str())
                .search_text("item", |r: &Requisition| r.item_name.as_str())
                .search_text("vendor", |r: &Requisition| r.vendor_name.as_str())
                .text("status", |r: &Requisition| r.status.as_str())
                .text("unit", |r: &Requisition| r.unit.as_str())
                .numeric("budget", |r: &Requisition| r.budget)
                .numeric("quantity", |r: &Requisition| f64::from(r.quantity))
                .temporal("created_at", |r: &Requisition| r.created_at.as_str())
        })
    }

    fn collection(registry: &Registry) -> &[Self] {
        &registry.requisitions
    }
}
