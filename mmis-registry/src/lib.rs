//! # MMIS Registry
//!
//! Record shapes behind the MMIS console's list screens, the fields each
//! screen filters and sorts on, and the role-scoped global search.
//!
//! ## Overview
//!
//! The mmis-registry crate handles:
//! - **Records**: Vendors, inventory items, orders, markets, transactions, suppliers and supply requisitions
//! - **Schemas**: One cached [`mmis_query::RecordSchema`] per record type
//! - **Search index**: Projection of every record into a searchable entity
//! - **Global search**: Ranked search limited to screens the actor may open
//!
//! ## Architecture
//!
//! ```text
//! Registry
//!   ├─ find::<R>(spec)      ─→ mmis_query::filter_and_sort(R::collection, spec, R::schema)
//!   └─ global_search(query) ─→ search_index()
//!                                 └─ filter by NavigationCatalog::is_target_visible
//!                                       └─ mmis_query::ranked_search_with
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use mmis_access::{AccessResolver, Actor, NavigationCatalog, Role};
//! use mmis_registry::{Registry, Supplier, Vendor};
//!
//! let mut registry = Registry::new();
//! registry.vendors.push(Vendor::new("V-002", "Nile Agro Ltd", "Groceries", "Jinja"));
//! registry.suppliers.push(Supplier::new("S-9", "Nile Seed Co", "Grain", "Jinja"));
//!
//! let resolver = AccessResolver::default();
//! let catalog = NavigationCatalog::standard();
//!
//! // Plain users can open the supplier network but not the vendor registry.
//! let hits = registry.global_search(&resolver, &Actor::new(Role::User), &catalog, "nile");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].entity.id, "S-9");
//! ```

pub mod error;
pub mod inventory;
pub mod market;
pub mod order;
pub mod record;
pub mod registry;
pub mod requisition;
pub mod supplier;
pub mod transaction;
pub mod vendor;

// Re-export main types for convenience
pub use error::{RegistryError, RegistryResult};
pub use inventory::{InventoryItem, StockLevel, StockThresholds};
pub use market::{Market, Ownership};
pub use order::{Order, OrderDirection, OrderLine, OrderStatus};
pub use record::Record;
pub use registry::Registry;
pub use requisition::{Bid, Requisition, RequisitionStatus};
pub use supplier::{Supplier, SupplierStatus};
pub use transaction::{Transaction, TransactionStatus, TransactionType};
pub use vendor::{KycStatus, Vendor, VendorStatus};
