//! The live registry and its role-scoped global search.
//!
//! The global search index is rebuilt from the live collections on every
//! query and narrowed to entries whose navigation target the actor can open.

use mmis_access::{AccessResolver, Actor, NavigationCatalog};
use mmis_query::{
    filter_and_sort, ranked_search_with, QuerySpec, SearchConfig, SearchHit, Searchable,
    SearchableEntity,
};
use serde::{Deserialize, Serialize};

use crate::error::RegistryResult;
use crate::inventory::InventoryItem;
use crate::market::Market;
use crate::order::Order;
use crate::record::Record;
use crate::requisition::Requisition;
use crate::supplier::Supplier;
use crate::transaction::Transaction;
use crate::vendor::Vendor;

/// All records the console currently holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Registry {
    /// Vendor registry
    #[serde(default)]
    pub vendors: Vec<Vendor>,

    /// Inventory items
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,

    /// Order manifests
    #[serde(default)]
    pub orders: Vec<Order>,

    /// Markets and hubs
    #[serde(default)]
    pub markets: Vec<Market>,

    /// Wallet ledger
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// Supplier network
    #[serde(default)]
    pub suppliers: Vec<Supplier>,

    /// Supply requisitions
    #[serde(default)]
    pub requisitions: Vec<Requisition>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry snapshot from JSON.
    pub fn from_json(json: &str) -> RegistryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.vendors.len()
            + self.inventory.len()
            + self.orders.len()
            + self.markets.len()
            + self.transactions.len()
            + self.suppliers.len()
            + self.requisitions.len()
    }

    /// Whether the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run a list-screen query over one record type.
    ///
    /// # Example
    ///
    /// ```
    /// use mmis_query::QuerySpec;
    /// use mmis_registry::{Registry, Vendor};
    ///
    /// let mut registry = Registry::new();
    /// registry.vendors.push(Vendor::new("V-001", "Global Tech Solution", "Electronics", "Kampala"));
    /// registry.vendors.push(Vendor::new("V-002", "Fresh Foods Co.", "Groceries", "Jinja"));
    ///
    /// let found = registry.find::<Vendor>(&QuerySpec::new().text("fresh")).unwrap();
    /// assert_eq!(found[0].id, "V-002");
    /// ```
    pub fn find<R: Record>(&self, spec: &QuerySpec) -> RegistryResult<Vec<&R>> {
        Ok(filter_and_sort(R::collection(self), spec, R::schema())?)
    }

    /// Project every record into the global search index.
    pub fn search_index(&self) -> Vec<SearchableEntity> {
        let mut index = Vec::with_capacity(self.len());
        index.extend(self.vendors.iter().map(Searchable::to_searchable));
        index.extend(self.inventory.iter().map(Searchable::to_searchable));
        index.extend(self.orders.iter().map(Searchable::to_searchable));
        index.extend(self.markets.iter().map(Searchable::to_searchable));
        index.extend(self.transactions.iter().map(Searchable::to_searchable));
        index.extend(self.suppliers.iter().map(Searchable::to_searchable));
        index.extend(self.requisitions.iter().map(Searchable::to_searchable));
        index
    }

    /// Global search with the default search settings.
    pub fn global_search(
        &self,
        resolver: &AccessResolver,
        actor: &Actor,
        catalog: &NavigationCatalog,
        query: &str,
    ) -> Vec<SearchHit> {
        self.global_search_with(&SearchConfig::default(), resolver, actor, catalog, query)
    }

    /// Rank the entries `actor` may open against `query`.
    ///
    /// An entry is searchable only when its navigation target is in the
    /// catalog and visible to the actor.
    pub fn global_search_with(
        &self,
        config: &SearchConfig,
        resolver: &AccessResolver,
        actor: &Actor,
        catalog: &NavigationCatalog,
        query: &str,
    ) -> Vec<SearchHit> {
        let index = self.search_index();
        let visible = index
            .iter()
            .filter(|entity| catalog.is_target_visible(resolver, actor, &entity.navigation_target));

        let hits: Vec<SearchHit> = ranked_search_with(config, query, visible)
            .into_iter()
            .map(SearchHit::from)
            .collect();

        tracing::debug!(
            role = %actor.role,
            indexed = index.len(),
            hits = hits.len(),
            "Global search"
        );
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmis_access::Role;
    use mmis_query::{EntityKind, MatchKind};

    use crate::market::Ownership;
    use crate::order::{OrderDirection, OrderLine};

    fn registry() -> Registry {
        Registry {
            vendors: vec![Vendor::new("V-002", "Nile Agro Ltd", "Groceries", "Jinja")],
            inventory: vec![InventoryItem::new("P-101", "Premium Basmati Rice", "Food", 40, 180_000.0)],
            orders: vec![Order::new(
                "ORD-1001",
                "Alice Johnson",
                "Nile Agro Ltd",
                OrderDirection::Incoming,
                "2024-05-18 09:30",
                vec![OrderLine {
                    product_id: "P-101".to_string(),
                    name: "Basmati Rice".to_string(),
                    quantity: 2,
                    price: 180_000.0,
                }],
            )],
            markets: vec![Market {
                id: "M-1".to_string(),
                name: "Nile Market".to_string(),
                city: "Jinja".to_string(),
                market_type: "RETAIL".to_string(),
                ownership: Ownership::Public,
                capacity: 2_000,
                established: "1998-04-01".to_string(),
            }],
            transactions: Vec::new(),
            suppliers: vec![Supplier::new("S-8802", "Kampala Cold Storage", "Dairy", "Bweyogerere")],
            requisitions: vec![Requisition::new(
                "L-001",
                "V-002",
                "Nile Agro Ltd",
                "Weekly Bridge W21",
                40,
                "Crates",
                2_500_000.0,
                "2024-05-19 07:00",
            )],
        }
    }

    #[test]
    fn test_search_index_covers_every_collection() {
        let registry = registry();
        let index = registry.search_index();
        assert_eq!(index.len(), registry.len());
        let kinds: Vec<EntityKind> = index.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Vendor,
                EntityKind::Product,
                EntityKind::Order,
                EntityKind::Market,
                EntityKind::Supplier,
                EntityKind::Logistics
            ]
        );
    }

    #[test]
    fn test_global_search_respects_navigation_visibility() {
        let registry = registry();
        let resolver = AccessResolver::default();
        let catalog = NavigationCatalog::standard();

        let admin = registry.global_search(&resolver, &Actor::new(Role::SuperAdmin), &catalog, "nile");
        let ids: Vec<&str> = admin.iter().map(|h| h.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["V-002", "M-1"]);

        // Vendors cannot open the Markets screen.
        let vendor = registry.global_search(&resolver, &Actor::new(Role::Vendor), &catalog, "nile");
        let ids: Vec<&str> = vendor.iter().map(|h| h.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["V-002"]);

        // Plain users see neither screen.
        assert!(registry
            .global_search(&resolver, &Actor::new(Role::User), &catalog, "nile")
            .is_empty());
    }

    #[test]
    fn test_requisitions_searchable_from_supply_screen() {
        let registry = registry();
        let resolver = AccessResolver::default();
        let catalog = NavigationCatalog::standard();

        let hits = registry.global_search(&resolver, &Actor::new(Role::Supplier), &catalog, "weekly bridge");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity.id, "L-001");
        assert_eq!(hits[0].entity.kind, EntityKind::Logistics);
        assert_eq!(hits[0].entity.category, "Logistics");

        assert!(registry
            .global_search(&resolver, &Actor::new(Role::User), &catalog, "weekly bridge")
            .is_empty());
    }

    #[test]
    fn test_order_found_by_product_in_headline() {
        let registry = registry();
        let resolver = AccessResolver::default();
        let catalog = NavigationCatalog::standard();
        let hits = registry.global_search(&resolver, &Actor::new(Role::User), &catalog, "ord-1001");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].match_kind, MatchKind::Exact);
        assert_eq!(hits[0].entity.display_name, "ORD-1001 (Basmati Rice)");
    }

    #[test]
    fn test_find_propagates_query_errors() {
        let registry = registry();
        let err = registry
            .find::<Supplier>(&QuerySpec::new().equals("region", "North"))
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
    }

    #[test]
    fn test_json_snapshot() {
        let registry = Registry::from_json(
            r#"{"suppliers":[{"id":"S-1","name":"Gulu Seeds","category":"Grain",
                "status":"ACTIVE","warehouse_location":"Gulu"}]}"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.vendors.is_empty());
        assert!(Registry::from_json(r#"{"vendors": 5}"#).is_err());
    }
}
