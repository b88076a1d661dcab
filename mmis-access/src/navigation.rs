//! Navigation catalog
//!
//! The console sidebar as data: every navigable module with the roles
//! directly entitled to it. The menu an actor sees is the catalog filtered
//! through an [`AccessResolver`].

use serde::{Deserialize, Serialize};

use crate::requirement::CapabilityRequirement;
use crate::resolver::{AccessResolver, Gated};
use crate::roles::{Actor, Role};

/// A navigable console module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavItem {
    /// Navigation target, also used as the default label
    pub name: String,

    /// Roles directly entitled; `None` means every actor sees it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<CapabilityRequirement>,

    /// Label shown to vendors instead of `name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_label: Option<String>,
}

impl NavItem {
    /// Create a public item.
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirement: None,
            vendor_label: None,
        }
    }

    /// Create an item restricted to `requirement`.
    pub fn restricted(name: impl Into<String>, requirement: CapabilityRequirement) -> Self {
        Self {
            name: name.into(),
            requirement: Some(requirement),
            vendor_label: None,
        }
    }

    /// Show `label` to vendors instead of the item name.
    pub fn with_vendor_label(mut self, label: impl Into<String>) -> Self {
        self.vendor_label = Some(label.into());
        self
    }

    /// Label this item carries for `actor`.
    pub fn label_for(&self, actor: &Actor) -> &str {
        match (&self.vendor_label, actor.role) {
            (Some(label), Role::Vendor) => label,
            _ => &self.name,
        }
    }
}

impl Gated for NavItem {
    fn requirement(&self) -> Option<&CapabilityRequirement> {
        self.requirement.as_ref()
    }
}

/// A menu entry as rendered for a specific actor.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MenuEntry<'a> {
    /// Navigation target
    pub target: &'a str,
    /// Label to display
    pub label: &'a str,
}

/// Ordered collection of navigable modules.
///
/// # Examples
///
/// ```
/// use mmis_access::{AccessResolver, Actor, NavigationCatalog, Role};
///
/// let catalog = NavigationCatalog::standard();
/// let resolver = AccessResolver::default();
///
/// let menu = catalog.menu_for(&resolver, &Actor::new(Role::Vendor));
/// assert!(menu.iter().any(|entry| entry.label == "My Store"));
/// assert!(!menu.iter().any(|entry| entry.target == "Audit Logs"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationCatalog {
    items: Vec<NavItem>,
}

impl NavigationCatalog {
    /// Create a catalog from items in display order.
    pub fn new(items: Vec<NavItem>) -> Self {
        Self { items }
    }

    /// The console's standard sidebar.
    pub fn standard() -> Self {
        use Role::{CounterStaff, MarketAdmin, Supplier, User, Vendor};

        let item = |name: &str, roles: &[Role]| match CapabilityRequirement::new(roles.iter().copied()) {
            Ok(requirement) => NavItem::restricted(name, requirement),
            Err(_) => NavItem::public(name),
        };

        Self::new(vec![
            NavItem::public("Home"),
            NavItem::public("My Wallet"),
            item("Markets", &[MarketAdmin]),
            item("Map View", &[Vendor, Supplier, CounterStaff]),
            item("Vendors", &[MarketAdmin, Vendor]).with_vendor_label("My Store"),
            item("Orders", &[Vendor, User]),
            item("Suppliers Network", &[Supplier, Vendor, User]),
            item("Supply Requisitions", &[Supplier, Vendor]),
            item("Inventory Control", &[Vendor, Supplier]),
            item("Admin Roles", &[MarketAdmin]),
            item("Security Console", &[MarketAdmin]),
            item("Revenue Module", &[MarketAdmin]),
            item("Gate Management", &[CounterStaff]),
            item("Stock Counter", &[CounterStaff]),
            item("QR & Receipts", &[CounterStaff, Vendor]),
            NavItem::public("Tickets & Support"),
            item("Audit Logs", &[MarketAdmin]),
            NavItem::public("Settings"),
        ])
    }

    /// All items in display order.
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Look up an item by navigation target.
    pub fn get(&self, target: &str) -> Option<&NavItem> {
        self.items.iter().find(|item| item.name == target)
    }

    /// Items `actor` may see, in display order.
    pub fn visible_to<'a>(&'a self, resolver: &AccessResolver, actor: &Actor) -> Vec<&'a NavItem> {
        resolver.visible_items(actor, &self.items)
    }

    /// The menu as rendered for `actor`.
    pub fn menu_for<'a>(&'a self, resolver: &AccessResolver, actor: &Actor) -> Vec<MenuEntry<'a>> {
        self.visible_to(resolver, actor)
            .into_iter()
            .map(|item| MenuEntry {
                target: &item.name,
                label: item.label_for(actor),
            })
            .collect()
    }

    /// Check whether `target` exists and is visible to `actor`.
    ///
    /// Unknown targets are not visible.
    pub fn is_target_visible(&self, resolver: &AccessResolver, actor: &Actor, target: &str) -> bool {
        self.get(target)
            .map(|item| resolver.is_visible(actor, item.requirement()))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(role: Role) -> Vec<String> {
        let catalog = NavigationCatalog::standard();
        catalog
            .menu_for(&AccessResolver::default(), &Actor::new(role))
            .into_iter()
            .map(|entry| entry.target.to_string())
            .collect()
    }

    #[test]
    fn test_standard_catalog_contents() {
        let catalog = NavigationCatalog::standard();
        assert_eq!(catalog.items().len(), 18);
        assert_eq!(catalog.items()[0].name, "Home");
        assert!(catalog.get("Home").and_then(|i| i.requirement.as_ref()).is_none());
    }

    #[test]
    fn test_user_menu() {
        assert_eq!(
            targets(Role::User),
            vec![
                "Home",
                "My Wallet",
                "Orders",
                "Suppliers Network",
                "Tickets & Support",
                "Settings"
            ]
        );
    }

    #[test]
    fn test_super_admin_sees_everything() {
        assert_eq!(targets(Role::SuperAdmin).len(), 18);
    }

    #[test]
    fn test_market_admin_sees_supervised_modules() {
        let menu = targets(Role::MarketAdmin);
        assert!(menu.contains(&"Gate Management".to_string()));
        assert!(menu.contains(&"Inventory Control".to_string()));
        assert!(menu.contains(&"Audit Logs".to_string()));
        // Orders is entitled to Vendor and User; MarketAdmin supervises Vendor.
        assert!(menu.contains(&"Orders".to_string()));
    }

    #[test]
    fn test_counter_staff_menu_excludes_admin_modules() {
        let menu = targets(Role::CounterStaff);
        assert!(menu.contains(&"Stock Counter".to_string()));
        assert!(!menu.contains(&"Revenue Module".to_string()));
        assert!(!menu.contains(&"Vendors".to_string()));
    }

    #[test]
    fn test_vendor_label() {
        let catalog = NavigationCatalog::standard();
        let vendors = catalog.get("Vendors").unwrap();
        assert_eq!(vendors.label_for(&Actor::new(Role::Vendor)), "My Store");
        assert_eq!(vendors.label_for(&Actor::new(Role::MarketAdmin)), "Vendors");
    }

    #[test]
    fn test_catalog_json_rejects_item_with_empty_roles() {
        let ok = r#"{"items":[{"name":"Home"},{"name":"Markets","requirement":{"roles":["MARKET_ADMIN"]}}]}"#;
        let catalog: NavigationCatalog = serde_json::from_str(ok).unwrap();
        assert_eq!(catalog.items().len(), 2);

        let empty = r#"{"items":[{"name":"Markets","requirement":{"roles":[]}}]}"#;
        assert!(serde_json::from_str::<NavigationCatalog>(empty).is_err());
    }

    #[test]
    fn test_is_target_visible() {
        let catalog = NavigationCatalog::standard();
        let resolver = AccessResolver::default();
        let vendor = Actor::new(Role::Vendor);
        assert!(catalog.is_target_visible(&resolver, &vendor, "Inventory Control"));
        assert!(!catalog.is_target_visible(&resolver, &vendor, "Markets"));
        assert!(!catalog.is_target_visible(&resolver, &vendor, "Nowhere"));
    }
}
