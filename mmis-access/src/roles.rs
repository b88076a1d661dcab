//! Console roles and actors
//!
//! Every signed-in actor holds exactly one role for the lifetime of a
//! session. Roles are a closed set; anything else is treated as unknown and
//! fails closed wherever visibility is decided.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::hierarchy::RoleHierarchy;

/// Role held by a console actor.
///
/// # Permission Model
///
/// - **SuperAdmin**: Sees everything; the default universal override
/// - **MarketAdmin**: Runs a market; supervises vendors, suppliers and counter staff
/// - **Vendor**: Operates a store within a market
/// - **Supplier**: Supplies stock to vendors
/// - **CounterStaff**: Gate and stock-counter operators
/// - **User**: Ordinary shopper, possibly onboarding as a vendor
///
/// # Examples
///
/// ```
/// use mmis_access::Role;
///
/// assert!(Role::MarketAdmin.is_admin());
/// assert!(!Role::Vendor.is_admin());
/// assert_eq!(Role::CounterStaff.as_str(), "COUNTER_STAFF");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform-wide administrator
    SuperAdmin,

    /// Market administrator
    MarketAdmin,

    /// Store operator
    Vendor,

    /// Stock supplier
    Supplier,

    /// Gate and stock-counter operator
    CounterStaff,

    /// Ordinary user
    #[default]
    User,
}

impl Role {
    /// All roles in declaration order.
    pub fn all() -> [Role; 6] {
        [
            Role::SuperAdmin,
            Role::MarketAdmin,
            Role::Vendor,
            Role::Supplier,
            Role::CounterStaff,
            Role::User,
        ]
    }

    /// Check if this role may trigger admin-only actions on registry screens.
    ///
    /// # Returns
    ///
    /// `true` for SuperAdmin and MarketAdmin
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::MarketAdmin)
    }

    /// Parse role from string representation.
    ///
    /// Matching is case-insensitive and treats `-` and spaces like `_`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmis_access::Role;
    ///
    /// assert_eq!(Role::parse("MARKET_ADMIN"), Some(Role::MarketAdmin));
    /// assert_eq!(Role::parse("counter-staff"), Some(Role::CounterStaff));
    /// assert_eq!(Role::parse("auditor"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "SUPER_ADMIN" => Some(Role::SuperAdmin),
            "MARKET_ADMIN" => Some(Role::MarketAdmin),
            "VENDOR" => Some(Role::Vendor),
            "SUPPLIER" => Some(Role::Supplier),
            "COUNTER_STAFF" => Some(Role::CounterStaff),
            "USER" => Some(Role::User),
            _ => None,
        }
    }

    /// Get the canonical string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::MarketAdmin => "MARKET_ADMIN",
            Role::Vendor => "VENDOR",
            Role::Supplier => "SUPPLIER",
            Role::CounterStaff => "COUNTER_STAFF",
            Role::User => "USER",
        }
    }

    /// Get a human-readable display name for the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmis_access::Role;
    ///
    /// assert_eq!(Role::CounterStaff.display_name(), "Counter Staff");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::MarketAdmin => "Market Admin",
            Role::Vendor => "Vendor",
            Role::Supplier => "Supplier",
            Role::CounterStaff => "Counter Staff",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The actor whose view of the console is being resolved.
///
/// # Examples
///
/// ```
/// use mmis_access::{Actor, Role, RoleHierarchy};
///
/// let hierarchy = RoleHierarchy::standard();
/// let admin = Actor::new(Role::MarketAdmin);
/// let supervised = admin.supervised_roles(&hierarchy);
/// assert!(supervised.contains(&Role::Vendor));
///
/// assert!(Actor::from_role_name("auditor").is_none());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Actor {
    /// The single role held for this session
    pub role: Role,
}

impl Actor {
    /// Create an actor holding `role`.
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    /// Create an actor from a role name, or `None` if the name is unknown.
    pub fn from_role_name(name: &str) -> Option<Self> {
        Role::parse(name).map(Self::new)
    }

    /// Roles this actor directly supervises under `hierarchy`.
    pub fn supervised_roles<'h>(&self, hierarchy: &'h RoleHierarchy) -> &'h HashSet<Role> {
        hierarchy.supervised_by(self.role)
    }
}

impl From<Role> for Actor {
    fn from(role: Role) -> Self {
        Self::new(role)
    }
}
