//! Capability requirements
//!
//! A requirement lists the roles directly entitled to see or use an item.
//! Items with no requirement are public; callers express that as `None`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{AccessError, AccessResult};
use crate::roles::Role;

/// Roles directly entitled to a navigable item or action.
///
/// # Examples
///
/// ```
/// use mmis_access::{CapabilityRequirement, Role};
///
/// let req = CapabilityRequirement::new([Role::Vendor, Role::Supplier]).unwrap();
/// assert!(req.allows(Role::Vendor));
/// assert!(!req.allows(Role::User));
///
/// assert!(CapabilityRequirement::new(Vec::<Role>::new()).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawRequirement")]
pub struct CapabilityRequirement {
    roles: BTreeSet<Role>,
    /// Names that did not resolve to a role when built from names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    unresolved: Vec<String>,
}

/// Wire form of a requirement before the non-empty check.
#[derive(Deserialize)]
struct RawRequirement {
    roles: BTreeSet<Role>,
    #[serde(default)]
    unresolved: Vec<String>,
}

impl TryFrom<RawRequirement> for CapabilityRequirement {
    type Error = AccessError;

    fn try_from(raw: RawRequirement) -> AccessResult<Self> {
        if raw.roles.is_empty() && raw.unresolved.is_empty() {
            return Err(AccessError::EmptyRequirement);
        }
        Ok(Self {
            roles: raw.roles,
            unresolved: raw.unresolved,
        })
    }
}

impl CapabilityRequirement {
    /// Create a requirement from a non-empty set of roles.
    ///
    /// # Errors
    ///
    /// Returns `EmptyRequirement` when `roles` is empty.
    pub fn new<I>(roles: I) -> AccessResult<Self>
    where
        I: IntoIterator<Item = Role>,
    {
        let roles: BTreeSet<Role> = roles.into_iter().collect();
        if roles.is_empty() {
            return Err(AccessError::EmptyRequirement);
        }
        Ok(Self {
            roles,
            unresolved: Vec::new(),
        })
    }

    /// Create a requirement entitling a single role.
    pub fn single(role: Role) -> Self {
        Self {
            roles: BTreeSet::from([role]),
            unresolved: Vec::new(),
        }
    }

    /// Create a requirement from role names.
    ///
    /// Names that are not roles are kept aside rather than rejected, so a
    /// requirement naming only unknown roles entitles nobody directly.
    ///
    /// # Errors
    ///
    /// Returns `EmptyRequirement` when `names` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmis_access::{CapabilityRequirement, Role};
    ///
    /// let req = CapabilityRequirement::from_names(&["VENDOR", "AUDITOR"]).unwrap();
    /// assert!(req.allows(Role::Vendor));
    /// assert_eq!(req.unresolved(), ["AUDITOR"]);
    /// ```
    pub fn from_names(names: &[&str]) -> AccessResult<Self> {
        if names.is_empty() {
            return Err(AccessError::EmptyRequirement);
        }
        let mut roles = BTreeSet::new();
        let mut unresolved = Vec::new();
        for name in names {
            match Role::parse(name) {
                Some(role) => {
                    roles.insert(role);
                }
                None => {
                    tracing::warn!(role = %name, "Ignoring unknown role in capability requirement");
                    unresolved.push((*name).to_string());
                }
            }
        }
        Ok(Self { roles, unresolved })
    }

    /// Check whether `role` is directly entitled.
    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Check whether any of `roles` is directly entitled.
    pub fn allows_any<'a, I>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = &'a Role>,
    {
        roles.into_iter().any(|role| self.roles.contains(role))
    }

    /// Directly entitled roles in stable order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    /// Names that did not resolve to a role.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let req = CapabilityRequirement::single(Role::CounterStaff);
        assert!(req.allows(Role::CounterStaff));
        assert_eq!(req.roles().count(), 1);
    }

    #[test]
    fn test_from_names_all_unknown_entitles_nobody() {
        let req = CapabilityRequirement::from_names(&["GHOST"]).unwrap();
        assert!(Role::all().iter().all(|role| !req.allows(*role)));
        assert_eq!(req.unresolved().len(), 1);
    }

    #[test]
    fn test_from_names_empty_rejected() {
        assert!(matches!(
            CapabilityRequirement::from_names(&[]),
            Err(AccessError::EmptyRequirement)
        ));
    }

    #[test]
    fn test_allows_any() {
        let req = CapabilityRequirement::new([Role::Vendor]).unwrap();
        assert!(req.allows_any(&[Role::Supplier, Role::Vendor]));
        assert!(!req.allows_any(&[Role::Supplier]));
        assert!(!req.allows_any(std::iter::empty::<&Role>()));
    }

    #[test]
    fn test_serde_round_trip_keeps_roles() {
        let req = CapabilityRequirement::new([Role::MarketAdmin, Role::Vendor]).unwrap();
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"roles":["MARKET_ADMIN","VENDOR"]}"#);
        let back: CapabilityRequirement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn test_deserialize_rejects_empty_roles() {
        let err = serde_json::from_str::<CapabilityRequirement>(r#"{"roles":[]}"#).unwrap_err();
        assert!(err.to_string().contains("at least one role"));
    }

    #[test]
    fn test_deserialize_keeps_unresolved_only_requirement() {
        let req = CapabilityRequirement::from_names(&["AUDITOR"]).unwrap();
        let json = serde_json::to_string(&req).unwrap();
        let back: CapabilityRequirement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
        assert_eq!(back.roles().count(), 0);
    }
}
