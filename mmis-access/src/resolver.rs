//! Visibility resolution
//!
//! Decides whether an actor may see a navigable item or action. Resolution
//! is a pure function of the actor's role, the item's requirement and the
//! static hierarchy, evaluated in a fixed order where the first match wins:
//!
//! 1. No requirement: visible to everyone
//! 2. Actor holds the universal-override role: visible
//! 3. Actor's role is directly listed: visible
//! 4. Actor supervises a listed role (hierarchical mode only): visible
//! 5. Otherwise: not visible

use serde::{Deserialize, Serialize};

use crate::hierarchy::RoleHierarchy;
use crate::requirement::CapabilityRequirement;
use crate::roles::{Actor, Role};

/// Which visibility rule set the resolver applies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMode {
    /// Direct listing plus delegation to supervisors of listed roles.
    #[default]
    Hierarchical,

    /// Direct listing and the universal override only.
    DirectOnly,
}

impl VisibilityMode {
    /// Parse mode from string representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmis_access::VisibilityMode;
    ///
    /// assert_eq!(VisibilityMode::parse("direct"), Some(VisibilityMode::DirectOnly));
    /// assert_eq!(VisibilityMode::parse("Hierarchical"), Some(VisibilityMode::Hierarchical));
    /// assert_eq!(VisibilityMode::parse("strict"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hierarchical" => Some(Self::Hierarchical),
            "direct" | "direct_only" => Some(Self::DirectOnly),
            _ => None,
        }
    }

    /// Get string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hierarchical => "hierarchical",
            Self::DirectOnly => "direct_only",
        }
    }
}

/// Outcome of a visibility check, naming the rule that decided it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The item carries no requirement.
    Public,
    /// The actor holds the universal-override role.
    Override,
    /// The actor's role is directly listed.
    Direct,
    /// The actor supervises a listed role.
    Delegated,
    /// No rule granted visibility.
    Denied,
}

impl Decision {
    /// Check whether this decision makes the item visible.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Decision::Denied)
    }
}

/// Anything that can be hidden behind a capability requirement.
pub trait Gated {
    /// The requirement guarding this item, or `None` if it is public.
    fn requirement(&self) -> Option<&CapabilityRequirement>;
}

impl Gated for CapabilityRequirement {
    fn requirement(&self) -> Option<&CapabilityRequirement> {
        Some(self)
    }
}

/// Resolves item visibility for actors.
///
/// # Example
///
/// ```
/// use mmis_access::{AccessResolver, Actor, CapabilityRequirement, Role, RoleHierarchy};
///
/// let hierarchy = RoleHierarchy::builder()
///     .supervise(Role::MarketAdmin, [Role::Vendor])
///     .build()
///     .unwrap();
/// let resolver = AccessResolver::new(hierarchy);
/// let req = CapabilityRequirement::single(Role::Vendor);
///
/// assert!(resolver.is_visible(&Actor::new(Role::MarketAdmin), Some(&req)));
/// assert!(resolver.is_visible(&Actor::new(Role::Vendor), Some(&req)));
/// assert!(!resolver.is_visible(&Actor::new(Role::CounterStaff), Some(&req)));
/// assert!(resolver.is_visible(&Actor::new(Role::User), None));
/// ```
#[derive(Debug, Clone)]
pub struct AccessResolver {
    hierarchy: RoleHierarchy,
    mode: VisibilityMode,
    override_role: Role,
}

impl Default for AccessResolver {
    fn default() -> Self {
        Self::new(RoleHierarchy::standard())
    }
}

impl AccessResolver {
    /// Create a hierarchical resolver with SuperAdmin as the override role.
    pub fn new(hierarchy: RoleHierarchy) -> Self {
        Self {
            hierarchy,
            mode: VisibilityMode::default(),
            override_role: Role::SuperAdmin,
        }
    }

    /// Set the visibility mode.
    pub fn with_mode(mut self, mode: VisibilityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the universal-override role.
    pub fn with_override_role(mut self, role: Role) -> Self {
        self.override_role = role;
        self
    }

    /// The hierarchy this resolver consults.
    pub fn hierarchy(&self) -> &RoleHierarchy {
        &self.hierarchy
    }

    /// The active visibility mode.
    pub fn mode(&self) -> VisibilityMode {
        self.mode
    }

    /// The universal-override role.
    pub fn override_role(&self) -> Role {
        self.override_role
    }

    /// Decide visibility and report which rule decided it.
    pub fn decide(&self, actor: &Actor, requirement: Option<&CapabilityRequirement>) -> Decision {
        let Some(requirement) = requirement else {
            return Decision::Public;
        };

        let decision = if actor.role == self.override_role {
            Decision::Override
        } else if requirement.allows(actor.role) {
            Decision::Direct
        } else if self.mode == VisibilityMode::Hierarchical
            && requirement.allows_any(actor.supervised_roles(&self.hierarchy))
        {
            Decision::Delegated
        } else {
            Decision::Denied
        };

        tracing::trace!(role = %actor.role, ?decision, "Resolved visibility");
        decision
    }

    /// Check whether `actor` may see an item guarded by `requirement`.
    pub fn is_visible(&self, actor: &Actor, requirement: Option<&CapabilityRequirement>) -> bool {
        self.decide(actor, requirement).is_visible()
    }

    /// Check visibility for a role given by name.
    ///
    /// Unknown role names see public items only.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmis_access::{AccessResolver, CapabilityRequirement, Role};
    ///
    /// let resolver = AccessResolver::default();
    /// let req = CapabilityRequirement::single(Role::Vendor);
    /// assert!(resolver.is_visible_by_name("vendor", Some(&req)));
    /// assert!(!resolver.is_visible_by_name("auditor", Some(&req)));
    /// assert!(resolver.is_visible_by_name("auditor", None));
    /// ```
    pub fn is_visible_by_name(&self, role: &str, requirement: Option<&CapabilityRequirement>) -> bool {
        match Actor::from_role_name(role) {
            Some(actor) => self.is_visible(&actor, requirement),
            None => {
                tracing::debug!(role = %role, "Unknown role resolved fail-closed");
                requirement.is_none()
            }
        }
    }

    /// Keep the items `actor` may see, preserving their order.
    pub fn visible_items<'a, T: Gated>(&self, actor: &Actor, items: &'a [T]) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.is_visible(actor, item.requirement()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor_only() -> CapabilityRequirement {
        CapabilityRequirement::single(Role::Vendor)
    }

    #[test]
    fn test_public_item_visible_to_all() {
        let resolver = AccessResolver::default();
        for role in Role::all() {
            assert_eq!(resolver.decide(&Actor::new(role), None), Decision::Public);
        }
    }

    #[test]
    fn test_override_wins_even_with_empty_hierarchy() {
        let resolver = AccessResolver::new(RoleHierarchy::empty());
        let req = CapabilityRequirement::single(Role::CounterStaff);
        assert_eq!(
            resolver.decide(&Actor::new(Role::SuperAdmin), Some(&req)),
            Decision::Override
        );
    }

    #[test]
    fn test_custom_override_role() {
        let resolver = AccessResolver::new(RoleHierarchy::empty()).with_override_role(Role::MarketAdmin);
        assert!(resolver.is_visible(&Actor::new(Role::MarketAdmin), Some(&vendor_only())));
        assert!(!resolver.is_visible(&Actor::new(Role::SuperAdmin), Some(&vendor_only())));
    }

    #[test]
    fn test_direct_before_delegated() {
        let resolver = AccessResolver::default();
        let req = CapabilityRequirement::new([Role::MarketAdmin, Role::Vendor]).unwrap();
        assert_eq!(
            resolver.decide(&Actor::new(Role::MarketAdmin), Some(&req)),
            Decision::Direct
        );
    }

    #[test]
    fn test_delegation_is_single_level() {
        // SuperAdmin -> MarketAdmin -> Vendor, but with a non-SuperAdmin override
        // the top role must not reach Vendor items through MarketAdmin.
        let resolver = AccessResolver::default().with_override_role(Role::User);
        assert_eq!(
            resolver.decide(&Actor::new(Role::SuperAdmin), Some(&vendor_only())),
            Decision::Denied
        );
    }

    #[test]
    fn test_direct_only_mode_ignores_hierarchy() {
        let resolver = AccessResolver::default().with_mode(VisibilityMode::DirectOnly);
        assert_eq!(
            resolver.decide(&Actor::new(Role::MarketAdmin), Some(&vendor_only())),
            Decision::Denied
        );
        assert!(resolver.is_visible(&Actor::new(Role::Vendor), Some(&vendor_only())));
        assert!(resolver.is_visible(&Actor::new(Role::SuperAdmin), Some(&vendor_only())));
    }

    #[test]
    fn test_unknown_only_requirement_is_override_only() {
        let resolver = AccessResolver::default();
        let req = CapabilityRequirement::from_names(&["AUDITOR"]).unwrap();
        for role in Role::all() {
            let visible = resolver.is_visible(&Actor::new(role), Some(&req));
            assert_eq!(visible, role == Role::SuperAdmin);
        }
    }

    #[test]
    fn test_visible_items_preserves_order() {
        let resolver = AccessResolver::default();
        let items = vec![
            CapabilityRequirement::single(Role::CounterStaff),
            CapabilityRequirement::single(Role::User),
            CapabilityRequirement::single(Role::Vendor),
        ];
        let visible = resolver.visible_items(&Actor::new(Role::MarketAdmin), &items);
        assert_eq!(visible, vec![&items[0], &items[2]]);
    }

    #[test]
    fn test_decision_visibility() {
        assert!(Decision::Public.is_visible());
        assert!(Decision::Delegated.is_visible());
        assert!(!Decision::Denied.is_visible());
    }
}
