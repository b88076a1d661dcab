//! Role supervision hierarchy
//!
//! A static table mapping a supervising role to the roles it supervises.
//! It is built once at startup, validated, and only read afterwards.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{AccessError, AccessResult};
use crate::roles::Role;

/// Directed supervision graph between roles.
///
/// The graph must not let any role supervise itself, directly or
/// transitively; every constructor enforces this.
///
/// # Examples
///
/// ```
/// use mmis_access::{Role, RoleHierarchy};
///
/// let hierarchy = RoleHierarchy::builder()
///     .supervise(Role::MarketAdmin, [Role::Vendor, Role::Supplier])
///     .build()
///     .unwrap();
///
/// assert!(hierarchy.supervises(Role::MarketAdmin, Role::Vendor));
/// assert!(!hierarchy.supervises(Role::Vendor, Role::MarketAdmin));
/// assert!(hierarchy.supervised_by(Role::User).is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleHierarchy {
    edges: HashMap<Role, HashSet<Role>>,
    #[serde(skip)]
    empty: HashSet<Role>,
}

impl RoleHierarchy {
    /// A hierarchy in which nobody supervises anybody.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The console's standard hierarchy.
    ///
    /// - SuperAdmin supervises MarketAdmin
    /// - MarketAdmin supervises Vendor, Supplier and CounterStaff
    pub fn standard() -> Self {
        let mut edges = HashMap::new();
        edges.insert(Role::SuperAdmin, HashSet::from([Role::MarketAdmin]));
        edges.insert(
            Role::MarketAdmin,
            HashSet::from([Role::Vendor, Role::Supplier, Role::CounterStaff]),
        );
        Self {
            edges,
            empty: HashSet::new(),
        }
    }

    /// Start building a hierarchy.
    pub fn builder() -> RoleHierarchyBuilder {
        RoleHierarchyBuilder::default()
    }

    /// Parse a hierarchy from JSON of the shape `{"ROLE": ["ROLE", ...]}`.
    ///
    /// # Errors
    ///
    /// - `InvalidHierarchy` if the document is not such a map
    /// - `UnknownRole` if any key or value is not a known role
    /// - `CyclicHierarchy` if a role ends up supervising itself
    ///
    /// # Examples
    ///
    /// ```
    /// use mmis_access::{Role, RoleHierarchy};
    ///
    /// let hierarchy = RoleHierarchy::from_json(r#"{"MARKET_ADMIN": ["VENDOR"]}"#).unwrap();
    /// assert!(hierarchy.supervises(Role::MarketAdmin, Role::Vendor));
    ///
    /// assert!(RoleHierarchy::from_json(r#"{"VENDOR": ["VENDOR"]}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> AccessResult<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        let mut builder = Self::builder();
        for (supervisor, supervised) in raw {
            let supervisor =
                Role::parse(&supervisor).ok_or_else(|| AccessError::UnknownRole(supervisor.clone()))?;
            let supervised = supervised
                .iter()
                .map(|name| Role::parse(name).ok_or_else(|| AccessError::UnknownRole(name.clone())))
                .collect::<AccessResult<Vec<_>>>()?;
            builder = builder.supervise(supervisor, supervised);
        }
        builder.build()
    }

    /// Roles directly supervised by `role` (empty if it has no entry).
    pub fn supervised_by(&self, role: Role) -> &HashSet<Role> {
        self.edges.get(&role).unwrap_or(&self.empty)
    }

    /// Check whether `supervisor` directly supervises `role`.
    pub fn supervises(&self, supervisor: Role, role: Role) -> bool {
        self.supervised_by(supervisor).contains(&role)
    }

    /// Roles that have at least one supervised role.
    pub fn supervisors(&self) -> impl Iterator<Item = Role> + '_ {
        self.edges
            .iter()
            .filter(|(_, supervised)| !supervised.is_empty())
            .map(|(role, _)| *role)
    }

    /// Check that no role can reach itself by following supervision edges.
    pub fn validate(&self) -> AccessResult<()> {
        for start in self.edges.keys() {
            let mut seen = HashSet::new();
            let mut stack: Vec<Role> = self.supervised_by(*start).iter().copied().collect();
            while let Some(role) = stack.pop() {
                if role == *start {
                    return Err(AccessError::CyclicHierarchy { role: *start });
                }
                if seen.insert(role) {
                    stack.extend(self.supervised_by(role).iter().copied());
                }
            }
        }
        Ok(())
    }
}

/// Builder for [`RoleHierarchy`].
#[derive(Debug, Default)]
pub struct RoleHierarchyBuilder {
    edges: HashMap<Role, HashSet<Role>>,
}

impl RoleHierarchyBuilder {
    /// Record that `supervisor` supervises every role in `roles`.
    pub fn supervise<I>(mut self, supervisor: Role, roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        self.edges.entry(supervisor).or_default().extend(roles);
        self
    }

    /// Validate and freeze the hierarchy.
    pub fn build(self) -> AccessResult<RoleHierarchy> {
        let hierarchy = RoleHierarchy {
            edges: self.edges,
            empty: HashSet::new(),
        };
        hierarchy.validate()?;
        Ok(hierarchy)
    }
}
