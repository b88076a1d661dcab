//! # MMIS Access
//!
//! Role-based visibility for the MMIS market-logistics console.
//!
//! ## Overview
//!
//! The mmis-access crate handles:
//! - **Roles**: The closed set of console roles and the actor holding one
//! - **Hierarchy**: Which roles supervise which, validated to be acyclic
//! - **Requirements**: The roles directly entitled to an item or action
//! - **Resolver**: The visibility decision for an actor and a requirement
//! - **Navigation**: The sidebar catalog filtered per actor
//!
//! ## Decision Order
//!
//! ```text
//! no requirement          -> visible (public)
//! actor is override role  -> visible
//! actor directly listed   -> visible
//! actor supervises listed -> visible (hierarchical mode only)
//! otherwise               -> not visible
//! ```
//!
//! Unknown roles never raise errors; they fail closed.
//!
//! ## Usage
//!
//! ```rust
//! use mmis_access::{AccessResolver, Actor, CapabilityRequirement, Role, RoleHierarchy};
//!
//! let resolver = AccessResolver::new(RoleHierarchy::standard());
//! let gate_module = CapabilityRequirement::single(Role::CounterStaff);
//!
//! // Market admins supervise counter staff
//! assert!(resolver.is_visible(&Actor::new(Role::MarketAdmin), Some(&gate_module)));
//! assert!(!resolver.is_visible(&Actor::new(Role::Vendor), Some(&gate_module)));
//! ```
//!
//! ## Configuration
//!
//! [`AccessConfig::from_env`] reads `MMIS_VISIBILITY_MODE`,
//! `MMIS_OVERRIDE_ROLE` and `MMIS_ROLE_HIERARCHY`.

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod navigation;
pub mod requirement;
pub mod resolver;
pub mod roles;

// Re-export main types for convenience
pub use config::AccessConfig;
pub use error::{AccessError, AccessResult};
pub use hierarchy::{RoleHierarchy, RoleHierarchyBuilder};
pub use navigation::{MenuEntry, NavItem, NavigationCatalog};
pub use requirement::CapabilityRequirement;
pub use resolver::{AccessResolver, Decision, Gated, VisibilityMode};
pub use roles::{Actor, Role};
