//! Vendor registry records
//!
//! Vendors are market traders registered with the console. Admins review
//! them through KYC, promote them through the onboarding states and track
//! outstanding rent and VAT.

use mmis_query::{EntityKind, RecordSchema, Searchable, SearchableEntity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::record::Record;
use crate::registry::Registry;

static VENDOR_SCHEMA: OnceLock<RecordSchema<Vendor>> = OnceLock::new();

/// Onboarding state of a vendor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorStatus {
    /// Registered, not yet reviewed.
    Pending,
    /// Submitted documents, awaiting approval.
    PendingApproval,
    /// Under admin review.
    UnderReview,
    /// Trading.
    Active,
    /// Not trading.
    Inactive,
    /// Barred from trading.
    Suspended,
}

impl VendorStatus {
    /// Get the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorStatus::Pending => "PENDING",
            VendorStatus::PendingApproval => "PENDING_APPROVAL",
            VendorStatus::UnderReview => "UNDER_REVIEW",
            VendorStatus::Active => "ACTIVE",
            VendorStatus::Inactive => "INACTIVE",
            VendorStatus::Suspended => "SUSPENDED",
        }
    }

    /// Whether an admin may promote a vendor in this state.
    pub fn can_escalate(&self) -> bool {
        matches!(self, VendorStatus::Pending | VendorStatus::PendingApproval)
    }

    /// The state after an admin promotes the vendor.
    ///
    /// A fresh registration moves to review; every other state moves to active.
    pub fn escalated(self) -> Self {
        match self {
            VendorStatus::Pending => VendorStatus::UnderReview,
            _ => VendorStatus::Active,
        }
    }
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// KYC review outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    /// Documents not yet reviewed.
    #[default]
    Pending,
    /// Documents accepted.
    Approved,
    /// Documents rejected.
    Rejected,
}

/// A registered vendor.
///
/// # Examples
///
/// ```
/// use mmis_registry::{Vendor, VendorStatus};
///
/// let vendor = Vendor::new("V-002", "Fresh Foods Co.", "Groceries", "Jinja")
///     .with_dues(150_000.0, 25_000.0);
/// assert_eq!(vendor.dues(), 175_000.0);
/// assert!(vendor.has_dues());
/// assert_eq!(vendor.status, VendorStatus::Pending);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vendor {
    /// Registry identifier, e.g. `V-001`
    pub id: String,

    /// Trading name
    pub name: String,

    /// Contact email
    #[serde(default)]
    pub email: String,

    /// Trade category
    pub category: String,

    /// Onboarding state
    pub status: VendorStatus,

    /// KYC review outcome
    #[serde(default)]
    pub kyc_status: KycStatus,

    /// Number of listed products
    #[serde(default)]
    pub products: u32,

    /// Registration date, `YYYY-MM-DD`
    #[serde(default)]
    pub joined_date: String,

    /// City of the vendor's stall
    pub city: String,

    /// Market the stall is in
    #[serde(default)]
    pub market: String,

    /// Outstanding rent (UGX)
    #[serde(default)]
    pub rent_due: f64,

    /// Outstanding VAT (UGX)
    #[serde(default)]
    pub vat_due: f64,
}

impl Vendor {
    /// Create a pending vendor with no dues.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            category: category.into(),
            status: VendorStatus::Pending,
            kyc_status: KycStatus::Pending,
            products: 0,
            joined_date: String::new(),
            city: city.into(),
            market: String::new(),
            rent_due: 0.0,
            vat_due: 0.0,
        }
    }

    /// Set the onboarding state.
    pub fn with_status(mut self, status: VendorStatus) -> Self {
        self.status = status;
        self
    }

    /// Set outstanding rent and VAT.
    pub fn with_dues(mut self, rent_due: f64, vat_due: f64) -> Self {
        self.rent_due = rent_due;
        self.vat_due = vat_due;
        self
    }

    /// Set the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Total outstanding rent and VAT.
    pub fn dues(&self) -> f64 {
        self.rent_due + self.vat_due
    }

    /// Whether anything is outstanding.
    pub fn has_dues(&self) -> bool {
        self.dues() > 0.0
    }

    /// Promote the vendor one onboarding step.
    ///
    /// Returns `false` and leaves the vendor unchanged when its state does
    /// not allow promotion.
    pub fn escalate(&mut self) -> bool {
        if !self.status.can_escalate() {
            return false;
        }
        let next = self.status.escalated();
        tracing::debug!(vendor = %self.id, from = %self.status, to = %next, "Escalated vendor");
        self.status = next;
        true
    }
}

impl Searchable for Vendor {
    fn to_searchable(&self) -> SearchableEntity {
        SearchableEntity::new(
            EntityKind::Vendor,
            &self.id,
            &self.name,
            Self::SEARCH_CATEGORY,
            Self::NAVIGATION_TARGET,
        )
        .with_secondary(&self.city)
        .with_secondary(&self.market)
    }
}

impl Record for Vendor {
    const NAVIGATION_TARGET: &'static str = "Vendors";
    const SEARCH_CATEGORY: &'static str = "Registry Nodes";

    fn schema() -> &'static RecordSchema<Self> {
        VENDOR_SCHEMA.get_or_init(|| {
            RecordSchema::new("vendor")
                .search_text("name", |v: &Vendor| v.name.as_str())
                .search_text("email", |v: &Vendor| v.email.as_str())
                .search_text("id", |v: &Vendor| v.id.as_str())
                .search_text("category", |v: &Vendor| v.category.as_str())
                .text("status", |v: &Vendor| v.status.as_str())
                .text("city", |v: &Vendor| v.city.as_str())
                .text("market", |v: &Vendor| v.market.as_str())
                .numeric("dues", Vendor::dues)
                .numeric("products", |v: &Vendor| f64::from(v.products))
                .temporal("joined_date", |v: &Vendor| v.joined_date.as_str())
                .flag("has_dues", Vendor::has_dues)
        })
    }

    fn collection(registry: &Registry) -> &[Self] {
        &registry.vendors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmis_query::{filter_and_sort, FieldKind, QuerySpec, SortConfig};

    fn vendors() -> Vec<Vendor> {
        vec![
            Vendor::new("V-001", "Global Tech Solution", "Electronics", "Kampala")
                .with_status(VendorStatus::Active)
                .with_email("sales@globaltech.ug"),
            Vendor::new("V-002", "Fresh Foods Co.", "Groceries", "Jinja")
                .with_status(VendorStatus::PendingApproval)
                .with_dues(150_000.0, 25_000.0),
            Vendor::new("V-003", "Mukasa General Trade", "General", "Mbarara")
                .with_status(VendorStatus::Inactive)
                .with_dues(300_000.0, 50_000.0),
        ]
    }

    #[test]
    fn test_schema_kinds() {
        let schema = Vendor::schema();
        assert_eq!(schema.kind_of("dues"), Some(FieldKind::Numeric));
        assert_eq!(schema.kind_of("has_dues"), Some(FieldKind::Flag));
        assert_eq!(
            schema.search_fields().collect::<Vec<_>>(),
            vec!["name", "email", "id", "category"]
        );
    }

    #[test]
    fn test_dues_only_sorted_by_dues() {
        let vendors = vendors();
        let spec = QuerySpec::new()
            .flag("has_dues")
            .with_sort(SortConfig::descending("dues"));
        let found = filter_and_sort(&vendors, &spec, Vendor::schema()).unwrap();
        let ids: Vec<&str> = found.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["V-003", "V-002"]);
    }

    #[test]
    fn test_search_by_email() {
        let vendors = vendors();
        let spec = QuerySpec::new().text("globaltech");
        let found = filter_and_sort(&vendors, &spec, Vendor::schema()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "V-001");
    }

    #[test]
    fn test_escalation_path() {
        let mut vendor = Vendor::new("V-9", "New Stall", "General", "Gulu");
        assert!(vendor.escalate());
        assert_eq!(vendor.status, VendorStatus::UnderReview);
        assert!(!vendor.escalate());

        let mut vendor = vendor.with_status(VendorStatus::PendingApproval);
        assert!(vendor.escalate());
        assert_eq!(vendor.status, VendorStatus::Active);
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&VendorStatus::PendingApproval).unwrap();
        assert_eq!(json, "\"PENDING_APPROVAL\"");
    }

    #[test]
    fn test_projection() {
        let entity = vendors()[1].to_searchable();
        assert_eq!(entity.kind, EntityKind::Vendor);
        assert_eq!(entity.display_name, "Fresh Foods Co.");
        assert_eq!(entity.navigation_target, "Vendors");
        assert_eq!(entity.secondary_fields[0], "Jinja");
    }
}
