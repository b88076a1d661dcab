//! The contract every registry record type fulfils.

use mmis_query::{RecordSchema, Searchable};

use crate::registry::Registry;

/// A record type shown on a registry list screen.
pub trait Record: Searchable + Sized + Send + Sync + 'static {
    /// Navigation target of the screen listing these records.
    const NAVIGATION_TARGET: &'static str;

    /// Result group label in the global search.
    const SEARCH_CATEGORY: &'static str;

    /// Field declarations used by the list screen's filters and sort keys.
    fn schema() -> &'static RecordSchema<Self>;

    /// The registry's collection of this record type.
    fn collection(registry: &Registry) -> &[Self];
}
