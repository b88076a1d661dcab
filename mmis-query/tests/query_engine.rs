//! Integration tests for filtering, sorting and ranked search.

use mmis_query::{
    filter_and_sort, levenshtein, ranked_search, EntityKind, MatchKind, QueryError, QuerySpec,
    RecordSchema, SearchableEntity, SortConfig, SortDirection, ALL,
};

#[derive(Debug)]
struct Order {
    id: &'static str,
    customer: &'static str,
    vendor: &'static str,
    status: &'static str,
    total: f64,
    created_at: &'static str,
}

fn schema() -> RecordSchema<Order> {
    RecordSchema::new("order")
        .search_text("id", |o: &Order| o.id)
        .search_text("customer", |o: &Order| o.customer)
        .search_text("vendor", |o: &Order| o.vendor)
        .text("status", |o: &Order| o.status)
        .numeric("total", |o: &Order| o.total)
        .temporal("created_at", |o: &Order| o.created_at)
}

fn orders() -> Vec<Order> {
    vec![
        Order {
            id: "ORD-1001",
            customer: "Kampala Grocers",
            vendor: "Nile Agro",
            status: "PENDING",
            total: 450_000.0,
            created_at: "2024-05-18 11:20",
        },
        Order {
            id: "ORD-1002",
            customer: "Jinja Rice Mill",
            vendor: "Basmati Traders",
            status: "DELIVERED",
            total: 1_200_000.0,
            created_at: "2024-05-17 09:05",
        },
        Order {
            id: "ORD-1003",
            customer: "Mbarara Dairy",
            vendor: "Rice Masters Jinja",
            status: "PENDING",
            total: 80_000.0,
            created_at: "2024-05-18 09:05",
        },
        Order {
            id: "ORD-1004",
            customer: "Gulu Foods",
            vendor: "Nile Agro",
            status: "CANCELLED",
            total: 450_000.0,
            created_at: "pending sync",
        },
    ]
}

fn ids(found: &[&Order]) -> Vec<&'static str> {
    found.iter().map(|o| o.id).collect()
}

#[test]
fn test_free_text_tokens_spread_over_fields() {
    let orders = orders();
    let spec = QuerySpec::new().text("rice jinja");
    let found = filter_and_sort(&orders, &spec, &schema()).unwrap();
    // "Jinja Rice Mill" holds both tokens in one field, "Rice Masters Jinja" too.
    assert_eq!(ids(&found), vec!["ORD-1002", "ORD-1003"]);

    let spec = QuerySpec::new().text("nile gulu");
    let found = filter_and_sort(&orders, &spec, &schema()).unwrap();
    assert_eq!(ids(&found), vec!["ORD-1004"]);
}

#[test]
fn test_filters_are_and_combined() {
    let orders = orders();
    let spec = QuerySpec::new()
        .equals("status", "PENDING")
        .at_least("total", "100000");
    let found = filter_and_sort(&orders, &spec, &schema()).unwrap();
    assert_eq!(ids(&found), vec!["ORD-1001"]);
}

#[test]
fn test_all_sentinel_and_cleared_spec_match_everything() {
    let orders = orders();
    let spec = QuerySpec::new().equals("status", ALL);
    assert_eq!(filter_and_sort(&orders, &spec, &schema()).unwrap().len(), 4);

    let spec = QuerySpec::new().text("nile").equals("status", "PENDING").cleared();
    assert_eq!(filter_and_sort(&orders, &spec, &schema()).unwrap().len(), 4);
}

#[test]
fn test_date_range_includes_whole_end_day() {
    let orders = orders();
    let spec = QuerySpec::new().between("created_at", "2024-05-18", "2024-05-18");
    let found = filter_and_sort(&orders, &spec, &schema()).unwrap();
    assert_eq!(ids(&found), vec!["ORD-1001", "ORD-1003"]);
}

#[test]
fn test_malformed_bounds_are_ignored() {
    let orders = orders();
    let spec = QuerySpec::new()
        .at_least("total", "a lot")
        .at_most("created_at", "next week");
    assert_eq!(filter_and_sort(&orders, &spec, &schema()).unwrap().len(), 4);
}

#[test]
fn test_sort_by_date_descending_with_unparseable_last() {
    let orders = orders();
    let spec = QuerySpec::new().sort_by("created_at", SortDirection::Desc);
    let found = filter_and_sort(&orders, &spec, &schema()).unwrap();
    assert_eq!(ids(&found), vec!["ORD-1001", "ORD-1003", "ORD-1002", "ORD-1004"]);
}

#[test]
fn test_sort_toggle_and_stable_ties() {
    let orders = orders();
    let sort = SortConfig::ascending("total").toggle("total");
    let found = filter_and_sort(&orders, &QuerySpec::new().with_sort(sort), &schema()).unwrap();
    // ORD-1001 and ORD-1004 tie on total and keep input order.
    assert_eq!(ids(&found), vec!["ORD-1002", "ORD-1001", "ORD-1004", "ORD-1003"]);
}

#[test]
fn test_caller_errors() {
    let orders = orders();
    let spec = QuerySpec::new().equals("region", "Central");
    assert!(matches!(
        filter_and_sort(&orders, &spec, &schema()),
        Err(QueryError::UnknownField { .. })
    ));

    let spec = QuerySpec::new().flag("total");
    assert!(matches!(
        filter_and_sort(&orders, &spec, &schema()),
        Err(QueryError::KindMismatch { .. })
    ));
}

#[test]
fn test_ranked_search_over_console_index() {
    let index = vec![
        SearchableEntity::new(EntityKind::Vendor, "V-001", "Global Tech Solution", "Registry Nodes", "Vendors"),
        SearchableEntity::new(EntityKind::Product, "P-101", "Premium Basmati Rice", "Catalog Items", "Inventory Control"),
        SearchableEntity::new(EntityKind::Order, "O-001", "ORD-1001 (Maize Flour)", "Order Manifests", "Orders"),
        SearchableEntity::new(EntityKind::Logistics, "L-001", "Weekly Bridge W21", "Logistics", "Supply Requisitions"),
    ];

    let ranked = ranked_search("rice", &index);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].match_kind, MatchKind::Substring);

    let ranked = ranked_search("l-001", &index);
    assert_eq!(ranked[0].entity.kind, EntityKind::Logistics);
    assert_eq!(ranked[0].score, 100.0);

    // One edit away from the full name.
    let ranked = ranked_search("weekly bridge w2l", &index);
    assert_eq!(ranked[0].match_kind, MatchKind::Fuzzy);
    assert!(ranked[0].score > 37.0);

    assert!(ranked_search("", &index).is_empty());
}

#[test]
fn test_levenshtein_properties() {
    for (a, b) in [("kitten", "sitting"), ("jinja", ""), ("mbale", "mbale")] {
        assert_eq!(levenshtein(a, b), levenshtein(b, a));
        assert!(levenshtein(a, b) <= a.chars().count().max(b.chars().count()));
    }
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("abc", "abc"), 0);
}
