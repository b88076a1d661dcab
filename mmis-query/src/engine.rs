//! Filter-and-sort pipeline.
//!
//! Every registry list screen runs the same pipeline: compile the query
//! against the record schema, keep the records every predicate accepts, then
//! stable-sort by the requested key. Records are borrowed, never modified.

use crate::error::QueryResult;
use crate::filter::CompiledFilter;
use crate::query::QuerySpec;
use crate::schema::RecordSchema;
use crate::sort::{sort_by_accessor, SortConfig};

/// Keep the records matching every filter in `spec`, in input order.
pub fn filter_records<'a, T>(
    records: &'a [T],
    spec: &QuerySpec,
    schema: &RecordSchema<T>,
) -> QueryResult<Vec<&'a T>> {
    let filter = CompiledFilter::compile(spec, schema)?;
    let matched: Vec<&T> = records.iter().filter(|record| filter.matches(record)).collect();

    tracing::debug!(
        schema = schema.name(),
        total = records.len(),
        matched = matched.len(),
        "Filtered records"
    );
    Ok(matched)
}

/// Stable-sort borrowed records by `sort.key`.
pub fn sort_records<'a, T>(
    records: Vec<&'a T>,
    sort: &SortConfig,
    schema: &RecordSchema<T>,
) -> QueryResult<Vec<&'a T>> {
    let accessor = schema.accessor(&sort.key)?;
    Ok(sort_by_accessor(records, accessor, sort.direction))
}

/// Filter `records` by `spec`, then sort by `spec.sort` if present.
///
/// The query is validated against the schema before any record is read, so
/// an undeclared field is reported even for an empty collection.
///
/// # Errors
///
/// Returns `UnknownField` or `KindMismatch` when `spec` references fields
/// the schema does not declare or uses them in a way their kind does not
/// support. Malformed filter values are never errors.
///
/// # Example
///
/// ```
/// use mmis_query::{filter_and_sort, QuerySpec, RecordSchema, SortDirection};
///
/// struct Tx {
///     id: &'static str,
///     amount: f64,
/// }
///
/// let schema = RecordSchema::<Tx>::new("transaction")
///     .search_text("id", |t| t.id)
///     .numeric("amount", |t| t.amount);
///
/// let txs = vec![
///     Tx { id: "TX-1", amount: 500.0 },
///     Tx { id: "TX-2", amount: 50.0 },
///     Tx { id: "TX-3", amount: 5000.0 },
/// ];
///
/// let spec = QuerySpec::new()
///     .at_least("amount", "100")
///     .sort_by("amount", SortDirection::Desc);
///
/// let ids: Vec<&str> = filter_and_sort(&txs, &spec, &schema)
///     .unwrap()
///     .iter()
///     .map(|t| t.id)
///     .collect();
/// assert_eq!(ids, ["TX-3", "TX-1"]);
/// ```
pub fn filter_and_sort<'a, T>(
    records: &'a [T],
    spec: &QuerySpec,
    schema: &RecordSchema<T>,
) -> QueryResult<Vec<&'a T>> {
    let sort_accessor = match &spec.sort {
        Some(sort) => Some((schema.accessor(&sort.key)?, sort.direction)),
        None => None,
    };

    let matched = filter_records(records, spec, schema)?;

    Ok(match sort_accessor {
        Some((accessor, direction)) => sort_by_accessor(matched, accessor, direction),
        None => matched,
    })
}
