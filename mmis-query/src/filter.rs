//! Predicate compilation.
//!
//! A `QuerySpec` is checked against the schema and turned into a list of
//! predicates once per call. Unknown fields are caller errors; malformed
//! values are dropped with a warning and leave the rest of the query intact.

use crate::error::{QueryError, QueryResult};
use crate::query::{QuerySpec, RangeFilter, ALL};
use crate::schema::{Accessor, FieldKind, FlagFn, NumericFn, RecordSchema, TextFn};
use crate::temporal::{parse_timestamp, parse_upper_bound};

enum Predicate<'s, T> {
    TextEquals(&'s TextFn<T>, String),
    NumberEquals(&'s NumericFn<T>, f64),
    FlagEquals(&'s FlagFn<T>, bool),
    TextRange(&'s TextFn<T>, Option<String>, Option<String>),
    NumberRange(&'s NumericFn<T>, Option<f64>, Option<f64>),
    TemporalRange(&'s TextFn<T>, Option<i64>, Option<i64>),
    FlagSet(&'s FlagFn<T>),
}

impl<T> Predicate<'_, T> {
    fn matches(&self, record: &T) -> bool {
        match self {
            Predicate::TextEquals(value, expected) => value(record) == expected,
            Predicate::NumberEquals(value, expected) => value(record) == *expected,
            Predicate::FlagEquals(value, expected) => value(record) == *expected,
            Predicate::TextRange(value, min, max) => {
                let v = value(record);
                min.as_deref().map_or(true, |min| v >= min) && max.as_deref().map_or(true, |max| v <= max)
            }
            Predicate::NumberRange(value, min, max) => {
                let v = value(record);
                min.map_or(true, |min| v >= min) && max.map_or(true, |max| v <= max)
            }
            Predicate::TemporalRange(value, min, max) => match parse_timestamp(value(record)) {
                Some(v) => min.map_or(true, |min| v >= min) && max.map_or(true, |max| v <= max),
                None => false,
            },
            Predicate::FlagSet(value) => value(record),
        }
    }
}

/// Predicates compiled from one query against one schema.
pub(crate) struct CompiledFilter<'s, T> {
    tokens: Vec<String>,
    search: Vec<&'s TextFn<T>>,
    predicates: Vec<Predicate<'s, T>>,
}

impl<'s, T> CompiledFilter<'s, T> {
    pub(crate) fn compile(spec: &QuerySpec, schema: &'s RecordSchema<T>) -> QueryResult<Self> {
        let mut predicates = Vec::new();

        for (field, value) in &spec.equality_filters {
            let accessor = schema.accessor(field)?;
            if value == ALL {
                continue;
            }
            if let Some(predicate) = equality(field, accessor, value) {
                predicates.push(predicate);
            }
        }

        for (field, range) in &spec.range_filters {
            let accessor = schema.accessor(field)?;
            if let Some(predicate) = range_predicate(field, accessor, range)? {
                predicates.push(predicate);
            }
        }

        for field in &spec.flags {
            match schema.accessor(field)? {
                Accessor::Flag(value) => predicates.push(Predicate::FlagSet(value)),
                other => {
                    return Err(QueryError::KindMismatch {
                        field: field.clone(),
                        kind: other.kind(),
                        operation: "flag filtering",
                    })
                }
            }
        }

        Ok(Self {
            tokens: spec.tokens(),
            search: schema.search_accessors(),
            predicates,
        })
    }

    fn matches_text(&self, record: &T) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        let haystacks: Vec<String> = self
            .search
            .iter()
            .map(|value| value(record).to_lowercase())
            .collect();
        self.tokens
            .iter()
            .all(|token| haystacks.iter().any(|haystack| haystack.contains(token.as_str())))
    }

    pub(crate) fn matches(&self, record: &T) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(record)) && self.matches_text(record)
    }
}

fn equality<'s, T>(field: &str, accessor: &'s Accessor<T>, value: &str) -> Option<Predicate<'s, T>> {
    match accessor {
        Accessor::Text(get) | Accessor::Temporal(get) => Some(Predicate::TextEquals(get, value.to_string())),
        Accessor::Numeric(get) => parse_number(field, value).map(|n| Predicate::NumberEquals(get, n)),
        Accessor::Flag(get) => match value.trim().to_lowercase().as_str() {
            "true" => Some(Predicate::FlagEquals(get, true)),
            "false" => Some(Predicate::FlagEquals(get, false)),
            _ => {
                tracing::warn!(field, value, "Ignoring malformed flag filter value");
                None
            }
        },
    }
}

fn range_predicate<'s, T>(
    field: &str,
    accessor: &'s Accessor<T>,
    range: &RangeFilter,
) -> QueryResult<Option<Predicate<'s, T>>> {
    let min = present(range.min.as_deref());
    let max = present(range.max.as_deref());

    let predicate = match accessor {
        Accessor::Text(get) => Predicate::TextRange(get, min.map(str::to_string), max.map(str::to_string)),
        Accessor::Numeric(get) => Predicate::NumberRange(
            get,
            min.and_then(|v| parse_number(field, v)),
            max.and_then(|v| parse_number(field, v)),
        ),
        Accessor::Temporal(get) => Predicate::TemporalRange(
            get,
            min.and_then(|v| parse_bound(field, v, parse_timestamp)),
            max.and_then(|v| parse_bound(field, v, parse_upper_bound)),
        ),
        Accessor::Flag(_) => {
            return Err(QueryError::KindMismatch {
                field: field.to_string(),
                kind: FieldKind::Flag,
                operation: "range filtering",
            })
        }
    };

    let unbounded = match &predicate {
        Predicate::TextRange(_, None, None)
        | Predicate::NumberRange(_, None, None)
        | Predicate::TemporalRange(_, None, None) => true,
        _ => false,
    };
    Ok(if unbounded { None } else { Some(predicate) })
}

/// Blank bounds count as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(field: &str, value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            tracing::warn!(field, value, "Ignoring malformed numeric bound");
            None
        }
    }
}

fn parse_bound(field: &str, value: &str, parse: fn(&str) -> Option<i64>) -> Option<i64> {
    let parsed = parse(value);
    if parsed.is_none() {
        tracing::warn!(field, value, "Ignoring malformed date bound");
    }
    parsed
}
