//! Timestamp parsing for temporal fields and bounds.
//!
//! Registry records carry dates as strings in a handful of shapes. All of
//! them are reduced to UTC epoch milliseconds so comparisons never depend
//! on string order.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Parse a timestamp into UTC epoch milliseconds.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]` and
/// `YYYY-MM-DD`. Values without an offset are read as UTC; a bare date is
/// the start of that day.
///
/// # Examples
///
/// ```
/// use mmis_query::temporal::parse_timestamp;
///
/// assert_eq!(parse_timestamp("1970-01-01 00:01"), Some(60_000));
/// assert_eq!(parse_timestamp("1970-01-02"), Some(86_400_000));
/// assert_eq!(parse_timestamp("yesterday"), None);
/// ```
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.timestamp_millis());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc().timestamp_millis());
        }
    }
    parse_date(value)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|start| start.and_utc().timestamp_millis())
}

/// Parse an inclusive upper bound.
///
/// A bare date covers the whole day, so `2024-05-15` admits
/// `2024-05-15 23:59`. Other forms parse as in [`parse_timestamp`].
///
/// # Examples
///
/// ```
/// use mmis_query::temporal::{parse_timestamp, parse_upper_bound};
///
/// let end = parse_upper_bound("2024-05-15").unwrap();
/// assert!(parse_timestamp("2024-05-15 23:59").unwrap() <= end);
/// assert!(parse_timestamp("2024-05-16").unwrap() > end);
/// ```
pub fn parse_upper_bound(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    match parse_date(trimmed) {
        Some(date) => date
            .and_hms_milli_opt(23, 59, 59, 999)
            .map(|end| end.and_utc().timestamp_millis()),
        None => parse_timestamp(trimmed),
    }
}
