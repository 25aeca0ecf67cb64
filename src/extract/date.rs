use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::Timestamp;

/// Naive layouts seen in the wild, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Converts a publication or live-event date into a [`Timestamp`].
///
/// Accepts RFC 2822 (`Mon, 01 Jan 2024 00:00:00 GMT`), RFC 3339 and a few
/// naive ISO layouts. A weekday name that disagrees with the date is ignored
/// rather than rejected. Anything else becomes [`Timestamp::Invalid`]; callers
/// only reach this after a support check, so a bad date never drops the record.
pub fn pub_date_to_date(raw: &str) -> Timestamp {
    let trimmed = raw.trim();

    let parsed = DateTime::parse_from_rfc2822(trimmed)
        .or_else(|_| DateTime::parse_from_rfc2822(strip_weekday(trimmed)))
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| parse_naive(trimmed));

    match parsed {
        Some(dt) => Timestamp::Valid(dt),
        None => {
            tracing::debug!(date = %raw, "Unparseable date");
            Timestamp::Invalid(raw.to_string())
        }
    }
}

/// Drops a leading `Mon,` so a mismatched weekday does not fail RFC 2822 parsing.
fn strip_weekday(s: &str) -> &str {
    match s.split_once(',') {
        Some((day, rest)) if day.chars().all(|c| c.is_ascii_alphabetic()) => rest.trim_start(),
        _ => s,
    }
}

fn parse_naive(s: &str) -> Option<DateTime<Utc>> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}
