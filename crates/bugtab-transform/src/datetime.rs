//! Tracker timestamp parsing.

use chrono::NaiveDateTime;

/// Timestamp format used by the tracker export, e.g. `2019-03-01T15:04:05Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parses a tracker timestamp; `None` when the value does not conform.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
}

/// Whole hours from `start` to `end`, truncated toward zero; negative when
/// `end` precedes `start`.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_hours()
}
