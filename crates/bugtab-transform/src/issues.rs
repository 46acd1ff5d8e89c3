//! Reduction of a parsed export to the resolved-issue dataset.
//!
//! The raw export carries every tracker column and every issue state. The
//! modeling dataset wants a fixed column subset, a single text description,
//! and a resolution duration, for resolved issues only. The reduction mutates
//! the table in place: rows are replaced wholesale and the header is rebuilt;
//! the ingestion pipeline is never re-run.

use serde_json::Value;
use tracing::{info, warn};

use bugtab_model::Table;
use bugtab_model::field::{escape_quotes, quote, unescape_quotes, unquote};

use crate::datetime::{hours_between, parse_timestamp};
use crate::error::{Result, TransformError};

/// Columns carried over from the raw export, in output order.
pub const KEPT_COLUMNS: [&str; 14] = [
    "id",
    "status",
    "resolution",
    "severity",
    "priority",
    "creator",
    "assigned_to",
    "component",
    "blocks",
    "depends_on",
    "dupe_of",
    "description",
    "creation_time",
    "resolution_dates",
];

const DESCRIPTION_SLOT: usize = 11;
const RESOLUTION_TIME_SLOT: usize = 13;

/// Header name replacing `resolution_dates` after reduction.
pub const RESOLUTION_TIME_COLUMN: &str = "resolution_time";

/// Derived column appended by the reduction.
pub const DURATION_COLUMN: &str = "resolution_duration_hours";

/// Literal control-character escapes the export tool leaks into description
/// payloads; scrubbed before the payload is parsed as JSON.
const CONTROL_ESCAPES: [&str; 28] = [
    "\\x00", "\\x01", "\\x02", "\\x03", "\\x04", "\\x05", "\\x06", "\\x07", "\\x08", "\\x0b",
    "\\x0f", "\\x11", "\\x14", "\\x15", "\\x18", "\\x19", "\\x1b", "\\x1c", "\\x1d", "\\x1e",
    "\\x7f", "\\x80", "\\x82", "\\x94", "\\x98", "\\x99", "\\x9f", "\\xa0",
];

/// Row accounting for one reduction pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReduceStats {
    /// Rows in the input table.
    pub input_rows: usize,
    /// Rows kept in the reduced table.
    pub kept_rows: usize,
    /// Rows dropped because the issue is neither CLOSED nor RESOLVED.
    pub filtered_rows: usize,
    /// Rows dropped because a payload or timestamp would not parse.
    pub skipped_rows: usize,
}

fn require(table: &Table, column: &str) -> Result<usize> {
    table
        .header_index(column)
        .ok_or_else(|| TransformError::MissingColumn {
            column: column.to_string(),
        })
}

fn field(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

fn scrub_control_escapes(text: &str) -> String {
    let mut cleaned = text.to_string();
    for escape in CONTROL_ESCAPES {
        if cleaned.contains(escape) {
            cleaned = cleaned.replace(escape, "");
        }
    }
    cleaned
}

/// Merges the issue summary with the `text` member of the description
/// payload into one quoted, newline-escaped field value.
///
/// `None` when the payload is not a JSON object with a string `text`.
fn merged_description(summary: &str, raw: &str) -> Option<String> {
    let cleaned = scrub_control_escapes(&unescape_quotes(raw));
    let payload: Value = serde_json::from_str(unquote(&cleaned)).ok()?;
    let text = payload.get("text")?.as_str()?;
    let merged = format!("{summary}\n{text}");
    Some(quote(&escape_quotes(&merged)).replace('\n', "\\n"))
}

/// Resolution timestamps recorded for an issue, oldest first.
///
/// The raw field is a CSV-escaped, quoted JSON array of strings; `None` when
/// it is anything else.
fn resolution_history(raw: &str) -> Option<Vec<String>> {
    let cleaned = unescape_quotes(raw.trim());
    let value: Value = serde_json::from_str(unquote(&cleaned)).ok()?;
    let items = value.as_array()?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Reduces the table to resolved issues with a merged description and a
/// derived resolution duration.
///
/// Keeps [`KEPT_COLUMNS`] in order, renames `resolution_dates` to
/// [`RESOLUTION_TIME_COLUMN`] (holding the last recorded resolution
/// timestamp, or the raw field when none is recorded), and appends
/// [`DURATION_COLUMN`] with whole hours from creation to resolution, `-1`
/// when no resolution is recorded. Rows whose payloads or timestamps fail to
/// parse are logged and skipped; processing continues.
pub fn reduce_resolved_issues(table: &mut Table) -> Result<ReduceStats> {
    let keep_indexes: Vec<usize> = KEPT_COLUMNS
        .iter()
        .map(|name| require(table, name))
        .collect::<Result<_>>()?;
    let id_index = keep_indexes[0];
    let status_index = require(table, "status")?;
    let summary_index = require(table, "summary")?;
    let description_index = require(table, "description")?;
    let creation_index = require(table, "creation_time")?;
    let resolution_index = require(table, "resolution_dates")?;

    let mut stats = ReduceStats {
        input_rows: table.len(),
        ..ReduceStats::default()
    };
    let mut kept = Vec::new();

    for (number, row) in table.rows().iter().enumerate() {
        let issue = field(row, id_index);
        let status = field(row, status_index);
        if status != "CLOSED" && status != "RESOLVED" {
            stats.filtered_rows += 1;
            continue;
        }

        let summary = field(row, summary_index);
        let Some(description) = merged_description(summary, field(row, description_index)) else {
            warn!(
                row = number,
                issue, "description payload is not a JSON object with text; row skipped"
            );
            stats.skipped_rows += 1;
            continue;
        };

        let mut values: Vec<String> = keep_indexes
            .iter()
            .map(|&index| field(row, index).to_string())
            .collect();
        values[DESCRIPTION_SLOT] = description;

        let Some(history) = resolution_history(field(row, resolution_index)) else {
            warn!(
                row = number,
                issue, "resolution dates are not a JSON string array; row skipped"
            );
            stats.skipped_rows += 1;
            continue;
        };

        let mut duration_hours: i64 = -1;
        if let Some(last) = history.last() {
            let created = parse_timestamp(field(row, creation_index));
            let resolved = parse_timestamp(last);
            let (Some(created), Some(resolved)) = (created, resolved) else {
                warn!(
                    row = number,
                    issue, "unparseable creation or resolution timestamp; row skipped"
                );
                stats.skipped_rows += 1;
                continue;
            };
            duration_hours = hours_between(created, resolved);
            values[RESOLUTION_TIME_SLOT] = last.clone();
        }
        values.push(duration_hours.to_string());
        kept.push(values);
    }

    stats.kept_rows = kept.len();
    table.replace_rows(kept);

    let mut names: Vec<String> = KEPT_COLUMNS.iter().map(|n| (*n).to_string()).collect();
    names[RESOLUTION_TIME_SLOT] = RESOLUTION_TIME_COLUMN.to_string();
    names.push(DURATION_COLUMN.to_string());
    table.set_header(names);

    info!(
        input_rows = stats.input_rows,
        kept_rows = stats.kept_rows,
        filtered_rows = stats.filtered_rows,
        skipped_rows = stats.skipped_rows,
        "export reduced to resolved issues"
    );
    Ok(stats)
}
