//! Field tokenizer: splits one logical record into raw field values.
//!
//! The export interleaves three quoting dialects on a single line: plain
//! comma-delimited text, CSV-style quoted strings with doubled-quote escapes,
//! and double-quote-wrapped JSON objects whose inner quoting follows JSON
//! rules instead. No single grammar covers the mix, so the scanner is an
//! explicit three-state machine over the record's bytes; every delimiter it
//! cares about is ASCII, which keeps byte indices valid char boundaries.
//!
//! Fields are returned verbatim: wrapping quotes and escapes are preserved,
//! and unquoting is the caller's concern (`bugtab_model::field`).

use crate::error::{IngestError, Result};

/// Quoting dialect of the field currently under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Plain field, terminated by the next comma or end of record.
    Regular,
    /// Quoted string, terminated by an unescaped `",` pair.
    QuotedString,
    /// Quoted JSON object, terminated by the literal `}",` run.
    QuotedObject,
}

/// Splits a logical record into its ordered raw field values.
///
/// # Errors
///
/// Returns [`IngestError::TruncatedRecord`] when a new field is expected past
/// the end of the record (a trailing comma, or a lone quote at the end).
/// Nothing is returned for such a record; partial recovery would silently
/// misalign every following column.
pub fn tokenize_record(record: &str) -> Result<Vec<String>> {
    let bytes = record.as_bytes();
    let mut fields = Vec::new();
    let mut col_start = 0usize;
    let mut index = 0usize;
    let mut state = ScanState::Regular;

    loop {
        let stop = match state {
            ScanState::Regular => match find_byte(bytes, index, b',') {
                Some(comma) => {
                    fields.push(record[col_start..comma].to_string());
                    index = comma + 1;
                    false
                }
                None => {
                    fields.push(record[col_start..].to_string());
                    true
                }
            },
            ScanState::QuotedString => match find_closing_quote(bytes, index) {
                Some(close) => {
                    // `close` is the terminating quote; the field keeps it.
                    fields.push(record[col_start..=close].to_string());
                    index = close + 2;
                    false
                }
                None => {
                    fields.push(record[col_start..].to_string());
                    true
                }
            },
            ScanState::QuotedObject => match find_sequence(bytes, index, b"}\",") {
                Some(brace) => {
                    // Keep the closing brace and quote, skip the comma.
                    fields.push(record[col_start..brace + 2].to_string());
                    index = brace + 3;
                    false
                }
                None => {
                    fields.push(record[col_start..].to_string());
                    true
                }
            },
        };
        if stop {
            break;
        }
        state = next_state(bytes, index).ok_or_else(|| IngestError::TruncatedRecord {
            record: record.to_string(),
            position: index,
        })?;
        col_start = index;
    }
    Ok(fields)
}

/// Dialect of the field starting at `index`, decided by lookahead alone:
/// `"{` selects an object, a bare `"` a string, anything else a plain field.
/// `None` when the record ends where the field should begin.
fn next_state(bytes: &[u8], index: usize) -> Option<ScanState> {
    match bytes.get(index)? {
        b'"' => match bytes.get(index + 1)? {
            b'{' => Some(ScanState::QuotedObject),
            _ => Some(ScanState::QuotedString),
        },
        _ => Some(ScanState::Regular),
    }
}

/// Terminating `",` of a quoted-string field starting the search at `from`.
///
/// A candidate preceded by an odd run of consecutive quotes (the candidate
/// itself included) closes the field; an even run means the quote is half of
/// a doubled-quote escape, and the search resumes one byte further.
fn find_closing_quote(bytes: &[u8], from: usize) -> Option<usize> {
    let mut search = from;
    loop {
        let candidate = find_sequence(bytes, search, b"\",")?;
        let mut run = 0;
        while run <= candidate && bytes[candidate - run] == b'"' {
            run += 1;
        }
        if run % 2 == 1 {
            return Some(candidate);
        }
        search = candidate + 1;
    }
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|offset| from + offset)
}

fn find_sequence(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}
