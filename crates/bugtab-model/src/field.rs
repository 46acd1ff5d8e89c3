//! Helpers over raw tokenized field values.
//!
//! The tokenizer hands fields over exactly as they appear in the export,
//! wrapping quotes and doubled-quote escapes included. Consumers that need a
//! field's logical text (or its embedded payload) use these helpers instead
//! of re-tokenizing.

/// Quoting convention governing a single raw field value.
///
/// The tag is not carried by the tokenizer output; it is re-derived from the
/// content itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDialect {
    /// Unquoted, comma-delimited text.
    Plain,
    /// Wrapped in one pair of double quotes, internal quotes doubled.
    QuotedString,
    /// A double-quote-wrapped JSON object payload.
    QuotedObject,
}

/// Re-derives the quoting dialect of a raw field value.
pub fn dialect_of(raw: &str) -> FieldDialect {
    if raw.starts_with("\"{") {
        FieldDialect::QuotedObject
    } else if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        FieldDialect::QuotedString
    } else {
        FieldDialect::Plain
    }
}

/// Wraps a value in a pair of double quotes.
pub fn quote(value: &str) -> String {
    format!("\"{value}\"")
}

/// Strips a single wrapping quote pair, when present.
///
/// Internal escapes are left alone; partial quoting is returned unchanged.
///
/// # Examples
///
/// ```
/// use bugtab_model::field::unquote;
///
/// assert_eq!(unquote("\"hello\""), "hello");
/// assert_eq!(unquote("plain"), "plain");
/// assert_eq!(unquote("\"partial"), "\"partial");
/// ```
pub fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Doubles every quote character, the escape form used inside quoted fields.
pub fn escape_quotes(value: &str) -> String {
    value.replace('"', "\"\"")
}

/// Collapses doubled quotes back to single quote characters.
pub fn unescape_quotes(value: &str) -> String {
    value.replace("\"\"", "\"")
}

/// Logical text of a raw field: outer quote pair stripped, doubled internal
/// quotes collapsed.
///
/// # Examples
///
/// ```
/// use bugtab_model::field::logical_value;
///
/// assert_eq!(logical_value("\"some \"\"quoted\"\" text\""), "some \"quoted\" text");
/// assert_eq!(logical_value("42365"), "42365");
/// ```
pub fn logical_value(raw: &str) -> String {
    unescape_quotes(unquote(raw))
}
