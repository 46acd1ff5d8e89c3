//! Parsed-table data model for bug-tracker exports.
//!
//! A [`Table`] owns the rows produced by the ingestion pipeline: an optional
//! header (name to column index) and an ordered sequence of rows, each an
//! ordered sequence of raw field values. Raw means exactly as tokenized,
//! quoting and escapes untouched; the [`field`] module holds the helpers for
//! turning raw values into logical text.

pub mod error;
pub mod field;
pub mod table;

pub use error::{ModelError, Result};
pub use field::{FieldDialect, dialect_of, logical_value, quote, unquote};
pub use table::{Header, Table};
