//! Bug-tracker export ingestion.
//!
//! Turns the raw CSV export of a bug tracker into a [`bugtab_model::Table`]
//! of discrete raw field values. The export cannot be split with an ordinary
//! CSV reader: fields may be quoted JSON objects, quoted free text with
//! doubled-quote escapes, and one logical record may be wrapped across
//! several physical lines by the export tool.
//!
//! The pipeline has two stages, consumed bottom-up:
//!
//! - **Record assembly** ([`assemble_records`]): joins physical lines into
//!   logical records using a trailing sentinel, escaping embedded newlines
//!   as the literal `\n`.
//! - **Field tokenization** ([`tokenize_record`]): a three-state scanner
//!   that splits one logical record into raw field values.
//!
//! [`read_export`] / [`parse_export`] compose the two into a table.
//!
//! # Example
//!
//! ```
//! use bugtab_ingest::{ExportOptions, parse_export};
//!
//! let lines = vec![
//!     "id,status,eol".to_string(),
//!     "42365,RESOLVED,---".to_string(),
//! ];
//! let table = parse_export(&lines, &ExportOptions::default())?;
//! assert_eq!(table.header_index("status"), Some(1));
//! assert_eq!(table.value(0, 1), Some("RESOLVED"));
//! # Ok::<(), bugtab_ingest::IngestError>(())
//! ```

mod error;
mod record;
mod reader;
mod tokenizer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Record Assembly ===
pub use record::{DEFAULT_SENTINEL, NEWLINE_ESCAPE, assemble_records};

// === Tokenization ===
pub use tokenizer::tokenize_record;

// === Export Reading ===
pub use reader::{ExportOptions, parse_export, read_export, read_lines, validate_encoding};
