//! Transforms over parsed bug-tracker exports.
//!
//! Everything here operates on an already-built [`bugtab_model::Table`]:
//!
//! - **categorical**: frequency-ranked encoding of categorical columns
//! - **datetime**: tracker timestamp parsing
//! - **issues**: reduction of a raw export to the resolved-issue dataset
//!
//! Transforms mutate the table in place or return explicit mapping values;
//! none of them re-runs the ingestion pipeline, and per-row semantic
//! failures are logged and skipped rather than aborting the pass.

pub mod categorical;
pub mod datetime;
pub mod error;
pub mod issues;

pub use categorical::{CategoryRanks, encode_columns, frequency_ranks};
pub use datetime::{TIMESTAMP_FORMAT, hours_between, parse_timestamp};
pub use error::{Result, TransformError};
pub use issues::{KEPT_COLUMNS, ReduceStats, reduce_resolved_issues};
