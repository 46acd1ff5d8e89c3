//! Frequency-ranked categorical encoding.
//!
//! Distinct column values are ranked by descending occurrence count, the most
//! frequent value getting rank 0. The resulting mapping is a plain value the
//! caller passes into later transforms, so that applying the same encoding to
//! a training and a test split is an explicit contract rather than an
//! accident of call order.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use bugtab_model::Table;

use crate::error::{Result, TransformError};

/// Zero-based frequency rank per distinct raw value of one column.
pub type CategoryRanks = BTreeMap<String, usize>;

/// Ranks the distinct values of a column by descending frequency.
///
/// Ties keep first-seen input order (the sort is stable), so the same input
/// sequence always produces the same mapping.
pub fn frequency_ranks<'a, I>(values: I) -> CategoryRanks
where
    I: IntoIterator<Item = &'a str>,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match slots.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .enumerate()
        .map(|(rank, (value, _))| (value.to_string(), rank))
        .collect()
}

/// Builds the column-name to value-rank mapping for the given columns.
///
/// # Errors
///
/// [`TransformError::MissingColumn`] when a requested column is absent from
/// the table header.
pub fn encode_columns(table: &Table, columns: &[&str]) -> Result<BTreeMap<String, CategoryRanks>> {
    let mut encodings = BTreeMap::new();
    for &column in columns {
        let values = table
            .column_values(column)
            .map_err(|_| TransformError::MissingColumn {
                column: column.to_string(),
            })?;
        let ranks = frequency_ranks(values.iter().copied());
        debug!(column, distinct = ranks.len(), "column encoded");
        encodings.insert(column.to_string(), ranks);
    }
    Ok(encodings)
}
