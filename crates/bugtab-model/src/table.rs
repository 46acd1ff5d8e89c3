#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{ModelError, Result};

/// Ordered header names plus the name-to-column-index mapping.
///
/// Duplicate names resolve to the last occurrence (last-write-wins), so the
/// mapping stays consistent with what a positional write-out would produce.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Header {
    names: Vec<String>,
    index: BTreeMap<String, usize>,
}

impl Header {
    pub fn new(names: Vec<String>) -> Self {
        let mut index = BTreeMap::new();
        for (position, name) in names.iter().enumerate() {
            index.insert(name.clone(), position);
        }
        Self { names, index }
    }

    /// Column index for a name; `None` when the name is absent.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A parsed export: rows of raw field values plus an optional header.
///
/// Field values keep their tokenized form verbatim (wrapping quotes and
/// doubled-quote escapes intact); serialization writes them back unchanged.
/// The table is built once from a source and then mutated in place by
/// transforms, which replace rows or rebuild the header but never re-parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    header: Option<Header>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from tokenized rows. When `has_header` is set the first
    /// row is removed and becomes the header mapping.
    pub fn from_rows(mut rows: Vec<Vec<String>>, has_header: bool) -> Self {
        let header = if has_header && !rows.is_empty() {
            Some(Header::new(rows.remove(0)))
        } else {
            None
        };
        Self { header, rows }
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn header_names(&self) -> Option<&[String]> {
        self.header.as_ref().map(Header::names)
    }

    /// Column index for a header name; `None` for unknown names and for
    /// headerless tables, so callers can branch instead of catching.
    pub fn header_index(&self, name: &str) -> Option<usize> {
        self.header.as_ref().and_then(|h| h.index_of(name))
    }

    /// Replaces the header names and rebuilds the index mapping.
    pub fn set_header(&mut self, names: Vec<String>) {
        self.header = Some(Header::new(names));
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut Vec<Vec<String>> {
        &mut self.rows
    }

    /// Replaces all rows wholesale, as filtering transforms do.
    pub fn replace_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// All values of a named column, top to bottom. Rows too short for the
    /// column contribute an empty string.
    pub fn column_values(&self, name: &str) -> Result<Vec<&str>> {
        let index = self
            .header_index(name)
            .ok_or_else(|| ModelError::ColumnNotFound {
                column: name.to_string(),
            })?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the table: header names (when present), then one comma-joined
    /// line per row, each terminated by a single newline. Values are written
    /// exactly as stored, with no re-quoting pass.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if let Some(header) = &self.header {
            writeln!(writer, "{}", header.names.join(","))?;
        }
        for row in &self.rows {
            writeln!(writer, "{}", row.join(","))?;
        }
        Ok(())
    }

    /// The serialized form as an in-memory string, physical line per record.
    pub fn to_csv_string(&self) -> String {
        let mut out = String::new();
        if let Some(header) = &self.header {
            out.push_str(&header.names.join(","));
            out.push('\n');
        }
        for row in &self.rows {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| ModelError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(|source| ModelError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| (*f).to_string()).collect()
    }

    #[test]
    fn header_maps_names_to_indices() {
        let header = Header::new(owned(&["id", "status", "description"]));
        assert_eq!(header.index_of("id"), Some(0));
        assert_eq!(header.index_of("description"), Some(2));
        assert_eq!(header.index_of("missing"), None);
        assert_eq!(header.len(), 3);
    }

    #[test]
    fn duplicate_header_name_last_occurrence_wins() {
        let header = Header::new(owned(&["id", "value", "value"]));
        assert_eq!(header.index_of("value"), Some(2));
        assert_eq!(header.names(), ["id", "value", "value"]);
    }

    #[test]
    fn from_rows_splits_off_header() {
        let rows = vec![owned(&["a", "b"]), owned(&["1", "2"]), owned(&["3", "4"])];
        let table = Table::from_rows(rows, true);
        assert_eq!(table.header_index("b"), Some(1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(1, 0), Some("3"));
    }

    #[test]
    fn from_rows_without_header_keeps_all_rows() {
        let rows = vec![owned(&["a", "b"]), owned(&["1", "2"])];
        let table = Table::from_rows(rows, false);
        assert!(table.header().is_none());
        assert_eq!(table.header_index("a"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn column_values_defaults_short_rows_to_empty() {
        let rows = vec![owned(&["id", "status"]), owned(&["1", "OPEN"]), owned(&["2"])];
        let table = Table::from_rows(rows, true);
        let values = table.column_values("status").unwrap();
        assert_eq!(values, ["OPEN", ""]);
    }

    #[test]
    fn column_values_unknown_name_errors() {
        let table = Table::from_rows(vec![owned(&["id"]), owned(&["1"])], true);
        assert!(matches!(
            table.column_values("missing"),
            Err(ModelError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn set_header_rebuilds_mapping() {
        let mut table = Table::from_rows(vec![owned(&["a", "b"]), owned(&["1", "2"])], true);
        table.set_header(owned(&["x", "y"]));
        assert_eq!(table.header_index("a"), None);
        assert_eq!(table.header_index("y"), Some(1));
    }

    #[test]
    fn serializes_header_then_rows_verbatim() {
        let rows = vec![
            owned(&["id", "description"]),
            owned(&["1", "\"some \"\"quoted\"\" text\""]),
        ];
        let table = Table::from_rows(rows, true);
        assert_eq!(
            table.to_csv_string(),
            "id,description\n1,\"some \"\"quoted\"\" text\"\n"
        );
    }

    #[test]
    fn serializes_without_header() {
        let table = Table::from_rows(vec![owned(&["1", "2"])], false);
        assert_eq!(table.to_csv_string(), "1,2\n");
    }
}
