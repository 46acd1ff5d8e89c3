//! Export file reading and table construction.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use bugtab_model::Table;

use crate::error::{IngestError, Result};
use crate::record::{DEFAULT_SENTINEL, assemble_records};
use crate::tokenizer::tokenize_record;

/// How an export file is interpreted during construction.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Treat the first physical line as the header record.
    pub has_header: bool,
    /// Trailing substring marking the end of a logical record.
    pub sentinel: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Rejects files carrying a UTF-16 byte-order mark.
///
/// The pipeline consumes decoded UTF-8 text; a UTF-8 BOM is tolerated and
/// stripped in [`read_lines`].
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open(path)?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Reads all physical lines of an export, stripping a UTF-8 BOM if present.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(open(path)?);
    let mut lines = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        if number == 0 {
            lines.push(line.strip_prefix('\u{feff}').unwrap_or(&line).to_string());
        } else {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Builds a [`Table`] from already-decoded physical lines.
///
/// Runs assembly, tokenizes every record (header included), and splits off
/// the header row when requested. A data row whose field count disagrees with
/// the header is kept but flagged, since the usual cause is the record
/// sentinel occurring inside a field and faking a record boundary.
pub fn parse_export(lines: &[String], options: &ExportOptions) -> Result<Table> {
    let records = assemble_records(lines, options.has_header, &options.sentinel);
    if records.is_empty() {
        return Err(IngestError::EmptyExport);
    }

    let mut rows = Vec::with_capacity(records.len());
    for logical_record in &records {
        rows.push(tokenize_record(logical_record)?);
    }

    if options.has_header {
        let expected = rows[0].len();
        for (number, row) in rows.iter().enumerate().skip(1) {
            if row.len() != expected {
                warn!(
                    row = number,
                    expected,
                    actual = row.len(),
                    "field count differs from header; possible record sentinel inside a field"
                );
            }
        }
    }

    debug!(
        records = records.len(),
        lines = lines.len(),
        "export parsed"
    );
    Ok(Table::from_rows(rows, options.has_header))
}

/// Reads and parses an export file into a [`Table`].
///
/// Construction is all-or-nothing: a read failure or a record the tokenizer
/// cannot split aborts the load, and no partial table is exposed.
pub fn read_export(path: &Path, options: &ExportOptions) -> Result<Table> {
    validate_encoding(path)?;
    let lines = read_lines(path)?;
    parse_export(&lines, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_export(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn read_export_builds_header_and_rows() {
        let file = create_temp_export("id,status,eol\n1,OPEN,---\n2,RESOLVED,---\n");
        let table = read_export(file.path(), &ExportOptions::default()).unwrap();
        assert_eq!(table.header_index("status"), Some(1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(1, 1), Some("RESOLVED"));
    }

    #[test]
    fn read_export_strips_utf8_bom() {
        let file = create_temp_export("\u{feff}id,eol\n1,---\n");
        let table = read_export(file.path(), &ExportOptions::default()).unwrap();
        assert_eq!(table.header_index("id"), Some(0));
    }

    #[test]
    fn read_export_rejects_utf16_bom() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, 0x00, 0x41]).unwrap();
        let result = read_export(file.path(), &ExportOptions::default());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn missing_file_is_reported_before_parsing() {
        let result = read_export(
            Path::new("/nonexistent/export.csv"),
            &ExportOptions::default(),
        );
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn empty_file_is_an_empty_export() {
        let file = create_temp_export("");
        let result = read_export(file.path(), &ExportOptions::default());
        assert!(matches!(result, Err(IngestError::EmptyExport)));
    }

    #[test]
    fn tokenize_failure_aborts_construction() {
        // The header's trailing comma leaves the tokenizer expecting a field
        // where the record ends; the whole load aborts.
        let lines = vec!["id,status,".to_string(), "1,OPEN,---".to_string()];
        let options = ExportOptions::default();
        let result = parse_export(&lines, &options);
        assert!(matches!(result, Err(IngestError::TruncatedRecord { .. })));
    }

    #[test]
    fn headerless_parse_keeps_every_record() {
        let lines = vec!["1,a,---".to_string(), "2,b,---".to_string()];
        let options = ExportOptions {
            has_header: false,
            ..ExportOptions::default()
        };
        let table = parse_export(&lines, &options).unwrap();
        assert!(table.header().is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn multi_line_record_reaches_the_table_reassembled() {
        let lines = vec![
            "id,description,eol".to_string(),
            "1,\"first".to_string(),
            "second\",---".to_string(),
        ];
        let table = parse_export(&lines, &ExportOptions::default()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.value(0, 1), Some("\"first\\nsecond\""));
    }
}
