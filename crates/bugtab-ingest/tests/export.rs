//! End-to-end ingestion scenarios over realistic export shapes.

use std::io::Write;

use bugtab_ingest::{ExportOptions, parse_export, read_export};
use bugtab_model::field::{FieldDialect, dialect_of, logical_value};
use tempfile::NamedTempFile;

#[test]
fn tracker_row_with_quoted_text_tokenizes_to_discrete_fields() {
    let lines = vec![
        "id,status,resolution,description,blocks,eol".to_string(),
        "42365,RESOLVED,FIXED,\"some \"\"quoted\"\" text\",[],---".to_string(),
    ];
    let table = parse_export(&lines, &ExportOptions::default()).unwrap();

    assert_eq!(table.header_index("description"), Some(3));
    let row = table.row(0).unwrap();
    assert_eq!(row.len(), 6);
    assert_eq!(row[0], "42365");
    assert_eq!(row[1], "RESOLVED");
    assert_eq!(row[2], "FIXED");
    assert_eq!(row[3], "\"some \"\"quoted\"\" text\"");
    assert_eq!(row[4], "[]");

    // Raw form is preserved; the logical text is one unquote away.
    assert_eq!(dialect_of(&row[3]), FieldDialect::QuotedString);
    assert_eq!(logical_value(&row[3]), "some \"quoted\" text");
}

#[test]
fn embedded_json_object_stays_one_field() {
    let lines = vec![
        "id,description,eol".to_string(),
        "1,\"{\"\"text\"\": \"\"a, b\"\"}\",---".to_string(),
    ];
    let table = parse_export(&lines, &ExportOptions::default()).unwrap();

    let row = table.row(0).unwrap();
    assert_eq!(row.len(), 3);
    assert_eq!(row[1], "\"{\"\"text\"\": \"\"a, b\"\"}\"");
    assert_eq!(dialect_of(&row[1]), FieldDialect::QuotedObject);
}

#[test]
fn wrapped_description_lines_collapse_into_one_record() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "id,summary,description,eol\n\
         7,crash on save,\"{{\"\"text\"\": \"\"step one\n\
         step two\"\"}}\",---\n"
    )
    .unwrap();

    let table = read_export(file.path(), &ExportOptions::default()).unwrap();
    assert_eq!(table.len(), 1);
    let description = table.value(0, 2).unwrap();
    assert_eq!(description, "\"{\"\"text\"\": \"\"step one\\nstep two\"\"}\"");
    assert!(!description.contains('\n'));
}

#[test]
fn custom_sentinel_is_honored() {
    let lines = vec!["1,a,%%%".to_string(), "2,b,%%%".to_string()];
    let options = ExportOptions {
        has_header: false,
        sentinel: ",%%%".to_string(),
    };
    let table = parse_export(&lines, &options).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.value(0, 2), Some("%%%"));
}
