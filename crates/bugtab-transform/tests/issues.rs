//! End-to-end reduction tests over raw-shaped tables.

use bugtab_model::Table;
use bugtab_transform::issues::{DURATION_COLUMN, RESOLUTION_TIME_COLUMN};
use bugtab_transform::{TransformError, reduce_resolved_issues};

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| (*f).to_string()).collect()
}

fn raw_header() -> Vec<String> {
    owned(&[
        "id",
        "summary",
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
        "eol",
    ])
}

fn raw_row(
    id: &str,
    summary: &str,
    status: &str,
    description: &str,
    creation: &str,
    resolution_dates: &str,
) -> Vec<String> {
    owned(&[
        id,
        summary,
        status,
        "FIXED",
        "major",
        "P1",
        "alice",
        "bob",
        "ui",
        "[]",
        "[]",
        "",
        description,
        creation,
        resolution_dates,
        "---",
    ])
}

#[test]
fn reduces_to_resolved_issues_with_derived_duration() {
    let rows = vec![
        raw_header(),
        raw_row(
            "1",
            "crash on save",
            "RESOLVED",
            "\"{\"\"text\"\": \"\"details\"\"}\"",
            "2019-01-01T00:00:00Z",
            "\"[\"\"2019-01-03T06:30:00Z\"\"]\"",
        ),
        raw_row(
            "2",
            "open issue",
            "OPEN",
            "\"{\"\"text\"\": \"\"t\"\"}\"",
            "2019-01-01T00:00:00Z",
            "[]",
        ),
        raw_row(
            "3",
            "bad payload",
            "RESOLVED",
            "not a payload",
            "2019-01-01T00:00:00Z",
            "[]",
        ),
        raw_row(
            "4",
            "closed without dates",
            "CLOSED",
            "\"{\"\"text\"\": \"\"t\"\"}\"",
            "2019-01-01T00:00:00Z",
            "[]",
        ),
    ];
    let mut table = Table::from_rows(rows, true);

    let stats = reduce_resolved_issues(&mut table).unwrap();
    assert_eq!(stats.input_rows, 4);
    assert_eq!(stats.kept_rows, 2);
    assert_eq!(stats.filtered_rows, 1);
    assert_eq!(stats.skipped_rows, 1);

    // Header rebuilt: resolution_dates renamed, duration appended.
    assert_eq!(table.header_index("id"), Some(0));
    assert_eq!(table.header_index(RESOLUTION_TIME_COLUMN), Some(13));
    assert_eq!(table.header_index(DURATION_COLUMN), Some(14));
    assert_eq!(table.header_index("resolution_dates"), None);
    assert_eq!(table.header_index("summary"), None);

    let first = table.row(0).unwrap();
    assert_eq!(first[0], "1");
    assert_eq!(first[11], "\"crash on save\\ndetails\"");
    assert_eq!(first[13], "2019-01-03T06:30:00Z");
    assert_eq!(first[14], "54");

    // No recorded resolution: raw field passes through, duration defaults.
    let second = table.row(1).unwrap();
    assert_eq!(second[0], "4");
    assert_eq!(second[13], "[]");
    assert_eq!(second[14], "-1");
}

#[test]
fn missing_required_column_is_an_error() {
    let rows = vec![owned(&["id", "status"]), owned(&["1", "RESOLVED"])];
    let mut table = Table::from_rows(rows, true);
    let result = reduce_resolved_issues(&mut table);
    assert!(matches!(
        result,
        Err(TransformError::MissingColumn { .. })
    ));
}

#[test]
fn headerless_table_reports_the_first_missing_column() {
    let mut table = Table::from_rows(vec![owned(&["1", "RESOLVED"])], false);
    match reduce_resolved_issues(&mut table) {
        Err(TransformError::MissingColumn { column }) => assert_eq!(column, "id"),
        other => panic!("unexpected result: {other:?}"),
    }
}
