use std::fs;

use handover_client::{write_csv_export, ExportError};
use handover_core::{records_to_rows, CsvRow, JobStatusRecord};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

fn row(value: serde_json::Value) -> CsvRow {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn writes_rows_under_sanitized_title() {
    let dir = tempdir().expect("tempdir");
    let rows = vec![
        row(json!({ "handover_token": "tok-1", "comment": "core, again" })),
        row(json!({ "handover_token": "tok-2", "comment": "variation" })),
    ];

    let summary = write_csv_export(dir.path(), "release 112/core", &rows).expect("export ok");

    assert_eq!(summary.row_count, 2);
    assert_eq!(summary.output_path, dir.path().join("release 112_core.csv"));
    let content = fs::read_to_string(&summary.output_path).expect("read");
    assert_eq!(
        content,
        "handover_token,comment\r\ntok-1,\"core, again\"\r\ntok-2,variation\r\n"
    );
}

#[test]
fn exports_job_records_with_every_column() {
    let dir = tempdir().expect("tempdir");
    let records = vec![JobStatusRecord {
        handover_token: Some("tok-7".to_string()),
        current_message: Some("Copying".to_string()),
        ..JobStatusRecord::default()
    }];
    let rows = records_to_rows(&records).expect("rows");

    let summary = write_csv_export(dir.path(), "", &rows).expect("export ok");

    assert_eq!(summary.output_path, dir.path().join("export.csv"));
    let content = fs::read_to_string(&summary.output_path).expect("read");
    let header = content.lines().next().expect("header line");
    assert!(header.starts_with("id,handover_token,message,current_message"));
    assert!(content.contains(",tok-7,,Copying,"));
}

#[test]
fn unwritable_target_is_a_persist_error() {
    let dir = tempdir().expect("tempdir");
    let blocker = dir.path().join("blocked");
    fs::write(&blocker, b"").expect("write");
    let rows = vec![row(json!({ "a": 1 }))];

    let err = write_csv_export(&blocker, "jobs", &rows).expect_err("not a directory");
    assert!(matches!(err, ExportError::Persist(_)));
}
