//! Integration tests for loading survey extracts.

use std::fs;
use std::path::PathBuf;

use cebu_ingest::{IngestError, LoadOptions, load_tab, load_table};
use cebu_model::{ColumnType, Value};
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn missing_file_is_reported_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mbirth2.tab");

    let err = load_tab(&path).unwrap_err();

    match err {
        IngestError::FileNotFound { path: reported } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ragged_row_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "mbase2.tab",
        "basewman\tbasebrgy\tlivebrth\n1\t1\t2\n2\t1\n",
    );

    let err = load_tab(&path).unwrap_err();

    assert!(matches!(
        err,
        IngestError::Parse {
            line: 3,
            expected: 3,
            found: 2,
            ..
        }
    ));
    assert!(err.to_string().contains("mbase2.tab"));
}

#[test]
fn extra_field_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "mbase2.tab", "a\tb\n1\t2\t3\n");

    let err = load_tab(&path).unwrap_err();

    assert!(matches!(
        err,
        IngestError::Parse {
            expected: 2,
            found: 3,
            ..
        }
    ));
}

#[test]
fn birth_extract_types() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "mbirth2.tab",
        "basewman\tbasebrgy\tWEIGHT1\tmomweigt\tsexchild\n\
         1001\t12\t3.1\t48.5\t1\n\
         1002\t12\t2.85\t\t2\n",
    );

    let table = load_tab(&path).unwrap();

    assert_eq!(table.name(), "mbirth2.tab");
    assert_eq!(table.height(), 2);
    assert_eq!(table.field("basewman").unwrap().ty, ColumnType::Integer);
    assert_eq!(table.field("WEIGHT1").unwrap().ty, ColumnType::Float);
    assert_eq!(table.field("momweigt").unwrap().ty, ColumnType::Float);
    assert_eq!(table.value(1, "momweigt").unwrap(), Some(&Value::Missing));
    assert_eq!(table.value(0, "sexchild").unwrap(), Some(&Value::Integer(1)));
}

#[test]
fn conventional_missing_markers_keep_numeric_types() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "mbase2.tab",
        "basebrgy\tWEIGHT1\tlivebrth\theightcm\n\
         n/a\tNAN\t#N/A\t<NA>\n\
         12\t3.1\t2\tNone\n",
    );

    let table = load_tab(&path).unwrap();

    assert_eq!(table.field("basebrgy").unwrap().ty, ColumnType::Integer);
    assert_eq!(table.field("WEIGHT1").unwrap().ty, ColumnType::Float);
    assert_eq!(table.field("livebrth").unwrap().ty, ColumnType::Integer);
    assert_eq!(table.field("heightcm").unwrap().ty, ColumnType::Text);
    assert_eq!(table.rows()[0], vec![Value::Missing; 4]);
    assert_eq!(table.value(1, "basebrgy").unwrap(), Some(&Value::Integer(12)));
}

#[test]
fn declared_type_mismatch_fails_loudly() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "mhhmem2.tab", "basewman\twave\n1\t0\n2\tx\n");
    let options = LoadOptions::default().with_column_type("wave", ColumnType::Integer);

    let err = load_table(&path, &options).unwrap_err();

    match err {
        IngestError::TypeMismatch {
            line,
            column,
            value,
            expected,
            ..
        } => {
            assert_eq!(line, 3);
            assert_eq!(column, "wave");
            assert_eq!(value, "x");
            assert_eq!(expected, ColumnType::Integer);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn declared_type_overrides_inference() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "mbase2.tab", "basewman\tcode\n1\t007\n");
    let options = LoadOptions::default().with_column_type("code", ColumnType::Text);

    let table = load_table(&path, &options).unwrap();

    assert_eq!(table.value(0, "code").unwrap(), Some(&Value::from("007")));
}

#[test]
fn declared_type_for_unknown_column() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "mbase2.tab", "basewman\n1\n");
    let options = LoadOptions::default().with_column_type("nope", ColumnType::Float);

    let err = load_table(&path, &options).unwrap_err();

    assert!(matches!(err, IngestError::UnknownDeclaredColumn { .. }));
}

#[test]
fn duplicate_header_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "dup.tab", "a\ta\n1\t2\n");

    let err = load_tab(&path).unwrap_err();

    assert!(matches!(err, IngestError::Table(_)));
}
