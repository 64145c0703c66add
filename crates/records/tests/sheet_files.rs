use std::io::Write;

use records::{load_csv_path, LoadError, RecordsConfig, ValidationError};

#[test]
fn loads_sheet_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "Task,Description,Actions,Objects").unwrap();
    writeln!(file, "Dishes,Wash dishes,scrub,sponge").unwrap();
    writeln!(file, "Dishes again,Wash dishes,rinse,rack").unwrap();

    let set = load_csv_path(file.path(), &RecordsConfig::default()).expect("sheet loads");
    assert_eq!(set.len(), 2);
    assert_eq!(set[0].description, set[1].description);
    assert_eq!(set[1].objects, "rack");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_csv_path(dir.path().join("absent.csv"), &RecordsConfig::default())
        .expect_err("file does not exist");
    assert!(matches!(err, LoadError::Io(_)));
    assert!(err.as_validation().is_none());
}

#[test]
fn utf8_bom_before_header_is_ignored() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all("\u{feff}Task,Description,Actions,Objects\nt,d,a,o\n".as_bytes())
        .unwrap();

    let set = load_csv_path(file.path(), &RecordsConfig::default()).expect("bom stripped");
    assert_eq!(set[0].task, "t");
}

#[test]
fn strict_mode_reports_validation_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "Task,Description,Actions,Objects").unwrap();
    writeln!(file, ",Wash dishes,scrub,sponge").unwrap();

    let cfg = RecordsConfig {
        skip_incomplete_rows: false,
        ..Default::default()
    };
    let err = load_csv_path(file.path(), &cfg).expect_err("task missing");
    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::IncompleteRow { row: 2, field: "Task" })
    );
}
