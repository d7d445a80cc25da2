use std::fs;

use argus_inspector_lib::loader::{self, LoadError};

const PROGRAM: &str = "\
define i64 @sum(i64 %a, i64 %b) {
entry:
  %total = add i64 %a, %b
  ret i64 %total
}
";

#[test]
fn loads_textual_ir_with_its_own_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sum.ll");
    fs::write(&path, PROGRAM).unwrap();

    let loaded = loader::load(&path).unwrap();

    assert!(loaded.module().get_function("sum").is_some());
    assert_eq!(PROGRAM.lines().count(), loaded.source().line_count());
    assert_eq!(Some("entry:"), loaded.source().line(2));
}

#[test]
fn a_missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nowhere.ll");

    let error = loader::load(&path).unwrap_err();

    assert!(matches!(error, LoadError::Read { .. }));
}

#[test]
fn malformed_ir_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ll");
    fs::write(&path, "define i64 @f(").unwrap();

    let error = loader::load(&path).unwrap_err();

    assert!(matches!(error, LoadError::Parse(_)));
}

#[test]
fn truncated_bitcode_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.bc");
    fs::write(&path, [0x42, 0x43, 0xC0, 0xDE, 0x00]).unwrap();

    let error = loader::load(&path).unwrap_err();

    assert!(matches!(error, LoadError::Parse(_)));
}

#[test]
fn non_utf8_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.bin");
    fs::write(&path, [0xFF, 0xFE, 0x00, 0x01]).unwrap();

    let error = loader::load(&path).unwrap_err();

    assert!(matches!(error, LoadError::NotText { .. }));
}
