//! Test harness for the parser against fixture files.
//!
//! Every `.json` file under `test/json/` must parse without error. Every
//! `.json` file under `test/nay/` must fail, and the error must display
//! exactly as the text in the sibling `.error` file.

use std::fs;
use std::path::{Path, PathBuf};

use libjsontree::{ErrorCode, Kind, Parser};

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// All `.json` files in a subdirectory of `test/`, sorted.
fn fixtures(subdir: &str) -> Vec<PathBuf> {
    let pattern = test_root().join(subdir).join("*.json");
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .expect("valid glob pattern")
        .filter_map(|entry| entry.ok())
        .collect();
    files.sort();
    files
}

#[test_log::test]
fn test_valid_fixtures() {
    let files = fixtures("json");
    assert!(!files.is_empty(), "no fixtures found in test/json");

    let mut parser = Parser::new();
    let mut failures = Vec::new();
    for path in &files {
        let input = fs::read(path).unwrap();
        match parser.parse_bytes(&input) {
            Ok(root) => {
                assert!(matches!(root.kind(), Kind::Object | Kind::Array));
                assert_eq!(parser.error_code(), ErrorCode::None);
            }
            Err(e) => failures.push(format!("{}: {}", path.display(), e)),
        }
    }
    assert!(failures.is_empty(), "fixtures failed:\n{}", failures.join("\n"));
}

#[test_log::test]
fn test_invalid_fixtures() {
    let files = fixtures("nay");
    assert!(!files.is_empty(), "no fixtures found in test/nay");

    let mut parser = Parser::new();
    let mut failures = Vec::new();
    for path in &files {
        let input = fs::read(path).unwrap();
        let expected = fs::read_to_string(path.with_extension("error"))
            .unwrap_or_else(|_| panic!("missing .error file for {}", path.display()));
        match parser.parse_bytes(&input) {
            Ok(_) => failures.push(format!("{}: parsed but should fail", path.display())),
            Err(e) => {
                assert_eq!(parser.error_code(), ErrorCode::Syntax);
                if e.to_string() != expected.trim() {
                    failures.push(format!(
                        "{}: expected {:?}, got {:?}",
                        path.display(),
                        expected.trim(),
                        e.to_string()
                    ));
                }
            }
        }
    }
    assert!(failures.is_empty(), "fixtures failed:\n{}", failures.join("\n"));
}

#[test]
fn test_config_fixture_contents() {
    let input = fs::read_to_string(test_root().join("json").join("config.json")).unwrap();
    let mut parser = Parser::new();
    let root = parser.parse(&input).unwrap();

    assert_eq!(root.get_string("name"), Some("sensor-node"));
    assert_eq!(root.get_number("version"), 3.0);
    assert!(root.get_boolean("enabled"));
    assert_eq!(root.get_object_by_path("network").unwrap().get_number("timeout"), 25.0);
    assert!(root.get_object("network").unwrap().is_null_member("fallback"));

    let labels = root.get_array("labels").unwrap();
    assert_eq!(labels.get_string_at(0), Some("temp\tC"));
    assert_eq!(labels.get_string_at(1), Some("humidity \"%\""));
    assert_eq!(labels.get_string_at(2), Some("path\\to/x"));
    assert_eq!(root.get_array("channels").unwrap().get_number_at(2), 11.0);
}

#[test]
fn test_unicode_fixture_contents() {
    let input = fs::read(test_root().join("json").join("unicode-escapes.json")).unwrap();
    let mut parser = Parser::new();
    let root = parser.parse_bytes(&input).unwrap();
    assert_eq!(root.get_string("heart"), Some("\u{2665}"));
    assert_eq!(root.get_string("clef"), Some("\u{1D11E}"));
}
