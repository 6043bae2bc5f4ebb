use std::fs;

use moodler_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_nested_output_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("courses").join("5").join("2");
    ensure_output_dir(&dir).unwrap();
    assert!(dir.is_dir());
    // Existing directories are fine too.
    ensure_output_dir(&dir).unwrap();
}

#[test]
fn output_dir_must_be_a_directory() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("plain");
    fs::write(&file, "x").unwrap();
    assert!(matches!(
        ensure_output_dir(&file),
        Err(PersistError::OutputDir(_))
    ));
}

#[test]
fn write_new_stores_bytes() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    let path = writer.write_new("f1.txt", b"hello").unwrap();
    assert_eq!(path, temp.path().join("f1.txt"));
    assert_eq!(fs::read(&path).unwrap(), b"hello");
}

#[test]
fn write_new_never_overwrites() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    writer.write_new("doc.pdf", b"first").unwrap();

    let err = writer.write_new("doc.pdf", b"second").unwrap_err();
    assert!(matches!(err, PersistError::AlreadyExists(ref p) if p.ends_with("doc.pdf")));
    assert_eq!(fs::read(temp.path().join("doc.pdf")).unwrap(), b"first");

    // The temp file is cleaned up when the rename is refused.
    let entries = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn missing_directory_leaves_nothing_behind() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent");
    let writer = AtomicFileWriter::new(missing.clone());
    assert!(matches!(
        writer.write_new("doc.pdf", b"data"),
        Err(PersistError::Io(_))
    ));
    assert!(!missing.exists());
}
