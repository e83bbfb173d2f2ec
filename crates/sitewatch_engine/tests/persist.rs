use std::fs;

use sitewatch_engine::{ensure_parent_dir, AtomicFile};
use tempfile::TempDir;

#[test]
fn creates_missing_parent_dir() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested").join("sites.json");
    let dir = ensure_parent_dir(&target).unwrap();
    assert!(dir.is_dir());
    assert_eq!(dir, temp.path().join("nested"));
}

#[test]
fn read_of_missing_file_is_none() {
    let temp = TempDir::new().unwrap();
    let file = AtomicFile::new(temp.path().join("absent.json"));
    assert_eq!(file.read().unwrap(), None);
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let file = AtomicFile::new(temp.path().join("sites.json"));

    file.write("hello").unwrap();
    assert_eq!(file.read().unwrap().as_deref(), Some("hello"));

    file.write("world").unwrap();
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "world");
    // Only the target remains; temp files were renamed away.
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn no_partial_file_when_parent_is_a_file() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let file = AtomicFile::new(blocker.join("sites.json"));
    assert!(file.write("data").is_err());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}
