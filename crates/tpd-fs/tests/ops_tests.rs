//! Tests for the std::fs backed filesystem port

use std::fs;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use tpd_fs::{Error, FileSystem, OsFileSystem, Probe};

#[test]
fn probe_reports_missing_file_and_directory() {
    let temp = TempDir::new().unwrap();
    temp.child("file.txt").write_str("x").unwrap();
    temp.child("dir").create_dir_all().unwrap();

    let fs = OsFileSystem;
    assert_eq!(fs.probe(&temp.path().join("nope")), Probe::Missing);
    assert_eq!(fs.probe(&temp.path().join("file.txt")), Probe::File);
    assert_eq!(fs.probe(&temp.path().join("dir")), Probe::Directory);
}

#[test]
fn probe_below_a_regular_file_is_not_existence() {
    let temp = TempDir::new().unwrap();
    temp.child("file.txt").write_str("x").unwrap();

    let probe = OsFileSystem.probe(&temp.path().join("file.txt").join("child"));
    assert!(!probe.exists());
}

#[test]
fn write_file_creates_and_truncates() {
    let temp = TempDir::new().unwrap();
    let target = temp.child("out.txt");

    OsFileSystem.write_file(target.path(), b"a longer first version", None).unwrap();
    OsFileSystem.write_file(target.path(), b"short", None).unwrap();

    target.assert("short");
}

#[test]
fn write_file_into_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("missing").join("out.txt");

    let err = OsFileSystem.write_file(&target, b"x", None).unwrap_err();
    assert!(matches!(err, Error::Io { ref path, .. } if path == &target));
}

#[test]
fn create_dir_all_builds_the_whole_chain() {
    let temp = TempDir::new().unwrap();
    let deep = temp.path().join("deep/folder/multiple/levels");

    OsFileSystem.create_dir_all(&deep).unwrap();

    temp.child("deep/folder/multiple/levels").assert(predicate::path::is_dir());
}

#[test]
fn remove_file_deletes_and_reports_missing() {
    let temp = TempDir::new().unwrap();
    let target = temp.child("gone.txt");
    target.write_str("bye").unwrap();

    OsFileSystem.remove_file(target.path()).unwrap();
    target.assert(predicate::path::missing());

    let err = OsFileSystem.remove_file(target.path()).unwrap_err();
    assert!(!err.reason().is_empty());
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn mode_applies_on_creation() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("secret.txt");

        OsFileSystem.write_file(&target, b"s", Some(0o600)).unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn mode_is_left_alone_on_existing_files() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("kept.txt");
        fs::write(&target, "old").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

        OsFileSystem.write_file(&target, b"new", Some(0o600)).unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }
}
