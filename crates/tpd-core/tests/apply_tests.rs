//! Apply behaviour when filesystem primitives fail
//!
//! Every failure must stay confined to its destination.

use pretty_assertions::assert_eq;
use tpd_core::{Failure, Outcome, Report};
use tpd_test_utils::fixtures::{self, create_files, delete_files, update_files};
use tpd_test_utils::{FaultyFs, Op, RecordingObserver, TestRoot};

fn setup() -> TestRoot {
    let root = TestRoot::new();
    fixtures::prepare(&root);
    root
}

fn run_with(root: &TestRoot, fs: FaultyFs, intents: &[tpd_core::Intent]) -> Report {
    let outcome = root
        .reconciler()
        .with_filesystem(Box::new(fs))
        .reconcile(intents)
        .unwrap();
    match outcome {
        Outcome::Completed(report) => report,
        other => panic!("expected a completed reconciliation, got {other:?}"),
    }
}

fn failure(root: &TestRoot, relative: &str, message: &str) -> Failure {
    Failure {
        destination: root.join(relative),
        message: message.to_string(),
    }
}

#[test]
fn failed_directory_creation_skips_the_write() {
    let root = setup();

    let report = run_with(
        &root,
        FaultyFs::new().failing(Op::CreateDir, "Failed to create folder"),
        &create_files(),
    );

    assert_eq!(
        report,
        Report {
            failed_to_create: vec![
                failure(&root, "existingDir/text.txt", "Failed to create folder"),
                failure(&root, "deep/folder/multiple/levels/text.txt", "Failed to create folder"),
            ],
            rejected: vec![root.join("nonExistent/file1.txt")],
            ..Report::default()
        }
    );
    root.assert_missing("existingDir/text.txt");
}

#[test]
fn failed_writes_do_not_stop_the_batch() {
    let root = setup();

    let report = run_with(
        &root,
        FaultyFs::new().failing(Op::Write, "Failed to write file"),
        &create_files(),
    );

    assert_eq!(
        report,
        Report {
            failed_to_create: vec![
                failure(&root, "existingDir/text.txt", "Failed to write file"),
                failure(&root, "deep/folder/multiple/levels/text.txt", "Failed to write file"),
            ],
            rejected: vec![root.join("nonExistent/file1.txt")],
            ..Report::default()
        }
    );
    assert!(report.created.is_empty());
}

#[test]
fn failed_updates_are_reported_per_destination() {
    let root = setup();
    root.reconciler().reconcile(&create_files()).unwrap();

    let report = run_with(
        &root,
        FaultyFs::new().failing(Op::Write, "Failed to write file"),
        &update_files(),
    );

    assert_eq!(
        report,
        Report {
            failed_to_update: vec![
                failure(&root, "existingDir/text.txt", "Failed to write file"),
                failure(&root, "deep/folder/multiple/levels/text.txt", "Failed to write file"),
            ],
            rejected: vec![root.join("nonExistent/file1.txt")],
            ..Report::default()
        }
    );
    root.assert_file("existingDir/text.txt", "test");
}

#[test]
fn failed_deletions_are_reported_and_ignored_ones_are_not() {
    let root = setup();
    root.reconciler().reconcile(&create_files()).unwrap();

    let report = run_with(
        &root,
        FaultyFs::new().failing(Op::Remove, "Failed to delete file"),
        &delete_files(),
    );

    assert_eq!(
        report,
        Report {
            failed_to_delete: vec![failure(&root, "existingDir/text.txt", "Failed to delete file")],
            ..Report::default()
        }
    );
    root.assert_file("existingDir/text.txt", "test");
}

#[test]
fn failures_reach_the_observer() {
    let root = setup();
    let observer = RecordingObserver::new();

    root.reconciler()
        .with_filesystem(Box::new(FaultyFs::new().failing(Op::Write, "Failed to write file")))
        .with_observer(Box::new(observer.clone()))
        .reconcile(&create_files())
        .unwrap();

    let failed = observer.matching("failed");
    assert_eq!(failed.len(), 2);
    assert!(failed.iter().all(|event| event.ends_with("Failed to write file")));
}

#[test]
fn unparseable_mode_fails_only_that_destination() {
    let root = setup();
    let intents = vec![
        tpd_core::Intent::write("existingDir", "bad.txt", "x").with_mode("999"),
        tpd_core::Intent::write("existingDir", "good.txt", "y"),
    ];

    let report = run_with(&root, FaultyFs::new(), &intents);

    assert_eq!(report.created, vec![root.join("existingDir/good.txt")]);
    assert_eq!(report.failed_to_create.len(), 1);
    assert!(report.failed_to_create[0].message.contains("Invalid file mode"));
    root.assert_missing("existingDir/bad.txt");
}

#[test]
fn unknown_encoding_fails_the_update() {
    let root = setup();
    root.write("existingDir/text.txt", "old");

    let report = run_with(
        &root,
        FaultyFs::new(),
        &[tpd_core::Intent::write("existingDir", "text.txt", "new").with_encoding("klingon")],
    );

    assert_eq!(report.failed_to_update[0].message, "Unknown encoding: klingon");
    root.assert_file("existingDir/text.txt", "old");
}

#[test]
fn encoding_controls_bytes_on_disk() {
    let root = setup();

    run_with(
        &root,
        FaultyFs::new(),
        &[
            tpd_core::Intent::write("existingDir", "latin1.txt", "é").with_encoding("latin1"),
            tpd_core::Intent::write("existingDir", "b64.bin", "aGk=").with_encoding("base64"),
            tpd_core::Intent::write("existingDir", "hex.bin", "cafe").with_encoding("hex"),
            tpd_core::Intent::write("existingDir", "url.bin", "-_8").with_encoding("base64url"),
        ],
    );

    assert_eq!(std::fs::read(root.join("existingDir/latin1.txt")).unwrap(), vec![0xe9]);
    assert_eq!(std::fs::read(root.join("existingDir/b64.bin")).unwrap(), b"hi".to_vec());
    assert_eq!(std::fs::read(root.join("existingDir/hex.bin")).unwrap(), vec![0xca, 0xfe]);
    assert_eq!(std::fs::read(root.join("existingDir/url.bin")).unwrap(), vec![0xfb, 0xff]);
}

#[cfg(unix)]
#[test]
fn declared_mode_is_applied_on_create() {
    use std::os::unix::fs::PermissionsExt;

    let root = setup();
    run_with(
        &root,
        FaultyFs::new(),
        &[tpd_core::Intent::write("existingDir", "secret.txt", "s").with_mode("0600")],
    );

    let mode = std::fs::metadata(root.join("existingDir/secret.txt"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
